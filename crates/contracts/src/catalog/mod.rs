//! Контейнер состояния каталога.
//!
//! Единственный владелец последовательности книг в рамках сессии.
//! Все мутации идут через методы контейнера; отрисованная таблица —
//! производное представление и пересчитывается из него.

pub mod query;

use crate::domain::b001_book::aggregate::{Book, BookDto, BookId};
use serde::{Deserialize, Serialize};

/// Последовательность книг текущей сессии.
///
/// Сериализуется целиком: сохранение — это полная перезапись массива,
/// а не инкрементальный дифф.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Найти книгу по идентификатору
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Добавить книгу в конец последовательности
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Добавить партию импорта в конец, в порядке файла
    pub fn append(&mut self, batch: Vec<Book>) {
        self.books.extend(batch);
    }

    /// Заменить поля книги по id. Возвращает `false`, если книга
    /// не найдена (тихий no-op).
    pub fn update(&mut self, id: BookId, dto: &BookDto) -> bool {
        match self.books.iter_mut().find(|b| b.id == id) {
            Some(book) => {
                book.update(dto);
                true
            }
            None => false,
        }
    }

    /// Удалить книгу по id. Возвращает `false`, если книга не найдена.
    pub fn remove(&mut self, id: BookId) -> bool {
        let before = self.books.len();
        self.books.retain(|b| b.id != id);
        self.books.len() != before
    }

    /// Сериализовать каталог в JSON-массив
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }

    /// Восстановить каталог из JSON-массива
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(author: &str, title: &str) -> Book {
        Book::new_for_insert(&BookDto {
            author: author.to_string(),
            title: title.to_string(),
            ..BookDto::default()
        })
    }

    #[test]
    fn add_appends_exactly_one_retrievable_by_id() {
        let mut catalog = Catalog::new();
        let b = book("Orwell", "1984");
        let id = b.id;

        catalog.add(b);
        assert_eq!(catalog.len(), 1);

        let stored = catalog.get(id).expect("book must be retrievable");
        assert_eq!(stored.author, "Orwell");
        assert_eq!(stored.genre, "");
        assert_eq!(stored.quantity, "");
        assert_eq!(stored.location, "");
        assert_eq!(stored.book_id, "");
        assert_eq!(stored.notes, "");
    }

    #[test]
    fn remove_deletes_exactly_the_matching_book() {
        let mut catalog = Catalog::new();
        let a = book("Orwell", "1984");
        let b = book("Huxley", "Brave New World");
        let (id_a, id_b) = (a.id, b.id);
        catalog.add(a);
        catalog.add(b);

        assert!(catalog.remove(id_a));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(id_a).is_none());
        assert!(catalog.get(id_b).is_some());
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut catalog = Catalog::new();
        catalog.add(book("Orwell", "1984"));
        let snapshot = catalog.clone();

        assert!(!catalog.remove(BookId::new_v4()));
        assert_eq!(catalog, snapshot);
    }

    #[test]
    fn update_replaces_fields_in_place() {
        let mut catalog = Catalog::new();
        catalog.add(book("Orwell", "1984"));
        let target = book("Huxley", "Brave New World");
        let id = target.id;
        catalog.add(target);
        catalog.add(book("Bradbury", "Fahrenheit 451"));

        let mut dto = BookDto::from(catalog.get(id).unwrap());
        dto.genre = "dystopia".to_string();
        assert!(catalog.update(id, &dto));

        assert_eq!(catalog.len(), 3);
        // позиция сохранена
        assert_eq!(catalog.books()[1].id, id);
        assert_eq!(catalog.books()[1].genre, "dystopia");
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut catalog = Catalog::new();
        catalog.add(book("Orwell", "1984"));
        let snapshot = catalog.clone();

        assert!(!catalog.update(BookId::new_v4(), &BookDto::default()));
        assert_eq!(catalog, snapshot);
    }

    #[test]
    fn json_round_trip_reproduces_equal_catalog() {
        let mut catalog = Catalog::new();
        catalog.add(book("Оруэлл", "1984"));
        catalog.add(book("Хаксли", "О дивный новый мир"));

        let raw = catalog.to_json().unwrap();
        let restored = Catalog::from_json(&raw).unwrap();
        assert_eq!(catalog, restored);
    }

    #[test]
    fn corrupt_json_is_an_error_not_a_panic() {
        assert!(Catalog::from_json("not json at all").is_err());
        assert!(Catalog::from_json("{\"books\":42}").is_err());
    }

    #[test]
    fn append_preserves_batch_order() {
        let mut catalog = Catalog::new();
        catalog.add(book("a", "1"));
        let batch = vec![book("b", "2"), book("c", "3")];
        let ids: Vec<_> = batch.iter().map(|b| b.id).collect();

        catalog.append(batch);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.books()[1].id, ids[0]);
        assert_eq!(catalog.books()[2].id, ids[1]);
    }
}
