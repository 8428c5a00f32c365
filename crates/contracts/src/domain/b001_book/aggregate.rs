use crate::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор книги
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(pub Uuid);

impl BookId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for BookId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(BookId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Книга — единственная сущность каталога.
///
/// Все необязательные поля хранятся пустой строкой, а не `None`, чтобы
/// сериализация и отрисовка таблицы оставались стабильными.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,

    pub author: String,
    pub title: String,

    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub location: String,
    /// Внешний/каталожный идентификатор (из бумажной картотеки)
    #[serde(default)]
    pub book_id: String,
    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl Book {
    /// Создать новую книгу со свежим идентификатором
    pub fn new_for_insert(dto: &BookDto) -> Self {
        Self {
            id: BookId::new_v4(),
            author: dto.author.clone(),
            title: dto.title.clone(),
            genre: dto.genre.clone(),
            quantity: dto.quantity.clone(),
            location: dto.location.clone(),
            book_id: dto.book_id.clone(),
            notes: dto.notes.clone(),
            metadata: EntityMetadata::new(),
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Обновить данные из DTO; id и created_at сохраняются
    pub fn update(&mut self, dto: &BookDto) {
        self.author = dto.author.clone();
        self.title = dto.title.clone();
        self.genre = dto.genre.clone();
        self.quantity = dto.quantity.clone();
        self.location = dto.location.clone();
        self.book_id = dto.book_id.clone();
        self.notes = dto.notes.clone();
        self.metadata.touch();
    }

    /// Валидация на уровне формы: автор и название обязательны
    pub fn validate(dto: &BookDto) -> Result<(), String> {
        if dto.author.trim().is_empty() {
            return Err("Автор обязателен для заполнения".into());
        }
        if dto.title.trim().is_empty() {
            return Err("Название обязательно для заполнения".into());
        }
        Ok(())
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления книги
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BookDto {
    pub id: Option<String>,
    pub author: String,
    pub title: String,
    pub genre: String,
    pub quantity: String,
    pub location: String,
    pub book_id: String,
    pub notes: String,
}

impl From<&Book> for BookDto {
    fn from(b: &Book) -> Self {
        Self {
            id: Some(b.id.as_string()),
            author: b.author.clone(),
            title: b.title.clone(),
            genre: b.genre.clone(),
            quantity: b.quantity.clone(),
            location: b.location.clone(),
            book_id: b.book_id.clone(),
            notes: b.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(author: &str, title: &str) -> BookDto {
        BookDto {
            author: author.to_string(),
            title: title.to_string(),
            ..BookDto::default()
        }
    }

    #[test]
    fn new_for_insert_defaults_optional_fields_to_empty() {
        let book = Book::new_for_insert(&dto("Orwell", "1984"));
        assert_eq!(book.author, "Orwell");
        assert_eq!(book.title, "1984");
        assert_eq!(book.genre, "");
        assert_eq!(book.quantity, "");
        assert_eq!(book.location, "");
        assert_eq!(book.book_id, "");
        assert_eq!(book.notes, "");
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = Book::new_for_insert(&dto("a", "a"));
        let b = Book::new_for_insert(&dto("a", "a"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn update_preserves_id() {
        let mut book = Book::new_for_insert(&dto("Orwell", "1984"));
        let id = book.id;
        let mut changed = BookDto::from(&book);
        changed.title = "Animal Farm".to_string();
        changed.genre = "satire".to_string();
        book.update(&changed);
        assert_eq!(book.id, id);
        assert_eq!(book.title, "Animal Farm");
        assert_eq!(book.genre, "satire");
    }

    #[test]
    fn validate_requires_author_and_title() {
        assert!(Book::validate(&dto("Orwell", "1984")).is_ok());
        assert!(Book::validate(&dto("", "1984")).is_err());
        assert!(Book::validate(&dto("Orwell", "   ")).is_err());
    }

    #[test]
    fn deserializes_record_without_optional_fields() {
        let raw = format!(
            r#"{{"id":"{}","author":"Orwell","title":"1984"}}"#,
            Uuid::new_v4()
        );
        let book: Book = serde_json::from_str(&raw).unwrap();
        assert_eq!(book.genre, "");
        assert_eq!(book.notes, "");
    }
}
