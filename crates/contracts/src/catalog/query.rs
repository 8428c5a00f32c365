//! Поиск и сортировка каталога.
//!
//! Оба преобразования чистые и независимые: видимые строки таблицы —
//! это `sort(filter(catalog))`, канонический порядок последовательности
//! никогда не мутируется.

use crate::domain::b001_book::aggregate::Book;
use std::cmp::Ordering;

/// Подстрочный поиск без учёта регистра по автору, названию и жанру
/// (OR-семантика: достаточно совпадения в одном поле).
pub fn matches_filter(book: &Book, filter: &str) -> bool {
    let q = filter.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    book.author.to_lowercase().contains(&q)
        || book.title.to_lowercase().contains(&q)
        || book.genre.to_lowercase().contains(&q)
}

/// Отфильтровать книги по поисковому запросу
pub fn filter_books(books: &[Book], filter: &str) -> Vec<Book> {
    books
        .iter()
        .filter(|b| matches_filter(b, filter))
        .cloned()
        .collect()
}

/// Сравнить две книги по указанному полю (ключ — нижний регистр)
pub fn compare_by_field(a: &Book, b: &Book, field: &str) -> Ordering {
    match field {
        "author" => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
        "title" => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        _ => Ordering::Equal,
    }
}

/// Отсортировать книги по указанному полю
pub fn sort_books(items: &mut Vec<Book>, field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = compare_by_field(a, b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Видимые строки таблицы: фильтр, затем сортировка
pub fn visible_books(books: &[Book], filter: &str, field: &str, ascending: bool) -> Vec<Book> {
    let mut visible = filter_books(books, filter);
    sort_books(&mut visible, field, ascending);
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::b001_book::aggregate::BookDto;

    fn book(author: &str, title: &str, genre: &str) -> Book {
        Book::new_for_insert(&BookDto {
            author: author.to_string(),
            title: title.to_string(),
            genre: genre.to_string(),
            ..BookDto::default()
        })
    }

    fn shelf() -> Vec<Book> {
        vec![
            book("Orwell", "1984", "dystopia"),
            book("Huxley", "Brave New World", "dystopia"),
            book("Tolkien", "The Hobbit", "fantasy"),
        ]
    }

    #[test]
    fn filter_is_case_insensitive_over_three_fields() {
        let books = shelf();

        // совпадение по автору
        let by_author = filter_books(&books, "huxley");
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].author, "Huxley");

        // по названию
        let by_title = filter_books(&books, "HOBBIT");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "The Hobbit");

        // по жанру, OR-семантика
        let by_genre = filter_books(&books, "dystopia");
        assert_eq!(by_genre.len(), 2);
    }

    #[test]
    fn filter_partitions_books_exactly() {
        let books = shelf();
        let q = "or";
        let matched = filter_books(&books, q);

        for b in &matched {
            assert!(matches_filter(b, q));
        }
        for b in books.iter().filter(|b| !matched.iter().any(|m| m.id == b.id)) {
            assert!(!b.author.to_lowercase().contains(q));
            assert!(!b.title.to_lowercase().contains(q));
            assert!(!b.genre.to_lowercase().contains(q));
        }
    }

    #[test]
    fn empty_filter_returns_everything() {
        let books = shelf();
        assert_eq!(filter_books(&books, "").len(), 3);
        assert_eq!(filter_books(&books, "   ").len(), 3);
    }

    #[test]
    fn sort_by_author_ascending_and_descending() {
        let mut items = shelf();
        sort_books(&mut items, "author", true);
        let authors: Vec<_> = items.iter().map(|b| b.author.as_str()).collect();
        assert_eq!(authors, vec!["Huxley", "Orwell", "Tolkien"]);
        for pair in items.windows(2) {
            assert!(pair[0].author.to_lowercase() <= pair[1].author.to_lowercase());
        }

        sort_books(&mut items, "author", false);
        let authors: Vec<_> = items.iter().map(|b| b.author.as_str()).collect();
        assert_eq!(authors, vec!["Tolkien", "Orwell", "Huxley"]);
    }

    #[test]
    fn sort_keeps_all_books_without_duplicates() {
        let source = shelf();
        let mut items = source.clone();
        sort_books(&mut items, "title", false);

        assert_eq!(items.len(), source.len());
        for b in &source {
            assert_eq!(items.iter().filter(|x| x.id == b.id).count(), 1);
        }
    }

    #[test]
    fn sort_ignores_case_of_keys() {
        let mut items = vec![book("banks", "b", ""), book("Adams", "a", "")];
        sort_books(&mut items, "author", true);
        assert_eq!(items[0].author, "Adams");
    }

    #[test]
    fn filter_and_sort_compose() {
        let books = shelf();
        let visible = visible_books(&books, "dystopia", "author", true);
        let authors: Vec<_> = visible.iter().map(|b| b.author.as_str()).collect();
        assert_eq!(authors, vec!["Huxley", "Orwell"]);
    }

    #[test]
    fn orwell_then_huxley_scenario() {
        use crate::catalog::Catalog;

        let mut catalog = Catalog::new();
        let orwell = book("Orwell", "1984", "");
        let orwell_id = orwell.id;
        catalog.add(orwell);
        assert_eq!(catalog.len(), 1);
        let stored = catalog.get(orwell_id).unwrap();
        assert_eq!(stored.genre, "");
        assert_eq!(stored.notes, "");

        catalog.add(book("Huxley", "Brave New World", ""));

        let found = filter_books(catalog.books(), "huxley");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Brave New World");

        let sorted = visible_books(catalog.books(), "", "author", true);
        let authors: Vec<_> = sorted.iter().map(|b| b.author.as_str()).collect();
        assert_eq!(authors, vec!["Huxley", "Orwell"]);
    }
}
