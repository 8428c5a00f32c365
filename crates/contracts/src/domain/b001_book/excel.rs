//! Маппинг табличного импорта на поля книги.
//!
//! Файл разбирается на стороне браузера в массив строк; здесь — чистая
//! часть: сопоставление заголовков первой строки с ожидаемыми колонками
//! и преобразование строк данных в книги.

use super::aggregate::{Book, BookDto};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Определение колонки для импорта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Техническое имя поля
    pub field_name: String,
    /// Заголовок в файле
    pub title: String,
}

impl ColumnDef {
    fn new(field_name: &str, title: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            title: title.to_string(),
        }
    }
}

/// Канонический набор колонок каталожной таблицы.
///
/// Заголовки — литералы из бумажной картотеки, по ним размечены
/// реальные файлы; менять синхронно с шаблоном импорта.
pub fn book_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("book_id", "ID"),
        ColumnDef::new("author", "Автор"),
        ColumnDef::new("title", "Название"),
        ColumnDef::new("genre", "Жанр"),
        ColumnDef::new("quantity", "Кол-во экземпляров, частей, томов"),
        ColumnDef::new("location", "МЕСТОПОЛОЖЕНИЕ(№СТЕЛЛАЖА+№ПОЛКИ)"),
        ColumnDef::new("notes", "ПРИМЕЧАНИЯ/СОСТОЯНИЕ/НАЛИЧИЕ"),
    ]
}

/// Метаданные Excel файла
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcelMetadata {
    /// Список колонок (field_name)
    pub columns: Vec<String>,
    /// Количество строк данных (без заголовка)
    pub row_count: usize,
    /// Имя файла
    pub file_name: String,
}

/// Статус сопоставления колонки
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Ожидаемое имя колонки
    pub expected: String,
    /// Найденное имя колонки в файле (если найдено)
    pub found: Option<String>,
    /// Индекс в файле
    pub file_index: Option<usize>,
}

/// Результат разбора Excel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcelData {
    /// Метаданные
    pub metadata: ExcelMetadata,
    /// Строки данных (field_name -> значение)
    pub rows: Vec<HashMap<String, String>>,
    /// Маппинг колонок
    pub column_mapping: Vec<ColumnMapping>,
    /// Заголовки из файла
    pub file_headers: Vec<String>,
}

impl ExcelData {
    /// Создать ExcelData из сырых данных (массив массивов)
    pub fn from_raw(
        raw_data: Vec<Vec<String>>,
        columns: Vec<ColumnDef>,
        file_name: String,
    ) -> Result<Self, String> {
        if raw_data.is_empty() {
            return Err("Файл пуст".to_string());
        }

        // Первая строка - заголовки
        let headers = &raw_data[0];
        let file_headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

        let mut header_indices: HashMap<String, usize> = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            header_indices.insert(header.trim().to_lowercase(), idx);
        }

        // Сопоставляем колонки: точное совпадение, затем частичное
        let mut column_mapping = Vec::new();
        for col_def in &columns {
            let title_lower = col_def.title.trim().to_lowercase();

            if let Some(&col_idx) = header_indices.get(&title_lower) {
                column_mapping.push(ColumnMapping {
                    expected: col_def.title.clone(),
                    found: Some(headers[col_idx].trim().to_string()),
                    file_index: Some(col_idx),
                });
            } else {
                let similar = headers.iter().enumerate().find(|(_, h)| {
                    let h_lower = h.trim().to_lowercase();
                    h_lower.contains(&title_lower) || title_lower.contains(&h_lower)
                });

                if let Some((idx, h)) = similar {
                    column_mapping.push(ColumnMapping {
                        expected: col_def.title.clone(),
                        found: Some(h.trim().to_string()),
                        file_index: Some(idx),
                    });
                } else {
                    column_mapping.push(ColumnMapping {
                        expected: col_def.title.clone(),
                        found: None,
                        file_index: None,
                    });
                }
            }
        }

        // Строки данных: ненайденная колонка даёт пустое значение,
        // полностью пустые строки пропускаются
        let mut rows = Vec::new();
        for row in raw_data.iter().skip(1) {
            let mut row_data = HashMap::new();

            for (col_def, mapping) in columns.iter().zip(column_mapping.iter()) {
                if let Some(col_idx) = mapping.file_index {
                    let value = row.get(col_idx).cloned().unwrap_or_default();
                    row_data.insert(col_def.field_name.clone(), value.trim().to_string());
                } else {
                    row_data.insert(col_def.field_name.clone(), String::new());
                }
            }

            if row_data.values().any(|v| !v.is_empty()) {
                rows.push(row_data);
            }
        }

        let field_names: Vec<String> = columns.iter().map(|c| c.field_name.clone()).collect();

        Ok(ExcelData {
            metadata: ExcelMetadata {
                columns: field_names,
                row_count: rows.len(),
                file_name,
            },
            rows,
            column_mapping,
            file_headers,
        })
    }

    /// Преобразовать строки данных в книги (в порядке файла).
    /// Каждая книга получает свежий уникальный идентификатор.
    pub fn to_books(&self) -> Vec<Book> {
        self.rows
            .iter()
            .map(|row| {
                let field = |name: &str| row.get(name).cloned().unwrap_or_default();
                let dto = BookDto {
                    id: None,
                    author: field("author"),
                    title: field("title"),
                    genre: field("genre"),
                    quantity: field("quantity"),
                    location: field("location"),
                    book_id: field("book_id"),
                    notes: field("notes"),
                };
                Book::new_for_insert(&dto)
            })
            .collect()
    }

    /// Проверить, все ли ожидаемые колонки найдены
    pub fn has_all_columns_mapped(&self) -> bool {
        self.column_mapping.iter().all(|m| m.found.is_some())
    }

    /// Получить количество несопоставленных колонок
    pub fn unmapped_count(&self) -> usize {
        self.column_mapping
            .iter()
            .filter(|m| m.found.is_none())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn maps_canonical_headers_to_book_fields() {
        let data = raw(&[
            &["Автор", "Название", "Жанр"],
            &["Оруэлл", "1984", "антиутопия"],
            &["Хаксли", "О дивный новый мир", ""],
        ]);
        let excel = ExcelData::from_raw(data, book_columns(), "books.xlsx".into()).unwrap();
        assert_eq!(excel.metadata.row_count, 2);

        let books = excel.to_books();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].author, "Оруэлл");
        assert_eq!(books[0].title, "1984");
        assert_eq!(books[0].genre, "антиутопия");
        // отсутствующие в файле колонки дают пустые поля
        assert_eq!(books[0].quantity, "");
        assert_eq!(books[0].location, "");
        assert_eq!(books[0].notes, "");
        // порядок строк файла сохраняется
        assert_eq!(books[1].author, "Хаксли");
    }

    #[test]
    fn header_match_is_case_insensitive_and_trimmed() {
        let data = raw(&[&["  автор  ", "НАЗВАНИЕ"], &["Оруэлл", "1984"]]);
        let excel = ExcelData::from_raw(data, book_columns(), "b.xlsx".into()).unwrap();
        let books = excel.to_books();
        assert_eq!(books[0].author, "Оруэлл");
        assert_eq!(books[0].title, "1984");
    }

    #[test]
    fn batch_ids_are_unique() {
        let data = raw(&[
            &["Автор", "Название"],
            &["a", "1"],
            &["b", "2"],
            &["c", "3"],
        ]);
        let excel = ExcelData::from_raw(data, book_columns(), "b.xlsx".into()).unwrap();
        let books = excel.to_books();
        let mut ids: Vec<_> = books.iter().map(|b| b.id).collect();
        ids.sort_by_key(|id| id.value());
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn skips_fully_empty_rows() {
        let data = raw(&[
            &["Автор", "Название"],
            &["", ""],
            &["Оруэлл", "1984"],
            &["", ""],
        ]);
        let excel = ExcelData::from_raw(data, book_columns(), "b.xlsx".into()).unwrap();
        assert_eq!(excel.metadata.row_count, 1);
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(ExcelData::from_raw(Vec::new(), book_columns(), "b.xlsx".into()).is_err());
    }

    #[test]
    fn header_only_file_yields_no_rows() {
        let data = raw(&[&["Автор", "Название"]]);
        let excel = ExcelData::from_raw(data, book_columns(), "b.xlsx".into()).unwrap();
        assert_eq!(excel.metadata.row_count, 0);
        assert!(excel.to_books().is_empty());
    }

    #[test]
    fn unmapped_columns_are_reported() {
        let data = raw(&[&["Автор", "Название"], &["Оруэлл", "1984"]]);
        let excel = ExcelData::from_raw(data, book_columns(), "b.xlsx".into()).unwrap();
        assert!(!excel.has_all_columns_mapped());
        // из семи канонических колонок в файле есть только две
        assert_eq!(excel.unmapped_count(), 5);
    }
}
