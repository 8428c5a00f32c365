//! Контракты предметной области книжного каталога.
//!
//! Чистый crate без WASM-зависимостей: агрегат `Book`, контейнер
//! состояния `Catalog`, поиск/сортировка и маппинг импорта из Excel.

pub mod catalog;
pub mod domain;
