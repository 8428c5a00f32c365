pub mod repository;
pub mod ui;
