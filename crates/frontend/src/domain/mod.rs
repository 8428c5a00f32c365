pub mod b001_book;
