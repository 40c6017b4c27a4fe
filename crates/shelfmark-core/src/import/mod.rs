//! Importers that turn external files into [`Book`](crate::Book) records.

pub mod tsv;

pub use tsv::{parse_books, read_books_from_tsv};
