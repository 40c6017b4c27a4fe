//! Core domain for shelfmark.
//!
//! This crate defines the immutable [`Book`] record, the SQLite schema and
//! gateway used to fetch and upsert books, the tab-separated importer, the
//! seed dataset and the configuration loaded at start-up.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod schema;
pub mod seed;

pub use catalog::Catalog;
pub use config::Config;
pub use error::{Error, Result};
pub use model::Book;
