//! The default book dataset.
//!
//! The seed dataset is resolved once at start-up and handed to the command
//! loop, which can write it to the database with `seedBooks`. It comes from
//! the configured `seed_file` when that loads, and from [`builtin_books`]
//! otherwise.
//!
//! A seed file is TOML with one `[[books]]` table per book:
//!
//! ```toml
//! [[books]]
//! id = 1
//! isbn = "978-3-8362-9544-4"
//! title = "Java ist auch eine Insel"
//! author = "Christian Ullenboom"
//! year = 2023
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Book;

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    books: Vec<Book>,
}

/// The two books shipped with shelfmark.
#[must_use]
pub fn builtin_books() -> Vec<Book> {
    vec![
        Book::new(
            1,
            "978-3-8362-9544-4",
            "Java ist auch eine Insel",
            "Christian Ullenboom",
            2023,
        ),
        Book::new(
            2,
            "978-3-658-43573-8",
            "Grundkurs Java",
            "Dietmar Abts",
            2024,
        ),
    ]
}

/// Load a seed dataset from a TOML file.
pub fn load(path: &Path) -> Result<Vec<Book>> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    let seed: SeedFile = toml::from_str(&content).map_err(|e| {
        Error::InvalidData(format!(
            "failed to parse seed books from {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(seed.books)
}

/// Resolve the seed dataset for `config`, falling back to the built-in books.
#[must_use]
pub fn resolve(config: &Config) -> Vec<Book> {
    let Some(path) = config.seed_file.as_deref() else {
        return builtin_books();
    };

    match load(path) {
        Ok(books) => {
            log::info!("Loaded {} seed books from {}", books.len(), path.display());
            books
        }
        Err(e) => {
            log::error!("Error loading seed books: {}; using built-in books", e);
            builtin_books()
        }
    }
}
