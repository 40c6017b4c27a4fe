//! Per-operation access to the book table.
//!
//! A [`Catalog`] opens a fresh connection for every call and drops it before
//! returning, on success and on error alike. Nothing is held between
//! commands.

use crate::config::Config;
use crate::error::Result;
use crate::model::Book;
use crate::schema::Database;

/// Gateway between the command loop and the database.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    config: &'a Config,
}

impl<'a> Catalog<'a> {
    #[must_use]
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    fn connect(&self) -> Result<Database> {
        log::debug!(
            "Connecting to {} as {}",
            self.config.database_path.display(),
            self.config.user
        );
        Database::open(&self.config.database_path)
    }

    /// Fetch every book. Database failures are logged and produce an empty
    /// list.
    pub fn fetch_all(&self) -> Vec<Book> {
        match self.connect().and_then(|db| db.list_books()) {
            Ok(books) => books,
            Err(e) => {
                log::error!("Database error: {}", e);
                Vec::new()
            }
        }
    }

    /// Upsert `books` as one batch and return how many were written.
    ///
    /// Failures are logged here and returned to the caller.
    pub fn save_books(&self, books: &[Book]) -> Result<usize> {
        let result = self.connect().and_then(|mut db| db.upsert_books(books));
        match &result {
            Ok(count) => log::info!("Upserted {} books", count),
            Err(e) => log::error!("Database error while saving books: {}", e),
        }
        result
    }

    /// Number of books currently stored.
    pub fn count(&self) -> Result<usize> {
        self.connect()?.count_books()
    }
}
