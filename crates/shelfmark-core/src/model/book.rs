use serde::{Deserialize, Serialize};

use crate::model::ids::BookId;

/// A single catalog entry.
///
/// Books are value objects: once built, from an import row, a database row
/// or the seed dataset, they are never changed. Fields are only reachable
/// through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    isbn: String,
    title: String,
    author: String,

    /// Year of publication (`publication_year` in the database).
    year: i32,
}

impl Book {
    #[must_use]
    pub fn new(
        id: impl Into<BookId>,
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            id: id.into(),
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            year,
        }
    }

    #[must_use]
    pub const fn id(&self) -> BookId {
        self.id
    }

    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }
}
