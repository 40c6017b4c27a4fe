use rusqlite::Connection;
use std::path::Path;

use crate::error::Result;
use crate::model::Book;

use super::migrations::MIGRATIONS;

const UPSERT_BOOK: &str = "INSERT INTO books (id, isbn, title, author, publication_year)
     VALUES (?1, ?2, ?3, ?4, ?5)
     ON CONFLICT (id) DO UPDATE SET
        isbn = excluded.isbn,
        title = excluded.title,
        author = excluded.author,
        publication_year = excluded.publication_year";

/// A database connection with the book queries.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection (for advanced queries).
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                self.conn.execute_batch(migration.sql)?;
                self.conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }
}

// Book queries
impl Database {
    /// List every book in the table, ordered by id.
    pub fn list_books(&self) -> Result<Vec<Book>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, isbn, title, author, publication_year
             FROM books
             ORDER BY id",
        )?;

        let books = stmt
            .query_map([], |row| Self::row_to_book(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(books)
    }

    /// Insert each book, or overwrite the non-key columns of the row that
    /// already carries its id.
    ///
    /// The whole batch runs in one transaction with a single prepared
    /// statement. If any row fails the transaction is rolled back on drop and
    /// nothing is written. Returns the number of books submitted.
    pub fn upsert_books(&mut self, books: &[Book]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(UPSERT_BOOK)?;
            for book in books {
                stmt.execute(rusqlite::params![
                    book.id().get(),
                    book.isbn(),
                    book.title(),
                    book.author(),
                    book.year(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(books.len())
    }

    /// Number of rows in the books table.
    pub fn count_books(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    // NULL text columns read as empty strings and a NULL year as 0.
    fn row_to_book(row: &rusqlite::Row) -> rusqlite::Result<Book> {
        let id: i64 = row.get(0)?;
        let isbn: Option<String> = row.get(1)?;
        let title: Option<String> = row.get(2)?;
        let author: Option<String> = row.get(3)?;
        let year: Option<i32> = row.get(4)?;

        Ok(Book::new(
            id,
            isbn.unwrap_or_default(),
            title.unwrap_or_default(),
            author.unwrap_or_default(),
            year.unwrap_or(0),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_books() -> Vec<Book> {
        vec![
            Book::new(1, "978-1", "Title A", "Author A", 2020),
            Book::new(2, "978-2", "Title B", "Author B", 2021),
        ]
    }

    #[test]
    fn test_database_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(db.count_books().unwrap(), 0);
    }

    #[test]
    fn test_migrations_applied_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.db");

        drop(Database::open(&path).unwrap());
        let db = Database::open(&path).unwrap();

        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_upsert_inserts_new_books() {
        let mut db = Database::open_in_memory().unwrap();

        let written = db.upsert_books(&sample_books()).unwrap();

        assert_eq!(written, 2);
        assert_eq!(db.count_books().unwrap(), 2);
        assert_eq!(db.list_books().unwrap(), sample_books());
    }

    #[test]
    fn test_upsert_overwrites_existing_row() {
        let mut db = Database::open_in_memory().unwrap();
        db.upsert_books(&sample_books()).unwrap();

        let revised = Book::new(1, "978-9", "Title A2", "Author Z", 1999);
        db.upsert_books(&[revised.clone()]).unwrap();

        assert_eq!(db.count_books().unwrap(), 2);
        let books = db.list_books().unwrap();
        assert_eq!(books[0], revised);
        assert_eq!(books[1], sample_books()[1]);
    }

    #[test]
    fn test_upsert_counts_only_new_ids() {
        let mut db = Database::open_in_memory().unwrap();
        db.upsert_books(&sample_books()).unwrap();

        db.upsert_books(&[
            Book::new(2, "978-2", "Title B", "Author B", 2021),
            Book::new(3, "978-3", "Title C", "Author C", 2022),
            Book::new(4, "978-4", "Title D", "Author D", 2023),
        ])
        .unwrap();

        assert_eq!(db.count_books().unwrap(), 4);
    }

    #[test]
    fn test_upsert_duplicate_ids_last_write_wins() {
        let mut db = Database::open_in_memory().unwrap();

        db.upsert_books(&[
            Book::new(5, "first", "First", "Someone", 2000),
            Book::new(5, "second", "Second", "Someone Else", 2001),
        ])
        .unwrap();

        let books = db.list_books().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title(), "Second");
        assert_eq!(books[0].isbn(), "second");
    }

    #[test]
    fn test_upsert_empty_batch() {
        let mut db = Database::open_in_memory().unwrap();
        assert_eq!(db.upsert_books(&[]).unwrap(), 0);
        assert_eq!(db.count_books().unwrap(), 0);
    }

    #[test]
    fn test_list_books_reads_null_columns() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute("INSERT INTO books (id, title) VALUES (9, 'Only a title')", [])
            .unwrap();

        let books = db.list_books().unwrap();
        assert_eq!(books, vec![Book::new(9, "", "Only a title", "", 0)]);
    }
}
