//! REPL commands.
//!
//! A line is matched exactly against the command names; anything that is
//! not a command is echoed back.

pub mod help;
pub mod import;
pub mod list;
pub mod seed;

use shelfmark_core::{Book, Catalog};

pub use help::show_help;
pub use import::{import_file, import_from_database};
pub use list::list_books;
pub use seed::seed_books;

const IMPORT_PREFIX: &str = "importBooks ";

/// Everything a command may touch, lent for the lifetime of the loop.
#[derive(Debug)]
pub struct Session<'a> {
    pub catalog: Catalog<'a>,
    pub seed: &'a [Book],
}

/// A parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    Quit,
    ListBooks,
    /// `importBooks` with no argument: print what the database holds.
    ImportFromDatabase,
    /// `importBooks <path>`, path already trimmed.
    ImportFile(&'a str),
    /// `importBooks ` followed only by whitespace.
    MissingPath,
    SeedBooks,
    Echo(&'a str),
}

impl<'a> Command<'a> {
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        match line {
            "quit" => Self::Quit,
            "help" => Self::Help,
            "listBooks" => Self::ListBooks,
            "importBooks" => Self::ImportFromDatabase,
            "seedBooks" => Self::SeedBooks,
            _ => match line.strip_prefix(IMPORT_PREFIX).map(str::trim) {
                Some("") => Self::MissingPath,
                Some(path) => Self::ImportFile(path),
                None => Self::Echo(line),
            },
        }
    }
}
