use std::io::{self, Write};

use shelfmark_core::import::read_books_from_tsv;
use shelfmark_core::Catalog;

use super::list::print_titles;

pub const NO_BOOKS_FOUND: &str = "No books found in file or error reading file.";
pub const MISSING_PATH: &str = "Please provide a file path. Usage: importBooks <FILE_PATH>";

/// Print the titles of the books already in the database.
pub fn import_from_database<W: Write>(catalog: &Catalog<'_>, out: &mut W) -> io::Result<()> {
    print_titles(&catalog.fetch_all(), out)
}

/// Read a TSV file and upsert its books.
///
/// Nothing is written to the database when the file yields no books.
pub fn import_file<W: Write>(catalog: &Catalog<'_>, path: &str, out: &mut W) -> io::Result<()> {
    log::info!("Importing books from {}", path);

    let books = read_books_from_tsv(path);
    if books.is_empty() {
        writeln!(out, "{}", NO_BOOKS_FOUND)?;
        return Ok(());
    }

    if let Ok(count) = catalog.save_books(&books) {
        writeln!(out, "Successfully imported {} books.", count)?;
    }
    Ok(())
}
