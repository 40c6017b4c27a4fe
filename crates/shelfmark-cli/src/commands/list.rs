use std::io::{self, Write};

use shelfmark_core::{Book, Catalog};

/// Print the title of every book in the database.
pub fn list_books<W: Write>(catalog: &Catalog<'_>, out: &mut W) -> io::Result<()> {
    let books = catalog.fetch_all();
    log::debug!("Listing {} books", books.len());
    print_titles(&books, out)
}

pub(crate) fn print_titles<W: Write>(books: &[Book], out: &mut W) -> io::Result<()> {
    for book in books {
        writeln!(out, "{}", book.title())?;
    }
    Ok(())
}
