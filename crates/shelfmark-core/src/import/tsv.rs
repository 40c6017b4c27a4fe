//! Tab-separated book import.
//!
//! The expected layout is one header line followed by one book per line with
//! the columns `id`, `isbn`, `title`, `author` and `publication_year`. The
//! header is always skipped, whatever it contains. Data rows are tolerated
//! rather than rejected:
//!
//! - trailing empty fields do not count, so `1\ta\tb\tc\t` has four fields,
//! - rows with fewer than five fields are skipped without complaint,
//! - rows whose id or year is not an integer are logged and skipped,
//! - columns past the fifth are ignored,
//! - bytes that are not valid UTF-8 are replaced with `U+FFFD` and the row
//!   is kept.
//!
//! # Example
//!
//! ```
//! use shelfmark_core::import::parse_books;
//!
//! let data = "id\tisbn\ttitle\tauthor\tyear\n1\t978-1\tTitle A\tAuthor A\t2020\n";
//! let books = parse_books(data.as_bytes()).unwrap();
//! assert_eq!(books.len(), 1);
//! assert_eq!(books[0].title(), "Title A");
//! ```

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::ParseIntError;
use std::path::Path;

use crate::error::Result;
use crate::model::Book;

const FIELD_SEPARATOR: char = '\t';
const MIN_FIELDS: usize = 5;

/// Parse books from any buffered reader.
///
/// Only I/O failures are errors; malformed rows are skipped.
pub fn parse_books<R: BufRead>(mut reader: R) -> Result<Vec<Book>> {
    let mut books = Vec::new();
    let mut buf = Vec::new();
    let mut header = true;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if header {
            header = false;
            continue;
        }

        let line = decode_line(&buf);
        match parse_row(&line) {
            Some(Ok(book)) => books.push(book),
            Some(Err(e)) => log::error!("Error parsing line ({}): {}", e, line),
            None => log::debug!("Skipping short line: {}", line),
        }
    }

    Ok(books)
}

/// Read books from the TSV file at `path`.
///
/// Never fails: an unreadable file is logged and yields no books.
pub fn read_books_from_tsv(path: impl AsRef<Path>) -> Vec<Book> {
    let path = path.as_ref();

    let result = File::open(path)
        .map_err(Into::into)
        .and_then(|file| parse_books(BufReader::new(file)));

    match result {
        Ok(books) => {
            log::info!("Read {} books from {}", books.len(), path.display());
            books
        }
        Err(e) => {
            log::error!("Error reading file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Strip the line terminator and decode lossily.
fn decode_line(buf: &[u8]) -> Cow<'_, str> {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line)
}

/// `None` when the row has too few fields to be a book.
fn parse_row(line: &str) -> Option<std::result::Result<Book, ParseIntError>> {
    let mut fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    while fields.last() == Some(&"") {
        fields.pop();
    }
    if fields.len() < MIN_FIELDS {
        return None;
    }

    Some(parse_fields(&fields))
}

fn parse_fields(fields: &[&str]) -> std::result::Result<Book, ParseIntError> {
    let id: i64 = fields[0].trim().parse()?;
    let year: i32 = fields[4].trim().parse()?;

    Ok(Book::new(
        id,
        fields[1].trim(),
        fields[2].trim(),
        fields[3].trim(),
        year,
    ))
}
