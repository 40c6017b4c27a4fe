use std::io::{self, Write};

use shelfmark_core::{Book, Catalog};

/// Upsert the seed dataset chosen at start-up.
pub fn seed_books<W: Write>(catalog: &Catalog<'_>, seed: &[Book], out: &mut W) -> io::Result<()> {
    if seed.is_empty() {
        writeln!(out, "No seed books configured.")?;
        return Ok(());
    }

    if let Ok(count) = catalog.save_books(seed) {
        writeln!(out, "Successfully imported {} books.", count)?;
    }
    Ok(())
}
