use std::io::{self, Write};

const USAGE: &[&str] = &[
    "help",
    "quit",
    "listBooks",
    "importBooks",
    "importBooks <FILE_PATH>",
    "seedBooks",
];

/// Print the supported commands, one per line.
pub fn show_help<W: Write>(out: &mut W) -> io::Result<()> {
    for line in USAGE {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
