//! The line-oriented command loop.

use std::borrow::Cow;
use std::io::{self, BufRead, Write};

use crate::commands::{self, import::MISSING_PATH, Command, Session};

/// Read commands from `input` until `quit` or end of input.
///
/// Command failures are logged by the commands themselves; only a failure
/// to read input or write output ends the loop early.
pub fn run<R: BufRead, W: Write>(mut input: R, out: &mut W, session: &Session<'_>) -> io::Result<()> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            log::debug!("End of input");
            break;
        }

        let line = decode_line(&buf);
        let command = Command::parse(&line);
        log::trace!("Dispatching {:?}", command);

        match command {
            Command::Quit => break,
            Command::Help => commands::show_help(out)?,
            Command::ListBooks => commands::list_books(&session.catalog, out)?,
            Command::ImportFromDatabase => commands::import_from_database(&session.catalog, out)?,
            Command::ImportFile(path) => commands::import_file(&session.catalog, path, out)?,
            Command::MissingPath => writeln!(out, "{}", MISSING_PATH)?,
            Command::SeedBooks => commands::seed_books(&session.catalog, session.seed, out)?,
            Command::Echo(text) => writeln!(out, "{}", text)?,
        }
        out.flush()?;
    }

    Ok(())
}

/// Strip the line terminator; invalid UTF-8 is replaced rather than fatal.
fn decode_line(buf: &[u8]) -> Cow<'_, str> {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfmark_core::seed::builtin_books;
    use shelfmark_core::{Book, Catalog, Config};
    use std::io::Cursor;

    const HELP: &str = "help\nquit\nlistBooks\nimportBooks\nimportBooks <FILE_PATH>\nseedBooks\n";

    fn test_config(dir: &tempfile::TempDir) -> Config {
        Config::default().with_database_path(dir.path().join("repl.db"))
    }

    fn run_script(config: &Config, seed: &[Book], script: &str) -> String {
        let session = Session {
            catalog: Catalog::new(config),
            seed,
        };
        let mut out = Vec::new();
        run(Cursor::new(script.as_bytes()), &mut out, &session).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_help_list_quit_on_empty_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        let output = run_script(&config, &builtin_books(), "help\nlistBooks\nquit\n");

        assert_eq!(output, HELP);
    }

    #[test]
    fn test_unknown_input_is_echoed() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        let output = run_script(&config, &[], "hello world\r\n\nquit\n");

        assert_eq!(output, "hello world\n\n");
    }

    #[test]
    fn test_quit_stops_reading() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        let output = run_script(&config, &[], "before\nquit\nafter\n");

        assert_eq!(output, "before\n");
    }

    #[test]
    fn test_end_of_input_without_quit() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        let output = run_script(&config, &[], "last line without newline");

        assert_eq!(output, "last line without newline\n");
    }

    #[test]
    fn test_import_missing_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        let output = run_script(&config, &[], "importBooks /nonexistent/path\nquit\n");

        assert_eq!(output, "No books found in file or error reading file.\n");
        assert_eq!(Catalog::new(&config).count().unwrap(), 0);
    }

    #[test]
    fn test_import_without_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        let output = run_script(&config, &[], "importBooks   \n");

        assert_eq!(
            output,
            "Please provide a file path. Usage: importBooks <FILE_PATH>\n"
        );
    }

    #[test]
    fn test_import_file_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let tsv = dir.path().join("books.tsv");
        std::fs::write(
            &tsv,
            "id\tisbn\ttitle\tauthors\tpublication_year\n\
             2\t978-2\tTitle B\tAuthor B\t2021\n\
             1\t978-1\tTitle A\tAuthor A\t2020\n",
        )
        .unwrap();

        let script = format!("importBooks {}\nlistBooks\nimportBooks\nquit\n", tsv.display());
        let output = run_script(&config, &[], &script);

        assert_eq!(
            output,
            "Successfully imported 2 books.\nTitle A\nTitle B\nTitle A\nTitle B\n"
        );
    }

    #[test]
    fn test_seed_books() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        let output = run_script(&config, &builtin_books(), "seedBooks\nlistBooks\nquit\n");

        assert_eq!(
            output,
            "Successfully imported 2 books.\nJava ist auch eine Insel\nGrundkurs Java\n"
        );
    }

    #[test]
    fn test_seed_books_without_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        let output = run_script(&config, &[], "seedBooks\n");

        assert_eq!(output, "No seed books configured.\n");
    }

    #[test]
    fn test_database_failure_keeps_loop_running() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            Config::default().with_database_path(dir.path().join("no-such-dir").join("x.db"));

        let output = run_script(&config, &builtin_books(), "listBooks\nseedBooks\nstill here\nquit\n");

        assert_eq!(output, "still here\n");
    }

    #[test]
    fn test_decode_line_strips_terminators() {
        assert_eq!(decode_line(b"help\r\n"), "help");
        assert_eq!(decode_line(b"help\n"), "help");
        assert_eq!(decode_line(b"help"), "help");
    }
}
