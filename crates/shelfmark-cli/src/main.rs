use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};

use shelfmark_core::{seed, Catalog, Config};

mod commands;
mod repl;

use commands::Session;

#[derive(Debug, Parser)]
#[command(name = "shelfmark", version, about)]
struct Cli {
    /// Configuration file (default: ./shelfmark.toml, then ~/.config/shelfmark/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the database (default: ~/.local/share/shelfmark/localdb.db)
    #[arg(long)]
    db: Option<PathBuf>,
}

fn setup_logging(config: &Config) {
    if let Err(e) = twyg::setup(config.logging.clone()) {
        eprintln!("Could not set up logging: {:?}", e);
    }
}

/// Create the directory that will hold the database file.
fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, load_error) = match Config::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let config = match cli.db {
        Some(db) => config.with_database_path(db),
        None => config,
    };

    setup_logging(&config);
    if let Some(e) = load_error {
        log::error!("Error loading configuration: {}; using defaults", e);
    }

    ensure_db_dir(&config.database_path)?;

    let seed = seed::resolve(&config);
    let session = Session {
        catalog: Catalog::new(&config),
        seed: &seed,
    };

    log::info!("Using database {}", config.database_path.display());
    repl::run(io::stdin().lock(), &mut io::stdout(), &session)?;

    Ok(())
}
