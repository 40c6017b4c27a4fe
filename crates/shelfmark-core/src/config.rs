use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "shelfmark.toml";

/// Configuration for shelfmark.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SHELF_* prefix)
/// 3. Config file (./shelfmark.toml, else ~/.config/shelfmark/config.toml)
/// 4. Built-in defaults (lowest priority)
///
/// The value is built once in `main` and lent to whatever needs it.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the SQLite database holding the `books` table.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: SHELF_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/shelfmark/localdb.db
    pub database_path: PathBuf,

    /// Account name reported when connecting. SQLite has no accounts, so
    /// this is informational only.
    pub user: String,

    /// Kept for configuration compatibility; never logged.
    pub password: String,

    /// Optional TOML file with `[[books]]` entries used by `seedBooks`.
    pub seed_file: Option<PathBuf>,

    /// Logger options handed to twyg. Defaults to stderr so diagnostics
    /// never interleave with command output on stdout.
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            user: String::from("localuser"),
            password: String::new(),
            seed_file: None,
            logging: default_logging(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("seed_file", &self.seed_file)
            .field("logging", &self.logging)
            .finish()
    }
}

impl Config {
    /// Load configuration from a file and environment variables.
    ///
    /// With `path` set, that file must exist. Without it, the first of
    /// [`LOCAL_CONFIG_FILE`] and [`config_file_path`] that exists is used;
    /// if neither does, only the environment and defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file is missing or cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Some(path.to_path_buf()),
            None => find_config_file(),
        };

        let mut builder =
            Confygery::new().map_err(|e| config_error("failed to create config builder", &e))?;

        if let Some(config_path) = config_path {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| Error::Config(String::from("config path contains invalid UTF-8")))?;
            builder
                .add_file(path_str)
                .map_err(|e| config_error("failed to load config file", &e))?;
        }

        let env_opts = env::Options::with_top_level("shelf");
        builder
            .add_env(env_opts)
            .map_err(|e| config_error("failed to load environment variables", &e))?;

        let config: Self = builder
            .build()
            .map_err(|e| config_error("failed to build configuration", &e))?;

        Ok(config)
    }

    /// Replace the database path (used for the --db CLI flag).
    #[must_use]
    pub fn with_database_path(mut self, db_path: PathBuf) -> Self {
        self.database_path = db_path;
        self
    }
}

fn default_logging() -> twyg::Opts {
    twyg::OptsBuilder::new()
        .output(twyg::Output::Stderr)
        .build()
        .unwrap_or_default()
}

fn config_error(context: &str, error: &dyn fmt::Display) -> Error {
    Error::Config(format!("{context}: {error}"))
}

fn find_config_file() -> Option<PathBuf> {
    [PathBuf::from(LOCAL_CONFIG_FILE), config_file_path()]
        .into_iter()
        .find(|path| path.exists())
}

/// Get the default database path.
///
/// Returns: ~/.local/share/shelfmark/localdb.db (or platform equivalent)
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shelfmark")
        .join("localdb.db")
}

/// Get the user-level config file path.
///
/// Returns:
/// - Linux: ~/.config/shelfmark/config.toml
/// - macOS: ~/Library/Application Support/shelfmark/config.toml
/// - Windows: %APPDATA%\shelfmark\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shelfmark")
        .join("config.toml")
}
