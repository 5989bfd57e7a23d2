//! Configuration loading.
//!
//! Settings live in a `config.env` file of `KEY=VALUE` lines next to the
//! executable. The file is optional: a missing or unreadable file, and any
//! line that is not a `KEY=VALUE` pair, are ignored and defaults apply.
//!
//! ```text
//! # config.env
//! DB_PATH="/home/me/filing/index.sqlite"
//! ```
//!
//! The resolved [`Config`] is built once at process start and handed to
//! [`IndexStore::new`](crate::store::IndexStore::new).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// File name of the configuration file looked up next to the executable.
pub const CONFIG_FILE_NAME: &str = "config.env";

/// File name of the default index database.
pub const DEFAULT_DB_FILE_NAME: &str = "index.sqlite";

/// Key that overrides the database location.
const DB_PATH_KEY: &str = "DB_PATH";

#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbConfig,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

impl Config {
    /// Configuration pointing at an explicit database file.
    pub fn with_db_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db: DbConfig { path: path.into() },
        }
    }
}

/// Directory holding the running executable.
///
/// Falls back to the current directory if the executable path cannot be
/// determined.
pub fn program_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default location of `config.env`.
pub fn default_config_path() -> PathBuf {
    program_dir().join(CONFIG_FILE_NAME)
}

/// Load configuration from `path`, applying defaults for anything unset.
///
/// The default database lives next to the executable, not next to the
/// config file, so a `--config` override elsewhere still shares the same
/// index unless it sets `DB_PATH`.
pub fn load_config(path: &Path) -> Config {
    let default_db = program_dir().join(DEFAULT_DB_FILE_NAME);

    let content = match read_config_file(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("no usable config at {}: {:#}", path.display(), e);
            return Config::with_db_path(default_db);
        }
    };

    let mut db_path = None;
    for (key, value) in parse_env(&content) {
        match key.as_str() {
            DB_PATH_KEY => db_path = Some(PathBuf::from(value)),
            other => tracing::debug!("ignoring unknown config key {}", other),
        }
    }

    Config::with_db_path(db_path.unwrap_or(default_db))
}

fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))
}

/// Parse `KEY=VALUE` lines.
///
/// Blank lines, `#` comments and lines without `=` are skipped. Keys and
/// values are trimmed, then surrounding double quotes and single quotes are
/// stripped from the value. Later duplicates win when collected by the
/// caller.
pub fn parse_env(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_env_skips_noise() {
        let content = "\n# comment\nnot a pair\n  DB_PATH = /tmp/x.sqlite  \n";
        let pairs = parse_env(content);
        assert_eq!(
            pairs,
            vec![("DB_PATH".to_string(), "/tmp/x.sqlite".to_string())]
        );
    }

    #[test]
    fn test_parse_env_strips_quotes() {
        let pairs = parse_env("A=\"double\"\nB='single'\nC=\"'both'\"\n");
        assert_eq!(pairs[0].1, "double");
        assert_eq!(pairs[1].1, "single");
        assert_eq!(pairs[2].1, "both");
    }

    #[test]
    fn test_parse_env_keeps_equals_in_value() {
        let pairs = parse_env("DB_PATH=/data/a=b.sqlite");
        assert_eq!(pairs[0].1, "/data/a=b.sqlite");
    }

    #[test]
    fn test_load_config_reads_db_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "OTHER=1\nDB_PATH='/srv/filing/index.sqlite'\n").unwrap();

        let cfg = load_config(&path);
        assert_eq!(cfg.db.path, PathBuf::from("/srv/filing/index.sqlite"));
    }

    #[test]
    fn test_load_config_missing_file_uses_default() {
        let tmp = TempDir::new().unwrap();
        let cfg = load_config(&tmp.path().join("absent.env"));
        assert_eq!(cfg.db.path, program_dir().join(DEFAULT_DB_FILE_NAME));
    }

    #[test]
    fn test_load_config_without_db_path_uses_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "# nothing useful\n").unwrap();

        let cfg = load_config(&path);
        assert_eq!(cfg.db.path, program_dir().join(DEFAULT_DB_FILE_NAME));
    }
}
