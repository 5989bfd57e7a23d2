//! SQLite connection management.
//!
//! Every store operation opens its own connection, runs, and closes it.
//! There is no pool and no busy retry.
//!
//! The journal mode is left as the file has it. Readers open the file
//! read-only.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;
use std::path::Path;
use std::str::FromStr;

use crate::config::Config;

fn options_for(db_path: &Path) -> Result<SqliteConnectOptions> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?;
    Ok(options)
}

/// Open a connection, creating the database file and its parent
/// directories if they don't exist.
pub async fn connect(config: &Config) -> Result<SqliteConnection> {
    let db_path = &config.db.path;

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }
    }

    let conn = options_for(db_path)?
        .create_if_missing(true)
        .connect()
        .await
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

    Ok(conn)
}

/// Open a read-only connection if the database file already exists.
///
/// Returns `Ok(None)` when there is no file, without creating one.
pub async fn connect_existing(config: &Config) -> Result<Option<SqliteConnection>> {
    let db_path = &config.db.path;

    if !db_path.exists() {
        tracing::debug!("no index at {}", db_path.display());
        return Ok(None);
    }

    let conn = options_for(db_path)?
        .create_if_missing(false)
        .read_only(true)
        .connect()
        .await
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

    Ok(Some(conn))
}
