//! Index schema.
//!
//! `files` is the record table. `files_fts` is an FTS5 external-content
//! projection over `file_path`, `filed_name`, `summary` and `tags`, kept in
//! step with `files` by three triggers. Nothing writes `files_fts` except
//! those triggers.

use anyhow::Result;
use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;

use crate::config::Config;
use crate::db;

/// Create the schema on a fresh connection and close it.
pub async fn run_migrations(config: &Config) -> Result<()> {
    let mut conn = db::connect(config).await?;
    ensure_schema(&mut conn).await?;
    conn.close().await?;
    tracing::info!("index schema ready at {}", config.db.path.display());
    Ok(())
}

/// Create any missing schema objects. Idempotent.
pub async fn ensure_schema(conn: &mut SqliteConnection) -> Result<()> {
    let mut tx = conn.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS files (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            file_path TEXT UNIQUE NOT NULL,
            original_name TEXT,
            filed_name TEXT,
            folder TEXT,
            file_type TEXT,
            summary TEXT,
            tags TEXT,
            date_created TEXT,
            date_filed TEXT,
            source TEXT DEFAULT 'desktop'
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    let fts_exists: bool = sqlx::query_scalar(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='files_fts'",
    )
    .fetch_one(&mut *tx)
    .await?;

    if !fts_exists {
        sqlx::query(
            r#"
            CREATE VIRTUAL TABLE files_fts USING fts5(
                file_path, filed_name, summary, tags,
                content='files',
                content_rowid='id'
            )
            "#,
        )
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query(
        r#"
        CREATE TRIGGER IF NOT EXISTS files_ai AFTER INSERT ON files BEGIN
            INSERT INTO files_fts(rowid, file_path, filed_name, summary, tags)
            VALUES (new.id, new.file_path, new.filed_name, new.summary, new.tags);
        END
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TRIGGER IF NOT EXISTS files_ad AFTER DELETE ON files BEGIN
            INSERT INTO files_fts(files_fts, rowid, file_path, filed_name, summary, tags)
            VALUES ('delete', old.id, old.file_path, old.filed_name, old.summary, old.tags);
        END
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TRIGGER IF NOT EXISTS files_au AFTER UPDATE ON files BEGIN
            INSERT INTO files_fts(files_fts, rowid, file_path, filed_name, summary, tags)
            VALUES ('delete', old.id, old.file_path, old.filed_name, old.summary, old.tags);
            INSERT INTO files_fts(rowid, file_path, filed_name, summary, tags)
            VALUES (new.id, new.file_path, new.filed_name, new.summary, new.tags);
        END
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_files_date_filed ON files(date_filed DESC)")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}
