//! The index store: upsert, search, list and dump over the `files` table.
//!
//! [`IndexStore`] holds only its [`Config`]; each call opens a connection,
//! runs its statement, and closes the connection again.
//!
//! Reads never create the database. Against a path with no file they
//! return [`Listing::NoIndex`]. Every other database error propagates.

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};

use crate::config::Config;
use crate::db;
use crate::migrate;
use crate::models::{Listing, NewRecord, Record};
use crate::query;

/// Format of `date_filed`: local time with microseconds.
pub const FILED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

const SELECT_ALL_BY_FILED: &str = r#"
    SELECT id, file_path, original_name, filed_name, folder, file_type,
           summary, tags, date_created, date_filed, source
    FROM files
    ORDER BY date_filed DESC, id ASC
"#;

const SELECT_MATCHING: &str = r#"
    SELECT f.id, f.file_path, f.original_name, f.filed_name, f.folder, f.file_type,
           f.summary, f.tags, f.date_created, f.date_filed, f.source
    FROM files_fts
    JOIN files f ON f.id = files_fts.rowid
    WHERE files_fts MATCH ?
    ORDER BY files_fts.rank, f.id
"#;

#[derive(Debug, Clone)]
pub struct IndexStore {
    config: Config,
}

impl IndexStore {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create the schema if it is missing. Safe to repeat.
    pub async fn initialize(&self) -> Result<()> {
        migrate::run_migrations(&self.config).await
    }

    /// Insert `record`, or refresh summary, tags and filed date if its path
    /// is already indexed. The filed date is the current local time.
    pub async fn upsert(&self, record: &NewRecord) -> Result<()> {
        self.upsert_at(record, Local::now().naive_local()).await
    }

    /// Same as [`upsert`](Self::upsert) with an explicit filed date.
    ///
    /// On conflict only `summary`, `tags` and `date_filed` change; names,
    /// folder, type, created date and source keep their first values.
    pub async fn upsert_at(&self, record: &NewRecord, filed_at: NaiveDateTime) -> Result<()> {
        let mut conn = db::connect(&self.config).await?;
        // The filing process may call `add` before anyone ran `init`.
        migrate::ensure_schema(&mut conn).await?;

        sqlx::query(
            r#"
            INSERT INTO files (file_path, original_name, filed_name, folder, file_type,
                               summary, tags, date_created, date_filed, source)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(file_path) DO UPDATE SET
                summary = excluded.summary,
                tags = excluded.tags,
                date_filed = excluded.date_filed
            "#,
        )
        .bind(&record.file_path)
        .bind(&record.original_name)
        .bind(&record.filed_name)
        .bind(&record.folder)
        .bind(&record.file_type)
        .bind(&record.summary)
        .bind(&record.tags)
        .bind(&record.date_created)
        .bind(filed_at.format(FILED_AT_FORMAT).to_string())
        .bind(&record.source)
        .execute(&mut conn)
        .await?;

        conn.close().await?;
        tracing::debug!("upserted {}", record.file_path);
        Ok(())
    }

    /// Full-text search. A blank query lists everything instead.
    pub async fn search(&self, query: &str) -> Result<Listing> {
        if query::is_blank(query) {
            return self.list_all().await;
        }

        let Some(mut conn) = db::connect_existing(&self.config).await? else {
            return Ok(Listing::NoIndex);
        };

        let records = match query::build_match_expr(query) {
            Some(expr) => {
                tracing::debug!("fts match {:?}", expr);
                fetch_records(&mut conn, SELECT_MATCHING, Some(expr.as_str())).await?
            }
            None => Vec::new(),
        };

        conn.close().await?;
        Ok(Listing::Records(records))
    }

    /// Every record, most recently filed first.
    pub async fn list_all(&self) -> Result<Listing> {
        let Some(mut conn) = db::connect_existing(&self.config).await? else {
            return Ok(Listing::NoIndex);
        };

        let records = fetch_records(&mut conn, SELECT_ALL_BY_FILED, None).await?;
        conn.close().await?;
        Ok(Listing::Records(records))
    }

    /// The [`list_all`](Self::list_all) records as a pretty-printed JSON
    /// array. A missing index dumps as `[]`.
    pub async fn dump_json(&self) -> Result<String> {
        let records = self.list_all().await?.into_records();
        Ok(serde_json::to_string_pretty(&records)?)
    }
}

async fn fetch_records(
    conn: &mut SqliteConnection,
    sql: &str,
    match_expr: Option<&str>,
) -> Result<Vec<Record>> {
    let mut q = sqlx::query(sql);
    if let Some(expr) = match_expr {
        q = q.bind(expr);
    }
    let rows = q.fetch_all(&mut *conn).await?;
    Ok(rows.iter().map(record_from_row).collect())
}

fn record_from_row(row: &SqliteRow) -> Record {
    Record {
        id: row.get("id"),
        file_path: row.get("file_path"),
        original_name: row.get("original_name"),
        filed_name: row.get("filed_name"),
        folder: row.get("folder"),
        file_type: row.get("file_type"),
        summary: row.get("summary"),
        tags: row.get("tags"),
        date_created: row.get("date_created"),
        date_filed: row.get("date_filed"),
        source: row.get("source"),
    }
}
