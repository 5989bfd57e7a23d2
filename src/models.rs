//! Core data types shared by the store, the CLI and the finder.

use serde::Serialize;

/// Provenance tag used when the filing process doesn't supply one.
pub const DEFAULT_SOURCE: &str = "desktop";

/// One indexed file, as stored in the `files` table.
///
/// Serializes with the column names as field names; this is the shape
/// `clerk dump` emits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: i64,
    pub file_path: String,
    pub original_name: Option<String>,
    pub filed_name: Option<String>,
    pub folder: Option<String>,
    pub file_type: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<String>,
    pub date_created: Option<String>,
    pub date_filed: Option<String>,
    pub source: Option<String>,
}

/// Input to an upsert, as handed over by the filing process.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub file_path: String,
    pub original_name: String,
    pub filed_name: String,
    pub folder: String,
    pub file_type: String,
    pub summary: String,
    pub tags: String,
    pub date_created: String,
    pub source: String,
}

/// Result of a read against the index.
///
/// `NoIndex` means the database file does not exist yet. Callers treat it
/// as zero records; it is kept distinct so the absence is visible rather
/// than folded into an empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    NoIndex,
    Records(Vec<Record>),
}

impl Listing {
    pub fn records(&self) -> &[Record] {
        match self {
            Listing::NoIndex => &[],
            Listing::Records(records) => records,
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        match self {
            Listing::NoIndex => Vec::new(),
            Listing::Records(records) => records,
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}
