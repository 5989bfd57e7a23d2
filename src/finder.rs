//! Search/browse session behind the finder front-end.
//!
//! [`FinderSession`] holds everything a finder window shows: the query, the
//! result rows, the status line, the selection and the detail pane. It
//! knows nothing about widgets; a front-end feeds it input events and
//! renders its state afterwards.
//!
//! ```text
//!   start / clear ──▶ Listing ──set_query──▶ Searching
//!                        │                      │
//!                        └──────select(i)───────┤
//!                                               ▼
//!                                           Selected ──open_*──▶ opener
//! ```
//!
//! Every query change is a full re-query against the store, run to
//! completion before the next input is handled.

use anyhow::Result;
use std::path::Path;

use crate::models::{Listing, Record};
use crate::opener::{self, OpenOutcome, Opener};
use crate::store::IndexStore;

pub struct FinderSession<O: Opener> {
    store: IndexStore,
    opener: O,
    query: String,
    results: Vec<Record>,
    status: String,
    selected: Option<usize>,
}

impl<O: Opener> FinderSession<O> {
    /// Create a session and show the full listing.
    pub async fn start(store: IndexStore, opener: O) -> Result<Self> {
        let mut session = Self {
            store,
            opener,
            query: String::new(),
            results: Vec::new(),
            status: String::new(),
            selected: None,
        };
        session.refresh().await?;
        Ok(session)
    }

    /// Replace the query text and re-run it. Called on every keystroke.
    pub async fn set_query(&mut self, query: &str) -> Result<()> {
        self.query = query.to_string();
        self.refresh().await
    }

    /// Re-run the current query (explicit submit).
    pub async fn submit(&mut self) -> Result<()> {
        self.refresh().await
    }

    /// Empty the query, returning to the full listing.
    pub async fn clear(&mut self) -> Result<()> {
        self.set_query("").await
    }

    async fn refresh(&mut self) -> Result<()> {
        let listing = self.store.search(&self.query).await?;
        if listing == Listing::NoIndex {
            tracing::debug!("finder: no index yet");
        }
        self.results = listing.into_records();
        self.status = status_line(&self.query, self.results.len());
        self.selected = None;
        Ok(())
    }

    /// Select result row `index`. Out-of-range rows are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.results.len() {
            self.selected = Some(index);
        }
    }

    /// Open the selected record's file. `None` when nothing is selected.
    pub fn open_selected(&self) -> Result<Option<OpenOutcome>> {
        match self.selected_record() {
            Some(record) => opener::open_file(&self.opener, Path::new(&record.file_path)).map(Some),
            None => Ok(None),
        }
    }

    /// Open the folder holding the selected record's file.
    pub fn open_selected_folder(&self) -> Result<Option<OpenOutcome>> {
        match self.selected_record() {
            Some(record) => {
                opener::open_folder(&self.opener, Path::new(&record.file_path)).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Double-click: select row `index` and open it.
    pub fn activate(&mut self, index: usize) -> Result<Option<OpenOutcome>> {
        self.select(index);
        if self.selected != Some(index) {
            return Ok(None);
        }
        self.open_selected()
    }

    /// Select row `index` and open its folder. Out-of-range rows open
    /// nothing and keep the current selection.
    pub fn activate_folder(&mut self, index: usize) -> Result<Option<OpenOutcome>> {
        self.select(index);
        if self.selected != Some(index) {
            return Ok(None);
        }
        self.open_selected_folder()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Record] {
        &self.results
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.selected.and_then(|i| self.results.get(i))
    }

    /// Open file / open folder are only enabled with a selection.
    pub fn actions_enabled(&self) -> bool {
        self.selected.is_some()
    }

    /// Text of the read-only detail pane, empty without a selection.
    pub fn detail(&self) -> String {
        self.selected_record().map(detail_text).unwrap_or_default()
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }
}

/// Status line under the search bar.
pub fn status_line(query: &str, count: usize) -> String {
    if query.trim().is_empty() {
        format!("{} files indexed", count)
    } else {
        format!(
            "{} result{} for \"{}\"",
            count,
            if count == 1 { "" } else { "s" },
            query
        )
    }
}

/// Detail pane text for one record.
pub fn detail_text(record: &Record) -> String {
    format!(
        "Path: {}\nOriginal name: {}\nFiled: {}  |  Created: {}\n\n{}",
        record.file_path,
        record.original_name.as_deref().unwrap_or(""),
        non_empty_or_na(record.date_filed.as_deref()),
        non_empty_or_na(record.date_created.as_deref()),
        record.summary.as_deref().unwrap_or(""),
    )
}

fn non_empty_or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "N/A",
    }
}
