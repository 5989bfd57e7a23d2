//! # File Clerk
//!
//! Full-text lookup over a personal index of filed documents.
//!
//! An external filing process renames and moves documents, then records
//! each one (path, names, folder, type, summary, tags, dates) in a SQLite
//! index through `clerk add`. The finder searches that index and opens the
//! files or their folders.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  clerk add   ┌─────────────────────┐
//! │ Filing       │─────────────▶│  SQLite              │
//! │ process      │              │  files + files_fts   │
//! └──────────────┘              └──────────┬──────────┘
//!                                          │ search / list
//!                      ┌───────────────────┤
//!                      ▼                   ▼
//!                 ┌──────────┐      ┌──────────────┐
//!                 │  clerk   │      │ clerk-finder │──▶ open / xdg-open
//!                 │  (CLI)   │      │  (session)   │
//!                 └──────────┘      └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! clerk init
//! clerk add /docs/invoice_2023.pdf scan.pdf invoice_2023.pdf Finance pdf \
//!     "Q4 invoice" "invoice finance" 2023-12-01
//! clerk search inv
//! clerk dump > index.json
//! clerk-finder
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | `config.env` loading |
//! | [`db`] | Per-operation SQLite connections |
//! | [`logging`] | stderr tracing subscriber |
//! | [`migrate`] | Schema, FTS5 projection and sync triggers |
//! | [`models`] | Records and read outcomes |
//! | [`query`] | Query → FTS5 match expression |
//! | [`store`] | Upsert, search, list and JSON dump |
//! | [`opener`] | Opening files and folders |
//! | [`finder`] | Search/browse session state |

pub mod config;
pub mod db;
pub mod finder;
pub mod logging;
pub mod migrate;
pub mod models;
pub mod opener;
pub mod query;
pub mod store;
