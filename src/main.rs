//! # File Clerk index manager (`clerk`)
//!
//! Maintains the SQLite index that the finder searches. The filing process
//! calls `clerk add` once per document it files.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `clerk init` | Create the index schema if absent |
//! | `clerk add <path> <original> <filed> <folder> <type> <summary> <tags> <created> [source]` | Add or refresh one record |
//! | `clerk search "<query>"` | Print matching paths, tags and summaries |
//! | `clerk list` | Print every record's path and tags |
//! | `clerk dump` | Print the whole index as JSON |
//!
//! Usage errors and unknown commands exit with status 1.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use file_clerk::config;
use file_clerk::logging;
use file_clerk::models::{NewRecord, Record, DEFAULT_SOURCE};
use file_clerk::store::IndexStore;

/// File Clerk index manager.
///
/// Reads `config.env` next to the executable unless `--config` points
/// elsewhere. The only recognized key is `DB_PATH`.
#[derive(Parser)]
#[command(
    name = "clerk",
    about = "Manage the File Clerk metadata index of filed documents",
    version
)]
struct Cli {
    /// Path to a `config.env` file (KEY=VALUE lines).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the index database and schema. Safe to run repeatedly.
    Init,

    /// Add a filed document, or refresh summary, tags and filed date if
    /// its path is already indexed.
    Add {
        /// Full path of the filed document (unique key).
        file_path: String,
        /// Name the document had before filing.
        original_name: String,
        /// Name it was filed under.
        filed_name: String,
        /// Destination folder.
        folder: String,
        /// File type, e.g. `pdf`.
        file_type: String,
        /// Free-text summary.
        summary: String,
        /// Free-text tags, space separated.
        tags: String,
        /// Creation date of the document.
        date_created: String,
        /// Provenance tag.
        #[arg(default_value = DEFAULT_SOURCE)]
        source: String,
    },

    /// Full-text search over paths, filed names, summaries and tags.
    ///
    /// Every word must match the start of an indexed word.
    Search {
        /// The search query.
        query: String,
    },

    /// List every record, most recently filed first.
    List,

    /// Print the whole index as a JSON array.
    Dump,
}

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version go to stdout and succeed.
            if !e.use_stderr() {
                e.exit();
            }
            let _ = e.print();
            std::process::exit(1);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = parse_cli();

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let cfg = config::load_config(&config_path);
    tracing::debug!("using index {}", cfg.db.path.display());
    let store = IndexStore::new(cfg);

    match cli.command {
        Commands::Init => {
            store.initialize().await?;
            println!("Database initialized.");
        }
        Commands::Add {
            file_path,
            original_name,
            filed_name,
            folder,
            file_type,
            summary,
            tags,
            date_created,
            source,
        } => {
            let record = NewRecord {
                file_path,
                original_name,
                filed_name,
                folder,
                file_type,
                summary,
                tags,
                date_created,
                source,
            };
            store.upsert(&record).await?;
            println!("Indexed: {}", record.file_path);
        }
        Commands::Search { query } => {
            let listing = store.search(&query).await?;
            if listing.is_empty() {
                println!("No results found.");
            }
            for record in listing.records() {
                print_record(record, true);
            }
        }
        Commands::List => {
            for record in store.list_all().await?.records() {
                print_record(record, false);
            }
        }
        Commands::Dump => {
            println!("{}", store.dump_json().await?);
        }
    }

    Ok(())
}

fn print_record(record: &Record, with_summary: bool) {
    println!("  {}", record.file_path);
    println!("    Tags: {}", record.tags.as_deref().unwrap_or(""));
    if with_summary {
        println!("    Summary: {}", record.summary.as_deref().unwrap_or(""));
    }
    println!();
}
