//! # File Clerk finder (`clerk-finder`)
//!
//! Terminal front-end for the search/browse session. Every line typed is
//! handled like a keystroke in a search box: the query is replaced and the
//! results re-listed.
//!
//! | Input | Effect |
//! |-------|--------|
//! | any text | search for it |
//! | empty line | clear the query, list everything |
//! | `:N` | select result N and show its details |
//! | `:open [N]` | open the selected (or Nth) file |
//! | `:folder [N]` | open the folder of the selected (or Nth) file |
//! | `:q`, `:quit`, EOF | exit |

use anyhow::Result;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use file_clerk::config;
use file_clerk::finder::FinderSession;
use file_clerk::logging;
use file_clerk::opener::{OpenOutcome, SystemOpener};
use file_clerk::store::IndexStore;

/// Search your indexed files and open them or their folders.
#[derive(Parser)]
#[command(name = "clerk-finder", version)]
struct Cli {
    /// Path to a `config.env` file (KEY=VALUE lines).
    #[arg(long)]
    config: Option<PathBuf>,
}

enum Input {
    Query(String),
    Select(usize),
    Open(Option<usize>),
    Folder(Option<usize>),
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Input::Query(line.trim_end_matches(['\r', '\n']).to_string());
    };

    let mut parts = command.split_whitespace();
    let head = parts.next().unwrap_or("");
    let index = parts.next().map(|n| n.parse::<usize>());

    match (head, index) {
        ("q" | "quit", None) => Input::Quit,
        ("open", None) => Input::Open(None),
        ("open", Some(Ok(n))) if n > 0 => Input::Open(Some(n - 1)),
        ("folder", None) => Input::Folder(None),
        ("folder", Some(Ok(n))) if n > 0 => Input::Folder(Some(n - 1)),
        (n, None) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Input::Select(n - 1),
            _ => Input::Invalid(command.to_string()),
        },
        _ => Input::Invalid(command.to_string()),
    }
}

fn render_results(session: &FinderSession<SystemOpener>) {
    println!("{}", session.status());
    if session.results().is_empty() {
        return;
    }
    println!(
        "  {:>3}  {:<32} {:<24} {:<6} {}",
        "#", "FILE NAME", "FOLDER", "TYPE", "TAGS"
    );
    for (i, r) in session.results().iter().enumerate() {
        println!(
            "  {:>3}  {:<32} {:<24} {:<6} {}",
            i + 1,
            truncate(r.filed_name.as_deref().unwrap_or(""), 32),
            truncate(r.folder.as_deref().unwrap_or(""), 24),
            truncate(r.file_type.as_deref().unwrap_or(""), 6),
            r.tags.as_deref().unwrap_or(""),
        );
    }
}

fn render_detail(session: &FinderSession<SystemOpener>) {
    if !session.actions_enabled() {
        return;
    }
    println!("--- Details ---");
    println!("{}", session.detail());
    println!("(:open to open the file, :folder to open its folder)");
}

fn report(outcome: Option<OpenOutcome>) {
    match outcome {
        Some(OpenOutcome::Launched(path)) => println!("Opened {}", path.display()),
        Some(OpenOutcome::Missing(path)) => {
            tracing::info!("{} no longer exists", path.display())
        }
        None => println!("Select a result first (:N)."),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let store = IndexStore::new(config::load_config(&config_path));

    let mut session = FinderSession::start(store, SystemOpener::new()).await?;
    render_results(&session);

    let interactive = atty::is(atty::Stream::Stdin);
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("search> ");
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse_input(&line) {
            Input::Quit => break,
            Input::Query(q) => {
                session.set_query(&q).await?;
                render_results(&session);
            }
            Input::Select(i) => {
                session.select(i);
                render_detail(&session);
            }
            Input::Open(i) => {
                let outcome = match i {
                    Some(i) => session.activate(i)?,
                    None => session.open_selected()?,
                };
                report(outcome);
            }
            Input::Folder(i) => {
                let outcome = match i {
                    Some(i) => session.activate_folder(i)?,
                    None => session.open_selected_folder()?,
                };
                report(outcome);
            }
            Input::Invalid(cmd) => println!("Unknown command: :{}", cmd),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        assert!(matches!(parse_input("invoice 2023"), Input::Query(q) if q == "invoice 2023"));
        assert!(matches!(parse_input(""), Input::Query(q) if q.is_empty()));
    }

    #[test]
    fn test_parse_commands() {
        assert!(matches!(parse_input(":3"), Input::Select(2)));
        assert!(matches!(parse_input(":open"), Input::Open(None)));
        assert!(matches!(parse_input(":open 2"), Input::Open(Some(1))));
        assert!(matches!(parse_input(":folder 1"), Input::Folder(Some(0))));
        assert!(matches!(parse_input(":q"), Input::Quit));
        assert!(matches!(parse_input(":0"), Input::Invalid(_)));
        assert!(matches!(parse_input(":open x"), Input::Invalid(_)));
        assert!(matches!(parse_input(":bogus"), Input::Invalid(_)));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
