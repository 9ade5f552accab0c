//! Terminal shell over `medpedia_core`.
//!
//! # Responsibility
//! - Open the self-seeded database, or import an external one.
//! - Print the filtered topic tree and single topic descriptions.
//! - Keep all behavior in core; this binary only wires arguments to calls.

use clap::{Parser, Subcommand};
use log::error;
use medpedia_core::service::description::paragraphs;
use medpedia_core::{
    apply_filter, default_log_level, init_logging, FilterOutcome, StoreError, TopicId, TopicNode,
    TopicStore, DEFAULT_DB_FILE_NAME,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "medpedia")]
#[command(version, about = "Browse the medical encyclopedia", long_about = None)]
struct Cli {
    /// Self-seeded database file, created with sample topics on first run.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Import an existing encyclopedia database instead of the seeded one.
    #[arg(long, global = true, conflicts_with = "db")]
    import: Option<PathBuf>,

    /// Directory for rolling log files; logging stays off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the topic tree, optionally filtered by a name substring.
    Tree { query: Option<String> },
    /// Print one topic with its description.
    Show { id: TopicId },
    /// Check core linkage.
    Ping,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(message) = init_logging(level, &absolute(log_dir)) {
            eprintln!("warning: logging disabled: {message}");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), StoreError> {
    if let Command::Ping = cli.command {
        println!("medpedia_core ping={}", medpedia_core::ping());
        println!("medpedia_core version={}", medpedia_core::core_version());
        return Ok(());
    }

    let mut store = open_store(cli)?;
    match &cli.command {
        Command::Tree { query } => {
            let forest = store.materialize_tree()?;
            let outcome = apply_filter(&forest, query.as_deref().unwrap_or_default());
            print_forest(&forest, &outcome, 0);
        }
        Command::Show { id } => match store.fetch_topic(*id)? {
            Some(topic) => {
                println!("{}", topic.name);
                println!();
                let parts = paragraphs(&topic.description);
                if parts.is_empty() {
                    println!("No description available.");
                }
                for paragraph in parts {
                    println!("{paragraph}");
                    println!();
                }
            }
            None => println!("No topic with id {id}."),
        },
        Command::Ping => {}
    }
    store.close();
    Ok(())
}

fn open_store(cli: &Cli) -> Result<TopicStore, StoreError> {
    if let Some(path) = cli.import.as_deref() {
        let mut store = TopicStore::disconnected();
        store.connect(path)?;
        return Ok(store);
    }
    let path = cli
        .db
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
    TopicStore::open(path)
}

fn print_forest(nodes: &[TopicNode], outcome: &FilterOutcome, depth: usize) {
    for node in nodes {
        let Some(state) = outcome.state(node.id()) else {
            continue;
        };
        if !state.visible {
            continue;
        }

        let marker = match (node.has_children(), state.expanded) {
            (false, _) => " ",
            (true, true) => "-",
            (true, false) => "+",
        };
        let highlight = if state.self_match && !outcome.is_empty_query() {
            " *"
        } else {
            ""
        };
        println!(
            "{}{} {} [{}]{}",
            "  ".repeat(depth),
            marker,
            node.name(),
            node.id(),
            highlight
        );

        if state.expanded {
            print_forest(&node.children, outcome, depth + 1);
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
