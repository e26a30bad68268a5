use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::cli::output::{render_envelope, render_history, render_types};
use crate::config::{AppConfig, ExecutorMode};
use crate::dispatcher::QueryDispatcher;
use crate::executor::Executor;
use crate::history::FileStore;
use crate::models::SearchType;
use crate::registry::schema_for;
use crate::session::{SearchOutcome, SessionController};

#[derive(Parser)]
#[command(name = "deep-search")]
#[command(version)]
#[command(
    about = "Targeted searches across document hosts, open indexes, code hosts and device indexes",
    long_about = None
)]
pub struct Cli {
    /// Config file (defaults to <config dir>/deep-search/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the search history
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Query the real providers instead of the offline demo executor
    #[arg(long, global = true)]
    pub live: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a search and record it in history
    Search {
        /// Search type (see `deep-search types`)
        search_type: String,

        /// Search term; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,

        /// Search option as KEY=VALUE (repeatable)
        #[arg(short = 'o', long = "option", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        options: Vec<(String, String)>,

        /// Print the result envelope as JSON
        #[arg(long)]
        json: bool,
    },
    /// List search types and their options
    Types,
    /// Show recent searches, newest first
    History {
        #[arg(long)]
        json: bool,
    },
    /// Re-run a history entry with default options
    Replay {
        /// Position in `deep-search history`
        index: usize,

        #[arg(long)]
        json: bool,
    },
    /// Delete all search history
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Search { search_type, term, options, json }) => {
            let search_type: SearchType = search_type.parse()?;
            let options = schema_for(search_type).parse_pairs(options)?;
            let session = open_session(&cli)?;
            let outcome = session.search(search_type, &term.join(" "), &options).await?;
            print_outcome(outcome, *json)?;
        }
        Some(Commands::Types) => {
            print!("{}", render_types());
        }
        Some(Commands::History { json }) => {
            let session = open_session(&cli)?;
            let ledger = session.history();
            if *json {
                println!("{}", serde_json::to_string_pretty(&ledger)?);
            } else {
                print!("{}", render_history(&ledger));
            }
        }
        Some(Commands::Replay { index, json }) => {
            let session = open_session(&cli)?;
            let outcome = session.replay(*index).await?;
            print_outcome(outcome, *json)?;
        }
        Some(Commands::Clear { yes }) => {
            if !yes {
                bail!("refusing to clear search history without --yes");
            }
            let session = open_session(&cli)?;
            session.clear_history();
            println!("Search history cleared.");
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Apply flags on top of file and environment configuration.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load config")?;
    if cli.live {
        config.mode = ExecutorMode::Live;
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    config.validate()?;
    Ok(config)
}

fn open_session(cli: &Cli) -> Result<SessionController<Executor, FileStore>> {
    let config = load_config(cli)?;
    let executor = Executor::from_config(&config)?;
    let data_dir = config.data_dir()?;
    tracing::debug!(mode = ?config.mode, data_dir = %data_dir.display(), "opening session");
    Ok(SessionController::new(QueryDispatcher::with_executor(executor), FileStore::new(data_dir)))
}

fn print_outcome(outcome: SearchOutcome, json: bool) -> Result<()> {
    match outcome {
        SearchOutcome::Displayed(envelope) if json => {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        SearchOutcome::Displayed(envelope) => print!("{}", render_envelope(&envelope)),
        SearchOutcome::Dropped => eprintln!("Another search is already running."),
        SearchOutcome::Stale => eprintln!("Search was abandoned."),
    }
    Ok(())
}

fn parse_key_val(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) =
        raw.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing option name in {raw:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}
