//! Contact-Harvester main entry point
//!
//! This is the command-line interface for the Contact-Harvester crawler.

use anyhow::Context;
use clap::Parser;
use contact_harvester::config::{load_config_with_hash, load_default_config, Config};
use contact_harvester::crawler::Coordinator;
use contact_harvester::extract::{build_recognizer, EntityExtractor};
use contact_harvester::operator::{
    add_domains, prompt_and_query, query_prefix, Prompter, StreamPrompter, TerminalPrompter,
};
use contact_harvester::output::{load_statistics, print_statistics};
use contact_harvester::storage::open_storage;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Contact-Harvester: a seed-driven contact harvester
///
/// Crawls each registered seed domain and the same-origin pages it links to,
/// extracts emails, US phone numbers and person names, and stores them with
/// a recrawl cooldown.
#[derive(Parser, Debug)]
#[command(name = "contact-harvester")]
#[command(version)]
#[command(about = "A seed-driven contact harvester", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Interactively register seed domains and exit
    #[arg(long, conflicts_with_all = ["query", "stats"])]
    add_domains: bool,

    /// List stored records whose URL starts with PREFIX and exit
    /// (prompts for the prefix when omitted)
    #[arg(
        long,
        value_name = "PREFIX",
        num_args = 0..=1,
        default_missing_value = "",
        conflicts_with_all = ["add_domains", "stats"]
    )]
    query: Option<String>,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with_all = ["add_domains", "query"])]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(cli.config.as_ref())?;

    // Handle different modes
    if cli.add_domains {
        handle_add_domains(&config)?;
    } else if let Some(prefix) = cli.query.as_deref() {
        handle_query(&config, prefix)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("contact_harvester=info,warn"),
            1 => EnvFilter::new("contact_harvester=debug,info"),
            2 => EnvFilter::new("contact_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file when given, otherwise defaults plus environment
fn load_configuration(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            load_default_config().context("Invalid default configuration")
        }
    }
}

fn open_store(config: &Config) -> anyhow::Result<contact_harvester::SqliteStorage> {
    let location = if config.database.is_in_memory() {
        "in-memory store".to_string()
    } else {
        config.database.database_path().display().to_string()
    };
    tracing::debug!("Opening {}", location);

    open_storage(&config.database).with_context(|| format!("Failed to open {}", location))
}

/// Interactive prompts on a terminal, plain line reads when stdin is piped
fn operator_prompter() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() {
        Box::new(TerminalPrompter::default())
    } else {
        Box::new(StreamPrompter::new(io::stdin().lock(), io::stdout()))
    }
}

/// Handles the --add-domains mode
fn handle_add_domains(config: &Config) -> anyhow::Result<()> {
    let mut storage = open_store(config)?;

    let mut prompter = operator_prompter();
    let summary = add_domains(&mut storage, &mut *prompter)?;

    tracing::info!("Registered {} new seed domain(s)", summary.added.len());
    Ok(())
}

/// Handles the --query mode
fn handle_query(config: &Config, prefix: &str) -> anyhow::Result<()> {
    let storage = open_store(config)?;

    let matched = if prefix.is_empty() {
        let mut prompter = operator_prompter();
        prompt_and_query(&storage, &mut *prompter)?
    } else {
        query_prefix(&storage, prefix, io::stdout())?
    };

    tracing::debug!("Query matched {} record(s)", matched);
    Ok(())
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let storage = open_store(config)?;

    println!("Database: {}\n", config.database.database_path().display());

    let stats = load_statistics(&storage, config.crawler.cooldown_hours)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let storage = open_store(config)?;

    // Recognizer is loaded once and shared for the whole run
    let recognizer = build_recognizer(&config.ner, &config.user_agent)
        .context("Failed to initialize name recognizer")?;
    let extractor = EntityExtractor::new(recognizer);

    let mut coordinator = Coordinator::new(config, storage, extractor)?;

    match coordinator.run().await {
        Ok(report) => {
            tracing::debug!("Crawl report: {:?}", report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
