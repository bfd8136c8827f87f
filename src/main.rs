mod commands;
mod draft;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quickagenda_core::{AgendaConfig, HttpEventStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quickagenda")]
#[command(about = "Plan a one-day agenda, publish it, and share the link")]
struct Cli {
    /// Log requests to the event API
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Event API base URL (overrides config)
    #[arg(long, global = true)]
    api: Option<String>,

    /// Origin used when building share links (overrides config)
    #[arg(long, global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a draft agenda from a TOML file
    Publish { draft: PathBuf },
    /// Show a published event
    Show { code: String },
    /// Move a session of a published event
    Retime {
        code: String,
        session: String,

        /// New start, as an hour ("13") or a time ("13:30")
        start: String,

        /// New end, as an hour ("15") or a time ("15:00")
        end: String,
    },
    /// Print the share link and calendar links for an event
    Link { code: String },
    /// Download the .ics file for an event
    Ics {
        code: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = AgendaConfig::load()?;
    if let Some(api) = cli.api {
        config.api_base = api;
    }
    if let Some(origin) = cli.origin {
        config.share_origin = Some(origin);
    }
    let store = HttpEventStore::from_config(&config)?;

    match cli.command {
        Commands::Publish { draft } => commands::publish::run(store, &config, &draft).await,
        Commands::Show { code } => commands::show::run(store, &config, &code).await,
        Commands::Retime {
            code,
            session,
            start,
            end,
        } => commands::retime::run(store, &config, &code, session, &start, &end).await,
        Commands::Link { code } => commands::link::run(store, &config, &code).await,
        Commands::Ics { code, output } => commands::ics::run(store, &code, output).await,
    }
}
