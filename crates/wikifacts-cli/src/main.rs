//! Wikifacts CLI - extract and look up facts from Wikipedia articles.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wikifacts_cli::commands;
use wikifacts_cli::{ArchiveStore, Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> wikifacts_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => {
            let path = Config::path()?;
            if path.exists() {
                Config::load_from(&path)?
            } else {
                let config = Config::default();
                config.save_to(&path).ok();
                config
            }
        }
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => {
            commands::execute_extract(args, &config, &formatter)?;
        }
        Command::List => {
            let store = ArchiveStore::open(&config)?;
            commands::execute_list(&store, &formatter)?;
        }
        cmd => {
            let ingestor = commands::build_ingestor(&config)?;
            match cmd {
                Command::Ingest(args) => {
                    commands::execute_ingest(args, &ingestor, &formatter).await?;
                }
                Command::Lookup(args) => {
                    commands::execute_lookup(args, &ingestor, &formatter).await?;
                }
                Command::Harvest(args) => {
                    commands::execute_harvest(args, &config, &ingestor, &formatter).await?;
                }
                Command::Extract(_) | Command::List => unreachable!(),
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
