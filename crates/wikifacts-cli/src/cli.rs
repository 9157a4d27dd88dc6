//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wikifacts CLI - Extract and look up facts from Wikipedia articles.
#[derive(Debug, Parser)]
#[command(name = "wikifacts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "WIKIFACTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (bare values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch, extract and store articles
    Ingest(IngestArgs),

    /// Look up a stored article
    Lookup(LookupArgs),

    /// Harvest ranking pages and ingest every linked article
    Harvest(HarvestArgs),

    /// Run extraction on a local text file without storing
    Extract(ExtractArgs),

    /// List stored titles
    List,
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// Article locators (/wiki/Title, full URL or title)
    #[arg(required = true)]
    pub locators: Vec<String>,
}

/// Arguments for the lookup command.
#[derive(Debug, Parser)]
pub struct LookupArgs {
    /// Title, or a case-insensitive part of it
    pub title: String,

    /// Field of the record to print
    #[arg(short, long, value_enum, default_value = "facts")]
    pub key: RecordKey,

    /// Ingest the title when it is not stored yet
    #[arg(long)]
    pub fetch: bool,
}

/// Arguments for the harvest command.
#[derive(Debug, Parser)]
pub struct HarvestArgs {
    /// Ranking years to harvest (default: all configured)
    #[arg(short, long = "year")]
    pub years: Vec<u32>,

    /// Harvest again even when links are cached
    #[arg(long)]
    pub refresh: bool,

    /// Only refresh the link caches, do not ingest
    #[arg(long)]
    pub links_only: bool,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Plain-text file to extract from
    pub file: PathBuf,

    /// Title for the record (default: file stem)
    #[arg(short, long)]
    pub title: Option<String>,
}

/// Record field selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordKey {
    /// Numbered fact sentences
    Facts,
    /// Article title
    Title,
    /// Full article text
    Text,
    /// Ranked keywords with scores
    Keywords,
    /// Source page id
    SourceId,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["wikifacts"]).is_err());
    }

    #[test]
    fn test_ingest_command() {
        let cli = Cli::parse_from(["wikifacts", "ingest", "/wiki/Paris", "Rome"]);
        match cli.command {
            Command::Ingest(args) => assert_eq!(args.locators, vec!["/wiki/Paris", "Rome"]),
            _ => panic!("Expected Ingest command"),
        }
        assert!(Cli::try_parse_from(["wikifacts", "ingest"]).is_err());
    }

    #[test]
    fn test_lookup_defaults_to_facts() {
        let cli = Cli::parse_from(["wikifacts", "lookup", "paris"]);
        match cli.command {
            Command::Lookup(args) => {
                assert_eq!(args.title, "paris");
                assert_eq!(args.key, RecordKey::Facts);
                assert!(!args.fetch);
            }
            _ => panic!("Expected Lookup command"),
        }
    }

    #[test]
    fn test_lookup_key_and_fetch() {
        let cli = Cli::parse_from([
            "wikifacts", "lookup", "paris", "--key", "source-id", "--fetch", "-f", "json", "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Lookup(args) => {
                assert_eq!(args.key, RecordKey::SourceId);
                assert!(args.fetch);
            }
            _ => panic!("Expected Lookup command"),
        }
    }

    #[test]
    fn test_harvest_years() {
        let cli = Cli::parse_from(["wikifacts", "harvest", "--year", "2019", "-y", "2018", "--refresh"]);
        match cli.command {
            Command::Harvest(args) => {
                assert_eq!(args.years, vec![2019, 2018]);
                assert!(args.refresh);
                assert!(!args.links_only);
            }
            _ => panic!("Expected Harvest command"),
        }
    }

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from(["wikifacts", "extract", "paris.txt", "--title", "Paris"]);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.file, PathBuf::from("paris.txt"));
                assert_eq!(args.title.as_deref(), Some("Paris"));
            }
            _ => panic!("Expected Extract command"),
        }
    }
}
