//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use wikifacts_extractor::ExtractorConfig;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database holding article records
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Directory mirroring every record as `<title>.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_dir: Option<PathBuf>,

    /// Directory of per-year harvested link lists
    #[serde(default = "default_urls_dir")]
    pub urls_dir: PathBuf,

    /// MediaWiki access
    #[serde(default)]
    pub wiki: WikiSettings,

    /// Ranking report page per year
    #[serde(default = "default_rankings")]
    pub rankings: BTreeMap<String, String>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Extraction tuning
    #[serde(default)]
    pub extraction: ExtractorConfig,
}

/// MediaWiki access settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiSettings {
    /// `api.php` endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the default config, database and caches.
    pub fn home_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".wikifacts"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("config.toml"))
    }

    /// Load configuration from the default path or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check the extraction settings and ranking years.
    pub fn validate(&self) -> Result<()> {
        self.extraction.validate().map_err(CliError::Config)?;
        for year in self.rankings.keys() {
            year.parse::<u32>()
                .map_err(|_| CliError::Config(format!("Ranking year '{}' is not a number", year)))?;
        }
        Ok(())
    }

    /// Ranking page URL for `year`.
    pub fn ranking_url(&self, year: u32) -> Result<&str> {
        self.rankings
            .get(&year.to_string())
            .map(String::as_str)
            .ok_or_else(|| CliError::Config(format!("No ranking page configured for {}", year)))
    }

    /// All configured ranking years, ascending.
    pub fn ranking_years(&self) -> Vec<u32> {
        let mut years: Vec<u32> = self.rankings.keys().filter_map(|y| y.parse().ok()).collect();
        years.sort_unstable();
        years
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            pages_dir: None,
            urls_dir: default_urls_dir(),
            wiki: WikiSettings::default(),
            rankings: default_rankings(),
            settings: Settings::default(),
            extraction: ExtractorConfig::default(),
        }
    }
}

impl Default for WikiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn data_dir() -> PathBuf {
    Config::home_dir().unwrap_or_else(|_| PathBuf::from(".wikifacts"))
}

fn default_database() -> PathBuf {
    data_dir().join("wikifacts.db")
}

fn default_urls_dir() -> PathBuf {
    data_dir().join("urls")
}

fn default_endpoint() -> String {
    wikifacts_wiki::mediawiki::DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    wikifacts_wiki::mediawiki::DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    wikifacts_wiki::mediawiki::DEFAULT_MAX_RETRIES
}

fn default_rankings() -> BTreeMap<String, String> {
    [2018, 2019]
        .into_iter()
        .map(|year| {
            (
                year.to_string(),
                format!("https://en.wikipedia.org/wiki/Wikipedia:{}_Top_50_Report", year),
            )
        })
        .collect()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
