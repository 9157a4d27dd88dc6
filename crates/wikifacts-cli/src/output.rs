//! Output formatting for the CLI.

use crate::cli::RecordKey;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use wikifacts_domain::{ArticleRecord, Fact, Keyword};
use wikifacts_extractor::{BatchReport, ExtractionMetadata};
use wikifacts_store::StoredArticle;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format one field of a record.
    pub fn format_field(&self, record: &ArticleRecord, key: RecordKey) -> Result<String> {
        match key {
            RecordKey::Facts => self.format_facts(&record.facts),
            RecordKey::Keywords => self.format_keywords(&record.keywords),
            RecordKey::Title => self.scalar(serde_json::json!(record.title), &record.title),
            RecordKey::Text => self.scalar(serde_json::json!(record.text), &record.text),
            RecordKey::SourceId => self.scalar(
                serde_json::json!(record.source_id),
                &record.source_id.to_string(),
            ),
        }
    }

    fn scalar(&self, json: serde_json::Value, plain: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json)?),
            OutputFormat::Table | OutputFormat::Quiet => Ok(plain.to_string()),
        }
    }

    /// Format facts as numbered lines.
    pub fn format_facts(&self, facts: &[Fact]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let facts: Vec<&str> = facts.iter().map(Fact::as_str).collect();
                Ok(serde_json::to_string_pretty(&facts)?)
            }
            OutputFormat::Quiet => Ok(facts
                .iter()
                .map(Fact::as_str)
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if facts.is_empty() {
                    return Ok(self.colorize("No facts found.", "yellow"));
                }
                Ok(facts
                    .iter()
                    .enumerate()
                    .map(|(i, fact)| {
                        format!("{}\t{}", self.colorize(&format!("{}::", i + 1), "yellow"), fact)
                    })
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }

    /// Format ranked keywords.
    pub fn format_keywords(&self, keywords: &[Keyword]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let pairs: Vec<(&str, f64)> =
                    keywords.iter().map(|k| (k.token.as_str(), k.score)).collect();
                Ok(serde_json::to_string_pretty(&pairs)?)
            }
            OutputFormat::Quiet => Ok(keywords
                .iter()
                .map(|k| k.token.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if keywords.is_empty() {
                    return Ok(self.colorize("No keywords found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Rank", "Keyword", "Score"]);
                for (i, keyword) in keywords.iter().enumerate() {
                    builder.push_record([
                        (i + 1).to_string(),
                        keyword.token.clone(),
                        format!("{:.4}", keyword.score),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format a whole record, as produced by `extract`.
    pub fn format_record(&self, record: &ArticleRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                Ok(serde_json::to_string_pretty(&StoredArticle::from(record.clone()))?)
            }
            OutputFormat::Quiet => self.format_facts(&record.facts),
            OutputFormat::Table => Ok(format!(
                "{}\n\n{}\n\n{}",
                self.colorize(&format!("{} ({})", record.title, record.source_id), "cyan"),
                self.format_keywords(&record.keywords)?,
                self.format_facts(&record.facts)?
            )),
        }
    }

    /// Format stored titles.
    pub fn format_titles(&self, titles: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(titles)?),
            OutputFormat::Quiet => Ok(titles.join("\n")),
            OutputFormat::Table => {
                if titles.is_empty() {
                    return Ok(self.colorize("No articles stored.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["#", "Title"]);
                for (i, title) in titles.iter().enumerate() {
                    builder.push_record([(i + 1).to_string(), title.clone()]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
        }
    }

    /// Format the outcome of one ingest.
    pub fn ingested(&self, metadata: &ExtractionMetadata) -> String {
        self.success(&format!(
            "Stored '{}': {} facts from {} keywords ({} ms)",
            metadata.title, metadata.facts, metadata.keywords_ranked, metadata.processing_time_ms
        ))
    }

    /// Format a batch report.
    pub fn format_batch(&self, report: &BatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let failed: Vec<serde_json::Value> = report
                    .failed
                    .iter()
                    .map(|f| serde_json::json!({ "locator": f.locator, "reason": f.reason }))
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "ingested": report.ingested,
                    "skipped": report.skipped,
                    "failed": failed,
                }))?)
            }
            OutputFormat::Quiet => Ok(report.ingested.join("\n")),
            OutputFormat::Table => {
                let mut out = self.success(&format!("Ingested {} article(s)", report.ingested.len()));
                if !report.skipped.is_empty() {
                    out.push('\n');
                    out.push_str(&self.info(&format!(
                        "{} already stored: {}",
                        report.skipped.len(),
                        report.skipped.join(", ")
                    )));
                }
                if !report.failed.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Locator", "Reason"]);
                    for failure in &report.failed {
                        builder.push_record([failure.locator.as_str(), failure.reason.as_str()]);
                    }
                    let mut table = builder.build();
                    table.with(Style::rounded());
                    out.push('\n');
                    out.push_str(&self.warning(&format!("{} failed:", report.failed.len())));
                    out.push('\n');
                    out.push_str(&table.to_string());
                }
                Ok(out)
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
