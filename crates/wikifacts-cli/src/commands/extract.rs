//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use wikifacts_domain::Document;
use wikifacts_extractor::FactExtractor;

/// Execute the extract command.
///
/// Runs the pipeline on a local file and prints the record without storing it.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = fs::read_to_string(&args.file)?;
    let title = match args.title {
        Some(title) => title,
        None => args
            .file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| {
                CliError::InvalidInput(format!("No title for {}", args.file.display()))
            })?,
    };

    let extractor = FactExtractor::new(config.extraction.clone())?;
    let result = extractor.extract(Document::new(title, 0, text))?;

    println!("{}", formatter.format_record(&result.record)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::PARIS;
    use crate::config::OutputFormat;
    use wikifacts_extractor::ExtractorError;

    #[test]
    fn test_extract_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("paris.txt");
        fs::write(&file, PARIS).unwrap();

        let formatter = Formatter::new(OutputFormat::Json, false);
        let args = ExtractArgs { file, title: None };
        execute_extract(args, &Config::default(), &formatter).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = ExtractArgs {
            file: dir.path().join("absent.txt"),
            title: Some("Absent".to_string()),
        };
        let err = execute_extract(args, &Config::default(), &formatter).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("long.txt");
        fs::write(&file, PARIS).unwrap();

        let mut config = Config::default();
        config.extraction.max_text_length = 10;
        let formatter = Formatter::new(OutputFormat::Table, false);
        let err = execute_extract(ExtractArgs { file, title: None }, &config, &formatter)
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Extraction(ExtractorError::TextTooLong(..))
        ));
    }
}
