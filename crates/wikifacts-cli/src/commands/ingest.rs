//! Ingest command implementation.

use crate::cli::IngestArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::store::ArchiveStore;
use wikifacts_domain::traits::DocumentProvider;
use wikifacts_extractor::Ingestor;
use wikifacts_wiki::WikiError;

/// Execute the ingest command.
///
/// A single locator fails the command on error; several are run as a batch
/// and failures are reported alongside the successes.
pub async fn execute_ingest<P>(
    args: IngestArgs,
    ingestor: &Ingestor<P, ArchiveStore>,
    formatter: &Formatter,
) -> Result<()>
where
    P: DocumentProvider<Error = WikiError>,
{
    if let [locator] = args.locators.as_slice() {
        let result = ingestor.ingest(locator).await?;
        println!("{}", formatter.ingested(&result.metadata));
        return Ok(());
    }

    let report = ingestor.ingest_all(&args.locators).await;
    println!("{}", formatter.format_batch(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ingestor, provider};
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use wikifacts_domain::traits::ArticleStore;

    #[tokio::test]
    async fn test_single_locator() {
        let ingestor = ingestor(provider());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let args = IngestArgs {
            locators: vec!["/wiki/Paris".to_string()],
        };
        execute_ingest(args, &ingestor, &formatter).await.unwrap();

        let titles = ingestor.store().lock().unwrap().list_titles().unwrap();
        assert_eq!(titles, vec!["Paris"]);
    }

    #[tokio::test]
    async fn test_single_locator_not_found() {
        let ingestor = ingestor(provider());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let args = IngestArgs {
            locators: vec!["/wiki/Atlantis".to_string()],
        };
        let err = execute_ingest(args, &ingestor, &formatter).await.unwrap_err();
        assert!(matches!(err, CliError::Wiki(WikiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_batch_keeps_going() {
        let ingestor = ingestor(provider());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let args = IngestArgs {
            locators: vec![
                "/wiki/Paris".to_string(),
                "/wiki/Atlantis".to_string(),
                "/wiki/Rome".to_string(),
            ],
        };
        execute_ingest(args, &ingestor, &formatter).await.unwrap();

        let titles = ingestor.store().lock().unwrap().list_titles().unwrap();
        assert_eq!(titles, vec!["Paris", "Rome"]);
    }
}
