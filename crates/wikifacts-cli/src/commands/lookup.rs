//! Lookup command implementation.

use crate::cli::LookupArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::store::ArchiveStore;
use wikifacts_domain::traits::DocumentProvider;
use wikifacts_extractor::Ingestor;
use wikifacts_wiki::WikiError;

/// Execute the lookup command.
///
/// A miss is an error unless `--fetch` was given, in which case the title is
/// ingested and then printed.
pub async fn execute_lookup<P>(
    args: LookupArgs,
    ingestor: &Ingestor<P, ArchiveStore>,
    formatter: &Formatter,
) -> Result<()>
where
    P: DocumentProvider<Error = WikiError>,
{
    let record = if args.fetch {
        ingestor.lookup_or_ingest(&args.title).await?
    } else {
        ingestor.lookup(&args.title)?.ok_or_else(|| {
            CliError::NotFound(format!("'{}' (use --fetch to ingest it)", args.title))
        })?
    };

    println!("{}", formatter.format_field(&record, args.key)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::RecordKey;
    use crate::commands::testing::{ingestor, provider};
    use crate::config::OutputFormat;
    use wikifacts_domain::Document;

    fn args(title: &str, fetch: bool) -> LookupArgs {
        LookupArgs {
            title: title.to_string(),
            key: RecordKey::Facts,
            fetch,
        }
    }

    #[tokio::test]
    async fn test_miss_without_fetch() {
        let provider = provider();
        let ingestor = ingestor(provider.clone());
        let formatter = Formatter::new(OutputFormat::Table, false);

        let err = execute_lookup(args("Paris", false), &ingestor, &formatter)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::NotFound(_)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_miss_with_fetch_ingests_once() {
        let provider = provider();
        let ingestor = ingestor(provider.clone());
        let formatter = Formatter::new(OutputFormat::Table, false);

        execute_lookup(args("Paris", true), &ingestor, &formatter).await.unwrap();
        assert_eq!(provider.call_count(), 1);

        // Now stored: a partial, differently-cased title hits without fetching
        execute_lookup(args("pari", true), &ingestor, &formatter).await.unwrap();
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_of_unknown_title_fails() {
        let ingestor = ingestor(provider());
        let formatter = Formatter::new(OutputFormat::Table, false);

        let err = execute_lookup(args("Atlantis", true), &ingestor, &formatter)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Wiki(WikiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_of_alias_returns_stored_article() {
        let text = "The United States is a country in North America.";
        let provider = provider()
            .with_document("/wiki/United_States", Document::new("United States", 3434750, text))
            .with_document("USA", Document::new("United States", 3434750, text));
        let ingestor = ingestor(provider);
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        ingestor.ingest("/wiki/United_States").await.unwrap();
        execute_lookup(args("USA", true), &ingestor, &formatter).await.unwrap();
    }
}
