//! Harvest command implementation.

use crate::cli::HarvestArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::store::ArchiveStore;
use std::collections::HashSet;
use std::time::Duration;
use tracing::info;
use wikifacts_domain::traits::DocumentProvider;
use wikifacts_extractor::Ingestor;
use wikifacts_wiki::{RankingHarvester, UrlCache, WikiError};

/// Execute the harvest command.
///
/// Links come from the per-year cache unless `--refresh` is given or the year
/// has never been harvested. Every harvested year is written back to the cache.
pub async fn execute_harvest<P>(
    args: HarvestArgs,
    config: &Config,
    ingestor: &Ingestor<P, ArchiveStore>,
    formatter: &Formatter,
) -> Result<()>
where
    P: DocumentProvider<Error = WikiError>,
{
    let years = if args.years.is_empty() {
        config.ranking_years()
    } else {
        args.years
    };

    let links = collect_links(&years, args.refresh, config).await?;

    if args.links_only {
        println!(
            "{}",
            formatter.info(&format!(
                "Cached {} links for {} year(s) in {}",
                links.len(),
                years.len(),
                config.urls_dir.display()
            ))
        );
        return Ok(());
    }

    let report = ingestor.ingest_all(&links).await;
    println!("{}", formatter.format_batch(&report)?);
    Ok(())
}

/// Links for all `years`, first occurrence kept.
async fn collect_links(years: &[u32], refresh: bool, config: &Config) -> Result<Vec<String>> {
    let cache = UrlCache::open(&config.urls_dir)?;
    let harvester = RankingHarvester::new(Duration::from_secs(config.wiki.timeout_secs))?;
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for &year in years {
        let cached = if refresh { None } else { cache.load(year)? };
        let year_links = match cached {
            Some(cached) => {
                info!("Using {} cached links for {}", cached.len(), year);
                cached
            }
            None => {
                let url = config.ranking_url(year)?;
                let fresh = harvester.harvest(url).await?;
                cache.save(year, &fresh)?;
                fresh
            }
        };

        links.extend(year_links.into_iter().filter(|link| seen.insert(link.clone())));
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ingestor, provider};
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use wikifacts_domain::traits::ArticleStore;

    fn config(dir: &std::path::Path) -> Config {
        Config {
            urls_dir: dir.join("urls"),
            ..Config::default()
        }
    }

    fn seed(config: &Config, year: u32, links: &[&str]) {
        let cache = UrlCache::open(&config.urls_dir).unwrap();
        let links: Vec<String> = links.iter().map(|l| l.to_string()).collect();
        cache.save(year, &links).unwrap();
    }

    #[tokio::test]
    async fn test_cached_years_are_ingested_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        seed(&config, 2018, &["/wiki/Paris", "/wiki/Atlantis"]);
        seed(&config, 2019, &["/wiki/Rome", "/wiki/Paris"]);

        let provider = provider();
        let ingestor = ingestor(provider.clone());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let args = HarvestArgs {
            years: Vec::new(),
            refresh: false,
            links_only: false,
        };
        execute_harvest(args, &config, &ingestor, &formatter).await.unwrap();

        // Paris appears in both years but is fetched once
        assert_eq!(provider.call_count(), 3);
        let titles = ingestor.store().lock().unwrap().list_titles().unwrap();
        assert_eq!(titles, vec!["Paris", "Rome"]);
    }

    #[tokio::test]
    async fn test_links_only_skips_ingest() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        seed(&config, 2019, &["/wiki/Rome"]);

        let provider = provider();
        let ingestor = ingestor(provider.clone());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let args = HarvestArgs {
            years: vec![2019],
            refresh: false,
            links_only: true,
        };
        execute_harvest(args, &config, &ingestor, &formatter).await.unwrap();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_year_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let ingestor = ingestor(provider());
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let args = HarvestArgs {
            years: vec![1999],
            refresh: false,
            links_only: true,
        };
        let err = execute_harvest(args, &config, &ingestor, &formatter)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
