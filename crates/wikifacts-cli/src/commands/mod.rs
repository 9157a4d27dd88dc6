//! Command implementations.

pub mod extract;
pub mod harvest;
pub mod ingest;
pub mod list;
pub mod lookup;

pub use self::extract::execute_extract;
pub use self::harvest::execute_harvest;
pub use self::ingest::execute_ingest;
pub use self::list::execute_list;
pub use self::lookup::execute_lookup;

use crate::config::Config;
use crate::error::Result;
use crate::store::ArchiveStore;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wikifacts_extractor::{FactExtractor, Ingestor};
use wikifacts_wiki::MediaWikiProvider;

/// Ingestor wired to MediaWiki and the configured stores.
pub type WikiIngestor = Ingestor<MediaWikiProvider, ArchiveStore>;

/// Build the ingestor described by `config`.
pub fn build_ingestor(config: &Config) -> Result<WikiIngestor> {
    let provider = MediaWikiProvider::new(
        config.wiki.endpoint.clone(),
        Duration::from_secs(config.wiki.timeout_secs),
    )?
    .with_max_retries(config.wiki.max_retries);
    let store = ArchiveStore::open(config)?;
    let extractor = FactExtractor::new(config.extraction.clone())?;

    Ok(Ingestor::new(provider, Arc::new(Mutex::new(store)), extractor))
}
