//! Article storage as configured: SQLite plus an optional JSON mirror.

use crate::config::Config;
use crate::error::Result;
use tracing::warn;
use wikifacts_domain::traits::ArticleStore;
use wikifacts_domain::ArticleRecord;
use wikifacts_store::{JsonDirStore, SqliteStore, StoreError};

/// SQLite store whose writes are also dumped to a pages directory.
///
/// Reads only consult SQLite. A failed mirror write is logged and does not
/// fail the put.
pub struct ArchiveStore {
    primary: SqliteStore,
    mirror: Option<JsonDirStore>,
}

impl ArchiveStore {
    /// Open the stores named by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        if let Some(parent) = config.database.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let primary = SqliteStore::new(&config.database)?;
        let mirror = config
            .pages_dir
            .as_ref()
            .map(JsonDirStore::open)
            .transpose()?;
        Ok(Self { primary, mirror })
    }

    /// Wrap existing stores.
    pub fn new(primary: SqliteStore, mirror: Option<JsonDirStore>) -> Self {
        Self { primary, mirror }
    }
}

impl ArticleStore for ArchiveStore {
    type Error = StoreError;

    fn put_article(&mut self, record: ArticleRecord) -> std::result::Result<(), StoreError> {
        let copy = self.mirror.as_ref().map(|_| record.clone());
        self.primary.put_article(record)?;

        if let (Some(mirror), Some(copy)) = (self.mirror.as_mut(), copy) {
            let title = copy.title.clone();
            if let Err(e) = mirror.put_article(copy) {
                warn!("Could not mirror '{}' to {}: {}", title, mirror.dir().display(), e);
            }
        }
        Ok(())
    }

    fn get_article(&self, title: &str) -> std::result::Result<Option<ArticleRecord>, StoreError> {
        self.primary.get_article(title)
    }

    fn find_article(&self, pattern: &str) -> std::result::Result<Option<ArticleRecord>, StoreError> {
        self.primary.find_article(pattern)
    }

    fn list_titles(&self) -> std::result::Result<Vec<String>, StoreError> {
        self.primary.list_titles()
    }
}
