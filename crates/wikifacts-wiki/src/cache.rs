//! Per-year cache of harvested article links

use crate::WikiError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Harvested links stored as `<dir>/<year>.json`
#[derive(Debug, Clone)]
pub struct UrlCache {
    dir: PathBuf,
}

impl UrlCache {
    /// Open (creating if needed) a cache rooted at `dir`
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, WikiError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path of the cache file for `year`
    pub fn path(&self, year: u32) -> PathBuf {
        self.dir.join(format!("{}.json", year))
    }

    /// Whether links for `year` are cached
    pub fn exists(&self, year: u32) -> bool {
        self.path(year).is_file()
    }

    /// Cached links for `year`, if any
    pub fn load(&self, year: u32) -> Result<Option<Vec<String>>, WikiError> {
        let path = self.path(year);
        if !path.is_file() {
            return Ok(None);
        }
        let links = serde_json::from_str(&fs::read_to_string(&path)?)?;
        Ok(Some(links))
    }

    /// Cache `links` for `year`, replacing any previous list
    pub fn save(&self, year: u32, links: &[String]) -> Result<(), WikiError> {
        let path = self.path(year);
        fs::write(&path, serde_json::to_string_pretty(links)?)?;
        debug!("Cached {} links in {}", links.len(), path.display());
        Ok(())
    }
}
