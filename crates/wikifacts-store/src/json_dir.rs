//! Directory of per-article JSON files

use crate::error::StoreError;
use crate::record::StoredArticle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use wikifacts_domain::traits::ArticleStore;
use wikifacts_domain::ArticleRecord;

/// Titles in insertion order, with the file each one was written to
const INDEX_FILE: &str = ".index.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    title: String,
    file: String,
}

/// Article store writing one pretty-printed `<title>.json` per article
///
/// Titles that sanitise to the same file name get a numbered suffix
/// (`AC_DC.json`, `AC_DC~2.json`).
pub struct JsonDirStore {
    dir: PathBuf,
    entries: Vec<IndexEntry>,
}

impl JsonDirStore {
    /// Open (creating if needed) a store rooted at `dir`
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let index = dir.join(INDEX_FILE);
        let entries = if index.exists() {
            serde_json::from_str(&fs::read_to_string(&index)?)?
        } else {
            Vec::new()
        };

        Ok(Self { dir, entries })
    }

    /// Directory the store writes to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `title`, if it is stored
    pub fn path_for(&self, title: &str) -> Option<PathBuf> {
        self.entry(title).map(|entry| self.dir.join(&entry.file))
    }

    fn entry(&self, title: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.title == title)
    }

    /// First file name for `title` not used by another article
    fn free_file_name(&self, title: &str) -> String {
        let stem = file_stem(title);
        let taken = |name: &str| {
            self.entries.iter().any(|entry| entry.file == name) || self.dir.join(name).exists()
        };

        let mut name = format!("{stem}.json");
        let mut n = 2;
        while taken(&name) {
            name = format!("{stem}~{n}.json");
            n += 1;
        }
        name
    }

    fn read(&self, entry: &IndexEntry) -> Result<ArticleRecord, StoreError> {
        let json = fs::read_to_string(self.dir.join(&entry.file))?;
        let stored: StoredArticle = serde_json::from_str(&json)?;
        Ok(stored.into())
    }

    fn write_index(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(self.dir.join(INDEX_FILE), json)?;
        Ok(())
    }
}

/// Make a title safe to use as a file name
fn file_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match stem.strip_prefix('.') {
        Some(rest) => format!("_{rest}"),
        None if stem.is_empty() => "_".to_string(),
        None => stem,
    }
}

impl ArticleStore for JsonDirStore {
    type Error = StoreError;

    fn put_article(&mut self, record: ArticleRecord) -> Result<(), Self::Error> {
        if self.entry(&record.title).is_some() {
            return Err(StoreError::Duplicate(record.title));
        }

        let file = self.free_file_name(&record.title);
        let path = self.dir.join(&file);
        let stored = StoredArticle::from(record);
        fs::write(&path, serde_json::to_string_pretty(&stored)?)?;

        self.entries.push(IndexEntry {
            title: stored.title,
            file,
        });
        self.write_index()?;

        debug!("Wrote {}", path.display());
        Ok(())
    }

    fn get_article(&self, title: &str) -> Result<Option<ArticleRecord>, Self::Error> {
        self.entry(title).map(|entry| self.read(entry)).transpose()
    }

    fn find_article(&self, pattern: &str) -> Result<Option<ArticleRecord>, Self::Error> {
        let pattern = pattern.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.title.to_lowercase().contains(&pattern))
            .map(|entry| self.read(entry))
            .transpose()
    }

    fn list_titles(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.entries.iter().map(|entry| entry.title.clone()).collect())
    }
}
