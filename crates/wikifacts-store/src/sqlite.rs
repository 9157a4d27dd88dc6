//! SQLite-backed article store

use crate::error::StoreError;
use crate::record::StoredArticle;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;
use wikifacts_domain::traits::ArticleStore;
use wikifacts_domain::ArticleRecord;

const SELECT_ARTICLE: &str = "SELECT title, source_id, text, facts, keywords FROM articles";

/// SQLite-based implementation of ArticleStore
///
/// Facts and keywords are kept as JSON text columns. Insertion order is the
/// table's rowid order.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store between tasks
/// behind a `Mutex`, or give each thread its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wikifacts_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("wikifacts.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    /// Number of stored articles
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn read_row(row: &Row<'_>) -> rusqlite::Result<(String, i64, String, String, String)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
    }

    fn decode(
        (title, source_id, text, facts, keywords): (String, i64, String, String, String),
    ) -> Result<ArticleRecord, StoreError> {
        let source_id = u64::try_from(source_id)
            .map_err(|_| StoreError::InvalidData(format!("negative source_id for '{}'", title)))?;
        Ok(StoredArticle {
            text,
            title,
            facts: serde_json::from_str(&facts)?,
            keywords: serde_json::from_str(&keywords)?,
            source_id,
        }
        .into())
    }
}

impl ArticleStore for SqliteStore {
    type Error = StoreError;

    fn put_article(&mut self, record: ArticleRecord) -> Result<(), Self::Error> {
        let exists: bool = self
            .conn
            .query_row(
                "SELECT 1 FROM articles WHERE title = ?1",
                params![&record.title],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        if exists {
            return Err(StoreError::Duplicate(record.title));
        }

        let stored = StoredArticle::from(record);
        let source_id = i64::try_from(stored.source_id).map_err(|_| {
            StoreError::InvalidData(format!("source_id {} out of range", stored.source_id))
        })?;
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        self.conn.execute(
            "INSERT INTO articles (title, source_id, text, facts, keywords, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &stored.title,
                source_id,
                &stored.text,
                serde_json::to_string(&stored.facts)?,
                serde_json::to_string(&stored.keywords)?,
                created_at,
            ],
        )?;

        debug!("Stored '{}' with {} facts", stored.title, stored.facts.len());
        Ok(())
    }

    fn get_article(&self, title: &str) -> Result<Option<ArticleRecord>, Self::Error> {
        let row = self
            .conn
            .query_row(
                &format!("{SELECT_ARTICLE} WHERE title = ?1"),
                params![title],
                Self::read_row,
            )
            .optional()?;

        row.map(Self::decode).transpose()
    }

    /// Case folding is ASCII-only, as in SQLite's `lower()`
    fn find_article(&self, pattern: &str) -> Result<Option<ArticleRecord>, Self::Error> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "{SELECT_ARTICLE} WHERE instr(lower(title), lower(?1)) > 0 ORDER BY rowid LIMIT 1"
                ),
                params![pattern],
                Self::read_row,
            )
            .optional()?;

        row.map(Self::decode).transpose()
    }

    fn list_titles(&self) -> Result<Vec<String>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT title FROM articles ORDER BY rowid")?;
        let titles = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(titles)
    }
}
