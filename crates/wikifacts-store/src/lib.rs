//! Wikifacts Storage Layer
//!
//! Implements the ArticleStore trait twice:
//!
//! - [`SqliteStore`]: one `articles` table, facts and keywords as JSON columns
//! - [`JsonDirStore`]: one pretty-printed JSON file per article
//!
//! Both are append-only and reject a title that is already stored.
//!
//! # Examples
//!
//! ```no_run
//! use wikifacts_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for article operations
//! ```

#![warn(missing_docs)]

mod error;
mod json_dir;
mod record;
mod sqlite;

pub use error::StoreError;
pub use json_dir::JsonDirStore;
pub use record::StoredArticle;
pub use sqlite::SqliteStore;
