//! Wikifacts Domain Layer
//!
//! This crate contains the value types and trait interfaces shared by every
//! other Wikifacts crate. It has ZERO external dependencies and performs no
//! I/O: fetching, persistence and linguistic heuristics live in other crates
//! behind the traits defined here.
//!
//! ## Key Concepts
//!
//! - **Document**: an article's full text plus its title and source id
//! - **Keyword**: a ranked salient token of a document
//! - **Statement**: an (entity, cue, fragment) triple anchored on a keyword
//! - **Fragment**: a span of a document, held by reference and byte offsets
//! - **Fact**: a complete sentence detached from its document
//! - **ArticleRecord**: the persisted unit for one article
//!
//! ## Ownership
//!
//! A [`Document`] is owned by one pipeline invocation. [`Statement`] and
//! [`Fragment`] values borrow from it; only a [`Fact`] outlives it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod article;
pub mod document;
pub mod fact;
pub mod keyword;
pub mod statement;
pub mod traits;

// Re-exports for convenience
pub use article::ArticleRecord;
pub use document::{Document, Fragment};
pub use fact::Fact;
pub use keyword::Keyword;
pub use statement::Statement;
