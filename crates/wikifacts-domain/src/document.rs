//! Document module - the immutable article text and spans into it

use std::fmt;
use std::ops::Range;

/// A fetched article: full text plus its title and numeric source id
///
/// Documents are immutable once constructed. Everything the extraction
/// pipeline derives from a document borrows from it until a [`Fact`] is
/// detached.
///
/// [`Fact`]: crate::Fact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    source_id: u64,
    text: String,
}

impl Document {
    /// Create a new document
    ///
    /// # Examples
    ///
    /// ```
    /// use wikifacts_domain::Document;
    ///
    /// let doc = Document::new("Paris", 22989, "Paris is the capital of France.");
    /// assert_eq!(doc.title(), "Paris");
    /// assert_eq!(doc.source_id(), 22989);
    /// ```
    pub fn new(title: impl Into<String>, source_id: u64, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source_id,
            text: text.into(),
        }
    }

    /// Article title, the lookup key of the persisted record
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Numeric id assigned by the source (e.g. a MediaWiki page id)
    pub fn source_id(&self) -> u64 {
        self.source_id
    }

    /// Full article text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the document, returning `(title, source_id, text)`
    pub fn into_parts(self) -> (String, u64, String) {
        (self.title, self.source_id, self.text)
    }
}

/// A span of a [`Document`], held by reference plus byte offsets
///
/// A fragment is never a copied string: `text()` always slices the
/// originating document, so its text is a literal substring of that
/// document by construction.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'d> {
    document: &'d Document,
    start: usize,
    end: usize,
}

impl<'d> Fragment<'d> {
    /// Create a fragment over `range` of `document`
    ///
    /// Returns `None` when the range is reversed, out of bounds, or does
    /// not fall on UTF-8 character boundaries.
    ///
    /// # Examples
    ///
    /// ```
    /// use wikifacts_domain::{Document, Fragment};
    ///
    /// let doc = Document::new("Paris", 1, "Paris is the capital of France.");
    /// let fragment = Fragment::new(&doc, 6..30).unwrap();
    /// assert_eq!(fragment.text(), "is the capital of France");
    /// assert!(Fragment::new(&doc, 6..400).is_none());
    /// ```
    pub fn new(document: &'d Document, range: Range<usize>) -> Option<Self> {
        let text = document.text();
        if range.start > range.end
            || range.end > text.len()
            || !text.is_char_boundary(range.start)
            || !text.is_char_boundary(range.end)
        {
            return None;
        }
        Some(Self {
            document,
            start: range.start,
            end: range.end,
        })
    }

    /// Create a fragment on the first occurrence of `needle` in `document`
    pub fn locate(document: &'d Document, needle: &str) -> Option<Self> {
        let start = document.text().find(needle)?;
        Self::new(document, start..start + needle.len())
    }

    /// The document this fragment was drawn from
    pub fn document(&self) -> &'d Document {
        self.document
    }

    /// Byte range of the fragment within its document
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The fragment's text, sliced from its document
    pub fn text(&self) -> &'d str {
        &self.document.text()[self.start..self.end]
    }

    /// Whether the fragment covers no text
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Debug for Fragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("document", &self.document.title())
            .field("range", &self.range())
            .field("text", &self.text())
            .finish()
    }
}

impl fmt::Display for Fragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a fragment is either rejected or slices its document exactly
        #[test]
        fn test_fragment_is_literal_substring(text in "\\PC{0,40}", start in 0usize..60, len in 0usize..60) {
            let doc = Document::new("t", 1, text.clone());
            let end = start + len;

            match Fragment::new(&doc, start..end) {
                Some(fragment) => {
                    prop_assert_eq!(fragment.text(), &text[start..end]);
                    prop_assert_eq!(fragment.is_empty(), len == 0);
                }
                None => prop_assert!(
                    end > text.len() || !text.is_char_boundary(start) || !text.is_char_boundary(end)
                ),
            }
        }
    }
}
