//! Statement module - (entity, cue, fragment) triples

use crate::Fragment;

/// A semi-structured statement anchored on a keyword
///
/// `entity` is the keyword the statement was found for, `cue` the lexical
/// relation label (typically a verb lemma such as `be`), and `fragment` the
/// span of the source document associated with the entity via the cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement<'d> {
    /// Keyword token the statement is anchored to
    pub entity: String,

    /// Relation label, usually a verb lemma
    pub cue: String,

    /// Span of the originating document
    pub fragment: Fragment<'d>,
}

impl<'d> Statement<'d> {
    /// Create a new statement
    pub fn new(entity: impl Into<String>, cue: impl Into<String>, fragment: Fragment<'d>) -> Self {
        Self {
            entity: entity.into(),
            cue: cue.into(),
            fragment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    #[test]
    fn test_statement_borrows_fragment() {
        let doc = Document::new("Paris", 1, "Paris is the capital of France.");
        let fragment = Fragment::locate(&doc, "is the capital of France").unwrap();
        let statement = Statement::new("paris", "be", fragment);

        assert_eq!(statement.entity, "paris");
        assert_eq!(statement.cue, "be");
        assert_eq!(statement.fragment.text(), "is the capital of France");
        assert!(std::ptr::eq(statement.fragment.document(), &doc));
    }
}
