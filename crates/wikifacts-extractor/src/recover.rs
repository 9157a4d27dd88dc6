//! Recovering the full sentence around a fragment

use crate::segment::PunctSegmenter;
use tracing::trace;
use wikifacts_domain::traits::SentenceSegmenter;
use wikifacts_domain::{Fact, Fragment};

/// Default number of bytes searched on each side of a fragment
pub const DEFAULT_WINDOW: usize = 2000;

/// Recovers the sentence that contains a fragment
///
/// Only a window around the fragment's first occurrence is segmented, which
/// bounds the work per fragment; the window size affects speed, not the
/// correctness of what is returned.
#[derive(Debug, Clone)]
pub struct SentenceRecoverer<G = PunctSegmenter> {
    segmenter: G,
    window: usize,
}

impl SentenceRecoverer {
    /// Create a recoverer with the default segmenter and window
    pub fn new() -> Self {
        Self::with_segmenter(PunctSegmenter::new(), DEFAULT_WINDOW)
    }
}

impl Default for SentenceRecoverer {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> SentenceRecoverer<G> {
    /// Create a recoverer splitting windows with `segmenter`
    pub fn with_segmenter(segmenter: G, window: usize) -> Self {
        Self { segmenter, window }
    }

    /// Bytes searched on each side of a fragment
    pub fn window(&self) -> usize {
        self.window
    }
}

impl<G: SentenceSegmenter> SentenceRecoverer<G> {
    /// Recover the sentence containing `fragment`
    ///
    /// The window is anchored on the *first* occurrence of the fragment's
    /// text in its document, whichever occurrence the fragment refers to.
    /// Returns `None` when no sentence unit of the window contains the
    /// fragment text literally (the fragment crosses a boundary, the window
    /// is too small, or segmentation isolated another occurrence), and for
    /// an empty fragment. A partial sentence is never returned: a unit cut
    /// by either window edge is never a candidate.
    pub fn recover(&self, fragment: &Fragment<'_>) -> Option<Fact> {
        let needle = fragment.text();
        if needle.trim().is_empty() {
            return None;
        }

        let text = fragment.document().text();
        let anchor = text.find(needle)?;
        let start = floor_char_boundary(text, anchor.saturating_sub(self.window));
        let start = word_start(text, start);
        let end = ceil_char_boundary(text, anchor.saturating_add(self.window).min(text.len()));

        // Units touching a cut window edge may be partial sentences
        let window = &text[start..end];
        let spans = self.segmenter.sentence_spans(window);
        let last = spans.len().saturating_sub(1);
        let found = spans
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !(start > 0 && *i == 0) && !(end < text.len() && *i == last))
            .map(|(_, span)| &window[span])
            .find(|sentence| sentence.contains(needle))
            .map(Fact::new);

        if found.is_none() {
            trace!("No sentence contains fragment '{}'", needle);
        }
        found
    }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Move `index` back to the start of the word it falls in
fn word_start(text: &str, index: usize) -> usize {
    text[..index]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8())
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikifacts_domain::Document;

    #[test]
    fn test_recovers_full_sentence() {
        let doc = Document::new(
            "Paris",
            1,
            "Paris is the capital of France. It has a population of over 2 million.",
        );
        let fragment = Fragment::locate(&doc, "is the capital of France").unwrap();
        let fact = SentenceRecoverer::new().recover(&fragment).unwrap();
        assert_eq!(fact.as_str(), "Paris is the capital of France.");
    }

    #[test]
    fn test_anchors_on_first_occurrence() {
        let doc = Document::new(
            "t",
            1,
            "The museum is open daily. Later the museum is open daily during summer.",
        );
        // Fragment refers to the second occurrence
        let second = doc.text().rfind("is open daily").unwrap();
        let fragment = Fragment::new(&doc, second..second + "is open daily".len()).unwrap();
        let fact = SentenceRecoverer::new().recover(&fragment).unwrap();
        assert_eq!(fact.as_str(), "The museum is open daily.");
    }

    #[test]
    fn test_fragment_spanning_boundary_is_a_miss() {
        let doc = Document::new("t", 1, "Paris is big. It is old.");
        let fragment = Fragment::locate(&doc, "big. It").unwrap();
        assert!(SentenceRecoverer::new().recover(&fragment).is_none());
    }

    #[test]
    fn test_window_too_small_is_a_miss() {
        let doc = Document::new("t", 1, "Paris is the capital of France.");
        let fragment = Fragment::locate(&doc, "is the capital of France").unwrap();
        let recoverer = SentenceRecoverer::with_segmenter(PunctSegmenter::new(), 5);
        assert!(recoverer.recover(&fragment).is_none());
    }

    #[test]
    fn test_window_clamped_at_document_edges() {
        let doc = Document::new("t", 1, "A is b.");
        let fragment = Fragment::locate(&doc, "is b").unwrap();
        let fact = SentenceRecoverer::with_segmenter(PunctSegmenter::new(), 10_000)
            .recover(&fragment)
            .unwrap();
        assert_eq!(fact.as_str(), "A is b.");
    }

    #[test]
    fn test_window_snaps_to_char_boundaries() {
        let doc = Document::new("t", 1, "Élan é. Zürich is a city.");
        let fragment = Fragment::locate(&doc, "is a city").unwrap();
        // Pick a window whose left edge falls inside a two-byte character
        let anchor = doc.text().find("is a city").unwrap();
        let window = (1..anchor)
            .find(|w| !doc.text().is_char_boundary(anchor - w))
            .unwrap();
        let fact = SentenceRecoverer::with_segmenter(PunctSegmenter::new(), window)
            .recover(&fragment);
        assert!(fact.map_or(true, |f| f.contains("is a city")));
    }

    #[test]
    fn test_sentence_cut_by_window_edge_is_a_miss() {
        let text = "Prior. The long preamble of this sentence is here and it is big.";
        let doc = Document::new("t", 1, text);
        let fragment = Fragment::locate(&doc, "is big").unwrap();

        let narrow = SentenceRecoverer::with_segmenter(PunctSegmenter::new(), 20);
        assert!(narrow.recover(&fragment).is_none());

        let wide = SentenceRecoverer::with_segmenter(PunctSegmenter::new(), 60);
        assert_eq!(
            wide.recover(&fragment).unwrap().as_str(),
            "The long preamble of this sentence is here and it is big."
        );
    }

    #[test]
    fn test_sentence_cut_at_right_edge_is_a_miss() {
        let text = "Rome is an old city with a very long history behind it. Next.";
        let doc = Document::new("t", 1, text);
        let fragment = Fragment::locate(&doc, "is an old").unwrap();

        let narrow = SentenceRecoverer::with_segmenter(PunctSegmenter::new(), 15);
        assert!(narrow.recover(&fragment).is_none());
    }

    #[test]
    fn test_whole_sentences_inside_window_are_kept() {
        let text = "Alpha one is first here. Rome is old. Omega is the final sentence here.";
        let doc = Document::new("t", 1, text);
        let fragment = Fragment::locate(&doc, "is old").unwrap();

        let recoverer = SentenceRecoverer::with_segmenter(PunctSegmenter::new(), 20);
        assert_eq!(recoverer.recover(&fragment).unwrap().as_str(), "Rome is old.");
    }

    #[test]
    fn test_empty_fragment_is_a_miss() {
        let doc = Document::new("t", 1, "Paris is big.");
        let fragment = Fragment::new(&doc, 3..3).unwrap();
        assert!(SentenceRecoverer::new().recover(&fragment).is_none());
    }

    #[test]
    fn test_sentence_is_trimmed() {
        let doc = Document::new("t", 1, "\n\n   Rome is old.   \n\nMore text here.");
        let fragment = Fragment::locate(&doc, "is old").unwrap();
        let fact = SentenceRecoverer::new().recover(&fragment).unwrap();
        assert_eq!(fact.as_str(), "Rome is old.");
    }
}
