//! Rule-based sentence segmentation

use std::ops::Range;
use wikifacts_domain::traits::SentenceSegmenter;

/// Abbreviations that never end a sentence (compared lower-cased, without the dot)
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "ft", "no", "vs", "etc", "inc",
    "ltd", "co", "corp", "gen", "col", "lt", "sgt", "capt", "rev", "hon", "gov", "sen", "rep",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "approx",
    "fig", "vol", "ed", "est", "ca", "cf", "al",
];

/// Splits text into sentences at terminal punctuation and blank lines
///
/// A boundary follows `.`, `!` or `?` (and any closing quotes or brackets
/// right after it) when the next non-space character starts a new sentence:
/// an uppercase letter, a digit, an opening quote or bracket. A period after
/// a known abbreviation, a single-letter initial or a dotted abbreviation
/// such as `U.S` is not a boundary. A blank line always ends a unit.
#[derive(Debug, Clone, Default)]
pub struct PunctSegmenter {
    extra_abbreviations: Vec<String>,
}

impl PunctSegmenter {
    /// Create a segmenter with the built-in abbreviation list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add abbreviations (without trailing dot) that must not end a sentence
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_abbreviations
            .extend(abbreviations.into_iter().map(|a| a.into().to_lowercase()));
        self
    }

    fn is_abbreviation(&self, word: &str) -> bool {
        let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
        if word.is_empty() {
            return false;
        }

        let mut chars = word.chars();
        if let (Some(first), None) = (chars.next(), chars.next()) {
            return first.is_alphabetic() && first.is_uppercase();
        }

        if word.contains('.') {
            return word
                .split('.')
                .all(|part| part.chars().count() <= 2 && part.chars().all(char::is_alphabetic));
        }

        let lower = word.to_lowercase();
        ABBREVIATIONS.contains(&lower.as_str())
            || self.extra_abbreviations.iter().any(|a| *a == lower)
    }

    /// Sentence boundaries of one paragraph, pushed as absolute trimmed spans
    fn split_paragraph(&self, text: &str, paragraph: Range<usize>, spans: &mut Vec<Range<usize>>) {
        let para = &text[paragraph.clone()];
        let chars: Vec<(usize, char)> = para.char_indices().collect();
        let mut sentence_start = 0;
        let mut k = 0;

        while k < chars.len() {
            let (i, c) = chars[k];
            if !is_terminator(c) {
                k += 1;
                continue;
            }

            let mut j = k + 1;
            while j < chars.len() && (is_terminator(chars[j].1) || is_closing(chars[j].1)) {
                j += 1;
            }
            let end = chars.get(j).map_or(para.len(), |&(pos, _)| pos);

            let followed_by_space = j == chars.len() || chars[j].1.is_whitespace();
            let mut m = j;
            while m < chars.len() && chars[m].1.is_whitespace() {
                m += 1;
            }
            let starts_sentence = m == chars.len() || {
                let next = chars[m].1;
                next.is_uppercase() || next.is_numeric() || is_opening(next)
            };
            let after_abbreviation = c == '.' && {
                let before = &para[sentence_start..i];
                let word = before
                    .rsplit(char::is_whitespace)
                    .next()
                    .unwrap_or_default();
                self.is_abbreviation(word)
            };

            if followed_by_space && starts_sentence && !after_abbreviation {
                push_trimmed(text, paragraph.start + sentence_start..paragraph.start + end, spans);
                sentence_start = end;
            }
            k = j;
        }

        push_trimmed(text, paragraph.start + sentence_start..paragraph.end, spans);
    }
}

impl SentenceSegmenter for PunctSegmenter {
    fn sentence_spans(&self, text: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        for paragraph in paragraph_spans(text) {
            self.split_paragraph(text, paragraph, &mut spans);
        }
        spans
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '\u{201D}' | '\u{2019}' | '\u{00BB}')
}

fn is_opening(c: char) -> bool {
    matches!(c, '"' | '\'' | '(' | '[' | '{' | '\u{201C}' | '\u{2018}' | '\u{00AB}')
}

/// Byte ranges of the blank-line separated paragraphs of `text`
fn paragraph_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if offset > start {
                spans.push(start..offset);
            }
            start = offset + line.len();
        }
        offset += line.len();
    }
    if text.len() > start {
        spans.push(start..text.len());
    }

    spans
}

/// Push `range` of `text` with surrounding whitespace removed, if anything remains
fn push_trimmed(text: &str, range: Range<usize>, spans: &mut Vec<Range<usize>>) {
    let slice = &text[range.clone()];
    let leading = slice.len() - slice.trim_start().len();
    let trailing = slice.len() - slice.trim_end().len();
    if leading + trailing < slice.len() {
        spans.push(range.start + leading..range.end - trailing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<&str> {
        PunctSegmenter::new().sentences(text)
    }

    #[test]
    fn test_two_sentences() {
        assert_eq!(
            split("Paris is the capital of France. It has a population of over 2 million."),
            vec![
                "Paris is the capital of France.",
                "It has a population of over 2 million."
            ]
        );
    }

    #[test]
    fn test_question_and_exclamation() {
        assert_eq!(
            split("Is it big? Yes! Very big."),
            vec!["Is it big?", "Yes!", "Very big."]
        );
    }

    #[test]
    fn test_closing_quote_stays_with_sentence() {
        assert_eq!(
            split("He said \"Go home.\" Then he left."),
            vec!["He said \"Go home.\"", "Then he left."]
        );
    }

    #[test]
    fn test_lowercase_continuation_is_not_a_boundary() {
        assert_eq!(split("It cost 2.5 million. ok then."), vec!["It cost 2.5 million. ok then."]);
    }

    #[test]
    fn test_abbreviations_and_initials() {
        assert_eq!(
            split("Dr. Smith met J. K. Rowling in the U.S. Army. They talked."),
            vec!["Dr. Smith met J. K. Rowling in the U.S. Army.", "They talked."]
        );
    }

    #[test]
    fn test_custom_abbreviation() {
        let segmenter = PunctSegmenter::new().with_abbreviations(["Approx", "Blvd"]);
        assert_eq!(
            segmenter.sentences("Sunset Blvd. Hollywood is near."),
            vec!["Sunset Blvd. Hollywood is near."]
        );
    }

    #[test]
    fn test_blank_line_ends_unit() {
        assert_eq!(
            split("== History ==\n\nThe city was founded early\n\n\nIt grew."),
            vec!["== History ==", "The city was founded early", "It grew."]
        );
    }

    #[test]
    fn test_single_newline_does_not_split() {
        assert_eq!(split("One line\ncontinues here."), vec!["One line\ncontinues here."]);
    }

    #[test]
    fn test_spans_are_trimmed_and_absolute() {
        let text = "  First one.   Second one.  ";
        let spans = PunctSegmenter::new().sentence_spans(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].clone()], "First one.");
        assert_eq!(&text[spans[1].clone()], "Second one.");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(split("").is_empty());
        assert!(split("   \n\n  ").is_empty());
    }

    #[test]
    fn test_no_terminal_punctuation() {
        assert_eq!(split("just words here"), vec!["just words here"]);
    }
}
