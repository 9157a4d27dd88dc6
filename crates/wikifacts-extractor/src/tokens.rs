//! Word and punctuation tokenization shared by the ranker and the finder

/// Kind of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Alphanumeric run containing at least one letter
    Word,
    /// Run of digits only
    Number,
    /// Any other single non-whitespace character
    Punct,
}

/// A token as a byte span of the tokenized text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

impl Token {
    pub fn text<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }

    pub fn is_word_like(&self) -> bool {
        matches!(self.kind, TokenKind::Word | TokenKind::Number)
    }
}

/// Characters that join two alphanumeric runs into one word ("don't", "well-known")
fn is_joiner(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '-')
}

/// Tokenize `text`, offsetting every span by `base`
pub(crate) fn tokenize(text: &str, base: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        if !c.is_alphanumeric() {
            tokens.push(Token {
                start: base + start,
                end: base + start + c.len_utf8(),
                kind: TokenKind::Punct,
            });
            continue;
        }

        let mut end = start + c.len_utf8();
        while let Some(&(i, next)) = chars.peek() {
            let joins = is_joiner(next)
                && text[i + next.len_utf8()..]
                    .chars()
                    .next()
                    .is_some_and(char::is_alphanumeric);
            if next.is_alphanumeric() || joins {
                chars.next();
                end = i + next.len_utf8();
            } else {
                break;
            }
        }

        let kind = if text[start..end].chars().all(char::is_numeric) {
            TokenKind::Number
        } else {
            TokenKind::Word
        };
        tokens.push(Token {
            start: base + start,
            end: base + end,
            kind,
        });
    }

    tokens
}
