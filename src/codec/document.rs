/*!
 * Morse document model.
 *
 * A Morse document is a sequence of words, each word a sequence of
 * character patterns. On the wire, patterns are separated by a single
 * space and words by `" / "`. Parsing is tolerant of irregular spacing
 * and of empty words; rendering always produces the canonical form.
 */

use std::fmt;
use once_cell::sync::Lazy;
use regex::Regex;
use log::trace;

/// Delimiter between patterns inside a word
pub const CHAR_DELIMITER: &str = " ";

/// Delimiter between words
pub const WORD_SEPARATOR: &str = " / ";

/// A slash with any amount of whitespace around it
static WORD_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*/\s*").unwrap()
});

/// Tokenized Morse document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorseDocument {
    /// Words in order; never contains an empty word
    words: Vec<Vec<String>>,
}

impl MorseDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a possibly irregular Morse string.
    ///
    /// Repeated, leading and trailing word separators produce no words, and
    /// runs of whitespace inside a word count as one delimiter. Tokens are
    /// kept verbatim, whether or not they are valid patterns.
    pub fn parse(input: &str) -> Self {
        let mut document = Self::new();

        for segment in WORD_SEPARATOR_REGEX.split(input) {
            let tokens = segment
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>();
            document.push_word(tokens);
        }

        trace!("Parsed Morse document: {} word(s), {} character(s)",
               document.word_count(), document.character_count());

        document
    }

    /// Append a word; empty words are ignored
    pub fn push_word(&mut self, tokens: Vec<String>) {
        if !tokens.is_empty() {
            self.words.push(tokens);
        }
    }

    /// Words of the document
    pub fn words(&self) -> &[Vec<String>] {
        &self.words
    }

    /// Number of words
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of character tokens across all words
    pub fn character_count(&self) -> usize {
        self.words.iter().map(Vec::len).sum()
    }

    /// Check if the document holds no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Render the canonical wire form
    pub fn render(&self) -> String {
        self.words
            .iter()
            .map(|word| word.join(CHAR_DELIMITER))
            .collect::<Vec<_>>()
            .join(WORD_SEPARATOR)
    }
}

impl fmt::Display for MorseDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::str::FromStr for MorseDocument {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
