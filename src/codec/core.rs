/*!
 * Text to Morse conversion and back.
 *
 * Both directions are total: unsupported characters are dropped when
 * encoding and unknown patterns become a `?` marker when decoding.
 */

use log::debug;

use super::document::MorseDocument;
use super::table::SymbolTable;

/// Character written in place of an unknown pattern
pub const UNKNOWN_MARKER: char = '?';

/// Result of an encode call with bookkeeping for the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Canonical Morse document
    pub morse: String,
    /// Number of input characters that had no pattern and were dropped
    pub skipped: usize,
}

/// Result of a decode call with bookkeeping for the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Decoded uppercase text
    pub text: String,
    /// Number of tokens replaced by the unknown marker
    pub unknown: usize,
}

/// Morse codec over the process-wide symbol table
pub struct MorseCodec;

impl MorseCodec {
    /// Encode plain text into a canonical Morse document
    pub fn encode(text: &str) -> String {
        Self::encode_detailed(text).morse
    }

    /// Encode an optional text; `None` behaves like empty input
    pub fn encode_opt(text: Option<&str>) -> String {
        text.map(Self::encode).unwrap_or_default()
    }

    /// Encode and report how many characters were dropped
    pub fn encode_detailed(text: &str) -> Encoded {
        let mut document = MorseDocument::new();
        let mut word: Vec<String> = Vec::new();
        let mut skipped = 0;

        for character in text.chars().flat_map(char::to_uppercase) {
            if character.is_whitespace() {
                document.push_word(std::mem::take(&mut word));
            } else if let Some(pattern) = SymbolTable::pattern_for(character) {
                word.push(pattern.to_string());
            } else {
                skipped += 1;
            }
        }
        document.push_word(word);

        if skipped > 0 {
            debug!("Dropped {} unsupported character(s) while encoding", skipped);
        }

        Encoded {
            morse: document.render(),
            skipped,
        }
    }

    /// Decode a Morse document into uppercase text
    pub fn decode(morse: &str) -> String {
        Self::decode_detailed(morse).text
    }

    /// Decode an optional document; `None` behaves like empty input
    pub fn decode_opt(morse: Option<&str>) -> String {
        morse.map(Self::decode).unwrap_or_default()
    }

    /// Decode and report how many tokens were unknown.
    ///
    /// Words are joined by a single space, also after an unknown marker.
    pub fn decode_detailed(morse: &str) -> Decoded {
        let document = MorseDocument::parse(morse);
        let mut text = String::with_capacity(document.character_count() + document.word_count());
        let mut unknown = 0;

        for (index, word) in document.words().iter().enumerate() {
            if index > 0 {
                text.push(' ');
            }
            for token in word {
                match SymbolTable::char_for(token) {
                    Some(character) => text.push(character),
                    None => {
                        unknown += 1;
                        text.push(UNKNOWN_MARKER);
                    }
                }
            }
        }

        if unknown > 0 {
            debug!("Replaced {} unknown pattern(s) with '{}'", unknown, UNKNOWN_MARKER);
        }

        Decoded { text, unknown }
    }

    /// Re-render an irregular Morse document in canonical form.
    ///
    /// Unknown tokens are kept verbatim.
    pub fn normalize(morse: &str) -> String {
        MorseDocument::parse(morse).render()
    }
}

/// Encode plain text into Morse code
pub fn encode(text: &str) -> String {
    MorseCodec::encode(text)
}

/// Decode Morse code into plain text
pub fn decode(morse: &str) -> String {
    MorseCodec::decode(morse)
}
