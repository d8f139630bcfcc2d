/*!
 * Morse symbol table.
 *
 * The table is a fixed list of character/pattern pairs. Both lookup
 * directions are built from that single list on first use, so the
 * forward and reverse maps can never disagree.
 */

use std::collections::HashMap;
use once_cell::sync::Lazy;

/// Glyph for a short element (dit)
pub const DOT: char = '.';

/// Glyph for a long element (dah)
pub const DASH: char = '-';

/// Every supported character with its Morse pattern
pub const SYMBOLS: [(char, &str); 54] = [
    // Letters
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    // Digits
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    // Punctuation
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('\'', ".----."),
    ('!', "-.-.--"),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('&', ".-..."),
    (':', "---..."),
    (';', "-.-.-."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('_', "..--.-"),
    ('"', ".-..-."),
    ('$', "...-..-"),
    ('@', ".--.-."),
];

static CHAR_TO_PATTERN: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    SYMBOLS.iter().copied().collect()
});

static PATTERN_TO_CHAR: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    SYMBOLS.iter().map(|&(character, pattern)| (pattern, character)).collect()
});

/// Read-only view over the process-wide symbol table
pub struct SymbolTable;

impl SymbolTable {
    /// Pattern for an uppercase character, if the character is supported
    pub fn pattern_for(character: char) -> Option<&'static str> {
        CHAR_TO_PATTERN.get(&character).copied()
    }

    /// Character for a pattern, if the pattern is known
    pub fn char_for(pattern: &str) -> Option<char> {
        PATTERN_TO_CHAR.get(pattern).copied()
    }

    /// Whether the character (already uppercased) can be encoded
    pub fn supports(character: char) -> bool {
        CHAR_TO_PATTERN.contains_key(&character)
    }

    /// Number of entries in the table
    pub fn len() -> usize {
        SYMBOLS.len()
    }

    /// All (character, pattern) pairs in table order
    pub fn entries() -> impl Iterator<Item = (char, &'static str)> {
        SYMBOLS.iter().copied()
    }
}
