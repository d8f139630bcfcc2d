/*!
 * Morse codec.
 *
 * - `table`: the fixed character/pattern table and its lookups
 * - `document`: tokenized Morse documents and their wire format
 * - `core`: encode and decode over the table
 */

// Re-export main types for easier usage
pub use self::core::{decode, encode, Decoded, Encoded, MorseCodec, UNKNOWN_MARKER};
pub use self::document::{MorseDocument, CHAR_DELIMITER, WORD_SEPARATOR};
pub use self::table::{SymbolTable, DASH, DOT};

// Submodules
pub mod core;
pub mod document;
pub mod table;
