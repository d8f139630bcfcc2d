/*!
 * Tests for the Morse codec and its character table
 */

use morse_translator::codec::{decode, encode, MorseCodec, MorseDocument, SymbolTable, UNKNOWN_MARKER};

#[test]
fn test_encode_withHelloWorld_shouldProduceCanonicalDocument() {
    assert_eq!(encode("Hello World"), ".... . .-.. .-.. --- / .-- --- .-. .-.. -..");
}

#[test]
fn test_decode_withHelloWorld_shouldProduceUppercaseText() {
    assert_eq!(decode(".... . .-.. .-.. --- / .-- --- .-. .-.. -.."), "HELLO WORLD");
}

#[test]
fn test_encode_withEmptyOrWhitespace_shouldBeEmpty() {
    assert_eq!(encode(""), "");
    assert_eq!(encode("   "), "");
    assert_eq!(encode(" \t\n "), "");
}

#[test]
fn test_decode_withEmptyOrSeparatorsOnly_shouldBeEmpty() {
    assert_eq!(decode(""), "");
    assert_eq!(decode(" / "), "");
    assert_eq!(decode("/ / /"), "");
    assert_eq!(decode("   "), "");
}

#[test]
fn test_decode_withRepeatedWordSeparators_shouldMatchSingleSeparator() {
    assert_eq!(decode(".- / / -..."), decode(".- / -..."));
    assert_eq!(decode(".- / / -..."), "A B");
}

#[test]
fn test_decode_withStraySeparators_shouldDropThem() {
    assert_eq!(decode(" / .- / -... / "), "A B");
    assert_eq!(decode(".-/-..."), "A B");
}

#[test]
fn test_decode_withUnknownTokens_shouldMarkEachInPlace() {
    assert_eq!(decode(".- ........ -..."), "A?B");
    assert_eq!(decode("........ ........"), "??");

    let decoded = MorseCodec::decode_detailed(".- ........ / ........ -...");
    assert_eq!(decoded.text, "A? ?B");
    assert_eq!(decoded.unknown, 2);
}

#[test]
fn test_decode_withUnknownWord_shouldKeepWordSpace() {
    assert_eq!(decode("...-.-.. / --. .-. . .- -"), "? GREAT");
    assert_eq!(
        decode("...-.-.. / --. .-. . .- -").matches(UNKNOWN_MARKER).count(),
        1
    );
}

#[test]
fn test_decode_withIrregularSpacing_shouldTolerateIt() {
    assert_eq!(decode("  ...   ---  ... "), "SOS");
    assert_eq!(decode("...\n---\t..."), "SOS");
}

#[test]
fn test_encode_withLowercaseAndDigits_shouldUppercase() {
    assert_eq!(encode("sos 73"), "... --- ... / --... ...--");
    assert_eq!(encode("SOS 73"), encode("sos 73"));
}

#[test]
fn test_encode_withUnsupportedCharacters_shouldSkipThem() {
    let encoded = MorseCodec::encode_detailed("Café #");
    assert_eq!(encoded.morse, "-.-. .- ..-.");
    assert_eq!(encoded.skipped, 2);
}

#[test]
fn test_encode_withPunctuation_shouldUseTable() {
    assert_eq!(encode("$"), "...-..-");
    assert_eq!(encode("@"), ".--.-.");
    assert_eq!(encode("a/b"), ".- -..-. -...");
}

#[test]
fn test_encode_withMultipleSpaces_shouldCollapseWordBreaks() {
    assert_eq!(encode("A   B"), ".- / -...");
    assert_eq!(encode("  A B  "), ".- / -...");
}

#[test]
fn test_optVariants_withNone_shouldBehaveLikeEmpty() {
    assert_eq!(MorseCodec::encode_opt(None), "");
    assert_eq!(MorseCodec::decode_opt(None), "");
    assert_eq!(MorseCodec::encode_opt(Some("e")), ".");
    assert_eq!(MorseCodec::decode_opt(Some(".")), "E");
}

#[test]
fn test_normalize_withIrregularDocument_shouldRenderCanonically() {
    assert_eq!(MorseCodec::normalize("  ...   --- //  ... "), "... --- / ...");
}

#[test]
fn test_symbolTable_shouldCoverLettersDigitsAndPunctuation() {
    assert_eq!(SymbolTable::len(), 54);
    assert!(('A'..='Z').all(SymbolTable::supports));
    assert!(('0'..='9').all(SymbolTable::supports));
    assert!(!SymbolTable::supports('a'));
    assert!(!SymbolTable::supports('#'));
}

#[test]
fn test_symbolTable_lookups_shouldBeInverse() {
    for (character, pattern) in SymbolTable::entries() {
        assert_eq!(SymbolTable::pattern_for(character), Some(pattern));
        assert_eq!(SymbolTable::char_for(pattern), Some(character));
    }
    assert_eq!(SymbolTable::char_for("........"), None);
}

#[test]
fn test_morseDocument_withParsedInput_shouldCountWordsAndCharacters() {
    let document = MorseDocument::parse(".... .. / - .... . .-. .");
    assert_eq!(document.word_count(), 2);
    assert_eq!(document.character_count(), 7);
    assert_eq!(document.to_string(), ".... .. / - .... . .-. .");

    let parsed: MorseDocument = " / ".parse().unwrap();
    assert!(parsed.is_empty());
}
