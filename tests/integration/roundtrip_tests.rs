/*!
 * Integration tests for text to Morse and back
 */

use morse_translator::codec::{decode, encode, MorseCodec, SymbolTable};

/// Every supported character survives a round trip
#[test]
fn test_roundtrip_withEverySupportedCharacter_shouldReturnUppercase() {
    for (character, _) in SymbolTable::entries() {
        let text = character.to_string();
        assert_eq!(decode(&encode(&text)), text, "round trip failed for {:?}", character);

        let lower = character.to_lowercase().to_string();
        assert_eq!(decode(&encode(&lower)), character.to_uppercase().to_string());
    }
}

#[test]
fn test_roundtrip_withSentence_shouldKeepWordsAndPunctuation() {
    let text = "The quick brown fox jumps over the lazy dog, 1234567890!";
    assert_eq!(decode(&encode(text)), text.to_uppercase());
}

#[test]
fn test_roundtrip_withIrregularWhitespace_shouldCollapseToSingleSpaces() {
    let text = "  cq\tcq \n de  k1abc  ";
    assert_eq!(decode(&encode(text)), "CQ CQ DE K1ABC");
}

#[test]
fn test_roundtrip_withUnsupportedCharacters_shouldDropOnlyThem() {
    assert_eq!(decode(&encode("50% off #1")), "50 OFF 1");
}

#[test]
fn test_normalize_thenDecode_shouldMatchDirectDecode() {
    let messy = "  .-- .... .- -  //  .. ... /-  .... .. ... ..--.. ";
    assert_eq!(decode(&MorseCodec::normalize(messy)), decode(messy));
    assert_eq!(decode(messy), "WHAT IS THIS?");
}

/// Canonical documents of known patterns survive decode then encode
#[test]
fn test_roundtrip_withCanonicalMorse_shouldReproduceDocument() {
    let every_pattern = SymbolTable::entries()
        .map(|(_, pattern)| pattern)
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(encode(&decode(&every_pattern)), every_pattern);

    for morse in [
        ".... .. / - .... . .-. .",
        "... --- ...",
        "-.-. --.- / -.. . / -.- .---- .- -... -.-. / ...-..-",
    ] {
        assert_eq!(encode(&decode(morse)), morse);
        assert_eq!(MorseCodec::normalize(morse), morse);
    }
}
