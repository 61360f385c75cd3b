use unicode_normalization::UnicodeNormalization;

/// Hebrew points and cantillation marks (U+0591..=U+05C7), excluding the
/// punctuation that lives in the same block.
fn is_mark(c: char) -> bool {
    matches!(c, '\u{0591}'..='\u{05C7}')
        && !matches!(c, '\u{05BE}' | '\u{05C0}' | '\u{05C3}' | '\u{05C6}')
}

/// Bare consonantal spelling of a word: decomposed, marks removed, trimmed.
///
/// `שָׁלוֹם` and `שלום` map to the same string.
pub fn strip_niqqud(word: &str) -> String {
    word.trim().nfd().filter(|c| !is_mark(*c)).nfc().collect()
}
