use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

/// Word normalization used to compare generated words against history
pub trait Preprocessor {
    // Default: trim and compose (NFC)
    fn process(&self, text: &str) -> String {
        text.trim().nfc().collect()
    }
}

/// Words from `batch` whose normalized form already occurs in `history`.
///
/// Repeats are only reported; the generator's exclusion list is best-effort.
pub fn find_repeats<P: Preprocessor + ?Sized>(
    preprocessor: &P,
    batch: &[String],
    history: &[String],
) -> Vec<String> {
    let seen: HashSet<String> = history.iter().map(|w| preprocessor.process(w)).collect();
    batch
        .iter()
        .filter(|w| seen.contains(&preprocessor.process(w)))
        .cloned()
        .collect()
}
