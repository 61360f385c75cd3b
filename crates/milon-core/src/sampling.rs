use std::collections::HashSet;

use milon_types::QuizItem;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::history::recent;

/// Pick up to `size` distinct words from the last `window` history entries,
/// uniformly and without replacement.
///
/// Repeated words inside the window count once, so the sample never holds the
/// same word twice.
pub fn sample_quiz_words<R: Rng + ?Sized>(
    history: &[String],
    window: usize,
    size: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let pool: Vec<&String> = recent(history, window)
        .iter()
        .filter(|w| seen.insert(w.as_str()))
        .collect();

    pool.choose_multiple(rng, size.min(pool.len()))
        .map(|w| (*w).clone())
        .collect()
}

/// Shuffle the answer options in place; the correct one stays in the set.
pub fn shuffle_options<R: Rng + ?Sized>(item: &mut QuizItem, rng: &mut R) {
    item.options.shuffle(rng);
}
