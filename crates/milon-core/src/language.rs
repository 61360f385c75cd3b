use crate::preprocess::Preprocessor;

/// Prompting and presentation for one target language
pub trait LanguageTutor: Preprocessor + Send + Sync {
    /// Instruction asking for `count` new vocabulary items, avoiding `exclusions`
    fn vocabulary_prompt(&self, exclusions: &[String], count: usize) -> String;

    /// Instruction asking for one quiz bundle per word, in order
    fn quiz_prompt(&self, words: &[String]) -> String;

    /// Titles and field labels for chat messages
    fn labels(&self) -> Labels;
}

/// Display strings used by the message formatter
#[derive(Debug, Clone)]
pub struct Labels {
    pub digest_title: String,
    pub part_of_speech: String,
    pub definition: String,
    pub example: String,
    /// Marks the sentence in the target script
    pub source_marker: String,
    pub transliteration_marker: String,
    pub translation_marker: String,
    pub separator: String,
    pub answer: String,
}
