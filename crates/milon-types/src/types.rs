use serde::{Deserialize, Serialize};

/// One generated vocabulary entry, as the model returns it.
///
/// Only `word` survives the run; it is appended to the history log once the
/// daily digest is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    /// Headword in the target script, fully vowelled
    pub word: String,
    pub transliteration: String,
    pub part_of_speech: String,
    /// English definition and explanation
    pub definition: String,
    #[serde(flatten)]
    pub example: Example,
}

/// Example sentence attached to a vocabulary item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Sentence in the target script
    #[serde(rename = "example_hebrew")]
    pub source: String,
    #[serde(rename = "example_transliteration")]
    pub transliteration: String,
    #[serde(rename = "example_translation")]
    pub translation: String,
}

/// Multiple-choice question about one previously sent word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub correct_option: String,
    /// Four candidate answers, the correct one included exactly once
    pub options: Vec<String>,
    pub card: QuizCard,
}

/// Answer card revealed after a quiz poll.
///
/// The bare word is tracked by the caller, the card only carries the study
/// material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCard {
    pub transliteration: String,
    pub part_of_speech: String,
    pub definition: String,
    pub example_hebrew: String,
    pub example_translation: String,
}

/// Poll ready for the chat API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollPayload {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option_id: usize,
}
