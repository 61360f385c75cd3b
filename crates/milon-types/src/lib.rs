pub mod types;

pub use types::{Example, PollPayload, QuizCard, QuizItem, VocabularyItem};
