use milon_types::{QuizItem, VocabularyItem};

/// Telegram poll limits
pub const POLL_QUESTION_MAX_CHARS: usize = 300;
pub const POLL_OPTION_MAX_CHARS: usize = 100;
pub const QUIZ_OPTION_COUNT: usize = 4;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("expected {expected} records, got {actual}")]
    Count { expected: usize, actual: usize },

    #[error("record {index}: field `{field}` is blank")]
    BlankField { index: usize, field: &'static str },

    #[error("record {index}: expected 4 options, got {actual}")]
    OptionCount { index: usize, actual: usize },

    #[error("record {index}: options are not distinct")]
    DuplicateOptions { index: usize },

    #[error("record {index}: correct option appears {count} times among the options")]
    CorrectOption { index: usize, count: usize },

    #[error("record {index}: `{field}` is longer than {limit} characters")]
    TooLong {
        index: usize,
        field: &'static str,
        limit: usize,
    },
}

/// Structural checks applied after a model answer has been deserialized
pub trait Validate {
    fn validate(&self, index: usize) -> Result<(), SchemaError>;
}

fn require(index: usize, field: &'static str, value: &str) -> Result<(), SchemaError> {
    if value.trim().is_empty() {
        return Err(SchemaError::BlankField { index, field });
    }
    Ok(())
}

fn limit(index: usize, field: &'static str, value: &str, max: usize) -> Result<(), SchemaError> {
    if value.trim().chars().count() > max {
        return Err(SchemaError::TooLong {
            index,
            field,
            limit: max,
        });
    }
    Ok(())
}

impl Validate for VocabularyItem {
    fn validate(&self, index: usize) -> Result<(), SchemaError> {
        require(index, "word", &self.word)?;
        require(index, "transliteration", &self.transliteration)?;
        require(index, "part_of_speech", &self.part_of_speech)?;
        require(index, "definition", &self.definition)?;
        require(index, "example_hebrew", &self.example.source)?;
        require(index, "example_transliteration", &self.example.transliteration)?;
        require(index, "example_translation", &self.example.translation)?;
        Ok(())
    }
}

impl Validate for QuizItem {
    fn validate(&self, index: usize) -> Result<(), SchemaError> {
        require(index, "question", &self.question)?;
        require(index, "correct_option", &self.correct_option)?;
        limit(index, "question", &self.question, POLL_QUESTION_MAX_CHARS)?;

        if self.options.len() != QUIZ_OPTION_COUNT {
            return Err(SchemaError::OptionCount {
                index,
                actual: self.options.len(),
            });
        }
        for option in &self.options {
            require(index, "options", option)?;
            limit(index, "options", option, POLL_OPTION_MAX_CHARS)?;
        }

        let mut seen: Vec<&str> = self.options.iter().map(|o| o.trim()).collect();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != self.options.len() {
            return Err(SchemaError::DuplicateOptions { index });
        }

        let correct = self.correct_option.trim();
        let count = self.options.iter().filter(|o| o.trim() == correct).count();
        if count != 1 {
            return Err(SchemaError::CorrectOption { index, count });
        }

        require(index, "card.transliteration", &self.card.transliteration)?;
        require(index, "card.part_of_speech", &self.card.part_of_speech)?;
        require(index, "card.definition", &self.card.definition)?;
        require(index, "card.example_hebrew", &self.card.example_hebrew)?;
        require(index, "card.example_translation", &self.card.example_translation)?;
        Ok(())
    }
}

/// Validate a whole batch: exact record count, then every record.
pub fn validate_batch<T: Validate>(items: &[T], expected: usize) -> Result<(), SchemaError> {
    if items.len() != expected {
        return Err(SchemaError::Count {
            expected,
            actual: items.len(),
        });
    }
    items
        .iter()
        .enumerate()
        .try_for_each(|(index, item)| item.validate(index))
}

/// Strip a Markdown code fence some models wrap around JSON output
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // language tag, if any, runs to the end of the opening line
    let rest = match rest.split_once('\n') {
        Some((tag, body)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body,
        _ => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
