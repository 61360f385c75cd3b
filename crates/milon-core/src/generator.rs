use milon_llm::{GenerateError, StructuredGenerator};
use milon_types::{QuizItem, VocabularyItem};
use serde::de::DeserializeOwned;

use crate::error::CoreError;
use crate::fallback::{FallbackChain, Generated};
use crate::history::recent;
use crate::language::LanguageTutor;
use crate::preprocess::find_repeats;
use crate::schema::{Validate, strip_code_fence, validate_batch};

/// Parse a model answer into exactly `expected` valid records.
///
/// Any deviation fails the whole answer; records are never partially kept.
pub fn parse_records<T>(raw: &str, expected: usize) -> Result<Vec<T>, GenerateError>
where
    T: DeserializeOwned + Validate,
{
    let records: Vec<T> = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| GenerateError::InvalidResponse(format!("malformed JSON records: {e}")))?;
    validate_batch(&records, expected)
        .map_err(|e| GenerateError::InvalidResponse(e.to_string()))?;
    Ok(records)
}

/// Daily vocabulary batch generation
pub struct ContentGenerator<'a> {
    endpoint: &'a dyn StructuredGenerator,
    chain: &'a FallbackChain,
    tutor: &'a dyn LanguageTutor,
    exclusion_window: usize,
}

impl<'a> ContentGenerator<'a> {
    pub fn new(
        endpoint: &'a dyn StructuredGenerator,
        chain: &'a FallbackChain,
        tutor: &'a dyn LanguageTutor,
        exclusion_window: usize,
    ) -> Self {
        Self {
            endpoint,
            chain,
            tutor,
            exclusion_window,
        }
    }

    /// Ask the candidate models, in order, for `count` new items.
    pub async fn generate(
        &self,
        history: &[String],
        count: usize,
    ) -> Result<Generated<Vec<VocabularyItem>>, CoreError> {
        let exclusions = recent(history, self.exclusion_window);
        tracing::debug!(
            "Excluding {} recent words ({} in history)",
            exclusions.len(),
            history.len()
        );
        let prompt = self.tutor.vocabulary_prompt(exclusions, count);

        let endpoint = self.endpoint;
        let prompt = prompt.as_str();
        let generated = self
            .chain
            .run(|model| async move {
                let raw = endpoint.generate_json(&model, prompt).await?;
                parse_records::<VocabularyItem>(&raw, count)
            })
            .await?;

        let words: Vec<String> = generated.value.iter().map(|i| i.word.clone()).collect();
        let repeats = find_repeats(self.tutor, &words, history);
        if !repeats.is_empty() {
            tracing::warn!(
                "Model {} repeated {} earlier word(s): {}",
                generated.model,
                repeats.len(),
                repeats.join(", ")
            );
        }

        Ok(generated)
    }
}

/// Quiz bundle generation for sampled history words
pub struct QuizGenerator<'a> {
    endpoint: &'a dyn StructuredGenerator,
    chain: &'a FallbackChain,
    tutor: &'a dyn LanguageTutor,
}

impl<'a> QuizGenerator<'a> {
    pub fn new(
        endpoint: &'a dyn StructuredGenerator,
        chain: &'a FallbackChain,
        tutor: &'a dyn LanguageTutor,
    ) -> Self {
        Self {
            endpoint,
            chain,
            tutor,
        }
    }

    /// One quiz item per word, in the same order as `words`.
    pub async fn generate(&self, words: &[String]) -> Result<Generated<Vec<QuizItem>>, CoreError> {
        let prompt = self.tutor.quiz_prompt(words);
        let expected = words.len();

        let endpoint = self.endpoint;
        let prompt = prompt.as_str();
        self.chain
            .run(|model| async move {
                let raw = endpoint.generate_json(&model, prompt).await?;
                parse_records::<QuizItem>(&raw, expected)
            })
            .await
    }
}
