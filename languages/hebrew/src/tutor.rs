use milon_core::language::{Labels, LanguageTutor};
use milon_core::preprocess::Preprocessor;

use crate::niqqud::strip_niqqud;

const VOCABULARY_SCHEMA: &str = r#"[
    {
        "word": "Hebrew word with full niqqud",
        "transliteration": "Latin transliteration",
        "part_of_speech": "Part of speech",
        "definition": "English definition and explanation",
        "example_hebrew": "Example sentence in Hebrew",
        "example_transliteration": "Example sentence transliteration",
        "example_translation": "Example sentence English translation"
    }
]"#;

const QUIZ_SCHEMA: &str = r#"[
    {
        "question": "What is the meaning of '<word>'?",
        "correct_option": "The correct definition",
        "options": ["The correct definition", "Distractor 1", "Distractor 2", "Distractor 3"],
        "card": {
            "transliteration": "Latin transliteration of the word",
            "part_of_speech": "Part of speech",
            "definition": "The correct definition, restated",
            "example_hebrew": "Example sentence in Hebrew",
            "example_translation": "Example sentence English translation"
        }
    }
]"#;

/// Hebrew vocabulary tutor
pub struct HebrewTutor {
    level: String,
}

impl HebrewTutor {
    /// Difficulty wording used in the prompt ("BEGINNER", "INTERMEDIATE", ...)
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
        }
    }
}

impl Preprocessor for HebrewTutor {
    fn process(&self, text: &str) -> String {
        strip_niqqud(text)
    }
}

impl LanguageTutor for HebrewTutor {
    fn vocabulary_prompt(&self, exclusions: &[String], count: usize) -> String {
        let excluded = serde_json::to_string(exclusions).unwrap_or_else(|_| "[]".to_string());

        format!(
            "You are a helpful Hebrew tutor. Generate {count} {level} Hebrew words.\n\
             \n\
             Rules:\n\
             1. The words must be different from these previously used words: {excluded}\n\
             2. Return exactly {count} objects, formatted exactly as the schema below.\n\
             3. Include transliteration, part of speech, an English definition with explanation, \
             and an example sentence with its transliteration and translation.\n\
             4. The \"word\" field must contain the Hebrew word with full niqqud.\n\
             \n\
             Output format (JSON list of objects):\n\
             {VOCABULARY_SCHEMA}\n\
             \n\
             Respond with valid JSON only.",
            level = self.level,
        )
    }

    fn quiz_prompt(&self, words: &[String]) -> String {
        let listed = serde_json::to_string(words).unwrap_or_else(|_| "[]".to_string());
        let count = words.len();

        format!(
            "Create a multiple-choice quiz for each of these {count} Hebrew words, in this order: {listed}\n\
             \n\
             For every word:\n\
             1. Provide the CORRECT English definition as \"correct_option\".\n\
             2. Provide 3 PLAUSIBLE but INCORRECT English definitions (distractors).\n\
             3. \"options\" MUST contain the correct definition exactly once plus the 3 distractors, \
             each at most 100 characters.\n\
             4. \"card\" describes the word; its definition must state the same meaning as \"correct_option\".\n\
             \n\
             Output format (JSON list with exactly {count} objects, one per word, same order):\n\
             {QUIZ_SCHEMA}\n\
             \n\
             Respond with valid JSON only."
        )
    }

    fn labels(&self) -> Labels {
        Labels {
            digest_title: "Daily Hebrew Vocabulary 🇮🇱".to_string(),
            part_of_speech: "Part of Speech".to_string(),
            definition: "Definition".to_string(),
            example: "Example".to_string(),
            source_marker: "🇮🇱".to_string(),
            transliteration_marker: "🔤".to_string(),
            translation_marker: "🇬🇧".to_string(),
            separator: "〰️〰️〰️〰️〰️".to_string(),
            answer: "Answer".to_string(),
        }
    }
}
