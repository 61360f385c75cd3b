use serde::{Deserialize, Serialize};

fn default_words_per_day() -> usize {
    5
}

fn default_level() -> String {
    "ADVANCED".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DailyConfig {
    #[serde(default = "default_words_per_day")]
    pub words_per_day: usize,
    /// Difficulty wording put into the prompt
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            words_per_day: default_words_per_day(),
            level: default_level(),
        }
    }
}
