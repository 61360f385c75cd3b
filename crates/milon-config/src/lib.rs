use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::daily::DailyConfig;
use self::generator::GeneratorConfig;
use self::history::HistoryConfig;
use self::quiz::QuizConfig;
use self::telegram::TelegramConfig;

pub mod daily;
pub mod generator;
pub mod history;
pub mod quiz;
pub mod telegram;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub generator: GeneratorConfig,
    pub history: HistoryConfig,
    pub daily: DailyConfig,
    pub quiz: QuizConfig,
}

impl Config {
    /// Defaults, then the optional JSON file, then the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override fields from environment-style lookups
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = v;
        }
        if let Some(v) = get("TELEGRAM_CHAT_ID") {
            self.telegram.chat_id = v;
        }
        if let Some(v) = get("TELEGRAM_API_URL") {
            self.telegram.api_url = v;
        }
        if let Some(v) = get("GEMINI_API_KEY") {
            self.generator.api_key = v;
        }
        if let Some(v) = get("GEMINI_API_URL") {
            self.generator.api_url = v;
        }
        if let Some(v) = get("GEMINI_MODELS") {
            self.generator.models = v
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(v) = get("RATE_LIMIT_COOLDOWN_SECS") {
            self.generator.cooldown_secs = parse("RATE_LIMIT_COOLDOWN_SECS", &v)?;
        }
        if let Some(v) = get("TIMEOUT_SECONDS") {
            let timeout = parse("TIMEOUT_SECONDS", &v)?;
            self.generator.timeout_seconds = timeout;
            self.telegram.timeout_seconds = timeout;
        }
        if let Some(v) = get("HISTORY_FILE") {
            self.history.path = PathBuf::from(v);
        }
        if let Some(v) = get("EXCLUSION_WINDOW") {
            self.history.exclusion_window = parse("EXCLUSION_WINDOW", &v)?;
        }
        if let Some(v) = get("WORDS_PER_DAY") {
            self.daily.words_per_day = parse("WORDS_PER_DAY", &v)?;
        }
        if let Some(v) = get("WORDS_LEVEL") {
            self.daily.level = v.trim().to_uppercase();
        }
        if let Some(v) = get("QUIZ_WINDOW") {
            self.quiz.window = parse("QUIZ_WINDOW", &v)?;
        }
        if let Some(v) = get("QUIZ_SIZE") {
            self.quiz.size = parse("QUIZ_SIZE", &v)?;
        }
        if let Some(v) = get("QUIZ_PACING_MS") {
            self.quiz.pacing_ms = parse("QUIZ_PACING_MS", &v)?;
        }

        Ok(())
    }

    /// Check required settings before any network activity.
    ///
    /// Channel credentials are only required when something will be posted.
    pub fn validate(&self, require_channel: bool) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if require_channel {
            if self.telegram.bot_token.trim().is_empty() {
                missing.push("TELEGRAM_BOT_TOKEN");
            }
            if self.telegram.chat_id.trim().is_empty() {
                missing.push("TELEGRAM_CHAT_ID");
            }
        }
        if self.generator.api_key.trim().is_empty() {
            missing.push("GEMINI_API_KEY");
        }
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        if self.generator.models.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "GEMINI_MODELS",
                value: String::new(),
            });
        }
        let counts = [
            ("WORDS_PER_DAY", self.daily.words_per_day),
            ("QUIZ_WINDOW", self.quiz.window),
            ("QUIZ_SIZE", self.quiz.size),
        ];
        for (key, value) in counts {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
