use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read history {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history {path} is not a JSON list of words: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize history: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write history {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    #[error("nothing to format")]
    Empty,

    #[error("correct option {correct:?} is not among the poll options")]
    CorrectOptionMissing { correct: String },
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("chat API unreachable: {0}")]
    Transport(String),

    #[error("chat API rejected {method}: {description}")]
    Rejected {
        method: &'static str,
        description: String,
    },

    #[error("unexpected chat API response: {0}")]
    InvalidResponse(String),
}

/// One failed candidate model inside the fallback chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    pub model: String,
    pub reason: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("generation exhausted after {} candidate models: {}", attempts.len(), summarize(attempts))]
    GenerationExhausted { attempts: Vec<FailedAttempt> },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

fn summarize(attempts: &[FailedAttempt]) -> String {
    if attempts.is_empty() {
        return "no candidates configured".to_string();
    }
    attempts
        .iter()
        .map(|a| format!("{} ({})", a.model, a.reason))
        .collect::<Vec<_>>()
        .join("; ")
}
