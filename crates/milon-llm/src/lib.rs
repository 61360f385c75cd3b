pub mod gemini;

pub use gemini::GeminiClient;

pub type ModelId = String;

/// Structured (JSON) generation provider interface
#[async_trait::async_trait]
pub trait StructuredGenerator: Send + Sync {
    /// Ask `model` for a machine-parseable JSON answer to `prompt`.
    /// Returns the raw JSON text, unparsed.
    async fn generate_json(&self, model: &str, prompt: &str) -> Result<String, GenerateError>;

    /// Models this provider can currently serve
    async fn list_models(&self) -> Result<Vec<ModelId>, GenerateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded (429): {0}")]
    RateLimited(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GenerateError {
    /// Throttling signal, either typed or recognizable in the error text
    pub fn is_rate_limited(&self) -> bool {
        match self {
            GenerateError::RateLimited(_) => return true,
            // locally produced parse failures carry arbitrary positions
            GenerateError::InvalidResponse(_) => return false,
            _ => {}
        }
        let text = self.to_string();
        text.contains("429") || text.contains("RESOURCE_EXHAUSTED")
    }
}
