use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::{GenerateError, ModelId, ProviderMetadata, StructuredGenerator};

/// Google Gemini REST client (`generateContent` with a JSON response type)
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }

    pub fn with_timeout(
        api_key: String,
        api_url: String,
        timeout: Duration,
    ) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            api_url,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl StructuredGenerator for GeminiClient {
    async fn generate_json(&self, model: &str, prompt: &str) -> Result<String, GenerateError> {
        if self.api_key.is_empty() {
            return Err(GenerateError::AuthenticationError("no API key".to_string()));
        }

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        let response = self
            .client
            .post(self.endpoint(&format!("models/{model}:generateContent")))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            GenerateError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        candidate_text(parsed)
    }

    async fn list_models(&self) -> Result<Vec<ModelId>, GenerateError> {
        if self.api_key.is_empty() {
            return Err(GenerateError::AuthenticationError("no API key".to_string()));
        }

        let response = self
            .client
            .get(self.endpoint("models"))
            .header("x-goog-api-key", &self.api_key)
            .query(&[("pageSize", "1000")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), text));
        }

        let parsed: ListModelsResponse = response.json().await.map_err(|e| {
            GenerateError::InvalidResponse(format!("Failed to parse model list: {}", e))
        })?;

        Ok(generating_models(parsed))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
        }
    }
}

fn classify_status(status: u16, body: String) -> GenerateError {
    match status {
        429 => GenerateError::RateLimited(body),
        401 | 403 => GenerateError::AuthenticationError(format!("HTTP {status}: {body}")),
        _ => GenerateError::Api { status, body },
    }
}

fn candidate_text(response: GenerateContentResponse) -> Result<String, GenerateError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerateError::EmptyResponse(format!(
            "prompt blocked: {reason}"
        )));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenerateError::EmptyResponse("no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(GenerateError::EmptyResponse(format!(
            "no text in candidate (finish reason: {reason})"
        )));
    }

    Ok(text)
}

fn generating_models(response: ListModelsResponse) -> Vec<ModelId> {
    response
        .models
        .into_iter()
        .filter(|m| {
            m.supported_generation_methods
                .iter()
                .any(|method| method == "generateContent")
        })
        .map(|m| {
            m.name
                .strip_prefix("models/")
                .map(String::from)
                .unwrap_or(m.name)
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}
