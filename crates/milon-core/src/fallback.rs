use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use milon_llm::GenerateError;

use crate::error::{CoreError, FailedAttempt};

/// What to do after a candidate fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Throttled: wait out the cooldown before the next candidate
    Cooldown,
    /// Move on to the next candidate right away
    Immediate,
}

pub type Classifier = fn(&GenerateError) -> FailureClass;

pub fn classify_rate_limit(err: &GenerateError) -> FailureClass {
    if err.is_rate_limited() {
        FailureClass::Cooldown
    } else {
        FailureClass::Immediate
    }
}

/// Blocking pause between candidates
#[async_trait::async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

pub struct TokioPause;

#[async_trait::async_trait]
impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// A value produced by one of the candidate models
#[derive(Debug, Clone)]
pub struct Generated<T> {
    pub model: String,
    pub value: T,
}

/// Ordered list of candidate models tried one after another until one
/// produces a usable answer.
///
/// The cooldown is global: it is applied before the next candidate even
/// though that candidate is a different model.
pub struct FallbackChain {
    models: Vec<String>,
    cooldown: Duration,
    classify: Classifier,
    pause: Arc<dyn Pause>,
}

impl FallbackChain {
    pub fn new(models: Vec<String>, cooldown: Duration) -> Self {
        Self {
            models,
            cooldown,
            classify: classify_rate_limit,
            pause: Arc::new(TokioPause),
        }
    }

    pub fn with_classifier(mut self, classify: Classifier) -> Self {
        self.classify = classify;
        self
    }

    pub fn with_pause(mut self, pause: Arc<dyn Pause>) -> Self {
        self.pause = pause;
        self
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Call `attempt` with each model in order and return the first success.
    ///
    /// `attempt` covers the whole round trip including parsing and schema
    /// checks, so a malformed answer counts as a failed candidate.
    pub async fn run<T, F, Fut>(&self, mut attempt: F) -> Result<Generated<T>, CoreError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, GenerateError>>,
    {
        let mut failures = Vec::with_capacity(self.models.len());

        for (index, model) in self.models.iter().enumerate() {
            tracing::info!("Attempting to generate with model: {}", model);

            let error = match attempt(model.clone()).await {
                Ok(value) => {
                    tracing::info!("Model {} succeeded", model);
                    return Ok(Generated {
                        model: model.clone(),
                        value,
                    });
                }
                Err(e) => e,
            };

            tracing::warn!("Model {} failed: {}", model, error);
            let class = (self.classify)(&error);
            failures.push(FailedAttempt {
                model: model.clone(),
                reason: error.to_string(),
            });

            let has_next = index + 1 < self.models.len();
            if class == FailureClass::Cooldown && has_next {
                tracing::warn!(
                    "Rate limit encountered. Waiting {}s before next model...",
                    self.cooldown.as_secs()
                );
                self.pause.pause(self.cooldown).await;
            }
        }

        tracing::error!("All {} candidate models failed", failures.len());
        Err(CoreError::GenerationExhausted { attempts: failures })
    }
}
