use milon_types::PollPayload;

use crate::error::DispatchError;

/// Chat API acknowledgement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub ok: bool,
    pub message_id: Option<i64>,
    /// Error detail when `ok` is false
    pub description: Option<String>,
}

impl Ack {
    pub fn delivered(message_id: i64) -> Self {
        Self {
            ok: true,
            message_id: Some(message_id),
            description: None,
        }
    }

    pub fn rejected(description: impl Into<String>) -> Self {
        Self {
            ok: false,
            message_id: None,
            description: Some(description.into()),
        }
    }

    /// Turn a negative acknowledgement into an error
    pub fn into_result(self, method: &'static str) -> Result<Ack, DispatchError> {
        if self.ok {
            return Ok(self);
        }
        Err(DispatchError::Rejected {
            method,
            description: self
                .description
                .unwrap_or_else(|| "no description".to_string()),
        })
    }
}

/// Delivery channel. Calls are not retried locally; failures go back to the
/// caller as is.
#[async_trait::async_trait]
pub trait ChannelDispatcher: Send + Sync {
    /// Post a formatted text message
    async fn send_message(&self, text: &str) -> Result<Ack, DispatchError>;

    /// Post an anonymous single-answer quiz poll
    async fn send_poll(&self, poll: &PollPayload) -> Result<Ack, DispatchError>;

    /// Post a message whose body is hidden until the reader reveals it
    async fn send_spoiler(&self, text: &str) -> Result<Ack, DispatchError>;
}
