use std::time::Duration;

use milon_core::{Ack, DispatchError};
use milon_types::PollPayload;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Clone)]
pub struct TelegramClient {
    base_url: String,
    token: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramClient {
    pub fn new(base_url: String, token: String, chat_id: String) -> Self {
        Self {
            base_url,
            token,
            chat_id,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(
        base_url: String,
        token: String,
        chat_id: String,
        timeout: Duration,
    ) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Transport(e.without_url().to_string()))?;
        Ok(Self {
            base_url,
            token,
            chat_id,
            client,
        })
    }

    /// Post an HTML-formatted text message
    pub async fn post_html(&self, text: &str) -> Result<Ack, DispatchError> {
        let response = self
            .invoke("sendMessage", message_params(&self.chat_id, text))
            .await?;
        Ok(response.into_ack())
    }

    /// Post a quiz-type poll
    pub async fn post_quiz_poll(&self, poll: &PollPayload) -> Result<Ack, DispatchError> {
        let response = self
            .invoke("sendPoll", poll_params(&self.chat_id, poll))
            .await?;
        Ok(response.into_ack())
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url.trim_end_matches('/'),
            self.token,
            method
        )
    }

    /// Invoke a Bot API method.
    ///
    /// The envelope is decoded whatever the HTTP status, since Telegram
    /// reports failures as `{"ok": false, "description": ...}`.
    async fn invoke(
        &self,
        method: &'static str,
        params: Value,
    ) -> Result<TelegramResponse<SentMessage>, DispatchError> {
        tracing::debug!("Calling Telegram {}", method);

        // URLs carry the bot token, keep them out of errors
        let response = self
            .client
            .post(self.method_url(method))
            .json(&params)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        response
            .json::<TelegramResponse<SentMessage>>()
            .await
            .map_err(|e| {
                DispatchError::InvalidResponse(format!(
                    "{method} (HTTP {status}): {}",
                    e.without_url()
                ))
            })
    }
}

fn message_params(chat_id: &str, text: &str) -> Value {
    json!({
        "chat_id": chat_id,
        "text": text,
        "parse_mode": "HTML",
        "link_preview_options": { "is_disabled": true }
    })
}

fn poll_params(chat_id: &str, poll: &PollPayload) -> Value {
    let options: Vec<Value> = poll.options.iter().map(|o| json!({ "text": o })).collect();
    json!({
        "chat_id": chat_id,
        "question": poll.question,
        "options": options,
        "type": "quiz",
        "correct_option_id": poll.correct_option_id,
        "is_anonymous": true,
        "allows_multiple_answers": false
    })
}

#[derive(Deserialize)]
struct TelegramResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

#[derive(Deserialize)]
struct SentMessage {
    message_id: i64,
}

impl TelegramResponse<SentMessage> {
    fn into_ack(self) -> Ack {
        if self.ok {
            return Ack {
                ok: true,
                message_id: self.result.map(|m| m.message_id),
                description: None,
            };
        }

        let description = self
            .description
            .unwrap_or_else(|| "no description".to_string());
        Ack::rejected(match self.error_code {
            Some(code) => format!("{code}: {description}"),
            None => description,
        })
    }
}
