mod client;

pub use client::TelegramClient;

use milon_core::{Ack, ChannelDispatcher, DispatchError};
use milon_types::PollPayload;

#[async_trait::async_trait]
impl ChannelDispatcher for TelegramClient {
    async fn send_message(&self, text: &str) -> Result<Ack, DispatchError> {
        self.post_html(text).await
    }

    async fn send_poll(&self, poll: &PollPayload) -> Result<Ack, DispatchError> {
        self.post_quiz_poll(poll).await
    }

    /// Spoiler markup (`<tg-spoiler>`) is part of the HTML body
    async fn send_spoiler(&self, text: &str) -> Result<Ack, DispatchError> {
        self.post_html(text).await
    }
}
