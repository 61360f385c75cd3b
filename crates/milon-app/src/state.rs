use std::sync::Arc;
use std::time::Duration;

use milon_config::Config;
use milon_core::{ChannelDispatcher, FallbackChain, HistoryStore, LanguageTutor, Pause, TokioPause};
use milon_lang_hebrew::HebrewTutor;
use milon_llm::{GeminiClient, StructuredGenerator};
use milon_telegram::TelegramClient;

/// Everything a single run needs
pub struct AppState {
    pub config: Config,
    pub history: HistoryStore,
    pub endpoint: Box<dyn StructuredGenerator>,
    /// `None` previews output on stdout instead of posting it
    pub dispatcher: Option<Box<dyn ChannelDispatcher>>,
    pub tutor: Box<dyn LanguageTutor>,
    pub chain: FallbackChain,
    /// Spacing between a quiz poll and its answer card
    pub pacing: Arc<dyn Pause>,
}

impl AppState {
    pub fn new(
        config: Config,
        endpoint: Box<dyn StructuredGenerator>,
        dispatcher: Option<Box<dyn ChannelDispatcher>>,
        tutor: Box<dyn LanguageTutor>,
        pause: Arc<dyn Pause>,
    ) -> Self {
        let chain = FallbackChain::new(
            config.generator.models.clone(),
            Duration::from_secs(config.generator.cooldown_secs),
        )
        .with_pause(pause.clone());

        Self {
            history: HistoryStore::new(config.history.path.clone()),
            config,
            endpoint,
            dispatcher,
            tutor,
            chain,
            pacing: pause,
        }
    }

    /// Wire the production clients. The channel is only built when posting.
    pub fn from_config(config: Config, with_channel: bool) -> anyhow::Result<Self> {
        let endpoint = GeminiClient::with_timeout(
            config.generator.api_key.clone(),
            config.generator.api_url.clone(),
            Duration::from_secs(config.generator.timeout_seconds),
        )?;

        let dispatcher: Option<Box<dyn ChannelDispatcher>> = if with_channel {
            Some(Box::new(TelegramClient::with_timeout(
                config.telegram.api_url.clone(),
                config.telegram.bot_token.clone(),
                config.telegram.chat_id.clone(),
                Duration::from_secs(config.telegram.timeout_seconds),
            )?))
        } else {
            tracing::info!("No channel configured, output goes to stdout");
            None
        };

        let tutor = HebrewTutor::with_level(config.daily.level.clone());

        Ok(Self::new(
            config,
            Box::new(endpoint),
            dispatcher,
            Box::new(tutor),
            Arc::new(TokioPause),
        ))
    }
}
