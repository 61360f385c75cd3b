use std::sync::{Arc, Mutex};
use std::time::Duration;

use milon_config::Config;
use milon_core::{Ack, ChannelDispatcher, DispatchError, Pause};
use milon_lang_hebrew::HebrewTutor;
use milon_llm::{GenerateError, ModelId, ProviderMetadata, StructuredGenerator};
use milon_types::PollPayload;
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::state::AppState;

mod daily_tests;
mod quiz_tests;

type Responder = Box<dyn Fn(&str, &str) -> Result<String, GenerateError> + Send + Sync>;

/// Generation endpoint answering through a closure of (model, prompt)
pub struct ScriptedEndpoint {
    respond: Responder,
    models: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub listings: Arc<Mutex<usize>>,
}

impl ScriptedEndpoint {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str, &str) -> Result<String, GenerateError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            models: vec!["gemini-2.5-flash".to_string()],
            calls: Arc::default(),
            listings: Arc::default(),
        }
    }

    /// Every model fails with a server error
    pub fn failing() -> Self {
        Self::new(|_, _| {
            Err(GenerateError::Api {
                status: 500,
                body: "internal".into(),
            })
        })
    }
}

#[async_trait::async_trait]
impl StructuredGenerator for ScriptedEndpoint {
    async fn generate_json(&self, model: &str, prompt: &str) -> Result<String, GenerateError> {
        self.calls.lock().unwrap().push(model.to_string());
        (self.respond)(model, prompt)
    }

    async fn list_models(&self) -> Result<Vec<ModelId>, GenerateError> {
        *self.listings.lock().unwrap() += 1;
        Ok(self.models.clone())
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "scripted".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Message(String),
    Poll(PollPayload),
    Spoiler(String),
}

/// Records every post. Messages and polls can be made to fail.
#[derive(Default)]
pub struct RecordingDispatcher {
    pub sent: Arc<Mutex<Vec<Sent>>>,
    reject_messages: bool,
    unreachable: bool,
    /// Polls whose question mentions this text are rejected
    reject_poll_for: Option<String>,
}

impl RecordingDispatcher {
    pub fn rejecting_messages() -> Self {
        Self {
            reject_messages: true,
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn rejecting_poll_for(word: &str) -> Self {
        Self {
            reject_poll_for: Some(word.to_string()),
            ..Self::default()
        }
    }

    fn record(&self, sent: Sent) -> i64 {
        let mut log = self.sent.lock().unwrap();
        log.push(sent);
        log.len() as i64
    }
}

#[async_trait::async_trait]
impl ChannelDispatcher for RecordingDispatcher {
    async fn send_message(&self, text: &str) -> Result<Ack, DispatchError> {
        if self.unreachable {
            return Err(DispatchError::Transport("connection refused".into()));
        }
        if self.reject_messages {
            return Ok(Ack::rejected("400: Bad Request: chat not found"));
        }
        Ok(Ack::delivered(self.record(Sent::Message(text.to_string()))))
    }

    async fn send_poll(&self, poll: &PollPayload) -> Result<Ack, DispatchError> {
        if self.unreachable {
            return Err(DispatchError::Transport("connection refused".into()));
        }
        if let Some(word) = &self.reject_poll_for {
            if poll.question.contains(word.as_str()) {
                return Ok(Ack::rejected("400: Bad Request: poll options are too long"));
            }
        }
        Ok(Ack::delivered(self.record(Sent::Poll(poll.clone()))))
    }

    async fn send_spoiler(&self, text: &str) -> Result<Ack, DispatchError> {
        if self.unreachable {
            return Err(DispatchError::Transport("connection refused".into()));
        }
        Ok(Ack::delivered(self.record(Sent::Spoiler(text.to_string()))))
    }
}

#[derive(Default)]
pub struct RecordingPause {
    pub pauses: Arc<Mutex<Vec<Duration>>>,
}

#[async_trait::async_trait]
impl Pause for RecordingPause {
    async fn pause(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}

pub struct Harness {
    _dir: TempDir,
    pub state: AppState,
    pub sent: Arc<Mutex<Vec<Sent>>>,
    pub pauses: Arc<Mutex<Vec<Duration>>>,
    calls: Arc<Mutex<Vec<String>>>,
    listings: Arc<Mutex<usize>>,
}

impl Harness {
    pub fn new(endpoint: ScriptedEndpoint, dispatcher: Option<RecordingDispatcher>) -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.history.path = dir.path().join("history.json");

        let sent = dispatcher
            .as_ref()
            .map(|d| d.sent.clone())
            .unwrap_or_default();
        let pause = RecordingPause::default();
        let pauses = pause.pauses.clone();
        let calls = endpoint.calls.clone();
        let listings = endpoint.listings.clone();

        let state = AppState::new(
            config,
            Box::new(endpoint),
            dispatcher.map(|d| Box::new(d) as Box<dyn ChannelDispatcher>),
            Box::new(HebrewTutor::with_level("ADVANCED")),
            Arc::new(pause),
        );

        Self {
            _dir: dir,
            state,
            sent,
            pauses,
            calls,
            listings,
        }
    }

    pub fn seed_history(&self, words: &[&str]) {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        self.state.history.save(&words).unwrap();
    }

    pub fn history_bytes(&self) -> Vec<u8> {
        std::fs::read(self.state.history.path()).unwrap()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }

    /// Models asked to generate, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn listings(&self) -> usize {
        *self.listings.lock().unwrap()
    }
}

pub fn vocabulary_json(words: &[&str]) -> String {
    let items: Vec<Value> = words
        .iter()
        .map(|w| {
            json!({
                "word": w,
                "transliteration": format!("translit {w}"),
                "part_of_speech": "Noun",
                "definition": format!("meaning of {w}"),
                "example_hebrew": format!("{w} טוב"),
                "example_transliteration": "tov",
                "example_translation": "good",
            })
        })
        .collect();
    Value::Array(items).to_string()
}

/// Words a quiz prompt asks about, in prompt order
pub fn quiz_words(prompt: &str) -> Vec<String> {
    let start = prompt.find("in this order: ").unwrap() + "in this order: ".len();
    let line = prompt[start..].lines().next().unwrap();
    serde_json::from_str(line).unwrap()
}

/// A well-formed quiz answer for whatever words the prompt names
pub fn quiz_json(prompt: &str) -> String {
    let items: Vec<Value> = quiz_words(prompt)
        .iter()
        .map(|w| {
            let correct = format!("meaning of {w}");
            json!({
                "question": format!("What is the meaning of '{w}'?"),
                "correct_option": correct,
                "options": [correct, "a distractor", "another distractor", "a third distractor"],
                "card": {
                    "transliteration": format!("translit {w}"),
                    "part_of_speech": "Noun",
                    "definition": correct,
                    "example_hebrew": format!("{w} טוב"),
                    "example_translation": "good",
                }
            })
        })
        .collect();
    Value::Array(items).to_string()
}
