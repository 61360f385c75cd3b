use std::time::Duration;

use milon_core::{CoreError, DispatchError};
use milon_llm::GenerateError;

use super::{Harness, RecordingDispatcher, ScriptedEndpoint, Sent, vocabulary_json};
use crate::jobs::handle_daily;

const WORDS: [&str; 5] = ["שָׁלוֹם", "סֵפֶר", "בַּיִת", "מַיִם", "לֶחֶם"];

fn answering() -> ScriptedEndpoint {
    ScriptedEndpoint::new(|_, _| Ok(vocabulary_json(&WORDS)))
}

#[tokio::test]
async fn test_delivered_digest_extends_history() {
    let harness = Harness::new(answering(), Some(RecordingDispatcher::default()));
    harness.seed_history(&["א", "ב"]);

    handle_daily(&harness.state).await.unwrap();

    let history = harness.state.history.load().unwrap();
    assert_eq!(history.len(), 7);
    assert_eq!(&history[..2], &["א".to_string(), "ב".to_string()]);
    assert_eq!(&history[2..], &WORDS.map(String::from));

    let sent = harness.sent();
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        Sent::Message(text) => {
            assert!(text.starts_with("📚 <b>Daily Hebrew Vocabulary"));
            assert!(text.contains("שָׁלוֹם"));
            assert!(text.contains("meaning of לֶחֶם"));
        }
        other => panic!("unexpected post: {:?}", other),
    }
}

#[tokio::test]
async fn test_first_run_creates_history_file() {
    let harness = Harness::new(answering(), Some(RecordingDispatcher::default()));
    assert!(!harness.state.history.path().exists());

    handle_daily(&harness.state).await.unwrap();

    assert_eq!(harness.state.history.load().unwrap().len(), 5);
}

#[tokio::test]
async fn test_rejected_digest_leaves_history_untouched() {
    let harness = Harness::new(answering(), Some(RecordingDispatcher::rejecting_messages()));
    harness.seed_history(&["א", "ב"]);
    let before = harness.history_bytes();

    let err = handle_daily(&harness.state).await.unwrap_err();

    match err.downcast_ref::<DispatchError>() {
        Some(DispatchError::Rejected { method, .. }) => assert_eq!(*method, "sendMessage"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(harness.history_bytes(), before);
}

#[tokio::test]
async fn test_unreachable_channel_leaves_history_untouched() {
    let harness = Harness::new(answering(), Some(RecordingDispatcher::unreachable()));
    harness.seed_history(&["א"]);
    let before = harness.history_bytes();

    assert!(handle_daily(&harness.state).await.is_err());
    assert_eq!(harness.history_bytes(), before);
}

#[tokio::test]
async fn test_exhausted_chain_posts_nothing() {
    let harness = Harness::new(ScriptedEndpoint::failing(), Some(RecordingDispatcher::default()));
    harness.seed_history(&["א"]);
    let before = harness.history_bytes();

    let err = handle_daily(&harness.state).await.unwrap_err();

    match err.downcast_ref::<CoreError>() {
        Some(CoreError::GenerationExhausted { attempts }) => assert_eq!(attempts.len(), 6),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(harness.sent().is_empty());
    assert_eq!(harness.history_bytes(), before);
}

#[tokio::test]
async fn test_exhaustion_lists_available_models() {
    let endpoint = ScriptedEndpoint::failing();
    let harness = Harness::new(endpoint, Some(RecordingDispatcher::default()));

    assert!(handle_daily(&harness.state).await.is_err());

    assert_eq!(harness.listings(), 1);
}

#[tokio::test]
async fn test_rate_limited_model_falls_back_after_cooldown() {
    let endpoint = ScriptedEndpoint::new(|model, _| {
        if model == "gemini-2.5-flash-lite" {
            Err(GenerateError::RateLimited("quota exceeded".into()))
        } else {
            Ok(vocabulary_json(&WORDS))
        }
    });
    let harness = Harness::new(endpoint, Some(RecordingDispatcher::default()));

    handle_daily(&harness.state).await.unwrap();

    assert_eq!(harness.calls(), vec!["gemini-2.5-flash-lite", "gemini-2.5-flash"]);
    assert_eq!(harness.pauses(), vec![Duration::from_secs(60)]);
    assert_eq!(harness.sent().len(), 1);
}

#[tokio::test]
async fn test_short_batch_is_rejected_and_next_model_tried() {
    let endpoint = ScriptedEndpoint::new(|model, _| {
        if model == "gemini-2.5-flash-lite" {
            Ok(vocabulary_json(&WORDS[..4]))
        } else {
            Ok(format!("```json\n{}\n```", vocabulary_json(&WORDS)))
        }
    });
    let harness = Harness::new(endpoint, Some(RecordingDispatcher::default()));

    handle_daily(&harness.state).await.unwrap();

    assert_eq!(harness.calls().len(), 2);
    assert!(harness.pauses().is_empty());
    assert_eq!(harness.state.history.load().unwrap().len(), 5);
}

#[tokio::test]
async fn test_dry_run_prints_without_recording() {
    let harness = Harness::new(answering(), None);
    harness.seed_history(&["א", "ב"]);
    let before = harness.history_bytes();

    handle_daily(&harness.state).await.unwrap();

    assert_eq!(harness.history_bytes(), before);
}
