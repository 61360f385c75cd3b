use std::time::Duration;

use milon_core::CoreError;
use milon_llm::GenerateError;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{Harness, RecordingDispatcher, ScriptedEndpoint, Sent, quiz_json, quiz_words};
use crate::jobs::handle_quiz;

fn answering() -> ScriptedEndpoint {
    ScriptedEndpoint::new(|_, prompt| Ok(quiz_json(prompt)))
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[tokio::test]
async fn test_empty_history_is_a_quiet_success() {
    let harness = Harness::new(answering(), Some(RecordingDispatcher::default()));

    let report = handle_quiz(&harness.state, &mut rng()).await.unwrap();

    assert!(report.sampled.is_empty());
    assert!(report.is_complete());
    assert!(harness.calls().is_empty());
    assert!(harness.sent().is_empty());
}

#[tokio::test]
async fn test_small_history_quizzes_every_word() {
    let harness = Harness::new(answering(), Some(RecordingDispatcher::default()));
    harness.seed_history(&["שָׁלוֹם", "סֵפֶר"]);
    let before = harness.history_bytes();

    let report = handle_quiz(&harness.state, &mut rng()).await.unwrap();

    let mut sampled = report.sampled.clone();
    sampled.sort();
    let mut expected = vec!["סֵפֶר".to_string(), "שָׁלוֹם".to_string()];
    expected.sort();
    assert_eq!(sampled, expected);
    assert_eq!(report.delivered, 2);
    assert!(report.is_complete());

    // quizzing never rewrites history
    assert_eq!(harness.history_bytes(), before);
}

#[tokio::test]
async fn test_each_poll_is_followed_by_its_answer_card() {
    let harness = Harness::new(answering(), Some(RecordingDispatcher::default()));
    harness.seed_history(&["א", "ב", "ג", "ד", "ה"]);

    let report = handle_quiz(&harness.state, &mut rng()).await.unwrap();
    assert_eq!(report.sampled.len(), 3);

    let sent = harness.sent();
    assert_eq!(sent.len(), 6);
    for (pair, word) in sent.chunks(2).zip(&report.sampled) {
        match pair {
            [Sent::Poll(poll), Sent::Spoiler(card)] => {
                assert!(poll.question.contains(word.as_str()));
                assert_eq!(poll.options.len(), 4);
                assert_eq!(
                    poll.options[poll.correct_option_id],
                    format!("meaning of {word}")
                );
                assert!(card.contains(&format!("Answer: {word}")));
                assert!(card.contains("<tg-spoiler>"));
            }
            other => panic!("unexpected posts: {:?}", other),
        }
    }

    assert_eq!(harness.pauses(), vec![Duration::from_millis(1500); 3]);
}

#[tokio::test]
async fn test_sample_comes_from_recent_window() {
    let harness = Harness::new(answering(), Some(RecordingDispatcher::default()));
    let old: Vec<String> = (0..10).map(|i| format!("ישן{i}")).collect();
    let recent: Vec<String> = (0..35).map(|i| format!("חדש{i}")).collect();
    let all: Vec<&str> = old.iter().chain(&recent).map(String::as_str).collect();
    harness.seed_history(&all);

    let report = handle_quiz(&harness.state, &mut rng()).await.unwrap();

    assert_eq!(report.sampled.len(), 3);
    assert!(report.sampled.iter().all(|w| recent.contains(w)));
}

#[tokio::test]
async fn test_rejected_poll_skips_its_card_only() {
    let harness = Harness::new(
        answering(),
        Some(RecordingDispatcher::rejecting_poll_for("ב")),
    );
    harness.seed_history(&["א", "ב"]);

    let report = handle_quiz(&harness.state, &mut rng()).await.unwrap();

    assert_eq!(report.delivered, 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "ב");
    assert!(!report.is_complete());

    let sent = harness.sent();
    assert_eq!(sent.len(), 2);
    assert!(matches!(&sent[0], Sent::Poll(poll) if poll.question.contains('א')));
    assert!(matches!(&sent[1], Sent::Spoiler(card) if card.contains("Answer: א")));
}

#[tokio::test]
async fn test_unreachable_channel_fails_every_item() {
    let harness = Harness::new(answering(), Some(RecordingDispatcher::unreachable()));
    harness.seed_history(&["א", "ב", "ג"]);

    let report = handle_quiz(&harness.state, &mut rng()).await.unwrap();

    assert_eq!(report.delivered, 0);
    assert_eq!(report.failed.len(), 3);
    assert!(harness.pauses().is_empty());
}

#[tokio::test]
async fn test_exhausted_chain_sends_nothing() {
    let endpoint = ScriptedEndpoint::new(|_, _| Err(GenerateError::RateLimited("quota".into())));
    let harness = Harness::new(endpoint, Some(RecordingDispatcher::default()));
    harness.seed_history(&["א"]);

    let err = handle_quiz(&harness.state, &mut rng()).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::GenerationExhausted { attempts }) if attempts.len() == 6
    ));
    assert!(harness.sent().is_empty());
    // cooldown between candidates, none after the last one
    assert_eq!(harness.pauses(), vec![Duration::from_secs(60); 5]);
}

#[tokio::test]
async fn test_prompt_names_sampled_words() {
    let harness = Harness::new(
        ScriptedEndpoint::new(|_, prompt| {
            assert_eq!(quiz_words(prompt).len(), 1);
            Ok(quiz_json(prompt))
        }),
        Some(RecordingDispatcher::default()),
    );
    harness.seed_history(&["מִלּוֹן", "מִלּוֹן"]);

    let report = handle_quiz(&harness.state, &mut rng()).await.unwrap();

    assert_eq!(report.sampled, vec!["מִלּוֹן".to_string()]);
}
