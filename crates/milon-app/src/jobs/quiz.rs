use std::time::Duration;

use milon_core::format::{format_poll, format_spoiler};
use milon_core::sampling::{sample_quiz_words, shuffle_options};
use milon_core::{Labels, QuizGenerator};
use milon_types::QuizItem;
use rand::Rng;

use crate::state::AppState;

/// Outcome of a quiz run
#[derive(Debug, Default)]
pub struct QuizReport {
    pub sampled: Vec<String>,
    pub delivered: usize,
    /// (word, reason) for every item that did not go out completely
    pub failed: Vec<(String, String)>,
}

impl QuizReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Quiz the channel on recently taught words.
///
/// Each item is a poll followed by its answer card. Items are sent
/// independently: one failing does not stop the rest. History is never
/// modified here.
pub async fn handle_quiz<R: Rng + ?Sized>(
    state: &AppState,
    rng: &mut R,
) -> anyhow::Result<QuizReport> {
    let history = state.history.load()?;
    if history.is_empty() {
        tracing::info!("No history found, nothing to quiz on");
        return Ok(QuizReport::default());
    }

    let words = sample_quiz_words(
        &history,
        state.config.quiz.window,
        state.config.quiz.size,
        rng,
    );
    tracing::info!("Quizzing on {}", words.join(", "));

    let generator = QuizGenerator::new(
        state.endpoint.as_ref(),
        &state.chain,
        state.tutor.as_ref(),
    );
    let generated = generator.generate(&words).await?;
    tracing::info!(
        "Generated {} quiz items with {}",
        generated.value.len(),
        generated.model
    );

    let labels = state.tutor.labels();
    let mut report = QuizReport {
        sampled: words.clone(),
        ..QuizReport::default()
    };

    for (word, mut item) in words.iter().zip(generated.value) {
        shuffle_options(&mut item, rng);
        match send_item(state, word, &item, &labels).await {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                tracing::error!("Quiz for {} failed: {:#}", word, e);
                report.failed.push((word.clone(), format!("{e:#}")));
            }
        }
    }

    tracing::info!(
        "Quiz finished: {} delivered, {} failed",
        report.delivered,
        report.failed.len()
    );
    Ok(report)
}

/// Poll, pause, then the answer card. A rejected poll skips its card.
async fn send_item(
    state: &AppState,
    word: &str,
    item: &QuizItem,
    labels: &Labels,
) -> anyhow::Result<()> {
    let poll = format_poll(item)?;
    let spoiler = format_spoiler(word, &item.card, labels)?;

    let Some(dispatcher) = state.dispatcher.as_deref() else {
        println!("{}", poll.question);
        for (index, option) in poll.options.iter().enumerate() {
            let marker = if index == poll.correct_option_id { "*" } else { "-" };
            println!("  {marker} {option}");
        }
        println!("{spoiler}\n");
        return Ok(());
    };

    dispatcher
        .send_poll(&poll)
        .await
        .and_then(|ack| ack.into_result("sendPoll"))?;

    state
        .pacing
        .pause(Duration::from_millis(state.config.quiz.pacing_ms))
        .await;

    dispatcher
        .send_spoiler(&spoiler)
        .await
        .and_then(|ack| ack.into_result("sendMessage"))?;

    Ok(())
}
