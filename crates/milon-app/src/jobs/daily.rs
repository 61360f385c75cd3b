use anyhow::Context;
use milon_core::format::format_daily;
use milon_core::{ContentGenerator, CoreError};

use super::log_available_models;
use crate::state::AppState;

/// Generate today's words, post them as one digest, then record them.
///
/// History is written only after the channel acknowledged the post, so a
/// failed run leaves the file untouched and the words can come up again.
pub async fn handle_daily(state: &AppState) -> anyhow::Result<()> {
    let mut history = state.history.load()?;
    tracing::info!(
        "Loaded {} history entries from {}",
        history.len(),
        state.history.path().display()
    );

    let generator = ContentGenerator::new(
        state.endpoint.as_ref(),
        &state.chain,
        state.tutor.as_ref(),
        state.config.history.exclusion_window,
    );

    let generated = match generator
        .generate(&history, state.config.daily.words_per_day)
        .await
    {
        Ok(generated) => generated,
        Err(e @ CoreError::GenerationExhausted { .. }) => {
            log_available_models(state.endpoint.as_ref()).await;
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(
        "Generated {} words with {}",
        generated.value.len(),
        generated.model
    );

    let message = format_daily(&generated.value, &state.tutor.labels())?;

    let Some(dispatcher) = state.dispatcher.as_deref() else {
        println!("{message}");
        tracing::info!("Dry run, history left unchanged");
        return Ok(());
    };

    tracing::info!("Sending daily digest");
    let ack = dispatcher
        .send_message(&message)
        .await
        .and_then(|ack| ack.into_result("sendMessage"))
        .context("daily digest was not delivered")?;
    tracing::info!("Digest delivered (message id {:?})", ack.message_id);

    history.extend(generated.value.into_iter().map(|item| item.word));
    state.history.save(&history)?;
    tracing::info!("History now holds {} entries", history.len());

    Ok(())
}
