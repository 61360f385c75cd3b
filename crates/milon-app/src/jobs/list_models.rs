use milon_llm::StructuredGenerator;

use crate::state::AppState;

/// Print the configured chain and the models the provider advertises
pub async fn handle_list_models(state: &AppState) -> anyhow::Result<()> {
    let metadata = state.endpoint.metadata();
    println!("Configured chain ({}):", metadata.name);
    for (position, model) in state.chain.models().iter().enumerate() {
        println!("  {}. {}", position + 1, model);
    }

    let available = state.endpoint.list_models().await?;
    println!("Available models:");
    for model in &available {
        let marker = if state.chain.models().contains(model) {
            "*"
        } else {
            " "
        };
        println!(" {marker} {model}");
    }

    Ok(())
}

/// Diagnostic for an exhausted chain. Failures here are only logged.
pub async fn log_available_models(endpoint: &dyn StructuredGenerator) {
    match endpoint.list_models().await {
        Ok(models) if models.is_empty() => {
            tracing::warn!("Provider lists no models supporting generation")
        }
        Ok(models) => tracing::info!("Available models: {}", models.join(", ")),
        Err(e) => tracing::warn!("Could not list models: {}", e),
    }
}
