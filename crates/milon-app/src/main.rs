use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use milon_config::Config;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

pub mod jobs;
pub mod state;

#[cfg(test)]
mod tests;

use self::state::AppState;

/// Hebrew vocabulary bot: posts daily words or a quiz on recent ones
#[derive(Parser, Debug)]
#[command(name = "milon")]
#[command(version)]
struct Cli {
    /// Quiz the channel on recent words instead of posting new ones
    #[arg(long)]
    quiz: bool,

    /// Optional JSON config file, overridden by the environment
    #[arg(long, env = "MILON_CONFIG")]
    config: Option<PathBuf>,

    /// History file location
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Print to stdout instead of posting; history is not modified
    #[arg(long)]
    dry_run: bool,

    /// Show the model chain and what the provider offers, then exit
    #[arg(long, conflicts_with = "quiz")]
    list_models: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.history_file {
        config.history.path = path;
    }

    let with_channel = !(cli.dry_run || cli.list_models);
    config
        .validate(with_channel)
        .context("invalid configuration")?;

    let state = AppState::from_config(config, with_channel)?;

    if cli.list_models {
        return jobs::handle_list_models(&state).await;
    }

    if cli.quiz {
        let mut rng = StdRng::from_entropy();
        let report = jobs::handle_quiz(&state, &mut rng).await?;
        if !report.is_complete() {
            anyhow::bail!(
                "{} of {} quiz items failed",
                report.failed.len(),
                report.sampled.len()
            );
        }
        return Ok(());
    }

    jobs::handle_daily(&state).await
}
