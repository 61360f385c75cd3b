use serde::{Deserialize, Serialize};

fn default_window() -> usize {
    // one week of daily batches
    35
}

fn default_size() -> usize {
    3
}

fn default_pacing_ms() -> u64 {
    1500
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct QuizConfig {
    /// Sample only from this many most recent history entries
    #[serde(default = "default_window")]
    pub window: usize,
    /// Words quizzed per run
    #[serde(default = "default_size")]
    pub size: usize,
    /// Delay between a poll and its answer card
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            size: default_size(),
            pacing_ms: default_pacing_ms(),
        }
    }
}
