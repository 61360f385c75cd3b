use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from("history.json")
}

fn default_exclusion_window() -> usize {
    50
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HistoryConfig {
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// How many recent words are sent to the model as an exclusion list
    #[serde(default = "default_exclusion_window")]
    pub exclusion_window: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            exclusion_window: default_exclusion_window(),
        }
    }
}
