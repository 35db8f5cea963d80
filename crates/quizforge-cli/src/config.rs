//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizforge_store::ranking::DEFAULT_RANKING_LIMIT;

/// Top-level quizforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Directory where the leaderboard data lives.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Default number of leaderboard rows to show.
    #[serde(default = "default_ranking_limit")]
    pub ranking_limit: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./quizforge-data")
}

fn default_ranking_limit() -> usize {
    DEFAULT_RANKING_LIMIT
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            ranking_limit: default_ranking_limit(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else {
            home_config_path().filter(|p| p.exists())
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(QuizforgeConfig::default()),
    }
}

fn home_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge").join("config.toml"))
}
