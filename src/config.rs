use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::CutupError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub lyrics: LyricsConfig,
    #[serde(default)]
    pub generate: GenerateConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LyricsConfig {
    pub dir: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.txt".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerateConfig {
    #[serde(default = "default_count")]
    pub default_count: usize,
    #[serde(default = "default_max_count")]
    pub max_count: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            max_count: default_max_count(),
        }
    }
}

fn default_count() -> usize {
    50
}
fn default_max_count() -> usize {
    100
}

impl GenerateConfig {
    /// Boundary policy for externally supplied counts: absent → default,
    /// above `max_count` → clamped, negative → rejected.
    pub fn resolve_count(&self, requested: Option<i64>) -> Result<usize, CutupError> {
        match requested {
            None => Ok(self.default_count),
            Some(n) if n < 0 => Err(CutupError::InvalidRequest(format!(
                "count must be non-negative, got {}",
                n
            ))),
            Some(n) => Ok((n as usize).min(self.max_count)),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.generate.max_count < 1 {
        anyhow::bail!("generate.max_count must be >= 1");
    }

    if config.generate.default_count > config.generate.max_count {
        anyhow::bail!(
            "generate.default_count ({}) must not exceed generate.max_count ({})",
            config.generate.default_count,
            config.generate.max_count
        );
    }

    if config.lyrics.include_globs.is_empty() {
        anyhow::bail!("lyrics.include_globs must not be empty");
    }

    Ok(config)
}
