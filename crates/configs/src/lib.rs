use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

mod args;

pub use args::LaunchArgs;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Sampling parameters applied to the loaded model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default)]
    pub top_k: u32,
    #[serde(default)]
    pub presence_penalty: f32,
    #[serde(default = "default_frequency_penalty")]
    pub frequency_penalty: f32,
    #[serde(default = "default_penalty_decay")]
    pub penalty_decay: f32,
    #[serde(default)]
    pub global_penalty: bool,
    /// Optional path to a saved state file loaded alongside the model.
    #[serde(default)]
    pub state: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: 0,
            presence_penalty: 0.0,
            frequency_penalty: default_frequency_penalty(),
            penalty_decay: default_penalty_decay(),
            global_penalty: false,
            state: None,
        }
    }
}

fn default_max_tokens() -> u32 { 4100 }
fn default_temperature() -> f32 { 1.0 }
fn default_top_p() -> f32 { 0.3 }
fn default_frequency_penalty() -> f32 { 1.0 }
fn default_penalty_decay() -> f32 { 0.996 }

/// Blank `models_dir` is filled from `MODELS_DIR`, then `./models`, during
/// `normalize_and_validate`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub models_dir: String,
}

pub fn default_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&default_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).with_context(|| format!("cannot read {path}"))?;
    let cfg: AppConfig = toml::from_str(&content).with_context(|| format!("cannot parse {path}"))?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn load_file_and_validate(path: &str) -> Result<Self> {
        let mut cfg = load_from_file(path)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Resolve the startup config.
    ///
    /// An explicit path must load and validate. Without one, `CONFIG_PATH`
    /// (or `config.toml`) is used; only when that file does not exist are the
    /// defaults taken, still normalized against the environment.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file_and_validate(path);
        }
        let path = default_path();
        if !Path::new(&path).exists() {
            let mut cfg = Self::default();
            cfg.normalize_and_validate()?;
            return Ok(cfg);
        }
        Self::load_file_and_validate(&path)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize_from_env();
        self.model.normalize();
        self.model.validate()?;
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if self.models_dir.trim().is_empty() {
            self.models_dir = std::env::var("MODELS_DIR").unwrap_or_else(|_| "./models".to_string());
        }
    }
}

impl ModelConfig {
    fn normalize(&mut self) {
        if self.state.as_deref().is_some_and(|s| s.trim().is_empty()) {
            self.state = None;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_tokens == 0 {
            return Err(anyhow!("model.max_tokens must be >= 1"));
        }
        if !(0.0..=3.0).contains(&self.temperature) {
            return Err(anyhow!("model.temperature must be within 0..=3"));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(anyhow!("model.top_p must be within 0..=1"));
        }
        if !(-2.0..=2.0).contains(&self.presence_penalty) || !(-2.0..=2.0).contains(&self.frequency_penalty) {
            return Err(anyhow!("model penalties must be within -2..=2"));
        }
        if !(0.0..=1.0).contains(&self.penalty_decay) {
            return Err(anyhow!("model.penalty_decay must be within 0..=1"));
        }
        Ok(())
    }
}
