//! Configuration management for cpx.
//!
//! Loads configuration from ${CPX_HOME}/config.toml with sensible defaults.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::gemini::{
    BackoffPolicy, DEFAULT_BASE_URL, DEFAULT_MODELS, GeminiConfig, RateLimiter, resolve_api_key,
    resolve_base_url,
};

/// Rate-limit and retry tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Rolling rate-limit window in seconds.
    pub window_secs: u64,
    /// Maximum calls inside the window.
    pub max_calls: usize,
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// First backoff step in milliseconds.
    pub base_delay_ms: u64,
    /// Backoff growth factor.
    pub backoff_multiplier: f64,
    /// Backoff ceiling in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_calls: 15,
            max_retries: 5,
            base_delay_ms: 2000,
            backoff_multiplier: 2.0,
            max_delay_ms: 60_000,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// API key for the Generative Language API. `GEMINI_API_KEY` is the
    /// fallback when unset.
    pub api_key: Option<String>,

    /// Override for the API base URL. `GEMINI_BASE_URL` wins over this.
    pub base_url: Option<String>,

    /// Candidate models, tried in order within one attempt. Empty means
    /// the built-in default chain.
    pub models: Vec<String>,

    /// Sampling temperature for code generation.
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub top_k: Option<u32>,
    pub max_output_tokens: Option<u32>,

    /// Rate-limit and retry tuning.
    pub limits: LimitsConfig,

    /// Per-language boilerplate overrides, keyed by language name
    /// (`cpp`, `python`, …). Unset languages use the built-in scaffolds.
    pub boilerplate: HashMap<String, String>,
}

impl Config {
    const DEFAULT_TEMPERATURE: f64 = 0.3;
    const DEFAULT_TOP_P: f64 = 0.9;
    const DEFAULT_TOP_K: u32 = 40;
    const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template, creating parent directories.
    /// Refuses to overwrite an existing file.
    ///
    /// # Errors
    /// Returns an error when the file exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        anyhow::ensure!(
            !path.exists(),
            "config already exists at {}",
            path.display()
        );
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Renders the effective configuration as TOML.
    ///
    /// # Errors
    /// Returns an error when serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Resolves the client configuration, combining file values with the
    /// environment.
    ///
    /// # Errors
    /// Returns an error when no API key is available or a base URL is
    /// malformed.
    pub fn gemini_config(&self) -> Result<GeminiConfig> {
        let api_key = resolve_api_key(self.api_key.as_deref(), "GEMINI_API_KEY")?;
        let base_url = resolve_base_url(
            self.base_url.as_deref(),
            "GEMINI_BASE_URL",
            DEFAULT_BASE_URL,
        )?;
        let models = if self.models.is_empty() {
            DEFAULT_MODELS.iter().map(ToString::to_string).collect()
        } else {
            self.models.clone()
        };

        Ok(GeminiConfig {
            api_key,
            base_url,
            models,
            temperature: self.temperature.unwrap_or(Self::DEFAULT_TEMPERATURE),
            top_p: self.top_p.unwrap_or(Self::DEFAULT_TOP_P),
            top_k: self.top_k.unwrap_or(Self::DEFAULT_TOP_K),
            max_output_tokens: self
                .max_output_tokens
                .unwrap_or(Self::DEFAULT_MAX_OUTPUT_TOKENS),
        })
    }

    /// Backoff policy from the limits section.
    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy {
            max_retries: self.limits.max_retries,
            base_delay: Duration::from_millis(self.limits.base_delay_ms),
            multiplier: self.limits.backoff_multiplier,
            max_delay: Duration::from_millis(self.limits.max_delay_ms),
            ..BackoffPolicy::default()
        }
    }

    /// Rate limiter from the limits section. Build once per process and
    /// share the handle.
    pub fn rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(
            Duration::from_secs(self.limits.window_secs),
            self.limits.max_calls,
        )
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for cpx configuration.
    //!
    //! CPX_HOME resolution order:
    //! 1. CPX_HOME environment variable (if set)
    //! 2. ~/.config/cpx (default)

    use std::path::PathBuf;

    /// Returns the cpx home directory.
    pub fn cpx_home() -> PathBuf {
        if let Ok(home) = std::env::var("CPX_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("cpx"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        cpx_home().join("config.toml")
    }
}
