//! Command handlers.

pub mod config;
pub mod extract;
pub mod generate;
pub mod mentor;
pub mod ping;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use cpx_core::config::Config;
use cpx_core::gemini::GeminiClient;

/// Reads a source file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .lock()
                .read_to_string(&mut buffer)
                .context("read stdin")?;
            Ok(buffer)
        }
    }
}

/// Builds the generation client. One process runs one command, so the
/// limiter constructed here is the process-wide one.
fn build_client(config: &Config) -> Result<GeminiClient> {
    let gemini = config.gemini_config()?;
    Ok(GeminiClient::new(
        gemini,
        config.backoff_policy(),
        Arc::new(config.rate_limiter()),
    ))
}
