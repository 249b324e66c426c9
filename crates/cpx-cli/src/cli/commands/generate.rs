//! Generate command handler.

use std::path::Path;

use anyhow::{Context, Result};
use cpx_core::boilerplate;
use cpx_core::config::Config;
use cpx_core::gemini::SanitizeMode;
use cpx_core::platform;
use cpx_core::problem::Language;
use cpx_core::prompts;
use cpx_core::validate::validate_driver_code;

pub async fn run(
    config: &Config,
    language: Language,
    input: Option<&Path>,
    boilerplate_file: Option<&Path>,
    url: Option<&str>,
) -> Result<()> {
    let page = super::read_input(input)?;
    anyhow::ensure!(!page.trim().is_empty(), "problem page is empty");

    let scaffold = match boilerplate_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read boilerplate from {}", path.display()))?,
        None => boilerplate::resolve(language, config),
    };

    if let Some(url) = url {
        match platform::detect(url) {
            Some(found) => {
                tracing::debug!(platform = found.name(), "generating driver for judge page");
            }
            None => tracing::warn!(url, "URL does not look like a supported judge site"),
        }
    }

    let prompt = prompts::driver_prompt(&page, language, &scaffold)?;
    let client = super::build_client(config)?;
    let code = client.generate(&prompt, SanitizeMode::Strip).await?;

    for finding in validate_driver_code(&code, language) {
        eprintln!("warning: {finding}");
    }
    println!("{code}");
    Ok(())
}
