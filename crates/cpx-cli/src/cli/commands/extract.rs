//! Extract command handler.

use std::path::Path;

use anyhow::Result;
use cpx_core::config::Config;
use cpx_core::gemini::SanitizeMode;
use cpx_core::problem::Language;
use cpx_core::prompts;

pub async fn run(config: &Config, language: Language, input: Option<&Path>) -> Result<()> {
    let code = super::read_input(input)?;
    anyhow::ensure!(!code.trim().is_empty(), "no code to extract from");

    let prompt = prompts::extract_prompt(&code, language)?;
    let client = super::build_client(config)?;
    let solution = client.generate(&prompt, SanitizeMode::Strip).await?;

    println!("{solution}");
    Ok(())
}
