//! Mentor command handler.

use anyhow::Result;
use cpx_core::config::Config;
use cpx_core::gemini::SanitizeMode;
use cpx_core::prompts;
use cpx_markdown::RenderOptions;

use crate::render;

pub async fn run(config: &Config, question: &str, plain: bool) -> Result<()> {
    anyhow::ensure!(!question.trim().is_empty(), "empty question");

    let prompt = prompts::mentor_prompt(question, None)?;
    let client = super::build_client(config)?;
    // Preserve mode: the answer is Markdown and the renderer needs it intact.
    let answer = client.generate(&prompt, SanitizeMode::Preserve).await?;

    if plain {
        println!("{answer}");
    } else {
        let doc = cpx_markdown::render(&answer, &RenderOptions::advanced());
        print!("{}", render::to_ansi(&doc));
    }
    Ok(())
}
