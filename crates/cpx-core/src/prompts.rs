//! Prompt assembly for the generation backend.
//!
//! Templates live in `prompts/` and are embedded at compile time. They are
//! rendered with strict undefined behavior so a typo in a template fails
//! loudly instead of silently producing a half-filled prompt.

use anyhow::{Context, Result};
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::problem::{Language, ProblemInfo};

/// Prompt template for driver-code generation.
pub const DRIVER_PROMPT_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/driver_prompt.md"
));

/// Prompt template for solution extraction.
pub const EXTRACT_PROMPT_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/extract_prompt.md"
));

/// Prompt template for mentor-chat questions.
pub const MENTOR_PROMPT_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/mentor_prompt.md"
));

fn render_template(template: &str, vars: impl Serialize) -> Result<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template("prompt", template)
        .context("Failed to parse prompt template")?;
    env.get_template("prompt")
        .context("Prompt template not registered")?
        .render(vars)
        .context("Failed to render prompt template")
}

#[derive(Serialize)]
struct DriverVars<'a> {
    page: &'a str,
    language: String,
    boilerplate: &'a str,
}

#[derive(Serialize)]
struct ExtractVars<'a> {
    code: &'a str,
    language: String,
}

#[derive(Serialize)]
struct MentorVars<'a> {
    question: &'a str,
    problem: Option<&'a ProblemInfo>,
}

/// Builds the driver-code generation prompt.
///
/// # Errors
/// Returns an error when template rendering fails.
pub fn driver_prompt(page: &str, language: Language, boilerplate: &str) -> Result<String> {
    render_template(
        DRIVER_PROMPT_TEMPLATE,
        DriverVars {
            page,
            language: language.to_string(),
            boilerplate,
        },
    )
}

/// Builds the solution-extraction prompt.
///
/// # Errors
/// Returns an error when template rendering fails.
pub fn extract_prompt(code: &str, language: Language) -> Result<String> {
    render_template(
        EXTRACT_PROMPT_TEMPLATE,
        ExtractVars {
            code,
            language: language.to_string(),
        },
    )
}

/// Builds the mentor-chat prompt.
///
/// # Errors
/// Returns an error when template rendering fails.
pub fn mentor_prompt(question: &str, problem: Option<&ProblemInfo>) -> Result<String> {
    render_template(MENTOR_PROMPT_TEMPLATE, MentorVars { question, problem })
}

/// Appends tag- and difficulty-specific hints to a built prompt.
///
/// Returns the prompt unchanged when the problem metadata suggests nothing.
pub fn enhance_with_context(prompt: &str, info: &ProblemInfo) -> String {
    let mut hints: Vec<&str> = Vec::new();

    for tag in &info.tags {
        match tag.as_str() {
            "Hash Table" => {
                hints.push("- This problem likely uses hash tables for efficient lookups");
            }
            "Design" => hints.push(
                "- This is a design problem - focus on correct class structure and method implementation",
            ),
            "Array" => hints.push("- Pay attention to array indexing and bounds checking"),
            "Two Pointers" => {
                hints.push("- Consider the two-pointer technique for efficient array processing");
            }
            _ => {}
        }
    }

    match info.difficulty.as_str() {
        "Easy" => hints.push("- This is an Easy problem - focus on straightforward implementation"),
        "Medium" => hints.push(
            "- This is a Medium problem - may require optimization or clever data structures",
        ),
        "Hard" => hints
            .push("- This is a Hard problem - expect complex algorithms or advanced data structures"),
        _ => {}
    }

    if hints.is_empty() {
        return prompt.to_string();
    }
    format!("{prompt}\n\nPROBLEM-SPECIFIC HINTS:\n{}\n", hints.join("\n"))
}
