//! Model-output cleanup.
//!
//! Generated code routinely arrives wrapped in a Markdown fence and led by
//! a "Here's the…" preamble even when the prompt forbids both. Strip mode
//! removes those artifacts; preserve mode keeps Markdown intact for the
//! renderer and only unwraps a response that is one bare fenced block.

use std::sync::LazyLock;

use regex::Regex;

/// How aggressively to clean raw model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeMode {
    /// For generated code: drop a wrapping fence, known preamble phrases,
    /// and runs of blank lines.
    Strip,
    /// For mentor-chat answers: leave formatting alone unless the entire
    /// response is exactly one fenced block.
    Preserve,
}

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```\w*\n?").expect("static regex"));
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n?```$").expect("static regex"));
static PREAMBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:Here's the|The complete).*?:\n").expect("static regex"));
static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("static regex"));

/// Cleans `raw` according to `mode`.
pub fn sanitize(raw: &str, mode: SanitizeMode) -> String {
    match mode {
        SanitizeMode::Strip => strip(raw),
        SanitizeMode::Preserve => preserve(raw),
    }
}

fn strip(raw: &str) -> String {
    let text = raw.trim();
    let text = LEADING_FENCE.replace(text, "");
    let text = TRAILING_FENCE.replace(&text, "");
    let text = text.trim();
    let text = PREAMBLE.replace(text, "");
    let text = BLANK_RUNS.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Unwraps the fence only when the whole response is a single fenced block
/// with nothing outside it.
fn preserve(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut lines = trimmed.lines();
    let Some(first) = lines.next() else {
        return raw.to_string();
    };
    if !first.starts_with("```") {
        return raw.to_string();
    }
    let rest: Vec<&str> = lines.collect();
    let Some((last, body)) = rest.split_last() else {
        return raw.to_string();
    };
    if last.trim() == "```" && !body.iter().any(|line| line.starts_with("```")) {
        body.join("\n")
    } else {
        raw.to_string()
    }
}
