//! Lint-style checks on generated driver code.
//!
//! These are heuristics, not a compiler: they catch the failure modes the
//! backend actually produces (markdown wrappers that survived sanitization,
//! truncated output, an apology instead of code) so the CLI can warn before
//! the user pastes garbage into a judge.

use crate::problem::Language;

/// Checks `code` and returns display-ready findings; empty means clean.
pub fn validate_driver_code(code: &str, language: Language) -> Vec<String> {
    let mut findings = Vec::new();

    if code.trim().is_empty() {
        findings.push("Generated code is empty".to_string());
        return findings;
    }

    if language == Language::Cpp {
        if !code.contains("#include") {
            findings.push("Missing #include statements".to_string());
        }
        if !code.contains("int main(") {
            findings.push("Missing main function".to_string());
        }
        if !code.contains("return 0") {
            findings.push("Main function should return 0".to_string());
        }
        if code.contains("// Your solution here")
            && !code.contains("class")
            && !code.contains("struct")
        {
            findings.push("Solution class/struct seems to be missing".to_string());
        }
    }

    if code.contains("```") {
        findings.push("Code contains markdown formatting".to_string());
    }
    if code.len() < 50 {
        findings.push("Generated code seems too short".to_string());
    }
    if code.contains("Error:") {
        findings.push("Code contains error messages".to_string());
    }

    findings
}
