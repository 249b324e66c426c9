//! Problem and language types shared across prompt building and validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target language for generated driver code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    Python,
    JavaScript,
    Java,
    C,
    Go,
    Rust,
}

impl Language {
    /// Returns all languages for iteration (e.g., in help output).
    pub fn all() -> &'static [Language] {
        &[
            Language::Cpp,
            Language::Python,
            Language::JavaScript,
            Language::Java,
            Language::C,
            Language::Go,
            Language::Rust,
        ]
    }

    /// Lower-case config/CLI key for this language.
    pub fn key(self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Java => "java",
            Language::C => "c",
            Language::Go => "go",
            Language::Rust => "rust",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Cpp => "C++",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Java => "Java",
            Language::C => "C",
            Language::Go => "Go",
            Language::Rust => "Rust",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "c++" | "cpp" => Ok(Language::Cpp),
            "python" | "py" => Ok(Language::Python),
            "javascript" | "js" => Ok(Language::JavaScript),
            "java" => Ok(Language::Java),
            "c" => Ok(Language::C),
            "go" => Ok(Language::Go),
            "rust" | "rs" => Ok(Language::Rust),
            _ => Err(format!(
                "Unknown language: {value} (expected one of c++, python, javascript, java, c, go, rust)"
            )),
        }
    }
}

/// Best-effort problem metadata, as produced by whatever scraped the judge
/// page. cpx only consumes the shape; it never fills it in itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemInfo {
    pub title: String,
    pub difficulty: String,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_aliases_case_insensitively() {
        assert_eq!("C++".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!("cpp".parse::<Language>().unwrap(), Language::Cpp);
        assert_eq!("JS".parse::<Language>().unwrap(), Language::JavaScript);
        assert_eq!("rs".parse::<Language>().unwrap(), Language::Rust);
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for &language in Language::all() {
            let parsed: Language = language.to_string().parse().unwrap();
            assert_eq!(parsed, language);
        }
    }
}
