//! Built-in solution scaffolds, one per language.
//!
//! The scaffold is what the driver prompt asks the model to build around:
//! an empty solution container plus an entry point the generated I/O code
//! lands in. Users can replace any of these via the `[boilerplate]` config
//! section.

use crate::config::Config;
use crate::problem::Language;

const CPP: &str = r#"#include <bits/stdc++.h>
using namespace std;

class Solution {
public:
    // Your solution function here

};

int main() {
    ios_base::sync_with_stdio(false);
    cin.tie(NULL);

    Solution sol;
    // Driver code will be generated here

    return 0;
}"#;

const PYTHON: &str = r#"class Solution:
    def solution_function(self):
        # Your solution here
        pass

if __name__ == "__main__":
    sol = Solution()
    # Driver code will be generated here"#;

const JAVASCRIPT: &str = r"class Solution {
    solutionFunction() {
        // Your solution here
    }
}

// Driver code will be generated here
const sol = new Solution();";

const JAVA: &str = r"import java.util.*;
import java.io.*;

class Solution {
    public void solutionFunction() {
        // Your solution here
    }
}

public class Main {
    public static void main(String[] args) {
        Scanner sc = new Scanner(System.in);
        Solution sol = new Solution();
        // Driver code will be generated here
    }
}";

const C: &str = r"#include <stdio.h>
#include <stdlib.h>
#include <string.h>

// Your solution function here

int main() {
    // Driver code will be generated here
    return 0;
}";

const GO: &str = r#"package main

import (
    "fmt"
)

// Your solution function here

func main() {
    // Driver code will be generated here
}"#;

const RUST: &str = r"use std::io;

// Your solution function here

fn main() {
    // Driver code will be generated here
}";

/// Default scaffold for `language`.
pub fn default_boilerplate(language: Language) -> &'static str {
    match language {
        Language::Cpp => CPP,
        Language::Python => PYTHON,
        Language::JavaScript => JAVASCRIPT,
        Language::Java => JAVA,
        Language::C => C,
        Language::Go => GO,
        Language::Rust => RUST,
    }
}

/// Scaffold for `language`, honoring a config override when present.
pub fn resolve(language: Language, config: &Config) -> String {
    config
        .boilerplate
        .get(language.key())
        .cloned()
        .unwrap_or_else(|| default_boilerplate(language).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_a_scaffold() {
        for &language in Language::all() {
            assert!(!default_boilerplate(language).is_empty(), "{language}");
        }
    }

    #[test]
    fn cpp_scaffold_has_fast_io_and_entry_point() {
        let scaffold = default_boilerplate(Language::Cpp);
        assert!(scaffold.contains("sync_with_stdio"));
        assert!(scaffold.contains("int main()"));
        assert!(scaffold.contains("class Solution"));
    }

    #[test]
    fn config_override_wins() {
        let mut config = Config::default();
        config
            .boilerplate
            .insert("rust".to_string(), "fn main() {}".to_string());
        assert_eq!(resolve(Language::Rust, &config), "fn main() {}");
        assert!(resolve(Language::Go, &config).contains("package main"));
    }
}
