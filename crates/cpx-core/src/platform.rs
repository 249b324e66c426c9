//! Judge-platform detection from URLs.

use std::sync::LazyLock;

use regex::Regex;

/// Coding platforms cpx recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    LeetCode,
    GeeksForGeeks,
    CodingNinjas,
    Codeforces,
    CodeChef,
    HackerRank,
    AtCoder,
}

impl Platform {
    /// Human-readable platform name.
    pub fn name(self) -> &'static str {
        match self {
            Platform::LeetCode => "LeetCode",
            Platform::GeeksForGeeks => "GeeksforGeeks",
            Platform::CodingNinjas => "Coding Ninjas",
            Platform::Codeforces => "Codeforces",
            Platform::CodeChef => "CodeChef",
            Platform::HackerRank => "HackerRank",
            Platform::AtCoder => "AtCoder",
        }
    }
}

static JUDGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)leetcode\.com|geeksforgeeks\.org|codingninjas\.com|codeforces\.com|codechef\.com|hackerrank\.com|atcoder\.jp",
    )
    .expect("static regex")
});

/// Whether `url` points at a supported judge site.
pub fn is_judge_url(url: &str) -> bool {
    JUDGE_URL.is_match(url)
}

/// Identifies the platform behind `url`, if any.
pub fn detect(url: &str) -> Option<Platform> {
    let url = url.to_lowercase();
    if url.contains("leetcode.com") {
        Some(Platform::LeetCode)
    } else if url.contains("geeksforgeeks.org") {
        Some(Platform::GeeksForGeeks)
    } else if url.contains("codingninjas.com") {
        Some(Platform::CodingNinjas)
    } else if url.contains("codeforces.com") {
        Some(Platform::Codeforces)
    } else if url.contains("codechef.com") {
        Some(Platform::CodeChef)
    } else if url.contains("hackerrank.com") {
        Some(Platform::HackerRank)
    } else if url.contains("atcoder.jp") {
        Some(Platform::AtCoder)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_platforms_are_detected() {
        assert_eq!(
            detect("https://leetcode.com/problems/two-sum/"),
            Some(Platform::LeetCode)
        );
        assert_eq!(
            detect("https://Codeforces.com/problemset/problem/1/A"),
            Some(Platform::Codeforces)
        );
        assert_eq!(
            detect("https://atcoder.jp/contests/abc001"),
            Some(Platform::AtCoder)
        );
        assert_eq!(detect("https://example.com/blog"), None);
    }

    #[test]
    fn judge_url_check_matches_detection() {
        assert!(is_judge_url("https://www.hackerrank.com/challenges/x"));
        assert!(!is_judge_url("https://news.ycombinator.com"));
    }
}
