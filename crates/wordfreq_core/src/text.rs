use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

/// Splits `text` on runs of whitespace.
///
/// Follows the classic regex-split contract rather than `split_whitespace`:
/// - empty input yields a single empty token,
/// - leading whitespace yields a leading empty token,
/// - trailing empty tokens are dropped, so whitespace-only text yields nothing.
pub fn tokenize(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut tokens: Vec<String> = WHITESPACE_RUN.split(text).map(str::to_owned).collect();
    while tokens.last().is_some_and(String::is_empty) {
        tokens.pop();
    }
    tokens
}
