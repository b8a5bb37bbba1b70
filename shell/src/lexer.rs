//! Tokenization of an input line.
//!
//! There is no quoting, escaping or expansion: a line is cut on every single
//! space and nothing else.

/// Splits `line` on single spaces.
///
/// Repeated spaces are not collapsed, so they produce empty tokens which are
/// passed through as-is. An empty line yields no tokens at all.
pub fn split_into_tokens(line: &str) -> Vec<&str> {
    if line.is_empty() {
        return Vec::new();
    }
    line.split(' ').collect()
}
