//! Text normalization for search and comparison.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize text for comparison: lowercase, NFD-decompose, drop the
/// combining diacritic marks, fold `đ` to `d`, trim surrounding whitespace.
///
/// Pure, total and idempotent. The `đ` mapping is needed because U+0111 is
/// a stroked letter, not a base-plus-mark pair, so NFD leaves it alone.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == '\u{0111}' { 'd' } else { c })
        .collect();
    folded.trim().to_string()
}

/// Stricter variant used for search queries: [`normalize`], then collapse
/// every remaining non-alphanumeric character to a space and squeeze
/// whitespace runs down to single spaces.
pub fn normalize_query(text: &str) -> String {
    normalize(text)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
