//! Verse text normalization.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_VERSE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\s+").expect("valid leading number regex"));
static INNER_VERSE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+[0-9]+\s+").expect("valid inner number regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Strips embedded verse-number markers and collapses whitespace.
///
/// Rules, applied in order:
/// - a leading `<ascii digits><ws>` is removed;
/// - every `<ws><digits><ws>` run becomes one space;
/// - remaining whitespace runs become one space; result is trimmed.
pub fn format_verse_text(raw: &str) -> String {
    let without_leading = LEADING_VERSE_NUMBER_RE.replace(raw, "");
    let without_inner = INNER_VERSE_NUMBER_RE.replace_all(&without_leading, " ");
    let collapsed = WHITESPACE_RE.replace_all(&without_inner, " ");
    collapsed.trim().to_string()
}
