use std::sync::LazyLock;

use regex::Regex;

static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(?:[a-zA-Z ]{1,30})\]").expect("annotation pattern is valid"));

static INLINE_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,2}:\d{2}(?::\d{2})?\b").expect("timestamp pattern is valid")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

/// Normalize one caption fragment into plain prose.
///
/// Decodes HTML entities, flattens line breaks, drops zero-width spaces,
/// stage directions such as `[Music]` and inline `m:ss` timestamps, then
/// collapses whitespace.
pub fn clean_fragment(fragment: &str) -> String {
    if fragment.trim().is_empty() {
        return String::new();
    }

    let decoded = html_escape::decode_html_entities(fragment);
    let normalized = decoded.replace(['\n', '\r'], " ").replace('\u{200b}', "");

    let normalized = ANNOTATION.replace_all(&normalized, "");
    let normalized = INLINE_TIMESTAMP.replace_all(&normalized, "");
    let normalized = WHITESPACE_RUN.replace_all(&normalized, " ");

    normalized.trim().to_string()
}
