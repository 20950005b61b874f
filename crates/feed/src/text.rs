//! Syndication-safe text rendering for titles, excerpts, content and dates.

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Words kept in an automatically generated excerpt.
pub const EXCERPT_WORDS: usize = 55;

const EXCERPT_MORE: &str = " [&hellip;]";

static SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>").unwrap()
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

/// Remove markup, including the bodies of script and style elements.
pub fn strip_tags(html: &str) -> String {
    let without_code = SCRIPT_STYLE.replace_all(html, "");
    TAG.replace_all(&without_code, "").into_owned()
}

/// Plain-text title.
pub fn plain_title(title: &str) -> String {
    strip_tags(title).trim().to_string()
}

/// Plain-text excerpt: the stored excerpt, or the leading words of the content.
pub fn feed_excerpt(excerpt: &str, content: &str) -> String {
    let source = if excerpt.trim().is_empty() { content } else { excerpt };
    let text = strip_tags(source);
    let words: Vec<&str> = text.split_whitespace().collect();

    if !excerpt.trim().is_empty() || words.len() <= EXCERPT_WORDS {
        return words.join(" ");
    }
    format!("{}{EXCERPT_MORE}", words[..EXCERPT_WORDS].join(" "))
}

/// Full HTML content, safe to embed in feed contexts.
pub fn feed_content(content: &str) -> String {
    content.replace("]]>", "]]&gt;")
}

/// RFC 3339 timestamp with an explicit offset.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, false)
}
