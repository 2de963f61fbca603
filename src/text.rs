use std::sync::LazyLock;

use regex::Regex;

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid br regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Reduce comment markup (`textDisplay`) to a single line of plain text
pub fn sanitize_comment(html: &str) -> String {
    let text = LINE_BREAK.replace_all(html, " ");
    let text = TAG.replace_all(&text, "");
    let text = html_escape::decode_html_entities(&text);
    let text: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Compact count, e.g. `1M views`, `12K subscribers`, `999 views`
pub fn format_count(count: u64, noun: &str) -> String {
    match count {
        n if n >= 1_000_000 => format!("{}M {noun}", n / 1_000_000),
        n if n >= 1_000 => format!("{}K {noun}", n / 1_000),
        n => format!("{n} {noun}"),
    }
}
