use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Longest excerpt served in a search result, in characters.
pub const EXCERPT_MAX_CHARS: usize = 200;

/// Reduce HTML to plain text: drop tags, decode entities and collapse all
/// whitespace runs to single spaces.
pub fn strip_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let stripped = TAG_RE.replace_all(html, "");
    let decoded = match htmlescape::decode_html(stripped.as_ref()) {
        Ok(text) => text,
        Err(_) => stripped.into_owned(),
    };
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Truncate to at most `max_chars`, backing up to the last space so words
/// stay whole. `...` is appended only when text was actually cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    let cut = match truncated.rfind(' ') {
        Some(pos) if pos > 0 => &truncated[..pos],
        _ => truncated.as_str(),
    };
    format!("{cut}...")
}
