// src/util/text.rs
use html_escape::decode_html_entities;
use regex::Regex;
use std::sync::LazyLock;

static BLOCK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?(p|div|br|li|h[1-6])[^>]*>").expect("valid regex"));

static ANY_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

static BLANK_MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\s|<br\s*/?>)*$").expect("valid regex"));

/// Whether editor markup carries nothing worth storing.
///
/// Empty input, whitespace, and bare `<br>` line breaks (the residue a
/// contenteditable region leaves after deleting everything) count as blank.
///
/// ```
/// use edgepad::util::text::is_blank_markup;
///
/// assert!(is_blank_markup("<br>"));
/// assert!(!is_blank_markup("<img src=\"data:image/jpeg;base64,AA\">"));
/// ```
pub fn is_blank_markup(html: &str) -> bool {
    BLANK_MARKUP_RE.is_match(html)
}

/// Extract the first line of plain text from HTML content.
///
/// This function:
/// 1. Decodes HTML entities (e.g., &amp; → &)
/// 2. Removes all HTML tags
/// 3. Extracts the first non-empty line
/// 4. Trims whitespace
///
/// # Examples
///
/// ```
/// use edgepad::util::text::extract_first_line;
///
/// let html = "<div>Shopping list</div><div>milk</div>";
/// let first_line = extract_first_line(html);
/// assert_eq!(first_line, "Shopping list");
/// ```
pub fn extract_first_line(html: &str) -> String {
    let decoded = decode_html_entities(html).to_string();

    // Replace block-level HTML tags with newlines to preserve line breaks
    let with_newlines = BLOCK_TAG_RE.replace_all(&decoded, "\n");
    let no_tags = ANY_TAG_RE.replace_all(&with_newlines, "");

    no_tags
        .lines()
        .map(|line| line.trim())
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .to_string()
}

/// Shorten `text` to at most `max_chars` characters, marking the cut with `...`.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
