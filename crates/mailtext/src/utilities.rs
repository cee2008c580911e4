//! Element tables and small helpers for markup processing.

/// Block-level elements that start and end on a fresh line.
///
/// `p`, `li` and headings have their own markers and are handled before
/// this table is consulted.
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "center", "dd", "dir", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "header", "hgroup", "hr",
    "html", "main", "menu", "nav", "ol", "pre", "section", "table", "tbody", "td", "tfoot",
    "th", "thead", "tr", "ul",
];

/// Inline elements; whitespace-only text between two of them keeps a space
pub const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "big", "cite", "code", "em", "font", "i", "img", "kbd", "mark", "q", "s",
    "small", "span", "strike", "strong", "sub", "sup", "time", "tt", "u",
];

/// Elements whose content never reaches the text output
pub const SKIPPED_ELEMENTS: &[&str] = &["head", "title", "style", "script"];

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag)
}

/// Check if a tag is an inline element
pub fn is_inline(tag: &str) -> bool {
    INLINE_ELEMENTS.contains(&tag)
}

/// Check if a tag's content is dropped entirely
pub fn is_skipped(tag: &str) -> bool {
    SKIPPED_ELEMENTS.contains(&tag)
}

/// Check if a tag produces a structural marker (block, paragraph, break,
/// list item or heading)
pub fn is_structural(tag: &str) -> bool {
    matches!(tag, "p" | "br" | "li") || is_block(tag) || heading_level(tag).is_some()
}

/// Heading level for `h1`..`h6`
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag.as_bytes() {
        [b'h', level @ b'1'..=b'6'] => Some(level - b'0'),
        _ => None,
    }
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Find `needle` in `haystack` ignoring ASCII case; returns a byte offset
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}
