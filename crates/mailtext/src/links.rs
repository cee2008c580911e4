//! Anchor rewriting.
//!
//! Anchors become inline link tokens, `text ( href )`. The href is kept
//! verbatim apart from entity decoding and trimming, so template
//! placeholders such as `%%LINK%%` or `[[!unsubscribe]]` pass through.

use log::trace;
use mailtext_core::{link_token, Inline};

use crate::entities::decode_entities;
use crate::markup::{tokenize, Tag, Token};
use crate::utilities::{clean_attribute, heading_level, is_structural};

/// An anchor collected from the token stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub text: String,
    pub href: String,
}

impl Anchor {
    /// The marker for this anchor; `None` when the display text is blank
    pub fn into_inline(self) -> Option<Inline> {
        if self.text.trim().is_empty() {
            trace!("dropping anchor with empty text (href {:?})", self.href);
            return None;
        }
        Some(Inline::Link {
            text: self.text,
            href: self.href,
        })
    }

    /// The rendered token; `None` when the display text is blank
    pub fn token(&self) -> Option<String> {
        link_token(&self.text, &self.href)
    }
}

/// Collect the anchor opened by `tokens[start]`.
///
/// Display text is the decoded text of every token up to the matching
/// `</a>`; nested tags are stripped, structural boundaries (`br`, `p`,
/// `li`, headings, blocks) become spaces and `img` contributes its alt text.
///
/// An anchor missing its `</a>` ends before the first token that cannot
/// belong to it: a second `<a>`, the end tag of a structural element the
/// anchor did not open, or (once it has text of its own) the start of a
/// paragraph, list item or heading. Returns the anchor and the index of the
/// first token after it.
pub fn collect_anchor(tokens: &[Token<'_>], start: usize) -> (Anchor, usize) {
    let href = match tokens.get(start) {
        Some(Token::Open(tag)) => clean_attribute(tag.attr("href").as_deref()),
        _ => String::new(),
    };

    let mut text = String::new();
    // structural elements opened inside the anchor and not yet closed
    let mut depth = 0usize;
    let mut wraps_blocks = false;
    let mut i = start + 1;
    while let Some(token) = tokens.get(i) {
        match token {
            Token::Text(raw) => text.push_str(&decode_entities(raw)),
            Token::Open(tag) if tag.name == "a" => break,
            Token::Open(tag) if tag.name == "img" => text.push_str(&image_alt(tag)),
            Token::Open(tag) if is_structural(&tag.name) => {
                if starts_section(&tag.name) && !wraps_blocks && !text.trim().is_empty() {
                    break;
                }
                if !is_void(&tag.name) && !tag.self_closing {
                    depth += 1;
                    wraps_blocks = true;
                }
                text.push(' ');
            }
            Token::Close(tag) if tag.name == "a" => {
                i += 1;
                break;
            }
            Token::Close(tag) if is_structural(&tag.name) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                text.push(' ');
            }
            _ => {}
        }
        i += 1;
    }

    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (Anchor { text, href }, i)
}

fn starts_section(tag: &str) -> bool {
    matches!(tag, "p" | "li") || heading_level(tag).is_some()
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "br" | "hr")
}

/// Alt text of an image, decoded and trimmed
pub fn image_alt(tag: &Tag<'_>) -> String {
    clean_attribute(tag.attr("alt").as_deref())
}

/// Rewrite every anchor in `html` into its inline token, leaving other
/// markup in place.
///
/// Token text is re-encoded so the result is still valid markup. Anchors
/// with blank text are removed. Comments and the content of `head`,
/// `title`, `style` and `script` are dropped by the tokenizer.
pub fn rewrite_links(html: &str) -> String {
    let tokens = tokenize(html);
    let mut out = String::with_capacity(html.len());

    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Open(tag) if tag.name == "a" => {
                let (anchor, next) = collect_anchor(&tokens, i);
                if let Some(token) = anchor.token() {
                    out.push_str(&html_escape::encode_text(&token));
                }
                i = next;
                continue;
            }
            Token::Text(text) => out.push_str(text),
            Token::Open(tag) | Token::Close(tag) => out.push_str(tag.raw),
        }
        i += 1;
    }

    out
}
