//! Structural normalization: markup tokens to the marker stream.
//!
//! Structure that matters for plain text (paragraphs, line breaks, list
//! items, headings, links) becomes a marker; every other tag is stripped.

use mailtext_core::{Block, Document, Inline};

use crate::entities::decode_entities;
use crate::links::{collect_anchor, image_alt};
use crate::markup::{tokenize, Token};
use crate::utilities::{heading_level, is_block, is_inline, is_structural};

/// Parse markup into a marker-stream document
pub fn parse_document(html: &str) -> Document {
    let tokens = tokenize(html);
    let mut builder = Builder::default();

    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Text(raw) => {
                let text = decode_entities(raw);
                if !text.trim().is_empty() {
                    builder.push(Inline::text(text));
                } else if between_inline_elements(&tokens, i) {
                    builder.push(Inline::text(" "));
                } else if !next_to_structural(&tokens, i) {
                    builder.push(Inline::text(text));
                }
            }

            Token::Open(tag) => match tag.name.as_str() {
                "a" => {
                    let (anchor, next) = collect_anchor(&tokens, i);
                    if let Some(link) = anchor.into_inline() {
                        builder.push(link);
                    }
                    i = next;
                    continue;
                }
                "br" => builder.push(Inline::LineBreak),
                "p" => builder.push(Inline::ParagraphBreak),
                "li" => builder.list_item(),
                "img" => {
                    let alt = image_alt(tag);
                    if !alt.is_empty() {
                        builder.push(Inline::text(alt));
                    }
                }
                name => {
                    if let Some(level) = heading_level(name) {
                        builder.open_heading(level);
                    } else if is_block(name) {
                        builder.push(Inline::BlockBoundary);
                    }
                }
            },

            Token::Close(tag) => match tag.name.as_str() {
                "p" => builder.push(Inline::ParagraphBreak),
                "li" => builder.push(Inline::BlockBoundary),
                name => {
                    if heading_level(name).is_some() {
                        builder.close_heading();
                    } else if is_block(name) {
                        builder.push(Inline::BlockBoundary);
                    }
                }
            },
        }
        i += 1;
    }

    builder.finish()
}

/// Whitespace between `</span>` and `<span>` (or any other pair of inline
/// elements) separates words even when it spans lines.
fn between_inline_elements(tokens: &[Token<'_>], i: usize) -> bool {
    let after_inline = i
        .checked_sub(1)
        .and_then(|prev| tokens.get(prev))
        .is_some_and(|t| matches!(t, Token::Close(tag) if is_inline(&tag.name)));
    let before_inline = tokens
        .get(i + 1)
        .is_some_and(|t| matches!(t, Token::Open(tag) if is_inline(&tag.name)));
    after_inline && before_inline
}

/// Source formatting around block tags (`</li>\n</ul>`) is not content
fn next_to_structural(tokens: &[Token<'_>], i: usize) -> bool {
    let structural = |t: &Token<'_>| match t {
        Token::Open(tag) | Token::Close(tag) => is_structural(&tag.name),
        Token::Text(_) => false,
    };
    i.checked_sub(1)
        .and_then(|prev| tokens.get(prev))
        .is_some_and(structural)
        || tokens.get(i + 1).is_some_and(structural)
}

#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    flow: Vec<Inline>,
    heading: Option<(u8, Vec<Inline>)>,
}

impl Builder {
    fn target(&mut self) -> &mut Vec<Inline> {
        match &mut self.heading {
            Some((_, content)) => content,
            None => &mut self.flow,
        }
    }

    fn push(&mut self, inline: Inline) {
        self.target().push(inline);
    }

    /// Whitespace right before `<li>` belongs to no one
    fn list_item(&mut self) {
        let target = self.target();
        if let Some(Inline::Text(text)) = target.last_mut() {
            let trimmed = text.trim_end().len();
            if trimmed == 0 {
                target.pop();
            } else {
                text.truncate(trimmed);
            }
        }
        target.push(Inline::ListItem);
    }

    /// A new heading implicitly closes an open one
    fn open_heading(&mut self, level: u8) {
        self.close_heading();
        if !self.flow.is_empty() {
            self.blocks.push(Block::Flow(std::mem::take(&mut self.flow)));
        }
        self.heading = Some((level, Vec::new()));
    }

    fn close_heading(&mut self) {
        if let Some((level, content)) = self.heading.take() {
            self.blocks.push(Block::Heading { level, content });
        }
    }

    fn finish(mut self) -> Document {
        self.close_heading();
        if !self.flow.is_empty() {
            self.blocks.push(Block::Flow(self.flow));
        }
        Document::new(self.blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_markers() {
        let doc = parse_document("<p>A</p>");
        assert_eq!(
            doc.blocks,
            vec![Block::Flow(vec![
                Inline::ParagraphBreak,
                Inline::text("A"),
                Inline::ParagraphBreak,
            ])]
        );
    }

    #[test]
    fn test_heading_splits_flow() {
        let doc = parse_document("intro<h2>Title</h2>outro");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Flow(vec![Inline::text("intro")]),
                Block::Heading {
                    level: 2,
                    content: vec![Inline::text("Title")],
                },
                Block::Flow(vec![Inline::text("outro")]),
            ]
        );
    }

    #[test]
    fn test_unclosed_heading_closed_at_end() {
        let doc = parse_document("<h1>Title");
        assert_eq!(
            doc.blocks,
            vec![Block::Heading {
                level: 1,
                content: vec![Inline::text("Title")],
            }]
        );
    }

    #[test]
    fn test_link_inside_heading() {
        let doc = parse_document("<h1><a href='http://example.com/'>Test</a></h1>");
        assert_eq!(
            doc.blocks,
            vec![Block::Heading {
                level: 1,
                content: vec![Inline::Link {
                    text: "Test".to_string(),
                    href: "http://example.com/".to_string(),
                }],
            }]
        );
    }

    #[test]
    fn test_whitespace_between_spans() {
        let doc = parse_document("<span>a</span>\n<span>b</span>");
        assert_eq!(
            doc.blocks,
            vec![Block::Flow(vec![
                Inline::text("a"),
                Inline::text(" "),
                Inline::text("b"),
            ])]
        );
    }

    #[test]
    fn test_whitespace_before_list_item_dropped() {
        let doc = parse_document("<li>x</li> \t\n <li>y");
        assert_eq!(
            doc.blocks,
            vec![Block::Flow(vec![
                Inline::ListItem,
                Inline::text("x"),
                Inline::BlockBoundary,
                Inline::ListItem,
                Inline::text("y"),
            ])]
        );
    }

    #[test]
    fn test_source_formatting_between_blocks_dropped() {
        let doc = parse_document("<ul>\n  <li>a</li>\n</ul>\n<p>b</p>");
        assert_eq!(
            doc.blocks,
            vec![Block::Flow(vec![
                Inline::BlockBoundary,
                Inline::ListItem,
                Inline::text("a"),
                Inline::BlockBoundary,
                Inline::BlockBoundary,
                Inline::ParagraphBreak,
                Inline::text("b"),
                Inline::ParagraphBreak,
            ])]
        );
    }

    #[test]
    fn test_entities_decoded_after_tokenizing() {
        let doc = parse_document("&lt;p&gt;");
        assert_eq!(doc.blocks, vec![Block::Flow(vec![Inline::text("<p>")])]);
    }

    #[test]
    fn test_image_alt() {
        let doc = parse_document("<img src='x.png' alt=\"Logo\"><img src='y.png'>");
        assert_eq!(doc.blocks, vec![Block::Flow(vec![Inline::text("Logo")])]);
    }
}
