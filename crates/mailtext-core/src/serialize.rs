//! Plain-text serialization
//!
//! Lays out each block of the marker stream, renders headings as rule
//! boxes, wraps lines and joins blocks with one blank line.

use crate::ast::{Block, Document, Inline};
use crate::layout::{layout, render_lines, Line};
use crate::options::Options;
use crate::wrap::wrap_lines;

/// Serialize a document to plain text
pub fn serialize(document: &Document, options: &Options) -> String {
    let mut lines: Vec<Line> = Vec::new();

    for block in &document.blocks {
        let rendered = serialize_block(block, options);
        if rendered.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(Line::blank());
        }
        lines.extend(rendered);
    }

    render_lines(&lines)
}

fn serialize_block(block: &Block, options: &Options) -> Vec<Line> {
    match block {
        Block::Flow(inlines) => layout_wrapped(inlines, options),
        Block::Heading { level, content } => {
            let lines = layout_wrapped(content, options);
            render_heading(*level, lines, options)
        }
    }
}

fn layout_wrapped(inlines: &[Inline], options: &Options) -> Vec<Line> {
    let lines = layout(inlines, options);
    match options.wrap_width() {
        Some(width) => wrap_lines(lines, width),
        None => lines,
    }
}

/// Draw the rule box around heading lines.
///
/// The rule is as wide as the longest content line. Levels 1 and 2 get a
/// rule above and below; deeper levels are underlined only.
pub fn render_heading(level: u8, content: Vec<Line>, options: &Options) -> Vec<Line> {
    if content.iter().all(Line::is_blank) {
        return Vec::new();
    }

    let width = content.iter().map(Line::width).max().unwrap_or(0);
    let rule = Line::from_word(
        std::iter::repeat(options.heading_symbol(level))
            .take(width)
            .collect::<String>(),
    );

    let mut out = Vec::with_capacity(content.len() + 2);
    if level <= 2 {
        out.push(rule.clone());
    }
    out.extend(content);
    out.push(rule);
    out
}
