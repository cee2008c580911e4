//! Greedy word wrapping
//!
//! Wrapping works per physical line and never merges lines. Words are the
//! unbreakable units of a [`Line`]; a word longer than the width is emitted
//! whole on its own line.

use crate::layout::{render_lines, Line};

/// Wrap a single line to `width` columns
pub fn wrap_line(line: &Line, width: usize) -> Vec<Line> {
    if line.is_blank() || line.width() <= width {
        return vec![line.clone()];
    }

    let mut out = Vec::new();
    let mut current = Line::blank();
    let mut current_len = 0;

    for word in line.words() {
        let len = word.chars().count();
        if !current.is_blank() && current_len + 1 + len > width {
            out.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_blank() {
            current_len += 1;
        }
        current_len += len;
        current.push(word.clone());
    }

    if !current.is_blank() {
        out.push(current);
    }
    out
}

/// Wrap every line; blank lines are preserved
pub fn wrap_lines(lines: Vec<Line>, width: usize) -> Vec<Line> {
    lines
        .iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

/// Wrap plain text to `width` columns.
///
/// `None` or `Some(0)` returns the text unchanged. Link tokens are recovered
/// from their `word ( href )` shape and kept on one line together with the
/// word before them; a leading list marker stays with the item's first word.
pub fn wrap(text: &str, width: Option<usize>) -> String {
    let Some(width) = width.filter(|&w| w > 0) else {
        return text.to_string();
    };

    let lines: Vec<Line> = text.split('\n').map(parse_line).collect();
    render_lines(&wrap_lines(lines, width))
}

/// Split a rendered line back into unbreakable units
fn parse_line(line: &str) -> Line {
    let pieces: Vec<&str> = line.split(' ').filter(|p| !p.is_empty()).collect();
    let mut words: Vec<String> = Vec::with_capacity(pieces.len());

    let mut i = 0;
    while i < pieces.len() {
        let is_link_suffix = pieces[i] == "("
            && i + 2 < pieces.len()
            && pieces[i + 2].starts_with(')')
            && !words.is_empty();

        let is_marker = i == 0 && i + 1 < pieces.len() && is_list_marker(pieces[i]);

        if is_marker {
            words.push(format!("{} {}", pieces[i], pieces[i + 1]));
            i += 2;
        } else if is_link_suffix {
            if let Some(last) = words.last_mut() {
                last.push_str(" ( ");
                last.push_str(pieces[i + 1]);
                last.push(' ');
                last.push_str(pieces[i + 2]);
            }
            i += 3;
        } else {
            words.push(pieces[i].to_string());
            i += 1;
        }
    }

    Line::from_words(words)
}

fn is_list_marker(piece: &str) -> bool {
    let mut chars = piece.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_alphanumeric())
}
