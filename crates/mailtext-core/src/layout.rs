//! Line model and whitespace normalization
//!
//! Text is laid out into physical lines of words. Horizontal whitespace only
//! separates words, so collapsing runs of spaces and trimming line edges fall
//! out of the model. Blank lines are kept while writing and collapsed when the
//! writer finishes.

use crate::ast::Inline;
use crate::options::Options;

/// A physical output line.
///
/// Each word is an unbreakable unit. Words render separated by single
/// spaces; a word may itself contain spaces when a link token is glued
/// into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    words: Vec<String>,
}

impl Line {
    /// An empty (blank) line
    pub fn blank() -> Self {
        Self::default()
    }

    /// A line holding a single unbreakable word
    pub fn from_word(word: impl Into<String>) -> Self {
        Self {
            words: vec![word.into()],
        }
    }

    pub fn from_words(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn is_blank(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn push(&mut self, word: String) {
        self.words.push(word);
    }

    /// Rendered length in characters
    pub fn width(&self) -> usize {
        let chars: usize = self.words.iter().map(|w| w.chars().count()).sum();
        chars + self.words.len().saturating_sub(1)
    }

    pub fn render(&self) -> String {
        self.words.join(" ")
    }
}

/// Join lines with `\n`
pub fn render_lines(lines: &[Line]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.width() + 1).sum());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&line.render());
    }
    out
}

/// Render a link as its inline token: `text ( href )`.
///
/// Whitespace runs inside either part collapse to one space so the token
/// stays on one line. Returns `None` when the text is blank; a blank href
/// renders the text alone.
pub fn link_token(text: &str, href: &str) -> Option<String> {
    let text = collapse_spaces(text);
    if text.is_empty() {
        return None;
    }
    let href = collapse_spaces(href);
    if href.is_empty() {
        Some(text)
    } else {
        Some(format!("{} ( {} )", text, href))
    }
}

fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Incrementally lays out text and structural markers into lines
#[derive(Debug, Default)]
pub struct LineWriter {
    lines: Vec<Line>,
    current: Line,
    word: String,
    // Pending list marker. Until the item's first visible character,
    // whitespace (newlines included) is swallowed; the marker is then glued
    // to the first word. An item that never gets content renders nothing.
    marker: Option<char>,
    after_cr: bool,
}

impl LineWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write text. `\r\n`, `\r` and `\n` end the line; any other whitespace
    /// separates words.
    pub fn push_text(&mut self, text: &str) {
        for c in text.chars() {
            if self.after_cr {
                self.after_cr = false;
                if c == '\n' {
                    continue;
                }
            }
            match c {
                '\r' => {
                    self.after_cr = true;
                    self.newline();
                }
                '\n' => self.newline(),
                c if c.is_whitespace() => self.flush_word(),
                c => {
                    self.start_word();
                    self.word.push(c);
                }
            }
        }
    }

    /// Glue an unbreakable token onto the current word
    pub fn push_token(&mut self, token: &str) {
        self.after_cr = false;
        self.start_word();
        self.word.push_str(token);
    }

    /// End the current line, even if it is empty. Ignored at the start of a
    /// list item.
    pub fn line_break(&mut self) {
        self.after_cr = false;
        if self.marker.is_none() {
            self.end_line();
        }
    }

    /// End the current line (if it has content) and leave a blank line
    pub fn paragraph_break(&mut self) {
        self.ensure_line_start();
        self.lines.push(Line::blank());
    }

    /// Start a new line unless the current one is still empty
    pub fn ensure_line_start(&mut self) {
        self.reset_state();
        self.flush_word();
        if !self.current.is_blank() {
            self.end_line();
        }
    }

    /// Start a list item on a fresh line
    pub fn list_item(&mut self, marker: char) {
        self.ensure_line_start();
        self.marker = Some(marker);
    }

    /// Write one inline marker
    pub fn push_inline(&mut self, inline: &Inline, options: &Options) {
        match inline {
            Inline::Text(text) => self.push_text(text),
            Inline::LineBreak => self.line_break(),
            Inline::ParagraphBreak => self.paragraph_break(),
            Inline::ListItem => self.list_item(options.list_marker),
            Inline::BlockBoundary => self.ensure_line_start(),
            Inline::Link { text, href } => {
                if let Some(token) = link_token(text, href) {
                    self.push_token(&token);
                }
            }
        }
    }

    /// Finish layout: drop leading and trailing blank lines and collapse
    /// every run of blank lines into exactly one.
    pub fn finish(mut self) -> Vec<Line> {
        self.flush_word();
        if !self.current.is_blank() {
            self.end_line();
        }

        let mut out: Vec<Line> = Vec::with_capacity(self.lines.len());
        for line in self.lines {
            if line.is_blank() && out.last().map_or(true, Line::is_blank) {
                continue;
            }
            out.push(line);
        }
        if out.last().is_some_and(Line::is_blank) {
            out.pop();
        }
        out
    }

    fn newline(&mut self) {
        if self.marker.is_none() {
            self.end_line();
        }
    }

    fn start_word(&mut self) {
        if let Some(marker) = self.marker.take() {
            self.word.push(marker);
            self.word.push(' ');
        }
    }

    fn flush_word(&mut self) {
        if !self.word.is_empty() {
            self.current.push(std::mem::take(&mut self.word));
        }
    }

    fn end_line(&mut self) {
        self.flush_word();
        self.lines.push(std::mem::take(&mut self.current));
    }

    fn reset_state(&mut self) {
        self.marker = None;
        self.after_cr = false;
    }
}

/// Lay out inline markers into normalized lines
pub fn layout(inlines: &[Inline], options: &Options) -> Vec<Line> {
    let mut writer = LineWriter::new();
    for inline in inlines {
        writer.push_inline(inline, options);
    }
    writer.finish()
}

/// Normalize whitespace in plain text.
///
/// Converts line endings to `\n`, collapses horizontal whitespace runs to a
/// single space, trims every line, collapses runs of blank lines to one and
/// trims blank lines from both ends.
pub fn normalize_whitespace(text: &str) -> String {
    let mut writer = LineWriter::new();
    writer.push_text(text);
    render_lines(&writer.finish())
}
