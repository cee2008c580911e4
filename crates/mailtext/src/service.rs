//! TextService - the main entry point for HTML to plain-text conversion.

use log::debug;
use mailtext_core::{serialize, Options};

use crate::parse::parse_document;

/// Options for TextService
pub type TextOptions = Options;

/// The main service for converting HTML to plain text.
///
/// Conversion is pure: the service holds only its options and can be shared
/// between threads freely.
#[derive(Debug, Clone, Default)]
pub struct TextService {
    options: TextOptions,
}

impl TextService {
    /// Create a new TextService with default options (no wrapping)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a TextService with custom options
    pub fn with_options(options: TextOptions) -> Self {
        Self { options }
    }

    /// Set the maximum line width; `None` or `0` disables wrapping
    pub fn line_width(mut self, width: Option<usize>) -> Self {
        self.options.line_width = width;
        self
    }

    /// Set the list item marker
    pub fn list_marker(mut self, marker: char) -> Self {
        self.options.list_marker = marker;
        self
    }

    /// Get the current options
    pub fn options(&self) -> &TextOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut TextOptions {
        &mut self.options
    }

    /// Convert HTML (a full document or a fragment) to plain text.
    ///
    /// Never fails: malformed markup degrades to a best-effort rendering.
    pub fn convert(&self, html: impl AsRef<str>) -> String {
        let html = html.as_ref();
        let document = parse_document(html);
        let text = serialize(&document, &self.options);
        debug!(
            "converted {} bytes of html ({} blocks) to {} bytes of text",
            html.len(),
            document.visible_blocks(),
            text.len()
        );
        text
    }
}

/// Convert HTML to plain text, optionally wrapping at `max_line_width`
/// columns.
///
/// ```rust
/// use mailtext::convert_to_text;
///
/// let text = convert_to_text("<h1>Test</h1><p>Hello <b>world</b></p>", None);
/// assert_eq!(text, "****\nTest\n****\n\nHello world");
/// ```
pub fn convert_to_text(html: impl AsRef<str>, max_line_width: Option<usize>) -> String {
    TextService::new().line_width(max_line_width).convert(html)
}
