//! Configuration options for plain-text rendering

/// Options for plain-text rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Maximum line width; `None` or `Some(0)` disables wrapping
    pub line_width: Option<usize>,

    /// Marker written at the start of each list item
    pub list_marker: char,

    /// Rule symbol for level 1 headings
    pub primary_heading_symbol: char,

    /// Rule symbol for level 2-6 headings
    pub secondary_heading_symbol: char,
}

impl Options {
    /// The effective wrap width, if wrapping is enabled
    pub fn wrap_width(&self) -> Option<usize> {
        self.line_width.filter(|&w| w > 0)
    }

    /// Rule symbol for a heading level
    pub fn heading_symbol(&self, level: u8) -> char {
        if level <= 1 {
            self.primary_heading_symbol
        } else {
            self.secondary_heading_symbol
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            line_width: None,
            list_marker: '*',
            primary_heading_symbol: '*',
            secondary_heading_symbol: '-',
        }
    }
}
