//! Marker stream
//!
//! The structural normalizer turns markup into this intermediate form. Every
//! structural boundary is an enum variant, so literal input text can never be
//! mistaken for a marker.

/// A block of the marker stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Running content: paragraphs, breaks, list items and links
    Flow(Vec<Inline>),

    /// Heading with level (1-6) and inline content
    Heading { level: u8, content: Vec<Inline> },
}

impl Block {
    /// Check whether the block would render to nothing
    pub fn is_blank(&self) -> bool {
        match self {
            Block::Flow(inlines) | Block::Heading { content: inlines, .. } => {
                inlines_are_blank(inlines)
            }
        }
    }
}

/// An inline marker or run of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Decoded text; newlines inside it are significant
    Text(String),

    /// `<br>`: ends the current line
    LineBreak,

    /// `<p>` boundary: ends the line and leaves one blank line
    ParagraphBreak,

    /// `<li>`: starts a fresh line with the list marker; an item with no
    /// visible content renders nothing
    ListItem,

    /// Other block boundaries: start a fresh line if the current one has content
    BlockBoundary,

    /// Rewritten anchor, rendered as `text ( href )`
    Link { text: String, href: String },
}

impl Inline {
    /// Create a text inline
    pub fn text(content: impl Into<String>) -> Self {
        Inline::Text(content.into())
    }

    /// Check whether this inline contributes visible characters
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(text) => text.trim().is_empty(),
            Inline::Link { text, .. } => text.trim().is_empty(),
            Inline::ListItem
            | Inline::LineBreak
            | Inline::ParagraphBreak
            | Inline::BlockBoundary => true,
        }
    }
}

/// Check if every inline in the slice is blank
pub fn inlines_are_blank(inlines: &[Inline]) -> bool {
    inlines.iter().all(Inline::is_blank)
}

/// A converted document: blocks in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Number of blocks that will produce output
    pub fn visible_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_blank()).count()
    }
}
