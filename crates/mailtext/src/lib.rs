//! # mailtext
//!
//! Convert HTML email bodies to readable plain text.
//!
//! The output is meant for the `text/plain` alternative of a multipart
//! message: markup is stripped, entities are decoded, and structure is kept
//! as plain-text conventions (blank lines between paragraphs, `* ` list
//! items, boxed headings, `text ( href )` links), optionally wrapped to a
//! fixed width.
//!
//! ## Design
//!
//! Conversion is a fixed pipeline of total stages; none of them can fail:
//!
//! - **Tokenize** markup, dropping comments and `head`/`title`/`style`/`script`
//! - **Normalize structure** into a marker stream (`mailtext_core::Document`),
//!   rewriting anchors into links on the way
//! - **Serialize**: lay out whitespace, render heading boxes, wrap
//!
//! Markers are enum variants, never characters, so no input can collide
//! with them.
//!
//! ## Example
//!
//! ```rust
//! use mailtext::TextService;
//!
//! let service = TextService::new();
//! let text = service.convert(r#"<p>Visit <a href="http://example.com/">us</a></p>"#);
//! assert_eq!(text, "Visit us ( http://example.com/ )");
//! ```

pub mod entities;
pub mod links;
pub mod markup;
pub mod multipart;
mod parse;
mod service;
mod utilities;

pub use entities::decode_entities;
pub use links::rewrite_links;
pub use mailtext_core::{normalize_whitespace, wrap, Block, Document, Inline};
pub use markup::strip_tags;
pub use multipart::{ensure_text_part, Message, MultipartMessage, Part};
pub use parse::parse_document;
pub use service::{convert_to_text, TextOptions, TextService};
pub use utilities::*;

/// Error type for mailtext operations.
///
/// Conversion itself never fails; errors come from the multipart surface.
#[derive(Debug, thiserror::Error)]
pub enum MailTextError {
    #[error("Invalid part index {index} for a message with {len} parts")]
    InvalidPart { index: usize, len: usize },

    #[error("Invalid content type: {0}")]
    InvalidContentType(String),
}

pub type Result<T> = std::result::Result<T, MailTextError>;
