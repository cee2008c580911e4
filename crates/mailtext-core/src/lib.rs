//! mailtext-core - marker stream and plain-text rendering
//!
//! This crate holds the intermediate representation produced by the
//! `mailtext` structural normalizer and everything that happens after markup
//! is gone: whitespace normalization, heading boxes and line wrapping.
//!
//! # Architecture
//!
//! ```text
//! HTML ──▶ mailtext (tokenize, normalize) ──▶ ┌──────────┐
//!                                             │ Document │ ──▶ layout ──▶ headings ──▶ wrap ──▶ text
//!                                             └──────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use mailtext_core::{serialize, Block, Document, Inline, Options};
//!
//! let doc = Document::new(vec![
//!     Block::Heading {
//!         level: 1,
//!         content: vec![Inline::text("Welcome")],
//!     },
//!     Block::Flow(vec![
//!         Inline::ListItem,
//!         Inline::text("first"),
//!         Inline::ListItem,
//!         Inline::text("second"),
//!     ]),
//! ]);
//!
//! let text = serialize(&doc, &Options::default());
//! assert_eq!(text, "*******\nWelcome\n*******\n\n* first\n* second");
//! ```

mod ast;
mod layout;
mod options;
mod serialize;
mod wrap;

pub use ast::{inlines_are_blank, Block, Document, Inline};
pub use layout::{layout, link_token, normalize_whitespace, render_lines, Line, LineWriter};
pub use options::Options;
pub use serialize::{render_heading, serialize};
pub use wrap::{wrap, wrap_line, wrap_lines};
