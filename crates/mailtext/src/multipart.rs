//! Generating the text part of a multipart message.
//!
//! Message composition lives outside this crate. Anything that holds message
//! parts implements [`MultipartMessage`]; [`ensure_text_part`] then adds the
//! plain-text alternative when only an HTML part exists.

use log::debug;

use crate::service::TextService;
use crate::{MailTextError, Result};

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";

/// Content type used for generated text parts
pub const GENERATED_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";

/// A single body part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub content_type: String,
    pub body: String,
}

impl Part {
    pub fn new(content_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Media type without parameters, e.g. `text/html` for
    /// `text/html; charset=UTF-8`
    pub fn media_type(&self) -> &str {
        self.content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
    }

    /// Check the media type, ignoring case and parameters
    pub fn is(&self, media_type: &str) -> bool {
        self.media_type().eq_ignore_ascii_case(media_type)
    }
}

/// Capability of a message that carries alternative body parts
pub trait MultipartMessage {
    fn parts(&self) -> &[Part];

    fn insert_part(&mut self, index: usize, content_type: &str, body: String) -> Result<()>;
}

/// A minimal in-memory message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    parts: Vec<Part>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part
    pub fn with_part(mut self, content_type: &str, body: impl Into<String>) -> Self {
        self.parts.push(Part::new(content_type, body));
        self
    }
}

impl MultipartMessage for Message {
    fn parts(&self) -> &[Part] {
        &self.parts
    }

    fn insert_part(&mut self, index: usize, content_type: &str, body: String) -> Result<()> {
        if index > self.parts.len() {
            return Err(MailTextError::InvalidPart {
                index,
                len: self.parts.len(),
            });
        }
        let part = Part::new(content_type, body);
        if !part.media_type().contains('/') {
            return Err(MailTextError::InvalidContentType(content_type.to_string()));
        }
        self.parts.insert(index, part);
        Ok(())
    }
}

/// Add a plain-text part converted from the HTML part.
///
/// Does nothing when the message has no HTML part or already has a text
/// part. The new part is inserted first so it precedes the HTML part.
/// Returns whether a part was inserted.
pub fn ensure_text_part<M>(service: &TextService, message: &mut M) -> Result<bool>
where
    M: MultipartMessage + ?Sized,
{
    let parts = message.parts();
    if parts.iter().any(|p| p.is(TEXT_PLAIN)) {
        return Ok(false);
    }
    let Some(html) = parts.iter().find(|p| p.is(TEXT_HTML)) else {
        return Ok(false);
    };

    let text = service.convert(&html.body);
    debug!("inserting generated text part ({} bytes)", text.len());
    message.insert_part(0, GENERATED_CONTENT_TYPE, text)?;
    Ok(true)
}
