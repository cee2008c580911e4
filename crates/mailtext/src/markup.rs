//! Markup tokenizer and tag stripper.
//!
//! A forgiving, single-pass scanner over raw markup. It is not an HTML
//! parser: it recognises tags, comments and declarations, drops elements
//! whose content never reaches the text part and hands everything else to
//! the structural normalizer as a flat token stream. It never fails; input
//! that ends inside a tag or comment is truncated there.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities::decode_entities;
use crate::utilities::{find_ignore_case, is_skipped};

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("attribute pattern is valid")
});

const TEXT_ONLY_START: &str = "start text/html";
const TEXT_ONLY_END: &str = "end text/html";

/// A start or end tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Lowercase tag name
    pub name: String,
    /// Raw attribute source between the name and `>`
    pub attrs: &'a str,
    /// Written as `<name ... />`
    pub self_closing: bool,
    /// The complete source of the tag, `<` to `>`
    pub raw: &'a str,
}

impl Tag<'_> {
    /// Get an attribute value by name, entity-decoded.
    ///
    /// Double-quoted, single-quoted and unquoted values are accepted. An
    /// attribute without a value yields an empty string.
    pub fn attr(&self, name: &str) -> Option<String> {
        ATTRIBUTE.captures_iter(self.attrs).find_map(|caps| {
            let key = caps.get(1)?.as_str();
            if !key.eq_ignore_ascii_case(name) {
                return None;
            }
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            Some(decode_entities(value).into_owned())
        })
    }
}

/// A markup token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Raw text between tags; entities are still encoded
    Text(&'a str),
    Open(Tag<'a>),
    Close(Tag<'a>),
}

/// Iterator over the tokens of a markup string
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Start of the next construct that is markup rather than literal text.
    ///
    /// `<` starts markup when followed by a letter, `!` or `?`; `</` only
    /// when followed by a letter or `>`.
    fn next_markup(&self, from: usize) -> usize {
        let bytes = self.input.as_bytes();
        let mut i = from;
        while let Some(offset) = self.input[i..].find('<') {
            let at = i + offset;
            let is_markup = match bytes.get(at + 1) {
                Some(b'/') => bytes
                    .get(at + 2)
                    .is_some_and(|&b| b.is_ascii_alphabetic() || b == b'>'),
                Some(&b) => b.is_ascii_alphabetic() || matches!(b, b'!' | b'?'),
                None => false,
            };
            if is_markup {
                return at;
            }
            i = at + 1;
        }
        self.input.len()
    }

    /// Stop tokenizing; the rest of the input is unusable
    fn truncate(&mut self, what: &str) {
        trace!("dropping unterminated {} at byte {}", what, self.pos);
        self.pos = self.input.len();
    }

    fn skip_comment(&mut self) {
        let input = self.input;
        // `<!-->` and `<!--->` are complete, empty comments
        for empty in ["<!-->", "<!--->"] {
            if input[self.pos..].starts_with(empty) {
                self.pos += empty.len();
                return;
            }
        }
        let body_start = self.pos + 4;
        let Some(end) = input[body_start..].find("-->") else {
            self.truncate("comment");
            return;
        };
        let body = &input[body_start..body_start + end];
        self.pos = body_start + end + 3;

        if body.trim().eq_ignore_ascii_case(TEXT_ONLY_START) {
            self.skip_text_only_region();
        }
    }

    /// Skip everything up to and including `<!-- end text/html -->`
    fn skip_text_only_region(&mut self) {
        let input = self.input;
        let rest = &input[self.pos..];
        let mut from = 0;
        while let Some(offset) = rest[from..].find("<!--") {
            let open = from + offset + 4;
            let Some(len) = rest[open..].find("-->") else {
                break;
            };
            if rest[open..open + len].trim().eq_ignore_ascii_case(TEXT_ONLY_END) {
                self.pos += open + len + 3;
                return;
            }
            from = open + len + 3;
        }
        self.truncate("html-only region");
    }

    fn skip_declaration(&mut self) {
        match self.input[self.pos..].find('>') {
            Some(end) => self.pos += end + 1,
            None => self.truncate("declaration"),
        }
    }

    /// Index of the `>` closing the tag that starts at `start`.
    ///
    /// Quotes only delimit a value directly after `=`. If a quoted value
    /// never closes, the tag ends at the first `>` instead.
    fn tag_end(&self, start: usize) -> Option<usize> {
        let bytes = self.input.as_bytes();
        let mut quote: Option<u8> = None;
        let mut last = 0u8;

        for (i, &b) in bytes.iter().enumerate().skip(start + 1) {
            match quote {
                Some(q) if b == q => {
                    quote = None;
                    last = b;
                }
                Some(_) => {}
                None if b == b'>' => return Some(i),
                None if matches!(b, b'"' | b'\'') && last == b'=' => quote = Some(b),
                None if !b.is_ascii_whitespace() => last = b,
                None => {}
            }
        }

        self.input[start..].find('>').map(|end| start + end)
    }

    /// Skip the content of a dropped element up to its end tag.
    ///
    /// A missing `</head>` ends at the next `<body`; any other missing end
    /// tag drops the rest of the input.
    fn skip_element(&mut self, name: &str) {
        let input = self.input;
        let rest = &input[self.pos..];
        let close = format!("</{}", name);
        let end = if name == "head" {
            first_of(rest, &[close.as_str(), "<body"])
        } else {
            find_ignore_case(rest, &close).map(|at| (at, 0))
        };

        match end {
            // `<body` starts the content; keep it
            Some((at, 1)) => self.pos += at,
            Some((at, _)) => match rest[at..].find('>') {
                Some(end) => self.pos += at + end + 1,
                None => self.truncate(name),
            },
            None => self.truncate(name),
        }
    }

    /// Read a tag starting at the current position
    fn read_tag(&mut self) -> Option<Token<'a>> {
        let input = self.input;
        let start = self.pos;
        let bytes = input.as_bytes();
        let closing = bytes[start + 1] == b'/';
        let name_start = start + 1 + usize::from(closing);
        let name_end = bytes[name_start..]
            .iter()
            .position(|b| !(b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'_')))
            .map_or(bytes.len(), |n| name_start + n);

        let Some(end) = self.tag_end(start) else {
            self.truncate("tag");
            return None;
        };
        self.pos = end + 1;

        let name = input[name_start..name_end].to_ascii_lowercase();
        if name.is_empty() {
            return None;
        }
        let attrs = &input[name_end.min(end)..end];
        let tag = Tag {
            self_closing: attrs.trim_end().ends_with('/'),
            name,
            attrs,
            raw: &input[start..=end],
        };

        if closing {
            return Some(Token::Close(tag));
        }
        if is_skipped(&tag.name) && !tag.self_closing {
            self.skip_element(&tag.name);
            return None;
        }
        Some(Token::Open(tag))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.input;
        while self.pos < input.len() {
            let start = self.pos;
            let markup = self.next_markup(start);
            if markup > start {
                self.pos = markup;
                return Some(Token::Text(&input[start..markup]));
            }

            let rest = &input[start..];
            if rest.starts_with("<!--") {
                self.skip_comment();
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_declaration();
            } else if let Some(token) = self.read_tag() {
                return Some(token);
            }
        }
        None
    }
}

/// Earliest occurrence of any needle (ASCII case-insensitive) in one forward
/// scan; returns the byte offset and the index of the needle found
fn first_of(haystack: &str, needles: &[&str]) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    haystack.match_indices('<').find_map(|(at, _)| {
        needles.iter().position(|needle| {
            bytes
                .get(at..at + needle.len())
                .is_some_and(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
        })
        .map(|index| (at, index))
    })
}

/// Tokenize markup into a vector
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Tokenizer::new(input).collect()
}

/// Remove all markup, keeping raw text content.
///
/// Comments, declarations and the content of `head`, `title`, `style` and
/// `script` are removed along with the tags. Entities are left encoded.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for token in Tokenizer::new(input) {
        if let Token::Text(text) = token {
            out.push_str(text);
        }
    }
    out
}
