//! HTML character reference decoding.

use std::borrow::Cow;

/// Decode named (`&eacute;`), decimal (`&#231;`) and hex (`&#xE7;`)
/// character references.
///
/// The full HTML5 named-reference table is supported. Unknown references are
/// left untouched. `&nbsp;` decodes to U+00A0, which the layout stage treats
/// as ordinary horizontal whitespace.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    html_escape::decode_html_entities(text)
}
