//! Locating text runs (`<a:t>` elements) inside slide XML.
//!
//! This is a positional scan, not an XML parse: malformed documents yield
//! whatever the pattern finds and never fail.

use crate::types::TextFragment;
use regex::Regex;
use std::sync::LazyLock;

/// Matches one `<a:t>` element: the exact element name with optional
/// attributes, the shortest possible body, then the closing tag.
///
/// Attribute values may contain `/`. `<a:tbl>`, `<a:tab/>` and a
/// self-closing `<a:t/>` do not match.
static TEXT_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<a:t(?:\s[^>]*[^/>]|\s)?>(.*?)</a:t>").unwrap());

/// Locate every text run in `xml`, in document order.
///
/// Fragments never overlap and their offsets strictly increase.
pub fn locate_fragments(xml: &str) -> Vec<TextFragment> {
    let mut fragments = Vec::new();
    let mut cursor = 0;

    while cursor <= xml.len() {
        let Some(caps) = TEXT_RUN_REGEX.captures_at(xml, cursor) else {
            break;
        };
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        fragments.push(TextFragment {
            start: whole.start(),
            end: whole.end(),
            raw_match: whole.as_str().to_string(),
            inner_text: inner.as_str().to_string(),
        });

        cursor = whole.end();
    }

    fragments
}

/// Decoded text of each fragment, in order.
pub fn fragment_texts(fragments: &[TextFragment]) -> Vec<String> {
    fragments
        .iter()
        .map(|f| f.decoded_text().into_owned())
        .collect()
}
