//! Rebuilding a document with translated text runs.

use crate::types::TextFragment;

/// Opening tag emitted for rewritten runs.
pub const TEXT_RUN_OPEN: &str = "<a:t>";

/// Closing tag emitted for rewritten runs.
pub const TEXT_RUN_CLOSE: &str = "</a:t>";

/// Escape text for use as XML character data.
///
/// Double quotes are left as they are; they need no escaping in element
/// content.
pub fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Replace every fragment of `xml` with a run holding the matching translation.
///
/// `fragments` must have been located in `xml`. A fragment without a
/// translation at its index gets an empty run; extra translations are
/// ignored. Bytes outside fragment spans are copied unchanged.
pub fn rewrite_document<S: AsRef<str>>(
    xml: &str,
    fragments: &[TextFragment],
    translations: &[S],
    preserve_run_attributes: bool,
) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut cursor = 0;

    for (idx, fragment) in fragments.iter().enumerate() {
        out.push_str(&xml[cursor..fragment.start]);

        let text = translations.get(idx).map(|t| t.as_ref()).unwrap_or_default();
        if preserve_run_attributes {
            out.push_str(fragment.opening_tag());
        } else {
            out.push_str(TEXT_RUN_OPEN);
        }
        out.push_str(&xml_escape(text));
        out.push_str(TEXT_RUN_CLOSE);

        cursor = fragment.end;
    }

    out.push_str(&xml[cursor..]);
    out
}
