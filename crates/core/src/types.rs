//! Domain types shared by the translation pipeline.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::ops::Range;

/// Source language used when a request does not name one.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Target language used when a request does not name one.
pub const DEFAULT_TARGET_LANGUAGE: &str = "ru";

/// Character budget for a single provider request.
pub const DEFAULT_MAX_CHARS: usize = 1400;

/// Cost added to every item in a batch for the separator between items.
pub const DEFAULT_ITEM_OVERHEAD: usize = 11;

/// A text run located inside a slide XML document.
///
/// `document[start..end] == raw_match` always holds for the document the
/// fragment was located in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Byte offset of the opening tag.
    pub start: usize,

    /// Byte offset just past the closing tag.
    pub end: usize,

    /// Opening tag, inner text, and closing tag exactly as they appear.
    pub raw_match: String,

    /// Text between the tags, still XML-escaped.
    pub inner_text: String,
}

impl TextFragment {
    /// Byte range of this fragment in the source document.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The opening tag including its attributes, e.g. `<a:t xml:space="preserve">`.
    pub fn opening_tag(&self) -> &str {
        match self.raw_match.find('>') {
            Some(pos) => &self.raw_match[..=pos],
            None => &self.raw_match,
        }
    }

    /// Inner text with XML entities resolved.
    ///
    /// Falls back to the raw inner text when it contains an entity that
    /// cannot be resolved.
    pub fn decoded_text(&self) -> Cow<'_, str> {
        quick_xml::escape::unescape(&self.inner_text)
            .unwrap_or(Cow::Borrowed(self.inner_text.as_str()))
    }
}

/// Source and target language codes, always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    source: String,
    target: String,
}

impl LanguagePair {
    /// Create a language pair, normalizing both codes to lowercase.
    pub fn new(source: impl AsRef<str>, target: impl AsRef<str>) -> Self {
        Self {
            source: source.as_ref().trim().to_lowercase(),
            target: target.as_ref().trim().to_lowercase(),
        }
    }

    /// Create a language pair from optional request parameters.
    ///
    /// Missing or blank codes fall back to the defaults.
    pub fn from_options(source: Option<&str>, target: Option<&str>) -> Self {
        let pick = |code: Option<&str>, default: &'static str| match code {
            Some(code) if !code.trim().is_empty() => code.to_string(),
            _ => default.to_string(),
        };
        Self::new(
            pick(source, DEFAULT_SOURCE_LANGUAGE),
            pick(target, DEFAULT_TARGET_LANGUAGE),
        )
    }

    /// Source language code.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Target language code.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE)
    }
}

/// Options controlling how documents are batched and rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationOptions {
    /// Character budget for one provider request.
    pub max_chars: usize,

    /// Per-item cost added on top of each text's length.
    pub item_overhead: usize,

    /// Reuse the original opening tag (with its attributes) for rewritten runs.
    pub preserve_run_attributes: bool,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            item_overhead: DEFAULT_ITEM_OVERHEAD,
            preserve_run_attributes: false,
        }
    }
}

impl TranslationOptions {
    /// Create options with the default budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the character budget for one provider request.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars.max(1);
        self
    }

    /// Set the per-item overhead.
    pub fn with_item_overhead(mut self, overhead: usize) -> Self {
        self.item_overhead = overhead;
        self
    }

    /// Keep the attributes of each run's opening tag when rewriting.
    pub fn with_preserve_run_attributes(mut self, preserve: bool) -> Self {
        self.preserve_run_attributes = preserve;
        self
    }
}

/// What happened to a single document during translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Number of text runs located.
    pub fragments: usize,

    /// Number of provider requests made.
    pub batches: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(raw: &str, inner: &str) -> TextFragment {
        TextFragment {
            start: 0,
            end: raw.len(),
            raw_match: raw.to_string(),
            inner_text: inner.to_string(),
        }
    }

    #[test]
    fn test_language_pair_lowercases() {
        let langs = LanguagePair::new("EN", "De");
        assert_eq!(langs.source(), "en");
        assert_eq!(langs.target(), "de");
    }

    #[test]
    fn test_language_pair_defaults() {
        let langs = LanguagePair::from_options(None, Some("  "));
        assert_eq!(langs, LanguagePair::default());
        assert_eq!(langs.source(), "en");
        assert_eq!(langs.target(), "ru");

        let langs = LanguagePair::from_options(Some("FR"), None);
        assert_eq!(langs.source(), "fr");
        assert_eq!(langs.target(), "ru");
    }

    #[test]
    fn test_opening_tag() {
        let frag = fragment(r#"<a:t xml:space="preserve">Hi</a:t>"#, "Hi");
        assert_eq!(frag.opening_tag(), r#"<a:t xml:space="preserve">"#);

        let frag = fragment("<a:t>Hi</a:t>", "Hi");
        assert_eq!(frag.opening_tag(), "<a:t>");
    }

    #[test]
    fn test_decoded_text() {
        let frag = fragment("<a:t>Tom &amp; Jerry</a:t>", "Tom &amp; Jerry");
        assert_eq!(frag.decoded_text(), "Tom & Jerry");
    }

    #[test]
    fn test_decoded_text_falls_back_on_bad_entity() {
        let frag = fragment("<a:t>a &bogus; b</a:t>", "a &bogus; b");
        assert_eq!(frag.decoded_text(), "a &bogus; b");
    }

    #[test]
    fn test_options_builder() {
        let options = TranslationOptions::new()
            .with_max_chars(0)
            .with_item_overhead(3)
            .with_preserve_run_attributes(true);
        assert_eq!(options.max_chars, 1);
        assert_eq!(options.item_overhead, 3);
        assert!(options.preserve_run_attributes);
    }
}
