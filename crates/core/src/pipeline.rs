//! Per-document translation: locate, batch, translate, rewrite.

use crate::batch::BatchPlanner;
use crate::error::Result;
use crate::locate::{fragment_texts, locate_fragments};
use crate::rewrite::rewrite_document;
use crate::translator::Translator;
use crate::types::{DocumentReport, LanguagePair, TranslationOptions};

/// A document after translation, with what was done to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedDocument {
    /// The rewritten document. Identical to the input when no runs were found.
    pub xml: String,

    /// Fragment and request counts.
    pub report: DocumentReport,
}

/// Translates XML documents one at a time through a [`Translator`].
pub struct DocumentTranslator<'a> {
    translator: &'a dyn Translator,
    options: TranslationOptions,
}

impl<'a> DocumentTranslator<'a> {
    /// Create a document translator backed by `translator`.
    pub fn new(translator: &'a dyn Translator, options: TranslationOptions) -> Self {
        Self {
            translator,
            options,
        }
    }

    /// The options in use.
    pub fn options(&self) -> &TranslationOptions {
        &self.options
    }

    /// Translate `texts` in planned batches, strictly one batch after another.
    ///
    /// Returns the flattened translations and the number of requests made.
    /// The first failing batch aborts the whole call.
    pub async fn translate_texts(
        &self,
        texts: &[String],
        languages: &LanguagePair,
    ) -> Result<(Vec<String>, usize)> {
        let planner = BatchPlanner::from_options(&self.options);
        let batches = planner.plan(texts);
        let mut translated = Vec::with_capacity(texts.len());

        for (idx, batch) in batches.iter().enumerate() {
            log::debug!(
                "Translating batch {}/{} ({} texts, {} -> {})",
                idx + 1,
                batches.len(),
                batch.len(),
                languages.source(),
                languages.target()
            );

            let part = self.translator.translate_batch(batch, languages).await?;
            if part.len() != batch.len() {
                log::warn!(
                    "Provider returned {} texts for a batch of {}; results may be misaligned",
                    part.len(),
                    batch.len()
                );
            }
            translated.extend(part);
        }

        Ok((translated, batches.len()))
    }

    /// Translate every text run in `xml`.
    ///
    /// A document without runs is returned unchanged and no request is made.
    pub async fn translate_document(
        &self,
        xml: &str,
        languages: &LanguagePair,
    ) -> Result<TranslatedDocument> {
        let fragments = locate_fragments(xml);
        if fragments.is_empty() {
            return Ok(TranslatedDocument {
                xml: xml.to_string(),
                report: DocumentReport::default(),
            });
        }

        let texts = fragment_texts(&fragments);
        let (translated, batches) = self.translate_texts(&texts, languages).await?;

        let xml = rewrite_document(
            xml,
            &fragments,
            &translated,
            self.options.preserve_run_attributes,
        );

        Ok(TranslatedDocument {
            xml,
            report: DocumentReport {
                fragments: fragments.len(),
                batches,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Looks texts up in a dictionary and records every request.
    #[derive(Default)]
    struct DictionaryTranslator {
        words: HashMap<String, String>,
        requests: Mutex<Vec<Vec<String>>>,
        drop_last: bool,
    }

    impl DictionaryTranslator {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                words: pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                ..Self::default()
            }
        }

        fn requests(&self) -> Vec<Vec<String>> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Translator for DictionaryTranslator {
        async fn translate_batch(
            &self,
            texts: &[String],
            _languages: &LanguagePair,
        ) -> Result<Vec<String>> {
            self.requests.lock().unwrap().push(texts.to_vec());
            let mut out: Vec<String> = texts
                .iter()
                .map(|t| self.words.get(t).cloned().unwrap_or_else(|| t.to_uppercase()))
                .collect();
            if self.drop_last {
                out.pop();
            }
            Ok(out)
        }
    }

    struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        async fn translate_batch(
            &self,
            _texts: &[String],
            _languages: &LanguagePair,
        ) -> Result<Vec<String>> {
            Err(Error::ProviderStatus { status: 429 })
        }
    }

    #[tokio::test]
    async fn test_translates_runs() {
        let translator = DictionaryTranslator::new(&[("Hello", "Привет"), ("World", "Мир")]);
        let docs = DocumentTranslator::new(&translator, TranslationOptions::default());

        let doc = docs
            .translate_document("<a:t>Hello</a:t><a:t>World</a:t>", &LanguagePair::default())
            .await
            .unwrap();

        assert_eq!(doc.xml, "<a:t>Привет</a:t><a:t>Мир</a:t>");
        assert_eq!(doc.report, DocumentReport { fragments: 2, batches: 1 });
        assert_eq!(translator.requests(), vec![vec!["Hello", "World"]]);
    }

    #[tokio::test]
    async fn test_document_without_runs_makes_no_request() {
        let translator = DictionaryTranslator::default();
        let docs = DocumentTranslator::new(&translator, TranslationOptions::default());
        let xml = "<p:sld><p:cSld><p:spTree/></p:cSld></p:sld>";

        let doc = docs
            .translate_document(xml, &LanguagePair::default())
            .await
            .unwrap();

        assert_eq!(doc.xml, xml);
        assert_eq!(doc.report, DocumentReport::default());
        assert!(translator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_batches_are_sent_in_order() {
        let translator = DictionaryTranslator::default();
        // Each single-letter text costs 1 + 1 = 2, so two fit per batch.
        let options = TranslationOptions::new().with_max_chars(4).with_item_overhead(1);
        let docs = DocumentTranslator::new(&translator, options);

        let doc = docs
            .translate_document(
                "<a:t>a</a:t><a:t>b</a:t><a:t>c</a:t><a:t>d</a:t><a:t>e</a:t>",
                &LanguagePair::default(),
            )
            .await
            .unwrap();

        assert_eq!(
            doc.xml,
            "<a:t>A</a:t><a:t>B</a:t><a:t>C</a:t><a:t>D</a:t><a:t>E</a:t>"
        );
        assert_eq!(doc.report.batches, 3);
        assert_eq!(
            translator.requests(),
            vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]
        );
    }

    #[tokio::test]
    async fn test_short_response_leaves_empty_runs() {
        let translator = DictionaryTranslator {
            drop_last: true,
            ..DictionaryTranslator::default()
        };
        let docs = DocumentTranslator::new(&translator, TranslationOptions::default());

        let doc = docs
            .translate_document("<a:t>one</a:t> <a:t>two</a:t>", &LanguagePair::default())
            .await
            .unwrap();

        assert_eq!(doc.xml, "<a:t>ONE</a:t> <a:t></a:t>");
    }

    #[tokio::test]
    async fn test_entities_are_decoded_then_escaped_once() {
        let translator = DictionaryTranslator::new(&[("R&D", "НИОКР & Co")]);
        let docs = DocumentTranslator::new(&translator, TranslationOptions::default());

        let doc = docs
            .translate_document("<a:t>R&amp;D</a:t>", &LanguagePair::default())
            .await
            .unwrap();

        assert_eq!(translator.requests(), vec![vec!["R&D"]]);
        assert_eq!(doc.xml, "<a:t>НИОКР &amp; Co</a:t>");
    }

    #[tokio::test]
    async fn test_provider_failure_aborts_document() {
        let docs = DocumentTranslator::new(&FailingTranslator, TranslationOptions::default());

        let err = docs
            .translate_document("<a:t>Hello</a:t>", &LanguagePair::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ProviderStatus { status: 429 }));
    }
}
