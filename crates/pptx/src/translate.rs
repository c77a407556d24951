//! Translating every slide and notes part of a PPTX package.

use crate::package::{read_text_parts, write_package};
use ppt_translate_core::{
    DocumentTranslator, Error, LanguagePair, Result, TranslationOptions, Translator,
};
use std::collections::HashMap;

/// Totals for one translated package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackageReport {
    /// Translatable parts found.
    pub parts: usize,

    /// Parts whose content changed and were rewritten.
    pub rewritten: usize,

    /// Text runs located across all parts.
    pub fragments: usize,

    /// Provider requests made across all parts.
    pub batches: usize,
}

/// A translated package.
#[derive(Debug, Clone)]
pub struct TranslatedPackage {
    /// The rewritten PPTX bytes.
    pub bytes: Vec<u8>,

    /// What was done.
    pub report: PackageReport,
}

/// Translates the text of whole PPTX packages.
pub struct PptxTranslator<'a> {
    documents: DocumentTranslator<'a>,
}

impl<'a> PptxTranslator<'a> {
    /// Create a package translator backed by `translator`.
    pub fn new(translator: &'a dyn Translator, options: TranslationOptions) -> Self {
        Self {
            documents: DocumentTranslator::new(translator, options),
        }
    }

    /// Translate every slide and notes part of the package in `data`.
    ///
    /// Parts are handled one after another. Any failure aborts the whole
    /// package; nothing is written until every part is translated.
    pub async fn translate(
        &self,
        data: &[u8],
        languages: &LanguagePair,
    ) -> Result<TranslatedPackage> {
        if data.is_empty() {
            return Err(Error::InvalidInput("Empty document".to_string()));
        }

        let parts = read_text_parts(data)?;
        let mut report = PackageReport {
            parts: parts.len(),
            ..PackageReport::default()
        };
        let mut replacements = HashMap::new();

        for part in parts {
            let translated = self
                .documents
                .translate_document(&part.xml, languages)
                .await?;

            log::debug!(
                "{}: {} fragments in {} batches",
                part.name,
                translated.report.fragments,
                translated.report.batches
            );
            report.fragments += translated.report.fragments;
            report.batches += translated.report.batches;

            if translated.xml != part.xml {
                replacements.insert(part.name, translated.xml);
            }
        }

        report.rewritten = replacements.len();
        let bytes = write_package(data, &replacements)?;

        log::info!(
            "Translated {} of {} parts ({} fragments, {} requests, {} -> {})",
            report.rewritten,
            report.parts,
            report.fragments,
            report.batches,
            languages.source(),
            languages.target()
        );

        Ok(TranslatedPackage { bytes, report })
    }
}
