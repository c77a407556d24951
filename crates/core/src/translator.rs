//! The seam between the pipeline and a translation provider.

use crate::error::Result;
use crate::types::LanguagePair;
use async_trait::async_trait;

/// Translates one batch of texts.
///
/// Implementations should return one translation per input, in input order.
/// Callers tolerate a different count: missing entries become empty text.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `texts` from `languages.source()` to `languages.target()`.
    async fn translate_batch(
        &self,
        texts: &[String],
        languages: &LanguagePair,
    ) -> Result<Vec<String>>;
}
