//! Core types and text-run processing for PowerPoint slide translation.
//!
//! Slide XML is scanned for `<a:t>` text runs, the run texts are grouped into
//! size-bounded batches for a [`Translator`], and the translations are
//! written back in place without disturbing the rest of the document.

pub mod batch;
pub mod error;
pub mod locate;
pub mod pipeline;
pub mod rewrite;
pub mod translator;
pub mod types;

pub use batch::BatchPlanner;
pub use error::{Error, Result};
pub use locate::{fragment_texts, locate_fragments};
pub use pipeline::{DocumentTranslator, TranslatedDocument};
pub use rewrite::{rewrite_document, xml_escape};
pub use translator::Translator;
pub use types::{DocumentReport, LanguagePair, TextFragment, TranslationOptions};
