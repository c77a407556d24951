//! PPTX (Office Open XML) package handling for slide translation.
//!
//! A .pptx file is a ZIP archive of XML parts. Slide and speaker notes parts
//! are read, translated, and written back; every other entry is copied as is.

pub mod package;
pub mod translate;

pub use package::{
    is_translatable_part, read_text_parts, write_package, TextPart, PPTX_CONTENT_TYPE,
};
pub use translate::{PackageReport, PptxTranslator, TranslatedPackage};
