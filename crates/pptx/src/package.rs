//! Reading translatable parts from a PPTX package and writing them back.

use ppt_translate_core::{Error, Result};
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Path prefix of slide parts.
pub const SLIDE_PREFIX: &str = "ppt/slides/slide";

/// Path prefix of speaker notes parts.
pub const NOTES_PREFIX: &str = "ppt/notesSlides/notesSlide";

/// MIME type of a PPTX package.
pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Whether the entry at `path` holds slide or notes text that gets translated.
pub fn is_translatable_part(path: &str) -> bool {
    (path.starts_with(SLIDE_PREFIX) || path.starts_with(NOTES_PREFIX)) && path.ends_with(".xml")
}

/// A translatable XML part read from the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPart {
    /// Entry path inside the archive, e.g. `ppt/slides/slide1.xml`.
    pub name: String,

    /// Full XML content.
    pub xml: String,
}

/// Read every translatable part of the package in `data`.
///
/// Parts come back slides first, then notes, each in slide number order.
pub fn read_text_parts(data: &[u8]) -> Result<Vec<TextPart>> {
    let mut archive = open_archive(data)?;

    let names: Vec<String> = archive
        .file_names()
        .filter(|name| is_translatable_part(name))
        .map(str::to_string)
        .collect();

    let mut parts = Vec::with_capacity(names.len());
    for name in names {
        let xml = read_file_from_archive(&mut archive, &name)?;
        parts.push(TextPart { name, xml });
    }

    parts.sort_by(|a, b| part_order(&a.name).cmp(&part_order(&b.name)));
    Ok(parts)
}

/// Rebuild the package in `data`, swapping in `replacements` by entry path.
///
/// Entries without a replacement are copied raw, so their compressed bytes
/// are unchanged. Entry order and the entry set are preserved.
pub fn write_package(data: &[u8], replacements: &HashMap<String, String>) -> Result<Vec<u8>> {
    let mut archive = open_archive(data)?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(data.len())));

    for idx in 0..archive.len() {
        let file = archive
            .by_index_raw(idx)
            .map_err(|e| Error::ZipError(format!("Failed to read entry {}: {}", idx, e)))?;

        match replacements.get(file.name()) {
            Some(xml) => {
                let name = file.name().to_string();
                let options = FileOptions::default()
                    .compression_method(rewrite_method(file.compression()))
                    .last_modified_time(file.last_modified());

                writer
                    .start_file(name.as_str(), options)
                    .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", name, e)))?;
                writer.write_all(xml.as_bytes())?;
                log::debug!("Rewrote {}", name);
            }
            None => {
                let name = file.name().to_string();
                writer
                    .raw_copy_file(file)
                    .map_err(|e| Error::ZipError(format!("Failed to copy '{}': {}", name, e)))?;
            }
        }
    }

    let cursor = writer
        .finish()
        .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;
    Ok(cursor.into_inner())
}

/// Open an in-memory ZIP archive.
fn open_archive(data: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>> {
    ZipArchive::new(Cursor::new(data))
        .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))
}

/// Read a file from the ZIP archive as UTF-8 text.
fn read_file_from_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::XmlError(format!("Failed to read '{}' as text: {}", path, e)))?;

    Ok(content)
}

/// Compression for a rewritten entry: stored stays stored, everything else is deflated.
fn rewrite_method(original: CompressionMethod) -> CompressionMethod {
    match original {
        CompressionMethod::Stored => CompressionMethod::Stored,
        _ => CompressionMethod::Deflated,
    }
}

/// Sort key placing slides before notes, then by slide number.
fn part_order(path: &str) -> (u8, Option<usize>, &str) {
    let kind = if path.starts_with(NOTES_PREFIX) { 1 } else { 0 };
    (kind, extract_slide_number(path), path)
}

/// Extract a slide number from a path like "ppt/slides/slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
