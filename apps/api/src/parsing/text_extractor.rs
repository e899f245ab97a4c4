//! Best-effort plain-text extraction from uploaded documents.
//!
//! Never fails: an extraction error is logged and whatever text was
//! accumulated so far (possibly nothing) is returned.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("DOCX XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Document formats the extractor understands, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
    Unknown,
}

impl DocumentFormat {
    pub fn from_filename(filename: &str) -> Self {
        match extension(filename).as_deref() {
            Some("pdf") => DocumentFormat::Pdf,
            Some("docx") => DocumentFormat::Docx,
            Some("txt") | Some("md") => DocumentFormat::PlainText,
            _ => DocumentFormat::Unknown,
        }
    }
}

/// Lowercased extension of `filename`, without the dot.
pub fn extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.trim().rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Pulls plain text out of `bytes`, choosing the format from `filename`'s extension.
pub fn extract_text(bytes: &[u8], filename: &str) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    let format = DocumentFormat::from_filename(filename);
    let mut text = String::new();

    let result = match format {
        DocumentFormat::Pdf => extract_pdf(bytes, &mut text),
        DocumentFormat::Docx => extract_docx(bytes, &mut text),
        DocumentFormat::PlainText => {
            text.push_str(&String::from_utf8_lossy(bytes));
            Ok(())
        }
        DocumentFormat::Unknown => {
            debug!("No text extractor for '{filename}'");
            Ok(())
        }
    };

    if let Err(e) = result {
        warn!("Text extraction from '{filename}' degraded: {e}");
    }

    text
}

fn extract_pdf(bytes: &[u8], out: &mut String) -> Result<(), ExtractError> {
    // pdf-extract panics on some malformed inputs
    let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| ExtractError::Pdf("PDF parser panicked".to_string()))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

    for page in extracted.split('\u{c}') {
        out.push_str(page);
        out.push('\n');
    }
    Ok(())
}

fn extract_docx(bytes: &[u8], out: &mut String) -> Result<(), ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut in_text_run = false;
    let mut paragraph = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                b"w:p" => paragraph.clear(),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => paragraph.push('\t'),
                b"w:br" | b"w:cr" => paragraph.push('\n'),
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text_run => paragraph.push_str(&t.unescape()?),
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    out.push_str(&paragraph);
                    out.push('\n');
                    paragraph.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(extension("Resume.PDF").as_deref(), Some("pdf"));
        assert_eq!(extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension("no_extension"), None);
        assert_eq!(extension(".hidden"), None);
    }

    #[test]
    fn test_format_from_filename() {
        assert_eq!(DocumentFormat::from_filename("cv.pdf"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_filename("cv.DOCX"), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_filename("cv.txt"), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_filename("cv.png"), DocumentFormat::Unknown);
    }

    #[test]
    fn test_unknown_extension_returns_empty() {
        assert_eq!(extract_text(b"some bytes", "photo.png"), "");
    }

    #[test]
    fn test_empty_bytes_return_empty() {
        assert_eq!(extract_text(&[], "resume.pdf"), "");
    }

    #[test]
    fn test_plain_text_passthrough() {
        let text = extract_text("Jane Doe\nSkills\nRust".as_bytes(), "resume.txt");
        assert_eq!(text, "Jane Doe\nSkills\nRust");
    }

    #[test]
    fn test_garbage_pdf_degrades_to_empty() {
        assert_eq!(extract_text(b"definitely not a pdf", "resume.pdf"), "");
    }

    #[test]
    fn test_garbage_docx_degrades_to_empty() {
        assert_eq!(extract_text(b"not a zip archive", "resume.docx"), "");
    }

    #[test]
    fn test_docx_paragraphs_joined_with_newlines() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t>Skills</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Rust, </w:t></w:r><w:r><w:t>SQL &amp; Go</w:t></w:r></w:p>
  </w:body>
</w:document>"#;
        let text = extract_text(&build_docx(xml), "resume.docx");
        assert_eq!(text, "Jane Doe\nSkills\nRust, SQL & Go\n");
    }

    #[test]
    fn test_docx_missing_document_part_is_empty() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"<styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert_eq!(extract_text(&bytes, "resume.docx"), "");
    }
}
