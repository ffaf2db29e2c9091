//! Text extraction from uploaded resumes.
//!
//! PDF goes through the `pdf-extract` crate. DOCX is a zip archive; the body
//! lives in `word/document.xml`, where each `<w:p>` is a paragraph made of
//! `<w:t>` text runs.

use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::OnceLock;

use crate::error::ExtractError;

/// File extensions the service accepts.
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["pdf", "docx"];

const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Pick the kind from a filename's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            _ => Err(ExtractError::Unsupported(if ext.is_empty() {
                "(none)".to_string()
            } else {
                format!(".{}", ext)
            })),
        }
    }
}

/// Check if a filename has an allowed extension
pub fn allowed_file(filename: &str) -> bool {
    DocumentKind::from_filename(filename).is_ok()
}

/// Extract plain text from an uploaded file.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
    match DocumentKind::from_filename(filename)? {
        DocumentKind::Pdf => extract_pdf(bytes),
        DocumentKind::Docx => extract_docx(bytes),
    }
}

pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Paragraph texts of a DOCX, joined by single spaces.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY)?.read_to_string(&mut xml)?;
    Ok(docx_paragraphs(&xml).join(" "))
}

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<w:p(?:\s[^>]*)?>(.*?)</w:p>").expect("valid paragraph pattern")
    })
}

fn text_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<w:t(?:\s[^>]*)?>([^<]*)</w:t>").expect("valid text run pattern")
    })
}

/// Split `word/document.xml` into paragraph strings.
pub fn docx_paragraphs(xml: &str) -> Vec<String> {
    paragraph_re()
        .captures_iter(xml)
        .map(|para| {
            text_run_re()
                .captures_iter(&para[1])
                .map(|run| decode_xml_entities(&run[1]))
                .collect::<String>()
        })
        .collect()
}

fn decode_xml_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_with_body(xml: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("[Content_Types].xml", options).unwrap();
            writer.write_all(b"<Types/>").unwrap();
            writer.start_file(DOCX_BODY, options).unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("cv.PDF").unwrap(), DocumentKind::Pdf);
        assert_eq!(
            DocumentKind::from_filename("my.resume.docx").unwrap(),
            DocumentKind::Docx
        );
        assert!(matches!(
            DocumentKind::from_filename("cv.doc"),
            Err(ExtractError::Unsupported(ext)) if ext == ".doc"
        ));
        assert!(!allowed_file("resume"));
        assert!(allowed_file("resume.pdf"));
    }

    #[test]
    fn test_docx_paragraphs() {
        let xml = r#"<w:document><w:body>
            <w:p w:rsidR="00A1"><w:pPr><w:pStyle w:val="Title"/></w:pPr>
                <w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
            <w:p><w:r><w:tab/><w:t>Skills: Rust &amp; SQL</w:t></w:r></w:p>
        </w:body></w:document>"#;

        assert_eq!(
            docx_paragraphs(xml),
            vec!["Jane Doe".to_string(), "Skills: Rust & SQL".to_string()]
        );
    }

    #[test]
    fn test_extract_docx_archive() {
        let bytes = docx_with_body(
            "<w:body><w:p><w:r><w:t>Experience</w:t></w:r></w:p><w:p><w:r><w:t>5 years</w:t></w:r></w:p></w:body>",
        );
        assert_eq!(extract_text(&bytes, "cv.docx").unwrap(), "Experience 5 years");
    }

    #[test]
    fn test_docx_without_body_fails() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            writer
                .start_file("other.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.finish().unwrap();
        }
        assert!(matches!(
            extract_docx(&buf.into_inner()),
            Err(ExtractError::Archive(_))
        ));
    }

    #[test]
    fn test_garbage_docx_is_an_error() {
        assert!(extract_text(b"not a zip", "cv.docx").is_err());
        assert!(extract_text(b"whatever", "cv.txt").is_err());
    }
}
