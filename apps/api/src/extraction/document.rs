//! Uploaded file → plain text, ahead of the extraction pipeline.

use std::path::Path;

use bytes::Bytes;
use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Documents yielding this many characters or fewer are rejected as empty scans.
pub const MIN_TEXT_CHARS: usize = 10;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("document contains too little text ({chars} characters)")]
    InsufficientText { chars: usize },

    #[error("failed to read PDF: {0}")]
    Pdf(String),

    #[error("failed to read DOCX: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    /// Detects the kind from the file extension, case-insensitively.
    pub fn from_filename(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub kind: DocumentKind,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Bytes>, kind: DocumentKind) -> Self {
        Self {
            bytes: bytes.into(),
            kind,
        }
    }

    /// Builds a document from an uploaded file name and its contents.
    pub fn from_upload(filename: &str, bytes: impl Into<Bytes>) -> Result<Self, DocumentError> {
        let kind = DocumentKind::from_filename(filename)
            .ok_or_else(|| DocumentError::UnsupportedFormat(filename.to_string()))?;
        Ok(Self::new(bytes, kind))
    }
}

/// Extracts the document's text. CPU-bound; call from a blocking task.
pub fn extract_text(document: &RawDocument) -> Result<String, DocumentError> {
    let text = match document.kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(&document.bytes)
            .map_err(|e| DocumentError::Pdf(e.to_string()))?,
        DocumentKind::Docx => docx_text(&document.bytes)?,
        DocumentKind::Text => String::from_utf8_lossy(&document.bytes).into_owned(),
    };

    let chars = text.trim().chars().count();
    if chars <= MIN_TEXT_CHARS {
        return Err(DocumentError::InsufficientText { chars });
    }
    Ok(text)
}

/// Non-empty body paragraphs, one per line.
fn docx_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let docx = read_docx(bytes).map_err(|e| DocumentError::Docx(e.to_string()))?;

    let mut paragraphs = Vec::new();
    for child in docx.document.children {
        let DocumentChild::Paragraph(para) = child else {
            continue;
        };
        let mut text = String::new();
        for child in &para.children {
            if let ParagraphChild::Run(run) = child {
                for run_child in &run.children {
                    if let RunChild::Text(t) = run_child {
                        text.push_str(&t.text);
                    }
                }
            }
        }
        if !text.trim().is_empty() {
            paragraphs.push(text);
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("cv.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("jane.doe.docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_filename("notes.txt"), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_filename("cv.doc"), None);
        assert_eq!(DocumentKind::from_filename("README"), None);
    }

    #[test]
    fn test_from_upload_rejects_unknown_extension() {
        let err = RawDocument::from_upload("cv.odt", vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedFormat(name) if name == "cv.odt"));
    }

    #[test]
    fn test_plain_text_passthrough() {
        let doc = RawDocument::new("Jane Doe\nSKILLS\nRust", DocumentKind::Text);
        assert_eq!(extract_text(&doc).unwrap(), "Jane Doe\nSKILLS\nRust");
    }

    #[test]
    fn test_short_text_is_insufficient() {
        let doc = RawDocument::new("  tiny   ", DocumentKind::Text);
        let err = extract_text(&doc).unwrap_err();
        assert!(matches!(err, DocumentError::InsufficientText { chars: 4 }));
    }

    #[test]
    fn test_docx_paragraphs_joined_by_newline() {
        let bytes = build_docx(&["Jane Doe", "", "SKILLS", "Python, advanced, 5 years"]);
        let doc = RawDocument::new(bytes, DocumentKind::Docx);
        assert_eq!(
            extract_text(&doc).unwrap(),
            "Jane Doe\nSKILLS\nPython, advanced, 5 years"
        );
    }

    #[test]
    fn test_corrupt_docx_is_error() {
        let doc = RawDocument::new(b"definitely not a zip".to_vec(), DocumentKind::Docx);
        assert!(matches!(extract_text(&doc), Err(DocumentError::Docx(_))));
    }

    #[test]
    fn test_corrupt_pdf_is_error() {
        let doc = RawDocument::new(b"definitely not a pdf".to_vec(), DocumentKind::Pdf);
        assert!(matches!(extract_text(&doc), Err(DocumentError::Pdf(_))));
    }
}
