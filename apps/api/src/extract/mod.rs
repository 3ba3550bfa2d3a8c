//! Resume text extraction from uploaded files.
//!
//! Supports PDF (via `pdf-extract`), DOCX (via `docx-rs`), and plain UTF-8
//! text. Format is decided by magic bytes
//! first, then by file extension or content type.
//!
//! Extraction is CPU-bound; callers run it inside `tokio::task::spawn_blocking`.

pub mod handlers;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use serde::Serialize;
use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}. Upload a PDF, DOCX or plain text file")]
    Unsupported(String),

    #[error("No text could be extracted from the file")]
    Empty,

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Text => "text",
        }
    }

    /// Picks a format from the leading bytes, falling back to the file name
    /// and then the declared content type.
    pub fn detect(bytes: &[u8], filename: Option<&str>, content_type: Option<&str>) -> Result<Self, ExtractError> {
        if bytes.starts_with(PDF_MAGIC) {
            return Ok(DocumentFormat::Pdf);
        }
        if bytes.starts_with(ZIP_MAGIC) {
            return Ok(DocumentFormat::Docx);
        }

        let extension = filename
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => return Ok(DocumentFormat::Pdf),
            Some("docx") => return Ok(DocumentFormat::Docx),
            Some("txt") | Some("md") | Some("text") => return Ok(DocumentFormat::Text),
            Some("doc") => {
                return Err(ExtractError::Unsupported(
                    "legacy .doc (save it as .docx)".to_string(),
                ))
            }
            _ => {}
        }

        if content_type.is_some_and(|ct| ct.starts_with("text/")) {
            return Ok(DocumentFormat::Text);
        }
        if !bytes.contains(&0) && std::str::from_utf8(bytes).is_ok() {
            return Ok(DocumentFormat::Text);
        }

        Err(ExtractError::Unsupported(
            filename
                .or(content_type)
                .unwrap_or("unknown binary data")
                .to_string(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedText {
    pub text: String,
    pub format: DocumentFormat,
    pub characters: usize,
}

/// Extracts trimmed text from an uploaded file.
pub fn extract_text(
    bytes: &[u8],
    filename: Option<&str>,
    content_type: Option<&str>,
) -> Result<ExtractedText, ExtractError> {
    let format = DocumentFormat::detect(bytes, filename, content_type)?;
    let raw = match format {
        DocumentFormat::Pdf => extract_pdf(bytes)?,
        DocumentFormat::Docx => extract_docx(bytes)?,
        DocumentFormat::Text => String::from_utf8_lossy(bytes).into_owned(),
    };

    let text = raw.trim().to_string();
    if text.is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(ExtractedText {
        characters: text.chars().count(),
        text,
        format,
    })
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Flattens a DOCX body into one line per non-empty paragraph. Tabs are kept
/// and every break, page breaks included, becomes a newline.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut lines: Vec<String> = Vec::new();
    for child in docx.document.children.iter() {
        let DocumentChild::Paragraph(paragraph) = child else {
            continue;
        };
        let mut line = String::new();
        for run in paragraph.children.iter().filter_map(|pc| match pc {
            ParagraphChild::Run(run) => Some(run),
            _ => None,
        }) {
            for rc in run.children.iter() {
                match rc {
                    RunChild::Text(t) => line.push_str(&t.text),
                    RunChild::Tab(_) => line.push('\t'),
                    RunChild::Break(_) => line.push('\n'),
                    _ => {}
                }
            }
        }
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines.join("\n"))
}
