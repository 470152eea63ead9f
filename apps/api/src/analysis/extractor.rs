//! Text extraction — turns an uploaded resume document into plain text.
//!
//! Format dispatch happens on the declared filename suffix only (case
//! insensitive), never on content sniffing. Exactly two formats are
//! supported; everything else is rejected before any parsing library runs.

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use crate::errors::AnalysisError;

/// A supported upload format, decided from the declared filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Matches the filename suffix case-insensitively. Any other suffix is
    /// an `UnsupportedFormat` error; no extraction is attempted for it.
    pub fn from_filename(filename: &str) -> Result<Self, AnalysisError> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(DocumentFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Ok(DocumentFormat::Docx)
        } else {
            Err(AnalysisError::UnsupportedFormat(format!(
                "'{filename}' is not a supported file type. Please use .pdf or .docx files only"
            )))
        }
    }
}

/// Extracts plain text from an uploaded document.
///
/// Returns `UnsupportedFormat` for an unrecognized suffix, `Extraction` when
/// the document cannot be read or yields no text. No retries.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, AnalysisError> {
    let text = match DocumentFormat::from_filename(filename)? {
        DocumentFormat::Pdf => extract_pdf(bytes)?,
        DocumentFormat::Docx => extract_docx(bytes)?,
    };

    if text.trim().is_empty() {
        return Err(AnalysisError::Extraction(format!(
            "'{filename}' contained no extractable text"
        )));
    }

    Ok(text)
}

/// PDF extraction is delegated wholesale to `pdf-extract`: reading order and
/// whitespace normalization are the library's best effort, treated as a
/// black box returning linear text.
fn extract_pdf(bytes: &[u8]) -> Result<String, AnalysisError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AnalysisError::Extraction(format!("failed to read PDF: {e}")))
}

/// Word documents: every paragraph's text in document order, joined by
/// single newlines. Paragraphs with no text contribute empty lines, so the
/// output preserves document structure rather than filtering it.
fn extract_docx(bytes: &[u8]) -> Result<String, AnalysisError> {
    let docx =
        read_docx(bytes).map_err(|e| AnalysisError::Extraction(format!("failed to read DOCX: {e}")))?;

    let lines: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(&p.children)),
            _ => None,
        })
        .collect();

    Ok(lines.join("\n"))
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    match rc {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        _ => {}
                    }
                }
            }
            // Hyperlink text lives in nested runs
            ParagraphChild::Hyperlink(link) => text.push_str(&paragraph_text(&link.children)),
            _ => {}
        }
    }
    text
}
