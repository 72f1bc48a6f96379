use std::fmt;
use std::path::Path;

use thiserror::Error;

pub mod docx;
pub mod pdf;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unsupported document format `{extension}`, expected .pdf or .docx")]
    UnsupportedFormat { extension: String },

    #[error("failed to extract text: {0}")]
    Extraction(String),
}

/// Document format, decided once from the uploaded filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Maps a filename extension to a format tag (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(ExtractError::UnsupportedFormat { extension }),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "PDF"),
            DocumentFormat::Docx => write!(f, "DOCX"),
        }
    }
}

/// Extracts the plain text of an in-memory document.
///
/// Returns an empty string when the document parses but carries no text
/// (for example a scanned, image-only PDF). Callers must treat that as a
/// "no content" condition rather than a success with usable text.
pub fn extract(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
    match format {
        DocumentFormat::Pdf => pdf::extract_text(bytes),
        DocumentFormat::Docx => docx::extract_text(bytes),
    }
}
