//! The per-interaction pipeline: upload, extract, summarize.
//!
//! Each interaction walks the stages below to completion or fails
//! terminally. Nothing is shared or retained between interactions.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::extract::{self, DocumentFormat, ExtractError};
use crate::summarize::{Summarize, SummarizeError};

/// Raw upload bytes plus the format tag decided once from the filename.
pub struct UploadedDocument {
    pub file_name: String,
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn from_upload(file_name: &str, bytes: &[u8]) -> Result<Self, InteractionError> {
        let format = DocumentFormat::from_file_name(file_name)?;
        Ok(Self {
            file_name: file_name.to_string(),
            format,
            bytes: bytes.to_vec(),
        })
    }
}

/// Result of a completed interaction, held only for rendering and download.
pub struct SummaryOutcome {
    pub file_name: String,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    FileReceived,
    Extracting,
    Extracted,
    Summarizing,
    SummaryReady,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::FileReceived => "file-received",
            Stage::Extracting => "extracting",
            Stage::Extracted => "extracted",
            Stage::Summarizing => "summarizing",
            Stage::SummaryReady => "summary-ready",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug)]
pub enum InteractionError {
    #[error("no API key is configured; set GEMINI_API_KEY and restart the server")]
    MissingCredential,

    #[error("invalid upload: {0}")]
    BadUpload(String),

    #[error("unsupported document format `{extension}`; upload a .pdf or .docx file")]
    UnsupportedFormat { extension: String },

    #[error("could not read the document: {0}")]
    Extraction(String),

    #[error("the document was parsed but contains no extractable text")]
    NoContent,

    #[error("no text was submitted for summarization")]
    InvalidInput,

    #[error("summarization failed: {0}")]
    Api(String),
}

impl From<ExtractError> for InteractionError {
    fn from(error: ExtractError) -> Self {
        match error {
            ExtractError::UnsupportedFormat { extension } => Self::UnsupportedFormat { extension },
            ExtractError::Extraction(message) => Self::Extraction(message),
        }
    }
}

impl From<SummarizeError> for InteractionError {
    fn from(error: SummarizeError) -> Self {
        match error {
            SummarizeError::EmptyInput => Self::InvalidInput,
            other => Self::Api(other.to_string()),
        }
    }
}

/// Runs one interaction to completion.
///
/// Ordering guarantees:
/// - a missing credential fails before anything else happens;
/// - an unsupported extension fails before the extractor runs;
/// - empty extracted text fails before the summarizer is invoked.
pub async fn run<S: Summarize>(
    file_name: &str,
    bytes: &[u8],
    summarizer: Option<&S>,
) -> Result<SummaryOutcome, InteractionError> {
    let summarizer = summarizer.ok_or(InteractionError::MissingCredential)?;

    debug!("stage {}: \"{}\"", Stage::FileReceived, file_name);
    let document = UploadedDocument::from_upload(file_name, bytes)?;

    debug!(
        "stage {}: {} bytes as {}",
        Stage::Extracting,
        document.bytes.len(),
        document.format
    );
    let text = extract::extract(&document.bytes, document.format)?;

    debug!("stage {}: {} characters", Stage::Extracted, text.len());
    if text.trim().is_empty() {
        return Err(InteractionError::NoContent);
    }

    debug!("stage {}", Stage::Summarizing);
    let summary = summarizer.summarize(&text).await?;

    info!(
        "stage {}: \"{}\" summarized to {} characters",
        Stage::SummaryReady,
        document.file_name,
        summary.len()
    );

    Ok(SummaryOutcome {
        file_name: document.file_name,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Mutex;

    use docx_rs::{Docx, Paragraph, Run};

    use super::*;

    struct FakeSummarizer {
        reply: String,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSummarizer {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Summarize for FakeSummarizer {
        async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
            self.calls.lock().unwrap().push(text.to_string());
            Ok(self.reply.clone())
        }
    }

    fn docx_bytes(docx: Docx) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).expect("pack docx");
        cursor.into_inner()
    }

    fn notes_docx() -> Vec<u8> {
        docx_bytes(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Alpha")))
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Beta"))),
        )
    }

    #[tokio::test]
    async fn happy_path_returns_the_summary_verbatim() {
        let fake = FakeSummarizer::replying("A fine summary.");
        let outcome = run("notes.docx", &notes_docx(), Some(&fake)).await.unwrap();

        assert_eq!(outcome.file_name, "notes.docx");
        assert_eq!(outcome.summary, "A fine summary.");

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], "Alpha\nBeta");
    }

    #[tokio::test]
    async fn missing_credential_fails_before_extraction() {
        let result = run("notes.docx", b"not even a docx", None::<&FakeSummarizer>).await;
        assert!(matches!(result, Err(InteractionError::MissingCredential)));
    }

    #[tokio::test]
    async fn unsupported_extension_fails_without_invoking_anything() {
        let fake = FakeSummarizer::replying("unused");
        let result = run("photo.png", b"\x89PNG", Some(&fake)).await;

        match result {
            Err(InteractionError::UnsupportedFormat { extension }) => {
                assert_eq!(extension, "png");
            }
            other => panic!("expected UnsupportedFormat, got {:?}", other.err()),
        }
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_document_fails_with_no_content_before_summarizing() {
        let fake = FakeSummarizer::replying("unused");
        let empty = docx_bytes(Docx::new().add_paragraph(Paragraph::new()));
        let result = run("empty.docx", &empty, Some(&fake)).await;

        assert!(matches!(result, Err(InteractionError::NoContent)));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn corrupt_document_fails_without_summarizing() {
        let fake = FakeSummarizer::replying("unused");
        let result = run("broken.docx", b"corrupted bytes", Some(&fake)).await;

        assert!(matches!(result, Err(InteractionError::Extraction(_))));
        assert!(fake.calls().is_empty());
    }
}
