// PDF text extraction over the `pdf-extract` crate.
// Pages are pulled individually so page order and boundaries stay explicit.

use std::panic;

use super::ExtractError;

/// Extracts the text of every page of a PDF held fully in memory, in page
/// order, joined with a newline boundary between pages.
///
/// `pdf-extract` (via its font handling) can panic on malformed font
/// programs, so the call is wrapped in `catch_unwind` and a panic is
/// reported as an ordinary extraction failure.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| {
        ExtractError::Extraction("PDF parser panicked, likely a malformed font program".to_string())
    })?
    .map_err(|e| ExtractError::Extraction(e.to_string()))?;

    Ok(join_pages(&pages))
}

fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.trim())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_pages_in_order_with_newline_boundary() {
        let pages = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert_eq!(join_pages(&pages), "A\nB\nC");
    }

    #[test]
    fn keeps_empty_pages_as_boundaries() {
        let pages = vec!["First\n".to_string(), "".to_string(), "Third".to_string()];
        assert_eq!(join_pages(&pages), "First\n\nThird");
    }

    #[test]
    fn corrupt_stream_is_an_extraction_error() {
        let result = extract_text(b"%PDF-1.7 truncated garbage");
        match result {
            Err(ExtractError::Extraction(_)) => {}
            other => panic!("expected Extraction error, got {:?}", other),
        }
    }

    #[test]
    fn non_pdf_bytes_are_an_extraction_error() {
        assert!(matches!(
            extract_text(b"definitely not a pdf"),
            Err(ExtractError::Extraction(_))
        ));
    }
}
