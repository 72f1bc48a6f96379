//! HTML pages for the upload, summary, and error views.
//!
//! The markup is assembled with `format!` and every interpolated value is
//! escaped, so model output and filenames never reach the page as markup.

use std::path::Path;

use html_escape::{encode_double_quoted_attribute, encode_text};

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
h1 { font-size: 1.4rem; }
form.upload { border: 1px solid #ccc; border-radius: 6px; padding: 1.2rem; }
pre.summary { white-space: pre-wrap; background: #f6f6f6; border-radius: 6px; padding: 1rem; }
p.error { color: #a40000; }
button { padding: 0.4rem 1rem; }
textarea[hidden] { display: none; }";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = encode_text(title),
        body = body,
        STYLE = STYLE,
    )
}

pub fn index_page() -> String {
    page(
        "Document Summarizer",
        "<h1>Document Summarizer</h1>\n\
         <p>Upload your notes as a PDF (<code>.pdf</code>) or Word document (<code>.docx</code>) \
         and get back a concise summary.</p>\n\
         <form class=\"upload\" method=\"post\" action=\"/summarize\" enctype=\"multipart/form-data\">\n\
         <p><input type=\"file\" name=\"document\" accept=\".pdf,.docx\" required></p>\n\
         <p><button type=\"submit\">Summarize</button></p>\n\
         </form>",
    )
}

pub fn summary_page(file_name: &str, summary: &str) -> String {
    let body = format!(
        "<h1>Summary of {name}</h1>\n\
         <pre class=\"summary\">{summary}</pre>\n\
         <form method=\"post\" action=\"/download\">\n\
         <input type=\"hidden\" name=\"file_name\" value=\"{name_attr}\">\n\
         <textarea name=\"summary\" hidden>{summary}</textarea>\n\
         <button type=\"submit\">Download as .txt</button>\n\
         </form>\n\
         <p><a href=\"/\">Summarize another document</a></p>",
        name = encode_text(file_name),
        name_attr = encode_double_quoted_attribute(file_name),
        summary = encode_text(summary),
    );
    page("Summary ready", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Something went wrong</h1>\n\
         <p class=\"error\">{message}</p>\n\
         <p><a href=\"/\">Try another document</a></p>",
        message = encode_text(message),
    );
    page("Summarization failed", &body)
}

/// Derives the download filename from the uploaded document's base name:
/// `lecture 3.pdf` becomes `lecture 3-summary.txt`.
pub fn download_file_name(original: &str) -> String {
    let stem = Path::new(original)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("")
        .trim();

    let safe: String = stem
        .chars()
        .take(120)
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = safe.trim();

    if safe.is_empty() {
        "document-summary.txt".to_string()
    } else {
        format!("{}-summary.txt", safe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_markup_is_escaped() {
        let html = summary_page("notes.pdf", "<script>alert(1)</script> & more");
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&amp; more"));
    }

    #[test]
    fn download_name_derives_from_the_upload_stem() {
        assert_eq!(download_file_name("notes.pdf"), "notes-summary.txt");
        assert_eq!(
            download_file_name("lecture 3.docx"),
            "lecture 3-summary.txt"
        );
    }

    #[test]
    fn download_name_sanitizes_header_breaking_characters() {
        let name = download_file_name("we\"ird\r\nname.pdf");
        assert!(!name.contains('"'));
        assert!(!name.contains('\r'));
        assert!(!name.contains('\n'));
        assert!(name.ends_with("-summary.txt"));
    }

    #[test]
    fn download_name_falls_back_when_no_stem_remains() {
        assert_eq!(download_file_name(""), "document-summary.txt");
    }
}
