use std::future::Future;

use thiserror::Error;

pub mod gemini;

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("no text to summarize")]
    EmptyInput,

    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),
}

/// The seam between the application shell and the remote model. The shell
/// only depends on this trait, so the pipeline stays testable with fakes.
pub trait Summarize {
    fn summarize(&self, text: &str)
        -> impl Future<Output = Result<String, SummarizeError>> + Send;
}

const PROMPT_PREAMBLE: &str = "Provide a concise and clear summary of the following notes. \
Focus on the main concepts, key facts, and important details. \
Organize the summary logically, using short paragraphs or bullet points, \
so it is easy to understand for someone revising the material.";

/// Builds the fixed instructional prompt with the extracted text embedded.
pub fn build_prompt(text: &str) -> String {
    format!("{}\n\nHere are the notes:\n\n{}", PROMPT_PREAMBLE, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_the_text_after_the_instructions() {
        let prompt = build_prompt("Mitochondria are the powerhouse of the cell.");
        assert!(prompt.starts_with(PROMPT_PREAMBLE));
        assert!(prompt.ends_with("Mitochondria are the powerhouse of the cell."));
    }
}
