use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info, warn};

use super::pages;
use super::pipeline::{self, InteractionError};
use crate::summarize::gemini::GeminiClient;

/// Upload cap enforced at the body layer; large enough for lecture notes,
/// small enough to keep a single interaction bounded.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Clone)]
struct AppState {
    summarizer: Option<Arc<GeminiClient>>,
}

pub struct SummaryServer {
    bind: String,
    summarizer: Option<GeminiClient>,
}

impl SummaryServer {
    pub fn new(bind: String, summarizer: Option<GeminiClient>) -> Self {
        Self { bind, summarizer }
    }

    pub async fn serve(self) -> Result<()> {
        let state = AppState {
            summarizer: self.summarizer.map(Arc::new),
        };

        let app = Router::new()
            .route("/", get(index))
            .route("/summarize", post(summarize))
            .route("/download", post(download))
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(&self.bind).await?;
        info!("Listening on http://{}", self.bind);
        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn index() -> Html<String> {
    Html(pages::index_page())
}

async fn summarize(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, InteractionError> {
    let (file_name, bytes) = read_upload(&mut multipart).await?;
    info!("Received upload \"{}\" ({} bytes)", file_name, bytes.len());

    let outcome = pipeline::run(&file_name, &bytes, state.summarizer.as_deref()).await?;
    Ok(Html(pages::summary_page(&outcome.file_name, &outcome.summary)))
}

async fn read_upload(multipart: &mut Multipart) -> Result<(String, Vec<u8>), InteractionError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| InteractionError::BadUpload(e.to_string()))?
    {
        if field.name() != Some("document") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| InteractionError::BadUpload("the upload carries no filename".to_string()))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| InteractionError::BadUpload(e.to_string()))?;

        if bytes.is_empty() {
            return Err(InteractionError::BadUpload(
                "the uploaded file is empty".to_string(),
            ));
        }

        return Ok((file_name, bytes.to_vec()));
    }

    Err(InteractionError::BadUpload(
        "no document file was attached".to_string(),
    ))
}

#[derive(Debug, Deserialize)]
struct DownloadRequest {
    file_name: String,
    summary: String,
}

/// Returns the summary exactly as rendered, as a `.txt` attachment named
/// after the uploaded document. The summary travels in the form itself, so
/// no state survives between the summary page and the download.
async fn download(Form(request): Form<DownloadRequest>) -> Response {
    let attachment_name = pages::download_file_name(&request.file_name);
    (
        [
            (
                header::CONTENT_TYPE,
                "text/plain; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", attachment_name),
            ),
        ],
        request.summary,
    )
        .into_response()
}

fn status_for(error: &InteractionError) -> StatusCode {
    match error {
        InteractionError::BadUpload(_) => StatusCode::BAD_REQUEST,
        InteractionError::UnsupportedFormat { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        InteractionError::Extraction(_)
        | InteractionError::NoContent
        | InteractionError::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
        InteractionError::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
        InteractionError::Api(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for InteractionError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            error!("Interaction failed: {}", self);
        } else {
            warn!("Interaction failed: {}", self);
        }
        (status, Html(pages::error_page(&self.to_string()))).into_response()
    }
}
