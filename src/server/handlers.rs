use std::io::Write;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, info, warn};

use super::html::{render_form, render_results};
use super::AppState;
use crate::error::LogoCheckError;
use crate::output::AnalyzeOutput;
use crate::pipeline::LogoAnalyzer;
use crate::types::{BatchEntry, BatchOutcome};

const IMAGES_FIELD: &str = "images";
const TARGET_LANGUAGE_FIELD: &str = "target_language";

pub(super) enum UploadError {
    InvalidForm,
    TooLarge,
    Internal(String),
}

impl UploadError {
    /// Body-limit overruns surface as multipart errors carrying a 413.
    fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge
        } else {
            UploadError::InvalidForm
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match self {
            UploadError::InvalidForm => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid form data" })),
            )
                .into_response(),
            UploadError::TooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(json!({ "error": "Upload too large" })),
            )
                .into_response(),
            UploadError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}

struct Upload {
    target_language: String,
    files: Vec<(String, Bytes)>,
}

pub(super) async fn health() -> &'static str {
    "OK"
}

pub(super) async fn upload_form(State(state): State<AppState>) -> Html<String> {
    Html(render_form(&state.default_target_language))
}

pub(super) async fn upload_page(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Html<String>, UploadError> {
    let (target_language, results) = process_upload(state, multipart).await?;
    Ok(Html(render_results(&target_language, &results)))
}

pub(super) async fn upload_json(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeOutput>, UploadError> {
    let (target_language, results) = process_upload(state, multipart).await?;
    Ok(Json(AnalyzeOutput::new(target_language, results)))
}

async fn process_upload(
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(String, Vec<BatchEntry>), UploadError> {
    let multipart = multipart.map_err(|e| {
        warn!(error = %e, "rejected upload");
        UploadError::from_status(e.status())
    })?;
    let upload = read_upload(multipart, &state.default_target_language).await?;
    info!(
        files = upload.files.len(),
        target = %upload.target_language,
        "analyzing upload"
    );

    let analyzer = state.analyzer.clone();
    let upload_dir = state.upload_dir.clone();
    let target = upload.target_language.clone();
    let results = tokio::task::spawn_blocking(move || {
        analyze_uploads(&analyzer, &upload_dir, &upload.files, &target)
    })
    .await
    .map_err(|e| {
        error!(error = %e, "analysis task failed");
        UploadError::Internal(format!("analysis task failed: {e}"))
    })?;

    Ok((upload.target_language, results))
}

async fn read_upload(mut multipart: Multipart, default_target: &str) -> Result<Upload, UploadError> {
    let mut target_language = default_target.to_string();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!(error = %e, "unreadable multipart body");
        UploadError::from_status(e.status())
    })? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(IMAGES_FIELD) => {
                let file_name = field
                    .file_name()
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("upload-{}", files.len() + 1));
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| UploadError::from_status(e.status()))?;
                if !data.is_empty() {
                    files.push((file_name, data));
                }
            }
            Some(TARGET_LANGUAGE_FIELD) => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| UploadError::from_status(e.status()))?;
                let value = value.trim();
                if !value.is_empty() {
                    target_language = value.to_string();
                }
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(UploadError::InvalidForm);
    }
    Ok(Upload {
        target_language,
        files,
    })
}

/// Stage each upload in its own temp file under `upload_dir`, analyse it, and
/// delete the file before moving on to the next one.
fn analyze_uploads(
    analyzer: &LogoAnalyzer,
    upload_dir: &Path,
    files: &[(String, Bytes)],
    target_language: &str,
) -> Vec<BatchEntry> {
    files
        .iter()
        .map(|(file_name, data)| {
            let staged = tempfile::Builder::new()
                .prefix("logocheck-upload-")
                .tempfile_in(upload_dir)
                .and_then(|mut f| {
                    f.write_all(data)?;
                    f.flush()?;
                    Ok(f)
                });
            match staged {
                Ok(staged) => analyzer.analyze_entry(file_name, staged.path(), target_language),
                Err(err) => BatchEntry {
                    file_name: file_name.clone(),
                    outcome: BatchOutcome::Failed {
                        error: LogoCheckError::Io(err).to_payload(),
                    },
                },
            }
        })
        .collect()
}
