//! HTTP front end: upload form, HTML results page and a JSON API.

mod handlers;
mod html;

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::LogoAnalyzer;

/// Target languages offered by the upload form, as `(code, label)`.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("fr", "French"),
    ("de", "German"),
    ("es", "Spanish"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("nl", "Dutch"),
    ("ru", "Russian"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("ja", "Japanese"),
    ("zh", "Chinese"),
];

#[derive(Clone)]
pub struct AppState {
    pub analyzer: LogoAnalyzer,
    pub default_target_language: String,
    pub max_upload_bytes: usize,
    /// Where uploads are staged while they are analysed.
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            analyzer: LogoAnalyzer::from_config(config),
            default_target_language: config.server.default_target_language.clone(),
            max_upload_bytes: config.server.max_upload_bytes,
            upload_dir: config
                .server
                .upload_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);
    Router::new()
        .route("/", get(handlers::upload_form).post(handlers::upload_page))
        .route("/api/analyze", post(handlers::upload_json))
        .route("/health", get(handlers::health))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: &Config, bind: SocketAddr) -> Result<()> {
    let app = build_router(AppState::from_config(config));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Logo check listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
