//! Translation backends.
//!
//! [`LibreTranslateClient`] speaks the LibreTranslate `/translate` JSON API.
//! It uses the blocking reqwest client and must be called off the async
//! runtime (the pipeline always runs inside `spawn_blocking`).

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::TranslationConfig;

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("translation service returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("translation disabled")]
    Disabled,
}

/// Translates text into a target language code (`"fr"`, `"de"`, ...).
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct TranslateErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct LibreTranslateClient {
    endpoint: Url,
    api_key: Option<String>,
    source_language: String,
    timeout: Duration,
}

impl LibreTranslateClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Self {
        Self {
            endpoint,
            api_key: None,
            source_language: "auto".to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &TranslationConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            source_language: config.source_language.clone(),
            timeout: config.timeout,
        }
    }
}

impl Translator for LibreTranslateClient {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError> {
        // Built per call so the client's internal runtime never lives on an async thread.
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        debug!(endpoint = %self.endpoint, target = target_language, "requesting translation");
        let response = client
            .post(self.endpoint.clone())
            .json(&TranslateRequest {
                q: text,
                source: &self.source_language,
                target: target_language,
                format: "text",
                api_key: self.api_key.as_deref(),
            })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<TranslateErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(TranslationError::Status { status, message });
        }

        Ok(response.json::<TranslateResponse>()?.translated_text)
    }
}

/// Always fails, so reports carry the translation-failed placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranslator;

impl Translator for DisabledTranslator {
    fn translate(&self, _text: &str, _target_language: &str) -> Result<String, TranslationError> {
        Err(TranslationError::Disabled)
    }
}
