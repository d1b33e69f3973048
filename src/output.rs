//! Documents written by the CLI and the JSON API.

use serde::{Deserialize, Serialize};

use crate::error::ErrorPayload;
use crate::types::BatchEntry;

pub const OUTPUT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum LogoCheckOutput {
    Analyze(AnalyzeOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOutput {
    pub version: String,
    pub target_language: String,
    pub results: Vec<BatchEntry>,
}

impl AnalyzeOutput {
    pub fn new(target_language: impl Into<String>, results: Vec<BatchEntry>) -> Self {
        Self {
            version: OUTPUT_VERSION.to_string(),
            target_language: target_language.into(),
            results,
        }
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|e| e.is_failed()).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    pub error: ErrorPayload,
}

impl ErrorOutput {
    pub fn new(error: ErrorPayload) -> Self {
        Self {
            version: OUTPUT_VERSION.to_string(),
            error,
        }
    }
}
