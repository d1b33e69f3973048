use crate::image_loader::ImageLoadError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogoCheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl LogoCheckError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        LogoCheckError::InvalidInput(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            LogoCheckError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            LogoCheckError::Decode(msg) => ErrorPayload::new(
                ErrorCategory::Image,
                msg.to_string(),
                "Upload a PNG, JPEG, GIF, WebP, BMP, TIFF or ICO image.",
            ),
            LogoCheckError::InvalidInput(msg) => ErrorPayload::new(
                ErrorCategory::Metric,
                msg.to_string(),
                "Inspect metric inputs; try rerunning with --verbose.",
            ),
            LogoCheckError::Config(msg) => ErrorPayload::new(
                ErrorCategory::Config,
                msg.to_string(),
                "Check flags/paths and the TOML config file.",
            ),
            LogoCheckError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

impl From<ImageLoadError> for LogoCheckError {
    fn from(err: ImageLoadError) -> Self {
        match err {
            ImageLoadError::Load(e) => LogoCheckError::Decode(e.to_string()),
            ImageLoadError::NotFound(path) => {
                LogoCheckError::Decode(format!("File not found: {}", path))
            }
            ImageLoadError::Empty => LogoCheckError::Decode("Image has no pixels".to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, LogoCheckError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Image,
    Metric,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_map_to_image_category() {
        let err = LogoCheckError::from(ImageLoadError::NotFound("/tmp/missing.png".into()));
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Image);
        assert!(payload.message.contains("/tmp/missing.png"));
        assert!(payload.remediation.is_some());
    }

    #[test]
    fn payload_serializes_lowercase_category() {
        let payload = LogoCheckError::invalid_input("bad channel").to_payload();
        let json = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(json["category"], "metric");
        assert_eq!(json["message"], "bad channel");
    }
}
