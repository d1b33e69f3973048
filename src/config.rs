//! TOML configuration.
//!
//! Every section and field is optional; missing values fall back to
//! [`Config::default`].

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::metrics::ScoreWeights;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ocr: OcrConfig,
    pub translation: TranslationConfig,
    pub server: ServerConfig,
    pub score_weights: ScoreWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub enabled: bool,
    pub tesseract_cmd: PathBuf,
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tesseract_cmd: PathBuf::from("tesseract"),
            language: "eng".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub enabled: bool,
    pub endpoint: Url,
    pub api_key: Option<String>,
    pub source_language: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: Url::parse("http://127.0.0.1:5000/translate")
                .expect("default translation endpoint is a valid URL"),
            api_key: None,
            source_language: "auto".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub max_upload_bytes: usize,
    pub default_target_language: String,
    /// Staging directory for uploads; the system temp directory when unset.
    pub upload_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            max_upload_bytes: 20 * 1024 * 1024,
            default_target_language: "en".to_string(),
            upload_dir: None,
        }
    }
}

impl Config {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.score_weights;
        for (name, value) in [
            ("contrast_ratio", w.contrast_ratio),
            ("font_size", w.font_size),
            ("color_ratio", w.color_ratio),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "score_weights.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if w.sum() <= 0.0 {
            return Err(ConfigError::Invalid(
                "score_weights must not all be zero".to_string(),
            ));
        }

        if self.ocr.language.trim().is_empty() {
            return Err(ConfigError::Invalid("ocr.language must not be empty".into()));
        }
        if self.ocr.tesseract_cmd.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "ocr.tesseract_cmd must not be empty".into(),
            ));
        }

        if !matches!(self.translation.endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "translation.endpoint must be http(s), got {}",
                self.translation.endpoint
            )));
        }
        if self.translation.timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "translation.timeout must be greater than zero".into(),
            ));
        }

        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_upload_bytes must be greater than zero".into(),
            ));
        }
        if let Some(dir) = &self.server.upload_dir {
            if !dir.is_dir() {
                return Err(ConfigError::Invalid(format!(
                    "server.upload_dir {} is not a directory",
                    dir.display()
                )));
            }
        }
        if self.server.default_target_language.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "server.default_target_language must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}
