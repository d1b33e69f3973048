//! Text recognition backends.
//!
//! The pipeline only sees [`TextRecognizer`]; the shipped backend shells out
//! to a Tesseract binary whose path comes from `[ocr].tesseract_cmd`.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

use image::{GrayImage, ImageFormat};
use thiserror::Error;
use tracing::debug;

use crate::config::OcrConfig;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    NotAvailable(String),
    #[error("OCR engine failed: {0}")]
    Failed(String),
    #[error("Failed to stage image for OCR: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode image for OCR: {0}")]
    Encode(#[from] image::ImageError),
}

/// Extracts text from a grayscale image.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image: &GrayImage) -> Result<String, OcrError>;
}

/// Runs `<cmd> <image.png> stdout -l <language>`.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    cmd: PathBuf,
    language: String,
}

impl TesseractCli {
    pub fn new(cmd: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            language: language.into(),
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(&config.tesseract_cmd, &config.language)
    }
}

impl TextRecognizer for TesseractCli {
    fn recognize(&self, image: &GrayImage) -> Result<String, OcrError> {
        let staged = tempfile::Builder::new()
            .prefix("logocheck-ocr-")
            .suffix(".png")
            .tempfile()?;
        image.save_with_format(staged.path(), ImageFormat::Png)?;

        debug!(cmd = %self.cmd.display(), lang = %self.language, "running tesseract");
        let output = Command::new(&self.cmd)
            .arg(staged.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => OcrError::NotAvailable(format!(
                    "{} not found; set [ocr].tesseract_cmd",
                    self.cmd.display()
                )),
                _ => OcrError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Failed(format!(
                "exit status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Used when OCR is switched off; every image reads as textless.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledOcr;

impl TextRecognizer for DisabledOcr {
    fn recognize(&self, _image: &GrayImage) -> Result<String, OcrError> {
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn missing_binary_reports_not_available() {
        let ocr = TesseractCli::new("/nonexistent/bin/tesseract-logocheck", "eng");
        let img = GrayImage::from_pixel(4, 4, Luma([255]));
        let err = ocr.recognize(&img).unwrap_err();
        assert!(matches!(err, OcrError::NotAvailable(_)), "got {err:?}");
    }

    #[test]
    fn disabled_ocr_returns_empty_text() {
        let img = GrayImage::from_pixel(4, 4, Luma([0]));
        assert_eq!(DisabledOcr.recognize(&img).unwrap(), "");
    }
}
