//! Report types produced by the analysis pipeline.
//!
//! - [`ContrastLevel`] / [`ContrastResult`] - WCAG-style contrast classification
//! - [`AnalysisReport`] - everything computed for a single logo
//! - [`BatchEntry`] - one row of a multi-image upload, report or error

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ErrorPayload;

/// Contrast classification against the reference background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContrastLevel {
    #[serde(rename = "AAA (Large Text)")]
    Aaa,
    #[serde(rename = "AA (Normal Text)")]
    Aa,
    #[serde(rename = "Fail")]
    Fail,
}

impl ContrastLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ContrastLevel::Aaa => "AAA (Large Text)",
            ContrastLevel::Aa => "AA (Normal Text)",
            ContrastLevel::Fail => "Fail",
        }
    }

    pub fn passes(&self) -> bool {
        !matches!(self, ContrastLevel::Fail)
    }
}

impl fmt::Display for ContrastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    pub ratio: f64,
    pub level: ContrastLevel,
}

/// Result of analysing one logo. Built once by the pipeline, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Mean color as `#RRGGBB`
    pub average_color: String,
    /// Closest CSS color name to the mean color
    pub color_name: Option<String>,
    /// Contrast of the mean color against the reference background (1.0 - 21.0)
    pub contrast_ratio: f64,
    pub contrast_level: ContrastLevel,
    /// OCR output, possibly empty
    pub detected_text: String,
    /// Translation of `detected_text`, or a `Translation failed: ...` placeholder
    pub translated_text: String,
    /// Mean bounding-box height of foreground regions in pixels
    pub font_size: Option<f64>,
    pub color_ratio: f64,
    /// Composite score in `1.0..=10.0`
    pub overall_score: f64,
}

/// One uploaded file's outcome within a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub file_name: String,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchOutcome {
    Analyzed { report: AnalysisReport },
    Failed { error: ErrorPayload },
}

impl BatchEntry {
    pub fn report(&self) -> Option<&AnalysisReport> {
        match &self.outcome {
            BatchOutcome::Analyzed { report } => Some(report),
            BatchOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contrast_level_uses_display_labels_in_json() {
        let json = serde_json::to_string(&ContrastLevel::Aaa).unwrap();
        assert_eq!(json, "\"AAA (Large Text)\"");
        assert_eq!(ContrastLevel::Aa.to_string(), "AA (Normal Text)");
        assert!(!ContrastLevel::Fail.passes());
    }

    #[test]
    fn batch_entry_is_tagged_by_status() {
        let entry = BatchEntry {
            file_name: "broken.png".to_string(),
            outcome: BatchOutcome::Failed {
                error: crate::error::LogoCheckError::Decode("bad header".into()).to_payload(),
            },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["fileName"], "broken.png");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"]["category"], "image");
        assert!(entry.is_failed());
        assert!(entry.report().is_none());
    }
}
