//! Single-logo analysis: decode, color, OCR, font size, score, translate.
//!
//! [`LogoAnalyzer`] holds no per-request state; one instance is shared by
//! every request and every CLI invocation. All collaborator calls block, so
//! async callers go through `spawn_blocking`.

use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::image_loader::load_image;
use crate::metrics::color::REFERENCE_BACKGROUND;
use crate::metrics::font_size::estimate_font_sizes_gray;
use crate::metrics::{
    average_color, average_font_size, contrast, nearest_color_name, overall_score, ScoreInputs,
    ScoreWeights,
};
use crate::ocr::{DisabledOcr, TesseractCli, TextRecognizer};
use crate::translate::{DisabledTranslator, LibreTranslateClient, Translator};
use crate::types::{AnalysisReport, BatchEntry, BatchOutcome, Color};

pub const TRANSLATION_FAILED_PREFIX: &str = "Translation failed: ";

#[derive(Clone)]
pub struct LogoAnalyzer {
    recognizer: Arc<dyn TextRecognizer>,
    translator: Arc<dyn Translator>,
    weights: ScoreWeights,
    background: Color,
}

impl LogoAnalyzer {
    pub fn new(recognizer: Arc<dyn TextRecognizer>, translator: Arc<dyn Translator>) -> Self {
        Self {
            recognizer,
            translator,
            weights: ScoreWeights::default(),
            background: REFERENCE_BACKGROUND,
        }
    }

    /// Wire the configured Tesseract and translation backends, honouring
    /// their `enabled` switches.
    pub fn from_config(config: &Config) -> Self {
        let recognizer: Arc<dyn TextRecognizer> = if config.ocr.enabled {
            Arc::new(TesseractCli::from_config(&config.ocr))
        } else {
            Arc::new(DisabledOcr)
        };
        let translator: Arc<dyn Translator> = if config.translation.enabled {
            Arc::new(LibreTranslateClient::from_config(&config.translation))
        } else {
            Arc::new(DisabledTranslator)
        };
        Self::new(recognizer, translator).with_weights(config.score_weights)
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn analyze(&self, path: &Path, target_language: &str) -> Result<AnalysisReport> {
        let image = load_image(path)?;
        debug!(path = %path.display(), "decoded image");
        self.analyze_image(&image, target_language)
    }

    pub fn analyze_image(
        &self,
        image: &DynamicImage,
        target_language: &str,
    ) -> Result<AnalysisReport> {
        let mean = average_color(image)?;
        let contrast_result = contrast(&mean, &self.background);
        let color_name = nearest_color_name(&mean);
        debug!(color = %mean, ratio = contrast_result.ratio, "computed color metrics");

        let gray = image.to_luma8();
        let detected_text = match self.recognizer.recognize(&gray) {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "OCR failed; continuing without text");
                String::new()
            }
        };

        let font_sizes = estimate_font_sizes_gray(&gray);
        let font_size = average_font_size(&font_sizes);
        debug!(regions = font_sizes.len(), ?font_size, "estimated font size");

        // The font-size average also fills the color slot.
        let inputs = ScoreInputs {
            contrast_excess: Some(contrast_result.ratio - 1.0),
            font_size,
            color_ratio: font_size,
        };
        let score = overall_score(&inputs, &self.weights);

        let translated_text = match self.translator.translate(&detected_text, target_language) {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, target = target_language, "translation failed");
                format!("{TRANSLATION_FAILED_PREFIX}{err}")
            }
        };

        Ok(AnalysisReport {
            average_color: mean.to_hex(),
            color_name: Some(color_name.to_string()),
            contrast_ratio: contrast_result.ratio,
            contrast_level: contrast_result.level,
            detected_text,
            translated_text,
            font_size,
            color_ratio: contrast_result.ratio,
            overall_score: score,
        })
    }

    /// Analyse one named file into a batch entry. Decode and metric errors
    /// are captured in the entry rather than returned.
    pub fn analyze_entry(&self, file_name: &str, path: &Path, target_language: &str) -> BatchEntry {
        let outcome = match self.analyze(path, target_language) {
            Ok(report) => {
                info!(
                    file = %file_name,
                    score = report.overall_score,
                    level = %report.contrast_level,
                    "analyzed logo"
                );
                BatchOutcome::Analyzed { report }
            }
            Err(err) => {
                warn!(file = %file_name, error = %err, "logo analysis failed");
                BatchOutcome::Failed {
                    error: err.to_payload(),
                }
            }
        };
        BatchEntry {
            file_name: file_name.to_string(),
            outcome,
        }
    }

    /// Analyse `(file_name, path)` pairs strictly in order; one bad file does
    /// not stop the rest of the batch.
    pub fn analyze_batch<P: AsRef<Path>>(
        &self,
        files: &[(String, P)],
        target_language: &str,
    ) -> Vec<BatchEntry> {
        files
            .iter()
            .map(|(file_name, path)| self.analyze_entry(file_name, path.as_ref(), target_language))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::OcrError;
    use crate::translate::TranslationError;
    use crate::types::ContrastLevel;
    use image::{GrayImage, Rgb, RgbImage};
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct FixedText(&'static str);

    impl TextRecognizer for FixedText {
        fn recognize(&self, _image: &GrayImage) -> std::result::Result<String, OcrError> {
            Ok(self.0.to_string())
        }
    }

    struct BrokenOcr;

    impl TextRecognizer for BrokenOcr {
        fn recognize(&self, _image: &GrayImage) -> std::result::Result<String, OcrError> {
            Err(OcrError::NotAvailable("no tesseract".into()))
        }
    }

    #[derive(Default)]
    struct Uppercase {
        calls: Mutex<Vec<(String, String)>>,
    }

    impl Translator for Uppercase {
        fn translate(
            &self,
            text: &str,
            target: &str,
        ) -> std::result::Result<String, TranslationError> {
            self.calls
                .lock()
                .unwrap()
                .push((text.to_string(), target.to_string()));
            Ok(text.to_uppercase())
        }
    }

    fn solid(color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb(color)))
    }

    fn analyzer() -> LogoAnalyzer {
        LogoAnalyzer::new(Arc::new(FixedText("")), Arc::new(Uppercase::default()))
    }

    #[test]
    fn white_logo_scores_the_floor() {
        let report = analyzer().analyze_image(&solid([255, 255, 255]), "fr").unwrap();
        assert_eq!(report.average_color, "#FFFFFF");
        assert_eq!(report.color_name.as_deref(), Some("white"));
        assert_eq!(report.contrast_ratio, 1.0);
        assert_eq!(report.contrast_level, ContrastLevel::Fail);
        assert_eq!(report.detected_text, "");
        assert_eq!(report.font_size, None);
        assert_eq!(report.overall_score, 1.0);
    }

    #[test]
    fn black_logo_is_aaa() {
        let report = analyzer().analyze_image(&solid([0, 0, 0]), "fr").unwrap();
        assert_eq!(report.average_color, "#000000");
        assert_eq!(report.contrast_ratio, 21.0);
        assert_eq!(report.color_ratio, 21.0);
        assert_eq!(report.contrast_level, ContrastLevel::Aaa);
        assert_eq!(report.font_size, Some(16.0));
        assert_eq!(report.overall_score, 10.0);
    }

    #[test]
    fn light_gray_scores_on_contrast_excess_only() {
        let report = analyzer().analyze_image(&solid([200, 200, 200]), "fr").unwrap();
        assert_eq!(report.font_size, None);
        assert!(report.contrast_ratio > 1.0 && report.contrast_ratio < 1.5);

        let expected = 1.0 + 0.4 * (report.contrast_ratio - 1.0) * 9.0;
        assert!(
            (report.overall_score - expected).abs() < 1e-9,
            "{} vs {expected}",
            report.overall_score
        );
    }

    #[test]
    fn translation_failure_only_touches_translated_text() {
        let ok = LogoAnalyzer::new(Arc::new(FixedText("ACME")), Arc::new(Uppercase::default()));
        let failing = LogoAnalyzer::new(Arc::new(FixedText("ACME")), Arc::new(DisabledTranslator));

        let image = solid([30, 60, 90]);
        let good = ok.analyze_image(&image, "de").unwrap();
        let bad = failing.analyze_image(&image, "de").unwrap();

        assert_eq!(good.translated_text, "ACME");
        assert_eq!(bad.translated_text, "Translation failed: translation disabled");
        assert_eq!(
            AnalysisReport {
                translated_text: good.translated_text.clone(),
                ..bad
            },
            good
        );
    }

    #[test]
    fn translator_receives_detected_text_and_target() {
        let translator = Arc::new(Uppercase::default());
        let analyzer = LogoAnalyzer::new(Arc::new(FixedText("hola")), translator.clone());
        let report = analyzer.analyze_image(&solid([200, 10, 10]), "es").unwrap();

        assert_eq!(report.detected_text, "hola");
        assert_eq!(report.translated_text, "HOLA");
        let calls = translator.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[("hola".to_string(), "es".to_string())]);
    }

    #[test]
    fn ocr_failure_yields_empty_text() {
        let analyzer = LogoAnalyzer::new(Arc::new(BrokenOcr), Arc::new(Uppercase::default()));
        let report = analyzer.analyze_image(&solid([0, 0, 255]), "fr").unwrap();
        assert_eq!(report.detected_text, "");
        assert_eq!(report.color_name.as_deref(), Some("blue"));
    }

    #[test]
    fn batch_keeps_order_and_isolates_decode_errors() {
        let dir = TempDir::new().expect("tempdir");
        let white = dir.path().join("white.png");
        let broken = dir.path().join("broken.png");
        let black = dir.path().join("black.png");
        RgbImage::from_pixel(8, 8, Rgb([255, 255, 255]))
            .save(&white)
            .unwrap();
        std::fs::write(&broken, b"not an image").unwrap();
        RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])).save(&black).unwrap();

        let files = vec![
            ("white.png".to_string(), white),
            ("broken.png".to_string(), broken),
            ("black.png".to_string(), black),
        ];
        let entries = analyzer().analyze_batch(&files, "fr");

        let names: Vec<_> = entries.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(names, ["white.png", "broken.png", "black.png"]);
        assert_eq!(entries[0].report().unwrap().average_color, "#FFFFFF");
        assert!(entries[1].is_failed());
        assert_eq!(entries[2].report().unwrap().contrast_ratio, 21.0);
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let err = analyzer()
            .analyze(Path::new("/nonexistent/logo.png"), "fr")
            .unwrap_err();
        assert!(matches!(err, crate::error::LogoCheckError::Decode(_)));
    }
}
