pub mod config;
pub mod error;
pub mod image_loader;
pub mod metrics;
pub mod ocr;
pub mod output;
pub mod pipeline;
pub mod server;
pub mod translate;
pub mod types;

pub use config::Config;
pub use error::{ErrorCategory, ErrorPayload, LogoCheckError, Result};
pub use image_loader::{load_image, ImageLoadError};
pub use metrics::{
    average_color, average_font_size, contrast, contrast_level, contrast_ratio,
    estimate_font_sizes, nearest_color_name, overall_score, relative_luminance, ScoreInputs,
    ScoreWeights,
};
pub use ocr::{DisabledOcr, OcrError, TesseractCli, TextRecognizer};
pub use output::{AnalyzeOutput, ErrorOutput, LogoCheckOutput, OUTPUT_VERSION};
pub use pipeline::LogoAnalyzer;
pub use server::{build_router, serve, AppState};
pub use translate::{DisabledTranslator, LibreTranslateClient, TranslationError, Translator};
pub use types::{AnalysisReport, BatchEntry, BatchOutcome, Color, ContrastLevel, ContrastResult};
