pub mod color;
pub mod color_names;
pub mod font_size;
pub mod scoring;

pub use color::{
    average_color, contrast, contrast_level, contrast_ratio, nearest_color_name,
    relative_luminance, REFERENCE_BACKGROUND,
};
pub use font_size::{average_font_size, estimate_font_sizes};
pub use scoring::{overall_score, ScoreInputs, ScoreWeights};
