use serde::{Deserialize, Serialize};

/// Weights of the three score signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub contrast_ratio: f64,
    pub font_size: f64,
    pub color_ratio: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            contrast_ratio: 0.4,
            font_size: 0.3,
            color_ratio: 0.3,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.contrast_ratio + self.font_size + self.color_ratio
    }
}

/// Raw signals fed to [`overall_score`]. Missing values contribute zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInputs {
    /// Contrast ratio minus 1.0, so a logo with no contrast contributes
    /// nothing. Weighted by [`ScoreWeights::contrast_ratio`].
    pub contrast_excess: Option<f64>,
    pub font_size: Option<f64>,
    pub color_ratio: Option<f64>,
}

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// `1 + (weighted_sum / weight_sum) * 9`, clamped to `1.0..=10.0`.
///
/// Inputs are not normalized, so anything but near-zero signals saturates at
/// the upper bound.
pub fn overall_score(inputs: &ScoreInputs, weights: &ScoreWeights) -> f64 {
    let weighted_sum = weights.contrast_ratio * inputs.contrast_excess.unwrap_or(0.0)
        + weights.font_size * inputs.font_size.unwrap_or(0.0)
        + weights.color_ratio * inputs.color_ratio.unwrap_or(0.0);

    let total_weight = weights.sum();
    let scaled = if total_weight > 0.0 {
        MIN_SCORE + (weighted_sum / total_weight) * (MAX_SCORE - MIN_SCORE)
    } else {
        MIN_SCORE
    };

    if scaled.is_nan() {
        return MIN_SCORE;
    }
    scaled.clamp(MIN_SCORE, MAX_SCORE)
}
