//! Contour-based font size heuristic.
//!
//! Dark-on-light foreground is isolated with an inverted fixed threshold, then
//! the height of every outermost contour's bounding box is taken as a "font
//! size" in pixels. This is a noisy signal, not real glyph metrics.

use image::imageops::replace;
use image::{DynamicImage, GrayImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::contrast::{threshold, ThresholdType};

/// Pixels at or below this intensity count as foreground.
pub const FOREGROUND_THRESHOLD: u8 = 128;

pub fn estimate_font_sizes(image: &DynamicImage) -> Vec<u32> {
    estimate_font_sizes_gray(&image.to_luma8())
}

pub fn estimate_font_sizes_gray(gray: &GrayImage) -> Vec<u32> {
    let binary = threshold(gray, FOREGROUND_THRESHOLD, ThresholdType::BinaryInverted);

    // Contour tracing skips regions touching the left column, so surround the
    // mask with one pixel of background. Heights are offset-invariant.
    let mut padded = GrayImage::new(binary.width() + 2, binary.height() + 2);
    replace(&mut padded, &binary, 1, 1);

    find_contours::<u32>(&padded)
        .into_iter()
        .filter(|c| c.parent.is_none() && matches!(c.border_type, BorderType::Outer))
        .filter_map(|contour| {
            let min_y = contour.points.iter().map(|p| p.y).min()?;
            let max_y = contour.points.iter().map(|p| p.y).max()?;
            Some(max_y - min_y + 1)
        })
        .collect()
}

/// Arithmetic mean, `None` for an empty sample.
pub fn average_font_size(sizes: &[u32]) -> Option<f64> {
    if sizes.is_empty() {
        return None;
    }
    let total: u64 = sizes.iter().map(|&s| u64::from(s)).sum();
    Some(total as f64 / sizes.len() as f64)
}
