//! Luminance, contrast and color-name helpers.
//!
//! Luminance is the weighted channel sum `0.2126 R + 0.7152 G + 0.0722 B` over
//! channels scaled to `0.0..=1.0`, without sRGB linearization. Channels are
//! always taken in red-green-blue order.

use image::DynamicImage;

use super::color_names::CSS_COLORS;
use crate::error::{LogoCheckError, Result};
use crate::types::{Color, ContrastLevel, ContrastResult};

pub const LUMINANCE_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Minimum ratio for [`ContrastLevel::Aaa`].
pub const AAA_MIN_RATIO: f64 = 7.0;
/// Minimum ratio for [`ContrastLevel::Aa`].
pub const AA_MIN_RATIO: f64 = 4.5;

/// Background logos are scored against.
pub const REFERENCE_BACKGROUND: Color = Color::WHITE;

pub fn relative_luminance(color: &Color) -> f64 {
    let [r, g, b] = color.to_unit();
    LUMINANCE_WEIGHTS[0] * r + LUMINANCE_WEIGHTS[1] * g + LUMINANCE_WEIGHTS[2] * b
}

/// `(L_light + 0.05) / (L_dark + 0.05)`; symmetric and always `>= 1.0`.
pub fn contrast_ratio(a: &Color, b: &Color) -> f64 {
    let mut light = relative_luminance(a);
    let mut dark = relative_luminance(b);
    if light < dark {
        std::mem::swap(&mut light, &mut dark);
    }
    (light + 0.05) / (dark + 0.05)
}

pub fn contrast_level(ratio: f64) -> ContrastLevel {
    if ratio >= AAA_MIN_RATIO {
        ContrastLevel::Aaa
    } else if ratio >= AA_MIN_RATIO {
        ContrastLevel::Aa
    } else {
        ContrastLevel::Fail
    }
}

pub fn contrast(color: &Color, background: &Color) -> ContrastResult {
    let ratio = contrast_ratio(color, background);
    ContrastResult {
        ratio,
        level: contrast_level(ratio),
    }
}

/// Name of the CSS color with the smallest squared RGB distance to `color`.
/// Ties keep the first entry in table order.
pub fn nearest_color_name(color: &Color) -> &'static str {
    let mut best = CSS_COLORS[0].0;
    let mut best_distance = f64::INFINITY;
    for (name, reference) in CSS_COLORS.iter() {
        let reference = Color::from(*reference);
        let dr = reference.red() - color.red();
        let dg = reference.green() - color.green();
        let db = reference.blue() - color.blue();
        let distance = dr * dr + dg * dg + db * db;
        if distance < best_distance {
            best_distance = distance;
            best = *name;
        }
    }
    best
}

/// Mean RGB color over every pixel. Alpha is discarded.
pub fn average_color(image: &DynamicImage) -> Result<Color> {
    let rgb = image.to_rgb8();
    let pixel_count = u64::from(rgb.width()) * u64::from(rgb.height());
    if pixel_count == 0 {
        return Err(LogoCheckError::invalid_input(
            "cannot average the color of an empty image",
        ));
    }

    let mut sums = [0u64; 3];
    for pixel in rgb.pixels() {
        for (sum, channel) in sums.iter_mut().zip(pixel.0) {
            *sum += u64::from(channel);
        }
    }

    let n = pixel_count as f64;
    Color::new(sums[0] as f64 / n, sums[1] as f64 / n, sums[2] as f64 / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn c(r: f64, g: f64, b: f64) -> Color {
        Color::new(r, g, b).unwrap()
    }

    #[test]
    fn identical_colors_have_unit_ratio() {
        for color in [Color::WHITE, Color::BLACK, c(12.0, 200.0, 99.5)] {
            assert_eq!(contrast_ratio(&color, &color), 1.0);
        }
    }

    #[test]
    fn white_on_black_is_twenty_one() {
        assert_eq!(contrast_ratio(&Color::WHITE, &Color::BLACK), 21.0);
    }

    #[test]
    fn contrast_ratio_is_symmetric() {
        let a = c(200.0, 30.0, 40.0);
        let b = c(10.0, 90.0, 250.0);
        assert_eq!(contrast_ratio(&a, &b), contrast_ratio(&b, &a));
        assert!(contrast_ratio(&a, &b) >= 1.0);
    }

    #[test]
    fn luminance_weights_green_most() {
        let red = relative_luminance(&c(255.0, 0.0, 0.0));
        let green = relative_luminance(&c(0.0, 255.0, 0.0));
        let blue = relative_luminance(&c(0.0, 0.0, 255.0));
        assert!((red - 0.2126).abs() < 1e-12);
        assert!(green > red && red > blue);
    }

    #[test]
    fn contrast_level_boundaries() {
        assert_eq!(contrast_level(7.0), ContrastLevel::Aaa);
        assert_eq!(contrast_level(6.999), ContrastLevel::Aa);
        assert_eq!(contrast_level(4.5), ContrastLevel::Aa);
        assert_eq!(contrast_level(4.499), ContrastLevel::Fail);
        assert_eq!(contrast_level(1.0), ContrastLevel::Fail);
        assert_eq!(contrast_level(21.0), ContrastLevel::Aaa);
    }

    #[test]
    fn nearest_color_name_matches_exact_entries() {
        assert_eq!(nearest_color_name(&c(255.0, 0.0, 0.0)), "red");
        assert_eq!(nearest_color_name(&Color::BLACK), "black");
        assert_eq!(nearest_color_name(&Color::WHITE), "white");
        assert_eq!(nearest_color_name(&c(250.0, 5.0, 3.0)), "red");
    }

    #[test]
    fn nearest_color_name_prefers_first_alias() {
        assert_eq!(nearest_color_name(&c(0.0, 255.0, 255.0)), "aqua");
        assert_eq!(nearest_color_name(&c(128.0, 128.0, 128.0)), "gray");
    }

    #[test]
    fn nearest_color_name_is_deterministic() {
        let sample = c(123.4, 56.7, 89.0);
        let first = nearest_color_name(&sample);
        for _ in 0..10 {
            assert_eq!(nearest_color_name(&sample), first);
        }
    }

    #[test]
    fn average_color_of_split_image() {
        let mut img = RgbImage::from_pixel(2, 1, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 100, 51]));
        let avg = average_color(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(avg, c(127.5, 50.0, 25.5));
        assert_eq!(avg.to_hex(), "#7F3219");
    }

    #[test]
    fn reference_background_is_white() {
        let black = contrast(&Color::BLACK, &REFERENCE_BACKGROUND);
        assert_eq!(black.ratio, 21.0);
        assert_eq!(black.level, ContrastLevel::Aaa);
    }
}
