//! Color value type shared by the metrics and the report.

use std::fmt;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::{LogoCheckError, Result};

/// Largest value a channel can take.
pub const CHANNEL_MAX: f64 = 255.0;

/// An RGB triple in 0-255 channel units.
///
/// Channels are `f64` because the average color of an image is fractional.
/// Construction goes through [`Color::new`] so every value in circulation has
/// finite channels inside `0.0..=255.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 3]")]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
}

impl Color {
    pub const WHITE: Color = Color {
        red: CHANNEL_MAX,
        green: CHANNEL_MAX,
        blue: CHANNEL_MAX,
    };
    pub const BLACK: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
    };

    pub fn new(red: f64, green: f64, blue: f64) -> Result<Self> {
        for (name, value) in [("red", red), ("green", green), ("blue", blue)] {
            if !value.is_finite() || !(0.0..=CHANNEL_MAX).contains(&value) {
                return Err(LogoCheckError::invalid_input(format!(
                    "{name} channel must be within 0-255, got {value}"
                )));
            }
        }
        Ok(Self { red, green, blue })
    }

    /// Build a color from a channel slice, rejecting anything but three channels.
    pub fn from_channels(channels: &[f64]) -> Result<Self> {
        match channels {
            [r, g, b] => Self::new(*r, *g, *b),
            other => Err(LogoCheckError::invalid_input(format!(
                "expected 3 color channels, got {}",
                other.len()
            ))),
        }
    }

    pub fn red(&self) -> f64 {
        self.red
    }

    pub fn green(&self) -> f64 {
        self.green
    }

    pub fn blue(&self) -> f64 {
        self.blue
    }

    /// Channels scaled into `0.0..=1.0`.
    pub fn to_unit(&self) -> [f64; 3] {
        [
            self.red / CHANNEL_MAX,
            self.green / CHANNEL_MAX,
            self.blue / CHANNEL_MAX,
        ]
    }

    /// Uppercase `#RRGGBB`. Fractional channels are truncated, not rounded.
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}",
            self.red as u8, self.green as u8, self.blue as u8
        )
    }
}

impl From<Srgb<u8>> for Color {
    fn from(c: Srgb<u8>) -> Self {
        Self {
            red: f64::from(c.red),
            green: f64::from(c.green),
            blue: f64::from(c.blue),
        }
    }
}

impl TryFrom<Vec<f64>> for Color {
    type Error = LogoCheckError;

    fn try_from(channels: Vec<f64>) -> Result<Self> {
        Self::from_channels(&channels)
    }
}

impl From<Color> for [f64; 3] {
    fn from(c: Color) -> Self {
        [c.red, c.green, c.blue]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
