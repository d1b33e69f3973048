//! Data types used throughout the crate.
//!
//! - [`color`] - the validated [`Color`] value type
//! - [`report`] - per-image reports and batch entries

pub mod color;
pub mod report;

pub use color::Color;
pub use report::{AnalysisReport, BatchEntry, BatchOutcome, ContrastLevel, ContrastResult};
