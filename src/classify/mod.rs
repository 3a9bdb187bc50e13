//! Pixel classification strategies for raster rendering.
//!
//! This module defines the common interface for mapping a raster pixel
//! (a value band plus a transparency band) to a display color. Three
//! strategies are provided:
//!
//! - [`ExactMatchTable`]: equality lookup against canonical values after
//!   fixed-precision rounding (used for surface roughness classes)
//! - [`IntervalThresholdTable`]: ordered boundary buckets
//! - [`ContinuousScale`]: direct gradient evaluation with clamping
//!
//! "No color" is expressed as `None`: a renderer cannot paint a missing
//! color without matching on it first.

pub mod continuous;
pub mod exact;
pub mod threshold;

pub use continuous::ContinuousScale;
pub use exact::ExactMatchTable;
pub use threshold::IntervalThresholdTable;

use crate::error::{AeolusError, Result};

/// An RGBA pixel color.
pub type Rgba = [u8; 4];

/// Decimal places used when rounding the transparency band (and
/// roughness-like values) before comparison. Raster decoding introduces
/// floating-point noise that would otherwise defeat equality checks.
pub const BAND_DECIMALS: u32 = 3;

/// Trait for pixel classification implementations
pub trait Classifier: Send + Sync {
    /// Map a pixel (value band, transparency band) to a color.
    ///
    /// Returns `None` when the pixel carries no color: either the
    /// transparency band marks it as outside the cropped region, or the
    /// strategy has no entry for the value.
    fn classify(&self, value: f64, transparency: f64) -> Option<Rgba>;

    /// Get the name of this classifier
    fn name(&self) -> &str;
}

/// Round a value to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Check whether the transparency band marks a pixel as outside the
/// cropped region. The band nominally holds 0 or 255, but arrives with
/// floating-point jitter from the decoder.
pub fn is_masked(transparency: f64) -> bool {
    round_to(transparency, BAND_DECIMALS) == 0.0
}

/// Parse an HTML/CSS color string (e.g. `"#ff7f0e"`) into an RGBA pixel
pub fn parse_color(spec: &str) -> Result<Rgba> {
    let color = colorgrad::Color::from_html(spec).map_err(|e| AeolusError::Palette {
        message: format!("Invalid color '{}': {}", spec, e),
    })?;
    Ok(color.to_rgba8())
}

/// Parse a list of HTML/CSS color strings
pub fn parse_colors(specs: &[String]) -> Result<Vec<Rgba>> {
    specs.iter().map(|s| parse_color(s)).collect()
}
