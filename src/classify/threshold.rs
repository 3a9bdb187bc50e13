//! Interval threshold classification.
//!
//! Maps a continuous value to one of a finite set of colors via ordered
//! boundaries: a value below the first boundary takes the first color, a
//! value in `[domain[i-1], domain[i])` takes `range[i]`, and a value at or
//! above the last boundary takes the last color. Out-of-range values
//! therefore clamp to the first/last bucket and every value gets a color.

use super::{is_masked, Classifier, Rgba};
use crate::error::{AeolusError, Result};

/// An ordered-boundary color table with `range.len() == domain.len() + 1`
#[derive(Debug, Clone)]
pub struct IntervalThresholdTable {
    name: String,
    domain: Vec<f64>,
    range: Vec<Rgba>,
}

impl IntervalThresholdTable {
    /// Create a new table. `domain` must be non-empty and non-decreasing,
    /// and `range` must hold exactly one more color than `domain` has
    /// boundaries.
    pub fn new(name: impl Into<String>, domain: Vec<f64>, range: Vec<Rgba>) -> Result<Self> {
        if domain.is_empty() {
            return Err(AeolusError::InvalidParameter {
                param: "domain".to_string(),
                message: "Threshold table must have at least one boundary".to_string(),
            });
        }
        if range.len() != domain.len() + 1 {
            return Err(AeolusError::InvalidParameter {
                param: "range".to_string(),
                message: format!(
                    "Threshold table needs {} colors for {} boundaries, got {}",
                    domain.len() + 1,
                    domain.len(),
                    range.len()
                ),
            });
        }
        if domain.windows(2).any(|w| w[0] > w[1]) {
            return Err(AeolusError::InvalidParameter {
                param: "domain".to_string(),
                message: "Threshold boundaries must be non-decreasing".to_string(),
            });
        }

        Ok(Self {
            name: name.into(),
            domain,
            range,
        })
    }

    /// The bucket index for a value: the number of boundaries at or below it
    pub fn bucket(&self, value: f64) -> usize {
        self.domain.partition_point(|&d| d <= value)
    }

    /// Look up the color for a value, ignoring the transparency band
    pub fn lookup(&self, value: f64) -> Rgba {
        self.range[self.bucket(value)]
    }

    /// The ordered boundaries of this table
    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    /// The colors of this table, one more than there are boundaries
    pub fn range(&self) -> &[Rgba] {
        &self.range
    }
}

impl Classifier for IntervalThresholdTable {
    fn classify(&self, value: f64, transparency: f64) -> Option<Rgba> {
        if is_masked(transparency) {
            return None;
        }
        Some(self.lookup(value))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
