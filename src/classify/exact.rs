//! Exact-match classification.
//!
//! Maps a pixel value to a color by equality against a table of canonical
//! values, after rounding both sides to a fixed precision. This is the
//! strategy the roughness layer actually exercises: roughness rasters hold
//! a small set of canonical class values, so an equality lookup is exact
//! by construction. A value not present in the table yields no color.

use super::{is_masked, round_to, Classifier, Rgba};
use crate::error::{AeolusError, Result};

/// A parallel value/color table with equality lookup
#[derive(Debug, Clone)]
pub struct ExactMatchTable {
    name: String,
    values: Vec<f64>,
    colors: Vec<Rgba>,
    decimals: u32,
}

impl ExactMatchTable {
    /// Create a new table. `values` and `colors` must be non-empty and of
    /// equal length; values are stored pre-rounded to `decimals` places.
    pub fn new(
        name: impl Into<String>,
        values: Vec<f64>,
        colors: Vec<Rgba>,
        decimals: u32,
    ) -> Result<Self> {
        if values.is_empty() {
            return Err(AeolusError::InvalidParameter {
                param: "values".to_string(),
                message: "Exact-match table must have at least one value".to_string(),
            });
        }
        if values.len() != colors.len() {
            return Err(AeolusError::InvalidParameter {
                param: "colors".to_string(),
                message: format!(
                    "Exact-match table has {} values but {} colors",
                    values.len(),
                    colors.len()
                ),
            });
        }

        let values = values.into_iter().map(|v| round_to(v, decimals)).collect();
        Ok(Self {
            name: name.into(),
            values,
            colors,
            decimals,
        })
    }

    /// Look up the color for a value, ignoring the transparency band.
    ///
    /// The first matching index wins, mirroring the table's declared order.
    pub fn lookup(&self, value: f64) -> Option<Rgba> {
        let rounded = round_to(value, self.decimals);
        self.values
            .iter()
            .position(|&v| v == rounded)
            .map(|i| self.colors[i])
    }

    /// The canonical values of this table
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The colors of this table, parallel to `values`
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }
}

impl Classifier for ExactMatchTable {
    fn classify(&self, value: f64, transparency: f64) -> Option<Rgba> {
        if is_masked(transparency) {
            return None;
        }
        self.lookup(value)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
