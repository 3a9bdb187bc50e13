//! Continuous color scales.
//!
//! Maps a real value directly to a gradient color with no discretization,
//! used for the wind speed and optimal turbine height layers. Values
//! outside the declared domain clamp to the boundary colors.

use colorgrad::{CustomGradient, Gradient};

use super::{is_masked, Classifier, Rgba};
use crate::error::{AeolusError, Result};

/// A gradient over a closed numeric interval
pub struct ContinuousScale {
    name: String,
    gradient: Gradient,
}

impl ContinuousScale {
    /// Build a scale from HTML color stops spread evenly over `domain`
    pub fn new(name: impl Into<String>, colors: &[String], domain: [f64; 2]) -> Result<Self> {
        if domain[0] >= domain[1] {
            return Err(AeolusError::InvalidParameter {
                param: "domain".to_string(),
                message: format!(
                    "Scale domain must satisfy min < max, got [{}, {}]",
                    domain[0], domain[1]
                ),
            });
        }
        if colors.len() < 2 {
            return Err(AeolusError::InvalidParameter {
                param: "colors".to_string(),
                message: "Scale needs at least two color stops".to_string(),
            });
        }

        let stops: Vec<&str> = colors.iter().map(String::as_str).collect();
        let gradient = CustomGradient::new()
            .html_colors(&stops)
            .domain(&domain)
            .build()
            .map_err(|e| AeolusError::Palette {
                message: format!("Failed to build gradient: {}", e),
            })?;

        Ok(Self {
            name: name.into(),
            gradient,
        })
    }

    /// The `[min, max]` domain of this scale
    pub fn domain(&self) -> [f64; 2] {
        let (min, max) = self.gradient.domain();
        [min, max]
    }

    /// Evaluate the scale at a value, clamping to the domain ends
    pub fn color_at(&self, value: f64) -> Rgba {
        let [min, max] = self.domain();
        self.gradient.at(value.clamp(min, max)).to_rgba8()
    }
}

impl Classifier for ContinuousScale {
    fn classify(&self, value: f64, transparency: f64) -> Option<Rgba> {
        if is_masked(transparency) {
            return None;
        }
        Some(self.color_at(value))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for ContinuousScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContinuousScale")
            .field("name", &self.name)
            .field("domain", &self.domain())
            .finish()
    }
}
