//! Legend sampling helpers.
//!
//! Legend drawing itself (SVG layout, map controls) lives outside this
//! crate; what lives here is the arithmetic a legend needs: evenly spaced
//! tick values over an interval, swatch colors sampled from a continuous
//! scale, the discretization of a sampled scale into a threshold table,
//! and the linear/log value-to-offset mapping for a legend axis.

use serde::Serialize;

use crate::classify::{Classifier, ContinuousScale, IntervalThresholdTable, Rgba};
use crate::error::{AeolusError, Result};

/// Produce `cardinality` evenly spaced values spanning `interval`.
///
/// The first value is exactly `interval[0]` and the last exactly
/// `interval[1]`. Fails fast on a degenerate interval or on
/// `cardinality < 2`, which would divide by zero in the spacing formula.
pub fn legend_ticks(interval: [f64; 2], cardinality: usize) -> Result<Vec<f64>> {
    let [min, max] = interval;
    if cardinality < 2 {
        return Err(AeolusError::InvalidParameter {
            param: "cardinality".to_string(),
            message: format!("Legend needs at least 2 ticks, got {}", cardinality),
        });
    }
    if min >= max {
        return Err(AeolusError::InvalidParameter {
            param: "interval".to_string(),
            message: format!("Legend interval must satisfy min < max, got [{}, {}]", min, max),
        });
    }

    let step = (max - min) / (cardinality - 1) as f64;
    let ticks = (0..cardinality)
        .map(|i| {
            if i == cardinality - 1 {
                max
            } else {
                min + step * i as f64
            }
        })
        .collect();
    Ok(ticks)
}

/// A sampled legend bar: tick values and their swatch colors, in order
#[derive(Debug, Clone, Serialize)]
pub struct LegendBar {
    /// Tick values, evenly spaced over the scale's domain
    pub ticks: Vec<f64>,
    /// Swatch colors, one per tick
    pub colors: Vec<Rgba>,
}

/// Sample a continuous scale into a legend bar of `cardinality` swatches
pub fn sample_scale(scale: &ContinuousScale, cardinality: usize) -> Result<LegendBar> {
    let ticks = legend_ticks(scale.domain(), cardinality)?;
    let colors = ticks.iter().map(|&t| scale.color_at(t)).collect();
    Ok(LegendBar { ticks, colors })
}

/// Discretize a continuous scale into an interval threshold table.
///
/// The sampled tick colors become the buckets and the interior ticks the
/// boundaries, so the table shape (`range.len() == domain.len() + 1`)
/// holds by construction.
pub fn discretize_scale(
    scale: &ContinuousScale,
    cardinality: usize,
) -> Result<IntervalThresholdTable> {
    let bar = sample_scale(scale, cardinality)?;
    let domain = bar.ticks[1..].to_vec();
    IntervalThresholdTable::new(format!("{}_legend", scale.name()), domain, bar.colors)
}

/// Axis transform for mapping legend values to pixel offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    /// Linear value-to-offset mapping
    Linear,
    /// Logarithmic mapping, for domains spanning orders of magnitude
    /// (the roughness legend uses log over [0.001, 1.6])
    Log,
}

/// A legend axis mapping a value domain onto a pixel extent
#[derive(Debug, Clone, Copy)]
pub struct LegendAxis {
    scale: AxisScale,
    domain: [f64; 2],
    extent: [f64; 2],
}

impl LegendAxis {
    /// Create an axis. The domain must be ordered, and strictly positive
    /// for a log axis.
    pub fn new(scale: AxisScale, domain: [f64; 2], extent: [f64; 2]) -> Result<Self> {
        if domain[0] >= domain[1] {
            return Err(AeolusError::InvalidParameter {
                param: "domain".to_string(),
                message: format!(
                    "Axis domain must satisfy min < max, got [{}, {}]",
                    domain[0], domain[1]
                ),
            });
        }
        if scale == AxisScale::Log && domain[0] <= 0.0 {
            return Err(AeolusError::InvalidParameter {
                param: "domain".to_string(),
                message: format!("Log axis domain must be positive, got min {}", domain[0]),
            });
        }

        Ok(Self {
            scale,
            domain,
            extent,
        })
    }

    /// Map a value to its pixel offset along the axis
    pub fn position(&self, value: f64) -> f64 {
        let t = match self.scale {
            AxisScale::Linear => (value - self.domain[0]) / (self.domain[1] - self.domain[0]),
            AxisScale::Log => {
                (value / self.domain[0]).ln() / (self.domain[1] / self.domain[0]).ln()
            }
        };
        self.extent[0] + t * (self.extent[1] - self.extent[0])
    }
}
