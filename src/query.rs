//! Point queries against the atlas.
//!
//! A query maps a clicked coordinate to a grid cell and reads all three
//! layers there. Geographic misses are sentinel outcomes, never errors:
//! the caller decides whether "out of scope" is worth reporting. Only a
//! structurally broken session (missing layers) is an error.

use serde::Serialize;

use crate::error::{AeolusError, Result};
use crate::session::{AtlasSession, LAYER_OPTIMAL_HEIGHT, LAYER_ROUGHNESS, LAYER_WINDSPEED};

/// The outcome of a point query
#[derive(Debug, Clone, PartialEq)]
pub enum PointOutcome {
    /// The coordinate lies outside the raster bounding box
    OutOfBounds,
    /// The coordinate is inside the box but matched no grid cell within
    /// the tolerance windows
    Unmatched,
    /// The matched cell lies in the cropped (zero-filled) region
    Cropped,
    /// Values at the matched cell
    Sample(PointSample),
}

/// Interpolated layer values at a queried point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSample {
    /// Queried latitude in degrees
    pub lat: f64,
    /// Queried longitude in degrees
    pub lon: f64,
    /// Wind speed at 10 m, in m/s
    pub windspeed: f32,
    /// Roughness length, in m
    pub roughness: f32,
    /// Optimal turbine height, in m
    pub optimal_height: f32,
}

impl PointSample {
    /// Format the sample the way the map popup shows it
    pub fn popup_text(&self) -> String {
        format!(
            "Latitude: {:.4}\nLongitude: {:.4}\nVr (10 m): {:.1} m/s\nRoughness: {:.3}\nOptimal height: {:.1} m",
            self.lat, self.lon, self.windspeed, self.roughness, self.optimal_height
        )
    }
}

/// Query the three atlas layers at a geographic coordinate.
///
/// Applies the bounding-box gate first, then the grid locator, then the
/// cropped-region gate (wind speed and roughness both zero means the cell
/// was zero-filled outside the study area).
pub fn query_point(session: &AtlasSession, lat: f64, lon: f64) -> Result<PointOutcome> {
    let bounds = session.bounds()?;
    if !bounds.contains(lat, lon) {
        return Ok(PointOutcome::OutOfBounds);
    }

    let windspeed_layer = session.get_layer_checked(LAYER_WINDSPEED)?;
    let roughness_layer = session.get_layer_checked(LAYER_ROUGHNESS)?;
    let height_layer = session.get_layer_checked(LAYER_OPTIMAL_HEIGHT)?;

    let index = match windspeed_layer.geometry().locate(lat, lon) {
        Some(index) => index,
        None => return Ok(PointOutcome::Unmatched),
    };

    // locate() only returns in-bounds indices, but the layers are read
    // defensively so a miss can never wrap into another cell
    let (Some(windspeed), Some(roughness), Some(optimal_height)) = (
        windspeed_layer.value_at(index),
        roughness_layer.value_at(index),
        height_layer.value_at(index),
    ) else {
        return Ok(PointOutcome::Unmatched);
    };

    if windspeed == 0.0 && roughness == 0.0 {
        return Ok(PointOutcome::Cropped);
    }

    Ok(PointOutcome::Sample(PointSample {
        lat,
        lon,
        windspeed,
        roughness,
        optimal_height,
    }))
}

/// Parse a `"lat,lon"` pair from a CLI argument
pub fn parse_point(s: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(AeolusError::InvalidParameter {
            param: "query".to_string(),
            message: format!("Expected \"lat,lon\", got \"{}\"", s),
        });
    }

    let lat = parts[0]
        .trim()
        .parse::<f64>()
        .map_err(|_| AeolusError::InvalidParameter {
            param: "query".to_string(),
            message: format!("Invalid latitude: {}", parts[0]),
        })?;
    let lon = parts[1]
        .trim()
        .parse::<f64>()
        .map_err(|_| AeolusError::InvalidParameter {
            param: "query".to_string(),
            message: format!("Invalid longitude: {}", parts[1]),
        })?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(AeolusError::InvalidCoordinates {
            message: format!("Latitude {} outside [-90, 90]", lat),
        });
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(AeolusError::InvalidCoordinates {
            message: format!("Longitude {} outside [-180, 180]", lon),
        });
    }

    Ok((lat, lon))
}
