//! Atlas session management.
//!
//! The session owns the loaded raster layers and the configuration for
//! one atlas. Layers are immutable after load: classification, rendering
//! and point queries all borrow from the session, so sharing it across
//! threads is safe by construction.

use std::collections::HashMap;

use crate::config::Config;
use crate::error::{AeolusError, Result};
use crate::grid::{BoundingBox, RasterLayer};

/// Name of the wind speed layer (Vr at 10 m, in m/s)
pub const LAYER_WINDSPEED: &str = "windspeed";
/// Name of the surface roughness layer (roughness length, in m)
pub const LAYER_ROUGHNESS: &str = "roughness";
/// Name of the optimal turbine height layer (in m)
pub const LAYER_OPTIMAL_HEIGHT: &str = "optimal_height";

/// The standard atlas layers, in rendering order
pub const ATLAS_LAYERS: [&str; 3] = [LAYER_WINDSPEED, LAYER_ROUGHNESS, LAYER_OPTIMAL_HEIGHT];

/// The session owning configuration and loaded layers
#[derive(Debug, Clone)]
pub struct AtlasSession {
    /// Configuration
    pub config: Config,
    /// Loaded raster layers by name
    pub layers: HashMap<String, RasterLayer>,
}

impl AtlasSession {
    /// Create a new AtlasSession
    pub fn new(config: Config, layers: HashMap<String, RasterLayer>) -> Self {
        Self { config, layers }
    }

    /// Get a layer by name
    pub fn get_layer(&self, name: &str) -> Option<&RasterLayer> {
        self.layers.get(name)
    }

    /// Get a layer by name with error handling
    pub fn get_layer_checked(&self, name: &str) -> Result<&RasterLayer> {
        self.layers.get(name).ok_or_else(|| AeolusError::DataNotFound {
            message: format!("Layer not found: {}", name),
        })
    }

    /// Check if a layer exists
    pub fn has_layer(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// The bounding box shared by the atlas layers
    pub fn bounds(&self) -> Result<BoundingBox> {
        let layer = self
            .layers
            .values()
            .next()
            .ok_or_else(|| AeolusError::DataNotFound {
                message: "Session has no layers".to_string(),
            })?;
        Ok(layer.geometry().bounds())
    }

    /// Validate that the session is consistent and ready for use.
    ///
    /// All layers must share grid dimensions and bounds: the point query
    /// reads one cell index across every layer.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(AeolusError::DataNotFound {
                message: "Session has no layers".to_string(),
            });
        }

        let mut reference: Option<(&str, &RasterLayer)> = None;
        for (name, layer) in &self.layers {
            match reference {
                None => reference = Some((name, layer)),
                Some((ref_name, ref_layer)) => {
                    let ref_geom = ref_layer.geometry();
                    let geom = layer.geometry();
                    if geom.width() != ref_geom.width() || geom.height() != ref_geom.height() {
                        return Err(AeolusError::DataNotFound {
                            message: format!(
                                "Layer {} is {}x{} but layer {} is {}x{}",
                                name,
                                geom.height(),
                                geom.width(),
                                ref_name,
                                ref_geom.height(),
                                ref_geom.width()
                            ),
                        });
                    }
                    if !bounds_close(geom.bounds(), ref_geom.bounds()) {
                        return Err(AeolusError::DataNotFound {
                            message: format!(
                                "Layer {} covers {:?} but layer {} covers {:?}",
                                name,
                                geom.bounds(),
                                ref_name,
                                ref_geom.bounds()
                            ),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

fn bounds_close(a: BoundingBox, b: BoundingBox) -> bool {
    const EPS: f64 = 1e-6;
    (a.min_lon - b.min_lon).abs() < EPS
        && (a.max_lon - b.max_lon).abs() < EPS
        && (a.min_lat - b.min_lat).abs() < EPS
        && (a.max_lat - b.max_lat).abs() < EPS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridGeometry;
    use ndarray::Array2;

    fn layer(name: &str, lons: Vec<f64>, lats: Vec<f64>) -> RasterLayer {
        let geometry = GridGeometry::new(lons, lats, 0.05, 0.05).unwrap();
        let values = Array2::zeros((geometry.height(), geometry.width()));
        RasterLayer::opaque(name, values, geometry).unwrap()
    }

    #[test]
    fn test_empty_session_invalid() {
        let session = AtlasSession::new(Config::default(), HashMap::new());
        assert!(session.validate().is_err());
        assert!(session.bounds().is_err());
    }

    #[test]
    fn test_matching_layers_validate() {
        let mut layers = HashMap::new();
        layers.insert(
            LAYER_WINDSPEED.to_string(),
            layer(LAYER_WINDSPEED, vec![2.0, 2.1], vec![47.0, 46.9]),
        );
        layers.insert(
            LAYER_ROUGHNESS.to_string(),
            layer(LAYER_ROUGHNESS, vec![2.0, 2.1], vec![47.0, 46.9]),
        );
        let session = AtlasSession::new(Config::default(), layers);
        assert!(session.validate().is_ok());
        assert!(session.has_layer(LAYER_WINDSPEED));
        assert!(session.get_layer_checked("missing").is_err());
    }

    #[test]
    fn test_mismatched_dimensions_rejected() {
        let mut layers = HashMap::new();
        layers.insert(
            LAYER_WINDSPEED.to_string(),
            layer(LAYER_WINDSPEED, vec![2.0, 2.1], vec![47.0, 46.9]),
        );
        layers.insert(
            LAYER_ROUGHNESS.to_string(),
            layer(LAYER_ROUGHNESS, vec![2.0, 2.1, 2.2], vec![47.0, 46.9]),
        );
        let session = AtlasSession::new(Config::default(), layers);
        assert!(session.validate().is_err());
    }

    #[test]
    fn test_mismatched_bounds_rejected() {
        let mut layers = HashMap::new();
        layers.insert(
            LAYER_WINDSPEED.to_string(),
            layer(LAYER_WINDSPEED, vec![2.0, 2.1], vec![47.0, 46.9]),
        );
        layers.insert(
            LAYER_ROUGHNESS.to_string(),
            layer(LAYER_ROUGHNESS, vec![3.0, 3.1], vec![47.0, 46.9]),
        );
        let session = AtlasSession::new(Config::default(), layers);
        assert!(session.validate().is_err());
    }
}
