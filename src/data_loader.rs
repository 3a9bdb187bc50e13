//! Layer pack loading.
//!
//! A layer pack is a JSON document holding the decoded raster layers: per
//! layer the axis vectors, resolutions, the value band and an optional
//! transparency band (a pack without masks is treated as fully opaque).
//! Fetching and decoding the upstream raster files is out of scope; the
//! pack is whatever that step produced, serialized.

use ndarray::Array2;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AeolusError, Result};
use crate::grid::{GridGeometry, RasterLayer};
use crate::logging::log_pack_load_stats;
use crate::session::AtlasSession;

/// On-disk shape of a layer pack
#[derive(Debug, Deserialize)]
struct LayerPackFile {
    layers: HashMap<String, LayerFile>,
}

/// On-disk shape of one layer
#[derive(Debug, Deserialize)]
struct LayerFile {
    /// Longitude values, one per column, west to east
    lons: Vec<f64>,
    /// Latitude values, one per row
    lats: Vec<f64>,
    /// Longitude match tolerance
    x_res: f64,
    /// Latitude match tolerance
    y_res: f64,
    /// Value band, row-major
    values: Vec<Vec<f32>>,
    /// Transparency band (0/255), row-major; omitted means fully opaque
    #[serde(default)]
    mask: Option<Vec<Vec<f32>>>,
}

/// Load a layer pack into a session
pub fn load_layer_pack(path: &Path, config: Config) -> Result<AtlasSession> {
    if !path.exists() {
        return Err(AeolusError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let pack: LayerPackFile = serde_json::from_str(&content)?;

    info!("Opened layer pack: {}", path.display());
    debug!("Pack has {} layers", pack.layers.len());

    let mut layers = HashMap::new();
    for (name, layer_file) in pack.layers {
        let layer = build_layer(&name, layer_file)?;
        debug!(
            layer = %name,
            height = layer.geometry().height(),
            width = layer.geometry().width(),
            "Layer decoded"
        );
        layers.insert(name, layer);
    }

    let (height, width) = match layers.values().next() {
        Some(first) => (first.geometry().height(), first.geometry().width()),
        None => {
            return Err(AeolusError::DataNotFound {
                message: "Layer pack contains no layers".to_string(),
            })
        }
    };

    let layer_names: Vec<&str> = layers.keys().map(String::as_str).collect();
    // Two f32 bands per layer
    let memory_usage = layers.len() * height * width * 2 * std::mem::size_of::<f32>();
    log_pack_load_stats(
        &path.display().to_string(),
        layers.len(),
        &layer_names,
        width,
        height,
        memory_usage,
    );

    Ok(AtlasSession::new(config, layers))
}

/// Assemble one raster layer from its on-disk form
fn build_layer(name: &str, file: LayerFile) -> Result<RasterLayer> {
    let geometry = GridGeometry::new(file.lons, file.lats, file.x_res, file.y_res)?;
    let height = geometry.height();
    let width = geometry.width();

    let values = build_band(name, "values", file.values, height, width)?;
    let mask = match file.mask {
        Some(rows) => build_band(name, "mask", rows, height, width)?,
        None => Array2::from_elem((height, width), 255.0),
    };

    RasterLayer::new(name, values, mask, geometry)
}

/// Convert row-major nested vectors into a checked 2D band
fn build_band(
    layer: &str,
    band: &str,
    rows: Vec<Vec<f32>>,
    height: usize,
    width: usize,
) -> Result<Array2<f32>> {
    if rows.len() != height {
        return Err(AeolusError::DataNotFound {
            message: format!(
                "Layer {} {} band has {} rows but the geometry implies {}",
                layer,
                band,
                rows.len(),
                height
            ),
        });
    }

    let mut flat = Vec::with_capacity(height * width);
    for (i, row) in rows.into_iter().enumerate() {
        if row.len() != width {
            return Err(AeolusError::DataNotFound {
                message: format!(
                    "Layer {} {} band row {} has {} columns but the geometry implies {}",
                    layer,
                    band,
                    i,
                    row.len(),
                    width
                ),
            });
        }
        flat.extend(row);
    }

    Array2::from_shape_vec((height, width), flat).map_err(|e| AeolusError::DataNotFound {
        message: format!("Layer {} {} band has an invalid shape: {}", layer, band, e),
    })
}
