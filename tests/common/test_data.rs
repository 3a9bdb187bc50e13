//! Test data generation utilities.
//!
//! This module builds a small synthetic atlas with known values: a 3x3
//! grid over central France with all three layers, a zero-filled
//! (cropped) cell, and a masked cell. The same atlas is also written out
//! as a JSON layer pack for loader tests.

use std::collections::HashMap;
use std::path::Path;

use ndarray::array;
use serde_json::json;

use aeolus::grid::{GridGeometry, RasterLayer};
use aeolus::session::{
    AtlasSession, LAYER_OPTIMAL_HEIGHT, LAYER_ROUGHNESS, LAYER_WINDSPEED,
};
use aeolus::Config;

/// Longitudes of the test grid, west to east
pub const TEST_LONS: [f64; 3] = [2.0, 2.1, 2.2];
/// Latitudes of the test grid, north to south
pub const TEST_LATS: [f64; 3] = [47.0, 46.9, 46.8];
/// Tolerance half-width on both axes
pub const TEST_RES: f64 = 0.05;

fn geometry() -> GridGeometry {
    GridGeometry::new(TEST_LONS.to_vec(), TEST_LATS.to_vec(), TEST_RES, TEST_RES).unwrap()
}

/// The shared transparency band: one masked cell at (row 2, col 2)
fn mask_band() -> ndarray::Array2<f32> {
    array![
        [255.0, 255.0, 255.0],
        [255.0, 255.0, 255.0],
        [255.0, 255.0, 0.0]
    ]
}

/// Build the synthetic session.
///
/// Cell (row 0, col 0) is zero-filled in both wind speed and roughness,
/// marking the cropped region; it is reached by querying lat 46.8,
/// lon 2.0 (the row flip maps latitude index 2 to row 0).
pub fn build_test_session() -> AtlasSession {
    let windspeed = array![
        [0.0f32, 5.5, 6.0],
        [4.5, 7.2, 6.5],
        [4.0, 5.1, 5.8]
    ];
    let roughness = array![
        [0.0f32, 0.03, 0.1],
        [0.05, 0.1, 0.2],
        [0.03, 0.05, 0.1]
    ];
    let optimal_height = array![
        [100.0f32, 110.0, 120.0],
        [95.0, 130.0, 125.0],
        [90.0, 105.0, 115.0]
    ];

    let mut layers = HashMap::new();
    layers.insert(
        LAYER_WINDSPEED.to_string(),
        RasterLayer::new(LAYER_WINDSPEED, windspeed, mask_band(), geometry()).unwrap(),
    );
    layers.insert(
        LAYER_ROUGHNESS.to_string(),
        RasterLayer::new(LAYER_ROUGHNESS, roughness, mask_band(), geometry()).unwrap(),
    );
    layers.insert(
        LAYER_OPTIMAL_HEIGHT.to_string(),
        RasterLayer::new(LAYER_OPTIMAL_HEIGHT, optimal_height, mask_band(), geometry()).unwrap(),
    );

    AtlasSession::new(Config::default(), layers)
}

/// Write the synthetic atlas as a JSON layer pack
pub fn write_test_pack(path: &Path) {
    let mask = json!([
        [255.0, 255.0, 255.0],
        [255.0, 255.0, 255.0],
        [255.0, 255.0, 0.0]
    ]);
    let pack = json!({
        "layers": {
            "windspeed": {
                "lons": TEST_LONS,
                "lats": TEST_LATS,
                "x_res": TEST_RES,
                "y_res": TEST_RES,
                "values": [[0.0, 5.5, 6.0], [4.5, 7.2, 6.5], [4.0, 5.1, 5.8]],
                "mask": mask.clone()
            },
            "roughness": {
                "lons": TEST_LONS,
                "lats": TEST_LATS,
                "x_res": TEST_RES,
                "y_res": TEST_RES,
                "values": [[0.0, 0.03, 0.1], [0.05, 0.1, 0.2], [0.03, 0.05, 0.1]],
                "mask": mask.clone()
            },
            "optimal_height": {
                "lons": TEST_LONS,
                "lats": TEST_LATS,
                "x_res": TEST_RES,
                "y_res": TEST_RES,
                "values": [[100.0, 110.0, 120.0], [95.0, 130.0, 125.0], [90.0, 105.0, 115.0]],
                "mask": mask
            }
        }
    });

    std::fs::write(path, serde_json::to_string_pretty(&pack).unwrap()).unwrap();
}
