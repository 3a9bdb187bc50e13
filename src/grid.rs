//! Grid geometry and raster layers.
//!
//! A raster layer is a 2D value band plus a 2D transparency band over a
//! geographic grid described by its axis vectors (one longitude per
//! column, one latitude per row) and nominal resolutions. The locator
//! mirrors the latitude axis, so bands are stored with rows running
//! opposite to the latitude vector.
//!
//! The locator maps a geographic coordinate to the grid cell whose axis
//! coordinates fall within the resolution tolerance. A coordinate that
//! matches no cell yields `None` rather than a wrapped index; callers must
//! check before indexing.

use ndarray::Array2;

use crate::error::{AeolusError, Result};

/// A (row, col) cell index into a raster grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridIndex {
    /// Row index into the stored bands
    pub row: usize,
    /// Column index, 0 at the westernmost sample
    pub col: usize,
}

/// Geographic bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Check whether a coordinate lies inside the box (inclusive)
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

/// Axis vectors and match tolerances for a raster grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    lons: Vec<f64>,
    lats: Vec<f64>,
    x_res: f64,
    y_res: f64,
}

impl GridGeometry {
    /// Create a new geometry. Axis vectors must be non-empty and the
    /// resolutions strictly positive; the resolutions act as tolerance
    /// half-widths, not exact steps, to absorb reprojection jitter.
    pub fn new(lons: Vec<f64>, lats: Vec<f64>, x_res: f64, y_res: f64) -> Result<Self> {
        if lons.is_empty() || lats.is_empty() {
            return Err(AeolusError::InvalidCoordinates {
                message: "Axis vectors must be non-empty".to_string(),
            });
        }
        if x_res <= 0.0 || y_res <= 0.0 {
            return Err(AeolusError::InvalidParameter {
                param: "resolution".to_string(),
                message: format!(
                    "Resolutions must be positive, got x_res={}, y_res={}",
                    x_res, y_res
                ),
            });
        }

        Ok(Self {
            lons,
            lats,
            x_res,
            y_res,
        })
    }

    /// Number of columns (longitude samples)
    pub fn width(&self) -> usize {
        self.lons.len()
    }

    /// Number of rows (latitude samples)
    pub fn height(&self) -> usize {
        self.lats.len()
    }

    /// Longitude values, one per column
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Latitude values, one per row
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude match tolerance
    pub fn x_res(&self) -> f64 {
        self.x_res
    }

    /// Latitude match tolerance
    pub fn y_res(&self) -> f64 {
        self.y_res
    }

    /// The geographic bounding box spanned by the axis vectors
    pub fn bounds(&self) -> BoundingBox {
        let (min_lon, max_lon) = min_max(&self.lons);
        let (min_lat, max_lat) = min_max(&self.lats);
        BoundingBox {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Find the grid cell at a geographic coordinate.
    ///
    /// Each axis is scanned in ascending index order for the first sample
    /// within the tolerance window; the first match wins. The row index is
    /// flipped (`height - yi - 1`), mirroring the latitude axis into the
    /// stored band's row order.
    ///
    /// Returns `None` when either axis has no sample within tolerance.
    pub fn locate(&self, lat: f64, lon: f64) -> Option<GridIndex> {
        let col = self.lons.iter().position(|&x| (x - lon).abs() < self.x_res)?;
        let yi = self.lats.iter().position(|&y| (y - lat).abs() < self.y_res)?;
        Some(GridIndex {
            row: self.lats.len() - yi - 1,
            col,
        })
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}

/// One raster layer: a value band, a transparency band and the grid geometry
#[derive(Debug, Clone)]
pub struct RasterLayer {
    name: String,
    values: Array2<f32>,
    mask: Array2<f32>,
    geometry: GridGeometry,
}

impl RasterLayer {
    /// Create a layer, validating that both bands match the geometry shape
    pub fn new(
        name: impl Into<String>,
        values: Array2<f32>,
        mask: Array2<f32>,
        geometry: GridGeometry,
    ) -> Result<Self> {
        let name = name.into();
        let expected = (geometry.height(), geometry.width());
        if values.dim() != expected {
            return Err(AeolusError::DataNotFound {
                message: format!(
                    "Layer {} value band is {:?} but the geometry implies {:?}",
                    name,
                    values.dim(),
                    expected
                ),
            });
        }
        if mask.dim() != values.dim() {
            return Err(AeolusError::DataNotFound {
                message: format!(
                    "Layer {} mask band is {:?} but the value band is {:?}",
                    name,
                    mask.dim(),
                    values.dim()
                ),
            });
        }

        Ok(Self {
            name,
            values,
            mask,
            geometry,
        })
    }

    /// Create a layer with a fully opaque mask
    pub fn opaque(name: impl Into<String>, values: Array2<f32>, geometry: GridGeometry) -> Result<Self> {
        let mask = Array2::from_elem(values.dim(), 255.0);
        Self::new(name, values, mask, geometry)
    }

    /// Layer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value band
    pub fn values(&self) -> &Array2<f32> {
        &self.values
    }

    /// The transparency band (nominally 0 or 255 per pixel)
    pub fn mask(&self) -> &Array2<f32> {
        &self.mask
    }

    /// The grid geometry shared by both bands
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// The value at a cell index, or `None` when out of bounds
    pub fn value_at(&self, index: GridIndex) -> Option<f32> {
        self.values.get((index.row, index.col)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn geometry() -> GridGeometry {
        GridGeometry::new(
            vec![2.0, 2.1, 2.2],
            vec![47.0, 46.9, 46.8],
            0.05,
            0.05,
        )
        .unwrap()
    }

    #[test]
    fn test_locate_exact_sample() {
        let g = geometry();
        assert_eq!(g.locate(46.9, 2.1), Some(GridIndex { row: 1, col: 1 }));
    }

    #[test]
    fn test_locate_row_flip() {
        let g = geometry();
        // lats[0] matches at yi=0, flipped to the last row
        assert_eq!(g.locate(47.0, 2.0), Some(GridIndex { row: 2, col: 0 }));
        assert_eq!(g.locate(46.8, 2.2), Some(GridIndex { row: 0, col: 2 }));
    }

    #[test]
    fn test_locate_within_tolerance() {
        let g = geometry();
        assert_eq!(g.locate(46.92, 2.08), Some(GridIndex { row: 1, col: 1 }));
    }

    #[test]
    fn test_locate_out_of_tolerance_is_none() {
        let g = geometry();
        // Latitude far outside any window
        assert_eq!(g.locate(50.0, 2.1), None);
        // Longitude far outside any window
        assert_eq!(g.locate(46.9, 10.0), None);
        // Between samples, outside both half-windows
        assert_eq!(g.locate(46.9, 2.05), None);
    }

    #[test]
    fn test_locate_first_match_wins() {
        // Tolerance wider than the sample spacing: ascending scan order
        // favors the lower index on each axis.
        let g = GridGeometry::new(
            vec![2.0, 2.1, 2.2],
            vec![47.0, 46.9, 46.8],
            0.2,
            0.2,
        )
        .unwrap();
        assert_eq!(g.locate(46.9, 2.1), Some(GridIndex { row: 2, col: 0 }));
    }

    #[test]
    fn test_bounds() {
        let g = geometry();
        let b = g.bounds();
        assert_eq!(b.min_lon, 2.0);
        assert_eq!(b.max_lon, 2.2);
        assert_eq!(b.min_lat, 46.8);
        assert_eq!(b.max_lat, 47.0);
        assert!(b.contains(46.9, 2.1));
        assert!(!b.contains(50.0, 2.1));
        assert!(!b.contains(46.9, 1.99));
    }

    #[test]
    fn test_geometry_validation() {
        assert!(GridGeometry::new(vec![], vec![47.0], 0.05, 0.05).is_err());
        assert!(GridGeometry::new(vec![2.0], vec![47.0], 0.0, 0.05).is_err());
        assert!(GridGeometry::new(vec![2.0], vec![47.0], 0.05, -1.0).is_err());
    }

    #[test]
    fn test_layer_shape_validation() {
        let g = geometry();
        let values = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        assert!(RasterLayer::opaque("ok", values.clone(), g.clone()).is_ok());

        let wrong = array![[1.0f32, 2.0], [3.0, 4.0]];
        assert!(RasterLayer::opaque("wrong", wrong, g.clone()).is_err());

        let mask = Array2::from_elem((2, 2), 255.0);
        assert!(RasterLayer::new("mismatch", values, mask, g).is_err());
    }

    #[test]
    fn test_value_at_round_trip() {
        let g = geometry();
        let values = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let layer = RasterLayer::opaque("windspeed", values, g).unwrap();

        let index = layer.geometry().locate(46.9, 2.1).unwrap();
        assert_eq!(layer.value_at(index), Some(5.0));

        let out = GridIndex { row: 9, col: 9 };
        assert_eq!(layer.value_at(out), None);
    }
}
