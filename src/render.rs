//! Raster layer rendering.
//!
//! Turns a layer's two bands into an RGBA image by running the configured
//! classifier once per pixel. Pixels the classifier declines to color are
//! written fully transparent; colored pixels have their alpha scaled by
//! the layer opacity.

use image::{ImageBuffer, RgbaImage};
use std::io::Cursor;

use crate::classify::Classifier;
use crate::error::{AeolusError, Result};
use crate::grid::RasterLayer;

/// Render a layer through a classifier into an RGBA image.
///
/// Image pixel (x, y) corresponds to grid cell (row y, col x), so the
/// image mirrors the band's row order.
pub fn render_layer(
    layer: &RasterLayer,
    classifier: &dyn Classifier,
    opacity: f64,
) -> Result<RgbaImage> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(AeolusError::InvalidParameter {
            param: "opacity".to_string(),
            message: format!("Opacity must be in [0, 1], got {}", opacity),
        });
    }

    let (height, width) = layer.values().dim();
    let mut img = ImageBuffer::new(width as u32, height as u32);

    let mask = layer.mask();
    for ((row, col), &value) in layer.values().indexed_iter() {
        let transparency = mask[[row, col]];
        let pixel = match classifier.classify(value as f64, transparency as f64) {
            Some(mut color) => {
                color[3] = (color[3] as f64 * opacity).round() as u8;
                color
            }
            None => [0, 0, 0, 0],
        };
        img.put_pixel(col as u32, row as u32, image::Rgba(pixel));
    }

    Ok(img)
}

/// Encode an RGBA image as PNG bytes
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)
        .map_err(|e| AeolusError::ImageGeneration {
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(buffer.into_inner())
}
