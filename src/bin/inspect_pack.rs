use std::error::Error;
use std::path::Path;

use aeolus::Config;

fn main() -> Result<(), Box<dyn Error>> {
    let path_arg = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/atlas_pack.json".to_string());
    let file_path = Path::new(&path_arg);

    println!("Inspecting layer pack: {}", file_path.display());

    let session = aeolus::data_loader::load_layer_pack(file_path, Config::default())?;

    println!("\n=== PACK INFORMATION ===");

    println!("\nLayers:");
    let mut names: Vec<&String> = session.layers.keys().collect();
    names.sort();
    for name in &names {
        let layer = &session.layers[*name];
        let geometry = layer.geometry();
        println!(
            "  {} [{} rows x {} cols]",
            name,
            geometry.height(),
            geometry.width()
        );

        let bounds = geometry.bounds();
        println!(
            "    bounds: lon {} to {}, lat {} to {}",
            bounds.min_lon, bounds.max_lon, bounds.min_lat, bounds.max_lat
        );
        println!(
            "    resolution: x_res = {}, y_res = {}",
            geometry.x_res(),
            geometry.y_res()
        );

        // Value range over the unmasked cells
        let mut min_val = f32::INFINITY;
        let mut max_val = f32::NEG_INFINITY;
        let mut visible = 0usize;
        for ((row, col), &value) in layer.values().indexed_iter() {
            if layer.mask()[[row, col]] == 0.0 {
                continue;
            }
            visible += 1;
            if value.is_finite() {
                min_val = min_val.min(value);
                max_val = max_val.max(value);
            }
        }

        let total = geometry.height() * geometry.width();
        if visible > 0 {
            println!("    values: {} to {}", min_val, max_val);
        }
        println!(
            "    coverage: {}/{} cells unmasked ({:.1}%)",
            visible,
            total,
            100.0 * visible as f64 / total as f64
        );
    }

    match session.validate() {
        Ok(()) => println!("\nSession validation: OK"),
        Err(e) => println!("\nSession validation: FAILED ({})", e),
    }

    Ok(())
}
