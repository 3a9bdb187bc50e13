//! aeolus - wind-resource atlas renderer
//!
//! This is the main entry point for the aeolus application: it loads a
//! layer pack, renders each atlas layer to PNG, writes legend bars for the
//! continuous layers, and optionally answers a point query.

use tracing::{error, info};

use aeolus::query::PointOutcome;
use aeolus::session::{ATLAS_LAYERS, LAYER_OPTIMAL_HEIGHT, LAYER_WINDSPEED};
use aeolus::{data_loader, legend, logging, query, render, Config, Result};

fn main() -> Result<()> {
    // Load configuration
    let (config, args) = Config::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        e
    })?;

    // Validate configuration
    config.validate().map_err(|e| {
        eprintln!("Invalid configuration: {}", e);
        e
    })?;

    logging::init_tracing(&config.log_level);

    info!("Starting aeolus v{}", env!("CARGO_PKG_VERSION"));
    info!("Loading layer pack: {:?}", args.layer_pack);

    // Load the layer pack and create the session
    let session = data_loader::load_layer_pack(&args.layer_pack, config.clone()).map_err(|e| {
        error!("Failed to load layer pack: {}", e);
        e
    })?;

    // Validate the session
    session.validate().map_err(|e| {
        error!("Invalid session: {}", e);
        e
    })?;

    info!("Found {} layers", session.layers.len());

    std::fs::create_dir_all(&args.output)?;

    // Render every configured atlas layer present in the pack
    for layer_name in ATLAS_LAYERS {
        let Some(layer) = session.get_layer(layer_name) else {
            info!(layer = layer_name, "Layer not in pack, skipping");
            continue;
        };

        let classifier = session.config.classifier_for(layer_name)?;
        let img = logging::log_timed_operation("render_layer", || {
            render::render_layer(layer, classifier.as_ref(), session.config.render.opacity)
        })?;
        let png = render::encode_png(&img)?;

        let path = args.output.join(format!("{}.png", layer_name));
        std::fs::write(&path, png)?;
        info!(layer = layer_name, path = %path.display(), "Layer rendered");
    }

    // Legend bars for the continuous layers
    let cardinality = session.config.render.legend_cardinality;
    for (layer_name, spec) in [
        (LAYER_WINDSPEED, &session.config.palettes.windspeed),
        (LAYER_OPTIMAL_HEIGHT, &session.config.palettes.optimal_height),
    ] {
        let scale = spec.build(layer_name)?;
        let bar = legend::sample_scale(&scale, cardinality)?;
        let path = args.output.join(format!("{}_legend.json", layer_name));
        std::fs::write(&path, serde_json::to_vec_pretty(&bar)?)?;
        info!(layer = layer_name, path = %path.display(), "Legend written");
    }

    // Optional point query
    if let Some(q) = &args.query {
        let (lat, lon) = query::parse_point(q)?;
        match query::query_point(&session, lat, lon)? {
            PointOutcome::Sample(sample) => println!("{}", sample.popup_text()),
            outcome => {
                info!(?outcome, lat = lat, lon = lon, "Query outside the atlas");
                println!("out of scope");
            }
        }
    }

    Ok(())
}
