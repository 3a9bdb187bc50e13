//! # aeolus
//!
//! Wind-resource atlas core: raster classification, grid lookup and legend
//! sampling.
//!
//! This library takes decoded raster grids of wind speed, surface roughness
//! and optimal turbine height, classifies every pixel into a display color,
//! renders the result as RGBA images, and answers point queries at clicked
//! coordinates.
//!
//! ## Key Features
//!
//! - **Three classification strategies**: exact-match tables, interval
//!   threshold tables, and clamping continuous color scales
//! - **Tolerance-window grid lookup**: coordinate-to-cell resolution with
//!   explicit "not found" sentinels, never a wrapped index
//! - **Legend sampling**: evenly spaced ticks, swatch bars and
//!   discretization of continuous scales
//!
//! ## Architecture
//!
//! - **Data Layer**: loads JSON layer packs into an immutable session
//! - **Classification**: pure per-pixel value-to-color functions
//! - **Presentation seams**: RGBA images, legend bars and formatted point
//!   samples, consumed by an external map/rendering layer

pub mod classify;
pub mod config;
pub mod data_loader;
pub mod error;
pub mod grid;
pub mod legend;
pub mod logging;
pub mod query;
pub mod render;
pub mod session;

pub use classify::{Classifier, ContinuousScale, ExactMatchTable, IntervalThresholdTable, Rgba};
pub use config::Config;
pub use error::{AeolusError, Result};
pub use grid::{BoundingBox, GridGeometry, GridIndex, RasterLayer};
pub use legend::{legend_ticks, LegendBar};
pub use query::{query_point, PointOutcome, PointSample};
pub use session::{AtlasSession, ATLAS_LAYERS};
