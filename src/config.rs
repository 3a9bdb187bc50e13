//! Configuration management for aeolus.
//!
//! This module handles the layered configuration system with the following
//! precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)
//!
//! The palette tables (gradient specs for the continuous layers, the
//! exact-match table for roughness) live here as static configuration:
//! they are built once at startup and never mutated.

use clap::Parser;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::classify::{
    parse_colors, Classifier, ContinuousScale, ExactMatchTable, BAND_DECIMALS,
};
use crate::error::{AeolusError, Result};
use crate::session::{LAYER_OPTIMAL_HEIGHT, LAYER_ROUGHNESS, LAYER_WINDSPEED};

/// Command-line arguments for aeolus
#[derive(Parser, Debug)]
#[command(name = "aeolus")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the layer pack JSON file to render
    pub layer_pack: PathBuf,

    /// Directory where rendered layers and legend bars are written
    #[arg(short, long, env = "AEOLUS_OUTPUT", default_value = ".")]
    pub output: PathBuf,

    /// Optional point query as "lat,lon" (degrees)
    #[arg(short, long, env = "AEOLUS_QUERY")]
    pub query: Option<String>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "AEOLUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "AEOLUS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Layer opacity applied to every colored pixel
    #[serde(default = "default_opacity")]
    pub opacity: f64,

    /// Number of swatches sampled when building a legend bar
    #[serde(default = "default_legend_cardinality")]
    pub legend_cardinality: usize,
}

/// A continuous color scale specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientSpec {
    /// Value domain `[min, max]` the color stops span
    pub domain: [f64; 2],
    /// HTML color stops, spread evenly over the domain
    pub colors: Vec<String>,
}

impl GradientSpec {
    /// Build the scale this spec describes
    pub fn build(&self, name: &str) -> Result<ContinuousScale> {
        ContinuousScale::new(name, &self.colors, self.domain)
    }
}

/// An exact-match value/color table specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExactTableSpec {
    /// Canonical values, parallel to `colors`
    pub values: Vec<f64>,
    /// HTML colors, parallel to `values`
    pub colors: Vec<String>,
    /// Decimal places used when rounding before comparison
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

impl ExactTableSpec {
    /// Build the table this spec describes
    pub fn build(&self, name: &str) -> Result<ExactMatchTable> {
        let colors = parse_colors(&self.colors)?;
        ExactMatchTable::new(name, self.values.clone(), colors, self.decimals)
    }
}

/// Palette configuration for the three atlas layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Continuous scale for wind speed (m/s at 10 m)
    #[serde(default = "default_windspeed_spec")]
    pub windspeed: GradientSpec,

    /// Continuous scale for optimal turbine height (m)
    #[serde(default = "default_optimal_height_spec")]
    pub optimal_height: GradientSpec,

    /// Exact-match table for roughness length classes (m)
    #[serde(default = "default_roughness_spec")]
    pub roughness: ExactTableSpec,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Rendering configuration
    #[serde(default)]
    pub render: RenderConfig,

    /// Palette configuration
    #[serde(default)]
    pub palettes: PaletteConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Returns the merged config together with the parsed arguments, which
    /// carry the per-invocation inputs (pack path, output dir, query).
    pub fn load() -> Result<(Self, Args)> {
        let args = Args::parse();

        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        config.log_level = args.log_level.clone();

        Ok((config, args))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.render = other.render;
        self.palettes = other.palettes;
        self.log_level = other.log_level;
    }

    /// Build the classifier configured for a layer
    pub fn classifier_for(&self, layer: &str) -> Result<Box<dyn Classifier>> {
        match layer {
            LAYER_WINDSPEED => Ok(Box::new(self.palettes.windspeed.build(LAYER_WINDSPEED)?)),
            LAYER_OPTIMAL_HEIGHT => Ok(Box::new(
                self.palettes.optimal_height.build(LAYER_OPTIMAL_HEIGHT)?,
            )),
            LAYER_ROUGHNESS => Ok(Box::new(self.palettes.roughness.build(LAYER_ROUGHNESS)?)),
            _ => Err(AeolusError::InvalidParameter {
                param: "layer".to_string(),
                message: format!("No palette configured for layer: {}", layer),
            }),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.render.opacity) {
            return Err(AeolusError::Config {
                message: format!(
                    "Opacity must be in [0, 1], got {}",
                    self.render.opacity
                ),
            });
        }

        if self.render.legend_cardinality < 2 {
            return Err(AeolusError::Config {
                message: format!(
                    "Legend cardinality must be at least 2, got {}",
                    self.render.legend_cardinality
                ),
            });
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(AeolusError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        // Palette specs must actually build
        self.palettes.windspeed.build(LAYER_WINDSPEED)?;
        self.palettes.optimal_height.build(LAYER_OPTIMAL_HEIGHT)?;
        self.palettes.roughness.build(LAYER_ROUGHNESS)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            palettes: PaletteConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            opacity: default_opacity(),
            legend_cardinality: default_legend_cardinality(),
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            windspeed: default_windspeed_spec(),
            optimal_height: default_optimal_height_spec(),
            roughness: default_roughness_spec(),
        }
    }
}

// Default value functions for serde
fn default_opacity() -> f64 {
    0.7
}

fn default_legend_cardinality() -> usize {
    100
}

fn default_decimals() -> u32 {
    BAND_DECIMALS
}

fn default_log_level() -> String {
    "info".to_string()
}

// Built once at startup; the specs are cloned into each deserialized config
static WINDSPEED_SPEC: Lazy<GradientSpec> = Lazy::new(|| GradientSpec {
    domain: [0.0, 12.0],
    colors: vec![
        "#2c7bb6".to_string(),
        "#abd9e9".to_string(),
        "#ffffbf".to_string(),
        "#fdae61".to_string(),
        "#d7191c".to_string(),
    ],
});

static OPTIMAL_HEIGHT_SPEC: Lazy<GradientSpec> = Lazy::new(|| GradientSpec {
    domain: [50.0, 200.0],
    colors: vec![
        "#ffffcc".to_string(),
        "#a1dab4".to_string(),
        "#41b6c4".to_string(),
        "#2c7fb8".to_string(),
        "#253494".to_string(),
    ],
});

static ROUGHNESS_SPEC: Lazy<ExactTableSpec> = Lazy::new(|| ExactTableSpec {
    values: vec![
        0.002, 0.005, 0.01, 0.03, 0.05, 0.1, 0.2, 0.3, 0.4, 0.5, 0.8, 1.0, 1.5,
    ],
    colors: vec![
        "#ffffbf".to_string(),
        "#17becf".to_string(),
        "#bcbd22".to_string(),
        "#2ca02c".to_string(),
        "#7f7f7f".to_string(),
        "#e377c2".to_string(),
        "#9467bd".to_string(),
        "#8c564b".to_string(),
        "#d62728".to_string(),
        "#1f77b4".to_string(),
        "#ff7f0e".to_string(),
        "#fddbc7".to_string(),
        "#000000".to_string(),
    ],
    decimals: BAND_DECIMALS,
});

fn default_windspeed_spec() -> GradientSpec {
    WINDSPEED_SPEC.clone()
}

fn default_optimal_height_spec() -> GradientSpec {
    OPTIMAL_HEIGHT_SPEC.clone()
}

fn default_roughness_spec() -> ExactTableSpec {
    ROUGHNESS_SPEC.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.render.opacity, 0.7);
        assert_eq!(config.render.legend_cardinality, 100);
        assert_eq!(config.log_level, "info");
        assert_eq!(
            config.palettes.roughness.values.len(),
            config.palettes.roughness.colors.len()
        );
    }

    #[test]
    fn test_config_merge() {
        let mut config1 = Config::default();
        let mut config2 = Config::default();

        config2.render.opacity = 1.0;
        config2.log_level = "debug".to_string();

        config1.merge(config2);

        assert_eq!(config1.render.opacity, 1.0);
        assert_eq!(config1.log_level, "debug");
    }

    #[test]
    fn test_config_validation() {
        // Valid config should pass
        let config = Config::default();
        assert!(config.validate().is_ok());

        // Test invalid opacity
        let mut config = Config::default();
        config.render.opacity = 1.5;
        assert!(config.validate().is_err());

        // Test invalid legend cardinality
        let mut config = Config::default();
        config.render.legend_cardinality = 1;
        assert!(config.validate().is_err());

        // Test invalid log level
        let mut config = Config::default();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());

        // Test malformed palette
        let mut config = Config::default();
        config.palettes.windspeed.colors = vec!["not a color".to_string(); 2];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_classifier_factory() {
        let config = Config::default();
        assert!(config.classifier_for(LAYER_WINDSPEED).is_ok());
        assert!(config.classifier_for(LAYER_ROUGHNESS).is_ok());
        assert!(config.classifier_for(LAYER_OPTIMAL_HEIGHT).is_ok());
        assert!(config.classifier_for("unknown").is_err());
    }

    #[test]
    fn test_default_roughness_table_round_trips() {
        let config = Config::default();
        let table = config.palettes.roughness.build(LAYER_ROUGHNESS).unwrap();
        // Every canonical value resolves to its color
        for (i, &value) in table.values().iter().enumerate() {
            assert_eq!(table.lookup(value), Some(table.colors()[i]));
        }
        // A non-canonical value has no color
        assert_eq!(table.lookup(0.07), None);
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.render.opacity, 0.7);
        assert_eq!(config.palettes.windspeed.domain, [0.0, 12.0]);
        assert_eq!(config.palettes.roughness.decimals, 3);
    }
}
