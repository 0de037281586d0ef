//! Subcommand handlers.
//!
//! Each module handles one subcommand. `main.rs` parses arguments and
//! dispatches here; the shared map options live in [`MapArgs`].

pub mod generate;
pub mod play;
pub mod route;
pub mod stars;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use starlane_lib::{generate_map, GeneratedMap, GenerationConfig};

/// Options that decide which map a command works on.
#[derive(Debug, Clone, Default)]
pub struct MapArgs {
    /// JSON generation config; defaults apply when absent.
    pub config: Option<PathBuf>,
    /// Overrides the config seed.
    pub seed: Option<u64>,
    /// Star name list, one name per line.
    pub names: Option<PathBuf>,
}

impl MapArgs {
    /// Load the generation config and apply command-line overrides.
    pub fn load_config(&self) -> Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => GenerationConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(path) = &self.names {
            config
                .load_star_names(path)
                .with_context(|| format!("failed to load star names from {}", path.display()))?;
        }
        debug!(seed = ?config.seed, stars = config.star_count, "loaded generation config");
        Ok(config)
    }

    /// Load the config and generate its map.
    pub fn generate(&self) -> Result<(GenerationConfig, GeneratedMap)> {
        let config = self.load_config()?;
        let map = generate_map(&config).context("failed to generate the star map")?;
        Ok((config, map))
    }
}
