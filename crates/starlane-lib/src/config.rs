//! Generation-time configuration.
//!
//! A [`GenerationConfig`] fully describes one map: star count and sizes, map
//! bounds, layout, connection ranges, the connectivity guarantee, and danger
//! zones. It deserializes from JSON with every field optional (missing fields
//! take the defaults below) and is validated before any star is placed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::map::Position;

/// Shape of the generated map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapLayout {
    /// Uniformly scattered stars with a minimum separation.
    #[default]
    Scatter,
    /// Two divergent chains grown from a seed star at the origin.
    Branching,
}

/// Inclusive `[min, max]` range of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn validate(&self, field: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(invalid(format!("{} must be finite", field)));
        }
        if self.min < 0.0 {
            return Err(invalid(format!("{}.min must not be negative", field)));
        }
        if self.min > self.max {
            return Err(invalid(format!(
                "{}.min ({}) must not exceed {}.max ({})",
                field, self.min, field, self.max
            )));
        }
        Ok(())
    }
}

/// Half-extents of the map: stars are placed in `[-x, x] × [-y, y] × [-z, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Spherical region that marks the stars inside it as dangerous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DangerZone {
    pub center: [f64; 3],
    pub radius: f64,
}

impl DangerZone {
    /// A star touches the zone when its centre lies within the zone radius
    /// extended by a quarter of the star's radius.
    pub fn contains(&self, position: &Position, star_radius: f64) -> bool {
        let [x, y, z] = self.center;
        Position::new(x, y, z).distance_to(position) <= self.radius + star_radius / 4.0
    }
}

/// Full map generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub star_count: usize,
    /// Range of star radii.
    pub star_size: Range,
    pub bounds: Bounds,
    pub layout: MapLayout,
    /// Stars may not be placed closer than `radius * separation_factor` to an
    /// existing star (scatter layout only).
    pub separation_factor: f64,
    /// Per-star cap on position samples before giving up.
    pub max_placement_attempts: usize,
    /// Connection window `(min, max]` for the scatter layout.
    pub connection_range: Range,
    /// Connection window `(min, max]` for the branching layout.
    pub branching_connection_range: Range,
    /// Initial spawn distance range for the branching layout.
    pub branching_distance: Range,
    /// Build a spanning tree first so every star is reachable.
    pub guarantee_connectivity: bool,
    pub danger_zones: Vec<DangerZone>,
    /// Additional zones placed at random inside `danger_zone_spread`.
    pub random_danger_zones: usize,
    pub random_danger_zone_radius: f64,
    pub danger_zone_spread: f64,
    /// Multiplier range assigned to dangerous stars.
    pub danger_multiplier: Range,
    /// Seed for reproducible maps; entropy when absent.
    pub seed: Option<u64>,
    /// Replacement star names, applied in creation order.
    pub star_names: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            star_count: 100,
            star_size: Range::new(4.0, 10.0),
            bounds: Bounds {
                x: 1000.0,
                y: 300.0,
                z: 1000.0,
            },
            layout: MapLayout::Scatter,
            separation_factor: 3.0,
            max_placement_attempts: 10_000,
            connection_range: Range::new(0.0, 250.0),
            branching_connection_range: Range::new(0.0, 60.0),
            branching_distance: Range::new(20.0, 40.0),
            guarantee_connectivity: true,
            danger_zones: Vec::new(),
            random_danger_zones: 1,
            random_danger_zone_radius: 250.0,
            danger_zone_spread: 500.0,
            danger_multiplier: Range::new(25.0, 50.0),
            seed: None,
            star_names: Vec::new(),
        }
    }
}

impl GenerationConfig {
    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read star names from a text file, one per line; blank lines are skipped.
    pub fn load_star_names(&mut self, path: &Path) -> Result<()> {
        let raw = fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        self.star_names = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Ok(())
    }

    /// Connection window used for the configured layout.
    pub fn active_connection_range(&self) -> Range {
        match self.layout {
            MapLayout::Scatter => self.connection_range,
            MapLayout::Branching => self.branching_connection_range,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.star_count == 0 {
            return Err(invalid("star_count must be at least 1".to_string()));
        }
        self.star_size.validate("star_size")?;
        if self.star_size.max <= 0.0 {
            return Err(invalid("star_size.max must be positive".to_string()));
        }
        for (axis, value) in [("x", self.bounds.x), ("y", self.bounds.y), ("z", self.bounds.z)] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "bounds.{} must be finite and non-negative",
                    axis
                )));
            }
        }
        if !self.separation_factor.is_finite() || self.separation_factor < 0.0 {
            return Err(invalid(
                "separation_factor must be finite and non-negative".to_string(),
            ));
        }
        if self.max_placement_attempts == 0 {
            return Err(invalid(
                "max_placement_attempts must be at least 1".to_string(),
            ));
        }
        self.connection_range.validate("connection_range")?;
        self.branching_connection_range
            .validate("branching_connection_range")?;
        self.branching_distance.validate("branching_distance")?;
        self.danger_multiplier.validate("danger_multiplier")?;
        if self.danger_multiplier.min < 1.0 {
            return Err(invalid(
                "danger_multiplier.min must be at least 1".to_string(),
            ));
        }
        for zone in &self.danger_zones {
            if !zone.radius.is_finite() || zone.radius < 0.0 {
                return Err(invalid(
                    "danger zone radius must be finite and non-negative".to_string(),
                ));
            }
        }
        if self.random_danger_zones > 0
            && (self.random_danger_zone_radius < 0.0 || self.danger_zone_spread < 0.0)
        {
            return Err(invalid(
                "random danger zone radius and spread must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig { message }
}
