use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};

/// Stable identifier for a star: its index in the [`Starmap`] arena.
pub type StarId = usize;

/// Cartesian coordinates for a star.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Offset this position by `direction * distance`.
    pub fn offset(&self, direction: [f64; 3], distance: f64) -> Self {
        Self {
            x: self.x + direction[0] * distance,
            y: self.y + direction[1] * distance,
            z: self.z + direction[2] * distance,
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// A star: one node of the generated map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    pub id: StarId,
    pub name: String,
    pub position: Position,
    pub radius: f64,
    /// Whether the star lies inside a danger zone.
    pub dangerous: bool,
    /// Cost multiplier applied when travelling into this star. Only meaningful
    /// when `dangerous` is set; `1.0` otherwise.
    pub danger_multiplier: f64,
    pub colonised: bool,
    /// RGB display colour in `[0, 1]`.
    pub color: [f32; 3],
}

impl Star {
    /// Create a plain star with a temporary `Star N` name.
    pub fn new(id: StarId, position: Position, radius: f64) -> Self {
        Self {
            id,
            name: format!("Star {}", id),
            position,
            radius,
            dangerous: false,
            danger_multiplier: 1.0,
            colonised: false,
            color: [1.0, 1.0, 1.0],
        }
    }

    /// Multiplier used when this star is the destination of a hop.
    pub fn traversal_multiplier(&self) -> f64 {
        if self.dangerous {
            self.danger_multiplier
        } else {
            1.0
        }
    }

    pub fn distance_to(&self, other: &Star) -> f64 {
        self.position.distance_to(&other.position)
    }
}

/// In-memory arena of stars with name lookup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Starmap {
    stars: Vec<Star>,
    #[serde(skip)]
    name_to_id: HashMap<String, StarId>,
}

impl Starmap {
    /// Build a starmap from stars whose ids must match their arena index.
    pub fn from_stars(stars: Vec<Star>) -> Result<Self> {
        for (index, star) in stars.iter().enumerate() {
            if star.id != index {
                return Err(Error::InvalidConfig {
                    message: format!("star '{}' has id {} at index {}", star.name, star.id, index),
                });
            }
        }
        let name_to_id = stars
            .iter()
            .map(|star| (star.name.clone(), star.id))
            .collect();
        Ok(Self { stars, name_to_id })
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn ids(&self) -> impl Iterator<Item = StarId> {
        0..self.stars.len()
    }

    pub fn get(&self, id: StarId) -> Option<&Star> {
        self.stars.get(id)
    }

    /// Lookup a star that is known to exist, reporting an error otherwise.
    pub fn star(&self, id: StarId) -> Result<&Star> {
        self.stars.get(id).ok_or(Error::UnknownStarId { id })
    }

    pub fn star_mut(&mut self, id: StarId) -> Result<&mut Star> {
        self.stars.get_mut(id).ok_or(Error::UnknownStarId { id })
    }

    pub fn contains(&self, id: StarId) -> bool {
        id < self.stars.len()
    }

    /// Euclidean distance between two stars. Unknown ids yield `f64::INFINITY`.
    pub fn distance(&self, a: StarId, b: StarId) -> f64 {
        match (self.stars.get(a), self.stars.get(b)) {
            (Some(a), Some(b)) => a.distance_to(b),
            _ => f64::INFINITY,
        }
    }

    /// Lookup a star identifier by its case-sensitive name.
    pub fn star_id_by_name(&self, name: &str) -> Option<StarId> {
        self.name_to_id.get(name).copied()
    }

    pub fn star_name(&self, id: StarId) -> Option<&str> {
        self.stars.get(id).map(|star| star.name.as_str())
    }

    /// Resolve a star name, returning fuzzy suggestions on failure.
    pub fn resolve(&self, name: &str) -> Result<StarId> {
        self.star_id_by_name(name)
            .ok_or_else(|| Error::UnknownStar {
                name: name.to_string(),
                suggestions: self.fuzzy_star_matches(name, 3),
            })
    }

    /// Return up to `limit` star names similar to `query`, best match first.
    pub fn fuzzy_star_matches(&self, query: &str, limit: usize) -> Vec<String> {
        const MIN_SIMILARITY: f64 = 0.7;

        let query = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .stars
            .iter()
            .map(|star| {
                let score = strsim::jaro_winkler(&query, &star.name.to_lowercase());
                (score, star.name.as_str())
            })
            .filter(|(score, _)| *score >= MIN_SIMILARITY)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// Replace temporary names with entries from `names`, in arena order.
    ///
    /// Stars beyond the end of the list, or whose replacement would collide
    /// with an existing name, keep their current name.
    pub fn apply_names(&mut self, names: &[String]) {
        for (star, name) in self.stars.iter_mut().zip(names) {
            let name = name.trim();
            if name.is_empty() || self.name_to_id.contains_key(name) {
                continue;
            }
            self.name_to_id.remove(&star.name);
            star.name = name.to_string();
            self.name_to_id.insert(star.name.clone(), star.id);
        }
    }

    /// Number of stars flagged as dangerous.
    pub fn dangerous_count(&self) -> usize {
        self.stars.iter().filter(|star| star.dangerous).count()
    }
}
