//! KD-tree spatial index for range and nearest-star queries.
//!
//! Both map generation and the connectivity pass need "which stars are near
//! this point" answers. The index wraps a `kiddo` KD-tree (k=3) keyed by arena
//! index, and can be grown incrementally while stars are being placed.
//!
//! The tree stores coordinates only; callers receive `(StarId, distance)` pairs
//! with distances recomputed in `f64` from the indexed positions, so boundary
//! comparisons (`d <= max`, `d > min`) are exact and symmetric.

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::debug;

use crate::map::{Position, StarId, Starmap};

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Spatial index over star positions.
pub struct SpatialIndex {
    tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32>,
    positions: Vec<Position>,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            tree: KdTree::new(),
            positions: Vec::new(),
        }
    }

    /// Build an index containing every star of a starmap.
    pub fn build(starmap: &Starmap) -> Self {
        let mut index = Self::new();
        for star in starmap.stars() {
            index.insert(star.position);
        }
        debug!(node_count = index.len(), "built spatial index");
        index
    }

    /// Add a position; the returned id is the next arena index.
    pub fn insert(&mut self, position: Position) -> StarId {
        let id = self.positions.len();
        self.tree.add(&position.to_array(), id);
        self.positions.push(position);
        id
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns true when any indexed star lies strictly within `radius` of `point`.
    pub fn any_within(&self, point: Position, radius: f64) -> bool {
        if radius <= 0.0 || self.positions.is_empty() {
            return false;
        }
        self.tree
            .within_unsorted::<SquaredEuclidean>(&point.to_array(), radius * radius)
            .into_iter()
            .any(|neighbour| self.positions[neighbour.item].distance_to(&point) < radius)
    }

    /// Returns true when a star already sits exactly at `point`.
    pub fn is_occupied(&self, point: Position) -> bool {
        self.tree
            .nearest_n::<SquaredEuclidean>(&point.to_array(), 1)
            .into_iter()
            .any(|neighbour| self.positions[neighbour.item] == point)
    }

    /// Find all stars within `radius` of `point` (inclusive).
    ///
    /// Returns `(StarId, distance)` pairs sorted by distance, ties by id.
    pub fn within_radius(&self, point: Position, radius: f64) -> Vec<(StarId, f64)> {
        if radius < 0.0 || self.positions.is_empty() {
            return Vec::new();
        }

        // Widen the squared radius slightly so stars exactly on the boundary are
        // never lost to rounding inside the tree; the exact check follows.
        let squared_radius = radius * radius * (1.0 + 1e-9) + f64::EPSILON;
        let mut results: Vec<(StarId, f64)> = self
            .tree
            .within_unsorted::<SquaredEuclidean>(&point.to_array(), squared_radius)
            .into_iter()
            .map(|neighbour| {
                let id = neighbour.item;
                (id, self.positions[id].distance_to(&point))
            })
            .filter(|(_, distance)| *distance <= radius)
            .collect();

        results.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        results
    }

    /// Find the nearest star to `point` other than `exclude`.
    pub fn nearest_excluding(&self, point: Position, exclude: StarId) -> Option<(StarId, f64)> {
        if self.positions.is_empty() {
            return None;
        }

        self.tree
            .nearest_n::<SquaredEuclidean>(&point.to_array(), 2)
            .into_iter()
            .map(|neighbour| {
                let id = neighbour.item;
                (id, self.positions[id].distance_to(&point))
            })
            .filter(|(id, _)| *id != exclude)
            .min_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
    }
}
