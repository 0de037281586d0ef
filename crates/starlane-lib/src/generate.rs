//! Procedural star placement.
//!
//! Two layouts are supported:
//!
//! - [`MapLayout::Scatter`]: stars are sampled uniformly inside the map bounds
//!   and a sample is only accepted when no existing star lies within
//!   `radius * separation_factor` of it. Each star gets at most
//!   `max_placement_attempts` samples; running out is reported as
//!   [`Error::PlacementExhausted`] instead of looping forever.
//! - [`MapLayout::Branching`]: a seed star sits at the origin and two chains
//!   grow away from it, one climbing and one descending, with a random yaw per
//!   spawn and a spawn distance range that widens as the chains grow.
//!
//! After placement every star receives a random colour, stars touching a
//! danger zone are flagged and given a traversal multiplier, and temporary
//! `Star N` names are replaced from the configured name list.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::{DangerZone, GenerationConfig, MapLayout, Range};
use crate::error::{Error, Result};
use crate::graph::{build_graph, Graph, GraphBuildOptions};
use crate::map::{Position, Star, StarId, Starmap};
use crate::spatial::SpatialIndex;

/// Growth of the branching spawn range after every spawned star.
const BRANCH_MIN_GROWTH: f64 = 0.01;
const BRANCH_MAX_GROWTH: f64 = 0.05;

/// A generated map ready for route planning.
#[derive(Debug, Clone)]
pub struct GeneratedMap {
    pub starmap: Starmap,
    pub graph: Graph,
    /// Star with the most connections; where the player starts.
    pub start: StarId,
}

/// Create the random number generator used for generation.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generate stars and connections for `config`, seeding from `config.seed`.
pub fn generate_map(config: &GenerationConfig) -> Result<GeneratedMap> {
    let mut rng = rng_from_seed(config.seed);
    generate_map_with_rng(config, &mut rng)
}

/// Generate stars and connections using the supplied random source.
pub fn generate_map_with_rng<R: Rng + ?Sized>(
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<GeneratedMap> {
    let starmap = generate_stars(config, rng)?;
    let graph = build_graph(
        &starmap,
        &GraphBuildOptions {
            connection_range: config.active_connection_range(),
            guarantee_connectivity: config.guarantee_connectivity,
        },
    );
    let start = graph.most_connected().ok_or(Error::EmptyStarmap)?;

    info!(
        stars = starmap.len(),
        dangerous = starmap.dangerous_count(),
        edges = graph.edge_count(),
        start = %starmap.star_name(start).unwrap_or("<unknown>"),
        "generated star map"
    );

    Ok(GeneratedMap {
        starmap,
        graph,
        start,
    })
}

/// Place, colour, classify and name the stars for `config`.
pub fn generate_stars<R: Rng + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Result<Starmap> {
    config.validate()?;

    let mut stars = match config.layout {
        MapLayout::Scatter => place_scatter(config, rng)?,
        MapLayout::Branching => place_branching(config, rng),
    };

    for star in &mut stars {
        star.color = [rng.gen(), rng.gen(), rng.gen()];
    }

    let zones = danger_zones(config, rng);
    mark_dangerous(&mut stars, &zones, config.danger_multiplier, rng);

    let mut starmap = Starmap::from_stars(stars)?;
    starmap.apply_names(&config.star_names);
    Ok(starmap)
}

fn place_scatter<R: Rng + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Result<Vec<Star>> {
    let mut stars = Vec::with_capacity(config.star_count);
    let mut index = SpatialIndex::new();
    let mut total_attempts = 0usize;

    for id in 0..config.star_count {
        let radius = sample(rng, config.star_size);
        let exclusion = radius * config.separation_factor;

        let mut attempts = 0usize;
        let position = loop {
            if attempts == config.max_placement_attempts {
                return Err(Error::PlacementExhausted {
                    placed: id,
                    requested: config.star_count,
                    attempts,
                });
            }
            attempts += 1;

            let candidate = Position::new(
                sample_symmetric(rng, config.bounds.x),
                sample_symmetric(rng, config.bounds.y),
                sample_symmetric(rng, config.bounds.z),
            );
            // Zero separation still rejects exact duplicates.
            if !index.any_within(candidate, exclusion) && !index.is_occupied(candidate) {
                break candidate;
            }
        };

        if attempts > config.max_placement_attempts / 2 {
            warn!(
                star = id,
                attempts,
                cap = config.max_placement_attempts,
                "star placement is close to the attempt cap; the map is crowded"
            );
        }
        total_attempts += attempts;

        index.insert(position);
        stars.push(Star::new(id, position, radius));
    }

    debug!(
        stars = stars.len(),
        attempts = total_attempts,
        "scatter placement complete"
    );
    Ok(stars)
}

fn place_branching<R: Rng + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Vec<Star> {
    let mut stars = Vec::with_capacity(config.star_count);
    let mut distance = config.branching_distance;
    let mut tips = [Position::ORIGIN; 2];

    stars.push(Star::new(0, Position::ORIGIN, sample(rng, config.star_size)));

    for id in 1..config.star_count {
        let branch = (id - 1) % 2;
        let sign = if branch == 0 { 1.0 } else { -1.0 };

        let yaw = rng.gen_range(0.0..TAU);
        let direction = [
            sign * yaw.sin() / std::f64::consts::SQRT_2,
            sign / std::f64::consts::SQRT_2,
            sign * yaw.cos() / std::f64::consts::SQRT_2,
        ];
        let position = tips[branch].offset(direction, sample(rng, distance));
        tips[branch] = position;

        distance.min += BRANCH_MIN_GROWTH;
        distance.max += BRANCH_MAX_GROWTH;

        stars.push(Star::new(id, position, sample(rng, config.star_size)));
    }

    debug!(stars = stars.len(), "branching placement complete");
    stars
}

fn danger_zones<R: Rng + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Vec<DangerZone> {
    let mut zones = config.danger_zones.clone();
    for _ in 0..config.random_danger_zones {
        zones.push(DangerZone {
            center: random_point_in_sphere(rng, config.danger_zone_spread),
            radius: config.random_danger_zone_radius,
        });
    }
    zones
}

fn mark_dangerous<R: Rng + ?Sized>(
    stars: &mut [Star],
    zones: &[DangerZone],
    multiplier: Range,
    rng: &mut R,
) {
    for star in stars {
        if zones
            .iter()
            .any(|zone| zone.contains(&star.position, star.radius))
        {
            star.dangerous = true;
            star.danger_multiplier = sample(rng, multiplier);
            star.color = [0.0, 0.0, 0.0];
        }
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, range: Range) -> f64 {
    rng.gen_range(range.min..=range.max)
}

fn sample_symmetric<R: Rng + ?Sized>(rng: &mut R, extent: f64) -> f64 {
    rng.gen_range(-extent..=extent)
}

/// Uniform point inside a sphere of `radius` centred on the origin.
fn random_point_in_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f64) -> [f64; 3] {
    let z: f64 = rng.gen_range(-1.0..=1.0);
    let phi = rng.gen_range(0.0..TAU);
    let scale = radius * rng.gen::<f64>().cbrt();
    let ring = (1.0 - z * z).sqrt();
    [
        scale * ring * phi.cos(),
        scale * ring * phi.sin(),
        scale * z,
    ]
}
