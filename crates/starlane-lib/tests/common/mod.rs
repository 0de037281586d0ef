#![allow(dead_code)]

use starlane_lib::{
    build_graph, GeneratedMap, GenerationConfig, Graph, GraphBuildOptions, Position, Range, Star,
    StarId, Starmap,
};

/// Stars on the x axis at the given coordinates, radius 1.
pub fn line_starmap(xs: &[f64]) -> Starmap {
    let points: Vec<[f64; 3]> = xs.iter().map(|&x| [x, 0.0, 0.0]).collect();
    starmap_from(&points)
}

pub fn starmap_from(points: &[[f64; 3]]) -> Starmap {
    let stars = points
        .iter()
        .enumerate()
        .map(|(id, p)| Star::new(id, Position::new(p[0], p[1], p[2]), 1.0))
        .collect();
    Starmap::from_stars(stars).expect("valid stars")
}

pub fn mark_dangerous(starmap: &mut Starmap, id: StarId, multiplier: f64) {
    let star = starmap.star_mut(id).expect("star exists");
    star.dangerous = true;
    star.danger_multiplier = multiplier;
}

/// Range-only graph over `starmap` with window `(0, max]`.
pub fn range_graph(starmap: &Starmap, max: f64) -> Graph {
    build_graph(
        starmap,
        &GraphBuildOptions {
            connection_range: Range::new(0.0, max),
            guarantee_connectivity: false,
        },
    )
}

pub fn hand_built(starmap: Starmap, edges: &[(StarId, StarId)], start: StarId) -> GeneratedMap {
    let graph = Graph::from_edges(starmap.len(), edges);
    GeneratedMap {
        starmap,
        graph,
        start,
    }
}

/// A small, quick map configuration with a fixed seed.
pub fn small_config(seed: u64) -> GenerationConfig {
    GenerationConfig {
        star_count: 40,
        seed: Some(seed),
        ..GenerationConfig::default()
    }
}
