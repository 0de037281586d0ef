mod common;

use common::small_config;
use starlane_lib::{
    generate_map, Bounds, DangerZone, Error, GeneratedMap, GenerationConfig, MapLayout, Position,
    Range, Starmap,
};

fn assert_separated(starmap: &Starmap, factor: f64) {
    let stars = starmap.stars();
    for (i, earlier) in stars.iter().enumerate() {
        for later in &stars[i + 1..] {
            let distance = earlier.distance_to(later);
            assert!(
                distance >= later.radius * factor,
                "{} and {} are {:.2} apart, exclusion is {:.2}",
                earlier.name,
                later.name,
                distance,
                later.radius * factor
            );
        }
    }
}

fn positions(map: &GeneratedMap) -> Vec<Position> {
    map.starmap.stars().iter().map(|star| star.position).collect()
}

#[test]
fn generated_adjacency_is_symmetric() {
    for seed in [1, 2, 3, 4, 5] {
        let map = generate_map(&small_config(seed)).expect("map generates");
        assert!(map.graph.is_symmetric(), "seed {} produced asymmetric edges", seed);
        for star in map.starmap.ids() {
            for &other in map.graph.neighbours(star) {
                assert!(map.graph.neighbours(other).contains(&star));
            }
        }
    }
}

#[test]
fn stars_respect_minimum_separation() {
    for seed in [11, 12, 13] {
        let config = small_config(seed);
        let map = generate_map(&config).expect("map generates");
        assert_eq!(map.starmap.len(), config.star_count);
        assert_separated(&map.starmap, config.separation_factor);
    }
}

#[test]
fn guaranteed_connectivity_reaches_every_star() {
    let config = GenerationConfig {
        connection_range: Range::new(0.0, 1.0),
        ..small_config(21)
    };
    let map = generate_map(&config).expect("map generates");

    for start in map.starmap.ids() {
        assert!(
            map.graph.reachable_from(start).into_iter().all(|seen| seen),
            "star {} cannot reach every star",
            start
        );
    }
}

#[test]
fn same_seed_same_map() {
    let first = generate_map(&small_config(99)).expect("map generates");
    let second = generate_map(&small_config(99)).expect("map generates");

    assert_eq!(positions(&first), positions(&second));
    assert_eq!(first.graph.edge_count(), second.graph.edge_count());
    assert_eq!(first.start, second.start);
}

#[test]
fn start_star_has_most_connections() {
    let map = generate_map(&small_config(5)).expect("map generates");
    let best = map
        .starmap
        .ids()
        .map(|id| map.graph.neighbours(id).len())
        .max()
        .expect("stars exist");
    assert_eq!(map.graph.neighbours(map.start).len(), best);
}

#[test]
fn crowded_bounds_report_exhaustion() {
    let config = GenerationConfig {
        star_count: 50,
        bounds: Bounds {
            x: 10.0,
            y: 10.0,
            z: 10.0,
        },
        max_placement_attempts: 200,
        ..small_config(3)
    };

    match generate_map(&config) {
        Err(Error::PlacementExhausted {
            placed,
            requested,
            attempts,
        }) => {
            assert!(placed < requested);
            assert_eq!(requested, 50);
            assert_eq!(attempts, 200);
        }
        Err(other) => panic!("expected placement exhaustion, got {}", other),
        Ok(map) => panic!("placed all {} stars in a tiny box", map.starmap.len()),
    }
}

#[test]
fn configured_danger_zone_flags_stars() {
    let config = GenerationConfig {
        random_danger_zones: 0,
        danger_zones: vec![DangerZone {
            center: [0.0, 0.0, 0.0],
            radius: 5_000.0,
        }],
        danger_multiplier: Range::new(3.0, 4.0),
        ..small_config(8)
    };
    let map = generate_map(&config).expect("map generates");

    assert_eq!(map.starmap.dangerous_count(), config.star_count);
    for star in map.starmap.stars() {
        assert!((3.0..=4.0).contains(&star.danger_multiplier));
        assert_eq!(star.color, [0.0, 0.0, 0.0]);
    }
}

#[test]
fn no_zones_means_no_danger() {
    let config = GenerationConfig {
        random_danger_zones: 0,
        ..small_config(8)
    };
    let map = generate_map(&config).expect("map generates");
    assert_eq!(map.starmap.dangerous_count(), 0);
    assert!(map
        .starmap
        .stars()
        .iter()
        .all(|star| star.traversal_multiplier() == 1.0));
}

#[test]
fn branching_layout_grows_two_chains() {
    let config = GenerationConfig {
        layout: MapLayout::Branching,
        star_count: 21,
        ..small_config(4)
    };
    let map = generate_map(&config).expect("map generates");

    let stars = map.starmap.stars();
    assert_eq!(stars[0].position, Position::ORIGIN);
    assert!(stars[1..].iter().step_by(2).all(|star| star.position.y > 0.0));
    assert!(stars[2..].iter().step_by(2).all(|star| star.position.y < 0.0));
    assert!(map.graph.is_connected());
}

#[test]
fn names_replace_placeholders_in_order() {
    let config = GenerationConfig {
        star_count: 3,
        star_names: vec!["Vega".into(), "Altair".into()],
        ..small_config(2)
    };
    let map = generate_map(&config).expect("map generates");

    assert_eq!(map.starmap.star_name(0), Some("Vega"));
    assert_eq!(map.starmap.star_name(1), Some("Altair"));
    assert_eq!(map.starmap.star_name(2), Some("Star 2"));
    assert_eq!(map.starmap.star_id_by_name("Altair"), Some(1));
}

#[test]
fn invalid_config_is_rejected() {
    let config = GenerationConfig {
        star_count: 0,
        ..GenerationConfig::default()
    };
    assert!(matches!(
        generate_map(&config),
        Err(Error::InvalidConfig { .. })
    ));
}
