//! Starlane library entry points.
//!
//! This crate generates procedural star maps, derives the undirected star
//! graph, and plans danger-aware routes across it. A small navigation session
//! ties those pieces to a ship with a fuel budget. Higher-level consumers
//! (the CLI, tests, benches) should only depend on the items exported here
//! instead of reimplementing behavior.

pub mod config;
pub mod error;
pub mod generate;
pub mod graph;
pub mod map;
pub mod path;
pub mod routing;
pub mod session;
pub mod ship;
pub mod spatial;

pub use config::{Bounds, DangerZone, GenerationConfig, MapLayout, Range};
pub use error::{Error, Result};
pub use generate::{
    generate_map, generate_map_with_rng, generate_stars, rng_from_seed, GeneratedMap,
};
pub use graph::{build_graph, Graph, GraphBuildOptions};
pub use map::{Position, Star, StarId, Starmap};
pub use path::{find_route, path_cost, path_length, CostModel, SearchFailure, SearchOptions};
pub use routing::{
    plan_route, BudgetViolation, RouteBudget, RouteOutcome, RoutePlan, RouteRequest,
};
pub use session::{Colonisation, HopReport, NavigationSession, PathfindingState};
pub use ship::{Ship, ShipConfig};
pub use spatial::SpatialIndex;
