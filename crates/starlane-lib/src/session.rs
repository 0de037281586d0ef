//! Navigation session state machine.
//!
//! A [`NavigationSession`] owns the current map, the ship and the random
//! source, and walks through the [`PathfindingState`] values as commands
//! arrive:
//!
//! ```text
//! SelectingDestination -> CalculatingRoute -> { NoRouteFound | InsufficientResource
//!                                             | PathTooLong | RouteReady }
//! RouteReady -> Traveling -> { Completed | GameOver }
//! ```
//!
//! Searches run to completion inside [`NavigationSession::select_destination`],
//! so `CalculatingRoute` is only observable in transition logs. Advisory and
//! failed outcomes accept a new selection directly. Cancel works from any
//! state; after `GameOver` a stranded ship stays stranded until
//! [`NavigationSession::regenerate`] refuels it.

use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::GenerationConfig;
use crate::error::{Error, Result};
use crate::generate::{generate_map_with_rng, rng_from_seed, GeneratedMap};
use crate::graph::Graph;
use crate::map::{StarId, Starmap};
use crate::path::{path_length, CostModel};
use crate::routing::{plan_route, RouteOutcome, RouteRequest};
use crate::ship::{Ship, ShipConfig};

/// Discrete state reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathfindingState {
    SelectingDestination,
    CalculatingRoute,
    NoRouteFound,
    InsufficientResource,
    PathTooLong,
    RouteReady,
    Traveling,
    Completed,
    GameOver,
}

impl PathfindingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathfindingState::SelectingDestination => "selecting_destination",
            PathfindingState::CalculatingRoute => "calculating_route",
            PathfindingState::NoRouteFound => "no_route_found",
            PathfindingState::InsufficientResource => "insufficient_resource",
            PathfindingState::PathTooLong => "path_too_long",
            PathfindingState::RouteReady => "route_ready",
            PathfindingState::Traveling => "traveling",
            PathfindingState::Completed => "completed",
            PathfindingState::GameOver => "game_over",
        }
    }

    /// States in which a new destination may be selected.
    pub fn accepts_selection(&self) -> bool {
        matches!(
            self,
            PathfindingState::SelectingDestination
                | PathfindingState::NoRouteFound
                | PathfindingState::InsufficientResource
                | PathfindingState::PathTooLong
                | PathfindingState::RouteReady
                | PathfindingState::Completed
        )
    }
}

impl std::fmt::Display for PathfindingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// What happened during a single jump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HopReport {
    pub from: StarId,
    pub to: StarId,
    /// Fuel left after the jump and any attack.
    pub fuel: f64,
    pub pirate_attack: bool,
    /// The jump reached the destination.
    pub arrived: bool,
}

/// Result of trying to colonise the current star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Colonisation {
    Colonised { refilled: f64 },
    Dangerous,
    AlreadyColonised,
}

/// Interactive navigation over one generated map.
#[derive(Debug, Clone)]
pub struct NavigationSession {
    starmap: Starmap,
    graph: Graph,
    ship: Ship,
    rng: StdRng,
    cost_model: CostModel,
    state: PathfindingState,
    start: StarId,
    destination: Option<StarId>,
    path: Vec<StarId>,
    hops_taken: usize,
    outcome: Option<RouteOutcome>,
}

impl NavigationSession {
    /// Generate a map for `config` and put a fresh ship on its start star.
    pub fn new(config: &GenerationConfig, ship: ShipConfig) -> Result<Self> {
        let mut rng = rng_from_seed(config.seed);
        let map = generate_map_with_rng(config, &mut rng)?;
        Self::from_map(map, ship, rng)
    }

    /// Start a session on an existing map.
    pub fn from_map(map: GeneratedMap, ship: ShipConfig, rng: StdRng) -> Result<Self> {
        ship.validate()?;
        if !map.starmap.contains(map.start) {
            return Err(Error::UnknownStarId { id: map.start });
        }
        Ok(Self {
            starmap: map.starmap,
            graph: map.graph,
            ship: Ship::new(ship),
            rng,
            cost_model: CostModel::default(),
            state: PathfindingState::SelectingDestination,
            start: map.start,
            destination: None,
            path: Vec::new(),
            hops_taken: 0,
            outcome: None,
        })
    }

    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    pub fn state(&self) -> PathfindingState {
        self.state
    }

    pub fn starmap(&self) -> &Starmap {
        &self.starmap
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// Star the next route starts from.
    pub fn start(&self) -> StarId {
        self.start
    }

    pub fn destination(&self) -> Option<StarId> {
        self.destination
    }

    /// The ready or in-flight route; empty otherwise.
    pub fn path(&self) -> &[StarId] {
        &self.path
    }

    /// Sum of segment distances of [`Self::path`].
    pub fn path_length(&self) -> f64 {
        path_length(&self.starmap, &self.path)
    }

    /// Outcome of the latest route calculation, kept for advisories.
    pub fn outcome(&self) -> Option<&RouteOutcome> {
        self.outcome.as_ref()
    }

    /// Where the ship currently is.
    pub fn current_star(&self) -> StarId {
        match self.state {
            PathfindingState::Traveling | PathfindingState::GameOver if !self.path.is_empty() => {
                self.path[self.hops_taken.min(self.path.len() - 1)]
            }
            _ => self.start,
        }
    }

    /// Select a destination and calculate a route to it.
    ///
    /// Selecting the start star is ignored. Returns the resulting state.
    pub fn select_destination(&mut self, star: StarId) -> Result<PathfindingState> {
        self.ensure(self.state.accepts_selection(), "select a destination")?;
        if !self.starmap.contains(star) {
            return Err(Error::UnknownStarId { id: star });
        }
        if star == self.start {
            debug!(star, "ignoring selection of the start star");
            return Ok(self.state);
        }

        self.clear_route();
        self.destination = Some(star);
        self.transition(PathfindingState::CalculatingRoute);

        let request = RouteRequest::new(self.start, star)
            .with_cost_model(self.cost_model)
            .with_budget(self.ship.budget());
        let outcome = match plan_route(&self.graph, &self.starmap, &request) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.clear_route();
                self.transition(PathfindingState::SelectingDestination);
                return Err(err);
            }
        };

        let next = match &outcome {
            RouteOutcome::RouteReady(plan) => {
                self.path = plan.steps.clone();
                PathfindingState::RouteReady
            }
            RouteOutcome::NoRouteFound { .. } => PathfindingState::NoRouteFound,
            RouteOutcome::InsufficientResource { .. } => PathfindingState::InsufficientResource,
            RouteOutcome::PathTooLong { .. } => PathfindingState::PathTooLong,
        };
        self.outcome = Some(outcome);
        self.transition(next);
        Ok(next)
    }

    /// Begin travelling along a ready route.
    pub fn start_route(&mut self) -> Result<()> {
        self.ensure(
            self.state == PathfindingState::RouteReady,
            "start a route",
        )?;
        self.hops_taken = 0;
        self.transition(PathfindingState::Traveling);
        Ok(())
    }

    /// Fly one hop of the current route.
    pub fn advance(&mut self) -> Result<HopReport> {
        self.ensure(self.state == PathfindingState::Traveling, "advance")?;

        let from = self.path[self.hops_taken];
        let to = self.path[self.hops_taken + 1];
        self.hops_taken += 1;
        let arrived = self.hops_taken + 1 == self.path.len();

        self.ship.burn_jump();

        let mut pirate_attack = false;
        if !arrived {
            let exposed = self
                .starmap
                .get(to)
                .is_some_and(|star| star.dangerous && !star.colonised);
            if exposed {
                pirate_attack = self.ship.pirate_attack(&mut self.rng);
            }
        }

        let report = HopReport {
            from,
            to,
            fuel: self.ship.fuel(),
            pirate_attack,
            arrived,
        };

        if self.ship.is_stranded() {
            info!(star = to, "ship ran out of fuel");
            self.transition(PathfindingState::GameOver);
        } else if arrived {
            self.start = to;
            self.clear_route();
            self.transition(PathfindingState::Completed);
        }

        Ok(report)
    }

    /// Drop the current selection and route and return to selection.
    ///
    /// Safe to call repeatedly and from any state. A cancel during travel or
    /// after game over leaves the ship at the star it last reached.
    pub fn cancel_route(&mut self) {
        if matches!(
            self.state,
            PathfindingState::Traveling | PathfindingState::GameOver
        ) {
            self.start = self.current_star();
        }
        self.clear_route();
        self.transition(PathfindingState::SelectingDestination);
    }

    /// Replace the map with a freshly generated one and refuel the ship.
    ///
    /// When `config` carries a seed the random source is reseeded from it.
    /// On error the session keeps its current map.
    pub fn regenerate(&mut self, config: &GenerationConfig) -> Result<()> {
        if config.seed.is_some() {
            self.rng = rng_from_seed(config.seed);
        }
        let map = generate_map_with_rng(config, &mut self.rng)?;

        self.starmap = map.starmap;
        self.graph = map.graph;
        self.start = map.start;
        self.ship = Ship::new(*self.ship.config());
        self.clear_route();
        self.transition(PathfindingState::SelectingDestination);
        Ok(())
    }

    /// Colonise the star the ship is parked at.
    pub fn colonise_current_star(&mut self) -> Result<Colonisation> {
        self.ensure(self.state.accepts_selection(), "colonise")?;

        let star = self.starmap.star_mut(self.start)?;
        if star.dangerous {
            return Ok(Colonisation::Dangerous);
        }
        if star.colonised {
            return Ok(Colonisation::AlreadyColonised);
        }
        star.colonised = true;

        let refilled = self.ship.colonise_bonus(&mut self.rng);
        info!(star = self.start, refilled, "colonised star");
        Ok(Colonisation::Colonised { refilled })
    }

    fn clear_route(&mut self) {
        self.destination = None;
        self.path.clear();
        self.hops_taken = 0;
        self.outcome = None;
    }

    fn transition(&mut self, next: PathfindingState) {
        debug!(from = %self.state, to = %next, "navigation state change");
        self.state = next;
    }

    fn ensure(&self, allowed: bool, command: &'static str) -> Result<()> {
        if allowed {
            Ok(())
        } else {
            Err(Error::InvalidCommand {
                state: self.state.to_string(),
                command,
            })
        }
    }
}
