//! Route planning on top of the search in [`crate::path`].
//!
//! This module provides:
//! - [`RouteRequest`] - start/goal pair plus search options and an optional budget
//! - [`RoutePlan`] - the found route with derived length and cost
//! - [`RouteOutcome`] - ready, not found, or an advisory budget outcome
//! - [`plan_route`] - main entry point
//!
//! # Example
//!
//! ```no_run
//! use starlane_lib::{generate_map, plan_route, GenerationConfig, RouteOutcome, RouteRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let map = generate_map(&GenerationConfig::default())?;
//! let request = RouteRequest::new(map.start, 7);
//! if let RouteOutcome::RouteReady(plan) = plan_route(&map.graph, &map.starmap, &request)? {
//!     println!("{} hops, {:.1} units", plan.hop_count(), plan.length);
//! }
//! # Ok(())
//! # }
//! ```

mod budget;

pub use budget::{BudgetViolation, RouteBudget};

use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::map::{StarId, Starmap};
use crate::path::{find_route, path_cost, path_length, CostModel, SearchFailure, SearchOptions};

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: StarId,
    pub goal: StarId,
    pub options: SearchOptions,
    pub budget: Option<RouteBudget>,
}

impl RouteRequest {
    /// Request with default search options and no budget.
    pub fn new(start: StarId, goal: StarId) -> Self {
        Self {
            start,
            goal,
            options: SearchOptions::default(),
            budget: None,
        }
    }

    /// Resolve star names into a request.
    pub fn by_name(starmap: &Starmap, start: &str, goal: &str) -> Result<Self> {
        Ok(Self::new(starmap.resolve(start)?, starmap.resolve(goal)?))
    }

    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.options.cost_model = cost_model;
        self
    }

    pub fn with_budget(mut self, budget: RouteBudget) -> Self {
        self.budget = Some(budget);
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub start: StarId,
    pub goal: StarId,
    /// Stars from start to goal inclusive.
    pub steps: Vec<StarId>,
    /// Sum of segment distances.
    pub length: f64,
    /// Sum of segment distances scaled by danger multipliers.
    pub cost: f64,
    pub cost_model: CostModel,
}

impl RoutePlan {
    fn from_steps(starmap: &Starmap, steps: Vec<StarId>, cost_model: CostModel) -> Self {
        Self {
            start: steps.first().copied().unwrap_or_default(),
            goal: steps.last().copied().unwrap_or_default(),
            length: path_length(starmap, &steps),
            cost: path_cost(starmap, &steps),
            steps,
            cost_model,
        }
    }

    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Result of planning a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// The route was found and fits the budget.
    RouteReady(RoutePlan),
    /// The search found no usable route.
    NoRouteFound { reason: SearchFailure },
    /// A route exists but needs more fuel than is available.
    InsufficientResource {
        plan: RoutePlan,
        required: f64,
        available: f64,
    },
    /// A route exists but visits more stars than allowed.
    PathTooLong {
        plan: RoutePlan,
        stars: usize,
        max: usize,
    },
}

impl RouteOutcome {
    /// The route, when one was found (including advisory outcomes).
    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            RouteOutcome::RouteReady(plan)
            | RouteOutcome::InsufficientResource { plan, .. }
            | RouteOutcome::PathTooLong { plan, .. } => Some(plan),
            RouteOutcome::NoRouteFound { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, RouteOutcome::RouteReady(_))
    }
}

/// Compute a route and apply the request budget.
///
/// Unknown star ids are errors; every search failure is reported as
/// [`RouteOutcome::NoRouteFound`].
pub fn plan_route(graph: &Graph, starmap: &Starmap, request: &RouteRequest) -> Result<RouteOutcome> {
    for id in [request.start, request.goal] {
        if !starmap.contains(id) {
            return Err(Error::UnknownStarId { id });
        }
    }
    if let Some(budget) = &request.budget {
        budget.validate()?;
    }

    let steps = match find_route(graph, starmap, request.start, request.goal, &request.options) {
        Ok(steps) => steps,
        Err(reason) => {
            warn!(
                start = request.start,
                goal = request.goal,
                %reason,
                "no route found"
            );
            return Ok(RouteOutcome::NoRouteFound { reason });
        }
    };

    let plan = RoutePlan::from_steps(starmap, steps, request.options.cost_model);

    let violation = request
        .budget
        .as_ref()
        .and_then(|budget| budget.check(plan.steps.len()));

    let outcome = match violation {
        None => RouteOutcome::RouteReady(plan),
        Some(BudgetViolation::InsufficientFuel {
            required,
            available,
        }) => {
            warn!(required, available, "insufficient fuel for route");
            RouteOutcome::InsufficientResource {
                plan,
                required,
                available,
            }
        }
        Some(BudgetViolation::TooManyStars { stars, max }) => {
            warn!(stars, max, "route visits too many stars");
            RouteOutcome::PathTooLong { plan, stars, max }
        }
    };

    Ok(outcome)
}
