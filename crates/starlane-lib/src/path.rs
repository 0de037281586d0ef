use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::graph::Graph;
use crate::map::{Star, StarId, Starmap};

/// Extra reconstruction steps allowed beyond the star count before a
/// back-pointer chain is treated as corrupt.
pub const RECONSTRUCTION_MARGIN: usize = 50;

/// How danger multipliers enter the accumulated cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    /// Two-stage assignment: discovery and improvement checks use the plain
    /// hop distance, then the stored `g` is overwritten with the
    /// danger-scaled hop cost. `f` keeps the unscaled value.
    #[default]
    Legacy,
    /// The danger-scaled hop cost is computed once and used for comparison,
    /// storage and `f`.
    Consistent,
}

impl std::fmt::Display for CostModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            CostModel::Legacy => "legacy",
            CostModel::Consistent => "consistent",
        };
        f.write_str(value)
    }
}

/// Options for a single search.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SearchOptions {
    pub cost_model: CostModel,
    /// Maximum back-pointer steps during reconstruction. Defaults to the star
    /// count plus [`RECONSTRUCTION_MARGIN`].
    pub reconstruction_cap: Option<usize>,
}

/// Why a search produced no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchFailure {
    /// The open set emptied before the goal was reached.
    #[error("search exhausted the frontier without reaching the goal")]
    Exhausted,
    /// Walking back-pointers from the goal did not reach the start in time.
    #[error("path reconstruction exceeded {cap} steps")]
    IterationCap { cap: usize },
    /// Start or goal is not part of the map.
    #[error("star {id} is not part of the map")]
    UnknownStar { id: StarId },
}

/// Per-star search bookkeeping, local to one search call.
#[derive(Debug, Clone, Copy, PartialEq)]
struct NodeScore {
    g: f64,
    h: f64,
    f: f64,
    parent: Option<StarId>,
}

/// Run the best-first search from `start` to `goal`.
///
/// The open set is kept in discovery order and the first star with the
/// strictly lowest `f` is expanded, so ties go to the earliest discovered star.
pub fn find_route(
    graph: &Graph,
    starmap: &Starmap,
    start: StarId,
    goal: StarId,
    options: &SearchOptions,
) -> Result<Vec<StarId>, SearchFailure> {
    for id in [start, goal] {
        if !starmap.contains(id) {
            return Err(SearchFailure::UnknownStar { id });
        }
    }

    let cap = options
        .reconstruction_cap
        .unwrap_or(starmap.len() + RECONSTRUCTION_MARGIN);

    let mut scores: HashMap<StarId, NodeScore> = HashMap::new();
    let mut open: Vec<StarId> = vec![start];
    let mut closed: HashSet<StarId> = HashSet::new();
    let mut expanded = 0usize;

    scores.insert(
        start,
        NodeScore {
            g: 0.0,
            h: 0.0,
            f: 0.0,
            parent: None,
        },
    );

    while !open.is_empty() {
        let (position, current) = lowest_f(&open, &scores);

        if current == goal {
            let path = reconstruct_path(&scores, start, goal, cap)
                .ok_or(SearchFailure::IterationCap { cap })?;
            debug!(
                start,
                goal,
                expanded,
                stars = path.len(),
                cost_model = %options.cost_model,
                "route found"
            );
            return Ok(path);
        }

        let current_g = scores.get(&current).map_or(0.0, |score| score.g);
        let candidates: Vec<StarId> = graph
            .neighbours(current)
            .iter()
            .copied()
            .filter(|next| !closed.contains(next))
            .collect();

        for next in candidates {
            let step = starmap.distance(current, next);
            let h = starmap.distance(next, goal);
            let multiplier = starmap
                .get(next)
                .map_or(1.0, Star::traversal_multiplier);

            match options.cost_model {
                CostModel::Legacy => {
                    relax(&mut scores, &mut open, current, next, current_g + step, h);
                    if let Some(score) = scores.get_mut(&next) {
                        score.g = current_g + step * multiplier;
                    }
                }
                CostModel::Consistent => {
                    relax(
                        &mut scores,
                        &mut open,
                        current,
                        next,
                        current_g + step * multiplier,
                        h,
                    );
                }
            }
        }

        open.remove(position);
        closed.insert(current);
        expanded += 1;
    }

    debug!(start, goal, expanded, "search exhausted");
    Err(SearchFailure::Exhausted)
}

/// Record `tentative_g` for `next` if it is newly discovered or improves on
/// the recorded cost. Stars in `scores` that are not closed are in `open`.
fn relax(
    scores: &mut HashMap<StarId, NodeScore>,
    open: &mut Vec<StarId>,
    current: StarId,
    next: StarId,
    tentative_g: f64,
    h: f64,
) {
    match scores.entry(next) {
        Entry::Vacant(slot) => {
            open.push(next);
            slot.insert(NodeScore {
                g: tentative_g,
                h,
                f: tentative_g + h,
                parent: Some(current),
            });
        }
        Entry::Occupied(mut slot) => {
            let score = slot.get_mut();
            score.h = h;
            if tentative_g < score.g {
                score.parent = Some(current);
                score.g = tentative_g;
                score.f = score.g + score.h;
            }
        }
    }
}

fn lowest_f(open: &[StarId], scores: &HashMap<StarId, NodeScore>) -> (usize, StarId) {
    let f_of = |star: &StarId| scores.get(star).map_or(f64::INFINITY, |score| score.f);

    let mut best = (0, open[0]);
    let mut best_f = f_of(&open[0]);
    for (position, star) in open.iter().enumerate().skip(1) {
        let f = f_of(star);
        if f < best_f {
            best = (position, *star);
            best_f = f;
        }
    }
    best
}

/// Walk back-pointers from `goal` to `start`. Returns `None` when the chain
/// breaks or needs more than `cap` steps.
fn reconstruct_path(
    scores: &HashMap<StarId, NodeScore>,
    start: StarId,
    goal: StarId,
    cap: usize,
) -> Option<Vec<StarId>> {
    let mut path = vec![goal];
    let mut current = goal;
    let mut steps = 0usize;

    while current != start {
        steps += 1;
        if steps > cap {
            return None;
        }
        current = scores.get(&current)?.parent?;
        path.push(current);
    }

    path.reverse();
    Some(path)
}

/// Sum of Euclidean distances between consecutive stars.
pub fn path_length(starmap: &Starmap, steps: &[StarId]) -> f64 {
    steps
        .windows(2)
        .map(|pair| starmap.distance(pair[0], pair[1]))
        .sum()
}

/// Sum of hop distances, each scaled by the destination star's danger
/// multiplier.
pub fn path_cost(starmap: &Starmap, steps: &[StarId]) -> f64 {
    steps
        .windows(2)
        .map(|pair| {
            let multiplier = starmap
                .get(pair[1])
                .map_or(1.0, Star::traversal_multiplier);
            starmap.distance(pair[0], pair[1]) * multiplier
        })
        .sum()
}
