//! Output formatting for command results.
//!
//! Every command builds a serializable report. `--format json` prints it with
//! `serde_json`; text mode goes through the renderers below, which return the
//! text so it can be tested without capturing stdout.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use starlane_lib::{
    GeneratedMap, GenerationConfig, MapLayout, PathfindingState, RouteOutcome, SearchFailure,
    StarId, Starmap,
};

use crate::terminal::ColorPalette;

/// Output format shared by all subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a report as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn name_of(starmap: &Starmap, id: StarId) -> String {
    starmap.star_name(id).unwrap_or("<unknown>").to_string()
}

/// Summary printed by `generate`.
#[derive(Debug, Clone, Serialize)]
pub struct MapSummary {
    pub layout: MapLayout,
    pub seed: Option<u64>,
    pub stars: usize,
    pub dangerous: usize,
    pub edges: usize,
    pub connected: bool,
    pub start: String,
}

impl MapSummary {
    pub fn new(map: &GeneratedMap, config: &GenerationConfig) -> Self {
        Self {
            layout: config.layout,
            seed: config.seed,
            stars: map.starmap.len(),
            dangerous: map.starmap.dangerous_count(),
            edges: map.graph.edge_count(),
            connected: map.graph.is_connected(),
            start: name_of(&map.starmap, map.start),
        }
    }
}

pub fn render_map_summary(summary: &MapSummary, palette: &ColorPalette) -> String {
    let layout = match summary.layout {
        MapLayout::Scatter => "scatter",
        MapLayout::Branching => "branching",
    };
    let seed = summary
        .seed
        .map_or_else(|| "random".to_string(), |seed| seed.to_string());
    let connected = if summary.connected {
        format!("{}yes{}", palette.ok, palette.reset)
    } else {
        format!("{}no{}", palette.danger, palette.reset)
    };

    let mut out = String::new();
    let _ = writeln!(out, "Generated {} map (seed: {})", layout, seed);
    let _ = writeln!(out, "  Stars:     {}", summary.stars);
    let _ = writeln!(
        out,
        "  Dangerous: {}{}{}",
        palette.danger, summary.dangerous, palette.reset
    );
    let _ = writeln!(out, "  Edges:     {}", summary.edges);
    let _ = writeln!(out, "  Connected: {}", connected);
    let _ = writeln!(
        out,
        "  Start:     {}{}{}",
        palette.name, summary.start, palette.reset
    );
    out
}

/// One row printed by `stars`.
#[derive(Debug, Clone, Serialize)]
pub struct StarRow {
    pub id: StarId,
    pub name: String,
    pub position: [f64; 3],
    pub radius: f64,
    pub neighbours: usize,
    pub dangerous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger_multiplier: Option<f64>,
}

pub fn star_rows(map: &GeneratedMap) -> Vec<StarRow> {
    map.starmap
        .stars()
        .iter()
        .map(|star| StarRow {
            id: star.id,
            name: star.name.clone(),
            position: star.position.to_array(),
            radius: star.radius,
            neighbours: map.graph.neighbours(star.id).len(),
            dangerous: star.dangerous,
            danger_multiplier: star.dangerous.then_some(star.danger_multiplier),
        })
        .collect()
}

pub fn render_star_rows(rows: &[StarRow], palette: &ColorPalette) -> String {
    let mut out = String::new();
    for row in rows {
        let danger = match row.danger_multiplier {
            Some(multiplier) => format!(
                " {}[dangerous x{:.1}]{}",
                palette.danger, multiplier, palette.reset
            ),
            None => String::new(),
        };
        let _ = writeln!(
            out,
            "{:>4}  {}{}{}  ({:.1}, {:.1}, {:.1})  {} neighbours{}",
            row.id,
            palette.name,
            row.name,
            palette.reset,
            row.position[0],
            row.position[1],
            row.position[2],
            row.neighbours,
            danger
        );
    }
    out
}

/// Result printed by `route`.
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub from: String,
    pub to: String,
    /// Names of the route stars, when a route was found.
    pub route: Vec<String>,
    #[serde(flatten)]
    pub outcome: RouteOutcome,
}

impl RouteReport {
    pub fn new(starmap: &Starmap, from: StarId, to: StarId, outcome: RouteOutcome) -> Self {
        let route = outcome
            .plan()
            .map(|plan| plan.steps.iter().map(|&id| name_of(starmap, id)).collect())
            .unwrap_or_default();
        Self {
            from: name_of(starmap, from),
            to: name_of(starmap, to),
            route,
            outcome,
        }
    }
}

pub fn render_route_report(report: &RouteReport, palette: &ColorPalette) -> String {
    let mut out = String::new();

    let headline = match &report.outcome {
        RouteOutcome::RouteReady(_) => format!("{}Route ready{}", palette.ok, palette.reset),
        RouteOutcome::NoRouteFound { reason } => {
            let why = match reason {
                SearchFailure::Exhausted => "the stars are not connected".to_string(),
                other => other.to_string(),
            };
            format!("{}No route found{}: {}", palette.danger, palette.reset, why)
        }
        RouteOutcome::InsufficientResource {
            required,
            available,
            ..
        } => format!(
            "{}Not enough fuel{}: route needs {:.1}, ship has {:.1}",
            palette.warn, palette.reset, required, available
        ),
        RouteOutcome::PathTooLong { stars, max, .. } => format!(
            "{}Path too long{}: {} stars, limit is {}",
            palette.warn, palette.reset, stars, max
        ),
    };
    let _ = writeln!(out, "Route from {} to {}", report.from, report.to);
    let _ = writeln!(out, "{}", headline);

    if let Some(plan) = report.outcome.plan() {
        for (index, name) in report.route.iter().enumerate() {
            let marker = if index == 0 {
                "start"
            } else if index + 1 == report.route.len() {
                "goal"
            } else {
                "via"
            };
            let _ = writeln!(
                out,
                "  {}{:>5}{} {}{}{}",
                palette.muted, marker, palette.reset, palette.name, name, palette.reset
            );
        }
        let _ = writeln!(
            out,
            "{} jumps, length {}{:.1}{}, cost {}{:.1}{} ({} cost model)",
            plan.hop_count(),
            palette.value,
            plan.length,
            palette.reset,
            palette.value,
            plan.cost,
            palette.reset,
            plan.cost_model
        );
    }
    out
}

/// One entry of the `play` state log.
#[derive(Debug, Clone, Serialize)]
pub struct PlayEvent {
    pub state: PathfindingState,
    pub star: String,
    pub fuel: f64,
    pub message: String,
}

pub fn render_play_log(events: &[PlayEvent], palette: &ColorPalette) -> String {
    let mut out = String::new();
    for event in events {
        let color = match event.state {
            PathfindingState::RouteReady | PathfindingState::Completed => palette.ok,
            PathfindingState::InsufficientResource | PathfindingState::PathTooLong => palette.warn,
            PathfindingState::NoRouteFound | PathfindingState::GameOver => palette.danger,
            _ => palette.muted,
        };
        let _ = writeln!(
            out,
            "[{}{:<21}{}] {:<16} fuel {}{:>6.1}{}  {}",
            color,
            event.state,
            palette.reset,
            event.star,
            palette.value,
            event.fuel,
            palette.reset,
            event.message
        );
    }
    out
}
