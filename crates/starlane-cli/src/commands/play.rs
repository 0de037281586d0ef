//! Play command handler: a scripted navigation session.
//!
//! Selects the destination, starts the route and advances hop by hop until
//! the trip completes or the ship runs dry, recording every state change.

use anyhow::{Context, Result};
use clap::Args;

use starlane_lib::{
    Colonisation, NavigationSession, PathfindingState, RouteOutcome, ShipConfig, StarId,
};

use crate::commands::route::CostModelArg;
use crate::commands::MapArgs;
use crate::output::{print_json, render_play_log, OutputFormat, PlayEvent};
use crate::terminal::ColorPalette;

/// Arguments for the play command.
#[derive(Debug, Clone, Args)]
pub struct PlayCommandArgs {
    /// Destination star name.
    #[arg(long = "to")]
    pub to: String,
    #[arg(long, value_enum, default_value_t = CostModelArg::Legacy)]
    pub cost_model: CostModelArg,
    /// Fuel tank size; the ship starts full.
    #[arg(long, default_value_t = ShipConfig::default().max_fuel)]
    pub max_fuel: f64,
    #[arg(long, default_value_t = ShipConfig::default().fuel_per_jump)]
    pub fuel_per_jump: f64,
    #[arg(long, default_value_t = ShipConfig::default().max_path_stars)]
    pub max_path_stars: usize,
    /// Chance of a pirate attack at dangerous waypoints, between 0 and 1.
    #[arg(long, default_value_t = ShipConfig::default().pirate_attack_chance)]
    pub pirate_chance: f64,
    /// Try to colonise the destination on arrival.
    #[arg(long)]
    pub colonise: bool,
}

impl PlayCommandArgs {
    pub fn ship_config(&self) -> ShipConfig {
        ShipConfig {
            max_fuel: self.max_fuel,
            fuel_per_jump: self.fuel_per_jump,
            max_path_stars: self.max_path_stars,
            pirate_attack_chance: self.pirate_chance,
            ..ShipConfig::default()
        }
    }
}

/// Handle the play subcommand.
pub fn handle_play_command(
    map_args: &MapArgs,
    format: OutputFormat,
    args: &PlayCommandArgs,
) -> Result<()> {
    let config = map_args.load_config()?;
    let mut session = NavigationSession::new(&config, args.ship_config())
        .context("failed to start navigation session")?
        .with_cost_model(args.cost_model.into());
    let destination = session.starmap().resolve(&args.to)?;

    let events = run_trip(&mut session, destination, args.colonise)?;

    match format {
        OutputFormat::Json => print_json(&events),
        OutputFormat::Text => {
            print!("{}", render_play_log(&events, &ColorPalette::detect()));
            Ok(())
        }
    }
}

/// Drive `session` to `destination` and return the state log.
pub fn run_trip(
    session: &mut NavigationSession,
    destination: StarId,
    colonise: bool,
) -> Result<Vec<PlayEvent>> {
    let mut events = Vec::new();
    let origin = session.start();
    record(&mut events, session, origin, "waiting at start".to_string());

    if destination == origin {
        record(
            &mut events,
            session,
            origin,
            "destination is the start star".to_string(),
        );
        return Ok(events);
    }

    let state = session.select_destination(destination)?;
    let message = match session.outcome() {
        Some(RouteOutcome::RouteReady(plan)) => {
            format!("route of {} jumps, length {:.1}", plan.hop_count(), plan.length)
        }
        Some(RouteOutcome::NoRouteFound { reason }) => format!("no route: {}", reason),
        Some(RouteOutcome::InsufficientResource {
            required,
            available,
            ..
        }) => format!("needs {:.1} fuel, have {:.1}", required, available),
        Some(RouteOutcome::PathTooLong { stars, max, .. }) => {
            format!("{} stars exceeds limit of {}", stars, max)
        }
        None => String::new(),
    };
    record(&mut events, session, origin, message);
    if state != PathfindingState::RouteReady {
        return Ok(events);
    }

    session.start_route()?;
    record(&mut events, session, origin, "departing".to_string());

    while session.state() == PathfindingState::Traveling {
        let hop = session.advance()?;
        let message = if hop.pirate_attack {
            "jumped; pirates attacked".to_string()
        } else if hop.arrived {
            "arrived".to_string()
        } else {
            "jumped".to_string()
        };
        record(&mut events, session, hop.to, message);
    }

    if colonise && session.state() == PathfindingState::Completed {
        let message = match session.colonise_current_star()? {
            Colonisation::Colonised { refilled } if refilled > 0.0 => {
                format!("colonised; found {:.1} fuel", refilled)
            }
            Colonisation::Colonised { .. } => "colonised".to_string(),
            Colonisation::Dangerous => "too dangerous to colonise".to_string(),
            Colonisation::AlreadyColonised => "already colonised".to_string(),
        };
        let star = session.start();
        record(&mut events, session, star, message);
    }

    Ok(events)
}

fn record(events: &mut Vec<PlayEvent>, session: &NavigationSession, star: StarId, message: String) {
    events.push(PlayEvent {
        state: session.state(),
        star: session
            .starmap()
            .star_name(star)
            .unwrap_or("<unknown>")
            .to_string(),
        fuel: session.ship().fuel(),
        message,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use starlane_lib::{rng_from_seed, GeneratedMap, Graph, Position, Star, Starmap};

    fn session(ship: ShipConfig) -> NavigationSession {
        let stars = (0..4)
            .map(|id| Star::new(id, Position::new(id as f64 * 10.0, 0.0, 0.0), 1.0))
            .collect();
        let map = GeneratedMap {
            starmap: Starmap::from_stars(stars).expect("valid stars"),
            graph: Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]),
            start: 0,
        };
        NavigationSession::from_map(map, ship, rng_from_seed(Some(1))).expect("session")
    }

    #[test]
    fn trip_log_ends_completed() {
        let mut session = session(ShipConfig::default());
        let events = run_trip(&mut session, 3, true).expect("trip");

        let states: Vec<_> = events.iter().map(|e| e.state).collect();
        assert_eq!(
            states,
            vec![
                PathfindingState::SelectingDestination,
                PathfindingState::RouteReady,
                PathfindingState::Traveling,
                PathfindingState::Traveling,
                PathfindingState::Traveling,
                PathfindingState::Completed,
                PathfindingState::Completed,
            ]
        );
        assert_eq!(events[5].star, "Star 3");
        assert!(events[6].message.starts_with("colonised"));
    }

    #[test]
    fn advisory_outcome_stops_the_trip() {
        let mut session = session(ShipConfig {
            max_path_stars: 2,
            ..ShipConfig::default()
        });
        let events = run_trip(&mut session, 3, false).expect("trip");

        assert_eq!(events.len(), 2);
        assert_eq!(events[1].state, PathfindingState::PathTooLong);
        assert_eq!(events[1].message, "4 stars exceeds limit of 2");
    }
}
