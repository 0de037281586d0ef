mod common;

use common::{hand_built, line_starmap, mark_dangerous, small_config};
use rand::rngs::StdRng;
use rand::SeedableRng;
use starlane_lib::{
    find_route, Error, GenerationConfig, NavigationSession, PathfindingState, SearchOptions,
    ShipConfig,
};

fn calm_ship() -> ShipConfig {
    ShipConfig {
        pirate_attack_chance: 0.0,
        ..ShipConfig::default()
    }
}

fn five_star_session() -> NavigationSession {
    let map = hand_built(
        line_starmap(&[0.0, 10.0, 20.0, 30.0, 40.0]),
        &[(0, 1), (1, 2), (2, 3), (3, 4)],
        0,
    );
    NavigationSession::from_map(map, calm_ship(), StdRng::seed_from_u64(1)).expect("session")
}

#[test]
fn session_starts_on_the_most_connected_star() {
    let config = small_config(41);
    let session = NavigationSession::new(&config, calm_ship()).expect("session");

    assert_eq!(session.state(), PathfindingState::SelectingDestination);
    let degree = session.graph().neighbours(session.start()).len();
    assert!(session
        .starmap()
        .ids()
        .all(|id| session.graph().neighbours(id).len() <= degree));
    assert_eq!(session.ship().fuel(), calm_ship().max_fuel);
}

#[test]
fn regeneration_mid_route_discards_old_state() {
    let ship = ShipConfig {
        max_path_stars: 64,
        ..calm_ship()
    };
    let mut session = NavigationSession::new(&small_config(1), ship).expect("session");
    let goal = (0..session.starmap().len())
        .find(|&id| id != session.start())
        .expect("more than one star");
    session.select_destination(goal).expect("select");

    let smaller = GenerationConfig {
        star_count: 12,
        ..small_config(2)
    };
    session.regenerate(&smaller).expect("regenerate");

    assert_eq!(session.state(), PathfindingState::SelectingDestination);
    assert_eq!(session.destination(), None);
    assert!(session.path().is_empty());
    assert!(session.outcome().is_none());
    assert_eq!(session.starmap().len(), 12);

    let start = session.start();
    for goal in session.starmap().ids() {
        let steps = find_route(
            session.graph(),
            session.starmap(),
            start,
            goal,
            &SearchOptions::default(),
        )
        .expect("regenerated map is connected");
        assert!(steps.iter().all(|&id| id < 12), "stale star in {:?}", steps);
    }

    let target = (start + 1) % 12;
    let state = session.select_destination(target).expect("select");
    assert_eq!(state, PathfindingState::RouteReady);
    assert!(session.path().iter().all(|&id| id < 12));
}

#[test]
fn regeneration_revives_a_stranded_ship() {
    let mut starmap = line_starmap(&[0.0, 10.0, 20.0]);
    mark_dangerous(&mut starmap, 1, 2.0);
    let map = hand_built(starmap, &[(0, 1), (1, 2)], 0);
    let ship = ShipConfig {
        max_fuel: 9.0,
        fuel_per_jump: 4.0,
        pirate_attack_chance: 1.0,
        pirate_fuel_loss: 1.0,
        ..ShipConfig::default()
    };
    let mut session =
        NavigationSession::from_map(map, ship, StdRng::seed_from_u64(3)).expect("session");

    session.select_destination(2).expect("select");
    session.start_route().expect("start");
    session.advance().expect("hop");
    assert_eq!(session.state(), PathfindingState::GameOver);
    assert!(session.ship().is_stranded());

    session.regenerate(&small_config(4)).expect("regenerate");
    assert_eq!(session.state(), PathfindingState::SelectingDestination);
    assert_eq!(session.ship().fuel(), 9.0);
}

#[test]
fn failed_regeneration_keeps_the_current_map() {
    let mut session = five_star_session();
    let bad = GenerationConfig {
        star_count: 0,
        ..GenerationConfig::default()
    };

    assert!(matches!(
        session.regenerate(&bad),
        Err(Error::InvalidConfig { .. })
    ));
    assert_eq!(session.starmap().len(), 5);
}

#[test]
fn unreachable_destination_reports_no_route() {
    let map = hand_built(line_starmap(&[0.0, 10.0, 50.0]), &[(0, 1)], 0);
    let mut session =
        NavigationSession::from_map(map, calm_ship(), StdRng::seed_from_u64(1)).expect("session");

    assert_eq!(
        session.select_destination(2).expect("select"),
        PathfindingState::NoRouteFound
    );
    assert!(session.path().is_empty());
    assert!(session.start_route().is_err());
    assert_eq!(
        session.select_destination(1).expect("reselect"),
        PathfindingState::RouteReady
    );
}

#[test]
fn insufficient_fuel_is_advisory() {
    let map = hand_built(
        line_starmap(&[0.0, 10.0, 20.0, 30.0, 40.0]),
        &[(0, 1), (1, 2), (2, 3), (3, 4)],
        0,
    );
    let ship = ShipConfig {
        max_fuel: 10.0,
        fuel_per_jump: 4.0,
        ..calm_ship()
    };
    let mut session =
        NavigationSession::from_map(map, ship, StdRng::seed_from_u64(1)).expect("session");

    assert_eq!(
        session.select_destination(4).expect("select"),
        PathfindingState::InsufficientResource
    );
    assert!(session.outcome().and_then(|o| o.plan()).is_some());
    assert_eq!(
        session.select_destination(2).expect("reselect"),
        PathfindingState::RouteReady
    );
}

#[test]
fn commands_out_of_order_are_rejected() {
    let mut session = five_star_session();

    assert!(matches!(
        session.start_route(),
        Err(Error::InvalidCommand {
            command: "start a route",
            ..
        })
    ));
    assert!(matches!(
        session.select_destination(42),
        Err(Error::UnknownStarId { id: 42 })
    ));

    session.select_destination(4).expect("select");
    session.start_route().expect("start");
    let err = session.select_destination(2).unwrap_err();
    assert_eq!(err.to_string(), "cannot select a destination while traveling");
}

#[test]
fn cancel_is_idempotent_from_any_state() {
    let mut session = five_star_session();
    session.cancel_route();
    assert_eq!(session.state(), PathfindingState::SelectingDestination);

    session.select_destination(3).expect("select");
    session.cancel_route();
    session.cancel_route();
    assert_eq!(session.state(), PathfindingState::SelectingDestination);
    assert_eq!(session.start(), 0);
    assert!(session.path().is_empty());
}

#[test]
fn consecutive_trips_chain_from_the_last_destination() {
    let mut session = five_star_session();

    for goal in [2, 4] {
        session.select_destination(goal).expect("select");
        session.start_route().expect("start");
        while session.state() == PathfindingState::Traveling {
            session.advance().expect("advance");
        }
        assert_eq!(session.state(), PathfindingState::Completed);
        assert_eq!(session.start(), goal);
    }

    assert_eq!(session.ship().fuel(), 100.0 - 4.0 * 4.0);
}
