//! Headless scenarios driving `TourPlugin` through `TourCommand` events.
//!
//! Time advances a fixed 100 ms per `app.update()`, so a default 3 s leg
//! lands after ~30 updates.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::config::FlightConfig;
use crate::error::TourError;
use crate::events::{
    Direction, NavigationRejected, TourCommand, TransitionCompleted, TransitionStarted,
};
use crate::flight::Airplane;
use crate::itinerary::Itinerary;
use crate::state::TourState;
use crate::{TourPlugin, TourSet};

const STEP: Duration = Duration::from_millis(100);
/// Updates comfortably longer than one default leg.
const LEG_UPDATES: usize = 40;

#[derive(Resource, Default)]
struct FlightLog {
    started: Vec<TransitionStarted>,
    completed: Vec<TransitionCompleted>,
    rejected: Vec<NavigationRejected>,
}

fn record_flight_events(
    mut log: ResMut<FlightLog>,
    mut started: EventReader<TransitionStarted>,
    mut completed: EventReader<TransitionCompleted>,
    mut rejected: EventReader<NavigationRejected>,
) {
    log.started.extend(started.read().copied());
    log.completed.extend(completed.read().copied());
    log.rejected.extend(rejected.read().copied());
}

/// Whether `TourState` was flagged as changed, one entry per update.
#[derive(Resource, Default)]
struct StateChanges(Vec<bool>);

fn record_state_changes(state: Res<TourState>, mut changes: ResMut<StateChanges>) {
    changes.0.push(state.is_changed());
}

fn tour_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));
    app.add_plugins(TourPlugin::new(
        Itinerary::bundled().expect("bundled dataset"),
    ));
    app.init_resource::<FlightLog>();
    app.init_resource::<StateChanges>();
    app.add_systems(
        Update,
        (record_flight_events, record_state_changes).in_set(TourSet::Effects),
    );
    app.world_mut()
        .spawn((Transform::default(), Airplane::default()));
    app.update();
    app
}

fn send(app: &mut App, command: TourCommand) {
    app.world_mut().send_event(command);
}

fn run(app: &mut App, updates: usize) {
    for _ in 0..updates {
        app.update();
    }
}

fn state(app: &App) -> &TourState {
    app.world().resource::<TourState>()
}

fn log(app: &App) -> &FlightLog {
    app.world().resource::<FlightLog>()
}

fn airplane_translation(app: &mut App) -> Vec3 {
    let mut query = app.world_mut().query_filtered::<&Transform, With<Airplane>>();
    query.single(app.world()).translation
}

fn stop_position(app: &App, index: usize) -> Vec3 {
    let radius = app.world().resource::<FlightConfig>().flight_radius();
    app.world()
        .resource::<Itinerary>()
        .coordinates(index)
        .unwrap()
        .to_point(radius)
}

#[test]
fn test_nine_stop_scenario() {
    let mut app = tour_app();
    assert_eq!(state(&app).location_count(), 9);
    assert!(!state(&app).has_started());

    send(&mut app, TourCommand::StartTour);
    app.update();
    {
        let s = state(&app);
        assert!(s.has_started());
        assert!(s.show_card());
        assert_eq!(s.previous_index(), Some(0));
        assert!(!s.is_playing());
    }

    send(&mut app, TourCommand::Advance(Direction::Forward));
    app.update();
    {
        let s = state(&app);
        assert_eq!(s.current_index(), 1);
        assert!(!s.show_card());
        assert!(s.is_playing());
        assert!(s.is_transitioning());
    }

    run(&mut app, LEG_UPDATES);
    let s = state(&app);
    assert!(!s.is_transitioning());
    assert!(s.show_card());
    assert!(!s.is_playing());
    assert_eq!(s.previous_index(), Some(1));

    let log = log(&app);
    assert_eq!(log.started.len(), 1);
    assert_eq!((log.started[0].from, log.started[0].to), (0, 1));
    assert_eq!(log.completed.len(), 1);
    assert_eq!(log.completed[0].index, 1);
}

#[test]
fn test_backward_from_first_stop_wraps_to_last() {
    let mut app = tour_app();
    send(&mut app, TourCommand::StartTour);
    send(&mut app, TourCommand::Advance(Direction::Backward));
    app.update();
    assert_eq!(state(&app).current_index(), 8);

    run(&mut app, LEG_UPDATES);
    assert_eq!(log(&app).completed.len(), 1);
    assert_eq!(log(&app).completed[0].index, 8);
}

#[test]
fn test_double_advance_before_takeoff_lands_once_at_final_target() {
    let mut app = tour_app();
    send(&mut app, TourCommand::StartTour);
    app.update();

    send(&mut app, TourCommand::Advance(Direction::Forward));
    send(&mut app, TourCommand::Advance(Direction::Forward));
    run(&mut app, LEG_UPDATES);

    let log = log(&app);
    assert!(log.rejected.is_empty());
    assert_eq!(log.started.len(), 1);
    assert_eq!((log.started[0].from, log.started[0].to), (0, 2));
    assert_eq!(log.completed.len(), 1);
    assert_eq!(log.completed[0].index, 2);
    assert_eq!(state(&app).previous_index(), Some(2));
}

#[test]
fn test_navigation_while_in_air_is_rejected() {
    let mut app = tour_app();
    send(&mut app, TourCommand::StartTour);
    send(&mut app, TourCommand::Advance(Direction::Forward));
    run(&mut app, 5);
    assert!(state(&app).is_transitioning());

    send(&mut app, TourCommand::Advance(Direction::Forward));
    send(&mut app, TourCommand::GoTo(5));
    app.update();
    assert_eq!(state(&app).current_index(), 1);

    run(&mut app, LEG_UPDATES);
    let log = log(&app);
    assert_eq!(log.rejected.len(), 2);
    assert!(log
        .rejected
        .iter()
        .all(|r| r.error == TourError::TransitionInFlight));
    assert_eq!(log.completed.len(), 1);
    assert_eq!(log.completed[0].index, 1);
}

#[test]
fn test_out_of_range_go_to_is_rejected_without_state_change() {
    let mut app = tour_app();
    send(&mut app, TourCommand::StartTour);
    app.update();
    let before = state(&app).clone();

    send(&mut app, TourCommand::GoTo(9));
    app.update();

    assert_eq!(state(&app), &before);
    assert_eq!(
        log(&app).rejected[0].error,
        TourError::OutOfRange { index: 9, len: 9 }
    );
    assert!(log(&app).started.is_empty());
}

#[test]
fn test_airplane_parks_flies_and_lands() {
    let mut app = tour_app();
    let first = stop_position(&app, 0);
    assert!(airplane_translation(&mut app).abs_diff_eq(first, 1e-4));

    send(&mut app, TourCommand::StartTour);
    send(&mut app, TourCommand::GoTo(3));
    run(&mut app, 10);
    let mid = airplane_translation(&mut app);
    assert!(!mid.abs_diff_eq(first, 1e-3), "airplane should have left");
    assert!(!mid.abs_diff_eq(stop_position(&app, 3), 1e-3), "not landed yet");

    run(&mut app, LEG_UPDATES);
    let landed = airplane_translation(&mut app);
    assert!(landed.abs_diff_eq(stop_position(&app, 3), 1e-3));

    let mut query = app.world_mut().query::<&Airplane>();
    let airplane = query.single(app.world());
    assert_eq!(airplane.rest(), Some(landed));
}

#[test]
fn test_pause_freezes_airplane_until_resumed() {
    let mut app = tour_app();
    send(&mut app, TourCommand::StartTour);
    send(&mut app, TourCommand::Advance(Direction::Forward));
    run(&mut app, 8);

    send(&mut app, TourCommand::Pause);
    app.update();
    let frozen = airplane_translation(&mut app);
    run(&mut app, 10);
    assert_eq!(airplane_translation(&mut app), frozen);
    assert!(state(&app).is_transitioning());
    assert!(log(&app).completed.is_empty());

    send(&mut app, TourCommand::Play);
    run(&mut app, LEG_UPDATES);
    assert_eq!(log(&app).completed.len(), 1);
    assert!(!state(&app).is_transitioning());
}

#[test]
fn test_go_to_parked_stop_brings_card_back() {
    let mut app = tour_app();
    send(&mut app, TourCommand::StartTour);
    send(&mut app, TourCommand::DismissCard);
    app.update();
    assert!(!state(&app).show_card());

    send(&mut app, TourCommand::GoTo(0));
    run(&mut app, LEG_UPDATES);

    let tour = state(&app);
    assert!(tour.show_card());
    assert!(!tour.is_playing());
    assert!(!tour.is_transitioning());
    assert!(log(&app).started.is_empty());
    assert!(log(&app).rejected.is_empty());

    // The tour is still navigable afterwards.
    send(&mut app, TourCommand::Advance(Direction::Forward));
    run(&mut app, LEG_UPDATES);
    assert_eq!(log(&app).completed.len(), 1);
    assert_eq!(state(&app).previous_index(), Some(1));
}

#[test]
fn test_tour_state_changes_only_on_takeoff_and_landing() {
    let mut app = tour_app();
    send(&mut app, TourCommand::StartTour);
    send(&mut app, TourCommand::Advance(Direction::Forward));
    app.update();
    run(&mut app, 5);

    // Mid-flight frames leave the state untouched.
    let changes = &app.world().resource::<StateChanges>().0;
    let len = changes.len();
    assert!(changes[len - 3..].iter().all(|changed| !changed));

    run(&mut app, LEG_UPDATES);
    assert_eq!(log(&app).completed.len(), 1);
    let changes = &app.world().resource::<StateChanges>().0;
    assert!(changes.iter().rev().take(5).all(|changed| !changed));
    // The landing frame itself is flagged.
    assert!(changes[changes.len() - LEG_UPDATES..].contains(&true));
}
