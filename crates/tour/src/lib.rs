use bevy::prelude::*;

pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod flight;
pub mod geodesy;
pub mod itinerary;
pub mod state;

#[cfg(test)]
mod integration_tests;

use config::FlightConfig;
use events::{NavigationRejected, TourCommand, TransitionCompleted, TransitionStarted};
use flight::FlightAnimator;
use itinerary::Itinerary;
use state::TourState;

/// Per-frame ordering of the tour systems inside `Update`.
///
/// UI and input systems that emit `TourCommand`s go in `Input`; cosmetic
/// effects that touch the airplane go in `Effects`, after the animator wrote
/// the pose for this frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TourSet {
    Input,
    Apply,
    Plan,
    Animate,
    Effects,
}

/// Run condition: no leg is in the air.
pub fn tour_is_idle(state: Res<TourState>) -> bool {
    !state.is_transitioning()
}

/// Core tour plugin: state machine, flight planning and animation.
///
/// The itinerary is passed in explicitly; `FlightConfig` is inserted with
/// defaults unless the app provided one before adding the plugin.
pub struct TourPlugin {
    itinerary: Itinerary,
}

impl TourPlugin {
    pub fn new(itinerary: Itinerary) -> Self {
        Self { itinerary }
    }
}

impl Plugin for TourPlugin {
    fn build(&self, app: &mut App) {
        info!("Tour loaded with {} stops", self.itinerary.len());

        app.insert_resource(TourState::for_itinerary(&self.itinerary))
            .insert_resource(self.itinerary.clone())
            .init_resource::<FlightConfig>()
            .init_resource::<FlightAnimator>()
            .add_event::<TourCommand>()
            .add_event::<NavigationRejected>()
            .add_event::<TransitionStarted>()
            .add_event::<TransitionCompleted>()
            .configure_sets(
                Update,
                (
                    TourSet::Input,
                    TourSet::Apply,
                    TourSet::Plan,
                    TourSet::Animate,
                    TourSet::Effects,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    commands::apply_tour_commands.in_set(TourSet::Apply),
                    flight::plan_flight.in_set(TourSet::Plan),
                    (flight::place_airplane, flight::advance_flight)
                        .chain()
                        .in_set(TourSet::Animate),
                ),
            );
    }
}
