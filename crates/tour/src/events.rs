use bevy::prelude::*;

use crate::error::TourError;
use crate::flight::FlightHandle;

/// Direction of a single-step navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Next index in this direction, wrapping at both ends.
    pub fn step(self, index: usize, len: usize) -> usize {
        match self {
            Direction::Forward => (index + 1) % len,
            Direction::Backward => (index + len - 1) % len,
        }
    }
}

/// Request from the UI or keyboard to change the tour.
///
/// Applied in order by `apply_tour_commands`; nothing else mutates
/// `TourState`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourCommand {
    StartTour,
    Play,
    Pause,
    TogglePlayback,
    Advance(Direction),
    GoTo(usize),
    DismissCard,
}

/// A command that was refused; state is unchanged.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationRejected {
    pub command: TourCommand,
    pub error: TourError,
}

/// The airplane left `from` for `to`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionStarted {
    pub handle: FlightHandle,
    pub from: usize,
    pub to: usize,
}

/// The airplane landed at `index`. Never sent for a cancelled leg.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionCompleted {
    pub handle: FlightHandle,
    pub index: usize,
}
