//! Tour state machine.
//!
//! [`TourState`] owns the navigation indices and the UI flags. Phases:
//!
//! - `Welcome`: before `start_tour`; the welcome overlay is up and the
//!   airplane has not been anchored (`previous_index` is `None`).
//! - `Idle`: no leg in the air. The card may or may not be showing.
//! - `Transitioning`: a leg is flying; navigation is rejected.
//!
//! There are no timers here. The flight animator reports start and landing
//! through [`TourState::on_transition_start`] and
//! [`TourState::on_transition_complete`].

use bevy::prelude::*;

use crate::error::TourError;
use crate::events::{Direction, TourCommand};
use crate::itinerary::Itinerary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TourPhase {
    Welcome,
    Idle,
    Transitioning,
}

/// Read-only copy of the state for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourSnapshot {
    pub current_index: usize,
    pub previous_index: Option<usize>,
    pub location_count: usize,
    pub is_playing: bool,
    pub is_transitioning: bool,
    pub show_card: bool,
    pub has_started: bool,
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct TourState {
    current_index: usize,
    previous_index: Option<usize>,
    location_count: usize,
    is_playing: bool,
    is_transitioning: bool,
    show_card: bool,
    has_started: bool,
}

impl TourState {
    /// Fresh state at the first stop. `location_count` must be non-zero.
    pub fn new(location_count: usize) -> Self {
        debug_assert!(location_count > 0, "a tour needs at least one stop");
        Self {
            current_index: 0,
            previous_index: None,
            location_count: location_count.max(1),
            is_playing: false,
            is_transitioning: false,
            show_card: false,
            has_started: false,
        }
    }

    pub fn for_itinerary(itinerary: &Itinerary) -> Self {
        Self::new(itinerary.len())
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn previous_index(&self) -> Option<usize> {
        self.previous_index
    }

    pub fn location_count(&self) -> usize {
        self.location_count
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn show_card(&self) -> bool {
        self.show_card
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.location_count
    }

    pub fn phase(&self) -> TourPhase {
        if !self.has_started {
            TourPhase::Welcome
        } else if self.is_transitioning {
            TourPhase::Transitioning
        } else {
            TourPhase::Idle
        }
    }

    pub fn snapshot(&self) -> TourSnapshot {
        TourSnapshot {
            current_index: self.current_index,
            previous_index: self.previous_index,
            location_count: self.location_count,
            is_playing: self.is_playing,
            is_transitioning: self.is_transitioning,
            show_card: self.show_card,
            has_started: self.has_started,
        }
    }

    /// The leg the airplane still has to fly, as `(from, to)`.
    ///
    /// `from` is always the last committed stop, never a mid-air position.
    pub fn pending_leg(&self) -> Option<(usize, usize)> {
        match self.previous_index {
            Some(from) if self.has_started && from != self.current_index => {
                Some((from, self.current_index))
            }
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Leave the welcome overlay and anchor the airplane at the current stop.
    pub fn start_tour(&mut self) -> Result<(), TourError> {
        if self.has_started {
            return Err(TourError::AlreadyStarted);
        }
        self.has_started = true;
        self.show_card = true;
        self.previous_index = Some(self.current_index);
        Ok(())
    }

    /// Returns `false` if already playing.
    pub fn play(&mut self) -> bool {
        let changed = !self.is_playing;
        self.is_playing = true;
        changed
    }

    /// Returns `false` if already paused.
    pub fn pause(&mut self) -> bool {
        let changed = self.is_playing;
        self.is_playing = false;
        changed
    }

    pub fn toggle_playback(&mut self) {
        self.is_playing = !self.is_playing;
    }

    /// Step one stop forward or backward, wrapping at both ends.
    pub fn advance(&mut self, direction: Direction) -> Result<usize, TourError> {
        self.check_navigable()?;
        let next = direction.step(self.current_index, self.location_count);
        self.navigate_to(next);
        Ok(next)
    }

    /// Jump to an explicit stop.
    pub fn go_to(&mut self, index: usize) -> Result<usize, TourError> {
        if index >= self.location_count {
            return Err(TourError::OutOfRange {
                index,
                len: self.location_count,
            });
        }
        self.check_navigable()?;
        self.navigate_to(index);
        Ok(index)
    }

    pub fn dismiss_card(&mut self) {
        self.show_card = false;
    }

    /// Apply a UI command. On error the state is untouched.
    pub fn apply(&mut self, command: TourCommand) -> Result<(), TourError> {
        match command {
            TourCommand::StartTour => self.start_tour(),
            TourCommand::Play => {
                self.play();
                Ok(())
            }
            TourCommand::Pause => {
                self.pause();
                Ok(())
            }
            TourCommand::TogglePlayback => {
                self.toggle_playback();
                Ok(())
            }
            TourCommand::Advance(direction) => self.advance(direction).map(|_| ()),
            TourCommand::GoTo(index) => self.go_to(index).map(|_| ()),
            TourCommand::DismissCard => {
                self.dismiss_card();
                Ok(())
            }
        }
    }

    /// Called by the flight animator on the first frame a leg moves.
    pub(crate) fn on_transition_start(&mut self) {
        self.is_transitioning = true;
    }

    /// Called by the flight animator when a leg lands. Playback is one-shot:
    /// landing always pauses and shows the destination card.
    pub(crate) fn on_transition_complete(&mut self) {
        self.is_transitioning = false;
        self.show_card = true;
        self.previous_index = Some(self.current_index);
        self.is_playing = false;
    }

    fn check_navigable(&self) -> Result<(), TourError> {
        if self.is_transitioning {
            return Err(TourError::TransitionInFlight);
        }
        if !self.has_started {
            return Err(TourError::NotStarted);
        }
        Ok(())
    }

    fn navigate_to(&mut self, index: usize) {
        self.current_index = index;
        if self.previous_index == Some(index) {
            // Already parked here: there is no leg to fly, so settle at once.
            self.show_card = true;
            self.is_playing = false;
            return;
        }
        self.show_card = false;
        // A fresh navigation always (re)starts playback so the leg runs.
        self.is_playing = true;
    }
}
