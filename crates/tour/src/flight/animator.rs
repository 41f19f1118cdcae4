use bevy::prelude::*;

use super::arc::ArcPath;
use super::tween::{FlightHandle, FlightTween};
use crate::config::FlightConfig;
use crate::geodesy::{outward_normal, surface_rotation};
use crate::itinerary::Itinerary;
use crate::state::TourState;

/// Result of reconciling the animator with the tour state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPlan {
    /// The active leg (or lack of one) already matches the state.
    Unchanged,
    /// A new leg was created; `replaced` is the leg it cancelled, if any.
    Launched {
        handle: FlightHandle,
        from: usize,
        to: usize,
        replaced: Option<FlightHandle>,
    },
    /// The pending leg disappeared (e.g. navigated back to the anchor before
    /// takeoff) and the tween was dropped.
    Cancelled(FlightHandle),
}

/// One animated frame of the active leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightFrame {
    pub handle: FlightHandle,
    pub from: usize,
    pub to: usize,
    pub pose: Transform,
    pub started: bool,
    pub landed: bool,
}

/// Owns at most one [`FlightTween`].
///
/// Starting a leg always drops the previous tween first, so a cancelled leg
/// produces no further poses and never reports a landing.
#[derive(Resource, Debug, Default)]
pub struct FlightAnimator {
    active: Option<FlightTween>,
    next_handle: u64,
}

impl FlightAnimator {
    pub fn active(&self) -> Option<&FlightTween> {
        self.active.as_ref()
    }

    pub fn is_flying(&self) -> bool {
        self.active.is_some()
    }

    /// Replace any active leg with a new one.
    pub fn launch(
        &mut self,
        from: usize,
        to: usize,
        arc: ArcPath,
        duration: f32,
        paused: bool,
    ) -> FlightHandle {
        self.cancel();
        let handle = FlightHandle(self.next_handle);
        self.next_handle += 1;
        self.active = Some(FlightTween::new(handle, from, to, arc, duration, paused));
        handle
    }

    /// Drop the active leg without completing it.
    pub fn cancel(&mut self) -> Option<FlightHandle> {
        self.active.take().map(|tween| tween.handle())
    }

    /// Make the active leg match `state.pending_leg()`.
    ///
    /// A new target cancels the leg in the air and restarts from the last
    /// committed stop rather than from the airplane's current position.
    pub fn plan(
        &mut self,
        state: &TourState,
        itinerary: &Itinerary,
        config: &FlightConfig,
    ) -> FlightPlan {
        let Some((from, to)) = state.pending_leg() else {
            return match self.cancel() {
                Some(handle) => FlightPlan::Cancelled(handle),
                None => FlightPlan::Unchanged,
            };
        };

        if let Some(active) = &self.active {
            if active.from() == from && active.to() == to {
                return FlightPlan::Unchanged;
            }
        }

        let (Some(start), Some(end)) = (itinerary.coordinates(from), itinerary.coordinates(to))
        else {
            return FlightPlan::Unchanged;
        };

        let replaced = self.active.as_ref().map(FlightTween::handle);
        let arc = ArcPath::between(start, end, config);
        let handle = self.launch(from, to, arc, config.duration_secs, !state.is_playing());
        FlightPlan::Launched {
            handle,
            from,
            to,
            replaced,
        }
    }

    /// Tick the active leg by `dt` seconds and report lifecycle changes to
    /// `state`.
    ///
    /// Playback follows `state.is_playing()`: a paused tour freezes the leg
    /// where it is. Returns `None` when nothing moved.
    pub fn step(
        &mut self,
        dt: f32,
        state: &mut TourState,
        config: &FlightConfig,
    ) -> Option<FlightFrame> {
        let tween = self.active.as_mut()?;
        tween.set_paused(!state.is_playing());
        let step = tween.tick(dt)?;

        if step.started {
            state.on_transition_start();
        }

        let frame = FlightFrame {
            handle: tween.handle(),
            from: tween.from(),
            to: tween.to(),
            pose: pose_at(tween.arc(), step.t, config),
            started: step.started,
            landed: step.landed,
        };

        if frame.landed {
            self.active = None;
            state.on_transition_complete();
        }
        Some(frame)
    }
}

/// Airplane transform at curve parameter `t`.
///
/// Faces a look-ahead point slightly further along the curve with the local
/// surface normal as up, then rolls by the bank angle. At the very end the
/// look-ahead collapses onto the current point and the curve tangent is used.
pub fn pose_at(arc: &ArcPath, t: f32, config: &FlightConfig) -> Transform {
    let position = arc.point(t);
    let ahead = arc.point((t + config.lookahead).min(1.0));

    let mut heading = ahead - position;
    if heading.length_squared() <= f32::EPSILON {
        heading = arc.tangent(t);
    }

    let mut transform =
        Transform::from_translation(position).looking_to(heading, outward_normal(position));
    transform.rotate_local_z(config.bank_angle);
    transform
}

/// Where the airplane sits between legs: the last committed stop (or the
/// current stop before the tour starts) at cruise altitude.
pub fn rest_pose(state: &TourState, itinerary: &Itinerary, config: &FlightConfig) -> Option<Transform> {
    let index = state.previous_index().unwrap_or(state.current_index());
    let position = itinerary.coordinates(index)?.to_point(config.flight_radius());
    Some(Transform::from_translation(position).with_rotation(surface_rotation(position)))
}
