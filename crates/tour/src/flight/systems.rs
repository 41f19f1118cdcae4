use bevy::prelude::*;

use super::animator::{rest_pose, FlightAnimator, FlightPlan};
use crate::config::FlightConfig;
use crate::events::{TransitionCompleted, TransitionStarted};
use crate::itinerary::Itinerary;
use crate::state::TourState;

/// Transform handle of the airplane.
///
/// Rendering spawns the visuals as children of an entity carrying this
/// component; the flight systems are the only writers of its `Transform`
/// while a leg is in the air.
#[derive(Component, Debug, Default)]
pub struct Airplane {
    rest: Option<Vec3>,
}

impl Airplane {
    /// Parked position between legs, `None` while a leg is in the air or
    /// before the airplane has been placed.
    pub fn rest(&self) -> Option<Vec3> {
        self.rest
    }
}

/// Reconcile the active leg with the tour state.
pub fn plan_flight(
    state: Res<TourState>,
    itinerary: Res<Itinerary>,
    config: Res<FlightConfig>,
    mut animator: ResMut<FlightAnimator>,
) {
    match animator.plan(&state, &itinerary, &config) {
        FlightPlan::Unchanged => {}
        FlightPlan::Launched {
            handle,
            from,
            to,
            replaced,
        } => {
            if let Some(old) = replaced {
                debug!("Flight {:?} cancelled before landing", old);
            }
            info!("Flight {:?} planned: stop {} -> stop {}", handle, from, to);
        }
        FlightPlan::Cancelled(handle) => {
            debug!("Flight {:?} cancelled: no pending leg", handle);
        }
    }
}

/// Park a freshly spawned airplane at its rest pose.
pub fn place_airplane(
    state: Res<TourState>,
    itinerary: Res<Itinerary>,
    config: Res<FlightConfig>,
    animator: Res<FlightAnimator>,
    mut airplanes: Query<(&mut Transform, &mut Airplane)>,
) {
    if animator.is_flying() {
        return;
    }
    for (mut transform, mut airplane) in &mut airplanes {
        if airplane.rest.is_some() {
            continue;
        }
        let Some(pose) = rest_pose(&state, &itinerary, &config) else {
            continue;
        };
        transform.translation = pose.translation;
        transform.rotation = pose.rotation;
        airplane.rest = Some(pose.translation);
    }
}

/// Tick the active leg and write the airplane pose.
pub fn advance_flight(
    time: Res<Time>,
    config: Res<FlightConfig>,
    mut state: ResMut<TourState>,
    mut animator: ResMut<FlightAnimator>,
    mut airplanes: Query<(&mut Transform, &mut Airplane)>,
    mut started: EventWriter<TransitionStarted>,
    mut completed: EventWriter<TransitionCompleted>,
) {
    // Only takeoff and landing touch the tour state; plain frames must not
    // flag it as changed.
    let Some(frame) = animator.step(
        time.delta_secs(),
        state.bypass_change_detection(),
        &config,
    ) else {
        return;
    };
    if frame.started || frame.landed {
        state.set_changed();
    }

    for (mut transform, mut airplane) in &mut airplanes {
        transform.translation = frame.pose.translation;
        transform.rotation = frame.pose.rotation;
        airplane.rest = frame.landed.then_some(frame.pose.translation);
    }

    if frame.started {
        info!("Flight {:?} took off from stop {}", frame.handle, frame.from);
        started.send(TransitionStarted {
            handle: frame.handle,
            from: frame.from,
            to: frame.to,
        });
    }
    if frame.landed {
        info!("Flight {:?} landed at stop {}", frame.handle, frame.to);
        completed.send(TransitionCompleted {
            handle: frame.handle,
            index: frame.to,
        });
    }
}
