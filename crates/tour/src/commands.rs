use bevy::prelude::*;

use crate::events::{NavigationRejected, TourCommand};
use crate::state::TourState;

/// Apply queued UI commands to the tour state, in arrival order.
///
/// Rejected commands leave the state untouched and are re-emitted as
/// [`NavigationRejected`] so the UI can surface them.
pub fn apply_tour_commands(
    mut commands: EventReader<TourCommand>,
    mut state: ResMut<TourState>,
    mut rejected: EventWriter<NavigationRejected>,
) {
    for &command in commands.read() {
        match state.apply(command) {
            Ok(()) => debug!("Tour command {:?} applied", command),
            Err(error) => {
                warn!("Tour command {:?} rejected: {}", command, error);
                rejected.send(NavigationRejected { command, error });
            }
        }
    }
}
