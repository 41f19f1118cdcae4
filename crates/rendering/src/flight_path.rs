use bevy::prelude::*;

use tour::flight::FlightAnimator;

const PATH_SEGMENTS: usize = 48;

/// Draw the active leg as a faint trail, brighter behind the airplane.
///
/// Only the portion already flown is highlighted; the rest of the arc is
/// drawn dim so the destination reads at a glance.
pub fn draw_flight_path(animator: Res<FlightAnimator>, mut gizmos: Gizmos) {
    let Some(tween) = animator.active() else {
        return;
    };
    if !tween.has_started() {
        return;
    }

    let ahead = Color::srgba(1.0, 0.61, 0.16, 0.25);
    let behind = Color::srgba(1.0, 0.61, 0.16, 0.8);

    let points = tween.arc().sample(PATH_SEGMENTS);
    let flown = tween.eased();
    for (i, pair) in points.windows(2).enumerate() {
        let t = (i + 1) as f32 / PATH_SEGMENTS as f32;
        let color = if t <= flown { behind } else { ahead };
        gizmos.line(pair[0], pair[1], color);
    }
}
