mod animator;
mod arc;
mod systems;
mod tween;

#[cfg(test)]
mod tests;

pub use animator::{pose_at, rest_pose, FlightAnimator, FlightFrame, FlightPlan};
pub use arc::ArcPath;
pub use systems::{advance_flight, place_airplane, plan_flight, Airplane};
pub use tween::{ease_in_out, FlightHandle, FlightTween, TweenStep};
