use bevy::prelude::*;

use super::*;
use crate::config::FlightConfig;
use crate::events::Direction;
use crate::geodesy::{outward_normal, GeoCoord};
use crate::itinerary::Itinerary;
use crate::state::TourState;

const EPS: f32 = 1e-4;

fn bundled() -> Itinerary {
    Itinerary::bundled().expect("bundled dataset")
}

fn started_state(itinerary: &Itinerary) -> TourState {
    let mut state = TourState::for_itinerary(itinerary);
    state.start_tour().unwrap();
    state
}

/// Tick until the active leg lands, collecting every frame.
fn fly_to_completion(
    animator: &mut FlightAnimator,
    state: &mut TourState,
    config: &FlightConfig,
) -> Vec<FlightFrame> {
    let mut frames = Vec::new();
    for _ in 0..10_000 {
        if let Some(frame) = animator.step(1.0 / 60.0, state, config) {
            let landed = frame.landed;
            frames.push(frame);
            if landed {
                break;
            }
        }
    }
    frames
}

// -----------------------------------------------------------------------------
// Arc construction
// -----------------------------------------------------------------------------

#[test]
fn test_arc_endpoints_at_cruise_altitude() {
    let config = FlightConfig::default();
    let arc = ArcPath::between(
        GeoCoord::new(64.1466, -21.9426),
        GeoCoord::new(53.4084, -2.9916),
        &config,
    );
    assert!((arc.start.length() - config.flight_radius()).abs() < EPS);
    assert!((arc.end.length() - config.flight_radius()).abs() < EPS);
    assert!(arc.point(0.0).abs_diff_eq(arc.start, EPS));
    assert!(arc.point(1.0).abs_diff_eq(arc.end, EPS));
}

#[test]
fn test_control_point_above_cruise_for_distinct_stops() {
    let config = FlightConfig::default();
    let itinerary = bundled();
    for a in 0..itinerary.len() {
        for b in 0..itinerary.len() {
            if a == b {
                continue;
            }
            let arc = ArcPath::between(
                itinerary.coordinates(a).unwrap(),
                itinerary.coordinates(b).unwrap(),
                &config,
            );
            let control = arc.control.length();
            assert!(
                control > config.flight_radius(),
                "{a}->{b}: control {control} not above cruise {}",
                config.flight_radius()
            );
            assert!((control - config.apex_radius()).abs() < EPS);
        }
    }
}

#[test]
fn test_antipodal_stops_still_bow_outward() {
    let config = FlightConfig::default();
    let arc = ArcPath::between(GeoCoord::new(0.0, 0.0), GeoCoord::new(0.0, 180.0), &config);
    assert!(arc.control.is_finite());
    assert!((arc.control.length() - config.apex_radius()).abs() < EPS);
    assert!(arc.control.dot(arc.start).abs() < 1e-3, "control should be perpendicular");
}

#[test]
fn test_short_leg_midpoint_climbs_above_endpoints() {
    // Stockholm -> Oslo. Long legs can sag below cruise altitude since the
    // chord cuts through the globe; only the control point is guaranteed.
    let config = FlightConfig::default();
    let arc = ArcPath::between(GeoCoord::new(59.33, 18.07), GeoCoord::new(59.91, 10.75), &config);
    assert!(arc.point(0.5).length() > config.flight_radius());
}

#[test]
fn test_sample_covers_both_ends() {
    let arc = ArcPath::new(Vec3::X, Vec3::Y * 2.0, Vec3::Z);
    let points = arc.sample(16);
    assert_eq!(points.len(), 17);
    assert!(points[0].abs_diff_eq(Vec3::X, EPS));
    assert!(points[16].abs_diff_eq(Vec3::Z, EPS));
    assert_eq!(arc.sample(0).len(), 2);
}

// -----------------------------------------------------------------------------
// Easing and tween
// -----------------------------------------------------------------------------

#[test]
fn test_ease_in_out_profile() {
    assert_eq!(ease_in_out(0.0), 0.0);
    assert_eq!(ease_in_out(1.0), 1.0);
    assert!((ease_in_out(0.5) - 0.5).abs() < EPS);
    // Slow at both ends, fastest in the middle.
    let start_speed = ease_in_out(0.1) - ease_in_out(0.0);
    let mid_speed = ease_in_out(0.55) - ease_in_out(0.45);
    let end_speed = ease_in_out(1.0) - ease_in_out(0.9);
    assert!(start_speed < mid_speed);
    assert!(end_speed < mid_speed);
    // Monotonic.
    let mut last = 0.0;
    for i in 1..=100 {
        let v = ease_in_out(i as f32 / 100.0);
        assert!(v >= last);
        last = v;
    }
}

#[test]
fn test_tween_reports_start_once_and_lands() {
    let arc = ArcPath::new(Vec3::X, Vec3::Y, Vec3::Z);
    let mut tween = FlightTween::new(FlightHandle(0), 0, 1, arc, 1.0, false);

    let first = tween.tick(0.25).unwrap();
    assert!(first.started);
    assert!(!first.landed);

    let second = tween.tick(0.25).unwrap();
    assert!(!second.started);
    assert!((second.t - 0.5).abs() < EPS);

    let last = tween.tick(10.0).unwrap();
    assert!(last.landed);
    assert_eq!(last.t, 1.0);
    assert!(tween.tick(0.1).is_none(), "finished tween must not move");
}

#[test]
fn test_paused_tween_keeps_playhead() {
    let arc = ArcPath::new(Vec3::X, Vec3::Y, Vec3::Z);
    let mut tween = FlightTween::new(FlightHandle(0), 0, 1, arc, 2.0, false);
    tween.tick(0.5).unwrap();
    let before = tween.progress();

    tween.set_paused(true);
    assert!(tween.tick(1.0).is_none());
    assert_eq!(tween.progress(), before);

    tween.set_paused(false);
    let step = tween.tick(0.5).unwrap();
    assert!(!step.started);
    assert!((tween.progress() - 0.5).abs() < EPS);
}

#[test]
fn test_zero_dt_does_not_start() {
    let arc = ArcPath::new(Vec3::X, Vec3::Y, Vec3::Z);
    let mut tween = FlightTween::new(FlightHandle(0), 0, 1, arc, 1.0, false);
    assert!(tween.tick(0.0).is_none());
    assert!(!tween.has_started());
}

// -----------------------------------------------------------------------------
// Orientation
// -----------------------------------------------------------------------------

#[test]
fn test_pose_faces_lookahead_point() {
    let config = FlightConfig::default();
    let arc = ArcPath::between(GeoCoord::new(64.1, -21.9), GeoCoord::new(40.4, -3.7), &config);
    for t in [0.0_f32, 0.2, 0.5, 0.8, 0.95] {
        let pose = pose_at(&arc, t, &config);
        let expected = (arc.point((t + config.lookahead).min(1.0)) - arc.point(t)).normalize();
        let forward = *pose.forward();
        assert!(
            forward.dot(expected) > 0.999,
            "t={t}: forward {forward:?} vs {expected:?}"
        );
        assert!(pose.translation.abs_diff_eq(arc.point(t), EPS));
    }
}

#[test]
fn test_pose_applies_bank_angle() {
    let config = FlightConfig::default();
    let arc = ArcPath::between(GeoCoord::new(59.3, 18.0), GeoCoord::new(59.9, 10.7), &config);
    let t = 0.4;
    let pose = pose_at(&arc, t, &config);

    let position = arc.point(t);
    let heading = arc.point(t + config.lookahead) - position;
    let level = Transform::from_translation(position).looking_to(heading, outward_normal(position));

    let roll = pose.up().angle_between(*level.up());
    assert!(
        (roll - config.bank_angle).abs() < 1e-3,
        "roll {roll} vs bank {}",
        config.bank_angle
    );
}

#[test]
fn test_pose_at_end_uses_tangent() {
    let config = FlightConfig::default();
    let arc = ArcPath::between(GeoCoord::new(10.0, 10.0), GeoCoord::new(20.0, 40.0), &config);
    let pose = pose_at(&arc, 1.0, &config);
    let tangent = arc.tangent(1.0).normalize();
    assert!(pose.forward().dot(tangent) > 0.999);
}

// -----------------------------------------------------------------------------
// Animator
// -----------------------------------------------------------------------------

#[test]
fn test_plan_launches_pending_leg_once() {
    let itinerary = bundled();
    let config = FlightConfig::default();
    let mut state = started_state(&itinerary);
    let mut animator = FlightAnimator::default();

    assert_eq!(animator.plan(&state, &itinerary, &config), FlightPlan::Unchanged);

    state.advance(Direction::Forward).unwrap();
    let plan = animator.plan(&state, &itinerary, &config);
    assert!(matches!(
        plan,
        FlightPlan::Launched { from: 0, to: 1, replaced: None, .. }
    ));
    assert_eq!(animator.plan(&state, &itinerary, &config), FlightPlan::Unchanged);
}

#[test]
fn test_full_leg_lifecycle() {
    let itinerary = bundled();
    let config = FlightConfig::default();
    let mut state = started_state(&itinerary);
    let mut animator = FlightAnimator::default();

    state.advance(Direction::Forward).unwrap();
    animator.plan(&state, &itinerary, &config);

    let frames = fly_to_completion(&mut animator, &mut state, &config);
    assert!(frames.first().unwrap().started);
    assert_eq!(frames.iter().filter(|f| f.started).count(), 1);
    assert_eq!(frames.iter().filter(|f| f.landed).count(), 1);
    assert!(frames.last().unwrap().landed);

    let total: f32 = frames.len() as f32 / 60.0;
    assert!((total - config.duration_secs).abs() < 0.05, "flew {total}s");

    assert!(!state.is_transitioning());
    assert!(state.show_card());
    assert!(!state.is_playing());
    assert_eq!(state.previous_index(), Some(1));
    assert!(!animator.is_flying());

    let end = itinerary.coordinates(1).unwrap().to_point(config.flight_radius());
    assert!(frames.last().unwrap().pose.translation.abs_diff_eq(end, 1e-3));
}

#[test]
fn test_transitioning_only_while_leg_in_air() {
    let itinerary = bundled();
    let config = FlightConfig::default();
    let mut state = started_state(&itinerary);
    let mut animator = FlightAnimator::default();

    state.advance(Direction::Forward).unwrap();
    animator.plan(&state, &itinerary, &config);
    assert!(!state.is_transitioning(), "not before the first tick");

    loop {
        let frame = animator.step(0.1, &mut state, &config).unwrap();
        if frame.landed {
            assert!(!state.is_transitioning());
            break;
        }
        assert!(state.is_transitioning());
    }
}

#[test]
fn test_retarget_before_takeoff_cancels_first_leg() {
    let itinerary = bundled();
    let config = FlightConfig::default();
    let mut state = started_state(&itinerary);
    let mut animator = FlightAnimator::default();

    state.advance(Direction::Forward).unwrap();
    let FlightPlan::Launched { handle: first, .. } = animator.plan(&state, &itinerary, &config)
    else {
        panic!("first leg should launch");
    };

    state.advance(Direction::Forward).unwrap();
    let plan = animator.plan(&state, &itinerary, &config);
    let FlightPlan::Launched {
        handle: second,
        from,
        to,
        replaced,
    } = plan
    else {
        panic!("second leg should launch, got {plan:?}");
    };
    assert_eq!(replaced, Some(first));
    assert_eq!((from, to), (0, 2), "restarts from the committed stop");

    let frames = fly_to_completion(&mut animator, &mut state, &config);
    let landings: Vec<_> = frames.iter().filter(|f| f.landed).collect();
    assert_eq!(landings.len(), 1);
    assert_eq!(landings[0].handle, second);
    assert_eq!(landings[0].to, 2);
    assert!(frames.iter().all(|f| f.handle != first));
    assert_eq!(state.previous_index(), Some(2));
}

#[test]
fn test_pause_freezes_mid_air() {
    let itinerary = bundled();
    let config = FlightConfig::default();
    let mut state = started_state(&itinerary);
    let mut animator = FlightAnimator::default();

    state.advance(Direction::Forward).unwrap();
    animator.plan(&state, &itinerary, &config);
    animator.step(1.0, &mut state, &config).unwrap();
    let progress = animator.active().unwrap().progress();

    state.pause();
    assert!(animator.step(1.0, &mut state, &config).is_none());
    assert_eq!(animator.active().unwrap().progress(), progress);
    assert!(state.is_transitioning(), "a paused leg is still in the air");
    // Pausing does not re-plan the leg.
    assert_eq!(animator.plan(&state, &itinerary, &config), FlightPlan::Unchanged);

    state.play();
    let frame = animator.step(0.5, &mut state, &config).unwrap();
    assert!(!frame.started);
    assert!(animator.active().unwrap().progress() > progress);
}

#[test]
fn test_leg_disappearing_cancels_tween() {
    let itinerary = bundled();
    let config = FlightConfig::default();
    let mut state = started_state(&itinerary);
    let mut animator = FlightAnimator::default();

    state.advance(Direction::Forward).unwrap();
    animator.plan(&state, &itinerary, &config);
    state.go_to(0).unwrap();

    assert!(matches!(
        animator.plan(&state, &itinerary, &config),
        FlightPlan::Cancelled(FlightHandle(0))
    ));
    assert!(!animator.is_flying());
    // Back at the anchor: the card returns and playback stops.
    assert!(state.show_card());
    assert!(!state.is_playing());
}

#[test]
fn test_rest_pose_before_and_after_start() {
    let itinerary = bundled();
    let config = FlightConfig::default();
    let mut state = TourState::for_itinerary(&itinerary);

    let pose = rest_pose(&state, &itinerary, &config).unwrap();
    let first = itinerary.coordinates(0).unwrap().to_point(config.flight_radius());
    assert!(pose.translation.abs_diff_eq(first, EPS));
    assert!((pose.up().dot(outward_normal(first)) - 1.0).abs() < EPS);

    state.start_tour().unwrap();
    state.advance(Direction::Forward).unwrap();
    // Until the leg lands the airplane is parked at the committed stop.
    let pose = rest_pose(&state, &itinerary, &config).unwrap();
    assert!(pose.translation.abs_diff_eq(first, EPS));
}
