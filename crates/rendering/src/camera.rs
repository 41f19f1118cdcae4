use std::f32::consts::FRAC_PI_2;

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// Hovering a card, or a drag that started on one, belongs to egui.
fn pointer_on_cards(ctx: &egui::Context) -> bool {
    ctx.is_pointer_over_area() || ctx.wants_pointer_input()
}

/// Key-repeat rate used to turn a held arrow key into a rotation speed.
const KEY_REPEAT_HZ: f32 = 30.0;

/// Tunables for the globe orbit camera.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub start_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Keeps the polar angle away from the poles, where `looking_at` with a
    /// Y up vector degenerates.
    pub polar_margin: f32,
    /// Radians per arrow-key step.
    pub rotate_step: f32,
    /// Distance per `+`/`-` step.
    pub zoom_step: f32,
    pub wheel_zoom_speed: f32,
    /// Radians per dragged pixel.
    pub drag_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            start_distance: 9.0,
            min_distance: 5.0,
            max_distance: 50.0,
            polar_margin: 0.1,
            rotate_step: 0.05,
            zoom_step: 0.5,
            wheel_zoom_speed: 1.5,
            drag_sensitivity: 0.005,
        }
    }
}

/// Spherical camera position around the globe centre.
///
/// `polar` is measured from +Y; `azimuth` 0 puts the camera on +Z.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            azimuth: 0.0,
            polar: FRAC_PI_2,
            distance: config.start_distance,
        }
    }

    pub fn position(&self) -> Vec3 {
        let ring = self.distance * self.polar.sin();
        Vec3::new(
            ring * self.azimuth.sin(),
            self.distance * self.polar.cos(),
            ring * self.azimuth.cos(),
        )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(Vec3::ZERO, Vec3::Y)
    }

    pub fn rotate(&mut self, azimuth: f32, polar: f32, config: &CameraConfig) {
        self.azimuth += azimuth;
        self.polar = (self.polar + polar).clamp(
            config.polar_margin,
            std::f32::consts::PI - config.polar_margin,
        );
    }

    /// Swing around so `point` sits in the middle of the view.
    pub fn face(&mut self, point: Vec3, config: &CameraConfig) {
        let Some(dir) = point.try_normalize() else {
            return;
        };
        self.azimuth = dir.x.atan2(dir.z);
        self.polar = dir.y.clamp(-1.0, 1.0).acos().clamp(
            config.polar_margin,
            std::f32::consts::PI - config.polar_margin,
        );
    }

    pub fn zoom_by(&mut self, delta: f32, config: &CameraConfig) {
        self.distance = (self.distance + delta).clamp(config.min_distance, config.max_distance);
    }

    pub fn zoom_scale(&mut self, factor: f32, config: &CameraConfig) {
        self.distance = (self.distance * factor).clamp(config.min_distance, config.max_distance);
    }
}

#[derive(Resource, Default)]
pub struct CameraOrbitDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

pub fn setup_camera(mut commands: Commands, config: Res<CameraConfig>) {
    let orbit = OrbitCamera::new(&config);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov_degrees.to_radians(),
            ..default()
        }),
        orbit.transform(),
    ));
    commands.insert_resource(orbit);
}

/// System: apply OrbitCamera state to the camera Transform.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = orbit.transform();
}

/// Arrow keys: left/right spin around the globe, up/down tilt toward the poles.
pub fn camera_rotate_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<CameraConfig>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::ArrowLeft) {
        dir.x += 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if dir == Vec2::ZERO {
        return;
    }

    let step = config.rotate_step * KEY_REPEAT_HZ * time.delta_secs();
    orbit.rotate(dir.x * step, dir.y * step, &config);
}

/// `+`/`=` zoom in, `-` zoom out, one step per press.
pub fn camera_zoom_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<CameraConfig>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if keys.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        orbit.zoom_by(-config.zoom_step, &config);
    }
    if keys.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        orbit.zoom_by(config.zoom_step, &config);
    }
}

/// Left- or right-mouse drag: orbit (horizontal = azimuth, vertical = polar).
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    config: Res<CameraConfig>,
    mut contexts: EguiContexts,
    mut drag: ResMut<CameraOrbitDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.any_just_pressed([MouseButton::Left, MouseButton::Right])
        && !pointer_on_cards(contexts.ctx_mut())
    {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }

    if !buttons.any_pressed([MouseButton::Left, MouseButton::Right]) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - drag.last_pos;
            if delta != Vec2::ZERO {
                orbit.rotate(
                    -delta.x * config.drag_sensitivity,
                    -delta.y * config.drag_sensitivity,
                    &config,
                );
            }
            drag.last_pos = pos;
        }
    }
}

/// Scroll wheel: zoom toward or away from the globe.
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    config: Res<CameraConfig>,
    mut contexts: EguiContexts,
    mut orbit: ResMut<OrbitCamera>,
) {
    if pointer_on_cards(contexts.ctx_mut()) {
        scroll_evts.clear();
        return;
    }
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        orbit.zoom_scale(wheel_zoom_factor(dy, config.wheel_zoom_speed), &config);
    }
}

/// Distance multiplier for one wheel step; scrolling up (`dy > 0`) zooms in.
pub fn wheel_zoom_factor(dy: f32, speed: f32) -> f32 {
    0.95_f32.powf(speed * dy)
}
