use bevy::prelude::*;

use tour::{tour_is_idle, TourSet};

pub mod airplane;
pub mod camera;
pub mod flight_path;
pub mod globe;
pub mod markers;

use camera::{CameraConfig, CameraOrbitDrag};
use markers::FlagTextures;

/// Ambient fill; the globe should read clearly from every side.
const AMBIENT_BRIGHTNESS: f32 = 750.0;
const DIRECTIONAL_ILLUMINANCE: f32 = 2500.0;

/// Globe, markers, airplane visuals, orbit camera and lighting.
///
/// Expects `tour::TourPlugin` to be added first: startup systems read the
/// `Itinerary` resource it inserts.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraConfig>()
            .init_resource::<CameraOrbitDrag>()
            .init_resource::<FlagTextures>()
            .insert_resource(ClearColor(Color::srgb(0.02, 0.03, 0.07)))
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    setup_lighting,
                    globe::spawn_globe,
                    markers::spawn_markers,
                    airplane::spawn_airplane,
                ),
            )
            .add_systems(
                Update,
                (
                    camera::camera_rotate_keyboard,
                    camera::camera_zoom_keyboard,
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::apply_orbit_camera,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    globe::globe_texture_fallback,
                    markers::flag_texture_fallback,
                    airplane::airplane_model_fallback,
                ),
            )
            .add_systems(
                Update,
                (
                    markers::pulse_active_marker,
                    markers::update_marker_labels
                        .after(markers::pulse_active_marker)
                        .after(camera::apply_orbit_camera),
                    airplane::bob_airplane.run_if(tour_is_idle),
                    flight_path::draw_flight_path,
                )
                    .in_set(TourSet::Effects),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
    });

    // Key light in front, fill light from the opposite side so the night
    // hemisphere is never black.
    for position in [Vec3::new(5.0, 3.0, 5.0), Vec3::new(-5.0, -3.0, -5.0)] {
        commands.spawn((
            DirectionalLight {
                illuminance: DIRECTIONAL_ILLUMINANCE,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }
}
