//! Flag markers standing on the globe surface, one per itinerary stop.
//!
//! Each marker is a root entity oriented along the outward normal with the
//! pole, flag cloth and glow as children. Labels are screen-space UI text
//! re-anchored to the marker tip every frame and hidden on the far side of
//! the globe.

use bevy::asset::LoadState;
use bevy::prelude::*;

use tour::config::GLOBE_RADIUS;
use tour::geodesy::surface_rotation;
use tour::itinerary::Itinerary;
use tour::state::TourState;

const POLE_HEIGHT: f32 = 0.3;
const POLE_RADIUS: f32 = 0.005;
const FLAG_SIZE: Vec2 = Vec2::new(0.12, 0.08);
/// Flag cloth centre relative to the pole foot.
const FLAG_OFFSET: Vec3 = Vec3::new(0.06, 0.25, 0.0);
const FLAG_OPACITY: f32 = 0.95;
/// Label anchor relative to the pole foot.
const LABEL_OFFSET: Vec3 = Vec3::new(0.0, 0.35, 0.0);
const LABEL_FONT_SIZE: f32 = 13.0;
const GLOW_RADIUS: f32 = 0.03;
/// #ff9b29 at 60% opacity.
const GLOW_COLOR: Color = Color::srgba(1.0, 0.608, 0.161, 0.6);
const POLE_COLOR: Color = Color::srgb(0.2, 0.2, 0.2);

const PULSE_FREQUENCY: f32 = 4.0;
const PULSE_AMPLITUDE: f32 = 0.1;

/// Root of one location marker.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationMarker {
    pub index: usize,
}

/// Glow sphere at the marker foot, visible only on the active stop.
#[derive(Component, Debug, Clone, Copy)]
pub struct MarkerGlow {
    pub index: usize,
}

/// Screen-space label that follows a marker.
#[derive(Component, Debug, Clone, Copy)]
pub struct MarkerLabel {
    pub index: usize,
}

struct PendingFlag {
    country_code: String,
    image: Handle<Image>,
    material: Handle<StandardMaterial>,
}

/// Flag images still loading; entries leave once they load or fall back.
#[derive(Resource, Default)]
pub struct FlagTextures {
    pending: Vec<PendingFlag>,
}

pub fn flag_path(country_code: &str) -> String {
    format!("flags/{}.png", country_code.to_ascii_lowercase())
}

/// Stable colour for a country whose flag image is missing.
pub fn flag_fallback_color(country_code: &str) -> Color {
    let hash = country_code
        .bytes()
        .map(|b| b.to_ascii_uppercase() as u32)
        .fold(17_u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b));
    Color::hsl((hash % 360) as f32, 0.6, 0.5)
}

/// Scale of the active marker at `elapsed` seconds.
pub fn pulse_scale(elapsed: f32) -> f32 {
    1.0 + (elapsed * PULSE_FREQUENCY).sin() * PULSE_AMPLITUDE
}

/// Whether a surface point is on the camera's side of the globe.
pub fn faces_camera(surface_point: Vec3, camera_position: Vec3) -> bool {
    surface_point.dot(camera_position - surface_point) > 0.0
}

pub fn spawn_markers(
    mut commands: Commands,
    itinerary: Res<Itinerary>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut flags: ResMut<FlagTextures>,
) {
    let pole_mesh = meshes.add(Cylinder::new(POLE_RADIUS, POLE_HEIGHT));
    let pole_material = materials.add(StandardMaterial {
        base_color: POLE_COLOR,
        ..default()
    });
    let flag_mesh = meshes.add(Rectangle::new(FLAG_SIZE.x, FLAG_SIZE.y));
    let glow_mesh = meshes.add(Sphere::new(GLOW_RADIUS));
    let glow_material = materials.add(StandardMaterial {
        base_color: GLOW_COLOR,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    for (index, experience) in itinerary.iter().enumerate() {
        let location = &experience.location;
        let foot = location.coordinates.to_point(GLOBE_RADIUS);

        let image: Handle<Image> = asset_server.load(flag_path(&location.country_code));
        let flag_material = materials.add(StandardMaterial {
            base_color: Color::WHITE.with_alpha(FLAG_OPACITY),
            base_color_texture: Some(image.clone()),
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            ..default()
        });
        flags.pending.push(PendingFlag {
            country_code: location.country_code.clone(),
            image,
            material: flag_material.clone(),
        });

        commands
            .spawn((
                Transform::from_translation(foot).with_rotation(surface_rotation(foot)),
                Visibility::default(),
                LocationMarker { index },
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(pole_mesh.clone()),
                    MeshMaterial3d(pole_material.clone()),
                    Transform::from_xyz(0.0, POLE_HEIGHT / 2.0, 0.0),
                ));
                parent.spawn((
                    Mesh3d(flag_mesh.clone()),
                    MeshMaterial3d(flag_material),
                    Transform::from_translation(FLAG_OFFSET),
                ));
                parent.spawn((
                    Mesh3d(glow_mesh.clone()),
                    MeshMaterial3d(glow_material.clone()),
                    Transform::from_xyz(0.0, 0.01, 0.0),
                    Visibility::Hidden,
                    MarkerGlow { index },
                ));
            });

        commands.spawn((
            Text::new(location.short_label()),
            TextFont {
                font_size: LABEL_FONT_SIZE,
                ..default()
            },
            TextColor(Color::WHITE),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.35)),
            Node {
                position_type: PositionType::Absolute,
                padding: UiRect::axes(Val::Px(4.0), Val::Px(1.0)),
                ..default()
            },
            Visibility::Hidden,
            MarkerLabel { index },
        ));
    }

    info!("Spawned {} location markers", itinerary.len());
}

/// Replace flag textures that failed to load with a flat country colour.
pub fn flag_texture_fallback(
    asset_server: Res<AssetServer>,
    mut flags: ResMut<FlagTextures>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if flags.pending.is_empty() {
        return;
    }
    flags.pending.retain(|flag| match asset_server.load_state(&flag.image) {
        LoadState::Loaded => false,
        LoadState::Failed(err) => {
            warn!(
                "Flag {} failed to load ({}), using fallback colour",
                flag_path(&flag.country_code),
                err
            );
            if let Some(material) = materials.get_mut(&flag.material) {
                material.base_color_texture = None;
                material.base_color =
                    flag_fallback_color(&flag.country_code).with_alpha(FLAG_OPACITY);
            }
            false
        }
        _ => true,
    });
}

/// Pulse the active marker and show its glow; everything else rests at 1.
pub fn pulse_active_marker(
    time: Res<Time>,
    state: Res<TourState>,
    mut markers: Query<(&LocationMarker, &mut Transform)>,
    mut glows: Query<(&MarkerGlow, &mut Visibility)>,
) {
    let active = state.current_index();
    let pulse = pulse_scale(time.elapsed_secs());

    for (marker, mut transform) in &mut markers {
        let scale = if marker.index == active { pulse } else { 1.0 };
        transform.scale = Vec3::splat(scale);
    }

    if !state.is_changed() {
        return;
    }
    for (glow, mut visibility) in &mut glows {
        *visibility = if glow.index == active {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// Pin each label above its marker tip in screen space.
///
/// Reads local transforms (camera and markers are roots) so labels follow
/// this frame's orbit instead of last frame's propagated one.
pub fn update_marker_labels(
    cameras: Query<(&Camera, &Transform), With<Camera3d>>,
    markers: Query<(&LocationMarker, &Transform)>,
    mut labels: Query<(&MarkerLabel, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let camera_global = GlobalTransform::from(*camera_transform);

    for (label, mut node, mut visibility) in &mut labels {
        let Some((_, marker)) = markers.iter().find(|(m, _)| m.index == label.index) else {
            continue;
        };
        let anchor = marker.transform_point(LABEL_OFFSET);

        match camera.world_to_viewport(&camera_global, anchor) {
            Ok(screen) if faces_camera(marker.translation, camera_transform.translation) => {
                node.left = Val::Px(screen.x - 24.0);
                node.top = Val::Px(screen.y - LABEL_FONT_SIZE - 6.0);
                *visibility = Visibility::Inherited;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}
