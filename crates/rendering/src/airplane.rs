//! Airplane visuals and the idle bobbing effect.
//!
//! The parent entity carries `tour::flight::Airplane`, whose `Transform` the
//! flight systems own. Visuals hang beneath it: the glTF scene, plus a
//! primitive stand-in that is revealed if the model fails to load.

use std::f32::consts::PI;

use bevy::asset::LoadState;
use bevy::gltf::{Gltf, GltfAssetLabel};
use bevy::prelude::*;

use tour::flight::Airplane;
use tour::geodesy::outward_normal;

pub const AIRPLANE_MODEL_PATH: &str = "models/airplane.glb";

const MODEL_SCALE: f32 = 0.5;
const BOB_FREQUENCY: f32 = 2.0;
const BOB_AMPLITUDE: f32 = 0.02;

const FUSELAGE_COLOR: Color = Color::srgb(0.95, 0.95, 0.97);
const WING_COLOR: Color = Color::srgb(0.85, 0.25, 0.2);

/// Stand-in shown when the glTF model is unavailable.
#[derive(Component)]
pub struct AirplaneFallback;

#[derive(Resource)]
pub struct AirplaneModel {
    gltf: Handle<Gltf>,
    settled: bool,
}

/// Offset along the outward normal while parked, at `elapsed` seconds.
pub fn bob_offset(elapsed: f32) -> f32 {
    (elapsed * BOB_FREQUENCY).sin() * BOB_AMPLITUDE
}

pub fn spawn_airplane(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let gltf: Handle<Gltf> = asset_server.load(AIRPLANE_MODEL_PATH);
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(AIRPLANE_MODEL_PATH));

    let fuselage = meshes.add(Capsule3d::new(0.025, 0.12));
    let wings = meshes.add(Cuboid::new(0.2, 0.006, 0.04));
    let tail = meshes.add(Cuboid::new(0.006, 0.05, 0.03));
    let body = materials.add(StandardMaterial {
        base_color: FUSELAGE_COLOR,
        perceptual_roughness: 0.5,
        ..default()
    });
    let trim = materials.add(StandardMaterial {
        base_color: WING_COLOR,
        ..default()
    });

    commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            Airplane::default(),
        ))
        .with_children(|parent| {
            // Model nose points along +Z; the flight pose faces -Z.
            parent.spawn((
                SceneRoot(scene),
                Transform::from_scale(Vec3::splat(MODEL_SCALE))
                    .with_rotation(Quat::from_rotation_y(PI)),
            ));

            parent
                .spawn((
                    Transform::default(),
                    Visibility::Hidden,
                    AirplaneFallback,
                ))
                .with_children(|plane| {
                    // Capsule axis is Y; lay it along the flight direction.
                    plane.spawn((
                        Mesh3d(fuselage),
                        MeshMaterial3d(body.clone()),
                        Transform::from_rotation(Quat::from_rotation_x(PI / 2.0)),
                    ));
                    plane.spawn((
                        Mesh3d(wings),
                        MeshMaterial3d(trim.clone()),
                        Transform::from_xyz(0.0, 0.0, -0.01),
                    ));
                    plane.spawn((
                        Mesh3d(tail),
                        MeshMaterial3d(trim),
                        Transform::from_xyz(0.0, 0.03, 0.07),
                    ));
                });
        });

    commands.insert_resource(AirplaneModel {
        gltf,
        settled: false,
    });
}

/// Reveal the primitive airplane if the glTF model failed to load.
pub fn airplane_model_fallback(
    asset_server: Res<AssetServer>,
    mut model: ResMut<AirplaneModel>,
    mut fallbacks: Query<&mut Visibility, With<AirplaneFallback>>,
) {
    if model.settled {
        return;
    }
    match asset_server.load_state(&model.gltf) {
        LoadState::Loaded => {
            info!("Airplane model {} loaded", AIRPLANE_MODEL_PATH);
            model.settled = true;
        }
        LoadState::Failed(err) => {
            warn!(
                "Airplane model {} failed to load ({}), using primitive stand-in",
                AIRPLANE_MODEL_PATH, err
            );
            for mut visibility in &mut fallbacks {
                *visibility = Visibility::Inherited;
            }
            model.settled = true;
        }
        _ => {}
    }
}

/// Bob the parked airplane along the outward normal around its rest point.
///
/// Gated with `tour_is_idle` so it never competes with the flight systems.
pub fn bob_airplane(time: Res<Time>, mut airplanes: Query<(&Airplane, &mut Transform)>) {
    let offset = bob_offset(time.elapsed_secs());
    for (airplane, mut transform) in &mut airplanes {
        let Some(rest) = airplane.rest() else {
            continue;
        };
        transform.translation = rest + outward_normal(rest) * offset;
    }
}
