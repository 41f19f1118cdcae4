//! Textured Earth sphere plus a faint atmosphere shell.
//!
//! The sphere is built from [`tour::geodesy::project`] so that a vertex at
//! `(lat, lon)` carries the equirectangular UV of the same coordinate: markers
//! and the airplane line up with the texture by construction.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use tour::config::{GLOBE_RADIUS, GLOBE_SEGMENTS};
use tour::geodesy::{outward_normal, project};

pub const GLOBE_TEXTURE_PATH: &str = "textures/earth_daymap.jpg";

const ATMOSPHERE_SCALE: f32 = 1.01;
/// #4A90E2 at 10% opacity.
const ATMOSPHERE_COLOR: Color = Color::srgba(0.290, 0.565, 0.886, 0.1);
/// Flat ocean blue shown when the day map cannot be loaded.
const OCEAN_FALLBACK: Color = Color::srgb(0.11, 0.29, 0.52);

#[derive(Component)]
pub struct Globe;

#[derive(Component)]
pub struct Atmosphere;

/// Day-map texture and the material that samples it, until the load settles.
#[derive(Resource)]
pub struct GlobeTexture {
    image: Handle<Image>,
    material: Handle<StandardMaterial>,
    settled: bool,
}

/// UV sphere whose vertex at `(lat, lon)` sits at `project(lat, lon, radius)`
/// with UV `((lon + 180) / 360, (90 - lat) / 180)`.
pub fn globe_mesh(radius: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let stride = segments + 1;
    let vertex_count = (stride * stride) as usize;

    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for row in 0..=segments {
        let v = row as f32 / segments as f32;
        let lat = 90.0 - v * 180.0;
        for col in 0..=segments {
            let u = col as f32 / segments as f32;
            let lon = u * 360.0 - 180.0;
            let point = project(lat, lon, radius);
            positions.push(point.to_array());
            normals.push(outward_normal(point).to_array());
            uvs.push([u, v]);
        }
    }

    // Counter-clockwise seen from outside: longitude grows to the viewer's right.
    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
    for row in 0..segments {
        for col in 0..segments {
            let top = row * stride + col;
            let bottom = top + stride;
            indices.extend_from_slice(&[top, bottom, top + 1, bottom, bottom + 1, top + 1]);
        }
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}

pub fn spawn_globe(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(globe_mesh(GLOBE_RADIUS, GLOBE_SEGMENTS));
    let image: Handle<Image> = asset_server.load(GLOBE_TEXTURE_PATH);
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(image.clone()),
        perceptual_roughness: 0.9,
        ..default()
    });

    commands.spawn((
        Mesh3d(mesh.clone()),
        MeshMaterial3d(material.clone()),
        Transform::default(),
        Globe,
    ));

    // Rendered from the inside so it reads as a rim around the sphere.
    let shell = materials.add(StandardMaterial {
        base_color: ATMOSPHERE_COLOR,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: Some(bevy::render::render_resource::Face::Front),
        ..default()
    });
    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(shell),
        Transform::from_scale(Vec3::splat(ATMOSPHERE_SCALE)),
        Atmosphere,
    ));

    commands.insert_resource(GlobeTexture {
        image,
        material,
        settled: false,
    });
}

/// Swap the globe to a flat ocean colour if the day map failed to load.
pub fn globe_texture_fallback(
    asset_server: Res<AssetServer>,
    mut texture: ResMut<GlobeTexture>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if texture.settled {
        return;
    }
    match asset_server.load_state(&texture.image) {
        LoadState::Loaded => {
            info!("Globe texture {} loaded", GLOBE_TEXTURE_PATH);
            texture.settled = true;
        }
        LoadState::Failed(err) => {
            warn!(
                "Globe texture {} failed to load ({}), using flat colour",
                GLOBE_TEXTURE_PATH, err
            );
            if let Some(material) = materials.get_mut(&texture.material) {
                material.base_color_texture = None;
                material.base_color = OCEAN_FALLBACK;
            }
            texture.settled = true;
        }
        _ => {}
    }
}
