use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use rendering::camera::{CameraConfig, OrbitCamera};
use tour::config::{DATASET_ENV_VAR, GLOBE_RADIUS};
use tour::error::DatasetError;
use tour::events::TourCommand;
use tour::itinerary::Itinerary;
use tour::TourPlugin;

/// Set to any value to capture one screenshot per stop and exit.
const SCREENSHOTS_ENV_VAR: &str = "GLOBE_TOUR_SCREENSHOTS";

fn main() {
    let itinerary = match load_itinerary() {
        Ok(itinerary) => itinerary,
        Err(e) => {
            eprintln!("globe-tour: cannot load itinerary: {e}");
            std::process::exit(1);
        }
    };

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Globe Tour".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::Continuous,
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    });

    // Screenshot mode: face every stop in turn, capture, then exit
    if std::env::var(SCREENSHOTS_ENV_VAR).is_ok() {
        let presets = itinerary
            .iter()
            .enumerate()
            .map(|(index, exp)| ShotPreset {
                name: format!("{:02}_{}", index + 1, exp.id),
                focus: exp.location.coordinates.to_point(GLOBE_RADIUS),
            })
            .collect();
        app.insert_resource(ScreenshotQueue {
            frame: 0,
            current: 0,
            presets,
        });
        app.add_systems(Update, drive_screenshots);
    }

    app.add_plugins((
        TourPlugin::new(itinerary),
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    app.run();
}

/// Bundled dataset, or the JSON file named by `GLOBE_TOUR_DATASET`.
fn load_itinerary() -> Result<Itinerary, DatasetError> {
    match std::env::var(DATASET_ENV_VAR) {
        Ok(path) if !path.is_empty() => Itinerary::from_path(path),
        _ => Itinerary::bundled(),
    }
}

#[derive(Resource)]
struct ScreenshotQueue {
    frame: u32,
    current: usize,
    presets: Vec<ShotPreset>,
}

struct ShotPreset {
    name: String,
    focus: Vec3,
}

/// Frames to wait for textures and the glTF before the first shot.
const WARMUP_FRAMES: u32 = 120;
const FRAMES_PER_SHOT: u32 = 12;

fn drive_screenshots(
    mut commands: Commands,
    mut queue: ResMut<ScreenshotQueue>,
    config: Res<CameraConfig>,
    mut orbit: ResMut<OrbitCamera>,
    mut tour: EventWriter<TourCommand>,
    mut exit: EventWriter<AppExit>,
) {
    queue.frame += 1;

    if queue.frame == WARMUP_FRAMES / 2 {
        tour.send(TourCommand::StartTour);
    }
    if queue.frame < WARMUP_FRAMES {
        return;
    }

    let idx = queue.current;
    if idx >= queue.presets.len() {
        // Give the last capture a few frames to hit the disk
        if queue.frame > WARMUP_FRAMES + queue.presets.len() as u32 * FRAMES_PER_SHOT + 20 {
            info!("Screenshots done");
            exit.send(AppExit::Success);
        }
        return;
    }

    let phase = (queue.frame - WARMUP_FRAMES) % FRAMES_PER_SHOT;

    if phase == 0 {
        let focus = queue.presets[idx].focus;
        orbit.face(focus, &config);
    } else if phase == FRAMES_PER_SHOT / 2 {
        let path = format!("/tmp/globe_tour_{}.png", queue.presets[idx].name);
        info!("Capturing {}", path);
        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(path));
        queue.current += 1;
    }
}
