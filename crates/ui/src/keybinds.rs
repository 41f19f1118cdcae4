use bevy::prelude::*;
use bevy_egui::EguiContexts;

use tour::events::{Direction, TourCommand};
use tour::state::{TourPhase, TourState};

/// Keys the tour listens to. Arrow keys and `+`/`-` belong to the camera.
const SHORTCUT_KEYS: [KeyCode; 5] = [
    KeyCode::Space,
    KeyCode::KeyN,
    KeyCode::KeyB,
    KeyCode::Enter,
    KeyCode::Escape,
];

/// Command for a freshly pressed key in the given phase, if any.
pub fn shortcut(key: KeyCode, phase: TourPhase, show_card: bool) -> Option<TourCommand> {
    match (key, phase) {
        (KeyCode::Enter, TourPhase::Welcome) => Some(TourCommand::StartTour),
        (_, TourPhase::Welcome) => None,
        (KeyCode::Space, _) => Some(TourCommand::TogglePlayback),
        (KeyCode::KeyN, _) => Some(TourCommand::Advance(Direction::Forward)),
        (KeyCode::KeyB, _) => Some(TourCommand::Advance(Direction::Backward)),
        (KeyCode::Escape, _) if show_card => Some(TourCommand::DismissCard),
        _ => None,
    }
}

/// Space toggles playback, N / B step through the stops, Enter starts the
/// tour, Esc closes the card.
pub fn tour_keybinds(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<TourState>,
    mut contexts: EguiContexts,
    mut commands: EventWriter<TourCommand>,
) {
    if contexts.ctx_mut().wants_keyboard_input() {
        return;
    }

    for key in SHORTCUT_KEYS {
        if !keys.just_pressed(key) {
            continue;
        }
        if let Some(command) = shortcut(key, state.phase(), state.show_card()) {
            commands.send(command);
        }
    }
}
