use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use tour::TourSet;

pub mod experience_card;
pub mod flight_controls;
pub mod keybinds;
pub mod notices;
pub mod theme;
pub mod welcome_card;

/// Tour overlays. They only read `TourState` / `Itinerary` and speak to the
/// core through `TourCommand` events.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<notices::TourNotice>()
            .add_systems(Startup, theme::apply_tour_theme)
            .add_systems(
                Update,
                (
                    welcome_card::welcome_card_ui,
                    experience_card::experience_card_ui,
                    flight_controls::flight_controls_ui,
                    keybinds::tour_keybinds,
                )
                    .in_set(TourSet::Input),
            )
            .add_systems(
                Update,
                (notices::collect_rejections, notices::tour_notice_ui)
                    .chain()
                    .in_set(TourSet::Effects),
            );
    }
}
