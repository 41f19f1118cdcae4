use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use tour::events::TourCommand;
use tour::itinerary::Itinerary;
use tour::state::{TourPhase, TourState};

use crate::theme;

pub const START_LABEL: &str = "Start journey";

/// Centred intro card shown until the tour starts.
pub fn welcome_card_ui(
    mut contexts: EguiContexts,
    state: Res<TourState>,
    itinerary: Res<Itinerary>,
    mut commands: EventWriter<TourCommand>,
) {
    if state.phase() != TourPhase::Welcome {
        return;
    }

    let profile = itinerary.profile();

    egui::Window::new("welcome_card")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .default_width(460.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.label(egui::RichText::new(&profile.name).size(30.0).strong());
                ui.label(
                    egui::RichText::new(&profile.role)
                        .size(17.0)
                        .color(theme::ACCENT),
                );
                ui.add_space(10.0);
            });

            for paragraph in &profile.intro {
                ui.label(egui::RichText::new(paragraph).color(theme::TEXT_MUTED));
                ui.add_space(4.0);
            }

            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                let button = egui::Button::new(
                    egui::RichText::new(START_LABEL.to_uppercase())
                        .strong()
                        .color(egui::Color32::BLACK),
                )
                .fill(theme::ACCENT);
                if ui.add_sized(egui::vec2(200.0, 38.0), button).clicked() {
                    commands.send(TourCommand::StartTour);
                }
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("Enter to start")
                        .small()
                        .color(theme::TEXT_MUTED),
                );
            });
        });
}
