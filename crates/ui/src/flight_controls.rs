//! Bottom bar: current stop, position counter, transport buttons and one dot
//! per stop. Every control is disabled while a leg is in the air.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use tour::events::{Direction, TourCommand};
use tour::itinerary::Itinerary;
use tour::state::TourState;

use crate::theme;

const DOT_SIZE: f32 = 12.0;

/// `1 / 9` style counter (one-based).
pub fn counter_text(index: usize, count: usize) -> String {
    format!("{} / {}", index + 1, count)
}

pub fn playback_label(is_playing: bool) -> &'static str {
    if is_playing {
        "⏸ Pause"
    } else {
        "▶ Play"
    }
}

pub fn flight_controls_ui(
    mut contexts: EguiContexts,
    state: Res<TourState>,
    itinerary: Res<Itinerary>,
    mut commands: EventWriter<TourCommand>,
) {
    if !state.has_started() {
        return;
    }

    let snapshot = state.snapshot();
    let enabled = !snapshot.is_transitioning;
    let current_name = itinerary
        .get(snapshot.current_index)
        .map(|exp| exp.location.name.as_str())
        .unwrap_or_default();

    egui::Area::new(egui::Id::new("flight_controls"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -18.0))
        .order(egui::Order::Foreground)
        .show(contexts.ctx_mut(), |ui| {
            egui::Frame::new()
                .fill(theme::CARD_FILL)
                .corner_radius(egui::CornerRadius::same(16))
                .inner_margin(egui::Margin::symmetric(16, 10))
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(current_name).strong());
                            ui.label(
                                egui::RichText::new(counter_text(
                                    snapshot.current_index,
                                    snapshot.location_count,
                                ))
                                .color(theme::TEXT_MUTED),
                            );
                        });

                        ui.add_space(4.0);
                        ui.horizontal(|ui| {
                            if ui
                                .add_enabled(enabled, egui::Button::new("⏮"))
                                .on_hover_text("Previous location (B)")
                                .clicked()
                            {
                                commands.send(TourCommand::Advance(Direction::Backward));
                            }

                            let play = egui::Button::new(
                                egui::RichText::new(playback_label(snapshot.is_playing))
                                    .color(egui::Color32::BLACK),
                            )
                            .fill(theme::ACCENT);
                            if ui
                                .add_enabled(enabled, play)
                                .on_hover_text("Play / pause (Space)")
                                .clicked()
                            {
                                commands.send(TourCommand::TogglePlayback);
                            }

                            if ui
                                .add_enabled(enabled, egui::Button::new("⏭"))
                                .on_hover_text("Next location (N)")
                                .clicked()
                            {
                                commands.send(TourCommand::Advance(Direction::Forward));
                            }
                        });

                        ui.add_space(6.0);
                        ui.horizontal(|ui| {
                            for (index, exp) in itinerary.iter().enumerate() {
                                let fill = if index == snapshot.current_index {
                                    theme::ACCENT
                                } else {
                                    theme::BADGE_FILL
                                };
                                let dot = egui::Button::new("")
                                    .min_size(egui::vec2(DOT_SIZE, DOT_SIZE))
                                    .corner_radius(egui::CornerRadius::same(6))
                                    .fill(fill);
                                if ui
                                    .add_enabled(enabled, dot)
                                    .on_hover_text(&exp.location.name)
                                    .clicked()
                                {
                                    commands.send(TourCommand::GoTo(index));
                                }
                            }
                        });
                    });
                });
        });
}
