use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use tour::events::{Direction, TourCommand};
use tour::itinerary::Itinerary;
use tour::state::TourState;

use crate::theme;

const CARD_WIDTH: f32 = 380.0;

/// Primary action label: the last stop wraps back to the first.
pub fn continue_label(is_last: bool) -> &'static str {
    if is_last {
        "Restart"
    } else {
        "Continue"
    }
}

/// CV card for the stop the airplane is parked at.
pub fn experience_card_ui(
    mut contexts: EguiContexts,
    state: Res<TourState>,
    itinerary: Res<Itinerary>,
    mut commands: EventWriter<TourCommand>,
) {
    if !state.show_card() {
        return;
    }
    let Some(exp) = itinerary.get(state.current_index()) else {
        return;
    };

    egui::Window::new("experience_card")
        .id(egui::Id::new(("experience_card", state.current_index())))
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::RIGHT_CENTER, egui::vec2(-24.0, -20.0))
        .default_width(CARD_WIDTH)
        .max_height(560.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&exp.job_title).size(21.0).strong());
                    ui.label(
                        egui::RichText::new(&exp.company)
                            .size(16.0)
                            .color(theme::ACCENT),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    if ui
                        .add(egui::Button::new("×").frame(false))
                        .on_hover_text("Close")
                        .clicked()
                    {
                        commands.send(TourCommand::DismissCard);
                    }
                });
            });
            ui.label(egui::RichText::new(&exp.location.name).color(theme::TEXT_MUTED));
            ui.label(
                egui::RichText::new(exp.period.display())
                    .small()
                    .color(theme::TEXT_MUTED),
            );
            ui.separator();

            egui::ScrollArea::vertical()
                .max_height(380.0)
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        for tech in &exp.technologies {
                            tech_badge(ui, tech);
                        }
                    });
                    ui.add_space(8.0);

                    if !exp.description.is_empty() {
                        ui.label(&exp.description);
                        ui.add_space(8.0);
                    }

                    if !exp.responsibilities.is_empty() {
                        ui.label(egui::RichText::new("Key Responsibilities").strong());
                        for item in &exp.responsibilities {
                            ui.horizontal_wrapped(|ui| {
                                ui.label(egui::RichText::new("•").color(theme::ACCENT));
                                ui.label(item);
                            });
                        }
                    }
                });

            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                let label = continue_label(state.is_last());
                let button = egui::Button::new(
                    egui::RichText::new(label)
                        .strong()
                        .color(egui::Color32::BLACK),
                )
                .fill(theme::ACCENT);
                if ui.add_sized(egui::vec2(160.0, 32.0), button).clicked() {
                    commands.send(TourCommand::Advance(Direction::Forward));
                }
            });
        });
}

fn tech_badge(ui: &mut egui::Ui, tech: &str) {
    egui::Frame::new()
        .fill(theme::BADGE_FILL)
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(tech).small());
        });
}
