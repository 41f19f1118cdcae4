use bevy_egui::{egui, EguiContexts};

/// Deep violet backdrop shared by every card.
pub const CARD_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(17, 13, 33, 235);
/// Warm orange used for highlights, the active dot and primary buttons.
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(255, 155, 41);
pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(175, 170, 195);
pub const BADGE_FILL: egui::Color32 = egui::Color32::from_rgb(52, 42, 82);

pub fn apply_tour_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgb(24, 19, 44);
    let inactive = egui::Color32::from_rgb(45, 37, 72);
    let hover = egui::Color32::from_rgb(70, 58, 110);

    style.visuals.widgets.noninteractive.bg_fill = panel;
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = ACCENT;

    style.visuals.window_fill = CARD_FILL;
    style.visuals.panel_fill = panel;
    style.visuals.window_stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(70, 58, 110));

    style.visuals.selection.bg_fill = ACCENT;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);

    let window_rounding = egui::CornerRadius::same(14);
    let widget_rounding = egui::CornerRadius::same(8);

    style.visuals.window_corner_radius = window_rounding;
    style.visuals.widgets.noninteractive.corner_radius = widget_rounding;
    style.visuals.widgets.inactive.corner_radius = widget_rounding;
    style.visuals.widgets.hovered.corner_radius = widget_rounding;
    style.visuals.widgets.active.corner_radius = widget_rounding;

    style.spacing.button_padding = egui::vec2(10.0, 6.0);

    ctx.set_style(style);
}
