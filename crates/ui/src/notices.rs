//! Short-lived notice when a tour command is refused, e.g. pressing N while
//! the airplane is still in the air.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use tour::events::NavigationRejected;

use crate::theme;

/// Seconds a notice stays on screen.
const NOTICE_SECS: f32 = 2.5;

#[derive(Resource, Default)]
pub struct TourNotice {
    pub message: Option<String>,
    pub remaining: f32,
}

/// Keep the latest rejection.
pub fn collect_rejections(
    mut rejected: EventReader<NavigationRejected>,
    mut notice: ResMut<TourNotice>,
) {
    if let Some(last) = rejected.read().last() {
        notice.message = Some(last.error.to_string());
        notice.remaining = NOTICE_SECS;
    }
}

pub fn tour_notice_ui(
    mut contexts: EguiContexts,
    time: Res<Time>,
    mut notice: ResMut<TourNotice>,
) {
    let Some(message) = notice.message.clone() else {
        return;
    };
    notice.remaining -= time.delta_secs();
    if notice.remaining <= 0.0 {
        notice.message = None;
        return;
    }

    let alpha = (notice.remaining / 0.5).clamp(0.0, 1.0);
    egui::Area::new(egui::Id::new("tour_notice"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 24.0))
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(contexts.ctx_mut(), |ui| {
            egui::Frame::new()
                .fill(theme::CARD_FILL.gamma_multiply(alpha))
                .corner_radius(egui::CornerRadius::same(10))
                .inner_margin(egui::Margin::symmetric(12, 6))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(message).color(theme::ACCENT.gamma_multiply(alpha)));
                });
        });
}
