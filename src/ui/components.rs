//! Shared widgets

use eframe::egui::{self, Color32, CornerRadius, RichText, Vec2};

use super::theme::Theme;
use crate::view::Fact;

/// Render a rover tab button, returning true when clicked
pub fn tab_button(ui: &mut egui::Ui, theme: &Theme, label: &str, active: bool) -> bool {
    let (bg, text_color) = if active {
        (theme.accent, theme.text_primary)
    } else {
        (Color32::TRANSPARENT, theme.text_muted)
    };

    let button = egui::Button::new(RichText::new(label).color(text_color).strong())
        .fill(bg)
        .corner_radius(CornerRadius { nw: 6, ne: 6, sw: 0, se: 0 })
        .min_size(Vec2::new(110.0, 32.0));

    ui.add(button).clicked()
}

/// Bordered panel with an accent title
pub fn section_frame<R>(
    ui: &mut egui::Ui,
    theme: &Theme,
    title: &str,
    content: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::new()
        .fill(theme.bg_medium)
        .corner_radius(8.0)
        .inner_margin(16.0)
        .stroke(egui::Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).color(theme.accent_hover).size(16.0).strong());
            ui.add_space(10.0);
            content(ui)
        })
        .inner
}

/// "Label: value" on one line
pub fn fact_row(ui: &mut egui::Ui, theme: &Theme, fact: &Fact) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{}:", fact.label)).color(theme.text_muted));
        ui.label(RichText::new(&fact.value).color(theme.text_primary));
    });
}

/// Full-width banner for errors
pub fn error_banner(ui: &mut egui::Ui, theme: &Theme, message: &str) {
    egui::Frame::new()
        .fill(theme.error.gamma_multiply(0.15))
        .corner_radius(6.0)
        .inner_margin(12.0)
        .stroke(egui::Stroke::new(1.0, theme.error))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(message).color(theme.error));
        });
}

/// Centered message with an optional spinner
pub fn notice(ui: &mut egui::Ui, theme: &Theme, message: &str, spinner: bool) {
    ui.add_space(40.0);
    ui.vertical_centered(|ui| {
        if spinner {
            ui.spinner();
            ui.add_space(8.0);
        }
        ui.label(RichText::new(message).color(theme.text_muted).size(15.0));
    });
}
