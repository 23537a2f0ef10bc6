//! egui rendering of the dashboard view tree
//!
//! Everything here paints a [`View`] and reports what the user clicked. No
//! state is read or written directly; the app routes actions to the dashboard.

mod components;
mod gallery;
pub mod theme;

use eframe::egui::{self, RichText};

use crate::view::{Content, Header, RoverInfo, View};
use components::{error_banner, fact_row, notice, section_frame, tab_button};
use theme::Theme;

/// Something the user asked for while the view was painted
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    SelectRover(String),
    OpenLink(String),
}

/// Paint the header band
pub fn render_header(ui: &mut egui::Ui, theme: &Theme, header: &Header) {
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(&header.title).color(theme.accent_hover).size(24.0).strong());
            if let Some(subtitle) = &header.subtitle {
                ui.label(RichText::new(subtitle).color(theme.text_muted));
            }
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(&header.greeting).color(theme.text_primary));
        });
    });
    ui.add_space(8.0);
}

/// Paint the footer line
pub fn render_footer(ui: &mut egui::Ui, theme: &Theme, footer: &str) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(footer).color(theme.text_muted).size(11.0));
    });
}

/// Paint tabs and content, returning the first action the user took
pub fn render_body(ui: &mut egui::Ui, theme: &Theme, view: &View) -> Option<ViewAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        for tab in &view.tabs {
            if tab_button(ui, theme, &tab.rover, tab.active) {
                action = Some(ViewAction::SelectRover(tab.rover.clone()));
            }
        }
    });
    ui.separator();

    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        let clicked = render_content(ui, theme, &view.content);
        if action.is_none() {
            action = clicked;
        }
    });

    action
}

fn render_content(ui: &mut egui::Ui, theme: &Theme, content: &Content) -> Option<ViewAction> {
    match content {
        Content::Loading(message) => {
            notice(ui, theme, message, true);
            None
        }
        Content::Placeholder(message) => {
            notice(ui, theme, message, false);
            None
        }
        Content::Error(message) => {
            error_banner(ui, theme, message);
            None
        }
        Content::Rover { info, gallery } => {
            render_info(ui, theme, info);
            ui.add_space(12.0);
            gallery::render_gallery(ui, theme, gallery).map(ViewAction::OpenLink)
        }
    }
}

fn render_info(ui: &mut egui::Ui, theme: &Theme, info: &RoverInfo) {
    section_frame(ui, theme, &info.heading, |ui| {
        if let Some(description) = &info.description {
            ui.label(RichText::new(description).color(theme.text_primary));
            ui.add_space(8.0);
        }
        for fact in &info.facts {
            fact_row(ui, theme, fact);
        }
    });
}
