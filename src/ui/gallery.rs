//! Gallery grid

use eframe::egui::{self, RichText};

use super::components::fact_row;
use super::theme::Theme;
use crate::view::{Gallery, GalleryItem};

const CARD_WIDTH: f32 = 260.0;

/// Paint a gallery, returning an image link the user clicked
pub fn render_gallery(ui: &mut egui::Ui, theme: &Theme, gallery: &Gallery) -> Option<String> {
    let (heading, items) = match gallery {
        Gallery::Empty(message) => {
            ui.label(RichText::new(message).color(theme.text_muted).italics());
            return None;
        }
        Gallery::Items { heading, items } => (heading, items),
    };

    ui.label(RichText::new(heading).color(theme.accent_hover).size(16.0).strong());
    ui.add_space(8.0);

    let columns = ((ui.available_width() / (CARD_WIDTH + 12.0)) as usize).max(1);
    let mut clicked = None;

    egui::Grid::new("gallery_grid")
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for (i, item) in items.iter().enumerate() {
                if let Some(url) = render_card(ui, theme, item) {
                    clicked = Some(url);
                }
                if (i + 1) % columns == 0 {
                    ui.end_row();
                }
            }
        });

    clicked
}

fn render_card(ui: &mut egui::Ui, theme: &Theme, item: &GalleryItem) -> Option<String> {
    let mut clicked = None;

    egui::Frame::new()
        .fill(theme.bg_light)
        .corner_radius(6.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);

            match &item.image_url {
                Some(url) => {
                    if ui.link(&item.alt).on_hover_text(url).clicked() {
                        clicked = Some(url.clone());
                    }
                }
                None => {
                    ui.label(RichText::new(&item.alt).color(theme.text_muted));
                }
            }

            if let Some(title) = &item.title {
                ui.label(RichText::new(title).color(theme.text_primary).strong());
            }
            if let Some(description) = &item.description {
                ui.label(RichText::new(description).color(theme.text_muted).size(12.0));
            }
            for fact in &item.facts {
                fact_row(ui, theme, fact);
            }
        });

    clicked
}
