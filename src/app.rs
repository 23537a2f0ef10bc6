use eframe::egui;

use crate::config::Config;
use crate::state::{Dashboard, FetchEvent};
use crate::ui::{self, ViewAction, theme::Theme};

/// Main application window
pub struct DashboardApp {
    dashboard: Dashboard,
    theme: Theme,
    /// Status message for the status bar
    status_message: String,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &Config, mut dashboard: Dashboard) -> Self {
        let theme = config.client.theme.theme();
        theme.apply(&cc.egui_ctx);
        tracing::debug!("Using {} theme", config.client.theme.name());

        dashboard.start();
        let status_message = format!(
            "Connecting to {} ({} API)",
            config.client.proxy_url,
            config.variant.name()
        );

        Self {
            dashboard,
            theme,
            status_message,
        }
    }

    fn handle_events(&mut self, events: Vec<FetchEvent>) {
        for event in events {
            self.status_message = match event {
                FetchEvent::Loaded { rover } => format!("Loaded {}", rover),
                FetchEvent::Failed { rover, message } => format!("{}: {}", rover, message),
            };
        }
    }

    fn handle_action(&mut self, action: ViewAction) {
        match action {
            ViewAction::SelectRover(rover) => match self.dashboard.select_rover(&rover) {
                Ok(()) => self.status_message = format!("Fetching {}...", rover),
                Err(e) => {
                    tracing::warn!("{}", e);
                    self.status_message = e.to_string();
                }
            },
            ViewAction::OpenLink(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::error!("Failed to open {}: {}", url, e);
                    self.status_message = format!("Failed to open link: {}", e);
                }
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let events = self.dashboard.poll();
        self.handle_events(events);
        if self.dashboard.has_pending() {
            // Keep polling until every fetch has landed
            ctx.request_repaint();
        }

        let view = self.dashboard.store().view().clone();
        let theme = &self.theme;

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(theme.bg_medium).inner_margin(12.0))
            .show(ctx, |ui| ui::render_header(ui, theme, &view.header));

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.status_message).color(theme.text_muted));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("renders: {}", self.dashboard.store().renders()))
                            .color(theme.text_muted)
                            .size(11.0),
                    );
                });
            });
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| ui::render_footer(ui, theme, &view.footer));

        let action = egui::CentralPanel::default()
            .show(ctx, |ui| ui::render_body(ui, theme, &view))
            .inner;

        if let Some(action) = action {
            self.handle_action(action);
        }
    }
}
