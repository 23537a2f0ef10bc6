use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

/// Color schemes the dashboard ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    /// Rust-red dust on a dark background
    #[default]
    Mars,
    /// Blue-black with a cool accent
    Night,
}

impl ThemePreset {
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Mars => "Mars",
            ThemePreset::Night => "Night",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Mars => Theme::mars(),
            ThemePreset::Night => Theme::night(),
        }
    }
}

/// Palette used to paint the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub bg_dark: Color32,
    pub bg_medium: Color32,
    pub bg_light: Color32,

    pub text_primary: Color32,
    pub text_muted: Color32,

    /// Header band and active tab
    pub accent: Color32,
    pub accent_hover: Color32,

    pub error: Color32,
    pub border: Color32,
}

impl Theme {
    pub fn mars() -> Self {
        Self {
            bg_dark: Color32::from_rgb(28, 20, 18),
            bg_medium: Color32::from_rgb(44, 30, 26),
            bg_light: Color32::from_rgb(66, 44, 36),

            text_primary: Color32::from_rgb(250, 240, 232),
            text_muted: Color32::from_rgb(170, 150, 140),

            accent: Color32::from_rgb(193, 68, 14),
            accent_hover: Color32::from_rgb(226, 104, 52),

            error: Color32::from_rgb(239, 68, 68),
            border: Color32::from_rgb(90, 60, 50),
        }
    }

    pub fn night() -> Self {
        Self {
            bg_dark: Color32::from_rgb(15, 23, 42),
            bg_medium: Color32::from_rgb(22, 33, 54),
            bg_light: Color32::from_rgb(35, 48, 70),

            text_primary: Color32::from_rgb(248, 250, 252),
            text_muted: Color32::from_rgb(130, 145, 160),

            accent: Color32::from_rgb(59, 130, 246),
            accent_hover: Color32::from_rgb(96, 165, 250),

            error: Color32::from_rgb(251, 113, 133),
            border: Color32::from_rgb(51, 65, 85),
        }
    }

    /// Install the palette into egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.window_fill = self.bg_dark;
        visuals.panel_fill = self.bg_dark;
        visuals.faint_bg_color = self.bg_medium;
        visuals.extreme_bg_color = self.bg_medium;

        let widgets = &mut visuals.widgets;
        for (state, fill) in [
            (&mut widgets.noninteractive, self.bg_medium),
            (&mut widgets.inactive, self.bg_medium),
            (&mut widgets.hovered, self.bg_light),
            (&mut widgets.active, self.accent),
            (&mut widgets.open, self.bg_light),
        ] {
            state.bg_fill = fill;
            state.weak_bg_fill = fill;
            state.bg_stroke = Stroke::new(1.0, self.border);
            state.fg_stroke = Stroke::new(1.0, self.text_primary);
        }
        widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent_hover);

        visuals.selection.bg_fill = self.accent.gamma_multiply(0.4);
        visuals.selection.stroke = Stroke::new(1.0, self.accent_hover);
        visuals.hyperlink_color = self.accent_hover;
        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_parse_from_config_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            theme: ThemePreset,
        }

        let parsed: Wrapper = toml::from_str("theme = \"night\"").unwrap();
        assert_eq!(parsed.theme, ThemePreset::Night);
        assert_eq!(ThemePreset::default(), ThemePreset::Mars);
    }

    #[test]
    fn test_presets_are_distinct() {
        assert_ne!(ThemePreset::Mars.theme(), ThemePreset::Night.theme());
        assert_eq!(ThemePreset::Night.name(), "Night");
    }
}
