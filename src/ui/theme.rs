//! Overlay styling and colors.

use eframe::egui;

/// Opacity of the overlay background.
pub const OVERLAY_OPACITY: f32 = 0.9;

/// Overlay theme colors.
pub struct Theme {
    /// Background color
    pub background: egui::Color32,

    /// Overlay background, already faded to [`OVERLAY_OPACITY`]
    pub overlay_fill: egui::Color32,

    /// Context menu surface
    pub menu: egui::Color32,

    /// Hovered menu row
    pub menu_active: egui::Color32,

    /// Popup buttons
    pub button: egui::Color32,

    /// Text primary color
    pub text_primary: egui::Color32,

    /// Label font size in points
    pub label_size: f32,

    /// Padding around the label
    pub label_padding: egui::Vec2,
}

impl Theme {
    pub fn dark() -> Self {
        let background = egui::Color32::from_rgb(0x1a, 0x1a, 0x1a);
        Self {
            background,
            overlay_fill: background.gamma_multiply(OVERLAY_OPACITY),
            menu: egui::Color32::from_rgb(0x2a, 0x2a, 0x2a),
            menu_active: egui::Color32::from_rgb(0x44, 0x44, 0x44),
            button: egui::Color32::from_rgb(0x33, 0x33, 0x33),
            text_primary: egui::Color32::WHITE,
            label_size: 14.0,
            label_padding: egui::vec2(15.0, 8.0),
        }
    }

    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        style.visuals = egui::Visuals::dark();
        style.visuals.panel_fill = self.background;
        style.visuals.window_fill = self.menu;

        style.visuals.widgets.inactive.weak_bg_fill = self.menu;
        style.visuals.widgets.hovered.weak_bg_fill = self.menu_active;
        style.visuals.widgets.active.weak_bg_fill = self.menu_active;

        style.visuals.widgets.noninteractive.fg_stroke.color = self.text_primary;
        style.visuals.widgets.inactive.fg_stroke.color = self.text_primary;
        style.visuals.widgets.hovered.fg_stroke.color = self.text_primary;
        style.visuals.widgets.active.fg_stroke.color = self.text_primary;

        style.visuals.selection.bg_fill = self.menu_active;

        ctx.set_style(style);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_fill_is_translucent() {
        let theme = Theme::dark();
        assert_eq!(theme.background.a(), 255);
        assert!(theme.overlay_fill.a() < 255);
        assert!(theme.overlay_fill.a() >= 220);
    }
}
