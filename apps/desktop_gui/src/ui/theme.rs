//! Panel visuals: light/dark base plus the accent palette.

use egui::Color32;
use shared::color::{AccentPalette, Rgb};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelTheme {
    pub dark_mode: bool,
    pub accent: AccentPalette,
}

impl PanelTheme {
    pub fn new(dark_mode: bool, accent_hex: &str) -> Self {
        Self {
            dark_mode,
            accent: AccentPalette::from_hex(accent_hex),
        }
    }

    pub fn accent(&self) -> Color32 {
        rgb(self.accent.base)
    }

    pub fn accent_dark(&self) -> Color32 {
        rgb(self.accent.dark)
    }

    pub fn accent_darker(&self) -> Color32 {
        rgb(self.accent.darker)
    }

    /// Background of the selected catalog row.
    pub fn selected_row_fill(&self) -> Color32 {
        rgba(self.accent.tint_15)
    }

    pub fn hovered_row_fill(&self) -> Color32 {
        rgba(self.accent.tint_20)
    }

    pub fn focus_ring(&self) -> Color32 {
        rgba(self.accent.tint_30)
    }

    pub fn card_fill(&self) -> Color32 {
        if self.dark_mode {
            Color32::from_rgb(42, 44, 50)
        } else {
            Color32::from_rgb(248, 249, 251)
        }
    }

    pub fn muted_text(&self) -> Color32 {
        if self.dark_mode {
            Color32::from_rgb(150, 154, 163)
        } else {
            Color32::from_rgb(110, 114, 122)
        }
    }
}

pub fn rgb(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

pub fn rgba([r, g, b, a]: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

pub fn visuals_for_theme(theme: PanelTheme) -> egui::Visuals {
    let mut visuals = if theme.dark_mode {
        let mut v = egui::Visuals::dark();
        v.window_fill = Color32::from_rgb(30, 31, 35);
        v.panel_fill = Color32::from_rgb(30, 31, 35);
        v.extreme_bg_color = Color32::from_rgb(22, 23, 26);
        v.faint_bg_color = Color32::from_rgb(42, 44, 50);
        v
    } else {
        let mut v = egui::Visuals::light();
        v.window_fill = Color32::WHITE;
        v.panel_fill = Color32::WHITE;
        v.faint_bg_color = Color32::from_rgb(244, 245, 247);
        v
    };

    let accent = theme.accent();
    visuals.hyperlink_color = accent;
    visuals.selection.bg_fill = accent;
    visuals.selection.stroke = egui::Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.active.bg_fill = theme.accent_darker();
    visuals.widgets.active.weak_bg_fill = theme.accent_darker();
    visuals.widgets.hovered.bg_fill = theme.accent_dark();
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, theme.focus_ring());
    visuals.window_corner_radius = egui::CornerRadius::same(10);
    visuals.menu_corner_radius = egui::CornerRadius::same(8);
    visuals
}

pub fn apply(ctx: &egui::Context, theme: PanelTheme) {
    let mut style = (*ctx.style()).clone();
    style.visuals = visuals_for_theme(theme);
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.slider_width = 220.0;
    ctx.set_style(style);
}
