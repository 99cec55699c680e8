//! Small reusable pieces: catalog rows, section cards, icon slots, and the particle painter.

use egui::{
    emath::Rot2, Align2, Color32, FontId, Pos2, Rect, Response, Sense, TextureHandle, Ui, Vec2,
};

use crate::controller::reducer::{CatalogRow, RowIcon};
use crate::effects::Sprite;
use crate::ui::theme::PanelTheme;

pub const ROW_HEIGHT: f32 = 44.0;
pub const ICON_SIZE: f32 = 32.0;
/// Fade-in length for a staggered row.
pub const ENTRANCE_FADE_SECS: f32 = 0.3;

pub const MUTED_GLYPH: &str = "🔇";
pub const SPEAKER_GLYPH: &str = "🔊";
const UNKNOWN_NAME: &str = "Unknown";

/// Where a catalog icon is in its load lifecycle.
#[derive(Clone)]
pub enum IconSlot {
    /// Requested at the given frame time; no result yet.
    Pending(f64),
    Ready(TextureHandle),
    Failed,
}

/// Opacity for a row whose list started animating `elapsed` seconds ago.
pub fn entrance_opacity(delay: Option<f32>, elapsed: f32) -> f32 {
    match delay {
        None => 1.0,
        Some(delay) => ((elapsed - delay) / ENTRANCE_FADE_SECS).clamp(0.0, 1.0),
    }
}

pub fn display_name(name: &str) -> &str {
    if name.is_empty() {
        UNKNOWN_NAME
    } else {
        name
    }
}

/// Draws one selectable catalog row. `placeholder` is shown when the icon could not be loaded.
pub fn catalog_row(
    ui: &mut Ui,
    row: &CatalogRow,
    icon: Option<&IconSlot>,
    placeholder: Option<&str>,
    theme: &PanelTheme,
) -> Response {
    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, ROW_HEIGHT), Sense::click());
    if !ui.is_rect_visible(rect) {
        return response;
    }

    let painter = ui.painter();
    let fill = if row.selected {
        theme.selected_row_fill()
    } else if response.hovered() {
        theme.hovered_row_fill()
    } else {
        theme.card_fill()
    };
    painter.rect_filled(rect, egui::CornerRadius::same(8), fill);
    if row.selected {
        painter.rect_stroke(
            rect,
            egui::CornerRadius::same(8),
            egui::Stroke::new(1.5, theme.accent()),
            egui::StrokeKind::Inside,
        );
    }

    let icon_rect = Rect::from_center_size(
        egui::pos2(rect.left() + 8.0 + ICON_SIZE / 2.0, rect.center().y),
        egui::vec2(ICON_SIZE, ICON_SIZE),
    );
    let glyph = match (&row.icon, icon) {
        (RowIcon::Muted, _) => Some(MUTED_GLYPH),
        (RowIcon::Image(_), Some(IconSlot::Ready(texture))) => {
            painter.image(
                texture.id(),
                icon_rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
            None
        }
        (RowIcon::Image(_), Some(IconSlot::Failed)) | (RowIcon::Missing, _) => placeholder,
        (RowIcon::Image(_), _) => None,
    };
    if let Some(glyph) = glyph {
        painter.text(
            icon_rect.center(),
            Align2::CENTER_CENTER,
            glyph,
            FontId::proportional(20.0),
            ui.visuals().text_color(),
        );
    }

    let text_color = if row.selected {
        theme.accent()
    } else {
        ui.visuals().text_color()
    };
    painter.text(
        egui::pos2(icon_rect.right() + 12.0, rect.center().y),
        Align2::LEFT_CENTER,
        display_name(&row.name),
        FontId::proportional(15.0),
        text_color,
    );

    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

pub fn section_card<R>(
    ui: &mut Ui,
    theme: &PanelTheme,
    title: &str,
    add_contents: impl FnOnce(&mut Ui) -> R,
) -> R {
    egui::Frame::new()
        .fill(theme.card_fill())
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(title).strong().size(15.0));
            ui.add_space(4.0);
            add_contents(ui)
        })
        .inner
}

pub fn hint(ui: &mut Ui, theme: &PanelTheme, text: &str) {
    ui.label(egui::RichText::new(text).small().color(theme.muted_text()));
}

/// Top-left corner that keeps a galley of `size` centered on `center` once
/// rotated by `angle`. Text rotation pivots on that corner.
pub fn rotated_text_origin(center: Pos2, size: Vec2, angle: f32) -> Pos2 {
    center - Rot2::from_angle(angle) * (size / 2.0)
}

pub fn paint_sprites(painter: &egui::Painter, sprites: &[Sprite]) {
    for sprite in sprites {
        match sprite {
            Sprite::Glyph {
                text,
                center,
                size,
                rotation_deg,
                opacity,
            } => {
                let color = Color32::WHITE.gamma_multiply(*opacity);
                if rotation_deg.abs() < f32::EPSILON {
                    painter.text(
                        *center,
                        Align2::CENTER_CENTER,
                        *text,
                        FontId::proportional(*size),
                        color,
                    );
                    continue;
                }
                let galley =
                    painter.layout_no_wrap((*text).to_string(), FontId::proportional(*size), color);
                let angle = rotation_deg.to_radians();
                let pivot = rotated_text_origin(*center, galley.size(), angle);
                painter.add(egui::epaint::TextShape::new(pivot, galley, color).with_angle(angle));
            }
            Sprite::Dot {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(*center, *radius, *color);
            }
        }
    }
}
