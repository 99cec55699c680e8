//! Tab bar, catalog lists, settings form and the restart advisory.
//!
//! Every function renders from [`PanelState`] and pushes the user's
//! interactions as [`UiAction`]s; nothing here mutates state directly.

use std::collections::HashMap;

use egui::{RichText, Ui};
use shared::{
    color::Rgb,
    domain::{CatalogKind, ExternalLink, Tab, CAT_SIZE_BUCKETS},
};

use crate::controller::reducer::{
    CatalogList, PanelState, RowIcon, UiAction, PARTICLE_DENSITY_RANGE,
};
use crate::ui::{
    theme::PanelTheme,
    widgets::{self, IconSlot, SPEAKER_GLYPH},
};

pub fn tab_bar(ui: &mut Ui, state: &PanelState, theme: &PanelTheme, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        for tab in Tab::ALL {
            let selected = state.current_tab == tab;
            let text = if selected {
                RichText::new(tab.label()).strong().color(theme.accent())
            } else {
                RichText::new(tab.label())
            };
            if ui.selectable_label(selected, text).clicked() {
                actions.push(UiAction::SwitchTab(tab));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .small_button("✕")
                .on_hover_text("Hide settings")
                .clicked()
            {
                actions.push(UiAction::HideWindow);
            }
            for link in [ExternalLink::Discord, ExternalLink::GitHub] {
                if ui
                    .button(link.label())
                    .on_hover_text(link.url())
                    .clicked()
                {
                    actions.push(UiAction::OpenLink(link));
                }
            }
        });
    });
}

/// `entrance_elapsed` is seconds since this list's rows were last rebuilt.
pub fn catalog_panel(
    ui: &mut Ui,
    kind: CatalogKind,
    list: &CatalogList,
    icons: &HashMap<String, IconSlot>,
    theme: &PanelTheme,
    entrance_elapsed: f32,
    actions: &mut Vec<UiAction>,
) {
    if list.rows.is_empty() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| widgets::hint(ui, theme, kind.empty_placeholder()));
        return;
    }

    let placeholder = (kind == CatalogKind::BonkPacks).then_some(SPEAKER_GLYPH);
    egui::ScrollArea::vertical()
        .id_salt(kind.label())
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for row in &list.rows {
                let opacity = widgets::entrance_opacity(row.entrance_delay, entrance_elapsed);
                let icon = match &row.icon {
                    RowIcon::Image(source) => icons.get(source),
                    _ => None,
                };
                let response = ui
                    .scope(|ui| {
                        ui.multiply_opacity(opacity);
                        widgets::catalog_row(ui, row, icon, placeholder, theme)
                    })
                    .inner;
                if response.clicked() && !row.name.is_empty() {
                    actions.push(UiAction::SelectItem {
                        kind,
                        name: row.name.clone(),
                    });
                }
                ui.add_space(4.0);
            }
        });
}

pub fn settings_panel(
    ui: &mut Ui,
    state: &PanelState,
    theme: &PanelTheme,
    actions: &mut Vec<UiAction>,
) {
    egui::ScrollArea::vertical()
        .id_salt("settings")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            appearance_card(ui, state, theme, actions);
            ui.add_space(8.0);
            cat_card(ui, state, theme, actions);
            ui.add_space(8.0);
            position_card(ui, state, theme, actions);
            ui.add_space(8.0);
            sound_and_effects_card(ui, state, theme, actions);
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                if ui.button("Quit OpenBongo").clicked() {
                    actions.push(UiAction::Shutdown);
                }
            });
        });
}

fn appearance_card(
    ui: &mut Ui,
    state: &PanelState,
    theme: &PanelTheme,
    actions: &mut Vec<UiAction>,
) {
    widgets::section_card(ui, theme, "Appearance", |ui| {
        let mut dark_mode = state.dark_mode;
        if ui.checkbox(&mut dark_mode, "Dark mode").changed() {
            actions.push(UiAction::SetDarkMode(dark_mode));
        }

        ui.horizontal(|ui| {
            ui.label("Accent color");
            let base = Rgb::from_hex(&state.accent_color).unwrap_or(theme.accent.base);
            let mut rgb = [base.r, base.g, base.b];
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                let [r, g, b] = rgb;
                actions.push(UiAction::SetAccentColor(Rgb::new(r, g, b).to_hex()));
            }
        });
    });
}

fn cat_card(ui: &mut Ui, state: &PanelState, theme: &PanelTheme, actions: &mut Vec<UiAction>) {
    widgets::section_card(ui, theme, "Cat", |ui| {
        ui.label("Size");
        ui.horizontal_wrapped(|ui| {
            for size in CAT_SIZE_BUCKETS {
                let selected = state.cat_size == size;
                if ui
                    .selectable_label(selected, format!("{size}%"))
                    .clicked()
                    && !selected
                {
                    actions.push(UiAction::SetCatSize(size));
                }
            }
        });

        let mut flipped = state.cat_flipped;
        if ui.checkbox(&mut flipped, "Flip cat horizontally").changed() {
            actions.push(UiAction::SetCatFlip(flipped));
        }
    });
}

fn position_card(
    ui: &mut Ui,
    state: &PanelState,
    theme: &PanelTheme,
    actions: &mut Vec<UiAction>,
) {
    widgets::section_card(ui, theme, "Position", |ui| {
        let mut ui_offset = state.ui_offset;
        if ui
            .add(egui::Slider::new(&mut ui_offset, -50..=50).text("Vertical offset"))
            .changed()
        {
            actions.push(UiAction::SetUiOffset(ui_offset));
        }

        let mut horizontal = state.ui_horizontal_offset;
        if ui
            .add(egui::Slider::new(&mut horizontal, -50..=50).text("Horizontal offset"))
            .changed()
        {
            actions.push(UiAction::SetUiHorizontalOffset(horizontal));
        }

        ui.separator();

        let mut left_arm = state.left_arm_offset;
        if ui
            .add(
                egui::Slider::new(&mut left_arm, -50.0..=50.0)
                    .step_by(0.5)
                    .text("Left arm"),
            )
            .changed()
        {
            actions.push(UiAction::SetLeftArmOffset(left_arm));
        }

        let mut right_arm = state.right_arm_offset;
        if ui
            .add(
                egui::Slider::new(&mut right_arm, -50.0..=50.0)
                    .step_by(0.5)
                    .text("Right arm"),
            )
            .changed()
        {
            actions.push(UiAction::SetRightArmOffset(right_arm));
        }

        let mut vertical = state.animation_vertical_offset;
        if ui
            .add(
                egui::Slider::new(&mut vertical, -100.0..=100.0)
                    .step_by(0.5)
                    .text("Animation height"),
            )
            .changed()
        {
            actions.push(UiAction::SetAnimationVerticalOffset(vertical));
        }
        widgets::hint(
            ui,
            theme,
            &format!("Right arm and animation height are saved for size {}%.", state.cat_size),
        );
    });
}

fn sound_and_effects_card(
    ui: &mut Ui,
    state: &PanelState,
    theme: &PanelTheme,
    actions: &mut Vec<UiAction>,
) {
    widgets::section_card(ui, theme, "Sound & Effects", |ui| {
        let mut volume = state.sfx_volume;
        if ui
            .add(egui::Slider::new(&mut volume, 0..=100).text("SFX volume").suffix("%"))
            .changed()
        {
            actions.push(UiAction::SetSfxVolume(volume));
        }

        let mut particles = state.particle_effects_enabled;
        if ui.checkbox(&mut particles, "Seasonal particle effects").changed() {
            actions.push(UiAction::SetParticleEffects(particles));
        }

        let mut density = state.particle_density;
        if ui
            .add_enabled(
                state.particle_effects_enabled,
                egui::Slider::new(&mut density, PARTICLE_DENSITY_RANGE)
                    .text("Particle density")
                    .suffix("%"),
            )
            .changed()
        {
            actions.push(UiAction::SetParticleDensity(density));
        }
    });
}

/// Modal advisory shown while the backend asks for a restart.
pub fn restart_notice(ctx: &egui::Context, state: &PanelState, actions: &mut Vec<UiAction>) {
    let Some(message) = &state.restart_notice else {
        return;
    };
    egui::Window::new("Restart Required")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("Close").clicked() {
                    actions.push(UiAction::DismissRestartNotice);
                }
            });
        });
}
