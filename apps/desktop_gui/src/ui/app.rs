use std::collections::HashMap;
use std::time::Duration;

use crossbeam_channel::Receiver;
use eframe::egui;
use shared::domain::{CatalogKind, Tab};
use storage::KeyValueStore;

use crate::controller::{
    events::{DecodedIcon, UiEvent},
    orchestration::QueueSink,
    panel::{PanelController, ParticleRequest},
    reducer::{PanelState, UiAction, ENTRANCE_BASE_DELAY_SECS, ENTRANCE_STEP_SECS},
};
use crate::effects::{seasonal::SeasonalEffect, ParticleEffects};
use crate::ui::{
    panels,
    theme::{self, PanelTheme},
    widgets::{self, IconSlot},
};

pub type PanelStore = Box<dyn KeyValueStore>;

const IDLE_REPAINT: Duration = Duration::from_millis(100);
const ANIMATION_REPAINT: Duration = Duration::from_millis(16);
/// A pending icon with no result after this long is requested again.
const ICON_RETRY_SECS: f64 = 10.0;

pub struct SettingsApp {
    controller: PanelController<PanelStore, QueueSink>,
    icon_sink: QueueSink,
    ui_rx: Receiver<UiEvent>,
    icons: HashMap<String, IconSlot>,
    effects: ParticleEffects,
    applied_theme: Option<PanelTheme>,
    /// Catalog generation last seen and the time its rows were rebuilt.
    list_started: HashMap<CatalogKind, (u64, f64)>,
}

impl SettingsApp {
    pub fn new(store: PanelStore, sink: QueueSink, ui_rx: Receiver<UiEvent>) -> Self {
        let icon_sink = sink.clone();
        let mut controller = PanelController::new(store, sink);
        controller.bootstrap();
        Self {
            controller,
            icon_sink,
            ui_rx,
            icons: HashMap::new(),
            effects: ParticleEffects::new(),
            applied_theme: None,
            list_started: HashMap::new(),
        }
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Inbound(raw) => {
                    self.controller.handle_message(raw);
                }
                UiEvent::IconLoaded(icon) => self.install_icon(ctx, icon),
                UiEvent::IconFailed { source, reason } => {
                    tracing::debug!(source = %source, "catalog icon failed: {reason}");
                    self.icons.insert(source, IconSlot::Failed);
                }
                UiEvent::BridgeFailed(reason) => {
                    tracing::error!("backend bridge unavailable: {reason}");
                }
            }
        }
    }

    fn install_icon(&mut self, ctx: &egui::Context, icon: DecodedIcon) {
        let color_image =
            egui::ColorImage::from_rgba_unmultiplied([icon.width, icon.height], &icon.rgba);
        let texture = ctx.load_texture(
            format!("catalog-icon:{}", icon.source),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        self.icons.insert(icon.source, IconSlot::Ready(texture));
    }

    fn request_icons(&mut self, now: f64) {
        let mut sources = self.controller.take_icon_requests();
        sources.retain(|source| !self.icons.contains_key(source));
        for source in stalled_icons(&self.icons, now) {
            tracing::debug!(source = %source, "icon result never arrived; requesting again");
            self.icons.remove(&source);
            sources.push(source);
        }
        for source in sources {
            if self.icon_sink.request_icon(source.clone()) {
                self.icons.insert(source, IconSlot::Pending(now));
            }
        }
    }

    fn sync_particles(&mut self, now: f64) {
        match self.controller.take_particle_request() {
            Some(ParticleRequest::Restart) => {
                let state = self.controller.state();
                let effect = if state.particle_effects_enabled {
                    SeasonalEffect::today()
                } else {
                    None
                };
                self.effects.apply(effect, state.particle_density, now);
            }
            Some(ParticleRequest::Stop) => self.effects.stop(),
            None => {}
        }
        self.effects.tick(now);
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        let state = self.controller.state();
        let wanted = PanelTheme::new(state.dark_mode, &state.accent_color);
        if self.applied_theme == Some(wanted) {
            return;
        }
        theme::apply(ctx, wanted);
        self.applied_theme = Some(wanted);
    }

    /// Seconds since `kind`'s rows were rebuilt, restarting the clock on each rebuild.
    fn entrance_elapsed(&mut self, kind: CatalogKind, now: f64) -> f32 {
        let generation = self.controller.state().catalog(kind).generation;
        let entry = self.list_started.entry(kind).or_insert((generation, now));
        if entry.0 != generation {
            *entry = (generation, now);
        }
        (now - entry.1) as f32
    }

    fn entrance_running(state: &PanelState, kind: CatalogKind, elapsed: f32) -> bool {
        let rows = state.catalog(kind).rows.len();
        if rows == 0 || state.catalog(kind).rows[0].entrance_delay.is_none() {
            return false;
        }
        let last_delay = ENTRANCE_BASE_DELAY_SECS + (rows - 1) as f32 * ENTRANCE_STEP_SECS;
        elapsed < last_delay + widgets::ENTRANCE_FADE_SECS
    }

    fn show_panel(&mut self, ctx: &egui::Context, now: f64, actions: &mut Vec<UiAction>) -> bool {
        let Some(theme) = self.applied_theme else {
            return false;
        };
        let current_tab = self.controller.state().current_tab;
        let elapsed = current_tab
            .catalog()
            .map(|kind| (kind, self.entrance_elapsed(kind, now)));
        let state = self.controller.state();

        egui::TopBottomPanel::top("tab_bar")
            .frame(
                egui::Frame::new()
                    .fill(ctx.style().visuals.panel_fill)
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| panels::tab_bar(ui, state, &theme, actions));

        egui::CentralPanel::default().show(ctx, |ui| match (current_tab, elapsed) {
            (Tab::Settings, _) | (_, None) => panels::settings_panel(ui, state, &theme, actions),
            (_, Some((kind, elapsed))) => panels::catalog_panel(
                ui,
                kind,
                state.catalog(kind),
                &self.icons,
                &theme,
                elapsed,
                actions,
            ),
        });

        panels::restart_notice(ctx, state, actions);

        elapsed.is_some_and(|(kind, elapsed)| Self::entrance_running(state, kind, elapsed))
    }

    fn paint_effects(&self, ctx: &egui::Context, now: f64) {
        if !self.effects.is_animating() {
            return;
        }
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("seasonal_effects"),
        ));
        let sprites = self.effects.sprites(now, ctx.screen_rect());
        widgets::paint_sprites(&painter, &sprites);
    }
}

/// Pending icons whose result was lost, e.g. dropped on a full event queue.
fn stalled_icons(icons: &HashMap<String, IconSlot>, now: f64) -> Vec<String> {
    icons
        .iter()
        .filter_map(|(source, slot)| match slot {
            IconSlot::Pending(requested_at) if now - requested_at >= ICON_RETRY_SECS => {
                Some(source.clone())
            }
            _ => None,
        })
        .collect()
}

impl eframe::App for SettingsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        self.process_ui_events(ctx);
        self.request_icons(now);
        self.sync_particles(now);
        self.apply_theme_if_needed(ctx);

        let mut actions = Vec::new();
        let entrance_running = self.show_panel(ctx, now, &mut actions);
        self.paint_effects(ctx, now);

        for action in actions {
            self.controller.dispatch(action);
        }

        if entrance_running || self.effects.is_animating() {
            ctx.request_repaint_after(ANIMATION_REPAINT);
        } else {
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }
}
