//! Panel mirror state and the pure transitions applied to it.
//!
//! Both user actions and backend messages go through here. Transitions never
//! touch storage or the network; they return [`PanelEffect`]s that the
//! [`PanelController`](super::panel::PanelController) runs in order.

use std::time::Duration;

use shared::{
    color::DEFAULT_ACCENT_COLOR,
    domain::{CatalogItem, CatalogKind, ExternalLink, Tab, DEFAULT_CAT_SIZE, NO_SFX_NAME},
    protocol::{
        InboundMessage, OutboundCommand, ANIMATION_VERTICAL_OFFSET_RANGE, ARM_OFFSET_RANGE,
        CAT_SIZE_RANGE, SFX_VOLUME_RANGE, UI_OFFSET_RANGE,
    },
};
use storage::SizeScopedSetting;

pub const ENTRANCE_BASE_DELAY_SECS: f32 = 0.1;
pub const ENTRANCE_STEP_SECS: f32 = 0.05;
pub const LINK_HIDE_DELAY: Duration = Duration::from_millis(100);
pub const INITIAL_REQUEST_DELAY: Duration = Duration::from_millis(100);
pub const PARTICLE_DENSITY_RANGE: std::ops::RangeInclusive<u32> = 10..=200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIcon {
    Image(String),
    /// Server sent no icon path.
    Missing,
    /// The synthetic "No SFX" entry.
    Muted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub name: String,
    pub icon: RowIcon,
    pub selected: bool,
    /// Seconds before the row fades in; `None` renders it fully visible.
    pub entrance_delay: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogList {
    pub items: Vec<CatalogItem>,
    pub selected: String,
    pub rows: Vec<CatalogRow>,
    pub animated: bool,
    /// Bumped on every rebuild so the view can restart entrance timing.
    pub generation: u64,
}

impl CatalogList {
    fn rebuild(&mut self, kind: CatalogKind, items: Vec<CatalogItem>) -> Vec<PanelEffect> {
        self.items = items;
        self.generation += 1;

        let mut entries: Vec<(String, RowIcon)> = Vec::with_capacity(self.items.len() + 1);
        if kind == CatalogKind::BonkPacks {
            entries.push((NO_SFX_NAME.to_string(), RowIcon::Muted));
        }
        entries.extend(self.items.iter().map(|item| {
            let icon = if item.icon_path.is_empty() {
                RowIcon::Missing
            } else {
                RowIcon::Image(item.icon_path.clone())
            };
            (item.name.clone(), icon)
        }));

        if entries.is_empty() {
            self.rows.clear();
            return Vec::new();
        }

        let stagger = !self.animated;
        self.animated = true;

        let mut effects = Vec::new();
        self.rows = entries
            .into_iter()
            .enumerate()
            .map(|(index, (name, icon))| {
                if let RowIcon::Image(source) = &icon {
                    effects.push(PanelEffect::LoadIcon {
                        source: source.clone(),
                    });
                }
                CatalogRow {
                    selected: name == self.selected,
                    entrance_delay: stagger
                        .then(|| ENTRANCE_BASE_DELAY_SECS + index as f32 * ENTRANCE_STEP_SECS),
                    name,
                    icon,
                }
            })
            .collect();
        effects
    }

    /// Moves the highlight without rebuilding rows.
    fn mark_selected(&mut self, name: &str) {
        self.selected = name.to_string();
        for row in &mut self.rows {
            row.selected = row.name == name;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub current_tab: Tab,
    pub dark_mode: bool,
    pub cat_size: u32,
    pub accent_color: String,
    pub ui_offset: i32,
    pub ui_horizontal_offset: i32,
    pub sfx_volume: u32,
    pub cat_flipped: bool,
    pub particle_effects_enabled: bool,
    pub particle_density: u32,
    pub left_arm_offset: f64,
    pub right_arm_offset: f64,
    pub animation_vertical_offset: f64,
    pub cat_packs: CatalogList,
    pub hats: CatalogList,
    pub bonk_packs: CatalogList,
    pub restart_notice: Option<String>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            current_tab: Tab::Cats,
            dark_mode: false,
            cat_size: DEFAULT_CAT_SIZE,
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            ui_offset: 0,
            ui_horizontal_offset: 0,
            sfx_volume: 100,
            cat_flipped: false,
            particle_effects_enabled: true,
            particle_density: 100,
            left_arm_offset: 0.0,
            right_arm_offset: 0.0,
            animation_vertical_offset: 0.0,
            cat_packs: CatalogList::default(),
            hats: CatalogList::default(),
            bonk_packs: CatalogList::default(),
            restart_notice: None,
        }
    }
}

impl PanelState {
    pub fn catalog(&self, kind: CatalogKind) -> &CatalogList {
        match kind {
            CatalogKind::CatPacks => &self.cat_packs,
            CatalogKind::Hats => &self.hats,
            CatalogKind::BonkPacks => &self.bonk_packs,
        }
    }

    pub fn catalog_mut(&mut self, kind: CatalogKind) -> &mut CatalogList {
        match kind {
            CatalogKind::CatPacks => &mut self.cat_packs,
            CatalogKind::Hats => &mut self.hats,
            CatalogKind::BonkPacks => &mut self.bonk_packs,
        }
    }
}

/// User interactions with the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SwitchTab(Tab),
    SelectItem { kind: CatalogKind, name: String },
    SetCatSize(u32),
    SetAccentColor(String),
    SetUiOffset(i32),
    SetUiHorizontalOffset(i32),
    SetSfxVolume(u32),
    SetCatFlip(bool),
    SetLeftArmOffset(f64),
    SetRightArmOffset(f64),
    SetAnimationVerticalOffset(f64),
    SetDarkMode(bool),
    SetParticleEffects(bool),
    SetParticleDensity(u32),
    OpenLink(ExternalLink),
    HideWindow,
    Shutdown,
    DismissRestartNotice,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceWrite {
    DarkMode(bool),
    CatSize(u32),
    AccentColor(String),
    UiOffset(i32),
    UiHorizontalOffset(i32),
    SfxVolume(u32),
    CatFlip(bool),
    ParticleEffects(bool),
    ParticleDensity(u32),
    LeftArmOffset(f64),
    SizeScoped {
        setting: SizeScopedSetting,
        size: u32,
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEffect {
    Send(OutboundCommand),
    SendAfter {
        command: OutboundCommand,
        delay: Duration,
    },
    Persist(PreferenceWrite),
    /// Load the stored offsets for `size`, mirror them into state and push them to the backend.
    LoadSizeScopedOffsets { size: u32 },
    RestartParticles,
    StopParticles,
    LoadIcon { source: String },
}

pub fn reduce(state: &mut PanelState, action: UiAction) -> Vec<PanelEffect> {
    use PanelEffect::{Persist, Send};

    match action {
        UiAction::SwitchTab(tab) => {
            state.current_tab = tab;
            match tab.catalog() {
                Some(kind) => {
                    state.catalog_mut(kind).animated = false;
                    vec![Send(OutboundCommand::request_catalog(kind))]
                }
                None => Vec::new(),
            }
        }
        UiAction::SelectItem { kind, name } => {
            if name.is_empty() {
                return Vec::new();
            }
            state.catalog_mut(kind).mark_selected(&name);
            vec![Send(OutboundCommand::select(kind, name))]
        }
        UiAction::SetCatSize(size) => {
            if !CAT_SIZE_RANGE.contains(&i64::from(size)) {
                tracing::debug!(size, "ignoring cat size outside supported range");
                return Vec::new();
            }
            state.cat_size = size;
            vec![
                PanelEffect::LoadSizeScopedOffsets { size },
                Send(OutboundCommand::SetCatSize { size }),
                Persist(PreferenceWrite::CatSize(size)),
            ]
        }
        UiAction::SetAccentColor(color) => {
            state.accent_color = color.clone();
            vec![
                Persist(PreferenceWrite::AccentColor(color.clone())),
                Send(OutboundCommand::SetAccentColor { color }),
            ]
        }
        UiAction::SetUiOffset(offset) => {
            if !UI_OFFSET_RANGE.contains(&i64::from(offset)) {
                return Vec::new();
            }
            state.ui_offset = offset;
            vec![
                Send(OutboundCommand::SetUiOffset { offset }),
                Persist(PreferenceWrite::UiOffset(offset)),
            ]
        }
        UiAction::SetUiHorizontalOffset(offset) => {
            if !UI_OFFSET_RANGE.contains(&i64::from(offset)) {
                return Vec::new();
            }
            state.ui_horizontal_offset = offset;
            vec![
                Send(OutboundCommand::SetUiHorizontalOffset { offset }),
                Persist(PreferenceWrite::UiHorizontalOffset(offset)),
            ]
        }
        UiAction::SetSfxVolume(volume) => {
            if !SFX_VOLUME_RANGE.contains(&i64::from(volume)) {
                return Vec::new();
            }
            state.sfx_volume = volume;
            vec![
                Send(OutboundCommand::SetSfxVolume { volume }),
                Persist(PreferenceWrite::SfxVolume(volume)),
            ]
        }
        UiAction::SetCatFlip(flipped) => {
            state.cat_flipped = flipped;
            vec![
                Send(OutboundCommand::SetCatFlip { flipped }),
                Persist(PreferenceWrite::CatFlip(flipped)),
            ]
        }
        UiAction::SetLeftArmOffset(offset) => {
            if !ARM_OFFSET_RANGE.contains(&offset) {
                return Vec::new();
            }
            state.left_arm_offset = offset;
            vec![
                Send(OutboundCommand::SetLeftArmOffset { offset }),
                Persist(PreferenceWrite::LeftArmOffset(offset)),
            ]
        }
        UiAction::SetRightArmOffset(offset) => {
            if !ARM_OFFSET_RANGE.contains(&offset) {
                return Vec::new();
            }
            state.right_arm_offset = offset;
            vec![
                Send(OutboundCommand::SetRightArmOffset { offset }),
                Persist(PreferenceWrite::SizeScoped {
                    setting: SizeScopedSetting::RightArmOffset,
                    size: state.cat_size,
                    value: offset,
                }),
            ]
        }
        UiAction::SetAnimationVerticalOffset(offset) => {
            if !ANIMATION_VERTICAL_OFFSET_RANGE.contains(&offset) {
                return Vec::new();
            }
            state.animation_vertical_offset = offset;
            vec![
                Send(OutboundCommand::SetAnimationVerticalOffset { offset }),
                Persist(PreferenceWrite::SizeScoped {
                    setting: SizeScopedSetting::AnimationVerticalOffset,
                    size: state.cat_size,
                    value: offset,
                }),
            ]
        }
        UiAction::SetDarkMode(enabled) => {
            state.dark_mode = enabled;
            vec![Persist(PreferenceWrite::DarkMode(enabled))]
        }
        UiAction::SetParticleEffects(enabled) => {
            state.particle_effects_enabled = enabled;
            let particles = if enabled {
                PanelEffect::RestartParticles
            } else {
                PanelEffect::StopParticles
            };
            vec![Persist(PreferenceWrite::ParticleEffects(enabled)), particles]
        }
        UiAction::SetParticleDensity(density) => {
            if !PARTICLE_DENSITY_RANGE.contains(&density) {
                return Vec::new();
            }
            state.particle_density = density;
            let mut effects = vec![Persist(PreferenceWrite::ParticleDensity(density))];
            if state.particle_effects_enabled {
                effects.push(PanelEffect::RestartParticles);
            }
            effects
        }
        UiAction::OpenLink(link) => vec![
            Send(OutboundCommand::OpenUrl {
                url: link.url().to_string(),
            }),
            PanelEffect::SendAfter {
                command: OutboundCommand::HideWindow,
                delay: LINK_HIDE_DELAY,
            },
        ],
        UiAction::HideWindow => vec![Send(OutboundCommand::HideWindow)],
        UiAction::Shutdown => vec![Send(OutboundCommand::Shutdown)],
        UiAction::DismissRestartNotice => {
            state.restart_notice = None;
            Vec::new()
        }
    }
}

/// Mirrors a backend message into state. Never persists anything.
pub fn apply_inbound(state: &mut PanelState, message: InboundMessage) -> Vec<PanelEffect> {
    match message {
        InboundMessage::CatPackList(items) => state.cat_packs.rebuild(CatalogKind::CatPacks, items),
        InboundMessage::HatList(items) => state.hats.rebuild(CatalogKind::Hats, items),
        InboundMessage::BonkPackList(items) => {
            state.bonk_packs.rebuild(CatalogKind::BonkPacks, items)
        }
        InboundMessage::SelectedCatPack { name } => {
            state.cat_packs.mark_selected(&name);
            Vec::new()
        }
        InboundMessage::SelectedHat { name } => {
            state.hats.mark_selected(&name);
            Vec::new()
        }
        InboundMessage::SelectedBonkPack { name } => {
            state.bonk_packs.mark_selected(&name);
            Vec::new()
        }
        InboundMessage::CatSize(size) => {
            state.cat_size = size;
            Vec::new()
        }
        InboundMessage::AccentColor(color) => {
            state.accent_color = color;
            Vec::new()
        }
        InboundMessage::RestartRequired { message } => {
            state.restart_notice = Some(message);
            Vec::new()
        }
        InboundMessage::UiOffset(offset) => {
            state.ui_offset = offset;
            Vec::new()
        }
        InboundMessage::UiHorizontalOffset(offset) => {
            state.ui_horizontal_offset = offset;
            Vec::new()
        }
        InboundMessage::SfxVolume(volume) => {
            state.sfx_volume = volume;
            Vec::new()
        }
        InboundMessage::CatFlip(flipped) => {
            state.cat_flipped = flipped;
            Vec::new()
        }
        InboundMessage::LeftArmOffset(offset) => {
            state.left_arm_offset = offset;
            Vec::new()
        }
        InboundMessage::RightArmOffset(offset) => {
            state.right_arm_offset = offset;
            Vec::new()
        }
        InboundMessage::AnimationVerticalOffset(offset) => {
            state.animation_vertical_offset = offset;
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
