//! Owns the panel state and runs reducer effects against storage and the backend.

use client_core::CommandSink;
use shared::{
    domain::{Tab, DEFAULT_CAT_SIZE},
    protocol::{InboundMessage, OutboundCommand, RawMessage, CAT_SIZE_RANGE},
};
use storage::{
    KeyValueStore, Preferences, SizeScopedSetting, ACCENT_COLOR, CAT_FLIP, CAT_SIZE, DARK_MODE,
    LEFT_ARM_OFFSET, PARTICLE_DENSITY, PARTICLE_EFFECTS, SFX_VOLUME, UI_HORIZONTAL_OFFSET,
    UI_OFFSET,
};

use crate::controller::reducer::{
    self, PanelEffect, PanelState, PreferenceWrite, UiAction, INITIAL_REQUEST_DELAY,
    PARTICLE_DENSITY_RANGE,
};

/// What the effects layer should do on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleRequest {
    Restart,
    Stop,
}

pub struct PanelController<S, C> {
    state: PanelState,
    preferences: Preferences<S>,
    sink: C,
    icon_requests: Vec<String>,
    particle_request: Option<ParticleRequest>,
}

impl<S: KeyValueStore, C: CommandSink> PanelController<S, C> {
    pub fn new(store: S, sink: C) -> Self {
        Self {
            state: PanelState::default(),
            preferences: Preferences::new(store),
            sink,
            icon_requests: Vec::new(),
            particle_request: None,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn preferences(&self) -> &Preferences<S> {
        &self.preferences
    }

    pub fn sink(&self) -> &C {
        &self.sink
    }

    /// Hydrates state from stored preferences, pushes the stored offsets to the
    /// backend, opens the cats tab and schedules the initial data requests.
    pub fn bootstrap(&mut self) {
        self.hydrate();

        self.sink.send(OutboundCommand::SetLeftArmOffset {
            offset: self.state.left_arm_offset,
        });
        self.sink.send(OutboundCommand::SetRightArmOffset {
            offset: self.state.right_arm_offset,
        });
        self.sink.send(OutboundCommand::SetAnimationVerticalOffset {
            offset: self.state.animation_vertical_offset,
        });

        self.dispatch(UiAction::SwitchTab(Tab::Cats));

        for command in [
            OutboundCommand::GetSelectedCatPack,
            OutboundCommand::GetSelectedHat,
            OutboundCommand::GetSelectedBonkPack,
            OutboundCommand::GetCatPacks,
        ] {
            self.sink.send_after(command, INITIAL_REQUEST_DELAY);
        }

        if self.state.particle_effects_enabled {
            self.particle_request = Some(ParticleRequest::Restart);
        }
        tracing::info!(
            cat_size = self.state.cat_size,
            dark_mode = self.state.dark_mode,
            "settings panel bootstrapped"
        );
    }

    fn hydrate(&mut self) {
        let prefs = &self.preferences;
        let state = &mut self.state;

        state.dark_mode = prefs.load(&DARK_MODE);
        let cat_size = prefs.load(&CAT_SIZE);
        state.cat_size = if CAT_SIZE_RANGE.contains(&i64::from(cat_size)) {
            cat_size
        } else {
            tracing::warn!(cat_size, "stored cat size out of range; using default");
            DEFAULT_CAT_SIZE
        };
        state.accent_color = prefs.load(&ACCENT_COLOR);
        state.ui_offset = prefs.load(&UI_OFFSET);
        state.ui_horizontal_offset = prefs.load(&UI_HORIZONTAL_OFFSET);
        state.sfx_volume = prefs.load(&SFX_VOLUME);
        state.cat_flipped = prefs.load(&CAT_FLIP);
        state.particle_effects_enabled = prefs.load(&PARTICLE_EFFECTS);
        let density = prefs.load(&PARTICLE_DENSITY);
        state.particle_density = if PARTICLE_DENSITY_RANGE.contains(&density) {
            density
        } else {
            PARTICLE_DENSITY.default_value()
        };
        state.left_arm_offset = prefs.load(&LEFT_ARM_OFFSET);
        state.right_arm_offset = prefs
            .load_size_scoped(SizeScopedSetting::RightArmOffset, state.cat_size)
            .unwrap_or(0.0);
        state.animation_vertical_offset = prefs
            .load_size_scoped(SizeScopedSetting::AnimationVerticalOffset, state.cat_size)
            .unwrap_or(0.0);
    }

    pub fn dispatch(&mut self, action: UiAction) {
        let effects = reducer::reduce(&mut self.state, action);
        self.run_effects(effects);
    }

    /// Direct entry point for hosts that hand messages over in-process.
    pub fn receive_message(&mut self, raw: impl Into<RawMessage>) -> bool {
        self.handle_message(raw.into())
    }

    /// Returns whether the message changed anything. Rejected messages are logged and dropped.
    pub fn handle_message(&mut self, raw: RawMessage) -> bool {
        match InboundMessage::parse(raw) {
            Ok(message) => {
                tracing::debug!(kind = message.kind(), "applying backend message");
                let effects = reducer::apply_inbound(&mut self.state, message);
                self.run_effects(effects);
                true
            }
            Err(err) if err.is_malformed() => {
                tracing::warn!("dropping malformed backend message: {err}");
                false
            }
            Err(err) if err.is_unknown_type() => {
                tracing::debug!("ignoring backend message: {err}");
                false
            }
            Err(err) => {
                tracing::debug!("rejecting backend message payload: {err}");
                false
            }
        }
    }

    pub fn take_icon_requests(&mut self) -> Vec<String> {
        std::mem::take(&mut self.icon_requests)
    }

    pub fn take_particle_request(&mut self) -> Option<ParticleRequest> {
        self.particle_request.take()
    }

    fn run_effects(&mut self, effects: Vec<PanelEffect>) {
        for effect in effects {
            match effect {
                PanelEffect::Send(command) => self.sink.send(command),
                PanelEffect::SendAfter { command, delay } => self.sink.send_after(command, delay),
                PanelEffect::Persist(write) => self.persist(write),
                PanelEffect::LoadSizeScopedOffsets { size } => self.load_size_offsets(size),
                PanelEffect::RestartParticles => {
                    self.particle_request = Some(ParticleRequest::Restart)
                }
                PanelEffect::StopParticles => self.particle_request = Some(ParticleRequest::Stop),
                PanelEffect::LoadIcon { source } => {
                    if !self.icon_requests.contains(&source) {
                        self.icon_requests.push(source);
                    }
                }
            }
        }
    }

    fn load_size_offsets(&mut self, size: u32) {
        let right = self
            .preferences
            .load_size_scoped(SizeScopedSetting::RightArmOffset, size)
            .unwrap_or(0.0);
        let vertical = self
            .preferences
            .load_size_scoped(SizeScopedSetting::AnimationVerticalOffset, size)
            .unwrap_or(0.0);
        self.state.right_arm_offset = right;
        self.state.animation_vertical_offset = vertical;
        self.sink
            .send(OutboundCommand::SetRightArmOffset { offset: right });
        self.sink
            .send(OutboundCommand::SetAnimationVerticalOffset { offset: vertical });
    }

    fn persist(&mut self, write: PreferenceWrite) {
        let prefs = &mut self.preferences;
        match write {
            PreferenceWrite::DarkMode(value) => prefs.save(&DARK_MODE, &value),
            PreferenceWrite::CatSize(value) => prefs.save(&CAT_SIZE, &value),
            PreferenceWrite::AccentColor(value) => prefs.save(&ACCENT_COLOR, &value),
            PreferenceWrite::UiOffset(value) => prefs.save(&UI_OFFSET, &value),
            PreferenceWrite::UiHorizontalOffset(value) => {
                prefs.save(&UI_HORIZONTAL_OFFSET, &value)
            }
            PreferenceWrite::SfxVolume(value) => prefs.save(&SFX_VOLUME, &value),
            PreferenceWrite::CatFlip(value) => prefs.save(&CAT_FLIP, &value),
            PreferenceWrite::ParticleEffects(value) => prefs.save(&PARTICLE_EFFECTS, &value),
            PreferenceWrite::ParticleDensity(value) => prefs.save(&PARTICLE_DENSITY, &value),
            PreferenceWrite::LeftArmOffset(value) => prefs.save(&LEFT_ARM_OFFSET, &value),
            PreferenceWrite::SizeScoped {
                setting,
                size,
                value,
            } => prefs.save_size_scoped(setting, size, value),
        }
    }
}

#[cfg(test)]
#[path = "tests/panel_tests.rs"]
mod tests;
