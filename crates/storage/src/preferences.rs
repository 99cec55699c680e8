use shared::{
    color::DEFAULT_ACCENT_COLOR,
    domain::DEFAULT_CAT_SIZE,
};

use crate::store::KeyValueStore;

/// Scalar types a preference can hold, with their string encoding.
pub trait PreferenceValue: Sized {
    fn encode(&self) -> String;
    fn decode(raw: &str) -> Option<Self>;
}

impl PreferenceValue for bool {
    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Option<Self> {
        match raw {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl PreferenceValue for i32 {
    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl PreferenceValue for u32 {
    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl PreferenceValue for f64 {
    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Option<Self> {
        raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
    }
}

impl PreferenceValue for String {
    fn encode(&self) -> String {
        self.clone()
    }

    fn decode(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// A named setting with its storage key and default.
#[derive(Debug, Clone, Copy)]
pub struct Preference<T> {
    pub key: &'static str,
    pub default: fn() -> T,
}

impl<T> Preference<T> {
    pub fn default_value(&self) -> T {
        (self.default)()
    }
}

pub const DARK_MODE: Preference<bool> = Preference {
    key: "openBongoDarkMode",
    default: || false,
};
pub const CAT_SIZE: Preference<u32> = Preference {
    key: "openBongoCatSize",
    default: || DEFAULT_CAT_SIZE,
};
pub const ACCENT_COLOR: Preference<String> = Preference {
    key: "openBongoAccentColor",
    default: || DEFAULT_ACCENT_COLOR.to_string(),
};
pub const UI_OFFSET: Preference<i32> = Preference {
    key: "openBongoUIOffset",
    default: || 0,
};
pub const UI_HORIZONTAL_OFFSET: Preference<i32> = Preference {
    key: "openBongoUIHorizontalOffset",
    default: || 0,
};
pub const SFX_VOLUME: Preference<u32> = Preference {
    key: "openBongoSFXVolume",
    default: || 100,
};
pub const CAT_FLIP: Preference<bool> = Preference {
    key: "openBongoCatFlip",
    default: || false,
};
pub const PARTICLE_EFFECTS: Preference<bool> = Preference {
    key: "openBongoParticleEffects",
    default: || true,
};
pub const PARTICLE_DENSITY: Preference<u32> = Preference {
    key: "openBongoParticleDensity",
    default: || 100,
};
pub const LEFT_ARM_OFFSET: Preference<f64> = Preference {
    key: "openBongoLeftArmOffset",
    default: || 0.0,
};
/// Legacy flat key; only read as a fallback for size-scoped lookups.
pub const RIGHT_ARM_OFFSET: Preference<f64> = Preference {
    key: "openBongoRightArmOffset",
    default: || 0.0,
};
/// Legacy flat key; only read as a fallback for size-scoped lookups.
pub const ANIMATION_VERTICAL_OFFSET: Preference<f64> = Preference {
    key: "openBongoAnimationVerticalOffset",
    default: || 0.0,
};

pub const FLAT_PREFERENCE_KEYS: [&str; 12] = [
    DARK_MODE.key,
    CAT_SIZE.key,
    ACCENT_COLOR.key,
    UI_OFFSET.key,
    UI_HORIZONTAL_OFFSET.key,
    SFX_VOLUME.key,
    CAT_FLIP.key,
    PARTICLE_EFFECTS.key,
    PARTICLE_DENSITY.key,
    LEFT_ARM_OFFSET.key,
    RIGHT_ARM_OFFSET.key,
    ANIMATION_VERTICAL_OFFSET.key,
];

/// Offsets remembered separately for each avatar size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeScopedSetting {
    RightArmOffset,
    AnimationVerticalOffset,
}

impl SizeScopedSetting {
    pub const ALL: [SizeScopedSetting; 2] = [Self::RightArmOffset, Self::AnimationVerticalOffset];

    pub fn name(self) -> &'static str {
        match self {
            Self::RightArmOffset => "rightArmOffset",
            Self::AnimationVerticalOffset => "animationVerticalOffset",
        }
    }

    /// `openBongo_<setting>_size_<size>`
    pub fn key(self, size: u32) -> String {
        format!("openBongo_{}_size_{size}", self.name())
    }

    pub fn legacy(self) -> Preference<f64> {
        match self {
            Self::RightArmOffset => RIGHT_ARM_OFFSET,
            Self::AnimationVerticalOffset => ANIMATION_VERTICAL_OFFSET,
        }
    }
}

/// Splits a composite key back into its setting and size.
pub fn parse_size_scoped_key(key: &str) -> Option<(SizeScopedSetting, u32)> {
    let rest = key.strip_prefix("openBongo_")?;
    let (name, size) = rest.split_once("_size_")?;
    let setting = SizeScopedSetting::ALL
        .into_iter()
        .find(|setting| setting.name() == name)?;
    Some((setting, size.parse().ok()?))
}

/// Typed, failure-tolerant access to a [`KeyValueStore`].
#[derive(Debug)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored value, or the default when absent, unparsable, or unreadable.
    pub fn load<T: PreferenceValue>(&self, pref: &Preference<T>) -> T {
        self.read(pref.key).unwrap_or_else(|| pref.default_value())
    }

    pub fn save<T: PreferenceValue>(&mut self, pref: &Preference<T>, value: &T) {
        self.write(pref.key, value);
    }

    /// Composite key first, then the legacy flat key. `None` when neither is stored.
    pub fn load_size_scoped(&self, setting: SizeScopedSetting, size: u32) -> Option<f64> {
        self.read(&setting.key(size))
            .or_else(|| self.read(setting.legacy().key))
    }

    pub fn save_size_scoped(&mut self, setting: SizeScopedSetting, size: u32, value: f64) {
        self.write(&setting.key(size), &value);
    }

    fn read<T: PreferenceValue>(&self, key: &str) -> Option<T> {
        match self.store.get_item(key) {
            Ok(Some(raw)) => {
                let value = T::decode(&raw);
                if value.is_none() {
                    tracing::warn!(key, raw = %raw, "ignoring unparsable stored preference");
                }
                value
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read preference");
                None
            }
        }
    }

    fn write<T: PreferenceValue>(&mut self, key: &str, value: &T) {
        let encoded = value.encode();
        match self.store.set_item(key, &encoded) {
            Ok(()) => tracing::debug!(key, value = %encoded, "saved preference"),
            Err(err) => tracing::warn!(key, error = %err, "failed to save preference"),
        }
    }
}
