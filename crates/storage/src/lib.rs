//! Local preference persistence for the settings panel.
//!
//! Stores are plain string key/value maps. [`Preferences`] layers typed,
//! failure-tolerant access on top: reads fall back to defaults and writes
//! only log when the underlying store refuses them.

mod preferences;
mod store;

pub use preferences::{
    parse_size_scoped_key, Preference, PreferenceValue, Preferences, SizeScopedSetting,
    ACCENT_COLOR, ANIMATION_VERTICAL_OFFSET, CAT_FLIP, CAT_SIZE, DARK_MODE, FLAT_PREFERENCE_KEYS,
    LEFT_ARM_OFFSET, PARTICLE_DENSITY, PARTICLE_EFFECTS, RIGHT_ARM_OFFSET, SFX_VOLUME, UI_OFFSET,
    UI_HORIZONTAL_OFFSET,
};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
