use serde::{Deserialize, Serialize};

/// Name of the synthetic sound-pack entry that disables tap sounds.
pub const NO_SFX_NAME: &str = "No SFX";

pub const DEFAULT_CAT_SIZE: u32 = 100;

/// Discrete avatar sizes offered by the panel; size-scoped preferences are keyed by these.
pub const CAT_SIZE_BUCKETS: [u32; 6] = [50, 75, 100, 125, 150, 200];

pub const GITHUB_URL: &str = "https://github.com/CharlieRusso001/OpenBongo";
pub const DISCORD_URL: &str = "https://discord.gg/TVw6h5TBqJ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "iconPath")]
    pub icon_path: String,
}

impl CatalogItem {
    pub fn new(name: impl Into<String>, icon_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon_path: icon_path.into(),
        }
    }

    pub fn no_sfx() -> Self {
        Self::new(NO_SFX_NAME, "")
    }

    pub fn is_no_sfx(&self) -> bool {
        self.name == NO_SFX_NAME
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    CatPacks,
    Hats,
    BonkPacks,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [Self::CatPacks, Self::Hats, Self::BonkPacks];

    pub fn tab(self) -> Tab {
        match self {
            Self::CatPacks => Tab::Cats,
            Self::Hats => Tab::Hats,
            Self::BonkPacks => Tab::Sfx,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CatPacks => "Cat Pack",
            Self::Hats => "Hat",
            Self::BonkPacks => "Bonk Pack",
        }
    }

    pub fn empty_placeholder(self) -> &'static str {
        match self {
            Self::CatPacks => "No cat packs available",
            Self::Hats => "No hats available",
            Self::BonkPacks => "No bonk packs available",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Cats,
    Hats,
    Sfx,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Self::Cats, Self::Hats, Self::Sfx, Self::Settings];

    pub fn catalog(self) -> Option<CatalogKind> {
        match self {
            Self::Cats => Some(CatalogKind::CatPacks),
            Self::Hats => Some(CatalogKind::Hats),
            Self::Sfx => Some(CatalogKind::BonkPacks),
            Self::Settings => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cats => "Cats",
            Self::Hats => "Hats",
            Self::Sfx => "SFX",
            Self::Settings => "Settings",
        }
    }
}

/// External destinations reachable from the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalLink {
    GitHub,
    Discord,
}

impl ExternalLink {
    pub fn url(self) -> &'static str {
        match self {
            Self::GitHub => GITHUB_URL,
            Self::Discord => DISCORD_URL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::GitHub => "GitHub",
            Self::Discord => "Discord",
        }
    }
}

pub fn is_size_bucket(size: u32) -> bool {
    CAT_SIZE_BUCKETS.contains(&size)
}
