//! Calendar-driven choice of decoration and the parameters of each falling swarm.

use std::ops::Range;

use chrono::{Datelike, Local, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonalEffect {
    Snow,
    Leaves,
    Hearts,
    Christmas,
    Fireworks,
}

/// How one falling swarm looks and moves. Sizes and drift are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmSpec {
    pub base_count: u32,
    pub glyphs: &'static [&'static str],
    pub size: Range<f32>,
    pub duration_secs: Range<f32>,
    pub max_delay_secs: f32,
    /// Total horizontal travel is drawn from `-drift..drift`.
    pub drift: f32,
    pub opacity: Range<f32>,
    pub spins: bool,
    pub eased: bool,
}

const SNOW_GLYPHS: &[&str] = &["❄"];
const LEAF_GLYPHS: &[&str] = &["🍂", "🍁", "🍃"];
const HEART_GLYPHS: &[&str] = &["❤️", "💕", "💖", "💗", "💓", "💝"];
const CHRISTMAS_GLYPHS: &[&str] = &["🎄", "🎁", "🎅", "🤶", "🦌", "⭐", "❄️", "🧦", "🔔"];

impl SeasonalEffect {
    /// Holidays win over the month-long effects.
    pub fn for_date(date: NaiveDate) -> Option<Self> {
        match (date.month(), date.day()) {
            (12, 31) | (1, 1) => Some(Self::Fireworks),
            (12, 25) => Some(Self::Christmas),
            (2, 14) => Some(Self::Hearts),
            (11, _) => Some(Self::Leaves),
            (12, _) => Some(Self::Snow),
            _ => None,
        }
    }

    pub fn today() -> Option<Self> {
        Self::for_date(Local::now().date_naive())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Snow => "snow",
            Self::Leaves => "leaves",
            Self::Hearts => "hearts",
            Self::Christmas => "christmas",
            Self::Fireworks => "fireworks",
        }
    }

    /// `None` for fireworks, which burst instead of falling.
    pub fn swarm(self) -> Option<SwarmSpec> {
        let spec = match self {
            Self::Snow => SwarmSpec {
                base_count: 50,
                glyphs: SNOW_GLYPHS,
                size: 10.0..20.0,
                duration_secs: 2.0..5.0,
                max_delay_secs: 2.0,
                drift: 20.0,
                opacity: 0.5..1.0,
                spins: false,
                eased: false,
            },
            Self::Leaves => SwarmSpec {
                base_count: 30,
                glyphs: LEAF_GLYPHS,
                size: 15.0..30.0,
                duration_secs: 3.0..7.0,
                max_delay_secs: 2.0,
                drift: 30.0,
                opacity: 0.6..1.0,
                spins: true,
                eased: false,
            },
            Self::Hearts => SwarmSpec {
                base_count: 40,
                glyphs: HEART_GLYPHS,
                size: 12.0..24.0,
                duration_secs: 2.0..5.0,
                max_delay_secs: 2.0,
                drift: 15.0,
                opacity: 0.5..1.0,
                spins: false,
                eased: true,
            },
            Self::Christmas => SwarmSpec {
                base_count: 50,
                glyphs: CHRISTMAS_GLYPHS,
                size: 12.0..24.0,
                duration_secs: 2.0..5.0,
                max_delay_secs: 2.0,
                drift: 20.0,
                opacity: 0.5..1.0,
                spins: true,
                eased: false,
            },
            Self::Fireworks => return None,
        };
        Some(spec)
    }
}

/// `floor(base * density / 100)`
pub fn scaled_count(base: u32, density: u32) -> usize {
    (u64::from(base) * u64::from(density) / 100) as usize
}
