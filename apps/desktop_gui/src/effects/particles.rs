//! Individual falling glyphs and firework bursts, positioned as pure functions of time.

use egui::{Color32, Pos2, Vec2};
use rand::Rng;

use crate::effects::seasonal::SwarmSpec;

pub const FLASH_SECS: f64 = 1.0;
pub const SPARK_RELEASE_SECS: f64 = 0.1;
pub const SPARK_LIFETIME_SECS: f64 = 1.5;
pub const SPARK_COUNT: usize = 20;
pub const FIREWORK_COLORS: [Color32; 7] = [
    Color32::from_rgb(0xff, 0x00, 0x00),
    Color32::from_rgb(0x00, 0xff, 0x00),
    Color32::from_rgb(0x00, 0x00, 0xff),
    Color32::from_rgb(0xff, 0xff, 0x00),
    Color32::from_rgb(0xff, 0x00, 0xff),
    Color32::from_rgb(0x00, 0xff, 0xff),
    Color32::from_rgb(0xff, 0xff, 0xff),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ParticlePose {
    pub center: Pos2,
    pub size: f32,
    pub rotation_deg: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FallingParticle {
    pub glyph: &'static str,
    pub size: f32,
    pub duration_secs: f32,
    pub delay_secs: f32,
    /// Fraction of the overlay width.
    pub start_x: f32,
    pub drift: f32,
    pub opacity: f32,
    pub rotation_deg: Option<f32>,
    pub eased: bool,
}

impl FallingParticle {
    pub fn spawn(spec: &SwarmSpec, rng: &mut impl Rng) -> Self {
        let glyph = spec.glyphs[rng.random_range(0..spec.glyphs.len())];
        Self {
            glyph,
            size: rng.random_range(spec.size.clone()),
            duration_secs: rng.random_range(spec.duration_secs.clone()),
            delay_secs: rng.random_range(0.0..spec.max_delay_secs),
            start_x: rng.random_range(0.0..1.0),
            drift: rng.random_range(-spec.drift..spec.drift),
            opacity: rng.random_range(spec.opacity.clone()),
            rotation_deg: spec.spins.then(|| rng.random_range(0.0..360.0)),
            eased: spec.eased,
        }
    }

    /// Loops forever once the start delay has passed; `None` before that.
    pub fn pose(&self, elapsed: f64, area: Vec2) -> Option<ParticlePose> {
        let running = elapsed - f64::from(self.delay_secs);
        if running < 0.0 {
            return None;
        }
        let duration = f64::from(self.duration_secs.max(0.01));
        let linear = ((running % duration) / duration) as f32;
        let progress = if self.eased {
            linear * linear * (3.0 - 2.0 * linear)
        } else {
            linear
        };

        let top = -self.size;
        let bottom = area.y + self.size;
        Some(ParticlePose {
            center: Pos2::new(
                self.start_x * area.x + self.drift * progress,
                top + (bottom - top) * progress,
            ),
            size: self.size,
            rotation_deg: self
                .rotation_deg
                .map_or(0.0, |start| start + 720.0 * progress),
            opacity: self.opacity,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireworkSpark {
    /// Final displacement from the burst origin, in points.
    pub offset: Vec2,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FireworkBurst {
    /// Fractions of the overlay size.
    pub origin: Vec2,
    pub born: f64,
    pub sparks: Vec<FireworkSpark>,
}

impl FireworkBurst {
    pub fn spawn(rng: &mut impl Rng, now: f64) -> Self {
        let origin = Vec2::new(rng.random_range(0.0..1.0), rng.random_range(0.2..0.7));
        let sparks = (0..SPARK_COUNT)
            .map(|index| {
                let angle = std::f32::consts::TAU * index as f32 / SPARK_COUNT as f32;
                let distance: f32 = 50.0 + rng.random_range(0.0..30.0);
                FireworkSpark {
                    offset: Vec2::angled(angle) * distance,
                    color: FIREWORK_COLORS[rng.random_range(0..FIREWORK_COLORS.len())],
                }
            })
            .collect();
        Self {
            origin,
            born: now,
            sparks,
        }
    }

    pub fn origin_in(&self, area_min: Pos2, area: Vec2) -> Pos2 {
        area_min + Vec2::new(self.origin.x * area.x, self.origin.y * area.y)
    }

    /// Flash progress in `0..1` while the flash is visible.
    pub fn flash_progress(&self, now: f64) -> Option<f32> {
        let age = now - self.born;
        (0.0..FLASH_SECS)
            .contains(&age)
            .then(|| (age / FLASH_SECS) as f32)
    }

    /// Spark progress in `0..1` while the sparks are in flight.
    pub fn spark_progress(&self, now: f64) -> Option<f32> {
        let age = now - self.born - SPARK_RELEASE_SECS;
        (0.0..SPARK_LIFETIME_SECS)
            .contains(&age)
            .then(|| (age / SPARK_LIFETIME_SECS) as f32)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now - self.born >= (SPARK_RELEASE_SECS + SPARK_LIFETIME_SECS).max(FLASH_SECS)
    }
}

/// Decelerating curve used for bursts.
pub fn ease_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv
}
