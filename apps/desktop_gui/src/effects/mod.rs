//! Seasonal decoration drawn over the panel.
//!
//! [`ParticleEffects`] owns whatever is currently running and hands back
//! [`Sprite`]s for the view to paint. It never reads the clock itself; every
//! call takes `now` in seconds so frames and tests drive it the same way.

pub mod particles;
pub mod scheduler;
pub mod seasonal;

use std::time::Duration;

use egui::{Color32, Pos2, Rect};
use rand::{rngs::StdRng, Rng, SeedableRng};

use particles::{ease_out, FallingParticle, FireworkBurst};
use scheduler::ScheduledTask;
use seasonal::{scaled_count, SeasonalEffect};

const FIREWORK_BASE_INTERVAL_MS: u64 = 800;
const FIREWORK_MIN_INTERVAL_MS: u64 = 200;
const FIREWORK_INITIAL_SPACING_SECS: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub enum Sprite {
    Glyph {
        text: &'static str,
        center: Pos2,
        size: f32,
        rotation_deg: f32,
        opacity: f32,
    },
    Dot {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
}

#[derive(Debug)]
enum ActiveEffect {
    Swarm {
        effect: SeasonalEffect,
        started: f64,
        particles: Vec<FallingParticle>,
    },
    Fireworks(FireworksShow),
}

#[derive(Debug)]
struct FireworksShow {
    task: ScheduledTask,
    /// One-shot bursts queued at startup.
    pending: Vec<f64>,
    bursts: Vec<FireworkBurst>,
}

/// `max(200ms, 800ms * 100 / density)`; density 0 is treated as 1.
pub fn firework_interval(density: u32) -> Duration {
    let density = u64::from(density.max(1));
    Duration::from_millis((FIREWORK_BASE_INTERVAL_MS * 100 / density).max(FIREWORK_MIN_INTERVAL_MS))
}

pub fn initial_firework_count(density: u32) -> usize {
    scaled_count(3, density)
}

pub struct ParticleEffects {
    active: Option<ActiveEffect>,
    rng: StdRng,
}

impl Default for ParticleEffects {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleEffects {
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            active: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn active(&self) -> Option<SeasonalEffect> {
        match &self.active {
            Some(ActiveEffect::Swarm { effect, .. }) => Some(*effect),
            Some(ActiveEffect::Fireworks(_)) => Some(SeasonalEffect::Fireworks),
            None => None,
        }
    }

    /// Replaces whatever is running. The old fireworks task is cancelled first.
    pub fn apply(&mut self, effect: Option<SeasonalEffect>, density: u32, now: f64) {
        self.stop();
        let Some(effect) = effect else {
            return;
        };

        self.active = Some(match effect.swarm() {
            Some(spec) => {
                let count = scaled_count(spec.base_count, density);
                let particles = (0..count)
                    .map(|_| FallingParticle::spawn(&spec, &mut self.rng))
                    .collect();
                ActiveEffect::Swarm {
                    effect,
                    started: now,
                    particles,
                }
            }
            None => {
                let pending = (0..initial_firework_count(density))
                    .map(|index| now + index as f64 * FIREWORK_INITIAL_SPACING_SECS)
                    .collect();
                ActiveEffect::Fireworks(FireworksShow {
                    task: ScheduledTask::every(firework_interval(density), now),
                    pending,
                    bursts: Vec::new(),
                })
            }
        });
        tracing::debug!(effect = effect.label(), density, "seasonal effect started");
    }

    pub fn stop(&mut self) {
        if let Some(ActiveEffect::Fireworks(show)) = &mut self.active {
            show.task.cancel();
        }
        if let Some(previous) = self.active.take() {
            tracing::debug!(effect = previous_label(&previous), "seasonal effect stopped");
        }
    }

    /// Advances timers: launches due bursts and drops finished ones.
    pub fn tick(&mut self, now: f64) {
        let Some(ActiveEffect::Fireworks(show)) = &mut self.active else {
            return;
        };
        let mut launches = usize::from(show.task.poll(now));
        let before = show.pending.len();
        show.pending.retain(|due| *due > now);
        launches += before - show.pending.len();

        for _ in 0..launches {
            show.bursts.push(FireworkBurst::spawn(&mut self.rng, now));
        }
        show.bursts.retain(|burst| !burst.is_finished(now));
    }

    pub fn burst_count(&self) -> usize {
        match &self.active {
            Some(ActiveEffect::Fireworks(show)) => show.bursts.len(),
            _ => 0,
        }
    }

    pub fn particle_count(&self) -> usize {
        match &self.active {
            Some(ActiveEffect::Swarm { particles, .. }) => particles.len(),
            _ => 0,
        }
    }

    pub fn sprites(&self, now: f64, area: Rect) -> Vec<Sprite> {
        let Some(active) = &self.active else {
            return Vec::new();
        };
        let size = area.size();
        match active {
            ActiveEffect::Swarm {
                started, particles, ..
            } => particles
                .iter()
                .filter_map(|particle| {
                    let pose = particle.pose(now - started, size)?;
                    Some(Sprite::Glyph {
                        text: particle.glyph,
                        center: area.min + pose.center.to_vec2(),
                        size: pose.size,
                        rotation_deg: pose.rotation_deg,
                        opacity: pose.opacity,
                    })
                })
                .collect(),
            ActiveEffect::Fireworks(show) => {
                let mut sprites = Vec::new();
                for burst in &show.bursts {
                    let origin = burst.origin_in(area.min, size);
                    if let Some(progress) = burst.flash_progress(now) {
                        sprites.push(Sprite::Dot {
                            center: origin,
                            radius: 2.0 + 6.0 * ease_out(progress),
                            color: Color32::WHITE.gamma_multiply(1.0 - progress),
                        });
                    }
                    if let Some(progress) = burst.spark_progress(now) {
                        let travel = ease_out(progress);
                        sprites.extend(burst.sparks.iter().map(|spark| Sprite::Dot {
                            center: origin + spark.offset * travel,
                            radius: 1.5,
                            color: spark.color.gamma_multiply(1.0 - progress),
                        }));
                    }
                }
                sprites
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }
}

fn previous_label(effect: &ActiveEffect) -> &'static str {
    match effect {
        ActiveEffect::Swarm { effect, .. } => effect.label(),
        ActiveEffect::Fireworks(_) => SeasonalEffect::Fireworks.label(),
    }
}

#[cfg(test)]
#[path = "tests/effects_tests.rs"]
mod tests;
