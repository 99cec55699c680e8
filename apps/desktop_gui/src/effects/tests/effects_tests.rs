use super::*;
use egui::{pos2, vec2};

fn area() -> Rect {
    Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 300.0))
}

#[test]
fn firework_interval_shrinks_with_density_but_not_below_floor() {
    assert_eq!(firework_interval(100), Duration::from_millis(800));
    assert_eq!(firework_interval(50), Duration::from_millis(1600));
    assert_eq!(firework_interval(200), Duration::from_millis(400));
    assert_eq!(firework_interval(500), Duration::from_millis(200));
    assert_eq!(firework_interval(0), Duration::from_millis(80_000));
}

#[test]
fn initial_bursts_scale_with_density() {
    assert_eq!(initial_firework_count(100), 3);
    assert_eq!(initial_firework_count(50), 1);
    assert_eq!(initial_firework_count(10), 0);
    assert_eq!(initial_firework_count(200), 6);
}

#[test]
fn swarm_size_follows_density() {
    let mut effects = ParticleEffects::with_seed(1);
    effects.apply(Some(SeasonalEffect::Snow), 150, 0.0);
    assert_eq!(effects.active(), Some(SeasonalEffect::Snow));
    assert_eq!(effects.particle_count(), 75);

    effects.apply(Some(SeasonalEffect::Hearts), 10, 0.0);
    assert_eq!(effects.active(), Some(SeasonalEffect::Hearts));
    assert_eq!(effects.particle_count(), 4);
}

#[test]
fn swarm_sprites_appear_once_delays_pass() {
    let mut effects = ParticleEffects::with_seed(9);
    effects.apply(Some(SeasonalEffect::Christmas), 100, 5.0);
    assert!(effects.sprites(5.0, area()).len() <= 50);
    let later = effects.sprites(7.5, area());
    assert_eq!(later.len(), 50);
    assert!(later.iter().all(|sprite| matches!(sprite, Sprite::Glyph { text, .. } if !text.is_empty())));
}

#[test]
fn fireworks_launch_initial_bursts_then_on_interval() {
    let mut effects = ParticleEffects::with_seed(4);
    effects.apply(Some(SeasonalEffect::Fireworks), 100, 0.0);
    assert_eq!(effects.active(), Some(SeasonalEffect::Fireworks));

    effects.tick(0.0);
    assert_eq!(effects.burst_count(), 1);
    effects.tick(0.5);
    assert_eq!(effects.burst_count(), 2);
    effects.tick(1.0);
    // third initial burst plus the first 800ms interval tick
    assert_eq!(effects.burst_count(), 4);
    assert!(!effects.sprites(1.0, area()).is_empty());

    effects.tick(10.0);
    assert!(effects.burst_count() >= 1);
}

#[test]
fn hidden_panel_does_not_replay_missed_fireworks() {
    let mut effects = ParticleEffects::with_seed(4);
    effects.apply(Some(SeasonalEffect::Fireworks), 100, 0.0);
    effects.tick(0.0);
    effects.tick(3600.0);
    // remaining initial bursts plus a single interval firing
    assert_eq!(effects.burst_count(), 3);
    let sprites = effects.sprites(3600.2, area());
    assert!(sprites.len() <= 3 * (particles::SPARK_COUNT + 1));

    effects.tick(3600.4);
    assert_eq!(effects.burst_count(), 3);
    effects.tick(3601.0);
    assert_eq!(effects.burst_count(), 4);
}

#[test]
fn finished_bursts_are_dropped() {
    let mut effects = ParticleEffects::with_seed(4);
    effects.apply(Some(SeasonalEffect::Fireworks), 10, 0.0);
    effects.tick(7.9);
    assert_eq!(effects.burst_count(), 0);
    effects.tick(8.0);
    assert_eq!(effects.burst_count(), 1);
    effects.tick(9.7);
    assert_eq!(effects.burst_count(), 0);
}

#[test]
fn stopping_clears_everything() {
    let mut effects = ParticleEffects::with_seed(2);
    effects.apply(Some(SeasonalEffect::Fireworks), 100, 0.0);
    effects.tick(0.0);
    effects.stop();
    assert_eq!(effects.active(), None);
    assert!(!effects.is_animating());
    effects.tick(5.0);
    assert_eq!(effects.burst_count(), 0);
    assert!(effects.sprites(5.0, area()).is_empty());
}

#[test]
fn applying_nothing_leaves_effects_off() {
    let mut effects = ParticleEffects::with_seed(2);
    effects.apply(Some(SeasonalEffect::Leaves), 100, 0.0);
    effects.apply(None, 100, 0.0);
    assert_eq!(effects.active(), None);
}
