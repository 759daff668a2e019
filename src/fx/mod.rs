//! Decorative effects derived from simulation events
//!
//! Nothing here feeds back into gameplay. The effect system owns its own RNG
//! so a renderer can run it (or not) without changing the course.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::settings::Settings;
use crate::sim::{EffectKind, EffectTrigger, GameEvent, GameState};

const FX_STREAM: u64 = 0x5eed_f00d;

/// Player afterimage length at full trail quality
pub const PLAYER_TRAIL_LEN: usize = 15;
/// Dash afterimage length at full trail quality
pub const DASH_TRAIL_LEN: usize = 10;
/// Lifetime at which a particle is fully opaque
const FULL_ALPHA_LIFE: f32 = 20.0;

/// A static spark that fades out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub life: u32,
    pub kind: EffectKind,
}

impl Particle {
    /// Opacity in [0, 1]
    pub fn alpha(&self) -> f32 {
        (self.life as f32 / FULL_ALPHA_LIFE).min(1.0)
    }
}

/// Turns effect triggers into particles, capped at a fixed budget
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    pub particles: VecDeque<Particle>,
    pub max_particles: usize,
    rng: Pcg32,
}

impl ParticleEmitter {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            particles: VecDeque::with_capacity(max_particles),
            max_particles,
            rng: Pcg32::new(seed, FX_STREAM),
        }
    }

    /// Spawn the particles a trigger describes. Oldest particles make room
    /// once the budget is full.
    pub fn emit(&mut self, trigger: &EffectTrigger) {
        if self.max_particles == 0 || self.rng.random::<f32>() >= trigger.chance {
            return;
        }

        for _ in 0..trigger.count {
            if self.particles.len() >= self.max_particles {
                self.particles.pop_front();
            }
            let offset = Vec2::new(
                jitter(&mut self.rng, trigger.jitter.x),
                jitter(&mut self.rng, trigger.jitter.y),
            );
            let (lo, hi) = trigger.lifetime;
            let life = if hi > lo {
                self.rng.random_range(lo..=hi)
            } else {
                lo
            };
            self.particles.push_back(Particle {
                pos: trigger.origin + offset,
                life,
                kind: trigger.kind,
            });
        }
    }

    /// Age every particle by one tick
    pub fn update(&mut self) {
        self.particles.retain(|p| p.life > 0);
        for p in self.particles.iter_mut() {
            p.life -= 1;
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

fn jitter(rng: &mut Pcg32, half_extent: f32) -> f32 {
    if half_extent > 0.0 {
        rng.random_range(-half_extent..=half_extent)
    } else {
        0.0
    }
}

fn scaled_len(full: usize, settings: &Settings) -> usize {
    ((full as f32 * settings.quality.trail_quality()).round() as usize).max(1)
}

/// Fixed-length position history, newest last
#[derive(Debug, Clone)]
pub struct Trail {
    pub points: VecDeque<Vec2>,
    pub max_len: usize,
}

impl Trail {
    pub fn new(max_len: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(max_len + 1),
            max_len,
        }
    }

    pub fn push(&mut self, p: Vec2) {
        self.points.push_back(p);
        while self.points.len() > self.max_len {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Points with their fade factor, oldest (faintest) first
    pub fn faded(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        let n = self.points.len().max(1) as f32;
        self.points
            .iter()
            .enumerate()
            .map(move |(i, p)| (*p, i as f32 / n))
    }
}

/// Everything decorative a frame needs besides the game state itself
#[derive(Debug, Clone)]
pub struct EffectSystem {
    pub emitter: ParticleEmitter,
    pub player_trail: Trail,
    pub dash_trail: Trail,
    pub trails_enabled: bool,
}

impl EffectSystem {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        Self {
            emitter: ParticleEmitter::new(seed, settings.max_particles()),
            player_trail: Trail::new(scaled_len(PLAYER_TRAIL_LEN, settings)),
            dash_trail: Trail::new(scaled_len(DASH_TRAIL_LEN, settings)),
            trails_enabled: settings.trails,
        }
    }

    /// Consume one tick's events and sample the player for trails
    pub fn observe(&mut self, state: &GameState, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Effect(trigger) => self.emitter.emit(trigger),
                GameEvent::Restarted => self.reset(),
                _ => {}
            }
        }

        if state.is_paused {
            return;
        }
        self.emitter.update();

        let player = &state.player;
        if !self.trails_enabled || !player.is_alive {
            return;
        }
        self.player_trail.push(player.pos);
        if player.is_dashing {
            self.dash_trail.push(player.pos);
        } else {
            self.dash_trail.clear();
        }
    }

    pub fn reset(&mut self) {
        self.emitter.clear();
        self.player_trail.clear();
        self.dash_trail.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;
    use crate::sim::{TickInput, tick};

    fn burst(count: u32) -> EffectTrigger {
        EffectTrigger::burst(
            EffectKind::Landing,
            Vec2::new(100.0, 100.0),
            Vec2::new(10.0, 0.0),
            count,
        )
    }

    #[test]
    fn test_burst_spawns_count_within_jitter() {
        let mut emitter = ParticleEmitter::new(1, 200);
        emitter.emit(&burst(10));
        assert_eq!(emitter.particles.len(), 10);
        for p in &emitter.particles {
            assert!((90.0..=110.0).contains(&p.pos.x));
            assert_eq!(p.pos.y, 100.0);
            assert!((10..=20).contains(&p.life));
        }
    }

    #[test]
    fn test_zero_chance_never_spawns() {
        let mut emitter = ParticleEmitter::new(2, 200);
        let trigger = EffectTrigger::maybe(EffectKind::DashTrail, Vec2::ZERO, Vec2::splat(5.0), 0.0);
        for _ in 0..100 {
            emitter.emit(&trigger);
        }
        assert!(emitter.particles.is_empty());
    }

    #[test]
    fn test_budget_drops_oldest() {
        let mut emitter = ParticleEmitter::new(3, 8);
        emitter.emit(&burst(5));
        let first_new = EffectTrigger::burst(EffectKind::Jump, Vec2::new(500.0, 0.0), Vec2::ZERO, 5);
        emitter.emit(&first_new);
        assert_eq!(emitter.particles.len(), 8);
        let jumps = emitter
            .particles
            .iter()
            .filter(|p| p.kind == EffectKind::Jump)
            .count();
        assert_eq!(jumps, 5);
        assert_eq!(emitter.particles.front().map(|p| p.kind), Some(EffectKind::Landing));
        assert_eq!(emitter.particles.back().map(|p| p.kind), Some(EffectKind::Jump));
    }

    #[test]
    fn test_trail_length_follows_quality() {
        let high = EffectSystem::new(1, &Settings::from_preset(QualityPreset::High));
        assert_eq!(high.player_trail.max_len, PLAYER_TRAIL_LEN);
        assert_eq!(high.dash_trail.max_len, DASH_TRAIL_LEN);

        let medium = EffectSystem::new(1, &Settings::from_preset(QualityPreset::Medium));
        assert_eq!(medium.player_trail.max_len, 9);
        assert_eq!(medium.dash_trail.max_len, 6);

        let low = EffectSystem::new(1, &Settings::from_preset(QualityPreset::Low));
        assert_eq!(low.player_trail.max_len, 4);
        assert_eq!(low.dash_trail.max_len, 3);
    }

    #[test]
    fn test_disabled_particles() {
        let settings = Settings {
            particles: false,
            ..Settings::default()
        };
        let mut fx = EffectSystem::new(1, &settings);
        fx.emitter.emit(&burst(10));
        assert!(fx.emitter.particles.is_empty());
    }

    #[test]
    fn test_particles_fade_and_expire() {
        let mut emitter = ParticleEmitter::new(4, 200);
        emitter.emit(&burst(10));
        for _ in 0..21 {
            emitter.update();
            assert!(emitter.particles.iter().all(|p| p.alpha() <= 1.0));
        }
        assert!(emitter.particles.is_empty());
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut trail = Trail::new(PLAYER_TRAIL_LEN);
        for i in 0..40 {
            trail.push(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.points.len(), PLAYER_TRAIL_LEN);
        assert_eq!(trail.points.back(), Some(&Vec2::new(39.0, 0.0)));
        let fades: Vec<f32> = trail.faded().map(|(_, a)| a).collect();
        assert_eq!(fades[0], 0.0);
        assert!(fades.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_observe_follows_the_game() {
        let settings = Settings::from_preset(QualityPreset::High);
        let mut state = GameState::with_settings(21, &settings);
        let mut fx = EffectSystem::new(21, &settings);

        let dash = TickInput {
            dash: true,
            ..Default::default()
        };
        tick(&mut state, &dash);
        let events = state.drain_events();
        fx.observe(&state, &events);

        // Dash burst always fires
        assert!(fx.emitter.particles.iter().any(|p| p.kind == EffectKind::Dash));
        assert_eq!(fx.player_trail.points.len(), 1);
        assert_eq!(fx.dash_trail.points.len(), 1);

        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
            let events = state.drain_events();
            fx.observe(&state, &events);
        }
        assert!(fx.dash_trail.points.is_empty());
        assert!(fx.player_trail.points.len() <= PLAYER_TRAIL_LEN);
    }
}
