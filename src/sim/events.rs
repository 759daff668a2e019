//! Events emitted by the simulation for presentation layers
//!
//! The simulation never owns particles. It describes bursts with
//! [`EffectTrigger`] and lets the renderer spawn whatever it likes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::EntityId;

/// What produced a burst of decorative particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Jump,
    Landing,
    Dash,
    DashTrail,
    PowerSparkle,
    Engine,
    Boarding,
}

/// Description of a particle burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectTrigger {
    pub kind: EffectKind,
    /// Spawn centre
    pub origin: Vec2,
    /// Half-extents of the uniform spawn jitter around `origin`
    pub jitter: Vec2,
    /// Particles to spawn
    pub count: u32,
    /// Probability that the burst happens at all this tick
    pub chance: f32,
    /// Particle lifetime range in ticks (inclusive)
    pub lifetime: (u32, u32),
}

impl EffectTrigger {
    /// A burst that always fires, with the common 10..=20 tick lifetime
    pub fn burst(kind: EffectKind, origin: Vec2, jitter: Vec2, count: u32) -> Self {
        Self {
            kind,
            origin,
            jitter,
            count,
            chance: 1.0,
            lifetime: (10, 20),
        }
    }

    /// A single particle that spawns with probability `chance`
    pub fn maybe(kind: EffectKind, origin: Vec2, jitter: Vec2, chance: f32) -> Self {
        Self {
            chance,
            ..Self::burst(kind, origin, jitter, 1)
        }
    }
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Spike,
    Projectile,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Effect(EffectTrigger),
    Jumped { combo: u32, boosted: bool },
    DashStarted { direction: i8 },
    PowerupCollected { at: Vec2 },
    SpaceshipBoarded { id: EntityId },
    SpaceshipReleased { id: EntityId },
    Died { cause: DeathCause, score: u64 },
    Restarted,
}
