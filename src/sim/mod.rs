//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only (the ambient sky draws from its own stream)
//! - No rendering or platform dependencies

pub mod ambient;
pub mod collision;
pub mod entities;
pub mod events;
pub mod generator;
pub mod player;
pub mod rng;
pub mod state;
pub mod tick;
pub mod tutorial;

pub use collision::{Rect, aabb_overlap, circle_box_overlap};
pub use entities::{EntityId, Monster, Platform, Powerup, Projectile, Spaceship, Spike};
pub use events::{DeathCause, EffectKind, EffectTrigger, GameEvent};
pub use generator::{generate_initial, generate_next};
pub use player::{Player, TimedEffect};
pub use rng::RandomSource;
pub use state::{GameState, World};
pub use tick::{TickInput, tick};
