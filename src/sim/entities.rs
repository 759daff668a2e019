//! World entities: platforms, spikes, monsters, powerups and spaceships
//!
//! Positions are the top-left corner of each entity's box in screen space.
//! Everything except idle spaceships scrolls left once per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::events::{EffectKind, EffectTrigger, GameEvent};
use crate::settings::Tuning;

/// Handle for arena-owned entities that other entities refer to
pub type EntityId = u32;

pub const SPIKE_SIZE: f32 = 20.0;
pub const MONSTER_SIZE: f32 = 30.0;
pub const POWERUP_SIZE: f32 = 20.0;
pub const SPACESHIP_WIDTH: f32 = 60.0;
pub const SPACESHIP_HEIGHT: f32 = 30.0;

/// Ticks between monster shots
pub const SHOOT_DELAY: u32 = 120;
pub const PROJECTILE_SPEED: f32 = 7.0;
pub const PROJECTILE_RADIUS: f32 = 5.0;

/// Powerup bobbing (cosmetic)
const FLOAT_AMPLITUDE: f32 = 5.0;
const FLOAT_SPEED: f32 = 1.6;

pub const TRAVEL_DISTANCE: f32 = 500.0;
pub const TRAVEL_SPEED: f32 = 10.0;
pub const MAX_BOARDING_TIME: u32 = 180;
const ENGINE_PARTICLE_CHANCE: f32 = 0.3;
const BOARDING_PARTICLE_CHANCE: f32 = 0.2;

/// Solid ground the player can land on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Carried for level data; collision treats every platform alike
    pub is_wall: bool,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height,
            is_wall: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn update(&mut self, tuning: &Tuning) {
        self.pos.x -= tuning.scroll_speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.width <= 0.0
    }
}

/// Static hazard, fatal on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spike {
    pub pos: Vec2,
}

impl Spike {
    pub fn new(x: f32, y: f32) -> Self {
        Self { pos: Vec2::new(x, y) }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, SPIKE_SIZE, SPIKE_SIZE)
    }

    pub fn update(&mut self, tuning: &Tuning) {
        self.pos.x -= tuning.scroll_speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + SPIKE_SIZE <= 0.0
    }
}

/// A shot fired by a monster. Velocity is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    /// Aim from `origin` at `target`. A zero-length aim produces a shot that
    /// never moves.
    pub fn aimed(origin: Vec2, target: Vec2) -> Self {
        Self {
            pos: origin,
            vel: (target - origin).normalize_or_zero() * PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn in_bounds(&self, tuning: &Tuning) -> bool {
        (0.0..=tuning.width).contains(&self.pos.x) && (0.0..=tuning.height).contains(&self.pos.y)
    }
}

/// Hostile shooter. Fires at the player on a fixed cadence regardless of range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub pos: Vec2,
    pub shoot_cooldown: u32,
    pub shoot_delay: u32,
    pub projectiles: Vec<Projectile>,
}

impl Monster {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            shoot_cooldown: 0,
            shoot_delay: SHOOT_DELAY,
            projectiles: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, MONSTER_SIZE, MONSTER_SIZE)
    }

    /// Scroll, fire at `target` when ready, move and cull projectiles
    pub fn update(&mut self, target: Vec2, tuning: &Tuning) {
        self.pos.x -= tuning.scroll_speed;
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);

        if self.shoot_cooldown == 0 {
            self.shoot(target);
            self.shoot_cooldown = self.shoot_delay;
        }

        for projectile in &mut self.projectiles {
            projectile.update();
        }
        self.projectiles.retain(|p| p.in_bounds(tuning));
    }

    pub fn shoot(&mut self, target: Vec2) {
        let origin = self.rect().center();
        self.projectiles.push(Projectile::aimed(origin, target));
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + MONSTER_SIZE <= 0.0
    }
}

/// Jump boost pickup. Collection is terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub pos: Vec2,
    pub collected: bool,
    /// Vertical bob for rendering only
    pub float_offset: f32,
}

impl Powerup {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            collected: false,
            float_offset: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, POWERUP_SIZE, POWERUP_SIZE)
    }

    pub fn update(&mut self, tuning: &Tuning, time_ticks: u64) {
        self.pos.x -= tuning.scroll_speed;
        self.float_offset = (time_ticks as f32 * FLOAT_SPEED).sin() * FLOAT_AMPLITUDE;
    }

    /// Collected or scrolled away
    pub fn is_spent(&self) -> bool {
        self.collected || self.pos.x + POWERUP_SIZE <= 0.0
    }
}

/// Transport that carries the player forward once boarded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spaceship {
    pub id: EntityId,
    pub pos: Vec2,
    pub is_active: bool,
    pub player_aboard: bool,
    pub travel_distance: f32,
    pub travel_speed: f32,
    pub travel_progress: f32,
    pub boarding_timer: u32,
    pub max_boarding_time: u32,
    /// Idle glow pulse for rendering only, oscillates in [0, 2]
    pub pulse: f32,
    pulse_direction: f32,
}

impl Spaceship {
    pub fn new(id: EntityId, x: f32, y: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            is_active: false,
            player_aboard: false,
            travel_distance: TRAVEL_DISTANCE,
            travel_speed: TRAVEL_SPEED,
            travel_progress: 0.0,
            boarding_timer: 0,
            max_boarding_time: MAX_BOARDING_TIME,
            pulse: 0.0,
            pulse_direction: 1.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, SPACESHIP_WIDTH, SPACESHIP_HEIGHT)
    }

    /// Activate and take the player aboard
    pub fn board(&mut self) {
        self.is_active = true;
        self.player_aboard = true;
    }

    /// Boarding progress in [0, 1] for the HUD bar
    pub fn boarding_progress(&self) -> f32 {
        (self.boarding_timer as f32 / self.max_boarding_time.max(1) as f32).min(1.0)
    }

    pub fn update(&mut self, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        self.pulse += 0.1 * self.pulse_direction;
        if !(0.0..=2.0).contains(&self.pulse) {
            self.pulse_direction = -self.pulse_direction;
        }

        if self.is_active || self.player_aboard {
            events.push(GameEvent::Effect(EffectTrigger::maybe(
                EffectKind::Engine,
                Vec2::new(self.pos.x - 10.0, self.pos.y + SPACESHIP_HEIGHT / 2.0),
                Vec2::new(0.0, SPACESHIP_HEIGHT / 2.0),
                ENGINE_PARTICLE_CHANCE,
            )));
            self.pos.x += self.travel_speed;
            self.travel_progress += self.travel_speed;
        } else if tuning.scroll_idle_spaceships {
            self.pos.x -= tuning.scroll_speed;
        }

        if self.player_aboard {
            self.boarding_timer += 1;
            events.push(GameEvent::Effect(EffectTrigger::maybe(
                EffectKind::Boarding,
                self.rect().center(),
                Vec2::new(SPACESHIP_WIDTH / 2.0, SPACESHIP_HEIGHT / 2.0),
                BOARDING_PARTICLE_CHANCE,
            )));
        }
    }

    pub fn finished_travel(&self) -> bool {
        self.is_active && self.travel_progress >= self.travel_distance
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + SPACESHIP_WIDTH < 0.0
    }
}
