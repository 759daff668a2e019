//! The player state machine
//!
//! One `update` per tick runs a fixed pipeline: spaceship ride, combo decay,
//! timers, pickups, dash, gravity, wall-run, platform/wall collision, hazards,
//! then a horizontal clamp. Death stops the pipeline immediately and freezes
//! the player until the game restarts.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, circle_box_overlap, straddles_side};
use super::entities::{EntityId, Spaceship};
use super::events::{DeathCause, EffectKind, EffectTrigger, GameEvent};
use super::state::World;
use crate::consts::*;
use crate::settings::Tuning;
use crate::{combo_multiplier, ticks_to_secs};

/// Vertical speed while wall-running (px/tick)
const WALL_RUN_SPEED: f32 = 2.0;
const JUMP_PARTICLES: u32 = 5;
const LANDING_PARTICLES: u32 = 10;
const DASH_PARTICLES: u32 = 10;
const DASH_TRAIL_CHANCE: f32 = 0.3;
const SPARKLE_CHANCE: f32 = 0.3;

/// Timed effects tracked in the generic timer table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimedEffect {
    /// Present in the table but never granted by any pickup
    Shield,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the player box
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub vel_y: f32,
    /// Degrees, rendering only
    pub rotation: f32,

    pub is_alive: bool,
    pub death_cause: Option<DeathCause>,
    pub is_jumping: bool,
    pub can_double_jump: bool,
    pub is_wall_running: bool,
    /// +1 runs down the wall, -1 runs up
    pub wall_run_direction: i8,
    /// Standing on a platform as of the last update
    pub grounded: bool,

    pub combo: u32,
    pub combo_timer: u32,
    pub score_multiplier: f32,

    pub is_dashing: bool,
    pub dash_cooldown: u32,
    pub dash_timer: u32,
    pub dash_direction: i8,

    pub has_jump_powerup: bool,
    pub powerup_timer: u32,
    pub powerup_timers: BTreeMap<TimedEffect, u32>,
    pub active_effects: BTreeSet<TimedEffect>,

    pub in_spaceship: bool,
    pub current_spaceship: Option<EntityId>,
}

impl Player {
    /// Spawn at the quarter-width, mid-height start position
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new((tuning.width / 4.0).floor(), (tuning.height / 2.0).floor()),
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            vel_y: 0.0,
            rotation: 0.0,
            is_alive: true,
            death_cause: None,
            is_jumping: false,
            can_double_jump: true,
            is_wall_running: false,
            wall_run_direction: 0,
            grounded: false,
            combo: 0,
            combo_timer: 0,
            score_multiplier: 1.0,
            is_dashing: false,
            dash_cooldown: 0,
            dash_timer: 0,
            dash_direction: 0,
            has_jump_powerup: false,
            powerup_timer: 0,
            powerup_timers: BTreeMap::from([(TimedEffect::Shield, 0)]),
            active_effects: BTreeSet::new(),
            in_spaceship: false,
            current_spaceship: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Advance one tick against the current world
    pub fn update(&mut self, world: &mut World, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if !self.is_alive {
            return;
        }

        // Riding: follow the ship, no physics
        if self.in_spaceship {
            match self.current_spaceship.and_then(|id| world.spaceship(id)) {
                Some(ship) => {
                    self.pos = ship.rect().center() - Vec2::new(self.width, self.height) / 2.0;
                    return;
                }
                None => self.leave_spaceship(),
            }
        }

        if self.combo > 0 {
            self.combo_timer = self.combo_timer.saturating_sub(1);
            if self.combo_timer == 0 {
                self.combo = self.combo.saturating_sub(COMBO_DECAY);
                self.score_multiplier = combo_multiplier(self.combo);
            }
        }

        for (effect, remaining) in self.powerup_timers.iter_mut() {
            if *remaining > 0 {
                *remaining -= 1;
                if *remaining == 0 {
                    self.active_effects.remove(effect);
                }
            }
        }

        self.dash_cooldown = self.dash_cooldown.saturating_sub(1);

        if self.powerup_timer > 0 {
            self.powerup_timer -= 1;
            if self.powerup_timer == 0 {
                self.has_jump_powerup = false;
            }
        }

        for powerup in world.powerups.iter_mut() {
            if !powerup.collected && self.rect().overlaps(&powerup.rect()) {
                powerup.collected = true;
                self.has_jump_powerup = true;
                self.powerup_timer = JUMP_BOOST_DURATION;
                events.push(GameEvent::PowerupCollected { at: powerup.pos });
            }
        }

        if self.has_jump_powerup {
            events.push(GameEvent::Effect(EffectTrigger::maybe(
                EffectKind::PowerSparkle,
                self.center(),
                Vec2::new(self.width, self.height) / 2.0,
                SPARKLE_CHANCE,
            )));
        }

        if self.is_dashing {
            self.dash_timer = self.dash_timer.saturating_sub(1);
            if self.dash_timer == 0 {
                self.is_dashing = false;
            } else {
                self.pos.x += tuning.dash_speed * self.dash_direction as f32;
                events.push(GameEvent::Effect(EffectTrigger::maybe(
                    EffectKind::DashTrail,
                    self.pos,
                    Vec2::splat(5.0),
                    DASH_TRAIL_CHANCE,
                )));
            }
        }

        if self.is_wall_running {
            self.vel_y = 0.0;
            self.pos.y += WALL_RUN_SPEED * self.wall_run_direction as f32;
            self.rotation = if self.wall_run_direction == 1 { 90.0 } else { -90.0 };
            self.can_double_jump = true;
        } else {
            self.vel_y += tuning.gravity;
            self.pos.y += self.vel_y;
        }

        self.resolve_platforms(world, events);
        self.resolve_walls(world);

        if world.spikes.iter().any(|s| self.rect().overlaps(&s.rect())) {
            self.die(DeathCause::Spike);
            return;
        }

        let body = self.rect();
        let shot = world
            .monsters
            .iter()
            .flat_map(|m| m.projectiles.iter())
            .any(|p| circle_box_overlap(p.pos, p.radius, &body));
        if shot {
            self.die(DeathCause::Projectile);
            return;
        }

        self.pos.x = self.pos.x.clamp(0.0, tuning.width - self.width);
    }

    fn resolve_platforms(&mut self, world: &World, events: &mut Vec<GameEvent>) {
        let mut landed = false;
        for platform in &world.platforms {
            if !self.rect().overlaps(&platform.rect()) {
                continue;
            }
            if self.vel_y > 0.0 {
                self.pos.y = platform.pos.y - self.height;
                self.vel_y = 0.0;
                self.is_jumping = false;
                self.is_wall_running = false;
                self.rotation = 0.0;
                self.can_double_jump = true;
                landed = true;
            } else if self.vel_y < 0.0 {
                // Head bump
                self.pos.y = platform.pos.y + platform.height;
                self.vel_y = 0.0;
            }
        }

        // Standing re-lands every tick; only the touchdown gets dust
        if landed && !self.grounded {
            events.push(GameEvent::Effect(EffectTrigger::burst(
                EffectKind::Landing,
                Vec2::new(self.pos.x, self.pos.y + self.height),
                Vec2::new(10.0, 0.0),
                LANDING_PARTICLES,
            )));
        }
        self.grounded = landed;
    }

    fn resolve_walls(&mut self, world: &World) {
        for platform in &world.platforms {
            if self.is_wall_running || self.vel_y <= 0.0 {
                continue;
            }
            if straddles_side(&self.rect(), &platform.rect()) {
                self.is_wall_running = true;
                self.is_jumping = false;
                self.wall_run_direction = if self.pos.x < platform.pos.x { 1 } else { -1 };
                self.vel_y = 0.0;
                self.can_double_jump = true;
            }
        }
    }

    fn die(&mut self, cause: DeathCause) {
        self.is_alive = false;
        self.death_cause = Some(cause);
    }

    /// Start a jump. Ignored mid-jump, while riding, or when dead.
    pub fn jump(&mut self, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if self.is_jumping || !self.is_alive || self.in_spaceship {
            return;
        }

        self.vel_y = if self.has_jump_powerup {
            tuning.jump_force * JUMP_BOOST_FACTOR
        } else {
            tuning.jump_force
        };
        self.is_jumping = true;
        self.is_wall_running = false;
        self.combo += 1;
        self.combo_timer = COMBO_WINDOW;
        self.score_multiplier = combo_multiplier(self.combo);

        let count = if self.has_jump_powerup {
            JUMP_PARTICLES * 2
        } else {
            JUMP_PARTICLES
        };
        events.push(GameEvent::Jumped {
            combo: self.combo,
            boosted: self.has_jump_powerup,
        });
        events.push(GameEvent::Effect(EffectTrigger::burst(
            EffectKind::Jump,
            Vec2::new(self.pos.x, self.pos.y + self.height),
            Vec2::new(5.0, 0.0),
            count,
        )));
    }

    /// Start a dash away from the nearer screen half. Ignored on cooldown.
    pub fn dash(&mut self, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if self.dash_cooldown > 0 || !self.is_alive || self.in_spaceship {
            return;
        }

        self.is_dashing = true;
        self.dash_cooldown = tuning.dash_cooldown;
        self.dash_timer = tuning.dash_duration;
        self.dash_direction = if self.pos.x < (tuning.width / 2.0).floor() { 1 } else { -1 };
        self.vel_y = 0.0;

        events.push(GameEvent::DashStarted {
            direction: self.dash_direction,
        });
        events.push(GameEvent::Effect(EffectTrigger::burst(
            EffectKind::Dash,
            self.pos,
            Vec2::splat(5.0),
            DASH_PARTICLES,
        )));
    }

    pub fn move_left(&mut self, tuning: &Tuning) {
        self.pos.x -= tuning.move_speed;
    }

    pub fn move_right(&mut self, tuning: &Tuning) {
        self.pos.x += tuning.move_speed;
    }

    /// Take a seat in `ship`
    pub fn board(&mut self, ship: &Spaceship) {
        self.in_spaceship = true;
        self.current_spaceship = Some(ship.id);
        self.pos = ship.rect().center() - Vec2::new(self.width, self.height) / 2.0;
        self.vel_y = 0.0;
        self.is_jumping = false;
        self.is_wall_running = false;
        self.is_dashing = false;
        self.can_double_jump = true;
    }

    /// Drop out of the current ship where it is
    pub fn leave_spaceship(&mut self) {
        self.in_spaceship = false;
        self.current_spaceship = None;
        self.vel_y = 0.0;
    }

    /// Whole seconds of jump boost left, if any
    pub fn powerup_seconds(&self) -> Option<u32> {
        self.has_jump_powerup.then(|| ticks_to_secs(self.powerup_timer))
    }

    /// HUD shows the combo label from the second chained jump on
    pub fn shows_combo(&self) -> bool {
        self.combo > 1
    }
}
