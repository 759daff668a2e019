//! Demo player
//!
//! A greedy controller that reads the game state and produces input. It is
//! good enough to keep the attract loop and the headless runner interesting,
//! not to play well.

use crate::sim::entities::SPIKE_SIZE;
use crate::sim::{GameState, TickInput};

/// Preferred horizontal band for the player
const HOME_MIN_X: f32 = 180.0;
const HOME_MAX_X: f32 = 320.0;
/// How far ahead hazards trigger a jump
const LOOKAHEAD: f32 = 60.0;
/// Jump this close to the end of the platform
const EDGE_MARGIN: f32 = 12.0;
/// Projectiles inside this radius trigger a dash
const DODGE_RADIUS: f32 = 60.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Press restart after a death
    pub auto_restart: bool,
    pub runs_finished: u32,
}

impl Autopilot {
    pub fn new(auto_restart: bool) -> Self {
        Self {
            auto_restart,
            runs_finished: 0,
        }
    }

    /// Input for the next tick
    pub fn input(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();
        let player = &state.player;

        if !player.is_alive {
            if self.auto_restart {
                input.restart = true;
                self.runs_finished += 1;
            }
            return input;
        }
        if state.is_paused || player.in_spaceship {
            return input;
        }

        if player.pos.x < HOME_MIN_X {
            input.move_right = true;
        } else if player.pos.x > HOME_MAX_X {
            input.move_left = true;
        }

        let front = player.pos.x + player.width;
        let feet = player.pos.y + player.height;

        let spike_ahead = state.world.spikes.iter().any(|s| {
            s.pos.x + SPIKE_SIZE > player.pos.x
                && s.pos.x < front + LOOKAHEAD
                && (s.pos.y - feet).abs() < 40.0
        });

        let edge_ahead = player.grounded
            && state
                .world
                .platforms
                .iter()
                .find(|p| p.pos.y == feet && p.pos.x < front && p.pos.x + p.width > player.pos.x)
                .is_some_and(|p| p.pos.x + p.width - front < EDGE_MARGIN);

        let ship_here = state
            .world
            .spaceships
            .iter()
            .any(|s| !s.is_active && s.rect().overlaps(&player.rect()));

        input.jump = spike_ahead || edge_ahead || ship_here;

        let center = player.center();
        let incoming = state
            .world
            .monsters
            .iter()
            .flat_map(|m| m.projectiles.iter())
            .any(|p| p.pos.distance(center) < DODGE_RADIUS);
        input.dash = incoming && player.dash_cooldown == 0;

        input
    }
}
