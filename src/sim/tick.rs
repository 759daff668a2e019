//! Fixed timestep simulation tick
//!
//! Core game loop that advances the run by one frame.

use super::events::{EffectKind, EffectTrigger, GameEvent};
use super::generator::generate_next;
use super::state::GameState;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held movement keys (left wins when both are down)
    pub move_left: bool,
    pub move_right: bool,
    /// One-shot presses
    pub jump: bool,
    pub dash: bool,
    pub pause: bool,
    /// Only honoured after death
    pub restart: bool,
    /// Wall-clock milliseconds since start. Derived from the tick counter when
    /// absent.
    pub elapsed_ms: Option<u64>,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    handle_input(state, input);

    if state.is_paused {
        return;
    }

    state.screen_shake = state.screen_shake.saturating_sub(1);
    state.time_ticks += 1;
    state.clock_ms = input
        .elapsed_ms
        .unwrap_or_else(|| state.tuning.ticks_to_ms(state.time_ticks));

    if state.game_over || !state.player.is_alive {
        return;
    }

    // Monsters aim where the player was at the start of the tick
    let target = state.player.center();
    state
        .world
        .advance(target, &state.tuning, state.time_ticks);
    state.ambient.update(state.clock_ms, &state.tuning);
    state.world.prune();

    state
        .player
        .update(&mut state.world, &state.tuning, &mut state.events);

    generate_next(
        &mut state.world,
        state.score,
        state.clock_ms,
        &mut state.last_spaceship_ms,
        &mut state.rng,
        &state.tuning,
    );

    state.score += 1;
    state.run_ticks += 1;
    state.tutorial.advance();

    update_spaceships(state);

    if !state.player.is_alive {
        end_run(state);
    }
}

fn handle_input(state: &mut GameState, input: &TickInput) {
    if input.pause {
        state.is_paused = !state.is_paused;
        log::debug!("Paused: {}", state.is_paused);
    }

    if !state.is_paused && state.player.is_alive {
        if input.dash {
            state.player.dash(&state.tuning, &mut state.events);
            let started = state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::DashStarted { .. }));
            if started && state.shake_enabled {
                state.screen_shake = SCREEN_SHAKE_DASH;
            }
        }

        if input.jump {
            try_board_or_jump(state);
        }
    }

    if input.restart && !state.player.is_alive {
        state.restart();
    }

    if !state.is_paused && state.player.is_alive {
        if input.move_left {
            state.player.move_left(&state.tuning);
        } else if input.move_right {
            state.player.move_right(&state.tuning);
        }
    }
}

/// Jump, unless the player is touching an idle spaceship, which boards it
fn try_board_or_jump(state: &mut GameState) {
    if state.player.in_spaceship {
        return;
    }

    let body = state.player.rect();
    let ship = state
        .world
        .spaceships
        .iter_mut()
        .find(|s| !s.is_active && s.rect().overlaps(&body));

    match ship {
        Some(ship) => {
            ship.board();
            state.player.board(ship);
            state.events.push(GameEvent::SpaceshipBoarded { id: ship.id });
            state.events.push(GameEvent::Effect(EffectTrigger::burst(
                EffectKind::Boarding,
                ship.rect().center(),
                glam::Vec2::new(30.0, 15.0),
                10,
            )));
            log::info!("Boarded spaceship {}", ship.id);
        }
        None => state.player.jump(&state.tuning, &mut state.events),
    }
}

/// Fly active ships, drop finished or lost ones and release their rider
fn update_spaceships(state: &mut GameState) {
    for ship in &mut state.world.spaceships {
        ship.update(&state.tuning, &mut state.events);
    }

    let rider = state.player.current_spaceship;
    let mut released = None;
    state.world.spaceships.retain(|ship| {
        let done = ship.finished_travel() || ship.is_off_screen();
        if done && rider == Some(ship.id) {
            released = Some(ship.id);
        }
        !done
    });

    if let Some(id) = released {
        state.player.leave_spaceship();
        state.events.push(GameEvent::SpaceshipReleased { id });
        log::info!("Spaceship {id} finished its flight");
    }
}

fn end_run(state: &mut GameState) {
    if state.game_over {
        return;
    }
    state.game_over = true;

    let Some(cause) = state.player.death_cause else {
        log::warn!("Player died without a recorded cause");
        return;
    };
    state.events.push(GameEvent::Died {
        cause,
        score: state.score,
    });
    log::info!(
        "Run over: {:?} after {} ticks, score {}",
        cause,
        state.run_ticks,
        state.score
    );

    if let Some(rank) = state
        .highscores
        .add_score(state.score, state.run_ticks, state.seed)
    {
        log::info!("Session high score #{rank}: {}", state.score);
    }
}
