//! Game state and the entity arenas
//!
//! `GameState` is everything a presentation layer needs to draw a frame.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ambient::AmbientSky;
use super::entities::{EntityId, Monster, Platform, Powerup, Spaceship, Spike};
use super::events::GameEvent;
use super::generator::generate_initial;
use super::player::Player;
use super::rng::seeded;
use super::tutorial::Tutorial;
use crate::highscores::HighScores;
use crate::settings::{Settings, Tuning};

/// Owner of every gameplay entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub platforms: Vec<Platform>,
    pub spikes: Vec<Spike>,
    pub monsters: Vec<Monster>,
    pub powerups: Vec<Powerup>,
    pub spaceships: Vec<Spaceship>,
    #[serde(default)]
    pub next_id: EntityId,
}

impl World {
    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        self.next_id += 1;
        self.next_id
    }

    pub fn spaceship(&self, id: EntityId) -> Option<&Spaceship> {
        self.spaceships.iter().find(|s| s.id == id)
    }

    /// Scroll the passive entities. Monsters aim at `target`.
    pub fn advance(&mut self, target: Vec2, tuning: &Tuning, time_ticks: u64) {
        for platform in &mut self.platforms {
            platform.update(tuning);
        }
        for spike in &mut self.spikes {
            spike.update(tuning);
        }
        for monster in &mut self.monsters {
            monster.update(target, tuning);
        }
        for powerup in &mut self.powerups {
            powerup.update(tuning, time_ticks);
        }
    }

    /// Drop entities that scrolled away and powerups already taken
    pub fn prune(&mut self) {
        self.platforms.retain(|p| !p.is_off_screen());
        self.spikes.retain(|s| !s.is_off_screen());
        self.monsters.retain(|m| !m.is_off_screen());
        self.powerups.retain(|p| !p.is_spent());
    }

    pub fn clear(&mut self) {
        self.platforms.clear();
        self.spikes.clear();
        self.monsters.clear();
        self.powerups.clear();
        self.spaceships.clear();
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Course generation draws
    #[serde(skip)]
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub player: Player,
    pub world: World,
    pub score: u64,
    /// Ticks simulated since the session started (pauses excluded)
    pub time_ticks: u64,
    /// Ticks in the current run
    pub run_ticks: u64,
    /// Wall-clock time seen by the last tick
    pub clock_ms: u64,
    pub last_spaceship_ms: u64,
    pub game_over: bool,
    pub is_paused: bool,
    /// Remaining shake ticks, presentation hint only
    pub screen_shake: u32,
    /// Dash starts shake the screen
    pub shake_enabled: bool,
    pub ambient: AmbientSky,
    pub tutorial: Tutorial,
    pub highscores: HighScores,
    /// Events produced by the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: seeded(seed),
            player: Player::new(&tuning),
            world: World::default(),
            score: 0,
            time_ticks: 0,
            run_ticks: 0,
            clock_ms: 0,
            last_spaceship_ms: 0,
            game_over: false,
            is_paused: false,
            screen_shake: 0,
            shake_enabled: true,
            ambient: AmbientSky::new(seed),
            tutorial: Tutorial::default(),
            highscores: HighScores::new(),
            events: Vec::new(),
            tuning,
        };
        generate_initial(&mut state.world, &mut state.rng, &state.tuning);
        log::info!("New game (seed {seed})");
        state
    }

    /// Create a game from loaded settings
    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let mut state = Self::with_tuning(seed, settings.tuning.clone());
        state.ambient.enabled = settings.ambient_sky;
        state.shake_enabled = settings.effective_screen_shake();
        if !settings.show_tutorial {
            state.tutorial.skip();
        }
        state
    }

    /// Fresh run: new player and course, score reset. The session leaderboard,
    /// the clock and the tutorial progress carry over.
    pub fn restart(&mut self) {
        self.player = Player::new(&self.tuning);
        self.world.clear();
        generate_initial(&mut self.world, &mut self.rng, &self.tuning);
        self.score = 0;
        self.run_ticks = 0;
        self.game_over = false;
        self.last_spaceship_ms = 0;
        self.events.push(GameEvent::Restarted);
        log::info!("Restarted (best this session: {})", self.highscores.best());
    }

    /// Take the events produced by the last tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spaceship the player is riding, if any
    pub fn current_spaceship(&self) -> Option<&Spaceship> {
        self.player
            .current_spaceship
            .and_then(|id| self.world.spaceship(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_layout() {
        let state = GameState::new(42);
        assert_eq!(state.world.platforms.len(), 6);
        assert_eq!(state.player.pos, Vec2::new(200.0, 300.0));
        assert!(state.player.is_alive);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut world = World::default();
        let a = world.next_entity_id();
        let b = world.next_entity_id();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_prune() {
        let mut world = World {
            platforms: vec![
                Platform::new(-150.0, 400.0, 150.0, 30.0),
                Platform::new(-149.0, 400.0, 150.0, 30.0),
            ],
            spikes: vec![Spike::new(-20.0, 0.0)],
            powerups: vec![Powerup::new(100.0, 100.0), Powerup::new(200.0, 100.0)],
            ..World::default()
        };
        world.powerups[0].collected = true;

        world.prune();

        assert_eq!(world.platforms.len(), 1);
        assert!(world.spikes.is_empty());
        assert_eq!(world.powerups.len(), 1);
        assert_eq!(world.powerups[0].pos.x, 200.0);
    }

    #[test]
    fn test_restart_rebuilds_run() {
        let mut state = GameState::new(9);
        state.score = 500;
        state.game_over = true;
        state.player.is_alive = false;
        state.last_spaceship_ms = 12_000;
        state.world.powerups.push(Powerup::new(10.0, 10.0));

        state.restart();

        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert!(state.player.is_alive);
        assert_eq!(state.last_spaceship_ms, 0);
        assert!(state.world.powerups.is_empty());
        assert_eq!(state.world.platforms.len(), 6);
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_settings_toggle_sky_and_tutorial() {
        let settings = Settings {
            ambient_sky: false,
            show_tutorial: false,
            ..Settings::default()
        };
        let state = GameState::with_settings(1, &settings);
        assert!(!state.ambient.enabled);
        assert!(state.tutorial.is_finished());
    }
}
