//! Sky Runner - A side-scrolling action runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, world generation, game loop)
//! - `fx`: Decorative effects derived from simulation events
//! - `autopilot`: Demo input source that plays the game
//! - `settings`: Preferences and data-driven tuning

pub mod autopilot;
pub mod fx;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings, SettingsError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Vertical acceleration (px/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Jump impulse (negative = upward)
    pub const JUMP_FORCE: f32 = -12.0;
    /// Horizontal step per held input tick
    pub const MOVE_SPEED: f32 = 5.0;
    /// World scroll per tick
    pub const SCROLL_SPEED: f32 = 3.0;

    /// Dash
    pub const DASH_SPEED: f32 = 15.0;
    pub const DASH_DURATION: u32 = 10;
    pub const DASH_COOLDOWN: u32 = 60;

    /// Combo window after a jump (2 seconds)
    pub const COMBO_WINDOW: u32 = 120;
    pub const COMBO_DECAY: u32 = 1;
    pub const COMBO_MULTIPLIER_STEP: f32 = 0.2;
    pub const MAX_SCORE_MULTIPLIER: f32 = 5.0;

    /// Player box
    pub const PLAYER_SIZE: f32 = 30.0;

    /// Jump boost powerup (5 seconds)
    pub const JUMP_BOOST_DURATION: u32 = 300;
    pub const JUMP_BOOST_FACTOR: f32 = 1.5;

    /// Screen shake (presentation hint)
    pub const SCREEN_SHAKE_DASH: u32 = 5;
}

/// Score multiplier for a combo count, clamped to [1, MAX_SCORE_MULTIPLIER]
#[inline]
pub fn combo_multiplier(combo: u32) -> f32 {
    (1.0 + combo as f32 * consts::COMBO_MULTIPLIER_STEP).min(consts::MAX_SCORE_MULTIPLIER)
}

/// Convert a tick count to whole seconds at the reference rate
#[inline]
pub fn ticks_to_secs(ticks: u32) -> u32 {
    ticks / consts::TICK_RATE
}
