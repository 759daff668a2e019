//! Game settings and tuning
//!
//! Preferences and session parameters, stored as JSON next to the binary.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable overriding the settings file location
pub const SETTINGS_ENV: &str = "SKY_RUNNER_SETTINGS";
/// Default settings file location
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";
/// Largest accepted viewport side in pixels
pub const MAX_VIEWPORT: f32 = 8192.0;

/// Errors raised while reading or writing settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "settings I/O failed: {e}"),
            Self::Parse(e) => write!(f, "settings are not valid JSON: {e}"),
            Self::Invalid(m) => write!(f, "invalid settings: {m}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live effect particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 200,
            QualityPreset::High => 500,
        }
    }

    /// Trail length multiplier (1.0 = full)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }
}

/// Session parameters the simulation reads every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub width: f32,
    pub height: f32,
    pub tick_rate: u32,
    pub scroll_speed: f32,
    pub gravity: f32,
    pub jump_force: f32,
    pub move_speed: f32,
    pub dash_speed: f32,
    pub dash_duration: u32,
    pub dash_cooldown: u32,
    /// Idle spaceships drift with the world instead of hanging in place
    pub scroll_idle_spaceships: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            tick_rate: TICK_RATE,
            scroll_speed: SCROLL_SPEED,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            move_speed: MOVE_SPEED,
            dash_speed: DASH_SPEED,
            dash_duration: DASH_DURATION,
            dash_cooldown: DASH_COOLDOWN,
            scroll_idle_spaceships: false,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.width > PLAYER_SIZE && self.height > PLAYER_SIZE) {
            return Err(SettingsError::Invalid(format!(
                "viewport {}x{} must be larger than the player",
                self.width, self.height
            )));
        }
        if self.width > MAX_VIEWPORT || self.height > MAX_VIEWPORT {
            return Err(SettingsError::Invalid(format!(
                "viewport {}x{} exceeds {MAX_VIEWPORT}",
                self.width, self.height
            )));
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::Invalid("tick_rate must be positive".into()));
        }
        let speeds = [
            ("gravity", self.gravity),
            ("scroll_speed", self.scroll_speed),
            ("jump_force", self.jump_force),
            ("move_speed", self.move_speed),
            ("dash_speed", self.dash_speed),
        ];
        if let Some((name, _)) = speeds.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SettingsError::Invalid(format!("{name} must be finite")));
        }
        Ok(())
    }

    /// Milliseconds represented by a tick count at this rate
    pub fn ticks_to_ms(&self, ticks: u64) -> u64 {
        ticks * 1000 / self.tick_rate.max(1) as u64
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Screen shake on dash
    pub screen_shake: bool,
    /// Player and dash trails
    pub trails: bool,
    /// Particle effects (jump, landing, dash, engines)
    pub particles: bool,
    /// Meteorites, shooting stars and drifting dust
    pub ambient_sky: bool,

    // === HUD ===
    /// Show the tutorial prompts at the start of a run
    pub show_tutorial: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,

    /// Simulation parameters
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            screen_shake: true,
            trails: true,
            particles: true,
            ambient_sky: true,
            show_tutorial: true,
            reduced_motion: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        if preset == QualityPreset::Low {
            self.ambient_sky = false;
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    /// Read settings from a file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write settings to a file as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load settings from `SKY_RUNNER_SETTINGS` or `settings.json`.
    /// Falls back to defaults if the file is missing or unusable.
    pub fn load() -> Self {
        let path = std::env::var(SETTINGS_ENV).unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {path}");
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {path}, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load {path}: {e}, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "quality": "High", "tuning": { "gravity": 0.75 } }"#)
            .expect("valid settings");
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.tuning.gravity, 0.75);
        assert_eq!(settings.tuning.width, WIDTH);
        assert_eq!(settings.tuning.dash_cooldown, DASH_COOLDOWN);
        assert!(settings.particles);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let err = Settings::from_json(r#"{ "tuning": { "tick_rate": 0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "tuning": { "width": 10.0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_oversized_viewport_rejected() {
        let err = Settings::from_json(r#"{ "tuning": { "width": 3e9 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "tuning": { "height": 1e12 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let largest = format!(r#"{{ "tuning": {{ "width": {MAX_VIEWPORT}, "height": {MAX_VIEWPORT} }} }}"#);
        assert!(Settings::from_json(&largest).is_ok());
    }

    #[test]
    fn test_non_finite_speeds_rejected() {
        let mut tuning = Tuning::default();
        tuning.move_speed = f32::INFINITY;
        assert!(tuning.validate().unwrap_err().to_string().contains("move_speed"));

        let mut tuning = Tuning::default();
        tuning.jump_force = f32::NAN;
        assert!(tuning.validate().unwrap_err().to_string().contains("jump_force"));

        let mut tuning = Tuning::default();
        tuning.dash_speed = f32::NEG_INFINITY;
        assert!(tuning.validate().unwrap_err().to_string().contains("dash_speed"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from("/definitely/not/here/settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        let mut settings = Settings::from_preset(QualityPreset::Low);
        settings.tuning.scroll_idle_spaceships = true;
        settings.save_to(&path).expect("save");

        let loaded = Settings::load_from(&path).expect("load");
        assert_eq!(loaded.quality, QualityPreset::Low);
        assert!(!loaded.ambient_sky);
        assert!(loaded.tuning.scroll_idle_spaceships);
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let mut settings = Settings::default();
        assert!(settings.effective_screen_shake());
        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_ticks_to_ms() {
        let tuning = Tuning::default();
        assert_eq!(tuning.ticks_to_ms(60), 1000);
        assert_eq!(tuning.ticks_to_ms(600), 10_000);
    }

    #[test]
    fn test_quality_parse() {
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }
}
