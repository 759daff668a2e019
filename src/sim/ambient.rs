//! Background sky: meteorites, shooting stars, dust and twinkles
//!
//! Purely cosmetic. Draws come from a dedicated PCG stream so that the sky
//! never perturbs course generation.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::settings::Tuning;

const AMBIENT_STREAM: u64 = 0xa3b1;

pub const METEORITE_DELAY_MS: u64 = 1000;
pub const SHOOTING_STAR_DELAY_MS: u64 = 2000;
pub const MAX_DUST: usize = 100;
pub const MAX_TWINKLES: usize = 100;
const DUST_CHANCE: f32 = 0.1;
const METEORITE_LIFE: i32 = 150;
const SHOOTING_STAR_LIFE: i32 = 100;

/// Point history kept for a streak
#[derive(Debug, Clone, Default, Serialize)]
pub struct Streak {
    pub points: VecDeque<Vec2>,
    pub max_len: usize,
}

impl Streak {
    fn new(max_len: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(max_len + 1),
            max_len,
        }
    }

    fn push(&mut self, p: Vec2) {
        self.points.push_back(p);
        if self.points.len() > self.max_len {
            self.points.pop_front();
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Meteorite {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// Heading in degrees
    pub angle: f32,
    pub trail: Streak,
    pub life: i32,
    pub pulse: f32,
    pulse_direction: f32,
}

impl Meteorite {
    fn spawn(rng: &mut Pcg32, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(tuning.width..=tuning.width + 200.0).floor(),
                rng.random_range(-50.0..=tuning.height / 2.0).floor(),
            ),
            size: rng.random_range(5..=10) as f32,
            speed: rng.random_range(3.0..7.0),
            angle: rng.random_range(-30.0..30.0),
            trail: Streak::new(rng.random_range(15..=25)),
            life: METEORITE_LIFE,
            pulse: 0.0,
            pulse_direction: 1.0,
        }
    }

    fn update(&mut self) {
        self.pos += Vec2::from_angle(self.angle.to_radians()) * self.speed;
        self.trail.push(self.pos);
        self.pulse += 0.1 * self.pulse_direction;
        if !(0.0..=2.0).contains(&self.pulse) {
            self.pulse_direction = -self.pulse_direction;
        }
        self.life -= 1;
    }

    fn is_visible(&self, tuning: &Tuning) -> bool {
        self.pos.x > -100.0 && self.pos.y < tuning.height + 100.0 && self.life > 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShootingStar {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub angle: f32,
    pub trail: Streak,
    pub life: i32,
}

impl ShootingStar {
    fn spawn(rng: &mut Pcg32, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(rng.random_range(0.0..=tuning.width).floor(), -50.0),
            speed: rng.random_range(8.0..12.0),
            angle: rng.random_range(30.0..60.0),
            trail: Streak::new(rng.random_range(20..=30)),
            life: SHOOTING_STAR_LIFE,
            size: rng.random_range(2..=4) as f32,
        }
    }

    fn update(&mut self) {
        self.pos += Vec2::from_angle(self.angle.to_radians()) * self.speed;
        self.trail.push(self.pos);
        self.life -= 1;
    }

    fn is_visible(&self, tuning: &Tuning) -> bool {
        self.pos.y < tuning.height + 50.0 && self.pos.x < tuning.width + 50.0 && self.life > 0
    }
}

/// Mote drifting left across the screen
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Dust {
    pub pos: Vec2,
    pub life: i32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Twinkle {
    pub pos: Vec2,
    pub size: f32,
    pub life: i32,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct AmbientSky {
    pub enabled: bool,
    pub meteorites: Vec<Meteorite>,
    pub shooting_stars: Vec<ShootingStar>,
    pub dust: Vec<Dust>,
    pub twinkles: Vec<Twinkle>,
    pub last_meteorite_ms: u64,
    pub last_shooting_star_ms: u64,
    #[serde(skip)]
    rng: Pcg32,
}

impl AmbientSky {
    pub fn new(seed: u64) -> Self {
        Self {
            enabled: true,
            meteorites: Vec::new(),
            shooting_stars: Vec::new(),
            dust: Vec::new(),
            twinkles: Vec::new(),
            last_meteorite_ms: 0,
            last_shooting_star_ms: 0,
            rng: Pcg32::new(seed, AMBIENT_STREAM),
        }
    }

    /// Advance one tick. `now_ms` drives the meteorite and shooting-star gates.
    pub fn update(&mut self, now_ms: u64, tuning: &Tuning) {
        if !self.enabled {
            return;
        }

        self.dust.retain(|d| d.life > 0);
        for d in self.dust.iter_mut() {
            d.pos.x -= 1.0;
            d.life -= 1;
        }
        if self.rng.random::<f32>() < DUST_CHANCE && self.dust.len() < MAX_DUST {
            let y = self.rng.random_range(0.0..=tuning.height).floor();
            self.dust.push(Dust {
                pos: Vec2::new(tuning.width, y),
                life: self.rng.random_range(30..=60),
            });
        }

        if now_ms.saturating_sub(self.last_meteorite_ms) > METEORITE_DELAY_MS {
            self.meteorites.push(Meteorite::spawn(&mut self.rng, tuning));
            self.last_meteorite_ms = now_ms;
        }
        for m in self.meteorites.iter_mut() {
            m.update();
        }
        self.meteorites.retain(|m| m.is_visible(tuning));

        if now_ms.saturating_sub(self.last_shooting_star_ms) > SHOOTING_STAR_DELAY_MS {
            self.shooting_stars
                .push(ShootingStar::spawn(&mut self.rng, tuning));
            self.last_shooting_star_ms = now_ms;
        }
        for s in self.shooting_stars.iter_mut() {
            s.update();
        }
        self.shooting_stars.retain(|s| s.is_visible(tuning));

        if self.twinkles.len() < MAX_TWINKLES {
            let rng = &mut self.rng;
            let twinkle = Twinkle {
                pos: Vec2::new(
                    rng.random_range(0.0..=tuning.width).floor(),
                    rng.random_range(0.0..=tuning.height).floor(),
                ),
                size: rng.random_range(1..=3) as f32,
                life: rng.random_range(30..=60),
                color: [
                    rng.random_range(100..=255),
                    rng.random_range(100..=255),
                    rng.random_range(100..=255),
                ],
            };
            self.twinkles.push(twinkle);
        }
        self.twinkles.retain(|t| t.life > 0);
        for t in self.twinkles.iter_mut() {
            t.life -= 1;
        }
    }
}
