//! Procedural course generation
//!
//! The course is a chain of platforms. Each call extends the chain by at most
//! one platform and may decorate it with a monster, a powerup, a spike and a
//! spaceship, in that order.

use super::entities::{Monster, Platform, Powerup, Spaceship, Spike, POWERUP_SIZE, SPIKE_SIZE};
use super::rng::RandomSource;
use super::state::World;
use crate::settings::Tuning;

/// Monsters only appear once the score passes this
pub const MONSTER_SCORE_THRESHOLD: u64 = 300;
pub const MONSTER_CHANCE: f32 = 0.25;
pub const POWERUP_CHANCE: f32 = 0.15;
pub const SPIKE_CHANCE: f32 = 0.15;
pub const SPACESHIP_CHANCE: f32 = 0.3;
/// Minimum wall-clock gap between spaceships
pub const SPACESHIP_DELAY_MS: u64 = 10_000;

/// Vertical step between consecutive platforms
pub const HEIGHT_STEPS: [i32; 3] = [-50, 0, 50];
const GAP_RANGE: (i32, i32) = (150, 200);
const WIDTH_RANGE: (i32, i32) = (120, 180);
const PLATFORM_HEIGHT: f32 = 30.0;
/// How far past the right edge the course is kept built
const LOOKAHEAD: f32 = 200.0;

const INITIAL_PLATFORMS: usize = 5;
const INITIAL_SPACING: f32 = 200.0;
const INITIAL_WIDTH: f32 = 150.0;
const GROUND_HEIGHT: f32 = 50.0;

/// Keep platform tops inside the playable band
fn clamp_height(y: f32, tuning: &Tuning) -> f32 {
    y.clamp(tuning.height - 350.0, tuning.height - 100.0)
}

/// Lay out the ground and the first five platforms
pub fn generate_initial(world: &mut World, rng: &mut impl RandomSource, tuning: &Tuning) {
    world.platforms.push(Platform::new(
        0.0,
        tuning.height - GROUND_HEIGHT,
        tuning.width,
        GROUND_HEIGHT,
    ));

    let mut height = tuning.height - 150.0;
    for i in 0..INITIAL_PLATFORMS {
        let x = 200.0 + i as f32 * INITIAL_SPACING;
        if i > 0 {
            height = clamp_height(height + rng.pick(&HEIGHT_STEPS) as f32, tuning);
        }
        world
            .platforms
            .push(Platform::new(x, height, INITIAL_WIDTH, PLATFORM_HEIGHT));

        // Keep the opening platforms clear
        if i >= 2 && i % 3 == 0 {
            let spike_x = x + (INITIAL_WIDTH / 2.0).floor() - SPIKE_SIZE / 2.0;
            world.spikes.push(Spike::new(spike_x, height - SPIKE_SIZE));
        }
        if i >= 3 && i % 4 == 0 {
            world
                .monsters
                .push(Monster::new(x + INITIAL_WIDTH + 50.0, height - 50.0));
        }
    }

    log::debug!(
        "Initial course: {} platforms, {} spikes, {} monsters",
        world.platforms.len(),
        world.spikes.len(),
        world.monsters.len()
    );
}

/// Extend the course by one platform if the last one is close enough.
///
/// `now_ms` is wall-clock time; `last_spaceship_ms` is updated when a
/// spaceship is placed. Returns whether a platform was added.
pub fn generate_next(
    world: &mut World,
    score: u64,
    now_ms: u64,
    last_spaceship_ms: &mut u64,
    rng: &mut impl RandomSource,
    tuning: &Tuning,
) -> bool {
    let Some(last) = world.platforms.last() else {
        log::warn!("Course generator ran with no platforms, skipping");
        return false;
    };
    if last.pos.x >= tuning.width + LOOKAHEAD {
        return false;
    }

    let x = last.pos.x + rng.range_inclusive(GAP_RANGE.0, GAP_RANGE.1) as f32;
    let y = clamp_height(last.pos.y + rng.pick(&HEIGHT_STEPS) as f32, tuning);
    let width = rng.range_inclusive(WIDTH_RANGE.0, WIDTH_RANGE.1) as f32;
    world
        .platforms
        .push(Platform::new(x, y, width, PLATFORM_HEIGHT));

    let half = (width / 2.0).floor();

    let mut monster_x = None;
    if score > MONSTER_SCORE_THRESHOLD && rng.chance(MONSTER_CHANCE) {
        let mx = x + width + 50.0;
        world.monsters.push(Monster::new(mx, y - 50.0));
        monster_x = Some(mx);
        log::debug!("Placed monster at ({mx}, {})", y - 50.0);
    }

    // Not right next to a monster
    if rng.chance(POWERUP_CHANCE) && monster_x.is_none_or(|mx| x + half < mx - 100.0) {
        world
            .powerups
            .push(Powerup::new(x + half - POWERUP_SIZE / 2.0, y - 40.0));
    }

    if rng.chance(SPIKE_CHANCE) {
        let offset = rng.range_inclusive(20, width as i32 - 40) as f32;
        world.spikes.push(Spike::new(x + offset, y - SPIKE_SIZE));
    }

    if now_ms.saturating_sub(*last_spaceship_ms) > SPACESHIP_DELAY_MS
        && rng.chance(SPACESHIP_CHANCE)
    {
        let id = world.next_entity_id();
        world
            .spaceships
            .push(Spaceship::new(id, x + width + 100.0, y - 50.0));
        *last_spaceship_ms = now_ms;
        log::debug!("Placed spaceship {id} at t={now_ms}ms");
    }

    true
}
