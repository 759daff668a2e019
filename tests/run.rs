//! End-to-end runs through the public API

use glam::Vec2;

use sky_runner::autopilot::Autopilot;
use sky_runner::consts::*;
use sky_runner::fx::EffectSystem;
use sky_runner::sim::{GameEvent, GameState, Platform, Player, Spike, TickInput, World, tick};
use sky_runner::{Settings, Tuning};

#[test]
fn autopilot_sessions_hold_invariants() {
    for seed in [1u64, 2, 3] {
        let settings = Settings::default();
        let mut state = GameState::with_settings(seed, &settings);
        let mut fx = EffectSystem::new(seed, &settings);
        let mut pilot = Autopilot::new(true);

        for _ in 0..5000 {
            let input = pilot.input(&state);
            tick(&mut state, &input);
            let events = state.drain_events();
            fx.observe(&state, &events);

            let player = &state.player;
            assert!(
                !(player.is_jumping && player.is_wall_running),
                "seed {seed}: jumping and wall-running at once"
            );
            assert!((1.0..=MAX_SCORE_MULTIPLIER).contains(&player.score_multiplier));
            let released = events
                .iter()
                .any(|e| matches!(e, GameEvent::SpaceshipReleased { .. }));
            if player.is_alive && !player.in_spaceship && !released {
                assert!(player.pos.x >= 0.0 && player.pos.x <= WIDTH - PLAYER_SIZE);
            }
            if !player.is_alive {
                assert!(state.game_over);
            }
            assert_eq!(state.score, state.run_ticks);
            assert!(state.world.platforms.iter().all(|p| p.pos.x + p.width > 0.0));
            assert!(fx.emitter.particles.len() <= settings.max_particles());
        }

        assert_eq!(state.time_ticks, 5000);
    }
}

#[test]
fn jump_from_rest() {
    let tuning = Tuning::default();
    let mut player = Player::new(&tuning);
    player.pos = Vec2::new(200.0, 500.0);
    let mut world = World {
        platforms: vec![Platform::new(150.0, 530.0, 200.0, 30.0)],
        ..World::default()
    };
    let mut events = Vec::new();

    player.jump(&tuning, &mut events);
    assert_eq!(player.vel_y, -12.0);
    assert_eq!(player.combo, 1);
    assert_eq!(player.combo_timer, COMBO_WINDOW);
    assert!(events.contains(&GameEvent::Jumped {
        combo: 1,
        boosted: false
    }));

    player.update(&mut world, &tuning, &mut events);
    assert_eq!(player.vel_y, -11.5);
    assert_eq!(player.pos.y, 488.5);
}

#[test]
fn die_then_restart() {
    let mut state = GameState::new(77);
    for _ in 0..3 {
        tick(&mut state, &TickInput::default());
    }

    let pos = state.player.pos;
    state.world.spikes.push(Spike::new(pos.x, pos.y));
    tick(&mut state, &TickInput::default());
    assert!(state.game_over);
    let died = state
        .drain_events()
        .into_iter()
        .any(|e| matches!(e, GameEvent::Died { score: 4, .. }));
    assert!(died);

    // Movement and jumps are ignored while dead
    tick(
        &mut state,
        &TickInput {
            jump: true,
            move_right: true,
            ..Default::default()
        },
    );
    assert_eq!(state.score, 4);
    assert!(!state.player.is_jumping);

    tick(
        &mut state,
        &TickInput {
            restart: true,
            ..Default::default()
        },
    );
    assert!(state.player.is_alive);
    assert_eq!(state.score, 1);
    assert_eq!(state.highscores.best(), 4);
}

#[test]
fn settings_file_drives_the_game() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{ "show_tutorial": false, "ambient_sky": false, "tuning": { "gravity": 1.0 } }"#,
    )
    .expect("write settings");

    let settings = Settings::load_from(&path).expect("load settings");
    let mut state = GameState::with_settings(5, &settings);
    tick(&mut state, &TickInput::default());

    assert_eq!(state.player.vel_y, 1.0);
    assert!(state.tutorial.is_finished());
    assert!(state.ambient.twinkles.is_empty());
}

#[test]
fn snapshot_exposes_presentation_state() {
    let mut state = GameState::new(12);
    for _ in 0..30 {
        tick(&mut state, &TickInput::default());
    }
    let snapshot = serde_json::to_value(&state).expect("serialize");
    for key in ["player", "world", "score", "is_paused", "game_over", "ambient"] {
        assert!(snapshot.get(key).is_some(), "missing {key}");
    }
    assert_eq!(snapshot["score"], 30);
    assert!(snapshot["world"]["platforms"].as_array().is_some_and(|p| !p.is_empty()));
}
