//! Sky Runner headless runner
//!
//! Plays the simulation with the autopilot and reports how the session went.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;

    use sky_runner::autopilot::Autopilot;
    use sky_runner::fx::EffectSystem;
    use sky_runner::sim::{GameEvent, GameState, tick};
    use sky_runner::{QualityPreset, Settings};

    #[derive(Parser, Debug)]
    #[command(name = "sky-runner")]
    #[command(about = "Run Sky Runner headless with the demo autopilot")]
    struct Cli {
        /// Course seed (defaults to the current time)
        seed: Option<u64>,
        /// Ticks to simulate (60 per second)
        #[arg(default_value_t = 3600)]
        ticks: u64,
        /// Settings file (overrides SKY_RUNNER_SETTINGS)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Quality preset applied on top of the loaded settings (low, medium, high)
        #[arg(long, value_parser = parse_quality)]
        quality: Option<QualityPreset>,
        /// Stop at the first death instead of restarting
        #[arg(long, default_value_t = false)]
        single_run: bool,
        /// Write the final game state as JSON
        #[arg(long)]
        snapshot: Option<PathBuf>,
    }

    fn parse_quality(s: &str) -> Result<QualityPreset, String> {
        QualityPreset::parse(s).ok_or_else(|| format!("unknown quality preset '{s}'"))
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let mut settings = match &cli.settings {
            Some(path) => Settings::load_from(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::load(),
        };
        if let Some(quality) = cli.quality {
            settings.apply_preset(quality);
        }

        let seed = cli.seed.unwrap_or_else(clock_seed);
        log::info!(
            "Sky Runner (headless) starting, seed {seed}, {} ticks, {} quality",
            cli.ticks,
            settings.quality.as_str()
        );

        let mut state = GameState::with_settings(seed, &settings);
        let mut fx = EffectSystem::new(seed, &settings);
        let mut pilot = Autopilot::new(!cli.single_run);
        let mut jumps = 0u64;
        let mut rides = 0u64;

        for _ in 0..cli.ticks {
            let input = pilot.input(&state);
            tick(&mut state, &input);

            let events = state.drain_events();
            for event in &events {
                match event {
                    GameEvent::Jumped { combo, .. } => {
                        jumps += 1;
                        log::trace!("Jump, combo {combo}");
                    }
                    GameEvent::SpaceshipBoarded { .. } => rides += 1,
                    GameEvent::Died { cause, score } => {
                        log::debug!("Died ({cause:?}) at score {score}");
                    }
                    _ => {}
                }
            }
            fx.observe(&state, &events);

            if cli.single_run && state.game_over {
                break;
            }
        }

        println!("seed={seed}");
        println!("quality={}", settings.quality.as_str());
        println!("ticks={}", state.time_ticks);
        println!("score={}", state.score);
        println!("alive={}", state.player.is_alive);
        println!("best={}", state.highscores.best());
        println!("runs={}", state.highscores.entries.len());
        println!("jumps={jumps}");
        println!("spaceship_rides={rides}");
        println!("particles={}", fx.emitter.particles.len());
        for (rank, entry) in state.highscores.entries.iter().enumerate() {
            println!(
                "#{:<2} score={:<6} ticks={:<6} seed={}",
                rank + 1,
                entry.score,
                entry.ticks,
                entry.seed
            );
        }

        if let Some(path) = &cli.snapshot {
            let encoded = serde_json::to_vec_pretty(&state)?;
            fs::write(path, encoded)
                .with_context(|| format!("writing snapshot to {}", path.display()))?;
            println!("snapshot={}", path.display());
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web
}
