//! Mothership entry point
//!
//! Headless driver: runs a session at the configured cadence with a simple
//! autopilot at the controls, logs audio cues, and records the final score.
//!
//! Usage: `mothership [settings.json] [--seed N] [--max-frames N]`

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use mothership::audio::{AudioManager, LogAudio};
use mothership::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use mothership::{HighScores, Settings};

#[derive(Parser, Debug)]
#[command(name = "mothership")]
#[command(about = "Headless Mothership session driven by an autopilot")]
struct Args {
    /// Settings file (JSON)
    #[arg(default_value = "mothership.json")]
    settings: PathBuf,
    /// RNG seed, overrides the settings file
    #[arg(long)]
    seed: Option<u64>,
    /// Frame cap (0 = until game over), overrides the settings file
    #[arg(long)]
    max_frames: Option<u64>,
}

impl Args {
    /// Command line values win over the settings file
    fn apply(&self, settings: &mut Settings) {
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(max_frames) = self.max_frames {
            settings.max_frames = max_frames;
        }
    }
}

/// Game instance holding all state
struct Game {
    state: GameState,
    audio: AudioManager<LogAudio>,
    settings: Settings,
    final_score: Option<u64>,
}

impl Game {
    fn new(settings: Settings, seed: u64) -> Self {
        let mut audio = AudioManager::new(LogAudio::new());
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        Self {
            state: GameState::new(seed),
            audio,
            settings,
            final_score: None,
        }
    }

    /// Stay under the boss and keep firing; dodge sideways while a boss
    /// missile is overhead
    fn autopilot(&self) -> TickInput {
        let (Some(player), Some(boss)) = (self.state.player(), self.state.boss()) else {
            return TickInput::default();
        };
        let px = player.body.center().x;
        let threat = self.state.entities().any(|e| {
            e.owner() == Some(boss.id())
                && (e.pos().x - px).abs() < player.size().x
                && e.pos().y < player.pos().y
        });

        let target = if threat {
            // Sidestep toward the roomier half of the screen
            if px < mothership::consts::SCREEN_WIDTH / 2.0 {
                px + 100.0
            } else {
                px - 100.0
            }
        } else {
            boss.body.center().x
        };

        TickInput {
            left: px > target + 4.0,
            right: px < target - 4.0,
            fire: !threat,
            ..Default::default()
        }
    }

    fn step(&mut self, elapsed_ms: f64) {
        let input = self.autopilot();
        tick(&mut self.state, &input, elapsed_ms);

        let events = self.state.drain_events();
        self.audio.handle_events(&events);
        self.audio.music_update();
        for event in &events {
            if let GameEvent::GameOver { final_score } = event {
                self.final_score = Some(*final_score);
            }
        }
    }

    fn frame_cap_reached(&self) -> bool {
        self.settings.max_frames > 0 && self.state.frame >= self.settings.max_frames
    }

    fn run(&mut self) {
        let frame_ms = self.settings.frame_ms();
        let cadence = Duration::from_secs_f64(frame_ms / 1000.0);
        let mut last = Instant::now();

        while self.state.phase() == GamePhase::Playing {
            if self.frame_cap_reached() {
                let quit = TickInput {
                    quit: true,
                    ..Default::default()
                };
                tick(&mut self.state, &quit, 0.0);
                break;
            }

            let elapsed_ms = if self.settings.realtime {
                let spent = last.elapsed();
                if spent < cadence {
                    std::thread::sleep(cadence - spent);
                }
                let now = Instant::now();
                let ms = now.duration_since(last).as_secs_f64() * 1000.0;
                last = now;
                ms
            } else {
                frame_ms
            };
            self.step(elapsed_ms);

            if self.state.frame % 300 == 0 {
                log::info!(
                    "frame {}: score {}, lives {}, difficulty {:.2}",
                    self.state.frame,
                    self.state.session.score,
                    self.state.session.lives,
                    self.state.session.difficulty
                );
            }
        }
    }

    fn record_high_score(&self) {
        let Some(score) = self.final_score else {
            return;
        };
        let path = &self.settings.high_score_path;
        let mut table = match HighScores::load(path) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("Could not read high scores ({e}), starting a fresh table");
                HighScores::new()
            }
        };

        match table.insert(score, &self.settings.player_name) {
            Some(rank) => log::info!("New high score {score}, rank {rank}"),
            None => log::info!("Score {score} did not make the table"),
        }
        if let Err(e) = table.save(path) {
            log::error!("Could not save high scores: {e}");
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Mothership starting...");

    let args = Args::parse();
    let mut settings = Settings::load(&args.settings).unwrap_or_else(|e| {
        log::warn!(
            "Bad settings file {} ({e}), using defaults",
            args.settings.display()
        );
        Settings::default()
    });
    args.apply(&mut settings);

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Game initialized with seed: {seed}");

    let mut game = Game::new(settings, seed);
    game.run();

    log::info!(
        "Session ended ({:?}) after {} frames: score {}, lives {}",
        game.state.phase(),
        game.state.frame,
        game.state.session.score,
        game.state.session.lives
    );
    game.record_high_score();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_local_settings_file() {
        let args = Args::try_parse_from(["mothership"]).expect("parses");
        assert_eq!(args.settings, PathBuf::from("mothership.json"));
        let mut settings = Settings::default();
        args.apply(&mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_flags_override_settings() {
        let args = Args::try_parse_from([
            "mothership",
            "custom.json",
            "--seed",
            "42",
            "--max-frames",
            "0",
        ])
        .expect("parses");
        assert_eq!(args.settings, PathBuf::from("custom.json"));

        let mut settings = Settings {
            seed: Some(7),
            ..Default::default()
        };
        args.apply(&mut settings);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.max_frames, 0);
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(Args::try_parse_from(["mothership", "--seed", "many"]).is_err());
    }
}
