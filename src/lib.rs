//! Mothership - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Entity simulation (registry, collisions, boss state machine, scoring)
//! - `audio`: Cue mapping for whatever plays the sounds
//! - `highscores`: Top-10 `score,name` table
//! - `settings`: JSON-backed configuration

pub mod audio;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f64 = 800.0;
    pub const SCREEN_HEIGHT: f64 = 600.0;

    /// Target frame rate of the simulation loop
    pub const TARGET_FPS: u32 = 30;
    /// Nominal elapsed time per frame at the target rate (ms)
    pub const FRAME_MS: f64 = 1000.0 / TARGET_FPS as f64;

    /// Velocity multiplier applied to kinetic bodies every tick
    pub const DAMPING: f64 = 0.9;

    /// Player defaults
    pub const PLAYER_SPAWN: (f64, f64) = (400.0, 500.0);
    pub const PLAYER_WIDTH: f64 = 32.0;
    pub const PLAYER_HEIGHT: f64 = 32.0;
    pub const PLAYER_ACCEL: f64 = 1.0;
    pub const PLAYER_FIRE_INTERVAL_MS: f64 = 150.0;
    pub const INVINCIBILITY_MS: f64 = 1500.0;
    pub const STARTING_LIVES: i32 = 3;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f64 = 8.0;
    pub const PROJECTILE_HEIGHT: f64 = 16.0;
    pub const PLAYER_SHOT_SPEED: f64 = 0.5;
    pub const BOSS_SHOT_SPEED: f64 = 0.1;
    pub const SHOT_ACCEL: f64 = 1.1;

    /// Boss defaults
    pub const BOSS_SPAWN: (f64, f64) = (0.0, 20.0);
    pub const BOSS_WIDTH: f64 = 128.0;
    pub const BOSS_HEIGHT: f64 = 64.0;
    pub const BOSS_MIN_FIRE_INTERVAL_MS: i64 = 10;
    /// Difficulty at which the boss stops patrolling and hunts the player
    pub const TRACK_DIFFICULTY: f64 = 10.0;
    /// Peak alpha of the damage overlay
    pub const BOSS_DAMAGE_ALPHA: f64 = 180.0;

    /// Effects
    pub const EXPLOSION_STAGE_MS: f64 = 200.0;
    pub const IMPACT_MAGNITUDE: u32 = 5;
    pub const PLAYER_BURST_MAGNITUDE: u32 = 10;
    pub const SCATTER: i32 = 30;
    pub const FLOATER_DURATION_MS: f64 = 2000.0;
    pub const FLOATER_RISE: f64 = 0.5;

    /// Scoring
    pub const PROJECTILE_SCORE: u64 = 50;
    pub const BOSS_SCORE: u64 = 1000;
    pub const FREE_LIFE_INTERVAL: u64 = 5000;
    pub const SCORE_TICK_START_MS: f64 = 500.0;
    pub const SCORE_TICK_FLOOR_MS: f64 = 50.0;
}

/// Spawn point of the player as a vector
#[inline]
pub fn player_spawn() -> DVec2 {
    DVec2::new(consts::PLAYER_SPAWN.0, consts::PLAYER_SPAWN.1)
}

/// Spawn point of every new boss as a vector
#[inline]
pub fn boss_spawn() -> DVec2 {
    DVec2::new(consts::BOSS_SPAWN.0, consts::BOSS_SPAWN.1)
}
