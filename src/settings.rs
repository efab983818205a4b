//! Game settings and preferences
//!
//! Stored as pretty JSON. Missing fields fall back to their defaults so an
//! old or hand-trimmed file still loads.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;

/// Settings errors
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Session ===
    /// RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Frame cadence of the loop
    pub target_fps: u32,
    /// Stop after this many frames (0 = until game over)
    pub max_frames: u64,
    /// Sleep to hold the cadence and measure real elapsed time
    pub realtime: bool,

    // === Scores ===
    pub high_score_path: PathBuf,
    /// Name recorded with a qualifying score
    pub player_name: String,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            target_fps: TARGET_FPS,
            // Five minutes at the default cadence
            max_frames: 9000,
            realtime: false,

            high_score_path: PathBuf::from("highscores.txt"),
            player_name: "PILOT".to_string(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Nominal time per frame (ms)
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.target_fps.max(1) as f64
    }

    /// Load settings from a JSON file. A missing file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("Using default settings");
            return Ok(Self::default());
        }
        let settings = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
