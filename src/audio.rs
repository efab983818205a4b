//! Audio cues
//!
//! The core never plays sound. It reports [`GameEvent`]s; this module turns
//! them into fire-and-forget cues for whatever backend implements
//! [`AudioSink`], and keeps the background music looping.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Projectile launched (either side)
    Missile,
    /// Something blew up
    Explosion,
    /// Extra life
    OneUp,
}

impl SoundEffect {
    /// Mix level of the effect before master/sfx volume
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Missile => 0.1,
            SoundEffect::Explosion => 0.4,
            SoundEffect::OneUp => 0.8,
        }
    }

    /// Extra plays after the first
    pub fn repeats(self) -> u32 {
        match self {
            SoundEffect::OneUp => 2,
            _ => 0,
        }
    }

    /// The cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ProjectileFired { .. } => Some(SoundEffect::Missile),
            GameEvent::Explosion { .. } => Some(SoundEffect::Explosion),
            GameEvent::LifeGained { .. } => Some(SoundEffect::OneUp),
            _ => None,
        }
    }
}

/// Mix level of the background track
pub const MUSIC_VOLUME: f32 = 0.5;

/// Playback backend
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32, repeats: u32);
    /// Whether the music channel is still playing
    fn music_busy(&self) -> bool;
    fn start_music(&mut self, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogAudio {
    music_playing: bool,
    pub cues_played: u64,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend the track ran out
    pub fn stop_music(&mut self) {
        self.music_playing = false;
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32, repeats: u32) {
        self.cues_played += 1;
        log::trace!("cue {effect:?} at {volume:.2} (+{repeats})");
    }

    fn music_busy(&self) -> bool {
        self.music_playing
    }

    fn start_music(&mut self, volume: f32) {
        self.music_playing = true;
        log::debug!("music (re)started at {volume:.2}");
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.base_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol, effect.repeats());
    }

    /// Play the cue for every event that has one
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Restart the background track whenever the channel has gone idle
    pub fn music_update(&mut self) {
        if self.muted || self.sink.music_busy() {
            return;
        }
        self.sink
            .start_music(MUSIC_VOLUME * self.master_volume * self.music_volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Direction, EntityId};
    use glam::DVec2;

    #[derive(Default)]
    struct Recorder {
        played: Vec<(SoundEffect, f32, u32)>,
        music_starts: u32,
        busy: bool,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32, repeats: u32) {
            self.played.push((effect, volume, repeats));
        }

        fn music_busy(&self) -> bool {
            self.busy
        }

        fn start_music(&mut self, _volume: f32) {
            self.music_starts += 1;
            self.busy = true;
        }
    }

    fn events() -> Vec<GameEvent> {
        vec![
            GameEvent::ProjectileFired {
                owner: EntityId(1),
                direction: Direction::Up,
            },
            GameEvent::Explosion { pos: DVec2::ZERO },
            GameEvent::LifeGained { lives: 4 },
            GameEvent::GameOver { final_score: 10 },
        ]
    }

    #[test]
    fn test_events_map_to_cues() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_master_volume(1.0);
        audio.handle_events(&events());

        let played = &audio.sink().played;
        assert_eq!(played.len(), 3);
        assert_eq!(played[0].0, SoundEffect::Missile);
        assert!((played[0].1 - 0.1).abs() < 1e-6);
        assert_eq!(played[1].0, SoundEffect::Explosion);
        assert!((played[1].1 - 0.4).abs() < 1e-6);
        assert_eq!(played[2], (SoundEffect::OneUp, 0.8, 2));
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        audio.handle_events(&events());
        audio.music_update();
        assert!(audio.sink().played.is_empty());
        assert_eq!(audio.sink().music_starts, 0);
    }

    #[test]
    fn test_music_restarts_only_when_idle() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.music_update();
        audio.music_update();
        assert_eq!(audio.sink().music_starts, 1);

        audio.sink_mut().busy = false;
        audio.music_update();
        assert_eq!(audio.sink().music_starts, 2);
    }

    #[test]
    fn test_log_sink_counts_cues() {
        let mut audio = AudioManager::new(LogAudio::new());
        audio.handle_events(&events());
        assert_eq!(audio.sink().cues_played, 3);
        audio.music_update();
        assert!(audio.sink().music_busy());
        audio.sink_mut().stop_music();
        assert!(!audio.sink().music_busy());
    }
}
