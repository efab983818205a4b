//! Session counters, game state, and the events the core reports
//!
//! Score, lives and difficulty outlive every entity, so they live in
//! [`SessionState`] owned by the loop rather than on the player or boss.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, EntityId, EntityKind, EntityTag};
use super::player::Player;
use super::projectile::Direction;
use super::registry::Registry;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation suspended until unpaused
    Paused,
    /// Out of lives
    GameOver,
    /// Player quit
    Exited,
}

/// Things the outside world may want to react to (sounds, HUD, scores).
/// Drained once per frame by whoever drives the loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired { owner: EntityId, direction: Direction },
    Explosion { pos: DVec2 },
    LifeGained { lives: i32 },
    PlayerHit { lives: i32 },
    BossSpawned { id: EntityId },
    BossDefeated { id: EntityId, difficulty: f64 },
    /// Emitted exactly once per session
    GameOver { final_score: u64 },
}

/// Score, lives and the difficulty curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u64,
    pub lives: i32,
    /// Score at which the next extra life is granted
    pub next_free_life: u64,
    pub difficulty: f64,
    /// Added to `difficulty` on every boss defeat, itself growing by 0.1
    pub difficulty_factor: f64,
    /// Passive score accumulator (ms)
    pub score_ticks: f64,
    /// Accumulator threshold for one passive point (ms)
    pub score_ticks_max: f64,
    pub phase: GamePhase,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            next_free_life: FREE_LIFE_INTERVAL,
            difficulty: 1.0,
            difficulty_factor: 0.1,
            score_ticks: 0.0,
            score_ticks_max: SCORE_TICK_START_MS,
            phase: GamePhase::Playing,
        }
    }

    /// Add points and pay out every free-life threshold crossed.
    /// Returns the number of lives gained.
    pub fn add_score(&mut self, points: u64) -> u32 {
        self.score += points;
        let mut gained = 0;
        while self.score >= self.next_free_life {
            self.lives += 1;
            self.next_free_life += FREE_LIFE_INTERVAL;
            gained += 1;
        }
        gained
    }

    /// Take one life. Returns true when the player had none left, in which
    /// case lives stay at zero.
    pub fn lose_life(&mut self) -> bool {
        self.lives -= 1;
        if self.lives < 0 {
            self.lives = 0;
            true
        } else {
            false
        }
    }

    pub fn increase_difficulty(&mut self) {
        self.difficulty += self.difficulty_factor;
        self.difficulty_factor += 0.1;
        self.score_ticks_max = (self.score_ticks_max - self.difficulty).max(SCORE_TICK_FLOOR_MS);
    }

    /// Feed elapsed time to the passive score clock. Returns true when a
    /// point is due.
    pub fn advance_score_clock(&mut self, elapsed_ms: f64) -> bool {
        self.score_ticks += elapsed_ms;
        if self.score_ticks > self.score_ticks_max {
            self.score_ticks = 0.0;
            true
        } else {
            false
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    /// Run seed
    pub seed: u64,
    pub rng: Pcg32,
    pub session: SessionState,
    pub registry: Registry,
    pub player_id: EntityId,
    /// Frames simulated so far
    pub frame: u64,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh session: the player is live, the first boss arrives on frame 1
    pub fn new(seed: u64) -> Self {
        let mut registry = Registry::new();
        let player_id = registry.allocate_id();
        registry.insert_live(Entity::new(
            Body::new(
                player_id,
                crate::player_spawn(),
                DVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            ),
            EntityKind::Player(Player::new()),
        ));
        log::info!("New session, seed {seed}");

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            session: SessionState::new(),
            registry,
            player_id,
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Take every event reported since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn player(&self) -> Option<&Entity> {
        self.registry.get(self.player_id)
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.registry.get_mut(self.player_id)
    }

    /// The live boss, if any
    pub fn boss(&self) -> Option<&Entity> {
        self.registry.iter().find(|e| e.tag() == EntityTag::Boss)
    }

    /// Bosses that are live or queued to become live
    pub fn boss_count(&self) -> usize {
        let queued = self
            .registry
            .pending()
            .adds()
            .filter(|e| e.tag() == EntityTag::Boss)
            .count();
        self.registry.count(EntityTag::Boss) + queued
    }

    /// Every live entity, for drawing. Order carries no meaning.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.registry.iter()
    }
}
