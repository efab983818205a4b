//! The mothership: the recurring boss
//!
//! Three state machines share one craft:
//! - movement: `Patrol` below [`TRACK_DIFFICULTY`], `Track` at or above it
//! - firing: a randomized interval, redrawn after every shot
//! - damage: `Active` until `max_hits` projectile hits, then `Defeated`
//!
//! A defeated boss queues its own removal; the loop notices the missing boss
//! after the next commit and queues a successor tuned to the new difficulty.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityTag, Hitter, Peers};
use super::frame::Frame;
use super::kinetic::{Intent, KineticBody};
use super::projectile::Direction;
use super::state::GameEvent;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    /// Figure-eight bounce across the upper half of the screen
    Patrol,
    /// Follow the player horizontally
    Track,
}

impl MovementMode {
    pub fn for_difficulty(difficulty: f64) -> Self {
        if difficulty < TRACK_DIFFICULTY {
            MovementMode::Patrol
        } else {
            MovementMode::Track
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossState {
    Active,
    Defeated,
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub motion: KineticBody,
    /// Time until the next shot once the clock passes it (ms)
    pub fire_interval: f64,
    /// Upper bound for redrawn fire intervals (ms)
    pub max_fire_interval: f64,
    pub max_hits: u32,
    pub mode: MovementMode,
    pub state: BossState,
    fire_clock: f64,
}

impl Boss {
    /// A fresh boss tuned to the session's current difficulty
    pub fn new(difficulty: f64, difficulty_factor: f64) -> Self {
        let mut motion = KineticBody::new(DVec2::new(0.5 + difficulty_factor, 1.0));
        motion.intent = Intent {
            right: true,
            down: true,
            ..Default::default()
        };
        Self {
            motion,
            fire_interval: 100.0 + 100.0 * difficulty_factor,
            max_fire_interval: 5000.0 / difficulty,
            max_hits: ((difficulty * 10.0).floor() as u32).max(1),
            mode: MovementMode::for_difficulty(difficulty),
            state: BossState::Active,
            fire_clock: 0.0,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.state == BossState::Defeated
    }

    /// Damage taken so far, 0..=1
    pub fn damage_level(&self, body: &Body) -> f64 {
        (body.hit_count as f64 / self.max_hits as f64).min(1.0)
    }

    /// Alpha of the red damage overlay
    pub fn overlay_alpha(&self, body: &Body) -> f64 {
        BOSS_DAMAGE_ALPHA * self.damage_level(body)
    }

    /// Inclusive range fire intervals are redrawn from
    pub fn fire_interval_bounds(&self) -> (i64, i64) {
        let max = (self.max_fire_interval.floor() as i64).max(BOSS_MIN_FIRE_INTERVAL_MS);
        (BOSS_MIN_FIRE_INTERVAL_MS, max)
    }

    pub(crate) fn update(&mut self, body: &mut Body, peers: Peers<'_>, frame: &mut Frame<'_>) {
        self.motion.integrate(&mut body.pos);

        self.fire_clock += frame.elapsed_ms;
        if self.fire_clock > self.fire_interval {
            self.fire_clock = 0.0;
            let (lo, hi) = self.fire_interval_bounds();
            self.fire_interval = frame.rng.random_range(lo..=hi) as f64;
            frame.spawn_projectile(body, Direction::Down, BOSS_SHOT_SPEED, SHOT_ACCEL);
        }

        self.mode = MovementMode::for_difficulty(frame.session.difficulty);
        match self.mode {
            MovementMode::Patrol => self.patrol(body),
            MovementMode::Track => {
                if let Some(player) = peers.player() {
                    self.track(body, &player.body);
                }
            }
        }
    }

    fn patrol(&mut self, body: &Body) {
        let intent = &mut self.motion.intent;
        if body.pos.x + body.size.x / 2.0 >= SCREEN_WIDTH {
            intent.right = false;
            intent.left = true;
        }
        if body.pos.x <= 0.0 {
            intent.right = true;
            intent.left = false;
        }
        if body.pos.y <= 0.0 {
            intent.down = true;
            intent.up = false;
        }
        if body.pos.y >= SCREEN_HEIGHT / 2.0 - body.size.y {
            intent.down = false;
            intent.up = true;
        }
    }

    fn track(&mut self, body: &Body, player: &Body) {
        let mine = body.center().x;
        let theirs = player.center().x;
        let low_water = 3.0 * SCREEN_HEIGHT / 4.0;
        self.motion.intent = Intent {
            right: mine < theirs,
            left: mine > theirs,
            down: player.pos.y > low_water && body.pos.y + body.size.y < SCREEN_HEIGHT / 3.0,
            up: player.pos.y < low_water && body.pos.y > 0.0,
        };
    }

    pub(crate) fn on_hit(&mut self, body: &mut Body, hitter: &Hitter, frame: &mut Frame<'_>) {
        if self.is_defeated()
            || hitter.tag != EntityTag::Projectile
            || hitter.owner == Some(body.id)
        {
            return;
        }

        body.hit_count += 1;
        if body.hit_count < self.max_hits {
            return;
        }

        self.state = BossState::Defeated;
        for _ in 0..5 {
            let mag = frame.rng.random_range(-SCATTER..=SCATTER);
            let at = DVec2::new(
                body.pos.x + mag as f64 + body.size.x / 2.0,
                body.pos.y + mag as f64 + body.size.y / 2.0,
            );
            frame.spawn_explosion(at, mag.unsigned_abs());
        }
        frame.award(BOSS_SCORE);
        frame.despawn(body.id);
        frame.session.increase_difficulty();
        frame.events.push(GameEvent::BossDefeated {
            id: body.id,
            difficulty: frame.session.difficulty,
        });
        log::info!(
            "Mothership down after {} hits, difficulty now {:.2}",
            body.hit_count,
            frame.session.difficulty
        );
    }
}
