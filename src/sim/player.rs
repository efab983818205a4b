//! The player craft
//!
//! Lives are kept in [`SessionState`](super::state::SessionState), not here:
//! the craft is repositioned on every hit, never destroyed.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityTag, Hitter, Peers};
use super::frame::Frame;
use super::kinetic::{Intent, KineticBody};
use super::projectile::Direction;
use crate::consts::*;

/// Sprite selector derived from horizontal velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Level,
    BankLeft,
    HardLeft,
    BankRight,
    HardRight,
}

impl Pose {
    pub fn from_velocity(vx: f64) -> Self {
        if vx > -1.0 && vx < 1.0 {
            Pose::Level
        } else if vx <= -4.0 {
            Pose::HardLeft
        } else if vx < 0.0 {
            Pose::BankLeft
        } else if vx >= 4.0 {
            Pose::HardRight
        } else {
            Pose::BankRight
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub motion: KineticBody,
    /// Remaining invincibility (ms); hits are ignored while positive
    pub invincible_ms: f64,
    fire_clock: f64,
    can_fire: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            motion: KineticBody::new(DVec2::splat(PLAYER_ACCEL)),
            invincible_ms: 0.0,
            fire_clock: 0.0,
            can_fire: true,
        }
    }

    pub fn set_intent(&mut self, intent: Intent) {
        self.motion.intent = intent;
    }

    pub fn pose(&self) -> Pose {
        Pose::from_velocity(self.motion.vel.x)
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ms > 0.0
    }

    pub fn can_fire(&self) -> bool {
        self.can_fire
    }

    /// Launch a missile if the cooldown allows it
    pub fn fire(&mut self, body: &Body, frame: &mut Frame<'_>) {
        if self.can_fire {
            frame.spawn_projectile(body, Direction::Up, PLAYER_SHOT_SPEED, SHOT_ACCEL);
            self.can_fire = false;
        }
    }

    pub(crate) fn update(&mut self, body: &mut Body, peers: Peers<'_>, frame: &mut Frame<'_>) {
        self.motion.integrate(&mut body.pos);

        // Half the craft may hang off either side, never off top or bottom
        body.pos.y = body.pos.y.max(0.0).min(SCREEN_HEIGHT - body.size.y);
        body.pos.x = body.pos.x.max(-body.size.x / 2.0).min(SCREEN_WIDTH - body.size.x / 2.0);

        if self.invincible_ms > 0.0 {
            self.invincible_ms -= frame.elapsed_ms;
        }

        self.fire_clock += frame.elapsed_ms;
        if self.fire_clock > PLAYER_FIRE_INTERVAL_MS {
            self.can_fire = true;
            self.fire_clock = 0.0;
        }

        if self.is_invincible() {
            return;
        }
        let contact = peers.iter().find(|other| {
            let live_threat = match other.tag() {
                EntityTag::Boss => true,
                EntityTag::Projectile => other
                    .as_projectile()
                    .is_some_and(|p| p.owner != body.id && !p.is_spent()),
                _ => false,
            };
            live_threat && body.collides_with(&other.body)
        });
        if let Some(other) = contact {
            self.on_hit(body, &other.hitter(), frame);
        }
    }

    pub(crate) fn on_hit(&mut self, body: &mut Body, hitter: &Hitter, frame: &mut Frame<'_>) {
        if self.is_invincible() {
            return;
        }
        match hitter.tag {
            EntityTag::Projectile if hitter.owner == Some(body.id) => return,
            EntityTag::Projectile | EntityTag::Boss => {}
            _ => return,
        }

        let bursts = frame.rng.random_range(1..=10);
        let center = body.center();
        for _ in 0..bursts {
            let o = frame.rng.random_range(-SCATTER..=SCATTER) as f64;
            frame.spawn_explosion(center + DVec2::splat(o), PLAYER_BURST_MAGNITUDE);
        }

        body.pos = crate::player_spawn();
        self.invincible_ms = INVINCIBILITY_MS;
        frame.lose_life();
    }
}
