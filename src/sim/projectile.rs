//! Projectiles fired by the player (upward) and the boss (downward)

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::is_valid_target;
use super::entity::{Body, EntityId, EntityTag, Hitter, Peers};
use super::frame::Frame;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Sign of travel along the y axis (screen y grows downward)
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    /// Who fired it. Only compared, never looked up.
    pub owner: EntityId,
    pub direction: Direction,
    pub velocity: f64,
    pub acceleration: f64,
    /// Set once it has detonated or been shot down
    spent: bool,
}

impl Projectile {
    pub fn new(owner: EntityId, direction: Direction, velocity: f64, acceleration: f64) -> Self {
        Self {
            owner,
            direction,
            velocity,
            acceleration,
            spent: false,
        }
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }

    pub(crate) fn update(&mut self, body: &mut Body, peers: Peers<'_>, frame: &mut Frame<'_>) {
        body.pos.y += self.direction.sign() * self.velocity;
        self.velocity *= self.acceleration;

        let off_screen = match self.direction {
            Direction::Up => body.pos.y < 0.0,
            Direction::Down => body.pos.y > SCREEN_HEIGHT,
        };
        if off_screen {
            frame.despawn(body.id);
        }

        if self.spent {
            return;
        }

        let target = peers.iter().find(|other| {
            is_valid_target(body.id, self.owner, other.id(), other.tag(), other.owner())
                && !other.as_projectile().is_some_and(Projectile::is_spent)
                && body.collides_with(&other.body)
        });
        if let Some(target) = target {
            self.spent = true;
            frame.despawn(body.id);
            frame.spawn_explosion(body.center(), IMPACT_MAGNITUDE);
            frame.report_hit(
                target.id(),
                Hitter {
                    id: body.id,
                    tag: EntityTag::Projectile,
                    owner: Some(self.owner),
                },
            );
        }
    }

    /// Shot down by an opposing projectile. Pays out once.
    pub(crate) fn on_hit(&mut self, body: &mut Body, hitter: &Hitter, frame: &mut Frame<'_>) {
        if self.spent || hitter.tag != EntityTag::Projectile {
            return;
        }
        self.spent = true;
        frame.despawn(body.id);
        frame.award(PROJECTILE_SCORE);
    }
}

/// Size every projectile is spawned with
pub fn projectile_size() -> DVec2 {
    DVec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
}
