//! Inertial motion shared by the player and the boss
//!
//! Intent flags only ever *add* acceleration; damping runs every tick, so a
//! craft skids to a halt once its intents are released. Steps are per tick,
//! not scaled by elapsed time.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::DAMPING;

/// Movement intents (set by input for the player, by steering for the boss)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Velocity plus per-axis acceleration factor
#[derive(Debug, Clone)]
pub struct KineticBody {
    pub vel: DVec2,
    pub accel_factor: DVec2,
    pub intent: Intent,
}

impl KineticBody {
    pub fn new(accel_factor: DVec2) -> Self {
        Self {
            vel: DVec2::ZERO,
            accel_factor,
            intent: Intent::default(),
        }
    }

    /// Apply intents, move, then damp
    pub fn integrate(&mut self, pos: &mut DVec2) {
        if self.intent.left {
            self.vel.x -= self.accel_factor.x;
        }
        if self.intent.right {
            self.vel.x += self.accel_factor.x;
        }
        if self.intent.down {
            self.vel.y += self.accel_factor.y;
        }
        if self.intent.up {
            self.vel.y -= self.accel_factor.y;
        }

        *pos += self.vel;
        self.vel *= DAMPING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_adds_then_damps() {
        let mut k = KineticBody::new(DVec2::new(1.0, 1.0));
        k.intent.right = true;
        let mut pos = DVec2::ZERO;
        k.integrate(&mut pos);
        assert!((pos.x - 1.0).abs() < 1e-9);
        assert!((k.vel.x - 0.9).abs() < 1e-9);

        k.integrate(&mut pos);
        // (0.9 + 1.0) moved, then damped
        assert!((pos.x - 2.9).abs() < 1e-9);
        assert!((k.vel.x - 1.71).abs() < 1e-9);
    }

    #[test]
    fn test_opposing_intents_cancel() {
        let mut k = KineticBody::new(DVec2::new(2.0, 2.0));
        k.intent = Intent {
            left: true,
            right: true,
            up: true,
            down: true,
        };
        let mut pos = DVec2::new(5.0, 5.0);
        k.integrate(&mut pos);
        assert_eq!(pos, DVec2::new(5.0, 5.0));
    }

    #[test]
    fn test_body_coasts_to_rest_without_intent() {
        let mut k = KineticBody::new(DVec2::ONE);
        k.vel = DVec2::new(10.0, -10.0);
        let mut pos = DVec2::ZERO;
        for _ in 0..300 {
            k.integrate(&mut pos);
        }
        assert!(k.vel.length() < 1e-9);
        // Geometric series: 10 / (1 - 0.9)
        assert!((pos.x - 100.0).abs() < 1e-6);
        assert!((pos.y + 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_terminal_velocity() {
        let mut k = KineticBody::new(DVec2::new(0.6, 1.0));
        k.intent.right = true;
        let mut pos = DVec2::ZERO;
        for _ in 0..500 {
            k.integrate(&mut pos);
        }
        // v = (v + a) * 0.9 settles at a * 0.9 / 0.1
        assert!((k.vel.x - 5.4).abs() < 1e-6);
    }
}
