//! Short-lived, non-colliding feedback: explosions and floating text
//!
//! Both are driven purely by elapsed time and remove themselves when done.

use super::entity::Body;
use super::frame::Frame;
use crate::consts::*;

/// Expanding explosion, advancing one stage every `EXPLOSION_STAGE_MS`.
/// The body's position is the explosion's center.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub radius: f64,
    pub stage: u32,
    pub max_stages: u32,
    stage_clock: f64,
}

impl Explosion {
    pub fn new(magnitude: u32) -> Self {
        Self {
            radius: 1.0,
            stage: 0,
            max_stages: magnitude.max(1),
            stage_clock: 0.0,
        }
    }

    /// 0 when fresh, 1 when burnt out
    pub fn fade(&self) -> f64 {
        (self.stage as f64 / self.max_stages as f64).min(1.0)
    }

    pub fn is_done(&self) -> bool {
        self.stage >= self.max_stages
    }

    pub(crate) fn update(&mut self, body: &mut Body, frame: &mut Frame<'_>) {
        if self.is_done() {
            frame.despawn(body.id);
        }

        self.stage_clock += frame.elapsed_ms;
        if self.stage_clock > EXPLOSION_STAGE_MS {
            self.stage_clock = 0.0;
            self.stage += 1;
        }
        self.radius += 2.0;
    }
}

/// Text that drifts upward and fades out ("1up")
#[derive(Debug, Clone)]
pub struct FloaterText {
    pub text: String,
    pub duration_ms: f64,
    pub elapsed_ms: f64,
}

impl FloaterText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration_ms: FLOATER_DURATION_MS,
            elapsed_ms: 0.0,
        }
    }

    /// 255 when fresh, 0 at the end of its life
    pub fn alpha(&self) -> f64 {
        255.0 - (self.elapsed_ms / self.duration_ms) * 255.0
    }

    pub(crate) fn update(&mut self, body: &mut Body, frame: &mut Frame<'_>) {
        self.elapsed_ms += frame.elapsed_ms;
        if self.elapsed_ms > self.duration_ms {
            self.elapsed_ms = self.duration_ms;
            frame.despawn(body.id);
        }
        body.pos.y -= FLOATER_RISE;
    }
}
