//! Per-frame handle to the session services entities may touch
//!
//! Entities never own the loop. While updating they get a `Frame`: elapsed
//! time, the session counters, the RNG, and the registry's pending queues.
//! Everything they spawn or destroy goes through those queues and lands at
//! the next commit.

use glam::DVec2;
use rand_pcg::Pcg32;

use super::boss::Boss;
use super::effects::{Explosion, FloaterText};
use super::entity::{Body, Entity, EntityId, EntityKind, Hitter};
use super::projectile::{Direction, Projectile};
use super::registry::PendingOps;
use super::state::{GameEvent, GamePhase, SessionState};
use crate::consts::*;

/// A hit found by a projectile, resolved by the loop right after the
/// projectile's own update
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub target: EntityId,
    pub hitter: Hitter,
}

pub struct Frame<'a> {
    /// Real time since the previous frame (ms). Drives timers only.
    pub elapsed_ms: f64,
    pub session: &'a mut SessionState,
    pub rng: &'a mut Pcg32,
    pub pending: &'a mut PendingOps,
    pub events: &'a mut Vec<GameEvent>,
    /// Where "1up" text appears: right edge / top of the player
    pub player_anchor: DVec2,
    pub(crate) hits: Vec<Hit>,
}

impl<'a> Frame<'a> {
    pub fn new(
        elapsed_ms: f64,
        session: &'a mut SessionState,
        rng: &'a mut Pcg32,
        pending: &'a mut PendingOps,
        events: &'a mut Vec<GameEvent>,
    ) -> Self {
        Self {
            elapsed_ms,
            session,
            rng,
            pending,
            events,
            player_anchor: DVec2::ZERO,
            hits: Vec::new(),
        }
    }

    /// Queue a new entity; returns the id it will have once committed
    pub fn spawn(&mut self, pos: DVec2, size: DVec2, kind: EntityKind) -> EntityId {
        let id = self.pending.allocate_id();
        self.pending.enqueue_add(Entity::new(Body::new(id, pos, size), kind));
        id
    }

    /// Queue removal of an entity (idempotent)
    pub fn despawn(&mut self, id: EntityId) {
        self.pending.enqueue_remove(id);
    }

    /// Report that `hitter` struck `target`
    pub fn report_hit(&mut self, target: EntityId, hitter: Hitter) {
        self.hits.push(Hit { target, hitter });
    }

    /// Explosion centered on `center`
    pub fn spawn_explosion(&mut self, center: DVec2, magnitude: u32) -> EntityId {
        self.events.push(GameEvent::Explosion { pos: center });
        self.spawn(center, DVec2::ZERO, EntityKind::Explosion(Explosion::new(magnitude)))
    }

    /// Fire a projectile from `owner`, centered horizontally on it
    pub fn spawn_projectile(
        &mut self,
        owner: &Body,
        direction: Direction,
        velocity: f64,
        acceleration: f64,
    ) -> EntityId {
        let size = DVec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT);
        let x = owner.pos.x + (owner.size.x - size.x) / 2.0;
        let y = match direction {
            Direction::Up => owner.pos.y - size.y / 2.0,
            Direction::Down => owner.pos.y + owner.size.y,
        };
        self.events.push(GameEvent::ProjectileFired {
            owner: owner.id,
            direction,
        });
        self.spawn(
            DVec2::new(x, y),
            size,
            EntityKind::Projectile(Projectile::new(owner.id, direction, velocity, acceleration)),
        )
    }

    /// Queue a fresh boss tuned to the current difficulty
    pub fn spawn_boss(&mut self) -> EntityId {
        let boss = Boss::new(self.session.difficulty, self.session.difficulty_factor);
        let id = self.spawn(
            crate::boss_spawn(),
            DVec2::new(BOSS_WIDTH, BOSS_HEIGHT),
            EntityKind::Boss(boss),
        );
        self.events.push(GameEvent::BossSpawned { id });
        log::debug!(
            "Boss {} queued at difficulty {:.2}",
            id.raw(),
            self.session.difficulty
        );
        id
    }

    /// Add to the score. Every free-life threshold crossed pays out a life
    /// and a floating "1up". The score is frozen once the session stops.
    pub fn award(&mut self, points: u64) {
        if !self.session.is_running() {
            return;
        }
        let lives = self.session.add_score(points);
        for _ in 0..lives {
            self.spawn(
                self.player_anchor,
                DVec2::ZERO,
                EntityKind::FloaterText(FloaterText::new("1up")),
            );
            self.events.push(GameEvent::LifeGained {
                lives: self.session.lives,
            });
            log::debug!("Extra life, now {}", self.session.lives);
        }
    }

    /// Take a life from the player. Running out ends the session.
    pub fn lose_life(&mut self) {
        if !self.session.is_running() {
            return;
        }
        let exhausted = self.session.lose_life();
        self.events.push(GameEvent::PlayerHit {
            lives: self.session.lives,
        });
        if exhausted {
            self.game_over();
        }
    }

    /// Enter game over, reporting the final score exactly once
    pub fn game_over(&mut self) {
        if self.session.phase == GamePhase::GameOver {
            return;
        }
        self.session.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            final_score: self.session.score,
        });
        log::info!("Game over, final score {}", self.session.score);
    }

    /// Run the passive score clock
    pub fn advance_score_clock(&mut self) {
        if self.session.advance_score_clock(self.elapsed_ms) {
            self.award(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::registry::Registry;
    use rand::SeedableRng;

    struct Ctx {
        session: SessionState,
        rng: Pcg32,
        pending: PendingOps,
        events: Vec<GameEvent>,
    }

    impl Ctx {
        fn new() -> Self {
            Self {
                session: SessionState::new(),
                rng: Pcg32::seed_from_u64(11),
                pending: PendingOps::default(),
                events: Vec::new(),
            }
        }

        fn frame(&mut self) -> Frame<'_> {
            let mut frame = Frame::new(
                FRAME_MS,
                &mut self.session,
                &mut self.rng,
                &mut self.pending,
                &mut self.events,
            );
            frame.player_anchor = ANCHOR;
            frame
        }

        /// Positions of queued "1up" texts
        fn floaters(&self) -> Vec<DVec2> {
            self.pending
                .adds()
                .filter(|e| matches!(&e.kind, EntityKind::FloaterText(t) if t.text == "1up"))
                .map(|e| e.pos())
                .collect()
        }

        fn lives_gained(&self) -> Vec<i32> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::LifeGained { lives } => Some(*lives),
                    _ => None,
                })
                .collect()
        }
    }

    /// Right edge / top of a player at (400, 500)
    const ANCHOR: DVec2 = DVec2::new(400.0 + PLAYER_WIDTH, 500.0);

    #[test]
    fn test_crossing_a_threshold_pays_one_life() {
        let mut ctx = Ctx::new();
        ctx.session.score = 4990;
        ctx.frame().award(50);

        assert_eq!(ctx.session.score, 5040);
        assert_eq!(ctx.session.lives, STARTING_LIVES + 1);
        assert_eq!(ctx.session.next_free_life, 2 * FREE_LIFE_INTERVAL);
        assert_eq!(ctx.floaters(), vec![ANCHOR]);
        assert_eq!(ctx.lives_gained(), vec![STARTING_LIVES + 1]);
    }

    #[test]
    fn test_one_award_across_several_thresholds() {
        let mut ctx = Ctx::new();
        ctx.session.score = 4990;
        ctx.frame().award(BOSS_SCORE * 10);

        // 14990 crosses 5000 and 10000
        assert_eq!(ctx.session.lives, STARTING_LIVES + 2);
        assert_eq!(ctx.floaters(), vec![ANCHOR, ANCHOR]);
        assert_eq!(
            ctx.lives_gained(),
            vec![STARTING_LIVES + 1, STARTING_LIVES + 2]
        );

        // Short of the next threshold: nothing more
        ctx.frame().award(1);
        assert_eq!(ctx.floaters().len(), 2);
        assert_eq!(ctx.lives_gained().len(), 2);
    }

    #[test]
    fn test_nothing_changes_after_game_over() {
        let mut ctx = Ctx::new();
        ctx.session.lives = 0;
        ctx.session.score = 4990;
        {
            let mut frame = ctx.frame();
            frame.lose_life();
            frame.award(BOSS_SCORE);
            frame.lose_life();
        }

        assert_eq!(ctx.session.phase, GamePhase::GameOver);
        assert_eq!(ctx.session.score, 4990);
        assert_eq!(ctx.session.lives, 0);
        assert!(ctx.floaters().is_empty());
        let over: Vec<_> = ctx
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::GameOver { final_score } => Some(*final_score),
                _ => None,
            })
            .collect();
        assert_eq!(over, vec![4990]);
    }

    #[test]
    fn test_despawn_cannot_cancel_a_queued_spawn() {
        let mut registry = Registry::new();
        let mut ctx = Ctx::new();
        let id = {
            let mut frame = Frame::new(
                FRAME_MS,
                &mut ctx.session,
                &mut ctx.rng,
                &mut registry.pending,
                &mut ctx.events,
            );
            let id = frame.spawn_explosion(DVec2::new(10.0, 10.0), 4);
            frame.despawn(id);
            frame.despawn(id);
            id
        };
        registry.commit();
        assert!(registry.is_live(id));
        assert!(registry.pending().is_empty());
    }
}
