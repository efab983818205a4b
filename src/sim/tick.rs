//! The simulation loop: one call to [`tick`] advances one frame
//!
//! Frame order:
//! 1. input (movement intents, fire) and the passive score clock
//! 2. commit of queued adds/removes
//! 3. update pass over the live set, resolving projectile hits as they occur
//! 4. boss check: queue a new boss if none is live
//!
//! Losing the last life ends the pass early: later entities skip their
//! update and no boss is queued.

use glam::DVec2;

use super::entity::{Entity, EntityKind, EntityTag, Peers};
use super::frame::Frame;
use super::kinetic::Intent;
use super::state::{GamePhase, GameState};

/// Input state for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire held (rate limited by the player's cooldown)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Leave the session
    pub quit: bool,
}

impl TickInput {
    pub fn intent(&self) -> Intent {
        Intent {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
        }
    }
}

/// Where floating "1up" text appears for this player
fn anchor_of(player: &Entity) -> DVec2 {
    DVec2::new(player.pos().x + player.size().x, player.pos().y)
}

/// Advance the game by one frame. `elapsed_ms` is the real time since the
/// previous frame and only drives timers; motion steps are per frame.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f64) {
    if input.quit {
        if state.session.phase != GamePhase::Exited {
            log::info!("Session exited at score {}", state.session.score);
            state.session.phase = GamePhase::Exited;
        }
        return;
    }

    if input.pause {
        match state.session.phase {
            GamePhase::Playing => {
                state.session.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.session.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if !state.session.is_running() {
        return;
    }
    state.frame += 1;

    let GameState {
        rng,
        session,
        registry,
        player_id,
        events,
        ..
    } = state;
    let player_id = *player_id;

    let mut player_anchor = registry.get(player_id).map(anchor_of).unwrap_or_default();

    // Anything queued here is live by the time the update pass runs
    {
        let mut frame = Frame::new(elapsed_ms, session, rng, &mut registry.pending, events);
        frame.player_anchor = player_anchor;
        if let Some(player) = registry.live.iter_mut().find(|e| e.id() == player_id) {
            let Entity { body, kind } = player;
            if let EntityKind::Player(p) = kind {
                p.set_intent(input.intent());
                if input.fire {
                    p.fire(body, &mut frame);
                }
            }
        }
        frame.advance_score_clock();
    }

    registry.commit();

    for i in 0..registry.live.len() {
        let (before, rest) = registry.live.split_at_mut(i);
        let Some((current, after)) = rest.split_first_mut() else {
            break;
        };

        let mut frame = Frame::new(elapsed_ms, session, rng, &mut registry.pending, events);
        frame.player_anchor = player_anchor;
        current.update(Peers::new(before, after), &mut frame);
        if current.id() == player_id {
            player_anchor = anchor_of(current);
        }

        for hit in std::mem::take(&mut frame.hits) {
            frame.player_anchor = player_anchor;
            let target = before
                .iter_mut()
                .chain(after.iter_mut())
                .find(|e| e.id() == hit.target);
            if let Some(target) = target {
                target.on_hit(&hit.hitter, &mut frame);
                if target.id() == player_id {
                    player_anchor = anchor_of(target);
                }
            }
        }

        // Game over freezes the frame where it happened
        if !session.is_running() {
            return;
        }
    }

    // A boss defeated this frame is still live until the next commit, so
    // its successor is queued one frame later
    let boss_queued = registry.pending().adds().any(|e| e.tag() == EntityTag::Boss);
    if registry.count(EntityTag::Boss) == 0 && !boss_queued {
        let mut frame = Frame::new(elapsed_ms, session, rng, &mut registry.pending, events);
        frame.spawn_boss();
    }
}
