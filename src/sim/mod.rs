//! Entity simulation module
//!
//! All gameplay logic lives here. Rules the module keeps:
//! - The live entity set is only changed by the registry commit, once per frame
//! - Motion steps are per frame; elapsed time drives timers only
//! - Randomness comes from the session's seeded RNG
//! - No rendering, audio or platform dependencies

pub mod boss;
pub mod collision;
pub mod effects;
pub mod entity;
pub mod frame;
pub mod kinetic;
pub mod player;
pub mod projectile;
pub mod registry;
pub mod state;
pub mod tick;

pub use boss::{Boss, BossState, MovementMode};
pub use collision::{is_valid_target, point_in_box};
pub use effects::{Explosion, FloaterText};
pub use entity::{Body, Entity, EntityId, EntityKind, EntityTag, Hitter, Peers};
pub use frame::{Frame, Hit};
pub use kinetic::{Intent, KineticBody};
pub use player::{Player, Pose};
pub use projectile::{Direction, Projectile};
pub use registry::{PendingOps, Registry};
pub use state::{GameEvent, GamePhase, GameState, SessionState};
pub use tick::{TickInput, tick};
