//! Entities: anything the simulation updates and the presentation draws
//!
//! An entity is a [`Body`] (identity, reference point, extent, hit counter)
//! plus a closed set of variants. Behavior dispatches on the variant tag
//! rather than on runtime type checks.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::effects::{Explosion, FloaterText};
use super::frame::Frame;
use super::player::Player;
use super::projectile::Projectile;

/// Stable identifier of an entity. Never reused within a session, so it is
/// safe to hold after the entity it names has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Variant tag, used by targeting and liveness checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityTag {
    Player,
    Boss,
    Projectile,
    Explosion,
    FloaterText,
}

impl EntityTag {
    /// Whether entities of this kind take part in collisions at all.
    /// Effects and floating text are purely decorative.
    pub fn collides(self) -> bool {
        matches!(self, EntityTag::Player | EntityTag::Boss | EntityTag::Projectile)
    }
}

/// State shared by every entity
#[derive(Debug, Clone)]
pub struct Body {
    pub id: EntityId,
    /// Reference point (top-left corner of the bounding box)
    pub pos: DVec2,
    /// Width and height, never negative
    pub size: DVec2,
    /// Cumulative damage, only meaningful for variants that track it
    pub hit_count: u32,
}

impl Body {
    pub fn new(id: EntityId, pos: DVec2, size: DVec2) -> Self {
        Self {
            id,
            pos,
            size: size.max(DVec2::ZERO),
            hit_count: 0,
        }
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.pos + self.size / 2.0
    }

    /// Point-in-box test, see [`super::collision::point_in_box`]
    #[inline]
    pub fn collides_with(&self, other: &Body) -> bool {
        super::collision::point_in_box(self.pos, other.pos, other.size)
    }
}

/// Variant payloads
#[derive(Debug, Clone)]
pub enum EntityKind {
    Player(Player),
    Boss(Boss),
    Projectile(Projectile),
    Explosion(Explosion),
    FloaterText(FloaterText),
}

/// Identity of whatever struck an entity, captured at impact time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hitter {
    pub id: EntityId,
    pub tag: EntityTag,
    /// Owner of the hitter when it is a projectile
    pub owner: Option<EntityId>,
}

/// A simulated object
#[derive(Debug, Clone)]
pub struct Entity {
    pub body: Body,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(body: Body, kind: EntityKind) -> Self {
        Self { body, kind }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.body.id
    }

    #[inline]
    pub fn pos(&self) -> DVec2 {
        self.body.pos
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        self.body.size
    }

    pub fn tag(&self) -> EntityTag {
        match self.kind {
            EntityKind::Player(_) => EntityTag::Player,
            EntityKind::Boss(_) => EntityTag::Boss,
            EntityKind::Projectile(_) => EntityTag::Projectile,
            EntityKind::Explosion(_) => EntityTag::Explosion,
            EntityKind::FloaterText(_) => EntityTag::FloaterText,
        }
    }

    pub fn collides_with(&self, other: &Entity) -> bool {
        self.body.collides_with(&other.body)
    }

    /// Owner of a projectile, `None` for everything else
    pub fn owner(&self) -> Option<EntityId> {
        match &self.kind {
            EntityKind::Projectile(p) => Some(p.owner),
            _ => None,
        }
    }

    pub fn hitter(&self) -> Hitter {
        Hitter {
            id: self.id(),
            tag: self.tag(),
            owner: self.owner(),
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match &self.kind {
            EntityKind::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_boss(&self) -> Option<&Boss> {
        match &self.kind {
            EntityKind::Boss(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_projectile(&self) -> Option<&Projectile> {
        match &self.kind {
            EntityKind::Projectile(p) => Some(p),
            _ => None,
        }
    }

    /// Advance this entity by one tick
    pub(crate) fn update(&mut self, peers: Peers<'_>, frame: &mut Frame<'_>) {
        let body = &mut self.body;
        match &mut self.kind {
            EntityKind::Player(p) => p.update(body, peers, frame),
            EntityKind::Boss(b) => b.update(body, peers, frame),
            EntityKind::Projectile(p) => p.update(body, peers, frame),
            EntityKind::Explosion(e) => e.update(body, frame),
            EntityKind::FloaterText(t) => t.update(body, frame),
        }
    }

    /// React to being struck. Variants that cannot be damaged, or that do not
    /// accept this kind of hitter, ignore the call.
    pub(crate) fn on_hit(&mut self, hitter: &Hitter, frame: &mut Frame<'_>) {
        let body = &mut self.body;
        match &mut self.kind {
            EntityKind::Player(p) => p.on_hit(body, hitter, frame),
            EntityKind::Boss(b) => b.on_hit(body, hitter, frame),
            EntityKind::Projectile(p) => p.on_hit(body, hitter, frame),
            EntityKind::Explosion(_) | EntityKind::FloaterText(_) => {}
        }
    }
}

/// Read-only view of every live entity except the one being updated
#[derive(Clone, Copy)]
pub struct Peers<'a> {
    before: &'a [Entity],
    after: &'a [Entity],
}

impl<'a> Peers<'a> {
    pub fn new(before: &'a [Entity], after: &'a [Entity]) -> Self {
        Self { before, after }
    }

    pub fn empty() -> Self {
        Self {
            before: &[],
            after: &[],
        }
    }

    pub fn iter(self) -> impl Iterator<Item = &'a Entity> {
        self.before.iter().chain(self.after.iter())
    }

    /// The player craft, if it is among the peers
    pub fn player(self) -> Option<&'a Entity> {
        self.iter().find(|e| e.tag() == EntityTag::Player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(id: u32, x: f64, y: f64, w: f64, h: f64) -> Body {
        Body::new(EntityId(id), DVec2::new(x, y), DVec2::new(w, h))
    }

    #[test]
    fn test_body_size_never_negative() {
        let b = body(1, 0.0, 0.0, -5.0, 3.0);
        assert_eq!(b.size, DVec2::new(0.0, 3.0));
    }

    #[test]
    fn test_collision_is_point_in_box_and_asymmetric() {
        // Small shot whose top-left sits inside a big craft
        let shot = body(1, 50.0, 10.0, 8.0, 16.0);
        let craft = body(2, 40.0, 0.0, 128.0, 64.0);
        assert!(shot.collides_with(&craft));
        // The craft's reference point is not inside the shot's box
        assert!(!craft.collides_with(&shot));
    }

    #[test]
    fn test_overlap_without_reference_point_is_a_miss() {
        // Boxes overlap, but the shot's top-left is left of the craft
        let shot = body(1, 35.0, 10.0, 8.0, 16.0);
        let craft = body(2, 40.0, 0.0, 128.0, 64.0);
        assert!(!shot.collides_with(&craft));
    }

    #[test]
    fn test_center() {
        let b = body(1, 10.0, 20.0, 32.0, 32.0);
        assert_eq!(b.center(), DVec2::new(26.0, 36.0));
    }

    #[test]
    fn test_tag_classes() {
        assert!(EntityTag::Player.collides());
        assert!(EntityTag::Boss.collides());
        assert!(EntityTag::Projectile.collides());
        assert!(!EntityTag::Explosion.collides());
        assert!(!EntityTag::FloaterText.collides());
    }
}
