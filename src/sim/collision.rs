//! Collision and targeting rules
//!
//! Collisions are point-vs-box: the *reference point* of the moving entity
//! (its top-left corner) must land inside the other entity's closed box.
//! This is deliberately not a box overlap test. Small, fast projectiles only
//! connect when their nose is inside a large craft, and swapping the two
//! operands can change the answer.

use glam::DVec2;

use super::entity::{EntityId, EntityTag};

/// True iff `point` lies in the closed rectangle `[origin, origin + size]`
#[inline]
pub fn point_in_box(point: DVec2, origin: DVec2, size: DVec2) -> bool {
    point.x >= origin.x
        && point.x <= origin.x + size.x
        && point.y >= origin.y
        && point.y <= origin.y + size.y
}

/// Whether a projectile owned by `owner` (with id `shooter`) may damage a
/// candidate entity.
///
/// - never itself
/// - never decorative entities
/// - another projectile only when the owners differ, so player and boss
///   fire can intercept each other but a volley never destroys itself
/// - a craft only when it is not the projectile's own owner
pub fn is_valid_target(
    shooter: EntityId,
    owner: EntityId,
    target_id: EntityId,
    target_tag: EntityTag,
    target_owner: Option<EntityId>,
) -> bool {
    if target_id == shooter || !target_tag.collides() {
        return false;
    }
    match target_tag {
        EntityTag::Projectile => target_owner != Some(owner),
        _ => target_id != owner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER: EntityId = EntityId(1);
    const BOSS: EntityId = EntityId(2);

    #[test]
    fn test_point_in_box_edges_are_closed() {
        let origin = DVec2::new(10.0, 10.0);
        let size = DVec2::new(20.0, 5.0);
        assert!(point_in_box(DVec2::new(10.0, 10.0), origin, size));
        assert!(point_in_box(DVec2::new(30.0, 15.0), origin, size));
        assert!(!point_in_box(DVec2::new(30.1, 15.0), origin, size));
        assert!(!point_in_box(DVec2::new(9.9, 12.0), origin, size));
    }

    #[test]
    fn test_zero_size_box_only_contains_its_origin() {
        let origin = DVec2::new(5.0, 5.0);
        assert!(point_in_box(origin, origin, DVec2::ZERO));
        assert!(!point_in_box(DVec2::new(5.0, 5.5), origin, DVec2::ZERO));
    }

    #[test]
    fn test_projectile_never_targets_itself() {
        let shot = EntityId(10);
        assert!(!is_valid_target(shot, PLAYER, shot, EntityTag::Projectile, Some(PLAYER)));
    }

    #[test]
    fn test_same_owner_projectiles_ignore_each_other() {
        let a = EntityId(10);
        let b = EntityId(11);
        assert!(!is_valid_target(a, PLAYER, b, EntityTag::Projectile, Some(PLAYER)));
        assert!(!is_valid_target(a, BOSS, b, EntityTag::Projectile, Some(BOSS)));
    }

    #[test]
    fn test_opposing_projectiles_intercept() {
        let a = EntityId(10);
        let b = EntityId(11);
        assert!(is_valid_target(a, PLAYER, b, EntityTag::Projectile, Some(BOSS)));
        assert!(is_valid_target(b, BOSS, a, EntityTag::Projectile, Some(PLAYER)));
    }

    #[test]
    fn test_owner_is_never_a_target() {
        let shot = EntityId(10);
        assert!(!is_valid_target(shot, PLAYER, PLAYER, EntityTag::Player, None));
        assert!(is_valid_target(shot, PLAYER, BOSS, EntityTag::Boss, None));
        assert!(is_valid_target(shot, BOSS, PLAYER, EntityTag::Player, None));
    }

    #[test]
    fn test_effects_are_never_targets() {
        let shot = EntityId(10);
        assert!(!is_valid_target(shot, PLAYER, EntityId(20), EntityTag::Explosion, None));
        assert!(!is_valid_target(shot, PLAYER, EntityId(21), EntityTag::FloaterText, None));
    }
}
