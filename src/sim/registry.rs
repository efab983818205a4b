//! Entity registry: the live set plus deferred adds/removes
//!
//! The live set is only ever changed by [`Registry::commit`], once per frame
//! before entities update. Anything queued during frame N keeps participating
//! (updating, colliding, drawing) for the rest of frame N and takes effect at
//! the start of frame N+1.

use super::entity::{Entity, EntityId, EntityTag};

/// Queued mutations plus the id allocator
#[derive(Debug, Default)]
pub struct PendingOps {
    adds: Vec<Entity>,
    removes: Vec<EntityId>,
    next_id: u32,
}

impl PendingOps {
    /// Allocate a fresh entity id. Ids are never reused.
    pub fn allocate_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId(self.next_id)
    }

    /// Queue an entity for the next commit
    pub fn enqueue_add(&mut self, entity: Entity) {
        self.adds.push(entity);
    }

    /// Queue a removal; repeated requests collapse into one
    pub fn enqueue_remove(&mut self, id: EntityId) {
        if !self.removes.contains(&id) {
            self.removes.push(id);
        }
    }

    pub fn is_removing(&self, id: EntityId) -> bool {
        self.removes.contains(&id)
    }

    pub fn adds(&self) -> impl Iterator<Item = &Entity> {
        self.adds.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.adds.is_empty() && self.removes.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    pub(crate) live: Vec<Entity>,
    pub(crate) pending: PendingOps,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_id(&mut self) -> EntityId {
        self.pending.allocate_id()
    }

    /// Put an entity straight into the live set (session setup only)
    pub(crate) fn insert_live(&mut self, entity: Entity) {
        self.live.push(entity);
    }

    /// Apply queued removals, then queued additions, and clear both queues.
    ///
    /// Removals only filter the live set. An id that is not live, including
    /// one still waiting in the add queue, is dropped from the queue without
    /// effect, so a queued entity always lands.
    pub fn commit(&mut self) {
        if !self.pending.removes.is_empty() {
            let removes = std::mem::take(&mut self.pending.removes);
            self.live.retain(|e| !removes.contains(&e.id()));
        }
        self.live.append(&mut self.pending.adds);
    }

    pub fn is_live(&self, id: EntityId) -> bool {
        self.live.iter().any(|e| e.id() == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.live.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.live.iter_mut().find(|e| e.id() == id)
    }

    /// Live entities, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.live.iter()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn pending(&self) -> &PendingOps {
        &self.pending
    }

    /// Live entities of one kind
    pub fn count(&self, tag: EntityTag) -> usize {
        self.live.iter().filter(|e| e.tag() == tag).count()
    }
}
