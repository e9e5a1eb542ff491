//! Entity handle with generational index
//!
//! Entities are lightweight handles (8 bytes) that reference data in the World.
//! The ID is a small pooled integer; the generation counter tells a live
//! entity apart from an earlier one that held the same ID.

use std::collections::BTreeSet;
use std::fmt;

pub type EntityId = u32;
pub type Generation = u32;

/// Entity handle (generation-indexed for safety)
///
/// Format: [32-bit id | 32-bit generation]
/// - Id: Index into the dense component columns, drawn from the ID pool
/// - Generation: Incremented when the ID is released (prevents use-after-free)
///
/// Example:
/// ```ignore
/// let entity = world.spawn()?;
/// world.despawn(entity);
/// // entity handle is now stale (generation mismatch)
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: EntityId,
    generation: Generation,
}

impl Entity {
    pub(crate) const fn new(id: EntityId, generation: Generation) -> Self {
        Self { id, generation }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Column index for this entity's components.
    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.id as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.id, self.generation)
    }
}

/// Per-ID state kept by the world. One record exists for every slot in the
/// pool, alive or not, so the generation survives across reuse.
#[derive(Debug, Default)]
pub(crate) struct EntityRecord {
    pub generation: Generation,
    pub alive: bool,
    pub active: bool,
    pub marked_for_deletion: bool,
    pub tags: BTreeSet<String>,
}

impl EntityRecord {
    pub fn revive(&mut self) {
        self.alive = true;
        self.active = true;
        self.marked_for_deletion = false;
        self.tags.clear();
    }

    pub fn release(&mut self) {
        self.alive = false;
        self.active = false;
        self.marked_for_deletion = false;
        self.tags.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn holds(&self, entity: Entity) -> bool {
        self.alive && self.generation == entity.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_bumps_generation() {
        let mut record = EntityRecord::default();
        record.revive();
        let first = Entity::new(3, record.generation);
        assert!(record.holds(first));

        record.release();
        assert!(!record.holds(first));

        record.revive();
        let second = Entity::new(3, record.generation);
        assert_ne!(first, second);
        assert!(record.holds(second));
        assert_eq!(second.to_string(), "3v1");
    }
}
