//! Fixed-capacity entity ID pool.

use crate::ecs::EntityId;
use std::collections::BTreeSet;

/// Hands out entity IDs smallest-first and takes them back.
///
/// The pool is ordered, so the ID returned by [`checkout`](Self::checkout)
/// never depends on the order in which IDs were checked back in.
#[derive(Clone, Debug)]
pub struct EntityIdAllocator {
    pool: BTreeSet<EntityId>,
    capacity: usize,
}

impl EntityIdAllocator {
    /// Create a pool holding IDs `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        let upper = EntityId::try_from(capacity).unwrap_or(EntityId::MAX);
        Self {
            pool: (0..upper).collect(),
            capacity: upper as usize,
        }
    }

    /// Remove and return the smallest available ID.
    pub fn checkout(&mut self) -> Option<EntityId> {
        self.pool.pop_first()
    }

    /// Return an ID to the pool. Returning an ID twice is a no-op; the
    /// result reports whether the ID was actually added back.
    pub fn checkin(&mut self, id: EntityId) -> bool {
        debug_assert!((id as usize) < self.capacity, "id {id} was never part of this pool");
        self.pool.insert(id)
    }

    /// Number of IDs that can still be checked out.
    pub fn available(&self) -> usize {
        self.pool.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_exhausted(&self) -> bool {
        self.pool.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_is_ascending() {
        let mut pool = EntityIdAllocator::new(4);
        let ids: Vec<_> = std::iter::from_fn(|| pool.checkout()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert!(pool.is_exhausted());
        assert_eq!(pool.checkout(), None);
    }

    #[test]
    fn reuse_prefers_smallest_returned_id() {
        let mut pool = EntityIdAllocator::new(8);
        while pool.checkout().is_some() {}

        for id in [6, 2, 5] {
            pool.checkin(id);
        }
        assert_eq!(pool.checkout(), Some(2));
        assert_eq!(pool.checkout(), Some(5));
        assert_eq!(pool.checkout(), Some(6));
        assert_eq!(pool.checkout(), None);
    }

    #[test]
    fn double_checkin_is_ignored() {
        let mut pool = EntityIdAllocator::new(2);
        let id = pool.checkout().unwrap();
        assert!(pool.checkin(id));
        assert!(!pool.checkin(id));
        assert_eq!(pool.available(), 2);
    }
}
