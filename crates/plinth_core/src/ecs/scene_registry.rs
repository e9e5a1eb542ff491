use crate::ecs::Entity;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Weak};

static NEXT_WORLD: AtomicU32 = AtomicU32::new(0);

/// Handle assigned to each scene registered with a world.
///
/// Carries the owning world's token and a slot generation, so a handle
/// outliving its scene, or presented to another world, resolves to nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId {
    world: u32,
    index: u32,
    generation: u32,
}

impl SceneId {
    /// Return the raw slot index backing this handle.
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene#{}v{}", self.index, self.generation)
    }
}

/// Held by a `Scene` for as long as it exists. Once every lease is gone
/// the slot counts as dropped and is reclaimed on the next pass.
pub(crate) struct SceneLease {
    _held: Arc<()>,
}

struct OpenScene {
    entities: Vec<Entity>,
    lease: Weak<()>,
}

impl OpenScene {
    fn is_held(&self) -> bool {
        self.lease.strong_count() > 0
    }
}

#[derive(Default)]
struct Slot {
    generation: u32,
    open: Option<OpenScene>,
}

/// Entity lists of every live scene, so deletion can reach all of them.
pub(crate) struct SceneRegistry {
    world: u32,
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self {
            world: NEXT_WORLD.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Whether `scene` was issued by this registry, open or not.
    pub fn issued(&self, scene: SceneId) -> bool {
        scene.world == self.world
    }

    /// Open a scene, reusing a closed slot when one is free.
    pub fn create(&mut self) -> (SceneId, SceneLease) {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };

        let lease = Arc::new(());
        let slot = &mut self.slots[index as usize];
        slot.open = Some(OpenScene {
            entities: Vec::new(),
            lease: Arc::downgrade(&lease),
        });
        let id = SceneId {
            world: self.world,
            index,
            generation: slot.generation,
        };
        (id, SceneLease { _held: lease })
    }

    pub fn close(&mut self, scene: SceneId) -> Option<Vec<Entity>> {
        self.resolve_mut(scene)?;
        Some(self.vacate(scene.index))
    }

    /// Close every scene whose handle owner was dropped without closing it.
    pub fn reclaim_dropped(&mut self) -> Vec<(SceneId, Vec<Entity>)> {
        let dropped: Vec<u32> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| matches!(&slot.open, Some(open) if !open.is_held()))
            .map(|(index, _)| index as u32)
            .collect();

        dropped
            .into_iter()
            .map(|index| {
                let id = SceneId {
                    world: self.world,
                    index,
                    generation: self.slots[index as usize].generation,
                };
                (id, self.vacate(index))
            })
            .collect()
    }

    /// The scene's entities in insertion order; empty once closed.
    pub fn entities(&self, scene: SceneId) -> &[Entity] {
        match self.resolve(scene) {
            Some(open) => &open.entities,
            None => &[],
        }
    }

    /// Append unless already present.
    pub fn push(&mut self, scene: SceneId, entity: Entity) -> bool {
        match self.resolve_mut(scene) {
            Some(open) if !open.entities.contains(&entity) => {
                open.entities.push(entity);
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, scene: SceneId, entity: Entity) -> bool {
        let Some(open) = self.resolve_mut(scene) else {
            return false;
        };
        match open.entities.iter().position(|&e| e == entity) {
            Some(index) => {
                open.entities.remove(index);
                true
            }
            None => false,
        }
    }

    /// Keep only the entities `keep` accepts, in every open scene.
    pub fn retain_all(&mut self, mut keep: impl FnMut(Entity) -> bool) {
        for open in self.slots.iter_mut().filter_map(|slot| slot.open.as_mut()) {
            open.entities.retain(|&entity| keep(entity));
        }
    }

    pub fn scenes_containing(&self, entity: Entity) -> impl Iterator<Item = SceneId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, slot)| {
                matches!(&slot.open, Some(open) if open.is_held() && open.entities.contains(&entity))
            })
            .map(|(index, slot)| SceneId {
                world: self.world,
                index: index as u32,
                generation: slot.generation,
            })
    }

    pub fn open_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(&slot.open, Some(open) if open.is_held()))
            .count()
    }

    fn resolve(&self, scene: SceneId) -> Option<&OpenScene> {
        if !self.issued(scene) {
            return None;
        }
        let slot = self.slots.get(scene.index as usize)?;
        if slot.generation != scene.generation {
            return None;
        }
        slot.open.as_ref().filter(|open| open.is_held())
    }

    fn resolve_mut(&mut self, scene: SceneId) -> Option<&mut OpenScene> {
        if !self.issued(scene) {
            return None;
        }
        let slot = self.slots.get_mut(scene.index as usize)?;
        if slot.generation != scene.generation {
            return None;
        }
        slot.open.as_mut().filter(|open| open.is_held())
    }

    fn vacate(&mut self, index: u32) -> Vec<Entity> {
        let slot = &mut self.slots[index as usize];
        let entities = slot.open.take().map(|open| open.entities).unwrap_or_default();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_is_idempotent_and_remove_only_hits_members() {
        let mut registry = SceneRegistry::new();
        let (scene, _lease) = registry.create();
        let e = Entity::new(0, 0);

        assert!(registry.push(scene, e));
        assert!(!registry.push(scene, e));
        assert_eq!(registry.entities(scene), &[e]);

        assert!(registry.remove(scene, e));
        assert!(!registry.remove(scene, e));
        assert!(registry.entities(scene).is_empty());
    }

    #[test]
    fn closed_scenes_are_skipped() {
        let mut registry = SceneRegistry::new();
        let (a, _a) = registry.create();
        let (b, _b) = registry.create();
        let e = Entity::new(4, 0);
        registry.push(a, e);
        registry.push(b, e);

        assert_eq!(registry.close(a), Some(vec![e]));
        assert_eq!(registry.close(a), None);
        assert!(registry.entities(a).is_empty());
        assert!(!registry.push(a, e));
        assert_eq!(registry.scenes_containing(e).collect::<Vec<_>>(), vec![b]);
        assert_eq!(registry.open_count(), 1);

        registry.retain_all(|entity| entity != e);
        assert!(registry.entities(b).is_empty());
    }

    #[test]
    fn closed_slots_are_reused_under_a_new_generation() {
        let mut registry = SceneRegistry::new();
        for _ in 0..5 {
            let (scene, _lease) = registry.create();
            assert_eq!(scene.index(), 0);
            registry.close(scene);
        }

        let (old, _old) = registry.create();
        registry.close(old);
        let (new, _new) = registry.create();
        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);

        assert!(!registry.push(old, Entity::new(1, 0)));
        assert!(registry.push(new, Entity::new(1, 0)));
    }

    #[test]
    fn dropped_leases_are_reclaimed() {
        let mut registry = SceneRegistry::new();
        let (kept, _kept) = registry.create();
        let (dropped, lease) = registry.create();
        registry.push(dropped, Entity::new(2, 0));
        drop(lease);

        assert_eq!(registry.open_count(), 1);
        assert!(registry.entities(dropped).is_empty());

        let reclaimed = registry.reclaim_dropped();
        assert_eq!(reclaimed, vec![(dropped, vec![Entity::new(2, 0)])]);
        assert!(registry.reclaim_dropped().is_empty());

        let (reused, _reused) = registry.create();
        assert_eq!(reused.index(), dropped.index());
        assert_ne!(reused, kept);
    }

    #[test]
    fn handles_from_another_registry_resolve_to_nothing() {
        let mut first = SceneRegistry::new();
        let mut second = SceneRegistry::new();
        let (scene, _lease) = first.create();
        let (_other, _other_lease) = second.create();

        assert!(!second.issued(scene));
        assert!(!second.push(scene, Entity::new(0, 0)));
        assert!(second.entities(scene).is_empty());
    }
}
