// world.rs - Explicit ECS context owning IDs, records, components and scene lists

use crate::ecs::{
    Component, ComponentBundle, ComponentStore, ComponentTypeId, EcsError, Entity,
    EntityIdAllocator, EntityMut, EntityRef, SceneId, SystemDescriptor, WorldConfig,
};
use crate::ecs::entity::EntityRecord;
use crate::ecs::scene_registry::{SceneLease, SceneRegistry};
use tracing::{debug, warn};

/// The main ECS world containing all entities and components.
///
/// A world replaces process-wide managers: everything an entity needs (its
/// ID, flags, tags and components) lives here, and several independent
/// worlds can coexist. Scenes register their entity lists with the world so
/// that deleting an entity removes it from every scene at once.
pub struct World {
    config: WorldConfig,
    allocator: EntityIdAllocator,
    records: Vec<EntityRecord>,
    store: ComponentStore,
    scenes: SceneRegistry,
}

impl World {
    /// Create a new empty world sized by `config`.
    pub fn new(config: WorldConfig) -> Self {
        let allocator = EntityIdAllocator::new(config.max_entities);
        let capacity = allocator.capacity();
        Self {
            config,
            records: std::iter::repeat_with(EntityRecord::default)
                .take(capacity)
                .collect(),
            store: ComponentStore::new(capacity, config.max_component_types),
            allocator,
            scenes: SceneRegistry::default(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Entity lifecycle
    // ------------------------------------------------------------------

    /// Spawn an entity with no components.
    ///
    /// Takes the smallest free ID. Fails with
    /// [`EcsError::CapacityExhausted`] once `max_entities` are alive.
    pub fn spawn(&mut self) -> Result<Entity, EcsError> {
        let Some(id) = self.allocator.checkout() else {
            let max_entities = self.allocator.capacity();
            warn!(max_entities, "entity capacity exhausted");
            return Err(EcsError::CapacityExhausted { max_entities });
        };

        let record = &mut self.records[id as usize];
        record.revive();
        let entity = Entity::new(id, record.generation);
        debug!(%entity, "spawned entity");
        Ok(entity)
    }

    /// Spawn an entity and attach every component in `bundle`.
    ///
    /// If any attach fails the entity is rolled back (components detached,
    /// ID returned) and the error is passed on.
    pub fn spawn_with<B: ComponentBundle>(&mut self, bundle: B) -> Result<Entity, EcsError> {
        let entity = self.spawn()?;
        if let Err(err) = bundle.attach_to(&mut self.store, entity) {
            self.store.detach_all(entity);
            self.release(entity);
            debug!(%entity, %err, "rolled back spawn");
            return Err(err);
        }
        Ok(entity)
    }

    /// Remove an entity immediately: detach all components, drop it from
    /// every scene and return its ID to the pool.
    ///
    /// Scenes normally do this through [`destroy`](Self::destroy) and their
    /// end-of-update sweep; use this for entities that belong to no scene.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        let removed = self.store.detach_all(entity);
        self.scenes.retain_all(|member| member != entity);
        self.release(entity);
        debug!(%entity, removed, "despawned entity");
        true
    }

    /// Mark the entity for deletion. Nothing is freed until a scene that
    /// holds the entity finishes its next update.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        match self.record_mut(entity) {
            Some(record) => {
                record.marked_for_deletion = true;
                true
            }
            None => false,
        }
    }

    pub fn is_marked_for_deletion(&self, entity: Entity) -> bool {
        self.record(entity).is_some_and(|record| record.marked_for_deletion)
    }

    /// Inactive entities stay in their scenes but no system processes them.
    pub fn set_active(&mut self, entity: Entity, active: bool) -> bool {
        match self.record_mut(entity) {
            Some(record) => {
                record.active = active;
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.record(entity).is_some_and(|record| record.active)
    }

    /// Whether the handle refers to a live entity (same ID and generation).
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.record(entity).is_some()
    }

    /// Live entities in ID order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.alive)
            .map(|(id, record)| Entity::new(id as u32, record.generation))
    }

    pub fn live_count(&self) -> usize {
        self.allocator.capacity() - self.allocator.available()
    }

    /// How many more entities can be spawned right now.
    pub fn remaining_capacity(&self) -> usize {
        self.allocator.available()
    }

    pub fn entity(&self, entity: Entity) -> Option<EntityRef<'_>> {
        self.is_alive(entity).then(|| EntityRef::new(self, entity))
    }

    pub fn entity_mut(&mut self, entity: Entity) -> Option<EntityMut<'_>> {
        if self.is_alive(entity) {
            Some(EntityMut::new(self, entity))
        } else {
            None
        }
    }

    // ------------------------------------------------------------------
    // Tags
    // ------------------------------------------------------------------

    /// Add one or more tags; duplicates are ignored.
    pub fn add_tags<I>(&mut self, entity: Entity, tags: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        match self.record_mut(entity) {
            Some(record) => {
                record.tags.extend(tags.into_iter().map(Into::into));
                true
            }
            None => false,
        }
    }

    pub fn add_tag(&mut self, entity: Entity, tag: impl Into<String>) -> bool {
        self.add_tags(entity, [tag])
    }

    /// True only if the entity carries *every* listed tag.
    pub fn has_tags<I>(&self, entity: Entity, tags: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.record(entity).is_some_and(|record| {
            tags.into_iter()
                .all(|tag| record.tags.contains(tag.as_ref()))
        })
    }

    pub fn has_tag(&self, entity: Entity, tag: &str) -> bool {
        self.has_tags(entity, [tag])
    }

    /// Remove any of the listed tags the entity carries.
    pub fn remove_tags<I>(&mut self, entity: Entity, tags: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        match self.record_mut(entity) {
            Some(record) => {
                for tag in tags {
                    record.tags.remove(tag.as_ref());
                }
                true
            }
            None => false,
        }
    }

    pub fn remove_tag(&mut self, entity: Entity, tag: &str) -> bool {
        self.remove_tags(entity, [tag])
    }

    pub fn tags(&self, entity: Entity) -> impl Iterator<Item = &str> + '_ {
        self.record(entity)
            .into_iter()
            .flat_map(|record| record.tags.iter().map(String::as_str))
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    /// Register a component type ahead of its first attach.
    pub fn register<T: Component>(&mut self) -> Result<ComponentTypeId, EcsError> {
        self.store.register::<T>()
    }

    pub fn attach<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        self.ensure_alive(entity)?;
        self.store.attach(entity, component)
    }

    pub fn replace<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<Option<T>, EcsError> {
        self.ensure_alive(entity)?;
        self.store.replace(entity, component)
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.is_alive(entity) && self.store.has::<T>(entity)
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.store.get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.store.get_mut(entity)
    }

    pub fn detach<T: Component>(&mut self, entity: Entity) -> Option<T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.store.detach(entity)
    }

    pub fn detach_all(&mut self, entity: Entity) -> usize {
        if !self.is_alive(entity) {
            return 0;
        }
        self.store.detach_all(entity)
    }

    pub fn reset_all(&mut self, entity: Entity) -> usize {
        if !self.is_alive(entity) {
            return 0;
        }
        self.store.reset_all(entity)
    }

    /// Read-only access to the component table and its type registry.
    pub fn components(&self) -> &ComponentStore {
        &self.store
    }

    // ------------------------------------------------------------------
    // Scenes
    // ------------------------------------------------------------------

    /// Entities of `scene` in processing order.
    pub fn scene_entities(&self, scene: SceneId) -> &[Entity] {
        self.scenes.entities(scene)
    }

    /// Every open scene whose entity list holds `entity`.
    pub fn scenes_containing(&self, entity: Entity) -> impl Iterator<Item = SceneId> + '_ {
        self.scenes.scenes_containing(entity)
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.open_count()
    }

    pub(crate) fn create_scene(&mut self) -> (SceneId, SceneLease) {
        let orphaned = self.reclaim_dropped_scenes();
        self.purge(&orphaned);

        let (scene, lease) = self.scenes.create();
        debug!(%scene, "opened scene");
        (scene, lease)
    }

    /// Close `scene`. Its entities stay alive unless already marked for
    /// deletion, in which case they are swept now.
    pub(crate) fn close_scene(&mut self, scene: SceneId) -> usize {
        if !self.owns_scene(scene) {
            return 0;
        }
        let Some(entities) = self.scenes.close(scene) else {
            return 0;
        };
        debug!(%scene, entities = entities.len(), "closed scene");

        let mut doomed = self.reclaim_dropped_scenes();
        doomed.extend(
            entities
                .into_iter()
                .filter(|&entity| self.is_marked_for_deletion(entity)),
        );
        doomed.sort_unstable();
        doomed.dedup();
        self.purge(&doomed)
    }

    pub(crate) fn scene_push(&mut self, scene: SceneId, entity: Entity) -> bool {
        self.owns_scene(scene) && self.is_alive(entity) && self.scenes.push(scene, entity)
    }

    pub(crate) fn scene_remove(&mut self, scene: SceneId, entity: Entity) -> bool {
        self.owns_scene(scene) && self.scenes.remove(scene, entity)
    }

    fn owns_scene(&self, scene: SceneId) -> bool {
        let owned = self.scenes.issued(scene);
        if !owned {
            warn!(%scene, "scene belongs to another world");
        }
        owned
    }

    /// Whether a system with `descriptor` should process `entity` now.
    ///
    /// Recomputed on every visit: active, not marked for deletion, and
    /// holding every required component.
    pub(crate) fn matches(&self, entity: Entity, descriptor: &SystemDescriptor) -> bool {
        self.record(entity)
            .is_some_and(|record| record.active && !record.marked_for_deletion)
            && descriptor.is_satisfied_by(&self.store, entity)
    }

    /// Remove every marked entity found in `scene`, plus marked entities
    /// left behind by scenes that were dropped without being closed.
    ///
    /// Runs in two phases: collect the marked entities first, then detach
    /// their components, release their IDs and prune every scene list.
    pub(crate) fn sweep(&mut self, scene: SceneId) -> usize {
        if !self.owns_scene(scene) {
            return 0;
        }

        let mut doomed = self.reclaim_dropped_scenes();
        doomed.extend(
            self.scenes
                .entities(scene)
                .iter()
                .copied()
                .filter(|&entity| self.is_marked_for_deletion(entity)),
        );
        doomed.sort_unstable();
        doomed.dedup();
        self.purge(&doomed)
    }

    /// Close the slots of dropped scenes; returns their marked entities.
    fn reclaim_dropped_scenes(&mut self) -> Vec<Entity> {
        let mut orphaned = Vec::new();
        for (scene, entities) in self.scenes.reclaim_dropped() {
            debug!(%scene, entities = entities.len(), "reclaimed dropped scene");
            orphaned.extend(
                entities
                    .into_iter()
                    .filter(|&entity| self.is_marked_for_deletion(entity)),
            );
        }
        orphaned
    }

    fn purge(&mut self, doomed: &[Entity]) -> usize {
        if doomed.is_empty() {
            return 0;
        }

        for &entity in doomed {
            let removed = self.store.detach_all(entity);
            self.release(entity);
            debug!(%entity, removed, "swept entity");
        }

        let records = &self.records;
        self.scenes.retain_all(|member| {
            records
                .get(member.index())
                .is_some_and(|record| record.holds(member))
        });
        doomed.len()
    }

    fn release(&mut self, entity: Entity) {
        if let Some(record) = self.records.get_mut(entity.index()) {
            record.release();
        }
        self.allocator.checkin(entity.id());
    }

    fn ensure_alive(&self, entity: Entity) -> Result<(), EcsError> {
        if self.is_alive(entity) {
            Ok(())
        } else {
            Err(EcsError::StaleEntity { entity })
        }
    }

    fn record(&self, entity: Entity) -> Option<&EntityRecord> {
        self.records
            .get(entity.index())
            .filter(|record| record.holds(entity))
    }

    fn record_mut(&mut self, entity: Entity) -> Option<&mut EntityRecord> {
        self.records
            .get_mut(entity.index())
            .filter(|record| record.holds(entity))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}
