// frame.rs - What systems see during update and draw passes

use crate::ecs::{
    Component, ComponentBundle, EcsError, Entity, EntityMut, EntityRef, SceneHooks, SceneId, World,
};

/// Mutable access to the world during a scene's update pass.
///
/// Systems may spawn, attach, detach, tag, deactivate and destroy entities
/// through a frame. Removal is always deferred: [`destroy`](Self::destroy)
/// only marks the entity, and the scene sweeps it once every system has run,
/// so the entity list never shrinks under an in-progress pass.
pub struct Frame<'w> {
    world: &'w mut World,
    scene: SceneId,
    hooks: &'w mut (dyn SceneHooks + 'static),
}

impl<'w> Frame<'w> {
    pub(crate) fn new(
        world: &'w mut World,
        scene: SceneId,
        hooks: &'w mut (dyn SceneHooks + 'static),
    ) -> Self {
        Self {
            world,
            scene,
            hooks,
        }
    }

    pub fn scene(&self) -> SceneId {
        self.scene
    }

    pub fn world(&self) -> &World {
        &*self.world
    }

    /// The scene's entities in processing order, including any appended
    /// during this pass.
    pub fn entities(&self) -> &[Entity] {
        self.world.scene_entities(self.scene)
    }

    pub(crate) fn entity_at(&self, index: usize) -> Option<Entity> {
        self.entities().get(index).copied()
    }

    /// Spawn an entity that belongs to no scene yet.
    pub fn spawn(&mut self) -> Result<Entity, EcsError> {
        self.world.spawn()
    }

    /// Spawn an entity with `bundle` and append it to this scene. It is
    /// visited later in the same pass if it matches.
    pub fn spawn_with<B: ComponentBundle>(&mut self, bundle: B) -> Result<Entity, EcsError> {
        let entity = self.world.spawn_with(bundle)?;
        self.add_entity(entity);
        Ok(entity)
    }

    /// Append an existing entity to this scene, firing the scene's
    /// `on_entity_added` hook. No-op if already present.
    pub fn add_entity(&mut self, entity: Entity) -> bool {
        if !self.world.scene_push(self.scene, entity) {
            return false;
        }
        if let Some(view) = self.world.entity_mut(entity) {
            self.hooks.on_entity_added(self.scene, view);
        }
        true
    }

    /// Mark an entity for deletion at the end of this update.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        self.world.destroy(entity)
    }

    pub fn entity(&self, entity: Entity) -> Option<EntityRef<'_>> {
        self.world.entity(entity)
    }

    pub fn entity_mut(&mut self, entity: Entity) -> Option<EntityMut<'_>> {
        self.world.entity_mut(entity)
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.world.has::<T>(entity)
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.world.get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.world.get_mut(entity)
    }
}

/// Read-only access to the world during a scene's draw pass.
#[derive(Clone, Copy)]
pub struct SceneView<'w> {
    world: &'w World,
    scene: SceneId,
}

impl<'w> SceneView<'w> {
    pub(crate) fn new(world: &'w World, scene: SceneId) -> Self {
        Self { world, scene }
    }

    pub fn scene(&self) -> SceneId {
        self.scene
    }

    pub fn world(&self) -> &'w World {
        self.world
    }

    pub fn entities(&self) -> &'w [Entity] {
        self.world.scene_entities(self.scene)
    }

    pub fn entity(&self, entity: Entity) -> Option<EntityRef<'w>> {
        self.world.entity(entity)
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.world.has::<T>(entity)
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&'w T> {
        self.world.get(entity)
    }
}
