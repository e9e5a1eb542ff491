//! Scenes: an ordered entity list plus the systems that run over it
//!
//! A scene owns its systems (at most one per concrete type) and drives the
//! frame loop:
//!
//! 1. [`Scene::update`] runs each system in insertion order. A system first
//!    gets its scene-level `update`, then `update_entity` for every entity
//!    that matches it at the moment it is visited.
//! 2. Once every system has run, entities marked for deletion are swept out
//!    of the world and every scene.
//! 3. [`Scene::draw`] runs the same traversal read-only, calling the scene
//!    level `draw` before or after the entity pass per the system's
//!    [`DrawOrder`].

use crate::ecs::{
    ComponentBundle, DrawOrder, EcsError, Entity, EntityMut, Frame, SceneId, SceneView, System,
    SystemDescriptor, World,
};
use crate::ecs::scene_registry::SceneLease;
use plinth_metrics::SystemProfiler;
use std::any::{type_name, TypeId};
use tracing::{debug, trace};

/// Callbacks fired when entities join or leave a scene explicitly.
///
/// Not fired for entities removed by the end-of-update sweep.
pub trait SceneHooks {
    fn on_entity_added(&mut self, _scene: SceneId, _entity: EntityMut<'_>) {}
    fn on_entity_removed(&mut self, _scene: SceneId, _entity: EntityMut<'_>) {}
}

struct NoHooks;

impl SceneHooks for NoHooks {}

struct SystemEntry<S: ?Sized> {
    type_id: TypeId,
    descriptor: SystemDescriptor,
    system: Box<dyn System<S>>,
}

/// A collection of entities and the systems that process them.
///
/// `S` is the drawing surface passed to [`Scene::draw`]; scenes that never
/// draw can leave it as `()`.
pub struct Scene<S: ?Sized + 'static = ()> {
    id: SceneId,
    _lease: SceneLease,
    systems: Vec<SystemEntry<S>>,
    hooks: Box<dyn SceneHooks>,
    profiler: SystemProfiler,
}

impl<S: ?Sized + 'static> Scene<S> {
    /// Open a new scene in `world`.
    pub fn new(world: &mut World) -> Self {
        Self::with_hooks(world, NoHooks)
    }

    pub fn with_hooks(world: &mut World, hooks: impl SceneHooks + 'static) -> Self {
        let (id, lease) = world.create_scene();
        Self {
            id,
            _lease: lease,
            systems: Vec::new(),
            hooks: Box::new(hooks),
            profiler: SystemProfiler::new(),
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    // ------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------

    /// Append a live entity; no-op if it is already in the scene.
    pub fn add_entity(&mut self, world: &mut World, entity: Entity) -> bool {
        if !world.scene_push(self.id, entity) {
            return false;
        }
        if let Some(view) = world.entity_mut(entity) {
            self.hooks.on_entity_added(self.id, view);
        }
        true
    }

    /// Spawn an entity with `bundle` and append it to this scene.
    pub fn spawn<B: ComponentBundle>(
        &mut self,
        world: &mut World,
        bundle: B,
    ) -> Result<Entity, EcsError> {
        let entity = world.spawn_with(bundle)?;
        self.add_entity(world, entity);
        Ok(entity)
    }

    /// Take an entity out of this scene without destroying it.
    pub fn remove_entity(&mut self, world: &mut World, entity: Entity) -> bool {
        if !world.scene_remove(self.id, entity) {
            return false;
        }
        if let Some(view) = world.entity_mut(entity) {
            self.hooks.on_entity_removed(self.id, view);
        }
        true
    }

    pub fn contains(&self, world: &World, entity: Entity) -> bool {
        world.scene_entities(self.id).contains(&entity)
    }

    pub fn entities<'w>(&self, world: &'w World) -> &'w [Entity] {
        world.scene_entities(self.id)
    }

    pub fn len(&self, world: &World) -> usize {
        self.entities(world).len()
    }

    pub fn is_empty(&self, world: &World) -> bool {
        self.entities(world).is_empty()
    }

    // ------------------------------------------------------------------
    // Systems
    // ------------------------------------------------------------------

    /// Add a system and run its `init`.
    ///
    /// Returns false (and drops `system`) if a system of the same type is
    /// already present.
    pub fn add_system<T: System<S>>(&mut self, mut system: T) -> bool {
        let type_id = TypeId::of::<T>();
        if self.systems.iter().any(|entry| entry.type_id == type_id) {
            debug!(scene = %self.id, system = type_name::<T>(), "system already present");
            return false;
        }

        let mut descriptor = SystemDescriptor::new(type_name::<T>());
        system.init(&mut descriptor);
        debug!(
            scene = %self.id,
            system = descriptor.name(),
            required = descriptor.required().len(),
            "added system"
        );
        self.systems.push(SystemEntry {
            type_id,
            descriptor,
            system: Box::new(system),
        });
        true
    }

    /// Remove the system of type `T`, if present.
    pub fn remove_system<T: System<S>>(&mut self) -> bool {
        let type_id = TypeId::of::<T>();
        let before = self.systems.len();
        self.systems.retain(|entry| entry.type_id != type_id);
        before != self.systems.len()
    }

    pub fn has_system<T: System<S>>(&self) -> bool {
        self.descriptor::<T>().is_some()
    }

    pub fn descriptor<T: System<S>>(&self) -> Option<&SystemDescriptor> {
        let type_id = TypeId::of::<T>();
        self.systems
            .iter()
            .find(|entry| entry.type_id == type_id)
            .map(|entry| &entry.descriptor)
    }

    /// Descriptors in execution order.
    pub fn systems(&self) -> impl Iterator<Item = &SystemDescriptor> {
        self.systems.iter().map(|entry| &entry.descriptor)
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    // ------------------------------------------------------------------
    // Frame loop
    // ------------------------------------------------------------------

    /// Run one update pass, then sweep marked entities.
    ///
    /// Entities appended during the pass are visited by the systems that
    /// have not finished yet. Returns how many entities were swept.
    pub fn update(&mut self, world: &mut World, dt: f32) -> usize {
        let Self {
            id,
            systems,
            hooks,
            profiler,
            ..
        } = self;
        let scene = *id;

        for SystemEntry {
            descriptor, system, ..
        } in systems.iter_mut()
        {
            trace!(%scene, system = descriptor.name(), "update pass");
            profiler.time_system(descriptor.name(), || {
                let mut frame = Frame::new(&mut *world, scene, &mut **hooks);
                system.update(&mut frame, dt);

                let mut index = 0;
                while let Some(entity) = frame.entity_at(index) {
                    if frame.world().matches(entity, descriptor) {
                        system.update_entity(&mut frame, entity, dt);
                    }
                    index += 1;
                }
            });
        }

        let swept = world.sweep(scene);
        if swept > 0 {
            debug!(%scene, swept, "removed destroyed entities");
        }
        swept
    }

    /// Run one draw pass over the current entity list.
    pub fn draw(&mut self, world: &World, surface: &mut S) {
        let view = SceneView::new(world, self.id);

        for SystemEntry {
            descriptor, system, ..
        } in self.systems.iter_mut()
        {
            let order = descriptor.draw_order();
            if order == DrawOrder::BeforeEntities {
                system.draw(&view, surface);
            }
            for &entity in view.entities() {
                if world.matches(entity, descriptor) {
                    system.draw_entity(&view, entity, surface);
                }
            }
            if order == DrawOrder::AfterEntities {
                system.draw(&view, surface);
            }
        }
    }

    /// Per-system update timings (empty without the `metrics` feature).
    pub fn profiler(&self) -> &SystemProfiler {
        &self.profiler
    }

    /// Close the scene and free its slot in the world.
    ///
    /// Its entities stay alive, except those already marked for deletion,
    /// which are swept. Returns how many were swept. Dropping a scene
    /// without closing it has the same effect, deferred to the world's next
    /// sweep or scene creation.
    pub fn close(self, world: &mut World) -> usize {
        world.close_scene(self.id)
    }
}
