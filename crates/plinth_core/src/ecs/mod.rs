//! Entity Component System
//!
//! A [`World`] owns entity IDs, per-entity flags and tags, and the dense
//! component table. [`Scene`]s hold ordered entity lists and the
//! [`System`]s that update and draw them.
//!
//! ```ignore
//! let mut world = World::default();
//! let mut scene: Scene = Scene::new(&mut world);
//! scene.add_system(Movement);
//! scene.spawn(&mut world, (Position { x: 5, y: 5 }, Velocity { x: 1, y: 0 }))?;
//! scene.update(&mut world, dt);
//! ```

mod allocator;
mod bundle;
mod component;
mod config;
mod entity;
mod entity_ref;
mod error;
mod frame;
mod scene;
mod scene_registry;
mod storage;
mod system;
mod world;

pub use allocator::EntityIdAllocator;
pub use bundle::ComponentBundle;
pub use component::{Component, ComponentMeta, ComponentRegistry, ComponentTypeId};
pub use config::WorldConfig;
pub use entity::{Entity, EntityId, Generation};
pub use entity_ref::{EntityMut, EntityRef};
pub use error::EcsError;
pub use frame::{Frame, SceneView};
pub use scene::{Scene, SceneHooks};
pub use scene_registry::SceneId;
pub use storage::{Column, ComponentStore};
pub use system::{DrawOrder, Requirement, System, SystemDescriptor};
pub use world::World;
