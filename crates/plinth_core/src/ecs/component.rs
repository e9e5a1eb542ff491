// component.rs - Component capability trait and runtime type registration
//
// Component types get a small u32 ID the first time they are registered.
// IDs follow registration order and index the dense column table.

use crate::ecs::{EcsError, Entity};
use std::any::{type_name, TypeId};
use std::collections::HashMap;

pub type ComponentTypeId = u32;

/// Data attached to an entity, at most one value per type per entity.
///
/// All callbacks are no-ops by default, so plain data types only need an
/// empty impl (or [`impl_component!`](crate::impl_component)).
pub trait Component: 'static {
    /// Runs after the component has been stored on `entity`.
    fn on_added(&mut self, _entity: Entity) {}

    /// Runs when the component is detached, including during entity deletion.
    fn on_removed(&mut self, _entity: Entity) {}

    /// Restores default in-place state without reallocating.
    fn reset(&mut self, _entity: Entity) {}
}

/// Metadata describing a registered component type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentMeta {
    pub id: ComponentTypeId,
    pub name: &'static str,
    pub type_id: TypeId,
}

/// Type-index table mapping Rust types to sequential component IDs.
///
/// Types are never unregistered; the table only grows, up to its capacity.
#[derive(Debug)]
pub struct ComponentRegistry {
    capacity: usize,
    metas: Vec<ComponentMeta>,
    lookup: HashMap<TypeId, ComponentTypeId>,
}

impl ComponentRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            metas: Vec::with_capacity(capacity),
            lookup: HashMap::with_capacity(capacity),
        }
    }

    /// Register `T`, returning its ID. Registering again returns the same ID.
    pub fn register<T: Component>(&mut self) -> Result<ComponentTypeId, EcsError> {
        if let Some(id) = self.id_of::<T>() {
            return Ok(id);
        }

        if self.metas.len() >= self.capacity {
            return Err(EcsError::UnregisteredComponentType {
                name: type_name::<T>(),
                max_component_types: self.capacity,
            });
        }

        let id = self.metas.len() as ComponentTypeId;
        let meta = ComponentMeta {
            id,
            name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
        };
        self.lookup.insert(meta.type_id, id);
        self.metas.push(meta);
        Ok(id)
    }

    pub fn id_of<T: Component>(&self) -> Option<ComponentTypeId> {
        self.id_of_type(TypeId::of::<T>())
    }

    pub fn id_of_type(&self, type_id: TypeId) -> Option<ComponentTypeId> {
        self.lookup.get(&type_id).copied()
    }

    pub fn is_registered<T: Component>(&self) -> bool {
        self.lookup.contains_key(&TypeId::of::<T>())
    }

    pub fn meta(&self, id: ComponentTypeId) -> Option<&ComponentMeta> {
        self.metas.get(id as usize)
    }

    /// Registered types in registration (ID) order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentMeta> {
        self.metas.iter()
    }

    pub fn len(&self) -> usize {
        self.metas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity - self.metas.len()
    }
}

/// Implement [`Component`] with no-op callbacks for plain data types.
///
/// # Example
/// ```ignore
/// #[derive(Clone, Copy)]
/// struct Position { x: f32, y: f32 }
///
/// impl_component!(Position);
/// ```
#[macro_export]
macro_rules! impl_component {
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::ecs::Component for $ty {})+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Position;
    struct Velocity;
    struct Health;
    crate::impl_component!(Position, Velocity, Health);

    #[test]
    fn ids_follow_registration_order() {
        let mut registry = ComponentRegistry::new(8);
        assert_eq!(registry.register::<Velocity>(), Ok(0));
        assert_eq!(registry.register::<Position>(), Ok(1));
        assert_eq!(registry.register::<Velocity>(), Ok(0));

        assert_eq!(registry.id_of::<Position>(), Some(1));
        assert_eq!(registry.id_of::<Health>(), None);
        assert!(!registry.is_registered::<Health>());
        assert_eq!(registry.len(), 2);
        assert!(registry.meta(1).is_some_and(|meta| meta.name.ends_with("Position")));
    }

    #[test]
    fn registration_stops_at_capacity() {
        let mut registry = ComponentRegistry::new(1);
        registry.register::<Position>().unwrap();
        assert_eq!(registry.remaining_capacity(), 0);

        let err = registry.register::<Velocity>().unwrap_err();
        assert!(matches!(
            err,
            EcsError::UnregisteredComponentType { max_component_types: 1, .. }
        ));
        // Already-known types still resolve when the table is full.
        assert_eq!(registry.register::<Position>(), Ok(0));
    }
}
