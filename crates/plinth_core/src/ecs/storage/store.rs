// store.rs - Dense [component type][entity id] table
//
// The store is the sole owner of every component instance. Entities only
// carry identity; their data lives in one fixed-length column per type.

use super::column::{Column, ErasedColumn};
use crate::ecs::{Component, ComponentRegistry, ComponentTypeId, EcsError, Entity};
use std::any::{type_name, TypeId};
use tracing::debug;

/// Component table indexed by component type ID, then entity ID.
///
/// A cell is non-empty iff that entity currently has that component type.
/// The store does not check entity liveness; [`World`](crate::ecs::World)
/// does that before delegating here.
pub struct ComponentStore {
    registry: ComponentRegistry,
    columns: Vec<Box<dyn ErasedColumn>>,
    max_entities: usize,
}

impl ComponentStore {
    pub fn new(max_entities: usize, max_component_types: usize) -> Self {
        Self {
            registry: ComponentRegistry::new(max_component_types),
            columns: Vec::with_capacity(max_component_types),
            max_entities,
        }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Register `T` and allocate its column on first use.
    pub fn register<T: Component>(&mut self) -> Result<ComponentTypeId, EcsError> {
        if let Some(id) = self.registry.id_of::<T>() {
            return Ok(id);
        }

        let id = self.registry.register::<T>()?;
        self.columns.push(Box::new(Column::<T>::with_len(self.max_entities)));
        debug!(component = type_name::<T>(), id, "registered component type");
        Ok(id)
    }

    /// Store `component` on `entity` and run its `on_added` callback.
    ///
    /// Fails with [`EcsError::ComponentAlreadyPresent`] rather than silently
    /// overwriting; use [`replace`](Self::replace) to swap values.
    pub fn attach<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        let column = self.column_for_insert::<T>()?;
        if column.contains(entity.index()) {
            return Err(EcsError::ComponentAlreadyPresent {
                entity,
                name: type_name::<T>(),
            });
        }

        column
            .insert(entity.index(), component)
            .map_err(|_| EcsError::StaleEntity { entity })?;
        if let Some(stored) = column.get_mut(entity.index()) {
            stored.on_added(entity);
        }
        Ok(())
    }

    /// Swap in `component`, returning the previous value (if any) after its
    /// `on_removed` callback has run.
    pub fn replace<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<Option<T>, EcsError> {
        let column = self.column_for_insert::<T>()?;
        let mut previous = column
            .insert(entity.index(), component)
            .map_err(|_| EcsError::StaleEntity { entity })?;

        if let Some(old) = previous.as_mut() {
            old.on_removed(entity);
        }
        if let Some(stored) = column.get_mut(entity.index()) {
            stored.on_added(entity);
        }
        Ok(previous)
    }

    /// False for unregistered types and empty cells.
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.has_type(TypeId::of::<T>(), entity)
    }

    pub fn has_type(&self, type_id: TypeId, entity: Entity) -> bool {
        self.registry
            .id_of_type(type_id)
            .and_then(|id| self.columns.get(id as usize))
            .is_some_and(|column| column.contains(entity.index()))
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.column::<T>()?.get(entity.index())
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.column_mut::<T>()?.get_mut(entity.index())
    }

    /// Remove and return the entity's `T`, running `on_removed` first.
    pub fn detach<T: Component>(&mut self, entity: Entity) -> Option<T> {
        let mut component = self.column_mut::<T>()?.take(entity.index())?;
        component.on_removed(entity);
        Some(component)
    }

    /// Detach every registered type from the entity, in registration order.
    /// Returns how many components were removed.
    pub fn detach_all(&mut self, entity: Entity) -> usize {
        self.columns
            .iter_mut()
            .map(|column| column.detach(entity))
            .filter(|&detached| detached)
            .count()
    }

    /// Run `reset` on every component the entity has, leaving them attached.
    /// Returns how many components were reset.
    pub fn reset_all(&mut self, entity: Entity) -> usize {
        self.columns
            .iter_mut()
            .map(|column| column.reset(entity))
            .filter(|&reset| reset)
            .count()
    }

    /// Number of entities currently holding a `T`.
    pub fn count<T: Component>(&self) -> usize {
        self.column::<T>().map_or(0, Column::occupied)
    }

    /// IDs of every registered type present on the entity.
    pub fn types_of(&self, entity: Entity) -> impl Iterator<Item = ComponentTypeId> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(move |(_, column)| column.contains(entity.index()))
            .map(|(id, _)| id as ComponentTypeId)
    }

    fn column<T: Component>(&self) -> Option<&Column<T>> {
        let id = self.registry.id_of::<T>()?;
        self.columns.get(id as usize)?.as_any().downcast_ref()
    }

    fn column_mut<T: Component>(&mut self) -> Option<&mut Column<T>> {
        let id = self.registry.id_of::<T>()?;
        self.columns.get_mut(id as usize)?.as_any_mut().downcast_mut()
    }

    fn column_for_insert<T: Component>(&mut self) -> Result<&mut Column<T>, EcsError> {
        let id = self.register::<T>()?;
        self.columns
            .get_mut(id as usize)
            .and_then(|column| column.as_any_mut().downcast_mut())
            .ok_or(EcsError::UnregisteredComponentType {
                name: type_name::<T>(),
                max_component_types: self.registry.capacity(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    struct Position {
        x: i32,
        y: i32,
    }
    crate::impl_component!(Position);

    /// Records every callback it receives into a shared log.
    struct Probe {
        label: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Component for Probe {
        fn on_added(&mut self, entity: Entity) {
            self.log.borrow_mut().push(format!("added {} {}", self.label, entity));
        }

        fn on_removed(&mut self, entity: Entity) {
            self.log.borrow_mut().push(format!("removed {} {}", self.label, entity));
        }

        fn reset(&mut self, entity: Entity) {
            self.log.borrow_mut().push(format!("reset {} {}", self.label, entity));
        }
    }

    fn probe(label: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Probe {
        Probe {
            label,
            log: Rc::clone(log),
        }
    }

    #[test]
    fn attach_get_detach() {
        let mut store = ComponentStore::new(8, 4);
        let e = Entity::new(2, 0);

        assert!(!store.has::<Position>(e));
        assert_eq!(store.get::<Position>(e), None);

        store.attach(e, Position { x: 1, y: 2 }).unwrap();
        assert!(store.has::<Position>(e));
        store.get_mut::<Position>(e).unwrap().x = 5;
        assert_eq!(store.get::<Position>(e), Some(&Position { x: 5, y: 2 }));
        assert_eq!(store.count::<Position>(), 1);

        assert_eq!(store.detach::<Position>(e), Some(Position { x: 5, y: 2 }));
        assert_eq!(store.detach::<Position>(e), None);
        assert!(!store.has::<Position>(e));
    }

    #[test]
    fn attach_refuses_to_overwrite() {
        let mut store = ComponentStore::new(4, 4);
        let e = Entity::new(0, 0);
        store.attach(e, Position { x: 1, y: 1 }).unwrap();

        let err = store.attach(e, Position { x: 9, y: 9 }).unwrap_err();
        assert!(matches!(err, EcsError::ComponentAlreadyPresent { .. }));
        assert_eq!(store.get::<Position>(e), Some(&Position { x: 1, y: 1 }));
    }

    #[test]
    fn callbacks_fire_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = ComponentStore::new(4, 4);
        let e = Entity::new(1, 0);

        store.attach(e, probe("a", &log)).unwrap();
        let old = store.replace(e, probe("b", &log)).unwrap();
        assert!(old.is_some());
        assert_eq!(store.reset_all(e), 1);
        assert_eq!(store.detach_all(e), 1);
        assert_eq!(store.detach_all(e), 0);

        assert_eq!(
            *log.borrow(),
            vec![
                "added a 1v0",
                "removed a 1v0",
                "added b 1v0",
                "reset b 1v0",
                "removed b 1v0",
            ]
        );
    }

    #[test]
    fn full_type_table_rejects_new_types() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = ComponentStore::new(4, 1);
        let e = Entity::new(0, 0);
        store.attach(e, Position { x: 0, y: 0 }).unwrap();

        let err = store.attach(e, probe("late", &log)).unwrap_err();
        assert!(matches!(err, EcsError::UnregisteredComponentType { .. }));
        assert!(log.borrow().is_empty());
        assert_eq!(store.registry().len(), 1);
    }

    #[test]
    fn types_of_lists_present_components() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = ComponentStore::new(4, 4);
        let e = Entity::new(3, 0);
        store.attach(e, probe("p", &log)).unwrap();
        store.attach(e, Position { x: 0, y: 0 }).unwrap();

        assert_eq!(store.types_of(e).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(store.types_of(Entity::new(0, 0)).count(), 0);
    }
}
