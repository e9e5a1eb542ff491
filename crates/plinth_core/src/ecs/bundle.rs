//! Component bundles for spawning entities

use crate::ecs::{Component, ComponentStore, EcsError, Entity};

/// A group of components attached to a new entity in one call.
///
/// Implemented for `()` and for tuples of up to eight components, so
/// `world.spawn_with((Position::default(), Velocity::default()))` works.
/// Components are attached left to right.
pub trait ComponentBundle {
    /// Attach every component in the bundle to `entity`.
    ///
    /// Stops at the first failure; the caller is responsible for rolling
    /// back whatever was already attached.
    fn attach_to(self, store: &mut ComponentStore, entity: Entity) -> Result<(), EcsError>;
}

impl ComponentBundle for () {
    fn attach_to(self, _store: &mut ComponentStore, _entity: Entity) -> Result<(), EcsError> {
        Ok(())
    }
}

macro_rules! impl_bundle {
    ($($name:ident),+) => {
        impl<$($name: Component),+> ComponentBundle for ($($name,)+) {
            #[allow(non_snake_case)]
            fn attach_to(self, store: &mut ComponentStore, entity: Entity) -> Result<(), EcsError> {
                let ($($name,)+) = self;
                $(store.attach(entity, $name)?;)+
                Ok(())
            }
        }
    };
}

impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);
impl_bundle!(A, B, C, D, E);
impl_bundle!(A, B, C, D, E, F);
impl_bundle!(A, B, C, D, E, F, G);
impl_bundle!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    struct Position(i32);
    struct Velocity(i32);
    crate::impl_component!(Position, Velocity);

    #[test]
    fn tuple_attaches_each_component() {
        let mut store = ComponentStore::new(4, 4);
        let e = Entity::new(1, 0);
        (Position(1), Velocity(2)).attach_to(&mut store, e).unwrap();

        assert_eq!(store.get::<Position>(e).map(|p| p.0), Some(1));
        assert_eq!(store.get::<Velocity>(e).map(|v| v.0), Some(2));
    }

    #[test]
    fn duplicate_type_in_bundle_fails_after_first() {
        let mut store = ComponentStore::new(4, 4);
        let e = Entity::new(0, 0);
        let err = (Position(1), Position(2)).attach_to(&mut store, e).unwrap_err();

        assert!(matches!(err, EcsError::ComponentAlreadyPresent { .. }));
        assert_eq!(store.get::<Position>(e).map(|p| p.0), Some(1));
    }
}
