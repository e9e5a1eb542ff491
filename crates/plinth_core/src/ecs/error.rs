use crate::ecs::Entity;
use thiserror::Error;

/// Errors raised synchronously by world, store and entity operations.
///
/// Lookups that simply find nothing return `None`/`false` instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EcsError {
    #[error("no entity id available: all {max_entities} ids are in use")]
    CapacityExhausted { max_entities: usize },

    #[error(
        "component type '{name}' cannot be registered: the table holds at most {max_component_types} types"
    )]
    UnregisteredComponentType {
        name: &'static str,
        max_component_types: usize,
    },

    #[error("entity {entity} already has a '{name}' component; detach or replace it first")]
    ComponentAlreadyPresent { entity: Entity, name: &'static str },

    #[error("entity {entity} is no longer alive")]
    StaleEntity { entity: Entity },
}
