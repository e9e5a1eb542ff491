//! Plinth Core
//!
//! Contains the fundamental simulation pieces:
//! - Entity ID allocation and component storage
//! - Systems with declared component requirements
//! - Scenes driving the per-frame update/draw loop

pub mod ecs;

pub use ecs::{
    Component, ComponentBundle, ComponentStore, DrawOrder, EcsError, Entity, EntityMut,
    EntityRef, Frame, Scene, SceneHooks, SceneId, SceneView, System, SystemDescriptor, World,
    WorldConfig,
};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
