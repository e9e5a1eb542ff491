//! World sizing.

use serde::{Deserialize, Serialize};

/// Capacity bounds fixed when a [`World`](crate::ecs::World) is built.
///
/// Storage is pre-sized from these values: every component column holds
/// `max_entities` cells, and at most `max_component_types` columns exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub max_entities: usize,
    pub max_component_types: usize,
}

impl WorldConfig {
    pub const DEFAULT_MAX_ENTITIES: usize = 1000;
    pub const DEFAULT_MAX_COMPONENT_TYPES: usize = 100;

    pub fn new(max_entities: usize, max_component_types: usize) -> Self {
        Self {
            max_entities,
            max_component_types,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ENTITIES, Self::DEFAULT_MAX_COMPONENT_TYPES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: WorldConfig = serde_json::from_str(r#"{ "max_entities": 16 }"#).unwrap();
        assert_eq!(config.max_entities, 16);
        assert_eq!(
            config.max_component_types,
            WorldConfig::DEFAULT_MAX_COMPONENT_TYPES
        );
    }
}
