use crate::ecs::{Component, ComponentStore, Entity, Frame, SceneView};
use std::any::{type_name, TypeId};

/// Whether a system's scene-level `draw` runs before or after its
/// per-entity draw pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawOrder {
    BeforeEntities,
    #[default]
    AfterEntities,
}

/// A component type a system requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Requirement {
    type_id: TypeId,
    name: &'static str,
}

impl Requirement {
    pub fn of<T: Component>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Metadata describing which entities a system processes and how it draws.
///
/// Requirements keep insertion order and never contain duplicates. A
/// descriptor with no requirements matches every active entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemDescriptor {
    name: &'static str,
    required: Vec<Requirement>,
    draw_order: DrawOrder,
}

impl SystemDescriptor {
    /// Create a new descriptor with the provided name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            required: Vec::new(),
            draw_order: DrawOrder::default(),
        }
    }

    /// Require `T`. Adding the same type twice has no effect.
    pub fn add_required<T: Component>(&mut self) -> &mut Self {
        let requirement = Requirement::of::<T>();
        if !self.required.contains(&requirement) {
            self.required.push(requirement);
        }
        self
    }

    /// Drop the requirement on `T`, if present.
    pub fn remove_required<T: Component>(&mut self) -> &mut Self {
        let type_id = TypeId::of::<T>();
        self.required.retain(|requirement| requirement.type_id != type_id);
        self
    }

    pub fn requires<T: Component>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.required.iter().any(|requirement| requirement.type_id == type_id)
    }

    pub fn set_draw_order(&mut self, order: DrawOrder) -> &mut Self {
        self.draw_order = order;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn required(&self) -> &[Requirement] {
        &self.required
    }

    pub fn draw_order(&self) -> DrawOrder {
        self.draw_order
    }

    /// Whether the entity holds every required component right now.
    /// Liveness and the active flag are checked by the world.
    pub(crate) fn is_satisfied_by(&self, store: &ComponentStore, entity: Entity) -> bool {
        self.required
            .iter()
            .all(|requirement| store.has_type(requirement.type_id, entity))
    }
}

/// Behaviour run once per frame over the entities holding every required
/// component type.
///
/// `S` is the drawing surface handed through [`Scene::draw`](crate::ecs::Scene::draw)
/// unexamined. Every hook is a no-op by default. Per-entity working state
/// belongs in components; fields on the system are for system-wide state
/// such as a title or a loaded resource.
pub trait System<S: ?Sized = ()>: 'static {
    /// Runs once, when a scene accepts the system, before any update or draw.
    /// Declare requirements and the draw order here.
    fn init(&mut self, _descriptor: &mut SystemDescriptor) {}

    /// Scene-level update, once per frame.
    fn update(&mut self, _frame: &mut Frame<'_>, _dt: f32) {}

    /// Once per frame for each matching active entity, in scene order.
    fn update_entity(&mut self, _frame: &mut Frame<'_>, _entity: Entity, _dt: f32) {}

    /// Scene-level draw, once per frame.
    fn draw(&mut self, _view: &SceneView<'_>, _surface: &mut S) {}

    /// Once per frame for each matching active entity, in scene order.
    fn draw_entity(&mut self, _view: &SceneView<'_>, _entity: Entity, _surface: &mut S) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Position;
    struct Velocity;
    crate::impl_component!(Position, Velocity);

    #[test]
    fn requirements_are_ordered_and_deduplicated() {
        let mut descriptor = SystemDescriptor::new("movement");
        descriptor
            .add_required::<Velocity>()
            .add_required::<Position>()
            .add_required::<Velocity>();

        let names: Vec<_> = descriptor.required().iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("Velocity"));
        assert!(names[1].ends_with("Position"));

        descriptor.remove_required::<Velocity>();
        assert!(!descriptor.requires::<Velocity>());
        assert!(descriptor.requires::<Position>());
    }

    #[test]
    fn draw_order_defaults_to_after_entities() {
        let mut descriptor = SystemDescriptor::new("hud");
        assert_eq!(descriptor.draw_order(), DrawOrder::AfterEntities);
        descriptor.set_draw_order(DrawOrder::BeforeEntities);
        assert_eq!(descriptor.draw_order(), DrawOrder::BeforeEntities);
    }

    #[test]
    fn satisfied_only_with_every_requirement() {
        let mut store = ComponentStore::new(4, 4);
        let both = Entity::new(0, 0);
        let one = Entity::new(1, 0);
        store.attach(both, Position).unwrap();
        store.attach(both, Velocity).unwrap();
        store.attach(one, Position).unwrap();

        let mut descriptor = SystemDescriptor::new("movement");
        assert!(descriptor.is_satisfied_by(&store, Entity::new(2, 0)));

        descriptor.add_required::<Position>().add_required::<Velocity>();
        assert!(descriptor.is_satisfied_by(&store, both));
        assert!(!descriptor.is_satisfied_by(&store, one));
    }
}
