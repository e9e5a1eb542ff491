// entity_ref.rs - Borrowed views of a single live entity

use crate::ecs::{Component, EcsError, Entity, World};

/// Read-only view of a live entity.
#[derive(Clone, Copy)]
pub struct EntityRef<'w> {
    world: &'w World,
    entity: Entity,
}

impl<'w> EntityRef<'w> {
    pub(crate) fn new(world: &'w World, entity: Entity) -> Self {
        Self { world, entity }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn is_active(&self) -> bool {
        self.world.is_active(self.entity)
    }

    pub fn is_marked_for_deletion(&self) -> bool {
        self.world.is_marked_for_deletion(self.entity)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.world.has_tag(self.entity, tag)
    }

    pub fn has_tags<I>(&self, tags: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.world.has_tags(self.entity, tags)
    }

    pub fn tags(&self) -> impl Iterator<Item = &'w str> + 'w {
        self.world.tags(self.entity)
    }

    pub fn has<T: Component>(&self) -> bool {
        self.world.has::<T>(self.entity)
    }

    pub fn get<T: Component>(&self) -> Option<&'w T> {
        self.world.get(self.entity)
    }
}

/// Mutable view of a live entity.
///
/// Handed to scene hooks so they can adjust tags, flags or components of
/// the entity being added or removed.
pub struct EntityMut<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl<'w> EntityMut<'w> {
    pub(crate) fn new(world: &'w mut World, entity: Entity) -> Self {
        Self { world, entity }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn as_readonly(&self) -> EntityRef<'_> {
        EntityRef::new(&*self.world, self.entity)
    }

    /// Mark for deletion; see [`World::destroy`].
    pub fn destroy(&mut self) {
        self.world.destroy(self.entity);
    }

    pub fn set_active(&mut self, active: bool) {
        self.world.set_active(self.entity, active);
    }

    pub fn is_active(&self) -> bool {
        self.world.is_active(self.entity)
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.world.add_tag(self.entity, tag);
    }

    pub fn add_tags<I>(&mut self, tags: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.world.add_tags(self.entity, tags);
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.world.remove_tag(self.entity, tag);
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.world.has_tag(self.entity, tag)
    }

    pub fn attach<T: Component>(&mut self, component: T) -> Result<(), EcsError> {
        self.world.attach(self.entity, component)
    }

    pub fn replace<T: Component>(&mut self, component: T) -> Result<Option<T>, EcsError> {
        self.world.replace(self.entity, component)
    }

    pub fn has<T: Component>(&self) -> bool {
        self.world.has::<T>(self.entity)
    }

    pub fn get<T: Component>(&self) -> Option<&T> {
        self.world.get(self.entity)
    }

    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.world.get_mut(self.entity)
    }

    pub fn detach<T: Component>(&mut self) -> Option<T> {
        self.world.detach(self.entity)
    }

    pub fn detach_all(&mut self) -> usize {
        self.world.detach_all(self.entity)
    }

    pub fn reset_all(&mut self) -> usize {
        self.world.reset_all(self.entity)
    }
}

#[cfg(test)]
mod tests {
    use crate::ecs::{World, WorldConfig};

    #[derive(Debug, PartialEq)]
    struct Health(u32);
    crate::impl_component!(Health);

    #[test]
    fn views_read_and_write_through_to_the_world() {
        let mut world = World::new(WorldConfig::new(4, 4));
        let e = world.spawn().unwrap();

        {
            let mut view = world.entity_mut(e).unwrap();
            view.attach(Health(10)).unwrap();
            view.get_mut::<Health>().unwrap().0 -= 3;
            view.add_tags(["player", "hero"]);
            view.set_active(false);
        }

        let view = world.entity(e).unwrap();
        assert_eq!(view.get::<Health>(), Some(&Health(7)));
        assert!(view.has_tags(["hero", "player"]));
        assert!(!view.is_active());
        assert!(!view.is_marked_for_deletion());
    }

    #[test]
    fn no_view_for_dead_entities() {
        let mut world = World::new(WorldConfig::new(4, 4));
        let e = world.spawn().unwrap();
        world.despawn(e);
        assert!(world.entity(e).is_none());
        assert!(world.entity_mut(e).is_none());
    }
}
