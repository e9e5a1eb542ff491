//! Demo systems

use super::canvas::Canvas;
use super::components::{Sprite, Transform};
use glam::Vec2;
use plinth_core::{Entity, Frame, SceneView, System, SystemDescriptor};

/// Moves every entity with a [`Transform`] and bounces it off the arena.
pub struct PhysicsSystem {
    bounds: Vec2,
}

impl PhysicsSystem {
    pub fn new(bounds: Vec2) -> Self {
        Self { bounds }
    }
}

impl System<Canvas> for PhysicsSystem {
    fn init(&mut self, descriptor: &mut SystemDescriptor) {
        descriptor.add_required::<Transform>();
    }

    fn update_entity(&mut self, frame: &mut Frame<'_>, entity: Entity, dt: f32) {
        if let Some(transform) = frame.get_mut::<Transform>(entity) {
            transform.step(self.bounds, dt);
        }
    }
}

/// Draws sprites at their transforms, then a title line over them.
pub struct GraphicsSystem {
    title: String,
}

impl GraphicsSystem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl System<Canvas> for GraphicsSystem {
    fn init(&mut self, descriptor: &mut SystemDescriptor) {
        descriptor
            .add_required::<Transform>()
            .add_required::<Sprite>();
    }

    fn draw(&mut self, _view: &SceneView<'_>, canvas: &mut Canvas) {
        canvas.text(0, 0, &self.title);
    }

    fn draw_entity(&mut self, view: &SceneView<'_>, entity: Entity, canvas: &mut Canvas) {
        let (Some(transform), Some(sprite)) =
            (view.get::<Transform>(entity), view.get::<Sprite>(entity))
        else {
            return;
        };
        let cell = transform.position.floor();
        canvas.put(cell.x as i32, cell.y as i32, sprite.glyph);
    }
}
