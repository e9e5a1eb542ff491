//! Demo components

use glam::Vec2;
use plinth_core::impl_component;

/// Where a ball is, where it is heading and how big it is, in canvas cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub direction: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl Transform {
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Advance by `dt`, reflecting off the edges of a `bounds`-sized arena.
    pub fn step(&mut self, bounds: Vec2, dt: f32) {
        let radius = self.radius();
        let moved = self.position + self.direction * self.speed * dt;

        let (x, dx) = reflect(moved.x, self.direction.x, radius, bounds.x - radius);
        let (y, dy) = reflect(moved.y, self.direction.y, radius, bounds.y - radius);
        self.position = Vec2::new(x, y);
        self.direction = Vec2::new(dx, dy);
    }
}

fn reflect(position: f32, direction: f32, low: f32, high: f32) -> (f32, f32) {
    if position <= low {
        (low, direction.abs())
    } else if position >= high {
        (high, -direction.abs())
    } else {
        (position, direction)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub color: [u8; 3],
    pub glyph: char,
}

impl_component!(Transform, Sprite);

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(position: Vec2, direction: Vec2) -> Transform {
        Transform {
            position,
            direction,
            size: 2.0,
            speed: 1.0,
        }
    }

    #[test]
    fn moves_along_direction() {
        let mut t = ball(Vec2::new(5.0, 5.0), Vec2::new(1.0, 0.0));
        t.step(Vec2::new(20.0, 20.0), 2.0);
        assert_eq!(t.position, Vec2::new(7.0, 5.0));
        assert_eq!(t.direction, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn bounces_off_each_edge() {
        let bounds = Vec2::new(10.0, 10.0);

        let mut t = ball(Vec2::new(1.5, 8.5), Vec2::new(-1.0, 1.0));
        t.step(bounds, 1.0);
        assert_eq!(t.position, Vec2::new(1.0, 9.0));
        assert_eq!(t.direction, Vec2::new(1.0, -1.0));

        let mut t = ball(Vec2::new(8.5, 1.5), Vec2::new(1.0, -1.0));
        t.step(bounds, 1.0);
        assert_eq!(t.position, Vec2::new(9.0, 1.0));
        assert_eq!(t.direction, Vec2::new(-1.0, 1.0));
    }
}
