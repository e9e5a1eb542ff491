//! Headless bouncing-ball demo
//!
//! Spawns a handful of balls with random transforms and sprites, then runs
//! the update/draw loop for a fixed number of frames, printing the canvas
//! now and then.

mod canvas;
mod components;
mod rng;
mod systems;

pub use canvas::Canvas;
pub use components::{Sprite, Transform};
pub use rng::DeterministicRng;
pub use systems::{GraphicsSystem, PhysicsSystem};

use anyhow::{Context, Result};
use glam::Vec2;
use plinth_core::{Scene, World};
use plinth_metrics::FrameTimer;
use plinth_services::Settings;
use tracing::{debug, info};

const TITLE: &str = "Plinth ECS example";

const PALETTE: [Sprite; 5] = [
    Sprite { color: [224, 187, 228], glyph: 'o' },
    Sprite { color: [149, 125, 173], glyph: 'O' },
    Sprite { color: [210, 145, 188], glyph: '@' },
    Sprite { color: [254, 200, 216], glyph: '*' },
    Sprite { color: [255, 223, 211], glyph: '.' },
];

/// Final state of a demo run.
pub struct DemoReport {
    pub frames: u32,
    pub live_entities: usize,
    pub last_frame: String,
}

pub fn run(settings: &Settings) -> Result<DemoReport> {
    let demo = &settings.demo;
    let bounds = Vec2::new(demo.arena_width as f32, demo.arena_height as f32);

    let mut world = World::new(settings.world);
    let mut scene: Scene<Canvas> = Scene::new(&mut world);
    scene.add_system(PhysicsSystem::new(bounds));
    scene.add_system(GraphicsSystem::new(TITLE));

    let mut rng = DeterministicRng::new(demo.seed);
    for _ in 0..demo.ball_count {
        let ball = random_ball(&mut rng, bounds);
        scene
            .spawn(&mut world, ball)
            .context("failed to spawn demo ball")?;
    }
    info!(
        balls = demo.ball_count,
        seed = rng.seed(),
        width = demo.arena_width,
        height = demo.arena_height,
        "demo scene ready"
    );

    let mut canvas = Canvas::new(demo.arena_width as usize, demo.arena_height as usize);
    let mut timer = FrameTimer::new(60);
    for frame in 1..=demo.frames {
        timer.begin();
        scene.update(&mut world, demo.delta_time);
        canvas.clear();
        scene.draw(&world, &mut canvas);
        timer.end();

        if demo.draw_every > 0 && frame % demo.draw_every == 0 {
            println!("frame {frame}\n{}", canvas.render());
        }
    }

    for (system, timing) in scene.profiler().iter() {
        debug!(
            system,
            passes = timing.passes,
            avg_us = timing.average().as_micros() as u64,
            "system timing"
        );
    }
    let (min_ms, max_ms) = timer.frame_time_range_ms();
    info!(
        frames = timer.frames(),
        frame_time_ms = timer.frame_time_ms(),
        min_ms,
        max_ms,
        fps = timer.fps(),
        "demo finished"
    );

    Ok(DemoReport {
        frames: demo.frames,
        live_entities: world.live_count(),
        last_frame: canvas.render(),
    })
}

fn random_ball(rng: &mut DeterministicRng, bounds: Vec2) -> (Transform, Sprite) {
    let size = rng.range_f32(1.0, 2.0);
    let radius = size / 2.0;
    let position = Vec2::new(
        rng.range_f32(radius, (bounds.x - radius).max(radius)),
        rng.range_f32(radius, (bounds.y - radius).max(radius)),
    );
    let direction = Vec2::new(rng.range_f32(-1.0, 1.0), rng.range_f32(-1.0, 1.0));
    let transform = Transform {
        position,
        direction: direction.normalize_or_zero(),
        size,
        speed: rng.range_f32(4.0, 8.0),
    };
    let sprite = rng.choose(&PALETTE).copied().unwrap_or(PALETTE[0]);
    (transform, sprite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plinth_services::DemoSettings;

    fn small_settings() -> Settings {
        Settings {
            demo: DemoSettings {
                frames: 10,
                ball_count: 5,
                arena_width: 20,
                arena_height: 8,
                draw_every: 0,
                ..DemoSettings::default()
            },
            ..Settings::default()
        }
    }

    #[test]
    fn runs_the_requested_frames() {
        let report = run(&small_settings()).unwrap();
        assert_eq!(report.frames, 10);
        assert_eq!(report.live_entities, 5);
        assert!(report.last_frame.contains(TITLE));
    }

    #[test]
    fn same_seed_renders_the_same_frame() {
        let first = run(&small_settings()).unwrap();
        let second = run(&small_settings()).unwrap();
        assert_eq!(first.last_frame, second.last_frame);
    }

    #[test]
    fn too_many_balls_is_an_error() {
        let mut settings = small_settings();
        settings.world.max_entities = 2;
        assert!(run(&settings).is_err());
    }
}
