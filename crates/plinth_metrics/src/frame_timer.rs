//! Host-loop frame timing

use super::ring_buffer::RingBuffer;
use std::time::{Duration, Instant};

/// Measures `begin`..`end` spans over a rolling window of recent frames.
pub struct FrameTimer {
    started: Option<Instant>,
    recent: RingBuffer<Duration>,
    frames: u64,
}

impl FrameTimer {
    /// `window` is the number of recent frames averaged.
    pub fn new(window: usize) -> Self {
        Self {
            started: None,
            recent: RingBuffer::new(window),
            frames: 0,
        }
    }

    pub fn begin(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Close the span opened by `begin`. Ignored without a matching `begin`.
    pub fn end(&mut self) {
        if let Some(started) = self.started.take() {
            self.recent.push(started.elapsed());
            self.frames += 1;
        }
    }

    /// Frames completed since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f64 {
        match self.recent.average().as_secs_f64() {
            secs if secs > 0.0 => secs.recip(),
            _ => 0.0,
        }
    }

    pub fn frame_time_ms(&self) -> f64 {
        to_ms(self.recent.average())
    }

    pub fn frame_time_range_ms(&self) -> (f64, f64) {
        let (fastest, slowest) = self.recent.min_max();
        (to_ms(fastest), to_ms(slowest))
    }
}

fn to_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
