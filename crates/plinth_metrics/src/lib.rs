//! Plinth Metrics - Frame and system timing
//!
//! Provides zero-cost abstractions for metrics collection that completely
//! vanish in production builds via feature flags.
//!
//! # Feature Flags
//!
//! - `metrics` - Enable metrics collection (default: disabled)
//!
//! # Usage
//!
//! ```ignore
//! use plinth_metrics::{FrameTimer, SystemProfiler};
//!
//! let mut timer = FrameTimer::new(60); // Track last 60 frames
//! timer.begin();
//! scene.update(&mut world, dt);
//! timer.end();
//! println!("frame: {:.3} ms", timer.frame_time_ms());
//! ```
//!
//! Without the `metrics` feature every type below is a unit stub and all
//! instrumentation compiles out.

#[cfg(feature = "metrics")]
mod frame_timer;
#[cfg(feature = "metrics")]
mod ring_buffer;
#[cfg(feature = "metrics")]
mod system_profiler;

#[cfg(feature = "metrics")]
pub use frame_timer::FrameTimer;
#[cfg(feature = "metrics")]
pub use ring_buffer::RingBuffer;
#[cfg(feature = "metrics")]
pub use system_profiler::{SystemProfiler, SystemTiming};

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
#[derive(Default)]
pub struct FrameTimer;

#[cfg(not(feature = "metrics"))]
impl FrameTimer {
    pub fn new(_capacity: usize) -> Self { Self }
    pub fn begin(&mut self) {}
    pub fn end(&mut self) {}
    pub fn frames(&self) -> u64 { 0 }
    pub fn fps(&self) -> f64 { 0.0 }
    pub fn frame_time_ms(&self) -> f64 { 0.0 }
    pub fn frame_time_range_ms(&self) -> (f64, f64) { (0.0, 0.0) }
}

#[cfg(not(feature = "metrics"))]
pub struct RingBuffer<T>(std::marker::PhantomData<T>);

#[cfg(not(feature = "metrics"))]
impl<T> RingBuffer<T> {
    pub fn new(_capacity: usize) -> Self { Self(std::marker::PhantomData) }
    pub fn push(&mut self, _value: T) -> Option<T> { None }
    pub fn len(&self) -> usize { 0 }
    pub fn is_empty(&self) -> bool { true }
}

#[cfg(not(feature = "metrics"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemTiming {
    pub total: std::time::Duration,
    pub passes: u64,
}

#[cfg(not(feature = "metrics"))]
#[derive(Default)]
pub struct SystemProfiler;

#[cfg(not(feature = "metrics"))]
impl SystemProfiler {
    pub fn new() -> Self { Self }
    pub fn time_system<F, R>(&mut self, _name: &'static str, f: F) -> R where F: FnOnce() -> R { f() }
    pub fn timing(&self, _name: &str) -> SystemTiming { SystemTiming::default() }
    pub fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    #[test]
    fn stubs_and_real_types_share_an_api() {
        let mut timer = super::FrameTimer::new(60);
        timer.begin();
        timer.end();

        let mut buffer = super::RingBuffer::<std::time::Duration>::new(4);
        buffer.push(std::time::Duration::from_millis(1));

        let mut profiler = super::SystemProfiler::new();
        let value = profiler.time_system("noop", || 7);
        assert_eq!(value, 7);
        profiler.reset();
        assert_eq!(profiler.timing("noop").passes, 0);
    }
}
