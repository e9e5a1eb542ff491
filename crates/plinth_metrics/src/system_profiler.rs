//! Per-system pass timing

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Accumulated time and pass count for one system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemTiming {
    pub total: Duration,
    pub passes: u64,
}

impl SystemTiming {
    pub fn average(&self) -> Duration {
        if self.passes == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(self.total.as_secs_f64() / self.passes as f64)
        }
    }
}

/// Keyed by the system's static name, so timing a pass never allocates.
#[derive(Default)]
pub struct SystemProfiler {
    timings: HashMap<&'static str, SystemTiming>,
}

impl SystemProfiler {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
        }
    }

    pub fn time_system<F, R>(&mut self, name: &'static str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        let timing = self.timings.entry(name).or_default();
        timing.total += elapsed;
        timing.passes += 1;
        result
    }

    pub fn timing(&self, name: &str) -> SystemTiming {
        self.timings.get(name).copied().unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.timings.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, SystemTiming)> + '_ {
        self.timings.iter().map(|(name, timing)| (*name, *timing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_accumulate_per_name() {
        let mut profiler = SystemProfiler::new();
        profiler.time_system("physics", || ());
        profiler.time_system("physics", || ());
        profiler.time_system("graphics", || ());

        assert_eq!(profiler.timing("physics").passes, 2);
        assert_eq!(profiler.timing("graphics").passes, 1);
        assert_eq!(profiler.timing("missing"), SystemTiming::default());
        assert_eq!(profiler.iter().count(), 2);

        profiler.reset();
        assert_eq!(profiler.timing("physics").passes, 0);
    }

    #[test]
    fn average_survives_pass_counts_past_u32() {
        let timing = SystemTiming {
            total: Duration::from_secs(1 << 32),
            passes: 1 << 32,
        };
        assert_eq!(timing.average(), Duration::from_secs(1));

        let timing = SystemTiming {
            total: Duration::from_secs(3),
            passes: 2,
        };
        assert_eq!(timing.average(), Duration::from_millis(1500));
    }
}
