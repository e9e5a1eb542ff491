//! Rolling window of recent samples

use std::collections::VecDeque;
use std::time::Duration;

/// Keeps the most recent `capacity` samples; pushing into a full window
/// evicts the oldest.
pub struct RingBuffer<T> {
    window: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the evicted sample, if the window was full.
    pub fn push(&mut self, sample: T) -> Option<T> {
        let evicted = if self.window.len() == self.capacity {
            self.window.pop_front()
        } else {
            None
        };
        self.window.push_back(sample);
        evicted
    }

    pub fn latest(&self) -> Option<&T> {
        self.window.back()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

impl RingBuffer<Duration> {
    pub fn average(&self) -> Duration {
        match self.window.len() as u32 {
            0 => Duration::ZERO,
            count => self.window.iter().sum::<Duration>() / count,
        }
    }

    pub fn min_max(&self) -> (Duration, Duration) {
        self.window
            .iter()
            .fold(None, |range, &sample| match range {
                None => Some((sample, sample)),
                Some((low, high)) => Some((sample.min(low), sample.max(high))),
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn window_drops_oldest_sample() {
        let mut buffer = RingBuffer::new(3);

        assert_eq!(buffer.push(ms(10)), None);
        assert_eq!(buffer.average(), ms(10));

        buffer.push(ms(20));
        buffer.push(ms(30));
        assert_eq!(buffer.average(), ms(20));

        assert_eq!(buffer.push(ms(40)), Some(ms(10)));
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.latest(), Some(&ms(40)));
        assert_eq!(buffer.average(), ms(30));
        assert_eq!(buffer.min_max(), (ms(20), ms(40)));
    }

    #[test]
    fn empty_window_reports_zero() {
        let buffer = RingBuffer::<Duration>::new(0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.average(), Duration::ZERO);
        assert_eq!(buffer.min_max(), (Duration::ZERO, Duration::ZERO));
    }
}
