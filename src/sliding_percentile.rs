use std::num::NonZeroUsize;

use ringbuf::traits::{Consumer, Observer, Producer};
use ringbuf::HeapRb;

use crate::sample::Sample;
use crate::sorted_window::SortedWindow;

/// A running percentile filter for one channel. A ring buffer holds the raw
/// window in arrival order and a sorted vector gives the order statistic.
///
/// Feeding a sequence through [`SlidingPercentile::consume`] yields the same
/// values as [`crate::running_percentile`] over that sequence, while memory
/// stays bounded by the window width.
pub struct SlidingPercentile<T: Sample> {
    window: HeapRb<T>,
    sorted: SortedWindow<T>,
    width: NonZeroUsize,
    rank: NonZeroUsize,
}

impl<T: Sample> SlidingPercentile<T> {
    /// Creates a filter reporting the `rank`-th smallest value (1-indexed)
    /// of the last `width` samples.
    pub fn new(width: NonZeroUsize, rank: NonZeroUsize) -> Self {
        Self {
            window: HeapRb::new(width.get()),
            sorted: SortedWindow::with_capacity(width.get()),
            width,
            rank,
        }
    }

    /// Consumes a new value, evicting the oldest one once the window is full,
    /// then returns the current statistic.
    pub fn consume(&mut self, value: T) -> T {
        if self.window.is_full() {
            if let Some(old_value) = self.window.try_pop() {
                let removed = self.sorted.remove(&old_value);
                debug_assert!(removed, "ring buffer and sorted window diverged");
            }
        }
        // Cannot fail, a slot was freed above if the buffer was full.
        let _ = self.window.try_push(value);
        self.sorted.insert(value);

        self.value().unwrap_or(value)
    }

    /// Feeds every value of `input` through the filter, writing results to
    /// the matching position of `output`.
    pub fn consume_slice(&mut self, input: &[T], output: &mut [T]) {
        for (value, out) in input.iter().zip(output.iter_mut()) {
            *out = self.consume(*value);
        }
    }

    /// The current statistic, `None` before the first sample.
    pub fn value(&self) -> Option<T> {
        self.sorted.nth(self.rank)
    }

    /// Number of samples currently in the window.
    pub fn occupancy(&self) -> usize {
        self.window.occupied_len()
    }

    /// Rank actually used for the current occupancy.
    pub fn effective_rank(&self) -> usize {
        self.rank.get().min(self.occupancy())
    }

    pub fn is_full(&self) -> bool {
        self.window.is_full()
    }

    pub fn window(&self) -> NonZeroUsize {
        self.width
    }

    pub fn rank(&self) -> NonZeroUsize {
        self.rank
    }

    /// Drops every held sample; the next value starts a new growing window.
    pub fn reset(&mut self) {
        self.window.clear();
        self.sorted.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::running_percentile;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_median_increasing_sequence() {
        let mut filter = SlidingPercentile::new(nz(5), nz(3));

        assert_eq!(filter.consume(1.0), 1.0); // Window: [1]
        assert_eq!(filter.consume(2.0), 2.0); // Window: [1,2] -> clamped to max
        assert_eq!(filter.consume(3.0), 3.0); // Window: [1,2,3]
        assert_eq!(filter.consume(4.0), 3.0); // Window: [1,2,3,4]
        assert_eq!(filter.consume(5.0), 3.0); // Window: [1,2,3,4,5]

        // 1.0 leaves the window: [2,3,4,5,6]
        assert_eq!(filter.consume(6.0), 4.0);
        assert!(filter.is_full());
    }

    #[test]
    fn test_occupancy_grows_then_stays() {
        let mut filter = SlidingPercentile::new(nz(3), nz(2));
        assert_eq!(filter.value(), None);
        let mut seen = Vec::new();
        for v in [10, 1, 5, 3, 8, 2] {
            filter.consume(v);
            seen.push((filter.occupancy(), filter.effective_rank()));
        }
        assert_eq!(seen, vec![(1, 1), (2, 2), (3, 2), (3, 2), (3, 2), (3, 2)]);
    }

    #[test]
    fn test_matches_batch_computation() {
        let input = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0, 5.0];
        for width in 1..=6 {
            for rank in 1..=7 {
                let mut filter = SlidingPercentile::new(nz(width), nz(rank));
                let mut output = [0.0; 11];
                filter.consume_slice(&input, &mut output);
                assert_eq!(
                    output.to_vec(),
                    running_percentile(&input, nz(width), nz(rank)),
                    "width {width} rank {rank}"
                );
            }
        }
    }

    #[test]
    fn test_reset_restarts_growing_window() {
        let mut filter = SlidingPercentile::new(nz(2), nz(2));
        filter.consume(true);
        filter.consume(false);
        filter.reset();
        assert_eq!(filter.occupancy(), 0);
        assert_eq!(filter.consume(false), false);
        assert_eq!(filter.consume(true), true);
        assert_eq!(filter.window().get(), 2);
        assert_eq!(filter.rank().get(), 2);
    }
}
