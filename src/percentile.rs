//! Running percentile over a whole buffer.
//!
//! For every position `i` the output holds the `rank`-th smallest value of the
//! trailing window `input[max(0, i - window + 1)..=i]`. While the window is
//! still growing the rank is clamped to the number of samples seen, so a rank
//! larger than the occupancy reports the maximum seen so far.

use std::num::NonZeroUsize;

use log::debug;

use crate::error::PercentileError;
use crate::sample::Sample;
use crate::sorted_window::SortedWindow;

/// Computes the running percentile of `input` into a newly allocated buffer.
///
/// ```
/// use std::num::NonZeroUsize;
/// use running_prctile::running_percentile;
///
/// let window = NonZeroUsize::new(3).unwrap();
/// let rank = NonZeroUsize::new(2).unwrap();
/// let out = running_percentile(&[3.0, 1.0, 4.0, 1.0, 5.0], window, rank);
/// assert_eq!(out, vec![3.0, 3.0, 3.0, 1.0, 4.0]);
/// ```
pub fn running_percentile<T: Sample>(
    input: &[T],
    window: NonZeroUsize,
    rank: NonZeroUsize,
) -> Vec<T> {
    let mut output = input.to_vec();
    compute(input, &mut output, window, rank);
    output
}

/// Computes the running percentile of `input` into a caller-allocated buffer
/// of the same length.
pub fn running_percentile_into<T: Sample>(
    input: &[T],
    output: &mut [T],
    window: NonZeroUsize,
    rank: NonZeroUsize,
) -> Result<(), PercentileError> {
    if input.len() != output.len() {
        return Err(PercentileError::LengthMismatch {
            input: input.len(),
            output: output.len(),
        });
    }
    compute(input, output, window, rank);
    Ok(())
}

fn compute<T: Sample>(input: &[T], output: &mut [T], window: NonZeroUsize, rank: NonZeroUsize) {
    debug!(
        "Running percentile over {} samples, window {}, rank {}",
        input.len(),
        window,
        rank
    );
    let width = window.get();
    let mut sorted = SortedWindow::with_capacity(width.min(input.len()));

    for (i, (value, out)) in input.iter().zip(output.iter_mut()).enumerate() {
        if i >= width {
            let removed = sorted.remove(&input[i - width]);
            debug_assert!(removed, "evicted sample missing from the window");
        }
        sorted.insert(*value);
        if let Some(statistic) = sorted.nth(rank) {
            *out = statistic;
        }
    }
}

/// Rank of the median-like order statistic, `ceil(window / 2)`.
pub fn median_rank(window: NonZeroUsize) -> NonZeroUsize {
    NonZeroUsize::new(window.get().div_ceil(2)).unwrap_or(NonZeroUsize::MIN)
}

/// Nearest-rank conversion of a percentage to a rank within `window`:
/// `ceil(percent / 100 * window)`, never below 1.
pub fn rank_for_percentile(
    window: NonZeroUsize,
    percent: f64,
) -> Result<NonZeroUsize, PercentileError> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(PercentileError::InvalidPercentile(percent));
    }
    let rank = (percent * window.get() as f64 / 100.0).ceil() as usize;
    Ok(NonZeroUsize::new(rank.min(window.get())).unwrap_or(NonZeroUsize::MIN))
}
