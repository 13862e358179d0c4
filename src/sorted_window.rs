use std::cmp::Ordering;
use std::num::NonZeroUsize;

use crate::sample::Sample;

/// Ascending multiset of the samples currently inside a window.
///
/// Insertion and removal use a binary search followed by a shift, O(W) per
/// update. Equal values are interchangeable, so which instance `remove`
/// takes out does not affect any order statistic.
#[derive(Debug, Clone)]
pub struct SortedWindow<T: Sample> {
    sorted: Vec<T>,
}

impl<T: Sample> SortedWindow<T> {
    pub fn with_capacity(width: usize) -> Self {
        Self {
            sorted: Vec::with_capacity(width),
        }
    }

    /// Inserts `value` after any equal values already present.
    pub fn insert(&mut self, value: T) {
        let pos = self
            .sorted
            .partition_point(|x| x.order(&value) != Ordering::Greater);
        self.sorted.insert(pos, value);
    }

    /// Removes one instance of `value`. Returns false if it is not present.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.sorted.binary_search_by(|x| x.order(value)) {
            Ok(pos) => {
                self.sorted.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// The `rank`-th smallest value (1-indexed). A rank above the number of
    /// held values is clamped to it, so the maximum is reported.
    pub fn nth(&self, rank: NonZeroUsize) -> Option<T> {
        let len = self.sorted.len();
        if len == 0 {
            return None;
        }
        Some(self.sorted[rank.get().min(len) - 1])
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn clear(&mut self) {
        self.sorted.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.sorted
    }
}
