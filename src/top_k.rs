//! Bounded top-k aggregator for segment lengths.
//!
//! Keeps the `k` largest values of an unbounded stream in an ordered multiset and
//! answers the aggregate queries a k-opt search uses to score a candidate state.
//!
//! Every "no data" query returns [`Value::ZERO`] instead of failing. A zero result is
//! therefore ambiguous between a real zero and too few values; check [`BoundedTopK::len`]
//! when the difference matters.
//!
//! Aggregates saturate at the value type's bounds rather than overflowing.

use std::collections::BTreeMap;

use tracing::trace;

use crate::primitives::{Length, Value};

/// Retains the `k` largest values seen so far; duplicates are kept.
///
/// Values are stored as `value -> multiplicity`, so insertion and eviction are O(log k).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedTopK<V = Length> {
    /// Maximum number of retained values
    k: usize,
    /// Retained values with their multiplicity
    counts: BTreeMap<V, usize>,
    /// Total retained values (sum of multiplicities)
    len: usize,
}

impl<V: Value> BoundedTopK<V> {
    /// Creates an empty container that retains at most `k` values.
    ///
    /// # Example
    /// ```
    /// use kopt::BoundedTopK;
    /// let top: BoundedTopK<i64> = BoundedTopK::new(3);
    /// assert_eq!(top.capacity(), 3);
    /// assert!(top.is_empty());
    /// ```
    pub fn new(k: usize) -> Self {
        Self {
            k,
            counts: BTreeMap::new(),
            len: 0,
        }
    }

    /// Offers a value to the container.
    ///
    /// Below capacity the value is always admitted. At capacity it must be strictly
    /// greater than the current minimum; one instance of that minimum is then evicted.
    /// Returns `false` only when the value was too small to be kept.
    ///
    /// # Example
    /// ```
    /// use kopt::BoundedTopK;
    /// let mut top = BoundedTopK::new(2);
    /// assert!(top.insert(3));
    /// assert!(top.insert(7));
    /// assert!(!top.insert(3)); // ties with the minimum are rejected
    /// assert!(top.insert(9));  // evicts 3
    /// assert_eq!(top.to_vec(), vec![7, 9]);
    /// ```
    pub fn insert(&mut self, value: V) -> bool {
        if self.len < self.k {
            self.push(value);
            return true;
        }
        // k == 0 has nothing to compare against
        let Some(min) = self.counts.keys().next().copied() else {
            return false;
        };
        if value <= min {
            return false;
        }
        self.evict_one(min);
        self.push(value);
        trace!(evicted = ?min, admitted = ?value, "top-k minimum evicted");
        true
    }

    /// Ascending view of the retained values, duplicates included.
    pub fn values(&self) -> impl Iterator<Item = V> + '_ {
        self.counts
            .iter()
            .flat_map(|(&value, &count)| std::iter::repeat_n(value, count))
    }

    /// Retained values as an ascending vector.
    pub fn to_vec(&self) -> Vec<V> {
        let mut out = Vec::with_capacity(self.len);
        out.extend(self.values());
        out
    }

    /// Sum of all retained values, `ZERO` when empty.
    pub fn sum(&self) -> V {
        self.values().fold(V::ZERO, V::saturating_add)
    }

    /// Sum of the two largest retained values, `ZERO` when fewer than two are held.
    pub fn sum_top_two(&self) -> V {
        let mut descending = self.counts.iter().rev();
        match descending.next() {
            Some((&max, &count)) if count >= 2 => max.saturating_add(max),
            Some((&max, _)) => descending
                .next()
                .map_or(V::ZERO, |(&next, _)| max.saturating_add(next)),
            None => V::ZERO,
        }
    }

    /// Smallest retained value, `ZERO` when empty.
    pub fn min(&self) -> V {
        self.counts.keys().next().copied().unwrap_or(V::ZERO)
    }

    /// Score of a full container for k-opt comparisons.
    ///
    /// The two smallest values are folded into `(a + b + 1) / 2` with integer
    /// truncation; every other retained value counts fully. Returns `ZERO` until the
    /// container holds exactly `k` values, and also when `k < 2` since there is no
    /// pair to fold.
    ///
    /// # Example
    /// ```
    /// use kopt::BoundedTopK;
    /// let mut top = BoundedTopK::new(3);
    /// top.extend([4, 6, 10]);
    /// // (4 + 6 + 1) / 2 + 10
    /// assert_eq!(top.kopt_sum(), 15);
    /// ```
    pub fn kopt_sum(&self) -> V {
        if self.len < self.k || self.len < 2 {
            return V::ZERO;
        }
        let mut ascending = self.values();
        let (Some(first), Some(second)) = (ascending.next(), ascending.next()) else {
            return V::ZERO;
        };
        ascending.fold(V::fold_pair(first, second), V::saturating_add)
    }

    /// Value a new insert has to exceed, if the container is full.
    pub fn threshold(&self) -> Option<V> {
        if self.is_full() {
            self.counts.keys().next().copied()
        } else {
            None
        }
    }

    /// Maximum number of retained values.
    pub fn capacity(&self) -> usize {
        self.k
    }

    /// Number of retained values, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no value is retained.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true once `k` values are retained.
    pub fn is_full(&self) -> bool {
        self.len >= self.k
    }

    /// Drops every retained value; the capacity is unchanged.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.len = 0;
    }

    fn push(&mut self, value: V) {
        *self.counts.entry(value).or_insert(0) += 1;
        self.len += 1;
    }

    fn evict_one(&mut self, value: V) {
        if let Some(count) = self.counts.get_mut(&value) {
            *count -= 1;
            if *count == 0 {
                let _removed = self.counts.remove(&value);
            }
            self.len -= 1;
        }
    }
}

impl<V: Value> Extend<V> for BoundedTopK<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            let _admitted = self.insert(value);
        }
    }
}
