/// A sorted reference distribution of values.
///
/// Values are kept in ascending order with duplicates retained, so equal
/// values form a contiguous tie block. The distribution is immutable once
/// built; it only answers median and rank queries.
///
/// # Examples
///
/// ```
/// use thermik_stats::distribution::SortedDistribution;
///
/// let dist = SortedDistribution::new([300.0, 100.0, 200.0]);
/// assert_eq!(dist.as_slice(), &[100.0, 200.0, 300.0]);
/// assert_eq!(dist.median(), Some(200.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedDistribution {
    values: Vec<f64>,
}

/// The 1-based rank positions occupied by a value's tie block.
///
/// `first` is the rank of the first occurrence scanning from the low end,
/// `last` the rank of the final occurrence. `first <= last` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankRange {
    pub first: usize,
    pub last: usize,
}

impl RankRange {
    /// Returns `true` if `position` lies within `[first, last]`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn contains(&self, position: f64) -> bool {
        self.first as f64 <= position && self.last as f64 >= position
    }

    /// Distance from `position` to the nearer edge of the block.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn distance_to(&self, position: f64) -> f64 {
        let to_first = (position - self.first as f64).abs();
        let to_last = (position - self.last as f64).abs();
        to_first.min(to_last)
    }
}

impl SortedDistribution {
    /// Builds a distribution from unsorted values.
    ///
    /// Values are sorted with [`f64::total_cmp`].
    #[must_use]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self { values }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Returns the population midpoint `len / 2` as a real number.
    ///
    /// This is the reference position rank ranges are compared against. For
    /// an even count it falls between two ranks.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.values.len() as f64 / 2.0
    }

    /// Returns the positional median, the element at zero-based index
    /// `floor(len / 2)`.
    ///
    /// Even-length distributions are not averaged: the median of
    /// `[1, 2, 3, 4]` is `3`. Returns `None` if the distribution is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use thermik_stats::distribution::SortedDistribution;
    ///
    /// let dist = SortedDistribution::new([1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(dist.median(), Some(3.0));
    /// assert_eq!(SortedDistribution::default().median(), None);
    /// ```
    #[must_use]
    pub fn median(&self) -> Option<f64> {
        self.values.get(self.values.len() / 2).copied()
    }

    /// Returns the 1-based rank range of `value`'s tie block.
    ///
    /// `first` is the position of the first occurrence scanning forward,
    /// `last` is `len - (index of the first occurrence scanning backward)`.
    /// Returns `None` if `value` does not occur in the distribution.
    ///
    /// # Examples
    ///
    /// ```
    /// use thermik_stats::distribution::{RankRange, SortedDistribution};
    ///
    /// let dist = SortedDistribution::new([1.0, 5.0, 5.0, 5.0, 9.0]);
    /// assert_eq!(dist.rank_range(5.0), Some(RankRange { first: 2, last: 4 }));
    /// assert_eq!(dist.rank_range(4.0), None);
    /// ```
    #[must_use]
    #[expect(clippy::float_cmp)]
    pub fn rank_range(&self, value: f64) -> Option<RankRange> {
        let first_index = self.values.iter().position(|v| *v == value)?;
        let reverse_index = self.values.iter().rev().position(|v| *v == value)?;
        Some(RankRange {
            first: first_index + 1,
            last: self.values.len() - reverse_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_distribution() {
        let dist = SortedDistribution::new([]);
        assert!(dist.is_empty());
        assert_eq!(dist.median(), None);
        assert_eq!(dist.rank_range(1.0), None);
    }

    #[test]
    fn test_positional_median_even_length() {
        let dist = SortedDistribution::new([4.0, 2.0, 1.0, 3.0]);
        assert_eq!(dist.median(), Some(3.0));
    }

    #[test]
    fn test_positional_median_odd_length() {
        let dist = SortedDistribution::new([300.0, 100.0, 200.0]);
        assert_eq!(dist.median(), Some(200.0));
    }

    #[test]
    fn test_rank_range_unique_values() {
        let dist = SortedDistribution::new([100.0, 200.0, 300.0]);
        assert_eq!(dist.rank_range(100.0), Some(RankRange { first: 1, last: 1 }));
        assert_eq!(dist.rank_range(300.0), Some(RankRange { first: 3, last: 3 }));
    }

    #[test]
    fn test_rank_range_covers_tie_block() {
        let dist = SortedDistribution::new([7.0, 1.0, 7.0, 3.0, 7.0, 9.0, 3.0]);
        let slice = dist.as_slice();
        for &v in slice {
            let range = dist.rank_range(v).unwrap();
            assert!(range.first <= range.last);
            for rank in range.first..=range.last {
                assert_eq!(slice[rank - 1], v, "rank {rank} should hold {v}");
            }
            // The block is maximal: neighbours differ.
            if range.first > 1 {
                assert_ne!(slice[range.first - 2], v);
            }
            if range.last < slice.len() {
                assert_ne!(slice[range.last], v);
            }
        }
    }

    #[test]
    fn test_rank_range_all_equal() {
        let dist = SortedDistribution::new([5.0; 6]);
        assert_eq!(dist.rank_range(5.0), Some(RankRange { first: 1, last: 6 }));
    }

    #[test]
    fn test_rank_range_contains_midpoint() {
        let range = RankRange { first: 2, last: 4 };
        assert!(range.contains(2.0));
        assert!(range.contains(3.5));
        assert!(range.contains(4.0));
        assert!(!range.contains(1.5));
        assert!(!range.contains(4.5));
    }

    #[test]
    fn test_distance_to_nearer_edge() {
        let range = RankRange { first: 1, last: 1 };
        assert!((range.distance_to(1.5) - 0.5).abs() < 1e-12);

        let range = RankRange { first: 6, last: 9 };
        assert!((range.distance_to(2.5) - 3.5).abs() < 1e-12);
    }
}
