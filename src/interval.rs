use std::{cmp::Ordering, fmt, ops::RangeInclusive};

use crate::error::InvalidInterval;

/// A closed, totally-ordered interval `[low, high]` with `low <= high`.
///
/// An [`Interval`] is ordered by its lower bound, and tie-broken with the upper
/// bound. Two intervals are equal only when both bounds are equal.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Interval<T> {
    low: T,
    high: T,
}

impl<T> Interval<T>
where
    T: Ord,
{
    /// Construct the interval `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInterval`] if `low` is greater than `high`.
    pub fn new(low: T, high: T) -> Result<Self, InvalidInterval> {
        if low > high {
            return Err(InvalidInterval);
        }
        Ok(Self { low, high })
    }

    /// Returns true if `self` and `other` share at least one point.
    ///
    /// Both intervals are closed, so `[1, 5]` intersects `[5, 9]`.
    pub fn intersects(&self, other: &Self) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

impl<T> Interval<T> {
    /// The (inclusive) lower bound.
    pub fn low(&self) -> &T {
        &self.low
    }

    /// The (inclusive) upper bound.
    pub fn high(&self) -> &T {
        &self.high
    }

    /// Explode this [`Interval`] into its `(low, high)` bounds.
    pub fn into_inner(self) -> (T, T) {
        (self.low, self.high)
    }
}

impl<T> PartialOrd for Interval<T>
where
    T: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Interval<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        // The lower bound is the primary ordering value, falling back to the
        // upper bound when the lower bounds are equal.
        match self.low.cmp(&other.low) {
            Ordering::Equal => self.high.cmp(&other.high),
            v => v,
        }
    }
}

impl<T> TryFrom<(T, T)> for Interval<T>
where
    T: Ord,
{
    type Error = InvalidInterval;

    fn try_from((low, high): (T, T)) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

impl<T> TryFrom<RangeInclusive<T>> for Interval<T>
where
    T: Ord,
{
    type Error = InvalidInterval;

    fn try_from(value: RangeInclusive<T>) -> Result<Self, Self::Error> {
        let (low, high) = value.into_inner();
        Self::new(low, high)
    }
}

impl<T> fmt::Display for Interval<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}
