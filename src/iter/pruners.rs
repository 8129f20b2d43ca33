use crate::{interval::Interval, node::Node};

use super::pruning_iter::PruningOracle;

/// Prunes the right subtree against the query *upper* bound.
///
/// A right subtree whose intervals all end before `query.high` is skipped,
/// even though one of them may still reach `query.low`. This under-reports
/// some matches (see [`OverlapsPruner`] for the exhaustive bound).
#[derive(Debug)]
pub(crate) struct SearchAllPruner;

impl<T, V> PruningOracle<T, V> for SearchAllPruner
where
    T: Ord,
{
    fn visit_left(&self, left: &Node<T, V>, query: &Interval<T>) -> bool {
        left.max_high() >= query.low()
    }

    fn visit_right(&self, _parent: &Node<T, V>, right: &Node<T, V>, query: &Interval<T>) -> bool {
        right.max_high() >= query.high()
    }

    fn filter_yield(&self, n: &Node<T, V>, query: &Interval<T>) -> bool {
        n.interval().intersects(query)
    }
}

/// Visits every subtree that may hold an interval intersecting the query.
#[derive(Debug)]
pub(crate) struct OverlapsPruner;

impl<T, V> PruningOracle<T, V> for OverlapsPruner
where
    T: Ord,
{
    fn visit_left(&self, left: &Node<T, V>, query: &Interval<T>) -> bool {
        left.max_high() >= query.low()
    }

    fn visit_right(&self, parent: &Node<T, V>, right: &Node<T, V>, query: &Interval<T>) -> bool {
        // Every interval in the right subtree starts at or after the parent.
        // If the parent starts beyond the query, so does the whole subtree.
        right.max_high() >= query.low() && parent.interval().low() <= query.high()
    }

    fn filter_yield(&self, n: &Node<T, V>, query: &Interval<T>) -> bool {
        n.interval().intersects(query)
    }
}
