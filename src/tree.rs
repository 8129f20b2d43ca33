use std::fmt::Debug;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::{
    error::InvariantViolation,
    interval::Interval,
    iter::{IntoIter, Iter, OverlapsPruner, PruningIter, SearchAllPruner},
    node::{self, insert_at_root, Node},
};

/// The result of inserting an interval into an [`IntervalSearchTree`].
#[must_use = "a duplicate insert is rejected and hands the label back"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<V> {
    /// The interval was not present and has been inserted.
    Inserted,

    /// An equal interval is already present. The tree is unchanged (the
    /// existing label is retained) and the rejected label is returned.
    Duplicate(V),
}

impl<V> InsertOutcome<V> {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    /// Take the rejected label, if the insert was a duplicate.
    pub fn into_rejected(self) -> Option<V> {
        match self {
            Self::Inserted => None,
            Self::Duplicate(v) => Some(v),
        }
    }
}

/// An interval search tree mapping unique [`Interval`] keys to labels of type
/// `V`.
///
/// Each node caches the size of its subtree and the largest upper bound within
/// it, which overlap searches use to prune subtrees that cannot contain a
/// match.
///
/// The tree is not explicitly balanced. Removals replace a two-child node with
/// a size-weighted random join of its subtrees, drawing from the random source
/// `G`, which keeps the expected height logarithmic for random workloads.
#[derive(Debug, Clone)]
pub struct IntervalSearchTree<T, V, G = StdRng> {
    root: Option<Box<Node<T, V>>>,
    rng: G,
}

impl<T, V> IntervalSearchTree<T, V, StdRng> {
    /// An empty tree drawing join decisions from an entropy-seeded [`StdRng`].
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// An empty tree with a reproducible random source.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<T, V> Default for IntervalSearchTree<T, V, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V, G> IntervalSearchTree<T, V, G> {
    /// An empty tree drawing join decisions from `rng`.
    pub fn with_rng(rng: G) -> Self {
        Self { root: None, rng }
    }

    /// The number of intervals stored in the tree.
    pub fn size(&self) -> usize {
        node::size(self.root.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of nodes on the longest root-to-leaf path, or 0 when empty.
    pub fn height(&self) -> usize {
        node::height(self.root.as_deref())
    }

    /// Iterate over all `(interval, label)` pairs in ascending interval order.
    pub fn iter(&self) -> Iter<'_, T, V> {
        Iter::new(self.root.as_deref())
    }
}

impl<T, V, G> IntervalSearchTree<T, V, G>
where
    T: Ord,
{
    pub fn get(&self, interval: &Interval<T>) -> Option<&V> {
        self.root.as_ref().and_then(|v| v.get(interval))
    }

    pub fn get_mut(&mut self, interval: &Interval<T>) -> Option<&mut V> {
        self.root.as_mut().and_then(|v| v.get_mut(interval))
    }

    pub fn contains(&self, interval: &Interval<T>) -> bool {
        self.get(interval).is_some()
    }

    /// Return *some* stored interval intersecting `query`, or [`None`] if no
    /// stored interval does.
    ///
    /// The match is not necessarily the lowest one. Follows a single
    /// root-to-leaf path.
    pub fn search(&self, query: &Interval<T>) -> Option<&Interval<T>> {
        node::search(self.root.as_deref(), query)
    }

    /// Lazily yield stored intervals intersecting `query`, in pre-order.
    ///
    /// A right subtree is only descended into when its largest upper bound
    /// reaches `query.high`. Right subtree intervals that end within the query
    /// (below its upper bound) are therefore not yielded: with `[1, 2]` at the
    /// root and `[3, 4]` to its right, a query of `[0, 10]` yields only
    /// `[1, 2]`. Use [`IntervalSearchTree::overlaps()`] for the exhaustive
    /// set.
    pub fn search_all<'a>(
        &'a self,
        query: &'a Interval<T>,
    ) -> impl Iterator<Item = &'a Interval<T>> + 'a {
        PruningIter::new(self.root.as_deref(), query, SearchAllPruner).map(|v| v.interval())
    }

    /// Lazily yield every stored `(interval, label)` pair intersecting
    /// `query`, in pre-order.
    pub fn overlaps<'a>(
        &'a self,
        query: &'a Interval<T>,
    ) -> impl Iterator<Item = (&'a Interval<T>, &'a V)> + 'a {
        PruningIter::new(self.root.as_deref(), query, OverlapsPruner)
            .map(|v| (v.interval(), v.label()))
    }
}

impl<T, V, G> IntervalSearchTree<T, V, G>
where
    T: Ord + Clone,
    G: Rng,
{
    /// Insert `interval` as a new leaf, mapping it to `label`.
    ///
    /// If an equal interval is already present the tree is left unchanged and
    /// `label` is handed back in [`InsertOutcome::Duplicate`].
    pub fn put(&mut self, interval: Interval<T>, label: V) -> InsertOutcome<V> {
        let outcome = node::insert(&mut self.root, interval, label);

        if outcome.is_duplicate() {
            debug!(size = self.size(), "rejected duplicate interval");
        }

        outcome
    }

    /// Insert `interval`, then rotate it up to become the root of the tree.
    ///
    /// Duplicates are rejected as for [`IntervalSearchTree::put()`].
    pub fn insert_at_root(&mut self, interval: Interval<T>, label: V) -> InsertOutcome<V> {
        let outcome = insert_at_root(&mut self.root, interval, label);

        if outcome.is_duplicate() {
            debug!(size = self.size(), "rejected duplicate interval");
        }

        outcome
    }

    /// Remove `interval` from the tree, returning its label if it was present.
    pub fn remove(&mut self, interval: &Interval<T>) -> Option<V> {
        node::remove(&mut self.root, interval, &mut self.rng)
    }
}

impl<T, V, G> IntervalSearchTree<T, V, G>
where
    T: Ord,
{
    /// Returns true if every node's cached augmentation is consistent, and
    /// every child is on the correct side of its parent.
    pub fn check(&self) -> bool {
        match self.root.as_deref() {
            Some(v) => v.is_consistent(),
            None => true,
        }
    }
}

impl<T, V, G> IntervalSearchTree<T, V, G>
where
    T: Ord + Debug,
{
    /// Assert the size and subtree max of every node, and the ordering of
    /// every parent/child pair, returning the first defect found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        match self.root.as_deref() {
            Some(v) => v.validate(),
            None => Ok(()),
        }
    }
}

impl<T, V, G> Drop for IntervalSearchTree<T, V, G> {
    fn drop(&mut self) {
        // An unbalanced tree can be as deep as it is large.
        node::dismantle(self.root.take());
    }
}

impl<T, V, G> Extend<(Interval<T>, V)> for IntervalSearchTree<T, V, G>
where
    T: Ord + Clone,
    G: Rng,
{
    /// [`put`](IntervalSearchTree::put) each pair, dropping duplicates (the
    /// first label wins).
    fn extend<I: IntoIterator<Item = (Interval<T>, V)>>(&mut self, iter: I) {
        for (interval, label) in iter {
            let _ = self.put(interval, label);
        }
    }
}

impl<T, V> FromIterator<(Interval<T>, V)> for IntervalSearchTree<T, V, StdRng>
where
    T: Ord + Clone,
{
    fn from_iter<I: IntoIterator<Item = (Interval<T>, V)>>(iter: I) -> Self {
        let mut t = Self::new();
        t.extend(iter);
        t
    }
}

impl<T, V, G> IntoIterator for IntervalSearchTree<T, V, G> {
    type Item = (Interval<T>, V);
    type IntoIter = IntoIter<T, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take())
    }
}

impl<'a, T, V, G> IntoIterator for &'a IntervalSearchTree<T, V, G> {
    type Item = (&'a Interval<T>, &'a V);
    type IntoIter = Iter<'a, T, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
