use crate::{interval::Interval, node::Node};

pub(crate) trait PruningOracle<T, V> {
    /// Returns true when the left child of a node, and the subtree rooted at
    /// it, should be descended into and evaluated.
    fn visit_left(&self, left: &Node<T, V>, query: &Interval<T>) -> bool;

    /// Returns true when the right child of `parent`, and the subtree rooted
    /// at it, should be descended into and evaluated.
    fn visit_right(&self, parent: &Node<T, V>, right: &Node<T, V>, query: &Interval<T>) -> bool;

    /// Returns true if `n` satisfies the pruning logic and should be yielded to
    /// the caller.
    fn filter_yield(&self, n: &Node<T, V>, query: &Interval<T>) -> bool;
}

/// An [`Iterator`] that performs a depth-first, pre-order walk of a subtree
/// (node, left subtree, right subtree) and yields [`Node`] instances that
/// match a pruning predicate.
#[derive(Debug)]
pub(crate) struct PruningIter<'a, T, V, P> {
    query: &'a Interval<T>,
    stack: Vec<&'a Node<T, V>>,
    pruner: P,
}

impl<'a, T, V, P> PruningIter<'a, T, V, P>
where
    P: PruningOracle<T, V>,
{
    pub(crate) fn new(root: Option<&'a Node<T, V>>, query: &'a Interval<T>, pruner: P) -> Self {
        Self {
            stack: root.into_iter().collect(),
            query,
            pruner,
        }
    }
}

impl<'a, T, V, P> Iterator for PruningIter<'a, T, V, P>
where
    P: PruningOracle<T, V>,
{
    type Item = &'a Node<T, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.stack.pop()?;

            // Push the right subtree first so the left subtree is visited
            // before it.
            if let Some(right) = v.right() {
                if self.pruner.visit_right(v, right, self.query) {
                    self.stack.push(right);
                }
            }
            if let Some(left) = v.left() {
                if self.pruner.visit_left(left, self.query) {
                    self.stack.push(left);
                }
            }

            // Yield this node if it satisfies the pruning predicate.
            if self.pruner.filter_yield(v, self.query) {
                return Some(v);
            }
        }
    }
}
