use crate::{interval::Interval, node::Node};

/// An in-order iterator over the `(interval, label)` pairs of an
/// [`IntervalSearchTree`], ascending by interval.
///
/// [`IntervalSearchTree`]: crate::IntervalSearchTree
#[derive(Debug)]
pub struct Iter<'a, T, V> {
    stack: Vec<&'a Node<T, V>>,
}

impl<'a, T, V> Iter<'a, T, V> {
    pub(crate) fn new(root: Option<&'a Node<T, V>>) -> Self {
        let mut this = Self { stack: vec![] };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: &'a Node<T, V>) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = v.left();
        }
    }
}

impl<'a, T, V> Iterator for Iter<'a, T, V> {
    type Item = (&'a Interval<T>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        if let Some(right) = v.right() {
            self.push_subtree(right);
        }

        Some((v.interval(), v.label()))
    }
}
