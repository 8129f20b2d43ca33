use crate::{
    interval::Interval,
    node::{self, Node},
};

/// An iterator of owned `(interval, label)` pairs in ascending interval order,
/// as the underlying tree `into_iter()` impl.
#[derive(Debug)]
pub struct IntoIter<T, V> {
    stack: Vec<Box<Node<T, V>>>,
}

impl<T, V> IntoIter<T, V> {
    pub(crate) fn new(root: Option<Box<Node<T, V>>>) -> Self {
        let mut this = Self { stack: vec![] };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: Box<Node<T, V>>) {
        let mut ptr = Some(subtree_root);

        while let Some(mut v) = ptr {
            ptr = v.take_left();
            self.stack.push(v);
        }
    }
}

impl<T, V> Iterator for IntoIter<T, V> {
    type Item = (Interval<T>, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        if let Some(right) = v.take_right() {
            self.push_subtree(right);
        }

        Some(v.into_tuple())
    }
}

impl<T, V> Drop for IntoIter<T, V> {
    fn drop(&mut self) {
        // Unvisited right subtrees are still attached to the stacked nodes.
        node::dismantle(self.stack.drain(..));
    }
}
