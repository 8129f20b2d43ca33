use std::{cmp::Ordering, fmt::Debug};

use rand::Rng;
use tracing::trace;

use crate::{error::InvariantViolation, interval::Interval, tree::InsertOutcome};

#[derive(Debug)]
pub(crate) struct Node<T, V> {
    /// Child nodes pointers.
    left: Option<Box<Node<T, V>>>,
    right: Option<Box<Node<T, V>>>,

    /// The number of nodes in the subtree rooted at this [`Node`], including
    /// itself.
    ///
    /// A leaf has a size of 1.
    size: usize,

    /// The maximum upper bound of all intervals for the subtree rooted at this
    /// [`Node`].
    max_high: T,

    interval: Interval<T>,
    label: V,
}

/// What is wrong with a single node, relative to its immediate children.
#[derive(Debug)]
enum Defect<'a, T> {
    /// A child on the wrong side of its parent.
    Order(&'a Interval<T>),
    /// The size the node should have.
    Size(usize),
    /// The subtree max the node should have.
    MaxHigh(Option<&'a T>),
}

/// The nodes detached from the tree while descending towards a key, each
/// paired with the side of it the descent continued on.
type Path<T, V> = Vec<(Box<Node<T, V>>, Ordering)>;

impl<T, V> Node<T, V> {
    pub(crate) fn new(interval: Interval<T>, label: V) -> Self
    where
        T: Clone,
    {
        Self {
            max_high: interval.high().clone(),
            interval,
            label,
            left: None,
            right: None,
            size: 1,
        }
    }

    pub(crate) fn get(&self, interval: &Interval<T>) -> Option<&V>
    where
        T: Ord,
    {
        let mut node = self;
        loop {
            node = match interval.cmp(&node.interval) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(&node.label),
                Ordering::Greater => node.right(),
            }?;

            // Prune this subtree from the search if the maximum upper bound in
            // the subtree is less than the search upper bound. If true, this
            // subtree cannot contain the search interval.
            if node.max_high() < interval.high() {
                return None;
            }
        }
    }

    pub(crate) fn get_mut(&mut self, interval: &Interval<T>) -> Option<&mut V>
    where
        T: Ord,
    {
        let mut node = self;
        loop {
            node = match interval.cmp(&node.interval) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.label),
                Ordering::Greater => node.right.as_deref_mut(),
            }?;

            if node.max_high() < interval.high() {
                return None;
            }
        }
    }

    /// Recompute the size and subtree max of this node from its own interval
    /// and the (already consistent) augmentation of its children.
    pub(crate) fn fix(&mut self)
    where
        T: Ord + Clone,
    {
        self.size = 1 + size(self.left()) + size(self.right());

        // An absent child is None, which orders below every Some.
        let new_max = self
            .left()
            .map(|v| v.max_high())
            .max(self.right().map(|v| v.max_high()))
            .max(Some(self.interval.high()));

        if let Some(new_max) = new_max {
            self.max_high = new_max.clone();
        }
    }

    /// Check the ordering, size and subtree max of this node against its
    /// immediate children.
    fn defect(&self) -> Option<Defect<'_, T>>
    where
        T: Ord,
    {
        if let Some(l) = self.left().filter(|l| l.interval >= self.interval) {
            return Some(Defect::Order(&l.interval));
        }
        if let Some(r) = self.right().filter(|r| r.interval <= self.interval) {
            return Some(Defect::Order(&r.interval));
        }

        let want = 1 + size(self.left()) + size(self.right());
        if self.size != want {
            return Some(Defect::Size(want));
        }

        let want = self
            .left()
            .map(|v| v.max_high())
            .max(self.right().map(|v| v.max_high()))
            .max(Some(self.interval.high()));
        if want != Some(&self.max_high) {
            return Some(Defect::MaxHigh(want));
        }

        None
    }

    /// Find the first node in the subtree rooted at `self` (pre-order) whose
    /// cached augmentation or child ordering is wrong.
    fn find_defect(&self) -> Option<(&Self, Defect<'_, T>)>
    where
        T: Ord,
    {
        let mut stack = vec![self];
        while let Some(v) = stack.pop() {
            if let Some(d) = v.defect() {
                return Some((v, d));
            }
            stack.extend(v.right());
            stack.extend(v.left());
        }
        None
    }

    /// Returns true if every node in the subtree rooted at `self` is
    /// consistent.
    pub(crate) fn is_consistent(&self) -> bool
    where
        T: Ord,
    {
        self.find_defect().is_none()
    }

    /// Walk the subtree rooted at `self`, asserting the size, subtree max and
    /// ordering of every node.
    pub(crate) fn validate(&self) -> Result<(), InvariantViolation>
    where
        T: Ord + Debug,
    {
        let Some((v, defect)) = self.find_defect() else {
            return Ok(());
        };

        let interval = format!("{:?}", v.interval);
        Err(match defect {
            Defect::Order(child) => InvariantViolation::Order {
                interval,
                child: format!("{:?}", child),
            },
            Defect::Size(want) => InvariantViolation::Size {
                interval,
                got: v.size,
                want,
            },
            Defect::MaxHigh(want) => InvariantViolation::MaxHigh {
                interval,
                got: format!("{:?}", v.max_high),
                want: format!("{:?}", want),
            },
        })
    }

    pub(crate) fn label(&self) -> &V {
        &self.label
    }

    pub(crate) fn interval(&self) -> &Interval<T> {
        &self.interval
    }

    pub(crate) fn max_high(&self) -> &T {
        &self.max_high
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Explode this [`Node`] into the [`Interval`] and label `V` it contains.
    pub(crate) fn into_tuple(self) -> (Interval<T>, V) {
        (self.interval, self.label)
    }
}

impl<T, V> Clone for Node<T, V>
where
    T: Clone,
    V: Clone,
{
    /// Copy the subtree rooted at `self`, preserving its shape, without
    /// recursing once per level.
    fn clone(&self) -> Self {
        enum Step<'a, T, V> {
            Visit(Option<&'a Node<T, V>>),
            Build(&'a Node<T, V>),
        }

        fn copy<T: Clone, V: Clone>(
            v: &Node<T, V>,
            left: Option<Box<Node<T, V>>>,
            right: Option<Box<Node<T, V>>>,
        ) -> Node<T, V> {
            Node {
                left,
                right,
                size: v.size,
                max_high: v.max_high.clone(),
                interval: v.interval.clone(),
                label: v.label.clone(),
            }
        }

        // Each Visit produces exactly one entry in "built", and a Build pops
        // the entries of its right then left child.
        let mut work = vec![Step::Visit(self.right()), Step::Visit(self.left())];
        let mut built: Vec<Option<Box<Self>>> = Vec::new();

        while let Some(step) = work.pop() {
            match step {
                Step::Visit(None) => built.push(None),
                Step::Visit(Some(v)) => work.extend([
                    Step::Build(v),
                    Step::Visit(v.right()),
                    Step::Visit(v.left()),
                ]),
                Step::Build(v) => {
                    let right = built.pop().flatten();
                    let left = built.pop().flatten();
                    built.push(Some(Box::new(copy(v, left, right))));
                }
            }
        }

        let right = built.pop().flatten();
        let left = built.pop().flatten();
        copy(self, left, right)
    }
}

pub(crate) fn size<T, V>(n: Option<&Node<T, V>>) -> usize {
    n.map(|v| v.size()).unwrap_or_default()
}

/// The number of nodes on the longest root-to-leaf path of `n`, or 0 for an
/// empty subtree.
pub(crate) fn height<T, V>(n: Option<&Node<T, V>>) -> usize {
    let mut max = 0;
    let mut stack = n.map(|v| (v, 1)).into_iter().collect::<Vec<_>>();

    while let Some((v, depth)) = stack.pop() {
        max = max.max(depth);
        stack.extend(
            [v.left(), v.right()]
                .into_iter()
                .flatten()
                .map(|child| (child, depth + 1)),
        );
    }

    max
}

/// Drop every node of the given subtrees without recursing once per level.
pub(crate) fn dismantle<T, V>(subtrees: impl IntoIterator<Item = Box<Node<T, V>>>) {
    let mut stack = subtrees.into_iter().collect::<Vec<_>>();
    while let Some(mut v) = stack.pop() {
        stack.extend(v.take_left());
        stack.extend(v.take_right());
    }
}

/// Detach the search path for `interval` from the subtree in `slot`, leaving
/// `slot` empty.
///
/// Returns the detached path (root first), and the node equal to `interval`
/// with its children still attached, if present.
fn descend<T, V>(
    slot: &mut Option<Box<Node<T, V>>>,
    interval: &Interval<T>,
) -> (Path<T, V>, Option<Box<Node<T, V>>>)
where
    T: Ord,
{
    let mut path = Vec::new();
    let mut subtree = slot.take();

    while let Some(mut v) = subtree {
        let dir = interval.cmp(&v.interval);
        subtree = match dir {
            Ordering::Less => v.take_left(),
            Ordering::Greater => v.take_right(),
            Ordering::Equal => return (path, Some(v)),
        };
        path.push((v, dir));
    }

    (path, None)
}

/// Hang `subtree` back at the end of `path`, fixing every node from the
/// bottom up, and return the reassembled root.
fn reattach<T, V>(
    mut path: Path<T, V>,
    mut subtree: Option<Box<Node<T, V>>>,
) -> Option<Box<Node<T, V>>>
where
    T: Ord + Clone,
{
    while let Some((mut v, dir)) = path.pop() {
        match dir {
            Ordering::Less => v.left = subtree,
            _ => v.right = subtree,
        }
        v.fix();
        subtree = Some(v);
    }
    subtree
}

/// Insert `interval` as a new leaf of the subtree in `slot`.
///
/// The shape of the subtree is never rebalanced; the augmentation of every
/// node on the path back to `slot` is recomputed.
pub(crate) fn insert<T, V>(
    slot: &mut Option<Box<Node<T, V>>>,
    interval: Interval<T>,
    label: V,
) -> InsertOutcome<V>
where
    T: Ord + Clone,
{
    let (path, existing) = descend(slot, &interval);

    let (subtree, outcome) = match existing {
        // A rejected duplicate leaves the subtree unchanged.
        Some(v) => (v, InsertOutcome::Duplicate(label)),
        None => (Box::new(Node::new(interval, label)), InsertOutcome::Inserted),
    };

    *slot = reattach(path, Some(subtree));
    outcome
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// A no-op if `x` has no right child.
fn rotate_left<T, V>(x: &mut Box<Node<T, V>>)
where
    T: Ord + Clone,
{
    let Some(mut p) = x.right.take() else {
        return;
    };
    std::mem::swap(x, &mut p);

    // "p" now holds the old subtree root, which becomes the left child of the
    // pivot.
    p.right = x.left.take();
    p.fix();

    x.left = Some(p);
    x.fix();
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// A no-op if `y` has no left child.
fn rotate_right<T, V>(y: &mut Box<Node<T, V>>)
where
    T: Ord + Clone,
{
    let Some(mut p) = y.left.take() else {
        return;
    };
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    p.fix();

    y.right = Some(p);
    y.fix();
}

/// Insert `interval` as a leaf of the subtree in `slot`, then rotate it up
/// until it is the root of that subtree.
///
/// ```text
///        8                 8                 5
///       / \               / \               / \
///      3   9     -->     5   9     -->     3   8
///       \               /                       \
///       <5>            3                         9
/// ```
///
/// Every rotation happens on the way back up, so the innermost rotation runs
/// first.
pub(crate) fn insert_at_root<T, V>(
    slot: &mut Option<Box<Node<T, V>>>,
    interval: Interval<T>,
    label: V,
) -> InsertOutcome<V>
where
    T: Ord + Clone,
{
    let (mut path, existing) = descend(slot, &interval);
    if let Some(v) = existing {
        *slot = reattach(path, Some(v));
        return InsertOutcome::Duplicate(label);
    }

    let mut subtree = Box::new(Node::new(interval, label));
    while let Some((mut v, dir)) = path.pop() {
        // The new node is the root of the subtree on the side the descent
        // took, and is rotated above its parent.
        match dir {
            Ordering::Less => {
                v.left = Some(subtree);
                rotate_right(&mut v);
            }
            _ => {
                v.right = Some(subtree);
                rotate_left(&mut v);
            }
        }
        subtree = v;
    }

    *slot = Some(subtree);
    InsertOutcome::Inserted
}

/// Remove the node holding `interval` from the subtree rooted at `slot`, if
/// it exists.
///
/// A node with at most one child is replaced by that child, and a node with
/// two children is replaced by the [`join()`] of both subtrees. Every node on
/// the path back to `slot` is fixed.
///
/// Returns [`None`] if the value is not found.
pub(crate) fn remove<T, V, G>(
    slot: &mut Option<Box<Node<T, V>>>,
    interval: &Interval<T>,
    rng: &mut G,
) -> Option<V>
where
    T: Ord + Clone,
    G: Rng + ?Sized,
{
    let (path, found) = descend(slot, interval);

    let (subtree, label) = match found {
        Some(mut old) => {
            trace!(size = old.size, "removing node");
            let joined = join(old.take_left(), old.take_right(), rng);
            (joined, Some(old.label))
        }
        None => (None, None),
    };

    *slot = reattach(path, subtree);
    label
}

/// Combine the subtrees `a` and `b` into one, where every interval in `a` is
/// strictly less than every interval in `b`.
///
/// The root of `a` becomes the new root with probability
/// `size(a) / (size(a) + size(b))`, otherwise the root of `b` does:
///
/// ```text
///      a wins:  a                 b wins:    b
///              / \                          / \
///             1   join(2, b)       join(a, 3)   4
/// ```
///
/// This gives the combined subtree the same shape distribution as a BST built
/// from its keys in uniformly random order.
pub(crate) fn join<T, V, G>(
    mut a: Option<Box<Node<T, V>>>,
    mut b: Option<Box<Node<T, V>>>,
    rng: &mut G,
) -> Option<Box<Node<T, V>>>
where
    T: Ord + Clone,
    G: Rng + ?Sized,
{
    // Each winner is detached onto the spine with the side its inner join
    // hangs off.
    let mut spine = Vec::new();

    let rest = loop {
        let (mut l, mut r) = match (a, b) {
            (None, rest) | (rest, None) => break rest,
            (Some(l), Some(r)) => (l, r),
        };

        let total = (l.size + r.size) as f64;
        let a_wins = rng.gen::<f64>() * total < l.size as f64;
        trace!(left = l.size, right = r.size, a_wins, "join");

        if a_wins {
            a = l.take_right();
            b = Some(r);
            spine.push((l, Ordering::Greater));
        } else {
            a = Some(l);
            b = r.take_left();
            spine.push((r, Ordering::Less));
        }
    };

    reattach(spine, rest)
}

/// Find *some* interval in the subtree rooted at `n` that intersects `query`.
///
/// Descends a single path: if no interval in the left subtree reaches
/// `query.low`, nothing on the left can overlap and the right subtree is
/// searched instead.
pub(crate) fn search<'a, T, V>(
    mut n: Option<&'a Node<T, V>>,
    query: &Interval<T>,
) -> Option<&'a Interval<T>>
where
    T: Ord,
{
    while let Some(v) = n {
        if v.interval.intersects(query) {
            return Some(&v.interval);
        }

        n = match v.left() {
            None => v.right(),
            Some(l) if l.max_high() < query.low() => v.right(),
            Some(l) => Some(l),
        };
    }

    None
}
