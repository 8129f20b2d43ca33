use thiserror::Error;

/// The bounds passed to [`Interval::new()`] were inverted.
///
/// [`Interval::new()`]: crate::Interval::new
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("interval lower bound is greater than its upper bound")]
pub struct InvalidInterval;

/// A structural defect found by [`IntervalSearchTree::validate()`].
///
/// The interval of the first offending node is rendered with its [`Debug`]
/// representation. None of these are reachable through the public API; they
/// indicate a bug in the tree.
///
/// [`IntervalSearchTree::validate()`]: crate::IntervalSearchTree::validate
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The cached subtree size does not match the node count.
    #[error("node {interval} has size {got}, want {want}")]
    Size {
        interval: String,
        got: usize,
        want: usize,
    },

    /// The cached subtree maximum does not match the largest upper bound.
    #[error("node {interval} has max_high {got}, want {want}")]
    MaxHigh {
        interval: String,
        got: String,
        want: String,
    },

    /// A child is on the wrong side of its parent.
    #[error("node {interval} has misordered child {child}")]
    Order { interval: String, child: String },
}
