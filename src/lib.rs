//! An augmented, randomized binary search tree of closed intervals for
//! efficient overlap queries.
//!
//! An [`IntervalSearchTree`] maps unique [`Interval`] keys to labels. Each
//! node caches the size of its subtree and the largest upper bound within it,
//! which allows overlap searches to skip subtrees that cannot contain a match:
//!
//! ```
//! use interval_search_tree::{Interval, IntervalSearchTree};
//!
//! let mut t = IntervalSearchTree::with_seed(42);
//!
//! for (low, high, label) in [(1, 5, "a"), (10, 15, "b"), (8, 12, "c"), (20, 25, "d")] {
//!     assert!(t.put(Interval::new(low, high)?, label).is_inserted());
//! }
//!
//! // Any single overlapping interval.
//! let query = Interval::new(2, 3)?;
//! assert_eq!(t.search(&query), Some(&Interval::new(1, 5)?));
//!
//! // All overlapping intervals and their labels.
//! let query = Interval::new(6, 9)?;
//! let got = t.overlaps(&query).map(|(_, label)| *label).collect::<Vec<_>>();
//! assert_eq!(got, ["c"]);
//!
//! assert_eq!(t.remove(&Interval::new(10, 15)?), Some("b"));
//! assert!(t.check());
//! # Ok::<(), interval_search_tree::InvalidInterval>(())
//! ```
//!
//! The tree performs no explicit rebalancing. Removing a node with two
//! children joins its subtrees with a size-weighted coin flip drawn from an
//! injectable [`rand::Rng`], and [`IntervalSearchTree::insert_at_root()`]
//! offers an insertion strategy that rotates the new interval up to the root.
//! Both keep the expected height logarithmic for random workloads.

mod error;
mod interval;
mod iter;
mod node;
mod tree;

#[cfg(test)]
mod test_utils;

pub use error::*;
pub use interval::*;
pub use iter::{IntoIter, Iter};
pub use tree::*;
