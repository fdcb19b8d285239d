//! Set and map adapters over [`RedBlackTree`](crate::RedBlackTree).
//!
//! - [`TreeSet`]: each element is its own key ([`Natural`](crate::Natural) order)
//! - [`TreeMap`]: elements are `(key, value)` pairs ordered by key
//!   ([`ByKey`](crate::ByKey) order)
//!
//! Both adapters look elements up through a borrowed form of the key, the same
//! way `std::collections::BTreeSet` and `BTreeMap` do, and iterate in
//! ascending key order.
//!
//! # Example
//!
//! ```rust
//! use ordtree::{TreeMap, TreeSet};
//!
//! let set: TreeSet<&str> = ["bb", "aa", "dd", "cc"].into_iter().collect();
//! assert_eq!(set.to_string(), "{aa, bb, cc, dd}");
//!
//! let mut map = TreeMap::new();
//! map.insert("aa".to_string(), 1);
//! assert_eq!(map.insert("aa".to_string(), 2), Some(1));
//! assert_eq!(map.get("aa"), Some(&2));
//! ```

use std::ops::Bound;

mod map;
mod set;

pub use map::{Entries, Keys, TreeMap, Values};
pub use set::TreeSet;

/// Returns `true` if `key` lies at or after the lower bound `start`.
fn above_start<Q: Ord + ?Sized>(start: Bound<&Q>, key: &Q) -> bool {
    match start {
        Bound::Included(low) => key >= low,
        Bound::Excluded(low) => key > low,
        Bound::Unbounded => true,
    }
}

/// Returns `true` if `key` lies at or before the upper bound `end`.
fn below_end<Q: Ord + ?Sized>(end: Bound<&Q>, key: &Q) -> bool {
    match end {
        Bound::Included(high) => key <= high,
        Bound::Excluded(high) => key < high,
        Bound::Unbounded => true,
    }
}
