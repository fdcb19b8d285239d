//! The red-black tree engine and its traversal types.
//!
//! This module provides:
//!
//! - [`RedBlackTree`]: the ordered container with upsert, find, remove and clone
//! - [`Iter`]: a borrowing, double-ended in-order iterator
//! - [`Range`]: a forward in-order iterator starting at an arbitrary position
//! - [`Cursor`]: a detached in-order cursor that detects mutation of its tree
//!
//! # Example
//!
//! ```rust
//! use ordtree::RedBlackTree;
//!
//! let mut tree: RedBlackTree<i32> = (1..=10).collect();
//! tree.remove(&5).unwrap();
//!
//! let evens: Vec<i32> = tree.iter().copied().filter(|value| value % 2 == 0).collect();
//! assert_eq!(evens, vec![2, 4, 6, 8, 10]);
//! assert_eq!(tree.iter().rev().next(), Some(&10));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer through which trees hold their elements.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, and trees of
/// `Send + Sync` elements may cross thread boundaries.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub type ReferenceCounter<T> = std::sync::Arc<T>;

/// Reference-counted smart pointer through which trees hold their elements.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, and trees of
/// `Send + Sync` elements may cross thread boundaries.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(not(feature = "arc"))]
pub type ReferenceCounter<T> = std::rc::Rc<T>;

mod iter;
mod node;
mod red_black_tree;
mod validate;

pub use iter::{Cursor, Iter, Range};
pub(crate) use node::NodeId;
pub use red_black_tree::RedBlackTree;
