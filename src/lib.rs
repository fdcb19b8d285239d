//! # ordtree
//!
//! An ordered, in-memory associative container built on a red-black tree.
//!
//! ## Overview
//!
//! The crate is organised around a single engine, [`RedBlackTree`], and a thin
//! adapter layer on top of it:
//!
//! - **Ordering contract**: [`KeyOrder`] projects a comparison key out of a
//!   stored element and compares keys, possibly fallibly.
//! - **Engine**: [`RedBlackTree`] provides insert (upsert), find, remove,
//!   clone and in-order traversal while keeping the red-black invariants.
//! - **Dynamic values**: [`Value`] and [`DynamicOrder`] model heterogeneous
//!   keys whose comparison can fail at runtime.
//! - **Adapters**: [`TreeSet`] and [`TreeMap`] expose familiar set and map
//!   APIs over the engine.
//!
//! ## Feature Flags
//!
//! - `arc`: share elements through `Arc` instead of `Rc` so that trees can
//!   cross thread boundaries
//! - `serde`: serialization support for the adapters and [`Value`]
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use ordtree::prelude::*;
//!
//! let mut tree: RedBlackTree<&str> = RedBlackTree::new();
//! for word in ["bb", "aa", "dd", "cc"] {
//!     tree.insert(word).unwrap();
//! }
//! let sorted: Vec<&&str> = tree.iter().collect();
//! assert_eq!(sorted, vec![&"aa", &"bb", &"cc", &"dd"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use ordtree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collections::*;
    pub use crate::error::*;
    pub use crate::order::*;
    pub use crate::tree::*;
    pub use crate::value::*;
}

pub mod collections;
pub mod error;
pub mod order;
pub mod tree;
pub mod value;

pub use collections::{TreeMap, TreeSet};
pub use error::{ComparisonError, InvariantViolation, Operation, TreeError};
pub use order::{ByKey, KeyOrder, Natural};
pub use tree::{Cursor, RedBlackTree, ReferenceCounter};
pub use value::{DynamicOrder, DynamicTree, Value};
