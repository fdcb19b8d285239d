//! Error types for tree operations.
//!
//! - [`ComparisonError`]: why two keys could not be ordered against each other
//! - [`TreeError`]: what callers of the engine and adapters see
//! - [`InvariantViolation`]: a broken red-black invariant, which is an engine
//!   bug rather than a caller error

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

// =============================================================================
// Operation
// =============================================================================

/// The engine operation during which an ordering failure occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `insert` / `insert_shared`
    Insert,
    /// `find` / `find_shared`
    Find,
    /// `remove`
    Remove,
}

impl fmt::Display for Operation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Insert => "insert",
            Self::Find => "find",
            Self::Remove => "remove",
        };
        formatter.write_str(name)
    }
}

// =============================================================================
// ComparisonError
// =============================================================================

/// The underlying reason a key could not be placed in the total order.
///
/// # Examples
///
/// ```rust
/// use ordtree::{ComparisonError, Value};
///
/// let error = Value::from("aa").try_cmp(&Value::from(1)).unwrap_err();
/// assert_eq!(
///     error,
///     ComparisonError::Unorderable { left: "str", right: "int" }
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ComparisonError {
    /// The two keys belong to kinds that have no mutual ordering.
    #[error("'<' not supported between instances of '{left}' and '{right}'")]
    Unorderable {
        /// Kind of the probe key
        left: &'static str,
        /// Kind of the stored key
        right: &'static str,
    },

    /// A floating point NaN was involved in the comparison.
    #[error("NaN has no position in a total order")]
    NotANumber,

    /// A map-mode element was not a `(key, value)` pair.
    #[error("map elements must be (key, value) pairs, got '{kind}'")]
    NotAPair {
        /// Kind of the offending element
        kind: &'static str,
    },
}

// =============================================================================
// TreeError
// =============================================================================

/// Errors surfaced by [`RedBlackTree`](crate::RedBlackTree) and the adapters.
///
/// An absent key is *not* an error for the engine: `find` and `remove` return
/// `Ok(None)`. Only the subscript-style operations of the map adapters turn
/// absence into [`TreeError::KeyAbsent`].
#[derive(Debug, Error)]
pub enum TreeError {
    /// The probe or element cannot be compared against the stored keys.
    ///
    /// The tree is left unmodified.
    #[error("ordering contract not satisfiable during {operation}")]
    OrderingIncompatible {
        /// The operation that failed
        operation: Operation,
        /// The underlying comparison failure
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// No element matches the requested key.
    #[error("key not found: {key}")]
    KeyAbsent {
        /// Rendering of the missing key
        key: String,
    },

    /// The tree was mutated after the cursor was created.
    #[error(
        "cursor invalidated: created at generation {cursor_generation}, tree is at {tree_generation}"
    )]
    CursorInvalidated {
        /// Generation recorded by the cursor
        cursor_generation: u64,
        /// Current generation of the tree
        tree_generation: u64,
    },

    /// The cursor was advanced against a tree that did not create it.
    #[error("cursor belongs to a different tree")]
    ForeignCursor,

    /// A subscript operation was used on a set-mode tree.
    #[error("subscript operations require a map-mode tree")]
    NotMapMode,
}

impl TreeError {
    /// Wraps a comparison failure raised during `operation`.
    pub fn ordering<E>(operation: Operation, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::OrderingIncompatible {
            operation,
            source: Box::new(source),
        }
    }

    /// Builds a [`TreeError::KeyAbsent`] from a printable key.
    pub fn key_absent(key: impl fmt::Debug) -> Self {
        Self::KeyAbsent {
            key: format!("{key:?}"),
        }
    }

    /// Returns `true` for [`TreeError::OrderingIncompatible`].
    #[must_use]
    pub const fn is_ordering_incompatible(&self) -> bool {
        matches!(self, Self::OrderingIncompatible { .. })
    }

    /// Returns `true` for [`TreeError::KeyAbsent`].
    #[must_use]
    pub const fn is_key_absent(&self) -> bool {
        matches!(self, Self::KeyAbsent { .. })
    }

    /// Returns the underlying [`ComparisonError`], if that is what caused this error.
    #[must_use]
    pub fn comparison(&self) -> Option<&ComparisonError> {
        match self {
            Self::OrderingIncompatible { source, .. } => source.downcast_ref::<ComparisonError>(),
            _ => None,
        }
    }
}

// =============================================================================
// InvariantViolation
// =============================================================================

/// A red-black or structural invariant that does not hold.
///
/// Returned by [`RedBlackTree::validate`](crate::RedBlackTree::validate).
/// Seeing one of these means the engine is broken.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The root node is red.
    #[error("root node is red")]
    RedRoot,

    /// A red node has a red child.
    #[error("red node at depth {depth} has a red child")]
    RedRed {
        /// Depth of the parent node
        depth: usize,
    },

    /// Two paths below the same node count different numbers of black nodes.
    #[error("black depth mismatch at depth {depth}: left {left}, right {right}")]
    BlackDepthMismatch {
        /// Depth of the node whose subtrees disagree
        depth: usize,
        /// Black depth of the left subtree
        left: usize,
        /// Black depth of the right subtree
        right: usize,
    },

    /// A child does not point back to its parent.
    #[error("broken parent link at depth {depth}")]
    ParentLink {
        /// Depth of the child
        depth: usize,
    },

    /// In-order traversal is not strictly ascending.
    #[error("elements out of order at position {position}")]
    OutOfOrder {
        /// In-order position of the offending element
        position: usize,
    },

    /// The number of reachable nodes differs from the stored count.
    #[error("count mismatch: {reachable} reachable nodes, {count} recorded")]
    CountMismatch {
        /// Nodes reachable from the root
        reachable: usize,
        /// Nodes recorded by the tree
        count: usize,
    },
}
