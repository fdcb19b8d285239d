//! In-order traversal.
//!
//! [`Iter`] and [`Range`] borrow the tree, so the borrow checker rules out
//! mutation while they are alive. [`Cursor`] holds no borrow and instead
//! records the identity and generation of its tree, refusing to advance once
//! either no longer matches.

use std::iter::FusedIterator;

use super::ReferenceCounter;
use super::node::NodeId;
use super::red_black_tree::RedBlackTree;
use crate::error::TreeError;
use crate::order::Natural;

// =============================================================================
// Iter
// =============================================================================

/// A double-ended iterator over the elements of a [`RedBlackTree`] in
/// ascending key order.
///
/// Created by [`RedBlackTree::iter`]. Uses O(1) auxiliary space: successors
/// are found by walking child and parent links.
pub struct Iter<'a, E, O = Natural> {
    tree: &'a RedBlackTree<E, O>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, E, O> Iter<'a, E, O> {
    pub(crate) fn new(tree: &'a RedBlackTree<E, O>) -> Self {
        let root = tree.root();
        Self {
            tree,
            front: root.map(|root| tree.minimum_from(root)),
            back: root.map(|root| tree.maximum_from(root)),
            remaining: tree.len(),
        }
    }

    /// Advances the front and yields the stored handle rather than the element.
    pub(crate) fn next_handle(&mut self) -> Option<&'a ReferenceCounter<E>> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(id);
        Some(&self.tree.node(id).element)
    }
}

impl<'a, E, O> Iterator for Iter<'a, E, O> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_handle().map(|handle| &**handle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E, O> DoubleEndedIterator for Iter<'_, E, O> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(id);
        Some(&*self.tree.node(id).element)
    }
}

impl<E, O> ExactSizeIterator for Iter<'_, E, O> {}

impl<E, O> FusedIterator for Iter<'_, E, O> {}

impl<E, O> Clone for Iter<'_, E, O> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// Range
// =============================================================================

/// A forward iterator over the elements of a [`RedBlackTree`] from a starting
/// position to the end, in ascending key order.
///
/// The set and map adapters bound it on the right with `take_while`.
pub struct Range<'a, E, O = Natural> {
    tree: &'a RedBlackTree<E, O>,
    next: Option<NodeId>,
}

impl<'a, E, O> Range<'a, E, O> {
    pub(crate) const fn new(tree: &'a RedBlackTree<E, O>, start: Option<NodeId>) -> Self {
        Self { tree, next: start }
    }
}

impl<'a, E, O> Iterator for Range<'a, E, O> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.successor(id);
        Some(&*self.tree.node(id).element)
    }
}

impl<E, O> FusedIterator for Range<'_, E, O> {}

// =============================================================================
// Cursor
// =============================================================================

/// A detached in-order position within a [`RedBlackTree`].
///
/// Created by [`RedBlackTree::first`]. Each [`advance`](Self::advance) yields
/// the element at the cursor and moves it to the in-order successor, or yields
/// `None` once the traversal is exhausted.
///
/// Any mutation of the tree after the cursor was created (including an
/// upsert of an existing key, or [`clear`](RedBlackTree::clear)) invalidates
/// it. A cursor advanced against a tree other than the one that created it
/// fails with [`TreeError::ForeignCursor`].
///
/// # Examples
///
/// ```rust
/// use ordtree::{RedBlackTree, TreeError};
///
/// let mut tree: RedBlackTree<i32> = [1, 2, 3].into_iter().collect();
/// let mut cursor = tree.first();
/// assert_eq!(cursor.advance(&tree).unwrap(), Some(&1));
///
/// tree.insert(4).unwrap();
/// assert!(matches!(
///     cursor.advance(&tree),
///     Err(TreeError::CursorInvalidated { .. })
/// ));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    identity: u64,
    generation: u64,
    next: Option<NodeId>,
}

impl Cursor {
    pub(crate) const fn new(identity: u64, generation: u64, next: Option<NodeId>) -> Self {
        Self {
            identity,
            generation,
            next,
        }
    }

    /// Returns `true` once every element has been yielded.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Yields the element at the cursor and moves to its successor.
    ///
    /// # Errors
    ///
    /// - [`TreeError::ForeignCursor`] if `tree` did not create this cursor
    /// - [`TreeError::CursorInvalidated`] if `tree` was mutated since
    pub fn advance<'a, E, O>(
        &mut self,
        tree: &'a RedBlackTree<E, O>,
    ) -> Result<Option<&'a E>, TreeError> {
        self.advance_shared_ref(tree)
            .map(|handle| handle.map(|handle| &**handle))
    }

    /// Like [`advance`](Self::advance) but yields a new handle to the element.
    ///
    /// # Errors
    ///
    /// Same as [`advance`](Self::advance).
    pub fn advance_shared<E, O>(
        &mut self,
        tree: &RedBlackTree<E, O>,
    ) -> Result<Option<ReferenceCounter<E>>, TreeError> {
        self.advance_shared_ref(tree)
            .map(|handle| handle.map(ReferenceCounter::clone))
    }

    fn advance_shared_ref<'a, E, O>(
        &mut self,
        tree: &'a RedBlackTree<E, O>,
    ) -> Result<Option<&'a ReferenceCounter<E>>, TreeError> {
        if tree.identity() != self.identity {
            return Err(TreeError::ForeignCursor);
        }
        if tree.generation() != self.generation {
            return Err(TreeError::CursorInvalidated {
                cursor_generation: self.generation,
                tree_generation: tree.generation(),
            });
        }
        let Some(id) = self.next else {
            return Ok(None);
        };
        self.next = tree.successor(id);
        Ok(Some(&tree.node(id).element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::ByKey;
    use rstest::rstest;

    fn sample() -> RedBlackTree<i32> {
        [40, 10, 30, 20, 50].into_iter().collect()
    }

    #[rstest]
    fn test_iter_is_ascending() {
        let tree = sample();
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![10, 20, 30, 40, 50]);
    }

    #[rstest]
    fn test_iter_reverse() {
        let tree = sample();
        assert_eq!(tree.iter().rev().copied().collect::<Vec<_>>(), vec![50, 40, 30, 20, 10]);
    }

    #[rstest]
    fn test_iter_meets_in_the_middle() {
        let tree = sample();
        let mut iter = tree.iter();
        assert_eq!(iter.next(), Some(&10));
        assert_eq!(iter.next_back(), Some(&50));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(&20));
        assert_eq!(iter.next_back(), Some(&40));
        assert_eq!(iter.next(), Some(&30));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[rstest]
    fn test_iter_empty_tree() {
        let tree: RedBlackTree<i32> = RedBlackTree::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().len(), 0);
    }

    #[rstest]
    fn test_range_from_lower_bound() {
        let tree = sample();
        let start = crate::order::into_ok(tree.lower_bound_by(|key| Ok(*key >= 25)));
        assert_eq!(tree.iter_from(start).copied().collect::<Vec<_>>(), vec![30, 40, 50]);

        let past_end = crate::order::into_ok(tree.lower_bound_by(|key| Ok(*key >= 99)));
        assert_eq!(tree.iter_from(past_end).next(), None);
    }

    #[rstest]
    fn test_cursor_walks_then_reports_exhaustion() {
        let tree = sample();
        let mut cursor = tree.first();
        let mut seen = Vec::new();
        while let Some(element) = cursor.advance(&tree).unwrap() {
            seen.push(*element);
        }
        assert_eq!(seen, vec![10, 20, 30, 40, 50]);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.advance(&tree).unwrap(), None);
    }

    #[rstest]
    fn test_cursor_invalidated_by_upsert() {
        let mut tree = RedBlackTree::with_order(ByKey);
        tree.insert(("aa", 1)).unwrap();
        let mut cursor = tree.first();
        tree.insert(("aa", 2)).unwrap();

        let error = cursor.advance(&tree).unwrap_err();
        assert!(matches!(
            error,
            TreeError::CursorInvalidated {
                cursor_generation: 1,
                tree_generation: 2
            }
        ));
    }

    #[rstest]
    fn test_cursor_invalidated_by_remove_and_clear() {
        let mut tree = sample();
        let mut cursor = tree.first();
        tree.remove(&30).unwrap();
        assert!(cursor.advance(&tree).is_err());

        let mut cursor = tree.first();
        tree.clear();
        assert!(cursor.advance(&tree).is_err());
    }

    #[rstest]
    fn test_cursor_rejects_foreign_tree() {
        let tree = sample();
        let copy = tree.clone();
        let mut cursor = tree.first();
        assert!(matches!(cursor.advance(&copy), Err(TreeError::ForeignCursor)));
        assert_eq!(cursor.advance(&tree).unwrap(), Some(&10));
    }

    #[rstest]
    fn test_cursor_advance_shared_hands_out_new_handle() {
        let tree = sample();
        let mut cursor = tree.first();
        let handle = cursor.advance_shared(&tree).unwrap().unwrap();
        assert_eq!(*handle, 10);
        assert_eq!(ReferenceCounter::strong_count(&handle), 2);
    }
}
