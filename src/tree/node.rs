//! Tree vertices and the handles that link them.
//!
//! Nodes live in a dense arena owned by the tree. Child links are handles the
//! parent exclusively owns; the parent link is a plain back-reference used for
//! rebalancing and iteration ascent.

use super::ReferenceCounter;

/// The color of a red-black node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Index of a node in the arena of the tree that owns it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

/// Selects one of the two children of a node.
///
/// Rebalancing is written once against a `Side` and mirrored by passing
/// [`Side::opposite`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A single vertex of the tree.
#[derive(Debug)]
pub(crate) struct Node<E> {
    pub(crate) element: ReferenceCounter<E>,
    pub(crate) color: Color,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<E> Node<E> {
    /// Creates a new red leaf below `parent`.
    pub(crate) const fn new_red(element: ReferenceCounter<E>, parent: Option<NodeId>) -> Self {
        Self {
            element,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        }
    }

    /// Copies the links and color into a new node that shares the element.
    pub(crate) fn share(&self) -> Self {
        Self {
            element: ReferenceCounter::clone(&self.element),
            color: self.color,
            left: self.left,
            right: self.right,
            parent: self.parent,
        }
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) const fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}
