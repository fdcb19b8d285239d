//! The red-black tree engine.
//!
//! [`RedBlackTree`] owns a dense arena of nodes, the root handle and the
//! [`KeyOrder`] that positions elements. Every public mutation restores the
//! red-black invariants before returning:
//!
//! 1. Every node is either red or black
//! 2. The root is black
//! 3. Empty subtrees count as black
//! 4. Red nodes have only black children
//! 5. Every path from a node down to an empty subtree crosses the same number
//!    of black nodes
//!
//! Elements are held through [`ReferenceCounter`] handles. A clone of the tree
//! copies the node structure and shares the handles, so both trees refer to
//! the same underlying elements while remaining structurally independent.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use tracing::{debug, trace};

use super::ReferenceCounter;
use super::iter::{Cursor, Iter, Range};
use super::node::{Color, Node, NodeId, Side};
use crate::error::{Operation, TreeError};
use crate::order::{KeyOrder, Natural, into_ok};

/// Source of tree identities, used to reject cursors advanced against the
/// wrong tree.
static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(0);

fn next_identity() -> u64 {
    NEXT_IDENTITY.fetch_add(1, AtomicOrdering::Relaxed)
}

/// Where a key belongs in the tree.
enum Slot {
    /// A node with an equal key already exists.
    Occupied(NodeId),
    /// The key would be linked as the `side` child of `parent`.
    Vacant { parent: Option<NodeId>, side: Side },
}

// =============================================================================
// RedBlackTree Definition
// =============================================================================

/// An ordered container of elements kept in a red-black tree.
///
/// The order `O` decides which part of an element is its key and how keys
/// compare. With [`Natural`] (the default) the element is its own key; with
/// [`ByKey`](crate::ByKey) elements are `(key, value)` pairs ordered by key.
///
/// Inserting an element whose key is already present replaces the stored
/// element and hands the previous one back ("upsert").
///
/// # Time Complexity
///
/// | Operation      | Complexity        |
/// |----------------|-------------------|
/// | `insert`       | O(log N)          |
/// | `find`         | O(log N)          |
/// | `remove`       | O(log N)          |
/// | `min`/`max`    | O(log N)          |
/// | `len`          | O(1)              |
/// | `clone`        | O(N)              |
/// | `black_depth`  | O(N)              |
///
/// # Examples
///
/// ```rust
/// use ordtree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// assert_eq!(tree.insert("aa").unwrap(), None);
/// assert_eq!(tree.insert("aa").unwrap().as_deref(), Some(&"aa"));
/// assert_eq!(tree.len(), 1);
///
/// assert_eq!(tree.remove(&"aa").unwrap().as_deref(), Some(&"aa"));
/// assert!(tree.is_empty());
/// assert_eq!(tree.black_depth(), 0);
/// ```
pub struct RedBlackTree<E, O = Natural> {
    /// Node arena; every slot is reachable from `root`
    nodes: Vec<Node<E>>,
    /// Root node, `None` when empty
    root: Option<NodeId>,
    /// Key projection and comparison
    order: O,
    /// Unique per tree instance, including clones
    identity: u64,
    /// Bumped by every mutation
    generation: u64,
}

impl<E, O> RedBlackTree<E, O> {
    /// Creates an empty tree that positions elements with `order`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::{ByKey, RedBlackTree};
    ///
    /// let tree: RedBlackTree<(String, i32), ByKey> = RedBlackTree::with_order(ByKey);
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub fn with_order(order: O) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            order,
            identity: next_identity(),
            generation: 0,
        }
    }

    /// Returns the number of elements in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of distinct keys stored; same as [`len`](Self::len).
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the order this tree was built with.
    #[inline]
    #[must_use]
    pub const fn order(&self) -> &O {
        &self.order
    }

    /// Returns the mutation counter checked by [`Cursor`]s.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns an iterator over the elements in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = [3, 1, 2].into_iter().collect();
    /// let elements: Vec<&i32> = tree.iter().collect();
    /// assert_eq!(elements, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, E, O> {
        Iter::new(self)
    }

    /// Returns a detached cursor positioned on the smallest element.
    ///
    /// Unlike [`iter`](Self::iter) the cursor does not borrow the tree. Any
    /// mutation of the tree after this call makes
    /// [`Cursor::advance`] fail with [`TreeError::CursorInvalidated`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = [2, 1].into_iter().collect();
    /// let mut cursor = tree.first();
    /// assert_eq!(cursor.advance(&tree).unwrap(), Some(&1));
    /// assert_eq!(cursor.advance(&tree).unwrap(), Some(&2));
    /// assert_eq!(cursor.advance(&tree).unwrap(), None);
    /// ```
    #[must_use]
    pub fn first(&self) -> Cursor {
        Cursor::new(
            self.identity,
            self.generation,
            self.root.map(|root| self.minimum_from(root)),
        )
    }

    /// Returns the element with the smallest key.
    #[must_use]
    pub fn min(&self) -> Option<&E> {
        self.root
            .map(|root| &*self.node(self.minimum_from(root)).element)
    }

    /// Returns the element with the largest key.
    #[must_use]
    pub fn max(&self) -> Option<&E> {
        self.root
            .map(|root| &*self.node(self.maximum_from(root)).element)
    }

    /// Removes every element, releasing the tree's handles to them.
    pub fn clear(&mut self) {
        debug!(count = self.nodes.len(), "clearing tree");
        self.nodes.clear();
        self.root = None;
        self.generation += 1;
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<E> {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<E> {
        &mut self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn element(&self, id: NodeId) -> &E {
        &self.node(id).element
    }

    #[inline]
    pub(crate) const fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub(crate) const fn identity(&self) -> u64 {
        self.identity
    }

    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.node(id).is_red())
    }

    /// Which child of `parent` the node `child` is.
    fn side_of(&self, child: NodeId, parent: NodeId) -> Side {
        if self.node(parent).left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub(crate) fn minimum_from(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    pub(crate) fn maximum_from(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// The next node in key order, found through child and parent links.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Right)
    }

    /// The previous node in key order.
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Left)
    }

    fn neighbour(&self, id: NodeId, side: Side) -> Option<NodeId> {
        if let Some(mut next) = self.node(id).child(side) {
            while let Some(inner) = self.node(next).child(side.opposite()) {
                next = inner;
            }
            return Some(next);
        }
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            if self.node(parent).child(side) != Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    fn expect_child(&self, id: NodeId, side: Side) -> NodeId {
        match self.node(id).child(side) {
            Some(child) => child,
            None => unreachable!("node {id:?} lost its {side:?} child during rebalancing"),
        }
    }

    // =========================================================================
    // Structural Mutation
    // =========================================================================

    /// Points the link that referenced `old` (from `parent`, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(old, parent);
                self.node_mut(parent).set_child(side, new);
            }
        }
    }

    /// Rotates `pivot` down towards `direction`.
    ///
    /// The child of `pivot` on the opposite side rises into its place.
    fn rotate(&mut self, pivot: NodeId, direction: Side) {
        let riser = self.expect_child(pivot, direction.opposite());
        let inner = self.node(riser).child(direction);
        let parent = self.node(pivot).parent;

        self.node_mut(pivot).set_child(direction.opposite(), inner);
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(pivot);
        }

        self.replace_child(parent, pivot, Some(riser));
        self.node_mut(riser).parent = parent;

        self.node_mut(riser).set_child(direction, Some(pivot));
        self.node_mut(pivot).parent = Some(riser);
    }

    /// Restores the invariants after linking the red node `node`.
    fn insert_fixup(&mut self, mut node: NodeId) {
        while let Some(parent) = self.node(node).parent {
            if !self.node(parent).is_red() {
                break;
            }
            // A red parent without a parent is the root, recolored below.
            let Some(grandparent) = self.node(parent).parent else {
                break;
            };
            let side = self.side_of(parent, grandparent);
            let uncle = self.node(grandparent).child(side.opposite());

            if let Some(uncle) = uncle.filter(|&uncle| self.node(uncle).is_red()) {
                trace!(node = node.0, "insert fix-up: red uncle, recoloring");
                self.node_mut(parent).color = Color::Black;
                self.node_mut(uncle).color = Color::Black;
                self.node_mut(grandparent).color = Color::Red;
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.side_of(node, parent) == side.opposite() {
                trace!(node = node.0, "insert fix-up: inner child, rotating parent");
                self.rotate(parent, side);
                parent = node;
            }
            trace!(node = node.0, "insert fix-up: rotating grandparent");
            self.node_mut(parent).color = Color::Black;
            self.node_mut(grandparent).color = Color::Red;
            self.rotate(grandparent, side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.node_mut(root).color = Color::Black;
        }
    }

    /// Resolves the double-black deficiency left at `current` below `parent`
    /// after a black node was unlinked.
    fn remove_fixup(&mut self, mut current: Option<NodeId>, mut parent: Option<NodeId>) {
        while current != self.root && !self.is_red(current) {
            let Some(above) = parent else {
                break;
            };
            let side = if self.node(above).left == current {
                Side::Left
            } else {
                Side::Right
            };
            let mut sibling = self.expect_child(above, side.opposite());

            if self.node(sibling).is_red() {
                trace!(node = above.0, "remove fix-up: red sibling");
                self.node_mut(sibling).color = Color::Black;
                self.node_mut(above).color = Color::Red;
                self.rotate(above, side);
                sibling = self.expect_child(above, side.opposite());
            }

            let near = self.node(sibling).child(side);
            let far = self.node(sibling).child(side.opposite());

            if !self.is_red(near) && !self.is_red(far) {
                trace!(node = above.0, "remove fix-up: black sibling, pushing deficiency up");
                self.node_mut(sibling).color = Color::Red;
                current = Some(above);
                parent = self.node(above).parent;
                continue;
            }

            if !self.is_red(far) {
                trace!(node = above.0, "remove fix-up: near red nephew, rotating sibling");
                if let Some(near) = near {
                    self.node_mut(near).color = Color::Black;
                }
                self.node_mut(sibling).color = Color::Red;
                self.rotate(sibling, side.opposite());
                sibling = self.expect_child(above, side.opposite());
            }

            trace!(node = above.0, "remove fix-up: far red nephew, rotating parent");
            let parent_color = self.node(above).color;
            self.node_mut(sibling).color = parent_color;
            self.node_mut(above).color = Color::Black;
            if let Some(far) = self.node(sibling).child(side.opposite()) {
                self.node_mut(far).color = Color::Black;
            }
            self.rotate(above, side);
            current = self.root;
            break;
        }

        if let Some(current) = current {
            self.node_mut(current).color = Color::Black;
        }
    }

    /// Exchanges the elements of two distinct nodes, leaving links untouched.
    fn swap_elements(&mut self, first: NodeId, second: NodeId) {
        let (low, high) = if first.0 < second.0 {
            (first.0, second.0)
        } else {
            (second.0, first.0)
        };
        let (head, tail) = self.nodes.split_at_mut(high);
        mem::swap(&mut head[low].element, &mut tail[0].element);
    }

    /// Drops an already unlinked node from the arena and returns its element.
    ///
    /// The last node of the arena moves into the freed slot; links that
    /// pointed at it are redirected.
    fn release(&mut self, id: NodeId) -> ReferenceCounter<E> {
        let last = NodeId(self.nodes.len() - 1);
        let removed = self.nodes.swap_remove(id.0);

        if id != last {
            let moved = self.node(id);
            let (parent, left, right) = (moved.parent, moved.left, moved.right);
            match parent {
                Some(parent) => {
                    let parent = self.node_mut(parent);
                    if parent.left == Some(last) {
                        parent.left = Some(id);
                    } else {
                        parent.right = Some(id);
                    }
                }
                None => self.root = Some(id),
            }
            for child in [left, right].into_iter().flatten() {
                self.node_mut(child).parent = Some(id);
            }
        }

        removed.element
    }
}

impl<E> RedBlackTree<E> {
    /// Creates an empty set-mode tree ordered by [`Ord`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = RedBlackTree::new();
    /// assert_eq!(tree.len(), 0);
    /// assert_eq!(tree.black_depth(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_order(Natural)
    }
}

impl<E, O: KeyOrder<E>> RedBlackTree<E, O> {
    /// Returns `true` when elements are key/value pairs ordered by key.
    #[must_use]
    pub fn is_map_mode(&self) -> bool {
        self.order.is_map_mode()
    }

    /// Inserts `element`, taking ownership of it.
    ///
    /// If an element with an equal key is already stored it is replaced and
    /// returned; the number of elements does not change.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::OrderingIncompatible`] if the key of `element`
    /// cannot be compared against the stored keys. The tree is not modified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::{ByKey, RedBlackTree};
    ///
    /// let mut tree = RedBlackTree::with_order(ByKey);
    /// assert_eq!(tree.insert(("aa", 1)).unwrap(), None);
    /// let previous = tree.insert(("aa", 2)).unwrap();
    /// assert_eq!(previous.as_deref(), Some(&("aa", 1)));
    /// assert_eq!(tree.find(&"aa").unwrap(), Some(&("aa", 2)));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, element: E) -> Result<Option<ReferenceCounter<E>>, TreeError> {
        self.insert_shared(ReferenceCounter::new(element))
    }

    /// Inserts an element handle the caller may also hold.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    pub fn insert_shared(
        &mut self,
        element: ReferenceCounter<E>,
    ) -> Result<Option<ReferenceCounter<E>>, TreeError> {
        self.insert_raw(element)
            .map_err(|source| TreeError::ordering(Operation::Insert, source))
    }

    /// Returns the stored element whose key equals `probe`.
    ///
    /// The probe is first narrowed through [`KeyOrder::lookup_key`], so a
    /// map-mode order may accept a `(key, placeholder)` probe. In map mode the
    /// whole stored pair is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::OrderingIncompatible`] if `probe` cannot be
    /// compared against the stored keys.
    pub fn find(&self, probe: &O::Key) -> Result<Option<&E>, TreeError> {
        self.locate(probe)
            .map(|found| found.map(|id| &*self.node(id).element))
            .map_err(|source| TreeError::ordering(Operation::Find, source))
    }

    /// Returns a new handle to the stored element whose key equals `probe`.
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find).
    pub fn find_shared(&self, probe: &O::Key) -> Result<Option<ReferenceCounter<E>>, TreeError> {
        self.locate(probe)
            .map(|found| found.map(|id| ReferenceCounter::clone(&self.node(id).element)))
            .map_err(|source| TreeError::ordering(Operation::Find, source))
    }

    /// Returns `true` if an element with a key equal to `probe` is stored.
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find).
    pub fn contains(&self, probe: &O::Key) -> Result<bool, TreeError> {
        self.find(probe).map(|found| found.is_some())
    }

    /// Removes the element whose key equals `probe` and returns it.
    ///
    /// Returns `Ok(None)` when no element matches; that is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::OrderingIncompatible`] if `probe` cannot be
    /// compared against the stored keys. The tree is not modified.
    pub fn remove(&mut self, probe: &O::Key) -> Result<Option<ReferenceCounter<E>>, TreeError> {
        let found = self
            .locate(probe)
            .map_err(|source| TreeError::ordering(Operation::Remove, source))?;
        Ok(found.map(|id| self.remove_node(id)))
    }

    // =========================================================================
    // Crate-internal Primitives
    // =========================================================================

    fn locate(&self, probe: &O::Key) -> Result<Option<NodeId>, O::Error> {
        let key = self.order.lookup_key(probe)?;
        self.locate_by(|stored| self.order.compare(key, stored))
    }

    /// Descends from the root using `compare`, which orders the sought key
    /// against a stored key.
    pub(crate) fn locate_by<F>(&self, mut compare: F) -> Result<Option<NodeId>, O::Error>
    where
        F: FnMut(&O::Key) -> Result<Ordering, O::Error>,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match compare(self.order.key(&node.element)?)? {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Ok(Some(id)),
            };
        }
        Ok(None)
    }

    /// Finds the first node in key order whose key satisfies `admits`.
    ///
    /// `admits` must be monotone: once it holds for a key it holds for every
    /// larger key.
    pub(crate) fn lower_bound_by<F>(&self, mut admits: F) -> Result<Option<NodeId>, O::Error>
    where
        F: FnMut(&O::Key) -> Result<bool, O::Error>,
    {
        let mut current = self.root;
        let mut candidate = None;
        while let Some(id) = current {
            let node = self.node(id);
            if admits(self.order.key(&node.element)?)? {
                candidate = Some(id);
                current = node.left;
            } else {
                current = node.right;
            }
        }
        Ok(candidate)
    }

    fn seek(&self, key: &O::Key) -> Result<Slot, O::Error> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            side = match self.order.compare(key, self.order.key(&node.element)?)? {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Ok(Slot::Occupied(id)),
            };
            parent = Some(id);
            current = node.child(side);
        }
        Ok(Slot::Vacant { parent, side })
    }

    pub(crate) fn insert_raw(
        &mut self,
        element: ReferenceCounter<E>,
    ) -> Result<Option<ReferenceCounter<E>>, O::Error> {
        let slot = self.seek(self.order.key(&element)?)?;
        self.generation += 1;

        match slot {
            Slot::Occupied(id) => {
                trace!(node = id.0, "replacing element with an equal key");
                Ok(Some(mem::replace(&mut self.node_mut(id).element, element)))
            }
            Slot::Vacant { parent, side } => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(Node::new_red(element, parent));
                match parent {
                    Some(parent) => self.node_mut(parent).set_child(side, Some(id)),
                    None => self.root = Some(id),
                }
                trace!(node = id.0, "linked new red node");
                self.insert_fixup(id);
                self.debug_check(Some(id));
                Ok(None)
            }
        }
    }

    /// Unlinks the node `target`, rebalances, and returns its element.
    pub(crate) fn remove_node(&mut self, target: NodeId) -> ReferenceCounter<E> {
        self.generation += 1;

        // A node with two children trades elements with its in-order
        // successor, which has at most one child, and that node is unlinked.
        let doomed = match (self.node(target).left, self.node(target).right) {
            (Some(_), Some(right)) => {
                let successor = self.minimum_from(right);
                self.swap_elements(target, successor);
                successor
            }
            _ => target,
        };

        let node = self.node(doomed);
        let child = node.left.or(node.right);
        let parent = node.parent;
        let color = node.color;

        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
        self.replace_child(parent, doomed, child);

        if color == Color::Black {
            self.remove_fixup(child, parent);
        }

        let element = self.release(doomed);
        trace!(remaining = self.nodes.len(), "removed node");
        // `release` moved the last node into the freed slot.
        let anchor = parent.map(|parent| {
            if parent.0 == self.nodes.len() {
                doomed
            } else {
                parent
            }
        });
        self.debug_check(anchor);
        element
    }
}

impl<E, O: KeyOrder<E, Error = Infallible>> RedBlackTree<E, O> {
    /// Inserts through an order that cannot fail.
    pub(crate) fn upsert(&mut self, element: ReferenceCounter<E>) -> Option<ReferenceCounter<E>> {
        into_ok(self.insert_raw(element))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<E, O: Clone> Clone for RedBlackTree<E, O> {
    /// Copies the node structure and shares every element with the source.
    fn clone(&self) -> Self {
        debug!(count = self.nodes.len(), "cloning tree structure");
        Self {
            nodes: self.nodes.iter().map(Node::share).collect(),
            root: self.root,
            order: self.order.clone(),
            identity: next_identity(),
            generation: 0,
        }
    }
}

impl<E, O: Default> Default for RedBlackTree<E, O> {
    #[inline]
    fn default() -> Self {
        Self::with_order(O::default())
    }
}

impl<E, O> Extend<E> for RedBlackTree<E, O>
where
    O: KeyOrder<E, Error = Infallible>,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for element in iter {
            self.upsert(ReferenceCounter::new(element));
        }
    }
}

impl<E, O> FromIterator<E> for RedBlackTree<E, O>
where
    O: KeyOrder<E, Error = Infallible> + Default,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<'a, E, O> IntoIterator for &'a RedBlackTree<E, O> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: fmt::Debug, O> fmt::Debug for RedBlackTree<E, O> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<E, O> RedBlackTree<E, O> {
    /// Iterates from `start` to the end of the tree.
    pub(crate) const fn iter_from(&self, start: Option<NodeId>) -> Range<'_, E, O> {
        Range::new(self, start)
    }
}

// =============================================================================
// Tests
// =============================================================================
