//! An ordered set backed by a red-black tree.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, BitXor, RangeBounds, Sub};

use super::{above_start, below_end};
use crate::order::{Natural, into_ok};
use crate::tree::{Iter, NodeId, RedBlackTree, ReferenceCounter};

// =============================================================================
// TreeSet Definition
// =============================================================================

/// An ordered set of unique elements.
///
/// Adding an element equal to one already present replaces the stored
/// element, so the set always holds the most recently added representative.
///
/// Set algebra (`union`, `intersection`, ...) builds a new set whose elements
/// are shared with the operands rather than copied.
///
/// # Examples
///
/// ```rust
/// use ordtree::TreeSet;
///
/// let mut set = TreeSet::new();
/// assert!(set.insert("bb".to_string()));
/// assert!(set.insert("aa".to_string()));
/// assert!(!set.insert("aa".to_string()));
///
/// assert!(set.contains("aa"));
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.iter().map(String::as_str).collect::<Vec<_>>(), vec!["aa", "bb"]);
/// ```
pub struct TreeSet<T> {
    tree: RedBlackTree<T, Natural>,
}

impl<T> TreeSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: RedBlackTree::new(),
        }
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns an iterator over the elements in ascending order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Returns the smallest element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.min()
    }

    /// Returns the largest element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<T: Ord> TreeSet<T> {
    fn locate<Q>(&self, value: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        into_ok(self.tree.locate_by(|stored| Ok(value.cmp(stored.borrow()))))
    }

    /// Adds `value`, returning `true` if no equal element was present.
    ///
    /// An equal element that was present is replaced by `value`.
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.upsert(ReferenceCounter::new(value)).is_none()
    }

    /// Removes the element equal to `value`, returning `true` if it was present.
    ///
    /// Removing an absent element is not an error.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(value)
            .map(|id| self.tree.remove_node(id))
            .is_some()
    }

    /// Returns `true` if the set contains an element equal to `value`.
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(value).is_some()
    }

    /// Returns the stored element equal to `value`.
    #[must_use]
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(value).map(|id| self.tree.element(id))
    }

    /// Returns an iterator over the elements within `range`, in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::TreeSet;
    ///
    /// let set: TreeSet<i32> = (1..=10).collect();
    /// let middle: Vec<&i32> = set.range(4..7).collect();
    /// assert_eq!(middle, vec![&4, &5, &6]);
    /// ```
    pub fn range<Q, R>(&self, range: R) -> impl Iterator<Item = &T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
        R: RangeBounds<Q>,
    {
        let start = into_ok(
            self.tree
                .lower_bound_by(|stored| Ok(above_start(range.start_bound(), stored.borrow()))),
        );
        self.tree
            .iter_from(start)
            .take_while(move |element| below_end(range.end_bound(), (*element).borrow()))
    }

    /// Collects the elements of `self` that satisfy `keep` into a new tree.
    fn filtered(&self, mut keep: impl FnMut(&T) -> bool) -> RedBlackTree<T, Natural> {
        let mut tree = RedBlackTree::new();
        let mut handles = self.tree.iter();
        while let Some(handle) = handles.next_handle() {
            if keep(&**handle) {
                tree.upsert(ReferenceCounter::clone(handle));
            }
        }
        tree
    }

    /// Adds the elements of `other` that are absent from `self` to `tree`.
    fn absorb_missing(&self, tree: &mut RedBlackTree<T, Natural>, other: &Self) {
        let mut handles = other.tree.iter();
        while let Some(handle) = handles.next_handle() {
            if !self.contains(&**handle) {
                tree.upsert(ReferenceCounter::clone(handle));
            }
        }
    }

    /// Returns the elements in `self`, `other`, or both.
    ///
    /// Where both sets hold an equal element, the one from `self` is kept.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut tree = self.tree.clone();
        self.absorb_missing(&mut tree, other);
        Self { tree }
    }

    /// Returns the elements of `self` that are also in `other`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            tree: self.filtered(|value| other.contains(value)),
        }
    }

    /// Returns the elements of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self {
            tree: self.filtered(|value| !other.contains(value)),
        }
    }

    /// Returns the elements in exactly one of `self` and `other`.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut tree = self.filtered(|value| !other.contains(value));
        self.absorb_missing(&mut tree, other);
        Self { tree }
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|value| other.contains(value))
    }

    /// Returns `true` if every element of `other` is in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` and `other` share no element.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.iter().all(|value| !other.contains(value))
    }
}

impl<T: Ord + Clone> TreeSet<T> {
    /// Adds `value`, returning the equal element it replaced.
    pub fn replace(&mut self, value: T) -> Option<T> {
        self.tree
            .upsert(ReferenceCounter::new(value))
            .map(ReferenceCounter::unwrap_or_clone)
    }

    /// Removes and returns the element equal to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(value)
            .map(|id| ReferenceCounter::unwrap_or_clone(self.tree.remove_node(id)))
    }
}

// =============================================================================
// Operators
// =============================================================================

impl<T: Ord> BitOr<&TreeSet<T>> for &TreeSet<T> {
    type Output = TreeSet<T>;

    /// Returns the union of `self` and `rhs`.
    fn bitor(self, rhs: &TreeSet<T>) -> TreeSet<T> {
        self.union(rhs)
    }
}

impl<T: Ord> BitAnd<&TreeSet<T>> for &TreeSet<T> {
    type Output = TreeSet<T>;

    /// Returns the intersection of `self` and `rhs`.
    fn bitand(self, rhs: &TreeSet<T>) -> TreeSet<T> {
        self.intersection(rhs)
    }
}

impl<T: Ord> Sub<&TreeSet<T>> for &TreeSet<T> {
    type Output = TreeSet<T>;

    /// Returns the difference of `self` and `rhs`.
    fn sub(self, rhs: &TreeSet<T>) -> TreeSet<T> {
        self.difference(rhs)
    }
}

impl<T: Ord> BitXor<&TreeSet<T>> for &TreeSet<T> {
    type Output = TreeSet<T>;

    /// Returns the symmetric difference of `self` and `rhs`.
    fn bitxor(self, rhs: &TreeSet<T>) -> TreeSet<T> {
        self.symmetric_difference(rhs)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for TreeSet<T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T> Default for TreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for TreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<T: Ord> Extend<T> for TreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a TreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two sets are equal when they hold equal elements, whatever their shape.
impl<T: PartialEq> PartialEq for TreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for TreeSet<T> {}

impl<T: Hash> Hash for TreeSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for TreeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for TreeSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            sequence.serialize_element(element)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
struct TreeSetVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for TreeSetVisitor<T>
where
    T: serde::Deserialize<'de> + Ord,
{
    type Value = TreeSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = TreeSet::new();
        while let Some(element) = access.next_element()? {
            set.insert(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for TreeSet<T>
where
    T: serde::Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(TreeSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
