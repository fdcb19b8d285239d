//! An ordered map backed by a red-black tree.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::RangeBounds;

use super::{above_start, below_end};
use crate::error::TreeError;
use crate::order::{ByKey, into_ok};
use crate::tree::{Iter, NodeId, RedBlackTree, ReferenceCounter};

// =============================================================================
// TreeMap Definition
// =============================================================================

/// An ordered map from keys to values.
///
/// Entries are stored as `(key, value)` pairs in a [`RedBlackTree`] ordered
/// by key alone. Inserting under an existing key replaces the whole pair and
/// returns the previous value.
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `get`          | O(log N)   |
/// | `insert`       | O(log N)   |
/// | `remove`       | O(log N)   |
/// | `len`          | O(1)       |
/// | `range`        | O(log N + M) |
///
/// # Examples
///
/// ```rust
/// use ordtree::TreeMap;
///
/// let mut map = TreeMap::new();
/// map.insert(3, "three");
/// map.insert(1, "one");
/// map.insert(2, "two");
///
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&1, &2, &3]);
/// assert_eq!(map.to_string(), "{1: one, 2: two, 3: three}");
/// assert!(map.try_get(&4).unwrap_err().is_key_absent());
/// ```
pub struct TreeMap<K, V> {
    tree: RedBlackTree<(K, V), ByKey>,
}

impl<K, V> TreeMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: RedBlackTree::with_order(ByKey),
        }
    }

    /// Returns the number of entries in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns an iterator over the entries in ascending key order.
    #[must_use]
    pub fn iter(&self) -> Entries<'_, K, V> {
        Entries {
            inner: self.tree.iter(),
        }
    }

    /// Returns an iterator over the `(key, value)` entries; same as [`iter`](Self::iter).
    #[must_use]
    pub fn items(&self) -> Entries<'_, K, V> {
        self.iter()
    }

    /// Returns an iterator over the keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in ascending key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.min().map(|(key, value)| (key, value))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.max().map(|(key, value)| (key, value))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    fn locate<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        into_ok(self.tree.locate_by(|stored| Ok(key.cmp(stored.borrow()))))
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).map(|id| {
            let (key, value) = self.tree.element(id);
            (key, value)
        })
    }

    /// Returns the value stored under `key`, failing if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyAbsent`] if no entry has this key.
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V, TreeError>
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        self.get(key).ok_or_else(|| TreeError::key_absent(key))
    }

    /// Returns `true` if an entry with `key` exists.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).is_some()
    }

    /// Returns an iterator over the entries whose keys fall within `range`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::TreeMap;
    ///
    /// let map: TreeMap<i32, char> = (0..6).zip('a'..).collect();
    /// let entries: Vec<(&i32, &char)> = map.range(2..=3).collect();
    /// assert_eq!(entries, vec![(&2, &'c'), (&3, &'d')]);
    /// ```
    pub fn range<Q, R>(&self, range: R) -> impl Iterator<Item = (&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        R: RangeBounds<Q>,
    {
        let start = into_ok(
            self.tree
                .lower_bound_by(|stored| Ok(above_start(range.start_bound(), stored.borrow()))),
        );
        self.tree
            .iter_from(start)
            .map(|(key, value)| (key, value))
            .take_while(move |(key, _)| below_end(range.end_bound(), (*key).borrow()))
    }

    /// Stores `value` under `key`, returning the handle of the entry it replaced.
    ///
    /// Unlike [`insert`](Self::insert) this needs no `Clone` bound: the
    /// replaced entry may still be shared with a clone of this map.
    pub fn insert_shared(&mut self, key: K, value: V) -> Option<ReferenceCounter<(K, V)>> {
        self.tree.upsert(ReferenceCounter::new((key, value)))
    }

    /// Removes the entry for `key` and returns its handle.
    pub fn remove_shared<Q>(&mut self, key: &Q) -> Option<ReferenceCounter<(K, V)>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).map(|id| self.tree.remove_node(id))
    }
}

impl<K: Ord + Clone, V: Clone> TreeMap<K, V> {
    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// The replaced entry is only cloned when another map still shares it.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_shared(key, value)
            .map(|previous| ReferenceCounter::unwrap_or_clone(previous).1)
    }

    /// Removes the entry for `key` and returns its value.
    ///
    /// Removing an absent key is not an error.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry for `key` and returns it.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_shared(key).map(ReferenceCounter::unwrap_or_clone)
    }

    /// Removes the entry for `key` and returns its value, failing if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyAbsent`] if no entry has this key.
    pub fn try_remove<Q>(&mut self, key: &Q) -> Result<V, TreeError>
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        self.remove(key).ok_or_else(|| TreeError::key_absent(key))
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// An iterator over the entries of a [`TreeMap`] in ascending key order.
pub struct Entries<'a, K, V> {
    inner: Iter<'a, (K, V), ByKey>,
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Entries<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (key, value))
    }
}

impl<K, V> ExactSizeIterator for Entries<'_, K, V> {}

impl<K, V> FusedIterator for Entries<'_, K, V> {}

/// An iterator over the keys of a [`TreeMap`] in ascending order.
pub struct Keys<'a, K, V> {
    inner: Entries<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`TreeMap`] in ascending key order.
pub struct Values<'a, K, V> {
    inner: Entries<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Clone for TreeMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord, V> Extend<(K, V)> for TreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<'a, K, V> IntoIterator for &'a TreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two maps are equal when their sorted entry sequences are equal.
impl<K: PartialEq, V: PartialEq> PartialEq for TreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for TreeMap<K, V> {}

impl<K: Hash, V: Hash> Hash for TreeMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for TreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K: serde::Serialize, V: serde::Serialize> serde::Serialize for TreeMap<K, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct TreeMapVisitor<K, V> {
    key_marker: std::marker::PhantomData<K>,
    value_marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<K, V> TreeMapVisitor<K, V> {
    const fn new() -> Self {
        Self {
            key_marker: std::marker::PhantomData,
            value_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for TreeMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = TreeMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = TreeMap::new();
        while let Some(entry) = access.next_entry()? {
            map.tree.upsert(ReferenceCounter::new(entry));
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for TreeMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(TreeMapVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn letters() -> TreeMap<String, i32> {
        [("cc", 3), ("aa", 1), ("bb", 2)]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    #[rstest]
    fn test_insert_returns_previous_value() {
        let mut map = TreeMap::new();
        assert_eq!(map.insert("aa", 1), None);
        assert_eq!(map.insert("aa", 2), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("aa"), Some(&2));
    }

    #[rstest]
    fn test_lookup_by_str(letters: TreeMap<String, i32>) {
        assert_eq!(letters.get("bb"), Some(&2));
        assert_eq!(
            letters.get_key_value("cc"),
            Some((&"cc".to_string(), &3))
        );
        assert!(letters.contains_key("aa"));
        assert!(!letters.contains_key("dd"));
    }

    #[rstest]
    fn test_try_get_reports_missing_key(letters: TreeMap<String, i32>) {
        let error = letters.try_get("zz").unwrap_err();
        assert!(error.is_key_absent());
        assert_eq!(error.to_string(), "key not found: \"zz\"");
        assert_eq!(letters.try_get("aa").unwrap(), &1);
    }

    #[rstest]
    fn test_remove_and_try_remove(mut letters: TreeMap<String, i32>) {
        assert_eq!(letters.remove("aa"), Some(1));
        assert_eq!(letters.remove("aa"), None);
        assert!(letters.try_remove("aa").unwrap_err().is_key_absent());
        assert_eq!(letters.try_remove("bb").unwrap(), 2);
        assert_eq!(
            letters.remove_entry("cc"),
            Some(("cc".to_string(), 3))
        );
        assert!(letters.is_empty());
    }

    #[rstest]
    fn test_iteration_views(letters: TreeMap<String, i32>) {
        assert_eq!(
            letters.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["aa", "bb", "cc"]
        );
        assert_eq!(letters.values().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(letters.values().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(letters.items().len(), 3);
    }

    #[rstest]
    fn test_first_and_last_entries(letters: TreeMap<String, i32>) {
        assert_eq!(letters.first_key_value(), Some((&"aa".to_string(), &1)));
        assert_eq!(letters.last_key_value(), Some((&"cc".to_string(), &3)));
    }

    #[rstest]
    #[case("aa".."cc", vec![1, 2])]
    #[case("b".., vec![2, 3])]
    #[case(..="bb", vec![1, 2])]
    fn test_range_by_str<R: RangeBounds<&'static str>>(
        #[case] range: R,
        #[case] expected: Vec<i32>,
    ) {
        let map: TreeMap<&'static str, i32> = [("cc", 3), ("aa", 1), ("bb", 2)].into_iter().collect();
        let values: Vec<i32> = map.range(range).map(|(_, value)| *value).collect();
        assert_eq!(values, expected);
    }

    #[rstest]
    fn test_display_and_debug(letters: TreeMap<String, i32>) {
        assert_eq!(letters.to_string(), "{aa: 1, bb: 2, cc: 3}");
        assert_eq!(format!("{letters:?}"), r#"{"aa": 1, "bb": 2, "cc": 3}"#);
    }

    #[rstest]
    fn test_equality_by_content(letters: TreeMap<String, i32>) {
        let mut other = TreeMap::new();
        for (key, value) in [("bb", 2), ("cc", 3), ("aa", 1)] {
            other.insert(key.to_string(), value);
        }
        assert_eq!(letters, other);
        other.insert("aa".to_string(), 9);
        assert_ne!(letters, other);
    }

    #[derive(Debug, PartialEq)]
    struct Unclonable(i32);

    #[rstest]
    fn test_shared_variants_without_clone() {
        let mut map = TreeMap::new();
        assert!(map.insert_shared("aa", Unclonable(1)).is_none());

        let previous = map.insert_shared("aa", Unclonable(2));
        let previous = previous.map(ReferenceCounter::try_unwrap);
        assert!(matches!(previous, Some(Ok(("aa", Unclonable(1))))));
        assert_eq!(map.get("aa"), Some(&Unclonable(2)));

        let removed = map.remove_shared("aa").map(ReferenceCounter::try_unwrap);
        assert!(matches!(removed, Some(Ok(("aa", Unclonable(2))))));
        assert!(map.remove_shared("aa").is_none());
        assert!(map.is_empty());
    }

    #[rstest]
    fn test_remove_keeps_entry_alive_in_clone(letters: TreeMap<String, i32>) {
        let mut copy = letters.clone();
        let handle = copy.remove_shared("aa");
        assert_eq!(handle.as_deref(), Some(&("aa".to_string(), 1)));
        assert_eq!(letters.get("aa"), Some(&1));
    }

    #[rstest]
    fn test_clone_independence(letters: TreeMap<String, i32>) {
        let mut copy = letters.clone();
        copy.remove("aa");
        assert_eq!(letters.len(), 3);
        assert_eq!(copy.len(), 2);
    }
}
