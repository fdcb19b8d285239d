//! The ordering contract between a tree and its elements.
//!
//! A [`KeyOrder`] answers two questions for the engine:
//!
//! 1. Which part of a stored element is its comparison key?
//! 2. How do two keys compare?
//!
//! Both answers may fail, which is how heterogeneous keys (see
//! [`DynamicOrder`](crate::DynamicOrder)) report an
//! [`OrderingIncompatible`](crate::TreeError::OrderingIncompatible) condition.
//! The statically typed orders in this module use [`Infallible`] as their
//! error type and never fail.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::error::Error as StdError;

/// A total order over the keys projected out of elements of type `E`.
///
/// Implementations must be consistent: the projected key of a stored element
/// must never change while the element is in a tree, and `compare` must be a
/// total order over every key that was accepted.
///
/// # Examples
///
/// ```rust
/// use ordtree::{KeyOrder, RedBlackTree};
/// use std::cmp::Ordering;
/// use std::convert::Infallible;
///
/// /// Orders strings by length only.
/// #[derive(Default)]
/// struct ByLength;
///
/// impl KeyOrder<String> for ByLength {
///     type Key = String;
///     type Error = Infallible;
///
///     fn key<'a>(&self, element: &'a String) -> Result<&'a String, Infallible> {
///         Ok(element)
///     }
///
///     fn compare(&self, probe: &String, stored: &String) -> Result<Ordering, Infallible> {
///         Ok(probe.len().cmp(&stored.len()))
///     }
/// }
///
/// let mut tree = RedBlackTree::with_order(ByLength);
/// tree.insert("abc".to_string()).unwrap();
/// let previous = tree.insert("xyz".to_string()).unwrap();
/// assert_eq!(previous.as_deref().map(String::as_str), Some("abc"));
/// assert_eq!(tree.len(), 1);
/// ```
pub trait KeyOrder<E> {
    /// The comparable projection of an element.
    type Key: ?Sized;

    /// Why a projection or comparison can fail.
    type Error: StdError + Send + Sync + 'static;

    /// Projects the comparison key out of `element`.
    ///
    /// # Errors
    ///
    /// Returns an error when `element` has no key under this order.
    fn key<'a>(&self, element: &'a E) -> Result<&'a Self::Key, Self::Error>;

    /// Compares a probe key against a stored key.
    ///
    /// # Errors
    ///
    /// Returns an error when the two keys cannot be ordered against each other.
    fn compare(&self, probe: &Self::Key, stored: &Self::Key) -> Result<Ordering, Self::Error>;

    /// Projects the part of a lookup argument that is compared against stored keys.
    ///
    /// The default is the probe itself. Orders whose probes may carry a
    /// placeholder alongside the key override this.
    ///
    /// # Errors
    ///
    /// Returns an error when `probe` has no key under this order.
    fn lookup_key<'a>(&self, probe: &'a Self::Key) -> Result<&'a Self::Key, Self::Error> {
        Ok(probe)
    }

    /// Returns `true` when elements are key/value pairs ordered by their key.
    fn is_map_mode(&self) -> bool {
        false
    }
}

// =============================================================================
// Natural
// =============================================================================

/// Set-mode order: the element is its own key, compared through [`Ord`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord> KeyOrder<T> for Natural {
    type Key = T;
    type Error = Infallible;

    #[inline]
    fn key<'a>(&self, element: &'a T) -> Result<&'a T, Infallible> {
        Ok(element)
    }

    #[inline]
    fn compare(&self, probe: &T, stored: &T) -> Result<Ordering, Infallible> {
        Ok(probe.cmp(stored))
    }
}

// =============================================================================
// ByKey
// =============================================================================

/// Map-mode order: elements are `(K, V)` pairs ordered by `K` alone.
///
/// The value half never takes part in a comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ByKey;

impl<K: Ord, V> KeyOrder<(K, V)> for ByKey {
    type Key = K;
    type Error = Infallible;

    #[inline]
    fn key<'a>(&self, element: &'a (K, V)) -> Result<&'a K, Infallible> {
        Ok(&element.0)
    }

    #[inline]
    fn compare(&self, probe: &K, stored: &K) -> Result<Ordering, Infallible> {
        Ok(probe.cmp(stored))
    }

    fn is_map_mode(&self) -> bool {
        true
    }
}

/// Extracts the value of a result that cannot fail.
#[inline]
pub(crate) fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, Ordering::Less)]
    #[case(2, 2, Ordering::Equal)]
    #[case(3, 2, Ordering::Greater)]
    fn test_natural_compares_with_ord(
        #[case] probe: i32,
        #[case] stored: i32,
        #[case] expected: Ordering,
    ) {
        assert_eq!(
            into_ok(KeyOrder::<i32>::compare(&Natural, &probe, &stored)),
            expected
        );
    }

    #[rstest]
    fn test_by_key_ignores_value() {
        let element = ("aa", 1);
        assert_eq!(into_ok(KeyOrder::<(&str, i32)>::key(&ByKey, &element)), &"aa");
        assert!(KeyOrder::<(&str, i32)>::is_map_mode(&ByKey));
        assert!(!KeyOrder::<&str>::is_map_mode(&Natural));
    }
}
