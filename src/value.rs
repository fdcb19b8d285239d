//! Dynamically typed keys and the fallible order over them.
//!
//! [`Value`] models the handful of scalar and tuple kinds a loosely typed
//! caller may hand to a tree. Not every pair of values can be ordered: a
//! string and an integer have no mutual position, and neither does NaN.
//! [`DynamicOrder`] surfaces those failures as [`ComparisonError`]s, which the
//! engine reports as [`TreeError::OrderingIncompatible`] without touching the
//! tree.
//!
//! # Examples
//!
//! ```rust
//! use ordtree::{DynamicTree, Value};
//!
//! let mut tree = DynamicTree::with_mode(false);
//! tree.insert(Value::from("bb")).unwrap();
//! tree.insert(Value::from("aa")).unwrap();
//!
//! let error = tree.insert(Value::from(1)).unwrap_err();
//! assert!(error.is_ordering_incompatible());
//! assert_eq!(tree.count(), 2);
//! ```

use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ComparisonError, TreeError};
use crate::order::KeyOrder;
use crate::tree::{RedBlackTree, ReferenceCounter};

// =============================================================================
// Value
// =============================================================================

/// A dynamically typed key or value.
///
/// Booleans, integers and floats order numerically against one another.
/// Strings order lexicographically. Tuples order element by element, then by
/// length. Every other combination, including `None` against anything, is
/// unorderable.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// The absent value.
    None,
    /// A boolean, ordered as `0` or `1`.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number; NaN is unorderable.
    Float(f64),
    /// A string.
    Str(String),
    /// A fixed-length sequence of values.
    Tuple(Vec<Self>),
}

/// How a numeric value takes part in a comparison.
enum Numeric {
    Integral(i64),
    Real(f64),
}

impl Value {
    /// Builds a two-element tuple, the element shape of a map-mode tree.
    pub fn pair(key: impl Into<Self>, value: impl Into<Self>) -> Self {
        Self::Tuple(vec![key.into(), value.into()])
    }

    /// Returns the name of this value's kind, as used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "NoneType",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Tuple(_) => "tuple",
        }
    }

    /// Returns `true` for [`Value::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Borrows both halves of a two-element tuple.
    #[must_use]
    pub fn as_pair(&self) -> Option<(&Self, &Self)> {
        match self {
            Self::Tuple(items) => match items.as_slice() {
                [key, value] => Some((key, value)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Splits a two-element tuple into its halves.
    ///
    /// # Errors
    ///
    /// Gives the value back unchanged if it is not a two-element tuple.
    pub fn into_pair(self) -> Result<(Self, Self), Self> {
        match self {
            Self::Tuple(items) => <[Self; 2]>::try_from(items)
                .map(|[key, value]| (key, value))
                .map_err(Self::Tuple),
            other => Err(other),
        }
    }

    fn numeric(&self) -> Option<Numeric> {
        match *self {
            Self::Bool(flag) => Some(Numeric::Integral(i64::from(flag))),
            Self::Int(integer) => Some(Numeric::Integral(integer)),
            Self::Float(real) => Some(Numeric::Real(real)),
            _ => None,
        }
    }

    /// Compares two values, failing when they have no mutual order.
    ///
    /// # Errors
    ///
    /// - [`ComparisonError::Unorderable`] for kinds without a mutual order
    /// - [`ComparisonError::NotANumber`] if a NaN is involved
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::Value;
    /// use std::cmp::Ordering;
    ///
    /// assert_eq!(Value::from(1).try_cmp(&Value::from(1.5)), Ok(Ordering::Less));
    /// assert_eq!(Value::from(true).try_cmp(&Value::from(1)), Ok(Ordering::Equal));
    /// assert!(Value::from("aa").try_cmp(&Value::from(1)).is_err());
    /// ```
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, ComparisonError> {
        if let (Some(left), Some(right)) = (self.numeric(), other.numeric()) {
            return compare_numeric(&left, &right);
        }
        match (self, other) {
            (Self::Str(left), Self::Str(right)) => Ok(left.cmp(right)),
            (Self::Tuple(left), Self::Tuple(right)) => {
                // Equal elements are skipped without ordering them, so a
                // `None` shared by both sides does not fail the comparison.
                for (left_item, right_item) in left.iter().zip(right) {
                    if left_item != right_item {
                        let ordering = left_item.try_cmp(right_item)?;
                        if ordering != Ordering::Equal {
                            return Ok(ordering);
                        }
                    }
                }
                Ok(left.len().cmp(&right.len()))
            }
            _ => Err(ComparisonError::Unorderable {
                left: self.kind(),
                right: other.kind(),
            }),
        }
    }
}

fn compare_numeric(left: &Numeric, right: &Numeric) -> Result<Ordering, ComparisonError> {
    match (left, right) {
        (Numeric::Integral(left), Numeric::Integral(right)) => Ok(left.cmp(right)),
        (Numeric::Integral(left), Numeric::Real(right)) => compare_integral_real(*left, *right),
        (Numeric::Real(left), Numeric::Integral(right)) => {
            compare_integral_real(*right, *left).map(Ordering::reverse)
        }
        (Numeric::Real(left), Numeric::Real(right)) => {
            left.partial_cmp(right).ok_or(ComparisonError::NotANumber)
        }
    }
}

/// `2^63` as a float: the first value above every `i64`.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Compares an integer against a float without rounding the integer.
///
/// The float's integral part is compared as an `i64`; its fractional part
/// only breaks a tie.
#[allow(clippy::cast_possible_truncation)]
fn compare_integral_real(integer: i64, real: f64) -> Result<Ordering, ComparisonError> {
    if real.is_nan() {
        return Err(ComparisonError::NotANumber);
    }
    if real >= I64_UPPER_BOUND {
        return Ok(Ordering::Less);
    }
    if real < -I64_UPPER_BOUND {
        return Ok(Ordering::Greater);
    }
    let whole = real.trunc();
    // In range, so the cast is exact.
    let ordering = integer.cmp(&(whole as i64));
    if ordering != Ordering::Equal {
        return Ok(ordering);
    }
    let fraction = real - whole;
    Ok(if fraction > 0.0 {
        Ordering::Less
    } else if fraction < 0.0 {
        Ordering::Greater
    } else {
        Ordering::Equal
    })
}

impl fmt::Debug for Value {
    /// Same literal form as [`Display`](fmt::Display), so error messages and
    /// assertion output agree on how a key looks.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, formatter)
    }
}

impl fmt::Display for Value {
    /// Renders the value in literal form: quoted strings, parenthesised tuples.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => formatter.write_str("None"),
            Self::Bool(true) => formatter.write_str("True"),
            Self::Bool(false) => formatter.write_str("False"),
            Self::Int(integer) => write!(formatter, "{integer}"),
            Self::Float(real) if real.is_nan() => formatter.write_str("nan"),
            Self::Float(real) if real.is_infinite() => {
                formatter.write_str(if *real > 0.0 { "inf" } else { "-inf" })
            }
            Self::Float(real) => write!(formatter, "{real:?}"),
            Self::Str(text) => {
                formatter.write_str("'")?;
                for character in text.chars() {
                    match character {
                        '\'' => formatter.write_str("\\'")?,
                        '\\' => formatter.write_str("\\\\")?,
                        '\n' => formatter.write_str("\\n")?,
                        other => write!(formatter, "{other}")?,
                    }
                }
                formatter.write_str("'")
            }
            Self::Tuple(items) => {
                formatter.write_str("(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{item}")?;
                }
                if items.len() == 1 {
                    formatter.write_str(",")?;
                }
                formatter.write_str(")")
            }
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::None
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i32> for Value {
    fn from(integer: i32) -> Self {
        Self::Int(i64::from(integer))
    }
}

impl From<i64> for Value {
    fn from(integer: i64) -> Self {
        Self::Int(integer)
    }
}

impl From<f64> for Value {
    fn from(real: f64) -> Self {
        Self::Float(real)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Str(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::Tuple(items)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::None, Into::into)
    }
}

impl<A: Into<Self>, B: Into<Self>> From<(A, B)> for Value {
    fn from((first, second): (A, B)) -> Self {
        Self::pair(first, second)
    }
}

// =============================================================================
// DynamicOrder
// =============================================================================

/// The order of a [`DynamicTree`].
///
/// In set mode a stored [`Value`] is its own key. In map mode every stored
/// value must be a `(key, value)` pair and only the key takes part in
/// comparisons; the value half is never looked at.
///
/// Map-mode lookups accept either a bare key or a `(key, placeholder)` pair.
/// A two-element tuple handed to `find` or `remove` is always read as the
/// latter, so a tuple-valued key has to be wrapped: `(key, None)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DynamicOrder {
    map_mode: bool,
}

impl DynamicOrder {
    /// Creates the order for a set-mode (`false`) or map-mode (`true`) tree.
    #[must_use]
    pub const fn new(map_mode: bool) -> Self {
        Self { map_mode }
    }
}

impl KeyOrder<Value> for DynamicOrder {
    type Key = Value;
    type Error = ComparisonError;

    fn key<'a>(&self, element: &'a Value) -> Result<&'a Value, ComparisonError> {
        if !self.map_mode {
            return Ok(element);
        }
        element
            .as_pair()
            .map(|(key, _)| key)
            .ok_or(ComparisonError::NotAPair {
                kind: element.kind(),
            })
    }

    fn compare(&self, probe: &Value, stored: &Value) -> Result<Ordering, ComparisonError> {
        probe.try_cmp(stored)
    }

    fn lookup_key<'a>(&self, probe: &'a Value) -> Result<&'a Value, ComparisonError> {
        match probe.as_pair() {
            Some((key, _)) if self.map_mode => Ok(key),
            _ => Ok(probe),
        }
    }

    fn is_map_mode(&self) -> bool {
        self.map_mode
    }
}

// =============================================================================
// DynamicTree
// =============================================================================

/// A tree of [`Value`]s whose mode is chosen at runtime.
pub type DynamicTree = RedBlackTree<Value, DynamicOrder>;

impl RedBlackTree<Value, DynamicOrder> {
    /// Creates an empty tree in set mode (`false`) or map mode (`true`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordtree::{DynamicTree, Value};
    ///
    /// let mut tree = DynamicTree::with_mode(true);
    /// tree.insert(Value::pair("aa", 1)).unwrap();
    /// let previous = tree.insert(Value::pair("aa", 2)).unwrap();
    ///
    /// assert_eq!(previous.as_deref(), Some(&Value::pair("aa", 1)));
    /// assert_eq!(tree.find(&Value::from("aa")).unwrap(), Some(&Value::pair("aa", 2)));
    /// assert_eq!(tree.count(), 1);
    /// ```
    #[must_use]
    pub fn with_mode(map_mode: bool) -> Self {
        Self::with_order(DynamicOrder::new(map_mode))
    }

    fn require_map_mode(&self) -> Result<(), TreeError> {
        if self.is_map_mode() {
            Ok(())
        } else {
            Err(TreeError::NotMapMode)
        }
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// - [`TreeError::NotMapMode`] on a set-mode tree
    /// - [`TreeError::KeyAbsent`] if no pair has this key
    /// - [`TreeError::OrderingIncompatible`] if `key` cannot be compared
    pub fn get_item(&self, key: &Value) -> Result<&Value, TreeError> {
        self.require_map_mode()?;
        self.find(&lookup(key))?
            .and_then(Value::as_pair)
            .map(|(_, value)| value)
            .ok_or_else(|| TreeError::key_absent(key))
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// # Errors
    ///
    /// - [`TreeError::NotMapMode`] on a set-mode tree
    /// - [`TreeError::OrderingIncompatible`] if `key` cannot be compared
    pub fn set_item(
        &mut self,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, TreeError> {
        self.require_map_mode()?;
        let previous = self.insert(Value::pair(key, value))?;
        Ok(previous.and_then(value_half))
    }

    /// Removes the pair stored under `key` and returns its value.
    ///
    /// # Errors
    ///
    /// - [`TreeError::NotMapMode`] on a set-mode tree
    /// - [`TreeError::KeyAbsent`] if no pair has this key
    /// - [`TreeError::OrderingIncompatible`] if `key` cannot be compared
    pub fn del_item(&mut self, key: &Value) -> Result<Value, TreeError> {
        self.require_map_mode()?;
        self.remove(&lookup(key))?
            .and_then(value_half)
            .ok_or_else(|| TreeError::key_absent(key))
    }
}

/// Wraps `key` as `(key, None)` so a tuple-valued key is not split.
fn lookup(key: &Value) -> Value {
    Value::pair(key.clone(), ())
}

fn value_half(element: ReferenceCounter<Value>) -> Option<Value> {
    ReferenceCounter::unwrap_or_clone(element)
        .into_pair()
        .ok()
        .map(|(_, value)| value)
}
