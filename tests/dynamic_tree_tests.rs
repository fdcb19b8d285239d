//! Integration tests for DynamicTree: runtime-typed keys whose comparison
//! can fail.

use ordtree::{ComparisonError, DynamicTree, Operation, ReferenceCounter, TreeError, Value};
use rstest::{fixture, rstest};

#[fixture]
fn words() -> DynamicTree {
    let mut tree = DynamicTree::with_mode(false);
    for word in ["bb", "aa", "dd", "cc"] {
        tree.insert(Value::from(word)).unwrap();
    }
    tree
}

fn snapshot(tree: &DynamicTree) -> Vec<String> {
    tree.iter().map(ToString::to_string).collect()
}

// =============================================================================
// Type-error Isolation
// =============================================================================

#[rstest]
#[case(Value::from(1))]
#[case(Value::None)]
#[case(Value::pair("aa", 1))]
#[case(Value::from(f64::NAN))]
fn test_incomparable_operations_leave_tree_unchanged(mut words: DynamicTree, #[case] probe: Value) {
    let before = snapshot(&words);

    let insert = words.insert(probe.clone()).unwrap_err();
    assert!(matches!(
        insert,
        TreeError::OrderingIncompatible {
            operation: Operation::Insert,
            ..
        }
    ));
    assert!(words.find(&probe).unwrap_err().is_ordering_incompatible());
    assert!(words.remove(&probe).unwrap_err().is_ordering_incompatible());

    assert_eq!(words.count(), 4);
    assert_eq!(snapshot(&words), before);
}

#[rstest]
fn test_ordering_error_carries_comparison(words: DynamicTree) {
    let error = words.find(&Value::from(1)).unwrap_err();
    assert!(matches!(
        error.comparison(),
        Some(ComparisonError::Unorderable { left: "int", right: "str" })
    ));
    assert_eq!(
        std::error::Error::source(&error).map(ToString::to_string),
        Some("'<' not supported between instances of 'int' and 'str'".to_string())
    );
}

#[rstest]
fn test_numeric_kinds_share_one_order() {
    let mut tree = DynamicTree::with_mode(false);
    tree.insert(Value::from(2)).unwrap();
    tree.insert(Value::from(0.5)).unwrap();
    tree.insert(Value::from(true)).unwrap();

    assert_eq!(snapshot(&tree), vec!["0.5", "True", "2"]);
    // 1 equals True, so this is an upsert.
    let previous = tree.insert(Value::from(1)).unwrap();
    assert_eq!(previous.as_deref(), Some(&Value::from(true)));
    assert_eq!(tree.count(), 3);
}

#[rstest]
fn test_large_integer_is_not_rounded_against_float() {
    let mut tree = DynamicTree::with_mode(false);
    tree.insert(Value::from(9_007_199_254_740_993_i64)).unwrap();

    assert_eq!(tree.insert(Value::from(9_007_199_254_740_992.0)).unwrap(), None);
    assert_eq!(tree.count(), 2);
    assert_eq!(
        snapshot(&tree),
        vec!["9007199254740992.0", "9007199254740993"]
    );
}

// =============================================================================
// Map Mode
// =============================================================================

#[rstest]
fn test_map_mode_compares_keys_only() {
    let mut tree = DynamicTree::with_mode(true);
    tree.insert(Value::pair("aa", 1)).unwrap();
    let previous = tree.insert(Value::pair("aa", "different kind")).unwrap();

    assert_eq!(previous.as_deref(), Some(&Value::pair("aa", 1)));
    assert_eq!(
        tree.find(&Value::from("aa")).unwrap(),
        Some(&Value::pair("aa", "different kind"))
    );
    assert_eq!(tree.count(), 1);
}

#[fixture]
fn letter_pairs() -> DynamicTree {
    let mut tree = DynamicTree::with_mode(true);
    for (index, key) in ["aa", "bb", "cc", "dd", "ee", "ff", "gg", "hh"].into_iter().enumerate() {
        let index = i64::try_from(index).unwrap();
        tree.insert(Value::pair(key, 8 - index)).unwrap();
    }
    tree
}

#[rstest]
fn test_map_mode_find_with_placeholder_value(letter_pairs: DynamicTree) {
    for (index, key) in ["aa", "bb", "cc", "dd", "ee", "ff", "gg", "hh"].into_iter().enumerate() {
        let index = i64::try_from(index).unwrap();
        assert_eq!(
            letter_pairs.find(&Value::pair(key, 0)).unwrap(),
            Some(&Value::pair(key, 8 - index))
        );
    }
    assert_eq!(letter_pairs.find(&Value::pair("A", 1)).unwrap(), None);
}

#[rstest]
fn test_map_mode_remove_with_placeholder_value(mut letter_pairs: DynamicTree) {
    for key in ["dd", "aa", "hh", "cc", "ff", "bb", "gg", "ee"] {
        let removed = letter_pairs.remove(&Value::pair(key, ())).unwrap();
        assert_eq!(
            removed.as_deref().and_then(Value::as_pair).map(|(stored, _)| stored),
            Some(&Value::from(key))
        );
        assert_eq!(letter_pairs.find(&Value::pair(key, ())).unwrap(), None);
    }
    assert!(letter_pairs.is_empty());
    assert_eq!(letter_pairs.remove(&Value::pair("aa", ())).unwrap(), None);
}

#[rstest]
fn test_map_mode_rejects_non_pairs() {
    let mut tree = DynamicTree::with_mode(true);
    let error = tree.insert(Value::from("aa")).unwrap_err();
    assert_eq!(
        error.comparison(),
        Some(&ComparisonError::NotAPair { kind: "str" })
    );
    assert!(tree.is_empty());
}

#[rstest]
fn test_subscript_round_trip() {
    let mut tree = DynamicTree::with_mode(true);
    tree.set_item("bb", 2).unwrap();
    tree.set_item("aa", 1).unwrap();

    assert_eq!(tree.get_item(&Value::from("bb")).unwrap(), &Value::from(2));
    assert_eq!(tree.del_item(&Value::from("bb")).unwrap(), Value::from(2));
    assert!(tree.get_item(&Value::from("bb")).unwrap_err().is_key_absent());
    assert_eq!(snapshot(&tree), vec!["('aa', 1)"]);
}

// =============================================================================
// Element Ownership
// =============================================================================

#[rstest]
fn test_element_retained_while_reachable() {
    let element = ReferenceCounter::new(Value::from("aa"));
    let mut tree = DynamicTree::with_mode(false);
    tree.insert_shared(ReferenceCounter::clone(&element)).unwrap();
    let copy = tree.clone();
    assert_eq!(ReferenceCounter::strong_count(&element), 3);

    drop(tree.remove(&Value::from("aa")).unwrap());
    assert_eq!(ReferenceCounter::strong_count(&element), 2);

    drop(copy);
    assert_eq!(ReferenceCounter::strong_count(&element), 1);
}

#[rstest]
fn test_failed_insert_does_not_retain_element() {
    let mut tree = DynamicTree::with_mode(false);
    tree.insert(Value::from("aa")).unwrap();

    let rejected = ReferenceCounter::new(Value::from(1));
    assert!(tree.insert_shared(ReferenceCounter::clone(&rejected)).is_err());
    assert_eq!(ReferenceCounter::strong_count(&rejected), 1);
}
