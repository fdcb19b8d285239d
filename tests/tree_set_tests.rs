//! Integration tests for TreeSet.

use std::collections::{BTreeSet, HashSet};

use ordtree::TreeSet;
use proptest::prelude::*;
use rstest::rstest;

// =============================================================================
// Membership Tests
// =============================================================================

#[rstest]
fn test_add_discard_contains() {
    let mut set = TreeSet::new();
    set.insert("bb".to_string());
    set.insert("aa".to_string());

    assert!(set.contains("aa"));
    assert!(!set.contains("cc"));
    assert!(!set.remove("cc"));
    assert!(set.remove("aa"));
    assert!(!set.contains("aa"));
    assert_eq!(set.len(), 1);
}

#[rstest]
fn test_repeated_add_keeps_len() {
    let mut set = TreeSet::new();
    for _ in 0..10 {
        set.insert(42);
    }
    assert_eq!(set.len(), 1);
}

#[rstest]
fn test_default_and_clear() {
    let mut set: TreeSet<i32> = (0..10).collect();
    set.clear();
    assert_eq!(set, TreeSet::default());
    assert!(set.is_empty());
}

// =============================================================================
// Algebra Tests
// =============================================================================

#[rstest]
#[case(&[1, 2, 3], &[3, 4], &[1, 2, 3, 4], &[3])]
#[case(&[], &[1], &[1], &[])]
#[case(&[5, 6], &[5, 6], &[5, 6], &[5, 6])]
fn test_union_and_intersection(
    #[case] left: &[i32],
    #[case] right: &[i32],
    #[case] union: &[i32],
    #[case] intersection: &[i32],
) {
    let left: TreeSet<i32> = left.iter().copied().collect();
    let right: TreeSet<i32> = right.iter().copied().collect();

    assert_eq!(left.union(&right).iter().copied().collect::<Vec<_>>(), union);
    assert_eq!(
        left.intersection(&right).iter().copied().collect::<Vec<_>>(),
        intersection
    );
}

#[rstest]
fn test_algebra_leaves_operands_untouched() {
    let left: TreeSet<i32> = (0..5).collect();
    let right: TreeSet<i32> = (3..8).collect();
    let _ = &left | &right;
    let _ = &left ^ &right;
    assert_eq!(left.len(), 5);
    assert_eq!(right.len(), 5);
}

// =============================================================================
// Equality, Hash and Display
// =============================================================================

#[rstest]
fn test_hash_agrees_with_equality() {
    let mut outer = HashSet::new();
    outer.insert((1..=3).collect::<TreeSet<i32>>());
    assert!(outer.contains(&[3, 2, 1].into_iter().collect::<TreeSet<i32>>()));
}

#[rstest]
fn test_display_lists_sorted_elements() {
    let set: TreeSet<i32> = [3, 1, 2].into_iter().collect();
    assert_eq!(format!("{set}"), "{1, 2, 3}");
}

// =============================================================================
// Laws
// =============================================================================

fn small_set() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..64, 0..40)
}

proptest! {
    /// Law: set algebra agrees with BTreeSet.
    #[test]
    fn prop_algebra_matches_btreeset(left in small_set(), right in small_set()) {
        let tree_left: TreeSet<u8> = left.iter().copied().collect();
        let tree_right: TreeSet<u8> = right.iter().copied().collect();
        let model_left: BTreeSet<u8> = left.into_iter().collect();
        let model_right: BTreeSet<u8> = right.into_iter().collect();

        let to_vec = |set: TreeSet<u8>| set.iter().copied().collect::<Vec<_>>();
        prop_assert_eq!(
            to_vec(tree_left.union(&tree_right)),
            model_left.union(&model_right).copied().collect::<Vec<_>>()
        );
        prop_assert_eq!(
            to_vec(tree_left.intersection(&tree_right)),
            model_left.intersection(&model_right).copied().collect::<Vec<_>>()
        );
        prop_assert_eq!(
            to_vec(tree_left.difference(&tree_right)),
            model_left.difference(&model_right).copied().collect::<Vec<_>>()
        );
        prop_assert_eq!(
            to_vec(tree_left.symmetric_difference(&tree_right)),
            model_left.symmetric_difference(&model_right).copied().collect::<Vec<_>>()
        );
        prop_assert_eq!(tree_left.is_subset(&tree_right), model_left.is_subset(&model_right));
        prop_assert_eq!(tree_left.is_disjoint(&tree_right), model_left.is_disjoint(&model_right));
    }

    /// Law: range queries agree with BTreeSet.
    #[test]
    fn prop_range_matches_btreeset(values in small_set(), low in 0u8..64, span in 0u8..32) {
        let high = low.saturating_add(span);
        let tree: TreeSet<u8> = values.iter().copied().collect();
        let model: BTreeSet<u8> = values.into_iter().collect();

        prop_assert_eq!(
            tree.range(low..high).copied().collect::<Vec<_>>(),
            model.range(low..high).copied().collect::<Vec<_>>()
        );
        prop_assert_eq!(
            tree.range(low..=high).copied().collect::<Vec<_>>(),
            model.range(low..=high).copied().collect::<Vec<_>>()
        );
    }

    /// Law: equality depends on content only.
    #[test]
    fn prop_equality_by_content(values in small_set()) {
        let forward: TreeSet<u8> = values.iter().copied().collect();
        let backward: TreeSet<u8> = values.iter().rev().copied().collect();
        prop_assert_eq!(forward, backward);
    }
}
