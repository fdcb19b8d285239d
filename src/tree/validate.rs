//! Invariant checking for [`RedBlackTree`].

use std::cmp::Ordering;

use super::node::NodeId;
use super::red_black_tree::RedBlackTree;
use crate::error::InvariantViolation;
use crate::order::KeyOrder;

impl<E, O: KeyOrder<E>> RedBlackTree<E, O> {
    /// Checks every red-black and structural invariant of the tree.
    ///
    /// On success returns the black depth: the number of black nodes on any
    /// path from the root down to an empty subtree, not counting the empty
    /// subtree itself. An empty tree has black depth 0.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let Some(root) = self.root() else {
            return if self.is_empty() {
                Ok(0)
            } else {
                Err(InvariantViolation::CountMismatch {
                    reachable: 0,
                    count: self.len(),
                })
            };
        };

        let node = self.node(root);
        if node.is_red() {
            return Err(InvariantViolation::RedRoot);
        }
        if node.parent.is_some() {
            return Err(InvariantViolation::ParentLink { depth: 0 });
        }

        let mut reachable = 0;
        let depth = self.check_subtree(root, 0, &mut reachable)?;
        if reachable != self.len() {
            return Err(InvariantViolation::CountMismatch {
                reachable,
                count: self.len(),
            });
        }

        self.check_order()?;
        Ok(depth)
    }

    /// Returns the black depth of the tree.
    ///
    /// # Panics
    ///
    /// Panics if the tree violates a red-black invariant, which indicates a
    /// bug in the engine.
    pub fn black_depth(&self) -> usize {
        match self.validate() {
            Ok(depth) => depth,
            Err(violation) => panic!("red-black invariant violated: {violation}"),
        }
    }

    /// Checks the tree after a mutation that last touched `anchor`.
    ///
    /// Unit tests of this crate run the full [`validate`](Self::validate).
    /// Other debug builds only check the path from `anchor` up to the root,
    /// which keeps each mutation O(log N). Release builds check nothing.
    #[inline]
    pub(crate) fn debug_check(&self, anchor: Option<NodeId>) {
        let outcome = if cfg!(test) {
            self.validate().map(drop)
        } else if cfg!(debug_assertions) {
            self.check_path(anchor)
        } else {
            Ok(())
        };
        if let Err(violation) = outcome {
            panic!("red-black invariant violated: {violation}");
        }
    }

    /// Checks parent links, red-red pairs and the root color along the path
    /// from `from` up to the root.
    pub(crate) fn check_path(&self, from: Option<NodeId>) -> Result<(), InvariantViolation> {
        if self.root().is_some_and(|root| self.node(root).is_red()) {
            return Err(InvariantViolation::RedRoot);
        }

        let mut path = Vec::new();
        let mut current = from;
        while let Some(id) = current {
            path.push(id);
            if path.len() > self.len() {
                return Err(InvariantViolation::CountMismatch {
                    reachable: path.len(),
                    count: self.len(),
                });
            }
            current = self.node(id).parent;
        }
        if path.last().is_some_and(|&top| self.root() != Some(top)) {
            return Err(InvariantViolation::ParentLink { depth: 0 });
        }

        for (index, link) in path.windows(2).enumerate() {
            let (child, parent) = (link[0], link[1]);
            // Depth of `child`, counted from the root.
            let depth = path.len() - 1 - index;
            let above = self.node(parent);
            if above.left != Some(child) && above.right != Some(child) {
                return Err(InvariantViolation::ParentLink { depth });
            }
            if above.is_red() && self.node(child).is_red() {
                return Err(InvariantViolation::RedRed { depth: depth - 1 });
            }
        }
        Ok(())
    }

    fn check_subtree(
        &self,
        id: NodeId,
        depth: usize,
        reachable: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        *reachable += 1;
        // More nodes than recorded means a cycle or a shared child.
        if *reachable > self.len() {
            return Err(InvariantViolation::CountMismatch {
                reachable: *reachable,
                count: self.len(),
            });
        }

        let node = self.node(id);
        let mut heights = [0; 2];
        for (slot, child) in [node.left, node.right].into_iter().enumerate() {
            let Some(child) = child else {
                continue;
            };
            let below = self.node(child);
            if below.parent != Some(id) {
                return Err(InvariantViolation::ParentLink { depth: depth + 1 });
            }
            if node.is_red() && below.is_red() {
                return Err(InvariantViolation::RedRed { depth });
            }
            heights[slot] = self.check_subtree(child, depth + 1, reachable)?;
        }

        let [left, right] = heights;
        if left != right {
            return Err(InvariantViolation::BlackDepthMismatch { depth, left, right });
        }
        Ok(left + usize::from(!node.is_red()))
    }

    fn check_order(&self) -> Result<(), InvariantViolation> {
        let mut previous: Option<&O::Key> = None;
        for (position, element) in self.iter().enumerate() {
            let Ok(key) = self.order().key(element) else {
                return Err(InvariantViolation::OutOfOrder { position });
            };
            if let Some(previous) = previous
                && !matches!(self.order().compare(previous, key), Ok(Ordering::Less))
            {
                return Err(InvariantViolation::OutOfOrder { position });
            }
            previous = Some(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::Color;
    use rstest::rstest;

    #[rstest]
    fn test_empty_tree_is_valid() {
        let tree: RedBlackTree<i32> = RedBlackTree::new();
        assert_eq!(tree.validate(), Ok(0));
    }

    #[rstest]
    fn test_single_node_has_black_depth_one() {
        let tree: RedBlackTree<i32> = std::iter::once(1).collect();
        assert_eq!(tree.validate(), Ok(1));
    }

    #[rstest]
    #[case(3, 1)]
    #[case(4, 2)]
    #[case(10, 3)]
    fn test_sequential_black_depth(#[case] size: i32, #[case] expected: usize) {
        let tree: RedBlackTree<i32> = (0..size).collect();
        assert_eq!(tree.validate(), Ok(expected));
    }

    #[rstest]
    fn test_path_check_accepts_every_node_of_a_valid_tree() {
        let tree: RedBlackTree<i32> = (0..64).collect();
        for index in 0..tree.len() {
            assert_eq!(tree.check_path(Some(NodeId(index))), Ok(()));
        }
        assert_eq!(tree.check_path(None), Ok(()));
    }

    #[rstest]
    fn test_path_check_reports_red_red_on_the_path() {
        let mut tree: RedBlackTree<i32> = (0..8).collect();
        let Some(root) = tree.root() else {
            panic!("tree should not be empty");
        };
        let leaf = tree.minimum_from(root);
        let Some(parent) = tree.node(leaf).parent else {
            panic!("leaf should have a parent");
        };
        tree.node_mut(leaf).color = Color::Red;
        tree.node_mut(parent).color = Color::Red;

        assert!(matches!(
            tree.check_path(Some(leaf)),
            Err(InvariantViolation::RedRed { .. })
        ));
        assert!(tree.validate().is_err());
    }

    #[rstest]
    fn test_path_check_reports_red_root() {
        let mut tree: RedBlackTree<i32> = (0..3).collect();
        let Some(root) = tree.root() else {
            panic!("tree should not be empty");
        };
        tree.node_mut(root).color = Color::Red;
        assert_eq!(tree.check_path(None), Err(InvariantViolation::RedRoot));
    }
}
