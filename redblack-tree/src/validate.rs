//! Invariant validator.

use core::cmp::Ordering;

use crate::error::{Result, Violation};
use crate::node::{Color, NodeId};
use crate::RbTree;

impl<K: Ord, V> RbTree<K, V> {
    /// Check every red-black invariant and return the tree's black-height.
    ///
    /// An empty tree has black-height 0. The first violation found is
    /// reported along with the node it was detected at. Never mutates.
    pub fn self_test(&self) -> Result<usize> {
        let Some(root) = self.root else {
            return Ok(0);
        };

        if self.color_of(Some(root)) != Color::Black {
            return Err(Violation::RootNotBlack { root });
        }
        if self.parent_of(root).is_some() {
            return Err(Violation::BrokenParentLink {
                node: root,
                expected: None,
            });
        }

        self.check(root, None, None)
    }

    /// Black-height of the subtree at `id`, whose keys must lie strictly
    /// between `lower` and `upper`
    fn check(&self, id: NodeId, lower: Option<&K>, upper: Option<&K>) -> Result<usize> {
        let entry = &self.arena[id];

        let above_lower = lower.map_or(true, |low| entry.key.cmp(low) == Ordering::Greater);
        let below_upper = upper.map_or(true, |high| entry.key.cmp(high) == Ordering::Less);
        if !above_lower || !below_upper {
            return Err(Violation::Order { node: id });
        }

        let left = self.check_child(id, entry.left, lower, Some(&entry.key))?;
        let right = self.check_child(id, entry.right, Some(&entry.key), upper)?;

        if left != right {
            return Err(Violation::BlackHeight {
                node: id,
                left,
                right,
            });
        }

        match entry.color {
            Color::Black => Ok(left + 1),
            Color::Red => {
                for child in [entry.left, entry.right].into_iter().flatten() {
                    if self.color_of(Some(child)).is_red() {
                        return Err(Violation::RedRed { node: id, child });
                    }
                }
                Ok(left)
            }
        }
    }

    fn check_child(
        &self,
        parent: NodeId,
        child: Option<NodeId>,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<usize> {
        // Absent child: black leaf, height 0
        let Some(child) = child else {
            return Ok(0);
        };

        if !self.arena.contains(child) || self.parent_of(child) != Some(parent) {
            return Err(Violation::BrokenParentLink {
                node: child,
                expected: Some(parent),
            });
        }

        self.check(child, lower, upper)
    }
}
