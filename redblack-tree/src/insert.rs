//! Insertion: plain BST attach followed by the red-violation fixup.

use tracing::{debug, trace};

use crate::arena::Entry;
use crate::error::{invariant_broken, DuplicateKey};
use crate::node::{Color, Node, NodeId};
use crate::rotate::{Direction, DoubleRotation};
use crate::RbTree;

impl<K: Ord, V> RbTree<K, V> {
    /// Insert a detached node, keeping the red-black properties.
    ///
    /// Returns the handle of the linked node. A key that is already
    /// present is rejected and the node handed back untouched.
    pub fn insert(&mut self, node: Node<K, V>) -> Result<NodeId, DuplicateKey<K, V>> {
        let (id, needs_fixup) = self.bst_insert(node)?;

        if needs_fixup {
            self.fixup_insert(id);
        }

        self.audit("insert");
        Ok(id)
    }

    /// Attach `node` as a red leaf. The flag reports a red parent.
    fn bst_insert(&mut self, node: Node<K, V>) -> Result<(NodeId, bool), DuplicateKey<K, V>> {
        let (found, parent) = self.search_with_parent(&node.key);
        if let Some(existing) = found {
            debug!(%existing, "duplicate key rejected");
            return Err(DuplicateKey::new(node));
        }

        let Some(parent) = parent else {
            // Empty tree: the node becomes a black root, nothing to fix
            let id = self.arena.alloc(Entry::red(node.key, node.value));
            self.set_color(id, Color::Black);
            self.set_root(Some(id));
            return Ok((id, false));
        };

        let side = if node.key < self.arena[parent].key {
            Direction::Left
        } else {
            Direction::Right
        };

        let id = self.arena.alloc(Entry::red(node.key, node.value));
        self.set_parent(id, Some(parent));
        self.set_child(parent, side, Some(id));

        Ok((id, self.color_of(Some(parent)).is_red()))
    }

    /// Resolve a red node attached under a red parent.
    fn fixup_insert(&mut self, mut node: NodeId) {
        loop {
            let (father, uncle, grand) = self.relatives(node);

            if self.color_of(uncle).is_red() {
                // Red uncle: push blackness down from the grandfather
                trace!(%node, %father, %grand, "insert fixup: red uncle");
                self.set_color(father, Color::Black);
                if let Some(uncle) = uncle {
                    self.set_color(uncle, Color::Black);
                }

                if Some(grand) == self.root {
                    return;
                }

                self.set_color(grand, Color::Red);
                if !self.color_of(self.parent_of(grand)).is_red() {
                    return;
                }

                // Grandfather now violates against its own parent
                node = grand;
                continue;
            }

            let father_side = self.side_of(father);
            if self.side_of(node) == father_side {
                // Black uncle, straight line: single rotation at grandfather
                trace!(%node, %father, %grand, "insert fixup: black uncle, straight");
                self.set_color(father, Color::Black);
                self.set_color(grand, Color::Red);
                match father_side {
                    Some(Direction::Left) => self.rotate(Direction::Right, grand, father),
                    Some(Direction::Right) => self.rotate(Direction::Left, grand, father),
                    None => invariant_broken!("father {} of {} has no parent", father, node),
                }
            } else {
                // Black uncle, angle: bring node up over father and grandfather
                trace!(%node, %father, %grand, "insert fixup: black uncle, angle");
                self.set_color(grand, Color::Red);
                self.set_color(node, Color::Black);
                match father_side {
                    Some(Direction::Left) => {
                        self.rotate_double(DoubleRotation::LeftRight, grand, father)
                    }
                    Some(Direction::Right) => {
                        self.rotate_double(DoubleRotation::RightLeft, grand, father)
                    }
                    None => invariant_broken!("father {} of {} has no parent", father, node),
                }
            }
            return;
        }
    }

    /// Father, uncle and grandfather of a red-violating node
    fn relatives(&self, node: NodeId) -> (NodeId, Option<NodeId>, NodeId) {
        let Some(father) = self.parent_of(node) else {
            invariant_broken!("red violation at {} without a father", node)
        };
        let Some(grand) = self.parent_of(father) else {
            invariant_broken!("red father {} of {} is the root", father, node)
        };

        let uncle = match self.side_of(father) {
            Some(side) => self.child(grand, side.opposite()),
            None => invariant_broken!("father {} is detached from {}", father, grand),
        };

        (father, uncle, grand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeConfig;

    fn checked() -> RbTree<i32, ()> {
        RbTree::with_config(TreeConfig::checked())
    }

    fn color(tree: &RbTree<i32, ()>, key: i32) -> Color {
        tree.node(tree.search(&key).unwrap()).unwrap().color()
    }

    #[test]
    fn test_insert_root_black() {
        let mut tree = checked();
        let id = tree.insert(Node::new(1, ())).unwrap();
        assert_eq!(tree.root(), Some(id));
        assert_eq!(color(&tree, 1), Color::Black);
    }

    #[test]
    fn test_insert_red_uncle_recolors() {
        let mut tree = checked();
        for key in [20, 10, 30, 5] {
            tree.insert(Node::new(key, ())).unwrap();
        }
        assert_eq!(color(&tree, 20), Color::Black);
        assert_eq!(color(&tree, 10), Color::Black);
        assert_eq!(color(&tree, 30), Color::Black);
        assert_eq!(color(&tree, 5), Color::Red);
        assert_eq!(tree.self_test(), Ok(2));
    }

    #[test]
    fn test_insert_straight_line_rotates() {
        let mut tree = checked();
        for key in [1, 2, 3] {
            tree.insert(Node::new(key, ())).unwrap();
        }
        let root = tree.root().unwrap();
        assert_eq!(*tree.node(root).unwrap().key(), 2);
        assert_eq!(color(&tree, 1), Color::Red);
        assert_eq!(color(&tree, 3), Color::Red);
    }

    #[test]
    fn test_insert_angle_double_rotates() {
        let mut tree = checked();
        for key in [30, 10, 20] {
            tree.insert(Node::new(key, ())).unwrap();
        }
        let root = tree.root().unwrap();
        assert_eq!(*tree.node(root).unwrap().key(), 20);
        assert_eq!(color(&tree, 20), Color::Black);
        assert_eq!(color(&tree, 10), Color::Red);
        assert_eq!(color(&tree, 30), Color::Red);
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut tree = RbTree::new();
        let first = tree.insert(Node::new(7, "first")).unwrap();
        let err = tree.insert(Node::new(7, "second")).unwrap_err();
        assert_eq!(err.into_node(), Node::new(7, "second"));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.search(&7), Some(first));
        assert_eq!(tree.get(&7), Some(&"first"));
    }

    #[test]
    fn test_insert_returns_linked_handle() {
        let mut tree = checked();
        for key in 0..100 {
            let id = tree.insert(Node::new(key, ())).unwrap();
            assert_eq!(tree.search(&key), Some(id));
        }
        assert_eq!(tree.len(), 100);
    }

    #[test]
    fn test_insert_static_black_height() {
        let keys = [
            26, 13, 53, 93, 97, 57, 60, 65, 39, 44, 28, 17, 22, 2, 93, 25, 2, 24, 5, 25, 20, 73, 4,
            89, 27, 60, 48, 20, 62, 22, 92, 14, 52, 90, 36, 6, 50, 44, 68, 2, 89, 87, 64, 19, 92,
            82, 76, 49, 59, 64, 62, 19, 3, 71, 85, 69, 56, 59, 74, 44, 57, 56, 96, 94,
        ];
        let mut tree = checked();
        for key in keys {
            let _ = tree.insert(Node::new(key, ()));
        }
        assert_eq!(tree.self_test(), Ok(4));
    }
}
