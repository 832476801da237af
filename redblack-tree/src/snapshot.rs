//! Read-only layout snapshot for renderers.
//!
//! A renderer needs two things to lay out a diagram: the nodes grouped by
//! depth and each node's column, i.e. its rank in key order. The tree
//! itself never formats anything.

use std::collections::{HashMap, VecDeque};

use crate::node::NodeId;
use crate::RbTree;

/// Nodes grouped per depth plus the in-order position of each node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    levels: Vec<Vec<NodeId>>,
    positions: HashMap<NodeId, usize>,
}

impl Snapshot {
    /// Nodes per depth, root level first, each level left to right
    pub fn levels(&self) -> &[Vec<NodeId>] {
        &self.levels
    }

    /// In-order index of `id`
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Number of levels
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    /// Number of in-order positions (the node count)
    pub fn width(&self) -> usize {
        self.positions.len()
    }
}

impl<K, V> RbTree<K, V> {
    /// Capture the current shape of the tree
    pub fn snapshot(&self) -> Snapshot {
        let mut levels: Vec<Vec<NodeId>> = Vec::new();
        let mut queue: VecDeque<(NodeId, usize)> = self.root.map(|r| (r, 0)).into_iter().collect();

        while let Some((id, depth)) = queue.pop_front() {
            if levels.len() == depth {
                levels.push(Vec::new());
            }
            levels[depth].push(id);

            let entry = &self.arena[id];
            for child in [entry.left, entry.right].into_iter().flatten() {
                queue.push_back((child, depth + 1));
            }
        }

        let mut positions = HashMap::with_capacity(self.len());
        let mut cursor = self.min();
        while let Some(id) = cursor {
            positions.insert(id, positions.len());
            cursor = self.successor(id);
        }

        Snapshot { levels, positions }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Node, RbTree};

    fn keys_at(tree: &RbTree<i32, ()>, level: &[crate::NodeId]) -> Vec<i32> {
        level.iter().map(|&id| *tree.node(id).unwrap().key()).collect()
    }

    #[test]
    fn test_snapshot_levels_and_positions() {
        let mut tree = RbTree::new();
        for key in [20, 10, 30, 5, 15, 25, 35] {
            tree.insert(Node::new(key, ())).unwrap();
        }

        let snapshot = tree.snapshot();
        assert_eq!(snapshot.height(), 3);
        assert_eq!(snapshot.width(), 7);
        assert_eq!(keys_at(&tree, &snapshot.levels()[0]), vec![20]);
        assert_eq!(keys_at(&tree, &snapshot.levels()[1]), vec![10, 30]);
        assert_eq!(keys_at(&tree, &snapshot.levels()[2]), vec![5, 15, 25, 35]);

        for (rank, key) in [5, 10, 15, 20, 25, 30, 35].into_iter().enumerate() {
            let id = tree.search(&key).unwrap();
            assert_eq!(snapshot.position(id), Some(rank));
        }
    }

    #[test]
    fn test_snapshot_empty() {
        let tree: RbTree<i32, ()> = RbTree::new();
        let snapshot = tree.snapshot();
        assert_eq!(snapshot.height(), 0);
        assert_eq!(snapshot.width(), 0);
    }

    #[test]
    fn test_snapshot_is_read_only() {
        let mut tree = RbTree::new();
        for key in 0..32 {
            tree.insert(Node::new(key, ())).unwrap();
        }
        let before = tree.snapshot();
        let _ = tree.insert(Node::new(7, ()));
        assert_eq!(tree.snapshot(), before);
    }
}
