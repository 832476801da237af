//! Search primitives shared by insertion, deletion and traversal.

use core::borrow::Borrow;
use core::cmp::Ordering;

use crate::node::NodeId;
use crate::rotate::Direction;
use crate::RbTree;

impl<K, V> RbTree<K, V> {
    /// Node with the minimum key
    pub fn min(&self) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, Direction::Left))
    }

    /// Node with the maximum key
    pub fn max(&self) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, Direction::Right))
    }

    /// Node following `id` in ascending key order.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.step(id, Direction::Right)
    }

    /// Node preceding `id` in ascending key order.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.step(id, Direction::Left)
    }

    /// Follow `side` links from `id` to exhaustion
    pub(crate) fn extreme(&self, mut id: NodeId, side: Direction) -> NodeId {
        while let Some(next) = self.child(id, side) {
            id = next;
        }
        id
    }

    /// In-order neighbour of `id` on `side` (Right = successor)
    fn step(&self, id: NodeId, side: Direction) -> Option<NodeId> {
        // Subtree on that side: its nearest extreme
        if let Some(sub) = self.child(id, side) {
            return Some(self.extreme(sub, side.opposite()));
        }

        // Climb while we are on `side` of the parent
        let mut node = id;
        let mut parent = self.parent_of(node);
        while let Some(p) = parent {
            if self.child(p, side) != Some(node) {
                break;
            }
            node = p;
            parent = self.parent_of(p);
        }
        parent
    }
}

impl<K: Ord, V> RbTree<K, V> {
    /// Node holding `key`, if any
    pub fn search<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search_with_parent(key).0
    }

    /// Node holding `key` together with the last node visited before it.
    ///
    /// On a miss the second handle is the node the key would be attached
    /// under; on a hit it is the found node's parent.
    pub fn search_with_parent<Q>(&self, key: &Q) -> (Option<NodeId>, Option<NodeId>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut parent = None;
        let mut current = self.root;

        while let Some(id) = current {
            let entry = &self.arena[id];
            match key.cmp(entry.key.borrow()) {
                Ordering::Equal => break,
                Ordering::Less => {
                    parent = current;
                    current = entry.left;
                }
                Ordering::Greater => {
                    parent = current;
                    current = entry.right;
                }
            }
        }

        (current, parent)
    }

    /// Payload stored under `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).map(|id| &self.arena[id].value)
    }

    /// Mutable payload stored under `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.search(key)?;
        Some(&mut self.arena[id].value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Node, RbTree};

    fn tree_of(keys: &[i32]) -> RbTree<i32, String> {
        let mut tree = RbTree::new();
        for &key in keys {
            let _ = tree.insert(Node::new(key, format!("v{key}")));
        }
        tree
    }

    fn key(tree: &RbTree<i32, String>, id: crate::NodeId) -> i32 {
        *tree.node(id).unwrap().key()
    }

    #[test]
    fn test_search() {
        let tree = tree_of(&[20, 10, 30, 5, 15, 25, 35]);
        for k in [20, 10, 30, 5, 15, 25, 35] {
            let id = tree.search(&k).unwrap();
            assert_eq!(key(&tree, id), k);
        }
        assert!(tree.search(&7).is_none());
        assert_eq!(tree.get(&15).map(String::as_str), Some("v15"));
        assert!(tree.contains_key(&35));
        assert!(!tree.contains_key(&36));
    }

    #[test]
    fn test_search_with_parent_on_miss() {
        let tree = tree_of(&[20, 10, 30]);
        let (found, parent) = tree.search_with_parent(&12);
        assert!(found.is_none());
        assert_eq!(key(&tree, parent.unwrap()), 10);

        let (found, parent) = tree.search_with_parent(&31);
        assert!(found.is_none());
        assert_eq!(key(&tree, parent.unwrap()), 30);
    }

    #[test]
    fn test_search_with_parent_on_hit() {
        let tree = tree_of(&[20, 10, 30]);
        let (found, parent) = tree.search_with_parent(&10);
        assert_eq!(key(&tree, found.unwrap()), 10);
        assert_eq!(key(&tree, parent.unwrap()), 20);

        let (found, parent) = tree.search_with_parent(&20);
        assert_eq!(found, tree.root());
        assert!(parent.is_none());
    }

    #[test]
    fn test_search_with_parent_empty() {
        let tree: RbTree<i32, String> = RbTree::new();
        assert_eq!(tree.search_with_parent(&1), (None, None));
    }

    #[test]
    fn test_min_max() {
        let tree = tree_of(&[26, 13, 53, 93, 97, 57, 2, 60]);
        assert_eq!(key(&tree, tree.min().unwrap()), 2);
        assert_eq!(key(&tree, tree.max().unwrap()), 97);
    }

    #[test]
    fn test_successor_walk() {
        let keys = [26, 13, 53, 93, 97, 57, 60, 65, 39, 44, 28, 17, 22, 2];
        let tree = tree_of(&keys);
        let mut sorted = keys.to_vec();
        sorted.sort_unstable();

        let mut walked = Vec::new();
        let mut cursor = tree.min();
        while let Some(id) = cursor {
            walked.push(key(&tree, id));
            cursor = tree.successor(id);
        }
        assert_eq!(walked, sorted);
    }

    #[test]
    fn test_predecessor_walk() {
        let keys = [26, 13, 53, 93, 97, 57, 60, 65, 39, 44, 28, 17, 22, 2];
        let tree = tree_of(&keys);
        let mut sorted = keys.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let mut walked = Vec::new();
        let mut cursor = tree.max();
        while let Some(id) = cursor {
            walked.push(key(&tree, id));
            cursor = tree.predecessor(id);
        }
        assert_eq!(walked, sorted);
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut tree = RbTree::new();
        tree.insert(Node::new(String::from("beta"), 2)).unwrap();
        tree.insert(Node::new(String::from("alpha"), 1)).unwrap();
        assert_eq!(tree.get("alpha"), Some(&1));
        *tree.get_mut("beta").unwrap() = 20;
        assert_eq!(tree.get("beta"), Some(&20));
    }
}
