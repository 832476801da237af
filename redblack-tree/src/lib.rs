//! Arena-backed red-black tree
//!
//! An ordered key-value tree that keeps logarithmic height under arbitrary
//! insert/delete sequences. Nodes live in an arena owned by the tree and
//! are addressed by [`NodeId`] handles; `left`/`right` links express
//! ownership of subtrees, `parent` links are navigation only.
//!
//! The tree is single-threaded by construction: every mutation takes
//! `&mut self`. Share it between threads behind a caller-held lock.
//!
//! ```
//! use redblack_tree::{Node, RbTree};
//!
//! let mut tree = RbTree::new();
//! for key in [20, 10, 30, 5, 15, 25, 35] {
//!     tree.insert(Node::new(key, ())).unwrap();
//! }
//! assert_eq!(tree.self_test(), Ok(2));
//!
//! let ten = tree.search(&10).unwrap();
//! let removed = tree.delete(ten).unwrap();
//! assert_eq!(removed.key, 10);
//! assert!(tree.search(&10).is_none());
//! ```

mod arena;
pub mod config;
mod delete;
pub mod error;
mod insert;
mod iter;
mod node;
mod rotate;
mod search;
mod snapshot;
mod validate;

pub use config::TreeConfig;
pub use delete::Removed;
pub use error::{DuplicateKey, StaleHandle, Violation};
pub use iter::{Iter, Keys, Values};
pub use node::{Color, Node, NodeId, NodeRef};
pub use rotate::{Direction, DoubleRotation};
pub use snapshot::Snapshot;

use core::fmt;

use arena::Arena;
use error::invariant_broken;

/// Red-Black tree
///
/// Holds the root handle and the arena that owns every reachable node.
pub struct RbTree<K, V> {
    root: Option<NodeId>,
    arena: Arena<K, V>,
    config: TreeConfig,
}

static_assertions::assert_eq_size!(NodeId, u64);
static_assertions::assert_impl_all!(RbTree<u64, String>: Send, Sync);
static_assertions::assert_not_impl_any!(RbTree<u64, std::rc::Rc<()>>: Send, Sync);

impl<K, V> RbTree<K, V> {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create a new empty tree with explicit options
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            root: None,
            arena: Arena::with_capacity(config.initial_capacity),
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Root node handle, or `None` for an empty tree
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Borrow a linked node, or `None` if the handle is stale
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, K, V>> {
        self.arena.get(id).map(|entry| NodeRef::new(id, entry))
    }

    /// Check if the handle still names a node in this tree
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    /// Mutable access to a node's payload; keys stay immutable
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut V> {
        self.arena.get_mut(id).map(|entry| &mut entry.value)
    }

    // ------------------------------------------------------------------
    // Link helpers shared by rotation, insertion and deletion
    // ------------------------------------------------------------------

    /// Color of a possibly absent node; absent children are black leaves
    pub(crate) fn color_of(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| self.arena[id].color)
    }

    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        self.arena[id].color = color;
    }

    pub(crate) fn flip_color(&mut self, id: NodeId) {
        let entry = &mut self.arena[id];
        entry.color = entry.color.flip();
    }

    pub(crate) fn swap_colors(&mut self, a: NodeId, b: NodeId) {
        let (ea, eb) = self.arena.pair_mut(a, b);
        core::mem::swap(&mut ea.color, &mut eb.color);
    }

    pub(crate) fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent
    }

    pub(crate) fn child(&self, id: NodeId, side: Direction) -> Option<NodeId> {
        let entry = &self.arena[id];
        match side {
            Direction::Left => entry.left,
            Direction::Right => entry.right,
        }
    }

    pub(crate) fn set_child(&mut self, id: NodeId, side: Direction, child: Option<NodeId>) {
        let entry = &mut self.arena[id];
        match side {
            Direction::Left => entry.left = child,
            Direction::Right => entry.right = child,
        }
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.arena[id].parent = parent;
    }

    /// Side of its parent on which `id` hangs; `None` for the root
    pub(crate) fn side_of(&self, id: NodeId) -> Option<Direction> {
        let parent = self.parent_of(id)?;
        if self.arena[parent].left == Some(id) {
            Some(Direction::Left)
        } else if self.arena[parent].right == Some(id) {
            Some(Direction::Right)
        } else {
            invariant_broken!("node {} is not a child of its parent {}", id, parent)
        }
    }

    /// Point the slot that held `old` (parent link or root) at `new`
    pub(crate) fn replace_in_parent(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.parent_of(old);
        match (parent, self.side_of(old)) {
            (Some(parent), Some(side)) => self.set_child(parent, side, new),
            _ => self.root = new,
        }
        if let Some(new) = new {
            self.set_parent(new, parent);
        }
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }
}

impl<K: Ord, V> RbTree<K, V> {
    /// Re-validate after a mutation when the tree is configured to do so
    pub(crate) fn audit(&self, operation: &'static str) {
        if !self.config.self_check {
            return;
        }
        if let Err(violation) = self.self_test() {
            invariant_broken!("self-check after {} failed: {}", operation, violation);
        }
    }
}

impl<K, V> Default for RbTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RbTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rb_tree_empty() {
        let tree: RbTree<i32, ()> = RbTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.root().is_none());
        assert!(tree.min().is_none());
        assert!(tree.max().is_none());
        assert_eq!(tree.self_test(), Ok(0));
    }

    #[test]
    fn test_with_config() {
        let tree: RbTree<i32, ()> = RbTree::with_config(TreeConfig::checked().with_capacity(8));
        assert!(tree.config().self_check);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_node_view() {
        let mut tree = RbTree::new();
        let id = tree.insert(Node::new(5, "five")).unwrap();
        let node = tree.node(id).unwrap();
        assert_eq!(node.id(), id);
        assert_eq!(*node.key(), 5);
        assert_eq!(*node.value(), "five");
        assert_eq!(node.color(), Color::Black);
        assert!(node.parent().is_none());
        assert!(node.is_leaf());
    }

    #[test]
    fn test_value_mut() {
        let mut tree = RbTree::new();
        let id = tree.insert(Node::new(1, 10)).unwrap();
        *tree.value_mut(id).unwrap() += 5;
        assert_eq!(tree.get(&1), Some(&15));
    }

    #[test]
    fn test_debug_as_map() {
        let mut tree = RbTree::new();
        for key in [2, 1, 3] {
            tree.insert(Node::new(key, key * 10)).unwrap();
        }
        assert_eq!(format!("{tree:?}"), "{1: 10, 2: 20, 3: 30}");
    }
}
