//! Node model: colors, handles, detached nodes and read-only node views.

use core::fmt;

use crate::arena::Entry;

/// Red-Black tree node color
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// The other color
    pub fn flip(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Check if color is red
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    /// Check if color is black
    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

/// Stable handle to a node stored in a tree's arena.
///
/// A handle pairs the slot index with the slot's generation, so a handle
/// to a deleted node never resolves to a node inserted later into the
/// same slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    /// Slot index inside the arena
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of the slot at the time the node was allocated
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// A detached node: key and payload not yet linked into any tree.
///
/// Insertion always paints the node red, so a detached node carries no
/// color of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Node<K, V> {
    /// Create a new detached node
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Split the node back into key and payload
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Node<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Borrowed view of a node linked into a tree.
#[derive(Debug)]
pub struct NodeRef<'a, K, V> {
    id: NodeId,
    entry: &'a Entry<K, V>,
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) fn new(id: NodeId, entry: &'a Entry<K, V>) -> Self {
        Self { id, entry }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &'a K {
        &self.entry.key
    }

    pub fn value(&self) -> &'a V {
        &self.entry.value
    }

    pub fn color(&self) -> Color {
        self.entry.color
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.entry.parent
    }

    pub fn left(&self) -> Option<NodeId> {
        self.entry.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.entry.right
    }

    /// True if the node has neither child
    pub fn is_leaf(&self) -> bool {
        self.entry.left.is_none() && self.entry.right.is_none()
    }
}
