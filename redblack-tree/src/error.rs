//! Error types for tree operations.

use crate::node::{Node, NodeId};

/// Result type for self-test runs.
pub type Result<T> = core::result::Result<T, Violation>;

/// Insertion rejected because the key is already present.
///
/// The tree is left untouched and the rejected node is handed back.
#[derive(Debug, thiserror::Error)]
#[error("key already present in the tree")]
pub struct DuplicateKey<K, V> {
    node: Node<K, V>,
}

impl<K, V> DuplicateKey<K, V> {
    pub(crate) fn new(node: Node<K, V>) -> Self {
        Self { node }
    }

    /// The node that was not inserted
    pub fn node(&self) -> &Node<K, V> {
        &self.node
    }

    /// Take back ownership of the rejected node
    pub fn into_node(self) -> Node<K, V> {
        self.node
    }
}

/// A handle that no longer names a live node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("node handle {0} does not refer to a live node")]
pub struct StaleHandle(pub NodeId);

/// Structural invariant broken, as reported by `RbTree::self_test`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("tree root {root} is not black")]
    RootNotBlack { root: NodeId },

    #[error("red node {node} has red child {child}")]
    RedRed { node: NodeId, child: NodeId },

    #[error("node {node}: black-height left ({left}) differs from black-height right ({right})")]
    BlackHeight {
        node: NodeId,
        left: usize,
        right: usize,
    },

    #[error("node {node} key is out of search order")]
    Order { node: NodeId },

    #[error("node {node} does not point back to its parent {expected:?}")]
    BrokenParentLink {
        node: NodeId,
        expected: Option<NodeId>,
    },
}

impl Violation {
    /// Node at which the violation was detected
    pub fn node(&self) -> NodeId {
        match *self {
            Violation::RootNotBlack { root } => root,
            Violation::RedRed { node, .. }
            | Violation::BlackHeight { node, .. }
            | Violation::Order { node }
            | Violation::BrokenParentLink { node, .. } => node,
        }
    }
}

/// Signal a broken invariant inside a fixup or rotation.
///
/// These branches are unreachable in a correct tree, so reaching one is a
/// programming error: log it and abort the operation.
macro_rules! invariant_broken {
    ($($arg:tt)+) => {{
        tracing::error!($($arg)+);
        panic!("red-black invariant broken: {}", format_args!($($arg)+))
    }};
}

pub(crate) use invariant_broken;
