//! Rotation primitives: the only operations that change tree topology.
//!
//! Rotations never touch colors; the fixups recolor around them.

use tracing::trace;

use crate::error::invariant_broken;
use crate::node::NodeId;
use crate::RbTree;

/// Side of a node, and the direction of a single rotation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Compound rotation used by the insertion angle case
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DoubleRotation {
    /// `child` is the pivot's left child: rotate it left, then the pivot right
    LeftRight,
    /// `child` is the pivot's right child: rotate it right, then the pivot left
    RightLeft,
}

impl<K, V> RbTree<K, V> {
    /// Rotate `pivot` in `direction`, promoting `child` into its place.
    ///
    /// A left rotation promotes the pivot's right child, a right rotation
    /// its left child. The promoted node's inner subtree moves across to
    /// the pivot, and the pivot becomes the promoted node's child on the
    /// rotation side.
    pub(crate) fn rotate(&mut self, direction: Direction, pivot: NodeId, child: NodeId) {
        // child hangs on the side opposite to the rotation
        let from = direction.opposite();
        if self.child(pivot, from) != Some(child) {
            invariant_broken!(
                "rotate {:?}: {} is not the {:?} child of pivot {}",
                direction,
                child,
                from,
                pivot
            );
        }
        trace!(?direction, %pivot, %child, "rotate");

        // Inner subtree of child crosses over to the pivot
        let inner = self.child(child, direction);
        self.set_child(pivot, from, inner);
        if let Some(inner) = inner {
            self.set_parent(inner, Some(pivot));
        }

        // Child takes the pivot's slot under the old parent (or the root)
        self.replace_in_parent(pivot, Some(child));

        // Pivot hangs under child on the rotation side
        self.set_child(child, direction, Some(pivot));
        self.set_parent(pivot, Some(child));
    }

    /// Two single rotations bringing the inner grandchild of `pivot` to the top.
    pub(crate) fn rotate_double(&mut self, kind: DoubleRotation, pivot: NodeId, child: NodeId) {
        let (first, second) = match kind {
            DoubleRotation::LeftRight => (Direction::Left, Direction::Right),
            DoubleRotation::RightLeft => (Direction::Right, Direction::Left),
        };
        trace!(?kind, %pivot, %child, "rotate double");

        // Grandchild on the far side of the first rotation
        let Some(next) = self.child(child, first.opposite()) else {
            invariant_broken!("rotate {:?}: {} has no inner child", kind, child)
        };

        self.rotate(first, child, next);
        self.rotate(second, pivot, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Entry;
    use crate::Color;

    // Builds     p
    //           / \
    //          a   c
    //             / \
    //            b   d
    // with every node black, no balancing applied.
    fn handmade() -> (RbTree<char, ()>, [NodeId; 5]) {
        let mut tree = RbTree::new();
        let ids: Vec<NodeId> = ['p', 'a', 'c', 'b', 'd']
            .into_iter()
            .map(|key| {
                let mut entry = Entry::red(key, ());
                entry.color = Color::Black;
                tree.arena.alloc(entry)
            })
            .collect();
        let [p, a, c, b, d] = [ids[0], ids[1], ids[2], ids[3], ids[4]];

        tree.set_root(Some(p));
        tree.set_child(p, Direction::Left, Some(a));
        tree.set_parent(a, Some(p));
        tree.set_child(p, Direction::Right, Some(c));
        tree.set_parent(c, Some(p));
        tree.set_child(c, Direction::Left, Some(b));
        tree.set_parent(b, Some(c));
        tree.set_child(c, Direction::Right, Some(d));
        tree.set_parent(d, Some(c));
        (tree, [p, a, c, b, d])
    }

    fn keys_in_order(tree: &RbTree<char, ()>) -> String {
        tree.keys().collect()
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_rotate_left_at_root() {
        let (mut tree, [p, a, c, b, d]) = handmade();
        let before = keys_in_order(&tree);

        tree.rotate(Direction::Left, p, c);

        assert_eq!(tree.root(), Some(c));
        assert_eq!(tree.parent_of(c), None);
        assert_eq!(tree.child(c, Direction::Left), Some(p));
        assert_eq!(tree.child(c, Direction::Right), Some(d));
        assert_eq!(tree.parent_of(p), Some(c));
        assert_eq!(tree.child(p, Direction::Left), Some(a));
        assert_eq!(tree.child(p, Direction::Right), Some(b));
        assert_eq!(tree.parent_of(b), Some(p));
        assert_eq!(keys_in_order(&tree), before);
    }

    #[test]
    fn test_rotate_right_restores() {
        let (mut tree, [p, _, c, _, _]) = handmade();
        let before = keys_in_order(&tree);

        tree.rotate(Direction::Left, p, c);
        tree.rotate(Direction::Right, c, p);

        assert_eq!(tree.root(), Some(p));
        assert_eq!(tree.child(p, Direction::Right), Some(c));
        assert_eq!(keys_in_order(&tree), before);
    }

    #[test]
    fn test_rotate_keeps_colors() {
        let (mut tree, [p, _, c, _, _]) = handmade();
        tree.set_color(c, Color::Red);
        tree.rotate(Direction::Left, p, c);
        assert_eq!(tree.color_of(Some(c)), Color::Red);
        assert_eq!(tree.color_of(Some(p)), Color::Black);
    }

    #[test]
    fn test_rotate_double_right_left() {
        let (mut tree, [p, _, c, b, _]) = handmade();
        let before = keys_in_order(&tree);

        tree.rotate_double(DoubleRotation::RightLeft, p, c);

        assert_eq!(tree.root(), Some(b));
        assert_eq!(tree.child(b, Direction::Left), Some(p));
        assert_eq!(tree.child(b, Direction::Right), Some(c));
        assert_eq!(keys_in_order(&tree), before);
    }

    #[test]
    #[should_panic(expected = "red-black invariant broken")]
    fn test_rotate_wrong_child_panics() {
        let (mut tree, [p, a, _, _, _]) = handmade();
        // a is the left child, a left rotation needs the right one
        tree.rotate(Direction::Left, p, a);
    }
}
