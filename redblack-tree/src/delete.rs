//! Deletion: plain BST unlink followed by the double-black fixup.
//!
//! The unlink step always removes a node with at most one child. For a
//! node with two children the in-order successor is unlinked instead and
//! the two nodes exchange key and payload, so the caller's handle keeps
//! naming a live node holding the successor's entry.

use tracing::{debug, trace};

use crate::error::{invariant_broken, StaleHandle};
use crate::node::{Color, NodeId};
use crate::rotate::Direction;
use crate::RbTree;

/// A node detached from the tree by [`RbTree::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed<K, V> {
    /// Handle of the node physically unlinked; stale from now on.
    ///
    /// Differs from the handle passed to `delete` when that node had two
    /// children: the successor is unlinked in its place.
    pub id: NodeId,
    /// The deleted key
    pub key: K,
    /// The deleted payload
    pub value: V,
    /// Color the unlinked node had
    pub color: Color,
}

/// Slot vacated by an unlink
#[derive(Debug, Copy, Clone)]
struct Vacated {
    removed: NodeId,
    parent: Option<NodeId>,
    side: Option<Direction>,
    child: Option<NodeId>,
}

/// Position the double-black deficiency currently sits at.
///
/// When the removed node had no children the fixup still needs a black
/// leaf with a parent and a side; `Virtual` stands in for it without ever
/// being linked into the tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Cursor {
    Node(NodeId),
    Virtual { parent: NodeId, side: Direction },
}

impl<K: Ord, V> RbTree<K, V> {
    /// Delete the node `id`, keeping the red-black properties.
    ///
    /// The returned [`Removed`] carries the deleted key and payload along
    /// with the handle of the node actually unlinked.
    pub fn delete(&mut self, id: NodeId) -> Result<Removed<K, V>, StaleHandle> {
        if !self.arena.contains(id) {
            debug!(%id, "delete of stale handle");
            return Err(StaleHandle(id));
        }

        let vacated = self.bst_delete(id);
        let color = self.arena[vacated.removed].color;

        if color.is_black() && self.root.is_some() {
            self.fixup_delete(vacated);
        }

        let Some(entry) = self.arena.release(vacated.removed) else {
            invariant_broken!("unlinked node {} vanished from the arena", vacated.removed)
        };

        self.audit("delete");
        Ok(Removed {
            id: vacated.removed,
            key: entry.key,
            value: entry.value,
            color,
        })
    }

    /// Unlink `id` (or its successor) from the tree without rebalancing
    fn bst_delete(&mut self, id: NodeId) -> Vacated {
        let entry = &self.arena[id];
        let (left, right) = (entry.left, entry.right);

        let child = match (left, right) {
            (Some(_), Some(right)) => {
                // Two children: the successor is the minimum of the right
                // subtree and never has a left child
                let successor = self.extreme(right, Direction::Left);
                let vacated = self.bst_delete(successor);

                let (node, succ) = self.arena.pair_mut(id, successor);
                core::mem::swap(&mut node.key, &mut succ.key);
                core::mem::swap(&mut node.value, &mut succ.value);
                return vacated;
            }
            (Some(child), None) | (None, Some(child)) => Some(child),
            (None, None) => None,
        };

        let parent = self.parent_of(id);
        let side = self.side_of(id);
        self.replace_in_parent(id, child);

        Vacated {
            removed: id,
            parent,
            side,
            child,
        }
    }

    /// Restore black-height after a black node was unlinked
    fn fixup_delete(&mut self, vacated: Vacated) {
        let mut cursor = match (vacated.child, vacated.parent, vacated.side) {
            (Some(child), _, _) => Cursor::Node(child),
            (None, Some(parent), Some(side)) => Cursor::Virtual { parent, side },
            _ => invariant_broken!("black leaf {} removed without a parent", vacated.removed),
        };

        // A red replacement absorbs the missing black
        if let Cursor::Node(child) = cursor {
            if self.color_of(Some(child)).is_red() {
                trace!(%child, "delete fixup: repaint replacement");
                self.set_color(child, Color::Black);
                return;
            }
        }

        loop {
            let (father, side) = self.position(cursor);
            let Some(brother) = self.child(father, side.opposite()) else {
                invariant_broken!("double-black under {} has no sibling", father)
            };
            let near = self.child(brother, side);
            let far = self.child(brother, side.opposite());

            let father_color = self.color_of(Some(father));
            let brother_color = self.color_of(Some(brother));
            let near_color = self.color_of(near);
            let far_color = self.color_of(far);

            match (father_color, brother_color, near_color, far_color) {
                // 1. Red father, black brother and nephews: swap father/brother colors
                (Color::Red, Color::Black, Color::Black, Color::Black) => {
                    trace!(%father, %brother, "delete fixup: case 1");
                    self.swap_colors(father, brother);
                    return;
                }

                // 2. Black brother, red far nephew: rotate father toward the deficiency
                (_, Color::Black, _, Color::Red) => {
                    trace!(%father, %brother, "delete fixup: case 2");
                    self.rotate(side, father, brother);
                    if let Some(far) = far {
                        self.set_color(far, Color::Black);
                    }
                    self.swap_colors(father, brother);
                    return;
                }

                // 3. Black brother, red near nephew, black far nephew: turn into case 2
                (_, Color::Black, Color::Red, Color::Black) => {
                    let Some(near) = near else {
                        invariant_broken!("red near nephew of {} is absent", brother)
                    };
                    trace!(%brother, %near, "delete fixup: case 3");
                    self.rotate(side.opposite(), brother, near);
                    self.flip_color(brother);
                    self.flip_color(near);
                }

                // 4. Red brother: rotate it above father, then retry cases 1-3
                (_, Color::Red, _, _) => {
                    trace!(%father, %brother, "delete fixup: case 4");
                    self.rotate(side, father, brother);
                    self.flip_color(father);
                    self.flip_color(brother);
                }

                // 5. All black: push the deficiency up to father
                (Color::Black, Color::Black, Color::Black, Color::Black) => {
                    trace!(%father, %brother, "delete fixup: case 5");
                    self.set_color(brother, Color::Red);
                    if Some(father) == self.root {
                        return;
                    }
                    cursor = Cursor::Node(father);
                }
            }
        }
    }

    /// Parent of the cursor and the side it hangs on
    fn position(&self, cursor: Cursor) -> (NodeId, Direction) {
        match cursor {
            Cursor::Virtual { parent, side } => (parent, side),
            Cursor::Node(id) => match (self.parent_of(id), self.side_of(id)) {
                (Some(parent), Some(side)) => (parent, side),
                _ => invariant_broken!("double-black cursor {} reached the root", id),
            },
        }
    }
}
