//! Generational node arena.
//!
//! The tree owns every node record here; links between nodes are
//! `Option<NodeId>` handles rather than owning pointers, so the parent
//! back-reference never implies ownership. Vacated slots are recycled
//! with a bumped generation, which keeps old handles from aliasing.

use core::ops::{Index, IndexMut};

use crate::node::{Color, NodeId};

/// Node record stored in an arena slot
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub key: K,
    pub value: V,
    pub color: Color,
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl<K, V> Entry<K, V> {
    /// Create a detached red record
    pub fn red(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }
}

#[derive(Debug)]
struct Slot<K, V> {
    generation: u32,
    entry: Option<Entry<K, V>>,
}

#[derive(Debug)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    vacant: Vec<u32>,
    len: usize,
}

impl<K, V> Arena<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
            len: 0,
        }
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.len
    }

    /// Store a record and return its handle
    pub fn alloc(&mut self, entry: Entry<K, V>) -> NodeId {
        self.len += 1;

        if let Some(index) = self.vacant.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Some(entry);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }

        let index = u32::try_from(self.slots.len()).unwrap_or_else(|_| {
            panic!("arena exhausted: more than {} nodes", u32::MAX);
        });
        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Remove a record, invalidating every handle to it
    pub fn release(&mut self, id: NodeId) -> Option<Entry<K, V>> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }

        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(id.index);
        self.len -= 1;
        Some(entry)
    }

    pub fn get(&self, id: NodeId) -> Option<&Entry<K, V>> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Entry<K, V>> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Borrow two distinct records mutably at once
    pub fn pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut Entry<K, V>, &mut Entry<K, V>) {
        assert_ne!(a.index, b.index, "pair_mut on the same slot {a}");

        let (low, high, swapped) = if a.index < b.index {
            (a, b, false)
        } else {
            (b, a, true)
        };
        let (head, tail) = self.slots.split_at_mut(high.index as usize);
        let low_entry = live(&mut head[low.index as usize], low);
        let high_entry = live(&mut tail[0], high);

        if swapped {
            (high_entry, low_entry)
        } else {
            (low_entry, high_entry)
        }
    }
}

fn live<K, V>(slot: &mut Slot<K, V>, id: NodeId) -> &mut Entry<K, V> {
    match slot.entry.as_mut() {
        Some(entry) if slot.generation == id.generation => entry,
        _ => panic!("stale node handle {id}"),
    }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
    type Output = Entry<K, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.get(id)
            .unwrap_or_else(|| panic!("stale node handle {id}"))
    }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.get_mut(id)
            .unwrap_or_else(|| panic!("stale node handle {id}"))
    }
}
