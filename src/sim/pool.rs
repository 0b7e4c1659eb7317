//! Entity storage keyed by stable, session-unique ids
//!
//! Entities live in a `Vec` kept sorted by id, so iteration order is stable
//! and lookups are a binary search. Removal inside a tick is mark-then-sweep:
//! systems clear an entity's alive flag and `sweep` compacts in place once
//! the pass is over. Removing or looking up an id that is already gone is a
//! no-op.

use serde::{Deserialize, Serialize};

/// Something that can be stored in an [`EntityPool`]
pub trait PoolEntity {
    fn id(&self) -> u32;
    fn is_alive(&self) -> bool;
}

/// Monotonic id source shared by every entity kind of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to `allocate` will return
    pub fn peek(&self) -> u32 {
        self.next
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityPool<T> {
    items: Vec<T>,
}

impl<T> Default for EntityPool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: PoolEntity> EntityPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, keeping id order
    pub fn insert(&mut self, item: T) {
        let id = item.id();
        match self.items.last() {
            Some(last) if last.id() >= id => {
                let pos = self.items.partition_point(|e| e.id() < id);
                self.items.insert(pos, item);
            }
            _ => self.items.push(item),
        }
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        self.items.binary_search_by_key(&id, |e| e.id()).ok()
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.index_of(id).map(|i| &self.items[i])
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.index_of(id).map(move |i| &mut self.items[i])
    }

    /// Remove an entity immediately. Missing ids return `None`.
    pub fn remove(&mut self, id: u32) -> Option<T> {
        self.index_of(id).map(|i| self.items.remove(i))
    }

    /// Drop every entity whose alive flag is cleared; returns how many went
    pub fn sweep(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|e| e.is_alive());
        before - self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Entities that are still alive (unswept dead ones are skipped)
    pub fn alive(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|e| e.is_alive())
    }

    pub fn live_count(&self) -> usize {
        self.alive().count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}
