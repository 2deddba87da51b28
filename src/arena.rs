//! Generational storage for bodies and colliders.
//!
//! Slots come from a `slab::Slab`, which reuses vacated keys. Every insert is
//! stamped with a fresh generation, so a handle to a removed entry never
//! resolves to whatever later moves into its slot.

use slab::Slab;
use std::{fmt, hash::Hash, marker::PhantomData};

/// Typed index into an [`Arena`].
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(index: usize, generation: u32) -> Self {
        Self {
            index: index as u32,
            generation,
            _marker: PhantomData,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

// Manual impls: derives would put bounds on `T`.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index, self.generation)
    }
}

struct Entry<T> {
    generation: u32,
    value: T,
}

pub struct Arena<T> {
    slots: Slab<Entry<T>>,
    next_generation: u32,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: Slab::new(),
            next_generation: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> Handle<T> {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        let index = self.slots.insert(Entry { generation, value });
        Handle::new(index, generation)
    }

    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        if !self.contains(handle) {
            return None;
        }
        Some(self.slots.remove(handle.index as usize).value)
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.slots
            .get(handle.index as usize)
            .filter(|entry| entry.generation == handle.generation)
            .map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|entry| entry.generation == handle.generation)
            .map(|entry| &mut entry.value)
    }

    /// Mutable access to two distinct live entries at once.
    pub fn get2_mut(&mut self, a: Handle<T>, b: Handle<T>) -> Option<(&mut T, &mut T)> {
        if a.index == b.index || !self.contains(a) || !self.contains(b) {
            return None;
        }
        self.slots
            .get2_mut(a.index as usize, b.index as usize)
            .map(|(ea, eb)| (&mut ea.value, &mut eb.value))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_handle_does_not_alias_reused_slot() {
        let mut arena = Arena::new();
        let first = arena.insert("first");
        assert_eq!(arena.remove(first), Some("first"));

        let second = arena.insert("second");
        assert_eq!(first.index(), second.index());
        assert_eq!(arena.get(first), None);
        assert_eq!(arena.get(second), Some(&"second"));
        assert_eq!(arena.remove(first), None);
    }

    #[test]
    fn test_get2_mut_rejects_same_handle() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        let b = arena.insert(2);
        assert!(arena.get2_mut(a, a).is_none());

        let (x, y) = arena.get2_mut(a, b).unwrap();
        std::mem::swap(x, y);
        assert_eq!(arena.get(a), Some(&2));
        assert_eq!(arena.get(b), Some(&1));
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut arena = Arena::new();
        let a = arena.insert(7);
        arena.insert(8);
        assert_eq!(arena.len(), 2);
        arena.clear();
        assert!(arena.is_empty());
        assert!(!arena.contains(a));
    }
}
