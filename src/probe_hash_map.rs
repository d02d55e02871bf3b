//! ProbeHashMap: the fixed-capacity bucket array and its slot lifecycle.

use crate::hashing::ProbeSequence;
use thiserror::Error;

/// An owned key/value pair held by an occupied slot.
#[derive(Debug)]
struct Entry {
    key: String,
    value: String,
}

/// One bucket slot. `Empty` terminates probe walks; `Tombstone` is
/// skipped by lookups and reclaimed by inserts.
#[derive(Debug, Default)]
enum Slot {
    #[default]
    Empty,
    Tombstone,
    Occupied(Entry),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    /// No empty or reclaimable slot was reachable within the fixed
    /// capacity. The map is unchanged.
    #[error("hash table is full ({capacity} buckets, none free or reclaimable)")]
    TableFull { capacity: usize },
}

/// A string-keyed map over a fixed-length bucket array with double-hash
/// probing. See the crate docs for the slot-state and probing rules.
#[derive(Debug)]
pub struct ProbeHashMap {
    slots: Vec<Slot>,
    count: usize,
}

impl ProbeHashMap {
    /// Default bucket count. A small prime keeps probe strides coprime
    /// with the capacity, so non-degenerate sequences visit every slot.
    pub const DEFAULT_CAPACITY: usize = 53;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a map with a caller-chosen bucket count, fixed for the
    /// map's lifetime. A zero-capacity map is valid: every insert fails
    /// with `TableFull` and every lookup misses.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Empty);
        ProbeHashMap { slots, count: 0 }
    }

    /// Number of occupied slots. Tombstones do not count.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The fixed bucket count chosen at construction.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Inserts a copy of `key`/`value`, or replaces the value in place if
    /// the key is already present (the count does not change and the old
    /// value is dropped). Fails with `TableFull` when the probe sequence
    /// is exhausted without finding a free or reclaimable slot; the map
    /// is left untouched in that case.
    pub fn insert(&mut self, key: &str, value: &str) -> Result<(), InsertError> {
        let mut reusable: Option<usize> = None;
        let mut empty: Option<usize> = None;
        let mut occupied: Option<usize> = None;
        for index in ProbeSequence::new(key, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => {
                    empty = Some(index);
                    break;
                }
                // Remember the first tombstone but keep walking: the key
                // may still live further along its insert path, and
                // placing a duplicate would break key uniqueness.
                Slot::Tombstone => {
                    if reusable.is_none() {
                        reusable = Some(index);
                    }
                }
                Slot::Occupied(entry) => {
                    if entry.key == key {
                        occupied = Some(index);
                        break;
                    }
                }
            }
        }

        if let Some(index) = occupied {
            if let Slot::Occupied(entry) = &mut self.slots[index] {
                entry.value = value.to_owned();
            }
            return Ok(());
        }

        // Prefer the earliest tombstone over the empty slot: it sits
        // earlier in the probe sequence, so future lookups stop sooner.
        let target = reusable.or(empty).ok_or(InsertError::TableFull {
            capacity: self.slots.len(),
        })?;
        self.slots[target] = Slot::Occupied(Entry {
            key: key.to_owned(),
            value: value.to_owned(),
        });
        self.count += 1;
        Ok(())
    }

    /// Looks up `key`, returning a view borrowed from the slot. The
    /// borrow ends at the next mutation, which may drop the backing
    /// string. `None` means the key is absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        for index in ProbeSequence::new(key, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied(entry) => {
                    if entry.key == key {
                        return Some(entry.value.as_str());
                    }
                }
            }
        }
        None
    }

    /// Mutable access to the value stored for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut String> {
        let index = self.find_index(key)?;
        match &mut self.slots[index] {
            Slot::Occupied(entry) => Some(&mut entry.value),
            _ => unreachable!("find_index only returns occupied slots"),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_index(key).is_some()
    }

    /// Removes `key`, leaving a tombstone in its slot so probe sequences
    /// that pass through it keep working, and returns the owned value.
    /// Absent keys are a no-op: `None`, count untouched.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.find_index(key)?;
        let Slot::Occupied(entry) = std::mem::replace(&mut self.slots[index], Slot::Tombstone)
        else {
            unreachable!("find_index only returns occupied slots")
        };
        self.count -= 1;
        Some(entry.value)
    }

    /// Walks the probe sequence for `key`: tombstones are skipped, an
    /// empty slot proves absence, and the walk gives up after `capacity`
    /// attempts (a table with no empty slot along the cycle proves
    /// nothing either way, so the key is reported absent).
    fn find_index(&self, key: &str) -> Option<usize> {
        for index in ProbeSequence::new(key, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied(entry) => {
                    if entry.key == key {
                        return Some(index);
                    }
                }
            }
        }
        None
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            slots: self.slots.iter_mut(),
        }
    }
}

impl Default for ProbeHashMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the occupied entries of a `ProbeHashMap`.
pub struct Iter<'a> {
    slots: std::slice::Iter<'a, Slot>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(entry) = slot {
                return Some((entry.key.as_str(), entry.value.as_str()));
            }
        }
        None
    }
}

/// Iterator over occupied entries with mutable access to the values.
pub struct IterMut<'a> {
    slots: std::slice::IterMut<'a, Slot>,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (&'a str, &'a mut String);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(entry) = slot {
                return Some((entry.key.as_str(), &mut entry.value));
            }
        }
        None
    }
}
