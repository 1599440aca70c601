//! Shard implementation.
//

use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::ring::ShardId;

/// Shard is an independent key-value partition of the store.
///
/// Shared access (`set`, `get`) goes through the shard lock; the `_mut`
/// variants are used while the owner already holds the whole topology
/// exclusively and skip locking entirely.
pub struct Shard<V> {
    pub(crate) data: RwLock<HashMap<String, V>>,
    id: ShardId,
    len: AtomicUsize,
}

impl<V: Clone> Shard<V> {
    /// Creates a new shard.
    pub fn new(id: ShardId) -> Self {
        const INITIAL_CAPACITY: usize = 256;
        Self {
            data: RwLock::new(HashMap::with_capacity(INITIAL_CAPACITY)),
            id,
            len: AtomicUsize::new(0),
        }
    }

    pub fn id(&self) -> ShardId {
        self.id
    }

    /// Gets the number of keys.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upserts a key. Returns true when the key was not present before.
    pub fn set(&self, key: String, value: V) -> bool {
        let mut data = self.data.write();
        let inserted = data.insert(key, value).is_none();
        if inserted {
            self.len.fetch_add(1, Ordering::Relaxed);
        }
        inserted
    }

    /// Gets a value by key.
    pub fn get(&self, key: &str) -> Option<V> {
        self.data.read().get(key).cloned()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }

    /// Walks over items with a read lock until `f` returns false.
    pub fn walk_r<F>(&self, mut f: F)
    where
        F: FnMut(&str, &V) -> bool,
    {
        let data = self.data.read();
        for (k, v) in data.iter() {
            if !f(k, v) {
                return;
            }
        }
    }

    /// Upserts a key without locking.
    #[cfg(test)]
    pub(crate) fn set_mut(&mut self, key: String, value: V) -> bool {
        let inserted = self.data.get_mut().insert(key, value).is_none();
        if inserted {
            *self.len.get_mut() += 1;
        }
        inserted
    }

    /// Inserts a key without locking unless it is already present. An existing
    /// value is kept. Returns true when the key was inserted.
    pub fn insert_absent_mut(&mut self, key: String, value: V) -> bool {
        match self.data.get_mut().entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                *self.len.get_mut() += 1;
                true
            }
        }
    }

    /// Removes a key without locking.
    pub fn remove_mut(&mut self, key: &str) -> Option<V> {
        let removed = self.data.get_mut().remove(key);
        if removed.is_some() {
            *self.len.get_mut() -= 1;
        }
        removed
    }

    /// Removes and returns every entry whose key matches `pred`.
    pub fn extract_mut<F>(&mut self, mut pred: F) -> Vec<(String, V)>
    where
        F: FnMut(&str) -> bool,
    {
        let data = self.data.get_mut();
        let matched: Vec<String> = data.keys().filter(|k| pred(k.as_str())).cloned().collect();

        let mut out = Vec::with_capacity(matched.len());
        for key in matched {
            if let Some(value) = data.remove(&key) {
                out.push((key, value));
            }
        }
        *self.len.get_mut() -= out.len();
        out
    }

    /// Inserts a batch of entries without locking. Keys already held here keep
    /// their current value. Returns how many were inserted.
    pub fn absorb_mut(&mut self, items: Vec<(String, V)>) -> usize {
        let mut inserted = 0;
        for (key, value) in items {
            if self.insert_absent_mut(key, value) {
                inserted += 1;
            }
        }
        inserted
    }
}
