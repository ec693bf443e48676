use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

struct Entry<V> {
    value: V,
    stamp: u64,
}

struct LruState<K, V> {
    entries: HashMap<K, Entry<V>>,
    // Recency order: oldest stamp first.
    recency: BTreeMap<u64, K>,
    clock: u64,
}

impl<K: Eq + Hash + Clone, V> LruState<K, V> {
    fn next_stamp(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn touch(&mut self, key: &K) -> Option<&V> {
        let stamp = self.next_stamp();
        let entry = self.entries.get_mut(key)?;
        self.recency.remove(&entry.stamp);
        entry.stamp = stamp;
        self.recency.insert(stamp, key.clone());
        Some(&entry.value)
    }

    fn evict_oldest(&mut self) -> Option<K> {
        let (&stamp, _) = self.recency.iter().next()?;
        let key = self.recency.remove(&stamp)?;
        self.entries.remove(&key);
        Some(key)
    }
}

/// Bounded, thread-safe least-recently-used cache.
///
/// When full, inserting a new key evicts exactly the least recently used
/// entry. Lookups refresh recency. The map is never cleared as a whole.
pub struct LruCache<K, V> {
    capacity: usize,
    state: Mutex<LruState<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K: Eq + Hash + Clone, V: Clone> LruCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(LruState {
                entries: HashMap::with_capacity(capacity.min(4096)),
                recency: BTreeMap::new(),
                clock: 0,
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    // Entries are plain values, so a panic elsewhere cannot leave them half-written.
    fn lock(&self) -> MutexGuard<'_, LruState<K, V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lock().entries.contains_key(key)
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Returns a copy of the cached value and marks it most recently used.
    pub fn get(&self, key: &K) -> Option<V> {
        let value = self.lock().touch(key).cloned();
        match value {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        value
    }

    /// Inserts or refreshes `key`, evicting the least recently used entry if
    /// the cache is full.
    pub fn insert(&self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.lock();
        let stamp = state.next_stamp();

        if let Some(entry) = state.entries.get_mut(&key) {
            let old = entry.stamp;
            entry.value = value;
            entry.stamp = stamp;
            state.recency.remove(&old);
            state.recency.insert(stamp, key);
            return;
        }

        while state.entries.len() >= self.capacity {
            if state.evict_oldest().is_none() {
                break;
            }
        }
        state.recency.insert(stamp, key.clone());
        state.entries.insert(key, Entry { value, stamp });
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// The computation runs without holding the lock; if two threads miss on
    /// the same key concurrently both compute and the second insert refreshes
    /// the first.
    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.insert(key, value.clone());
        value
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}
