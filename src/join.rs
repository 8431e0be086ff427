use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

/// Keys of a data join split by what has to happen to their visuals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join<K> {
    /// New keys without a visual yet.
    pub enter: Vec<K>,
    /// Keys that keep their existing visual untouched.
    pub update: Vec<K>,
    /// Keys whose visuals were removed.
    pub exit: Vec<K>,
}

/// Retained visuals keyed by a stable identity, kept in insertion order.
#[derive(Debug, Clone)]
pub struct Selection<K, V> {
    order: Vec<K>,
    items: HashMap<K, V>,
    created: usize,
    removed: usize,
}

impl<K, V> Default for Selection<K, V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            items: HashMap::new(),
            created: 0,
            removed: 0,
        }
    }
}

impl<K: Clone + Eq + Hash, V> Selection<K, V> {
    /// Diffs `keys` against the retained visuals and drops the exit set.
    ///
    /// Duplicate keys in `keys` count once.
    pub fn join(&mut self, keys: impl IntoIterator<Item = K>) -> Join<K> {
        let mut enter = Vec::new();
        let mut update = Vec::new();
        let mut seen = HashSet::new();

        for k in keys {
            if !seen.insert(k.clone()) {
                continue;
            }
            if self.items.contains_key(&k) {
                update.push(k);
            } else {
                enter.push(k);
            }
        }

        let exit: Vec<K> = self
            .order
            .iter()
            .filter(|k| !seen.contains(*k))
            .cloned()
            .collect();
        for k in &exit {
            self.remove(k);
        }

        Join {
            enter,
            update,
            exit,
        }
    }

    /// Adds a visual. An existing visual under the same key is replaced.
    pub fn insert(&mut self, key: K, value: V) {
        if self.items.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
        self.created += 1;
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let v = self.items.remove(key)?;
        self.order.retain(|k| k != key);
        self.removed += 1;
        Some(v)
    }

    /// Removes every visual.
    pub fn clear(&mut self) {
        self.removed += self.order.len();
        self.order.clear();
        self.items.clear();
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.items.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.items.get_mut(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order
            .iter()
            .filter_map(|k| self.items.get(k).map(|v| (k, v)))
    }

    /// Visuals created since this selection was made.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Visuals removed since this selection was made.
    pub fn removed(&self) -> usize {
        self.removed
    }
}
