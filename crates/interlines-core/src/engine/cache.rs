use crate::core::interactions::pair_key::PairKey;
use std::collections::BTreeMap;

/// Entries grouped by structure pair.
///
/// Iteration is always in ascending [`PairKey`] order, then insertion order
/// within a pair. Pairs whose list becomes empty are pruned, so a present key
/// always has at least one entry.
#[derive(Debug, Clone)]
pub struct PairCache<T> {
    data: BTreeMap<PairKey, Vec<T>>,
}

impl<T> Default for PairCache<T> {
    fn default() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }
}

impl<T> PairCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PairKey) -> Option<&[T]> {
        self.data.get(key).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, key: &PairKey) -> Option<&mut Vec<T>> {
        self.data.get_mut(key)
    }

    /// Returns the list for `key`, inserting an empty one first if absent.
    ///
    /// Callers must push into the returned list; an empty list left behind is
    /// only pruned by the next removal on that key.
    pub fn get_or_insert_empty(&mut self, key: PairKey) -> &mut Vec<T> {
        self.data.entry(key).or_default()
    }

    /// Removes the first entry of `key`'s list matching `predicate`.
    pub fn remove_where<F>(&mut self, key: &PairKey, predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let entries = self.data.get_mut(key)?;
        let position = entries.iter().position(predicate);
        let removed = position.map(|i| entries.remove(i));
        if entries.is_empty() {
            self.data.remove(key);
        }
        removed
    }

    /// All entries, flattened, in ascending pair-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &T)> {
        self.data
            .iter()
            .flat_map(|(key, entries)| entries.iter().map(move |entry| (key, entry)))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.values().flatten()
    }

    /// Same order as [`values`](Self::values).
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.values_mut().flatten()
    }

    /// Total number of entries across all pairs.
    pub fn len(&self) -> usize {
        self.data.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data.values().all(Vec::is_empty)
    }

    pub fn pair_count(&self) -> usize {
        self.data.len()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}
