use indexmap::IndexMap;
use std::hash::Hash;

/// Occurrence counts that remember the order values were first seen.
///
/// Ranking sorts by descending count; equal counts keep first-seen order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    counts: IndexMap<K, usize>,
}

impl<K: Hash + Eq> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: K) {
        *self.counts.entry(value).or_insert(0) += 1;
    }

    pub fn count(&self, value: &K) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Index of the first occurrence among distinct values.
    pub fn first_seen(&self, value: &K) -> Option<usize> {
        self.counts.get_index_of(value)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All values with their counts, most frequent first.
    pub fn ranked(&self) -> Vec<(K, usize)> {
        let mut entries: Vec<(K, usize)> = self
            .counts
            .iter()
            .map(|(value, count)| (value.clone(), *count))
            .collect();
        // Stable sort: ties stay in insertion order.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    pub fn top(&self, n: usize) -> Vec<K> {
        self.ranked().into_iter().take(n).map(|(value, _)| value).collect()
    }
}

impl<K: Hash + Eq + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for value in iter {
            table.record(value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_first_seen_order() {
        let table: FrequencyTable<&str> = ["b", "a", "c", "a", "c"].into_iter().collect();
        assert_eq!(table.top(3), vec!["a", "c", "b"]);
        assert_eq!(table.first_seen(&"c"), Some(2));
        assert_eq!(table.count(&"z"), 0);
    }

    #[test]
    fn empty_table_ranks_nothing() {
        let table: FrequencyTable<String> = FrequencyTable::new();
        assert!(table.is_empty());
        assert!(table.top(5).is_empty());
    }
}
