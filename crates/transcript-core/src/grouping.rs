//! Insertion-ordered grouping.
//!
//! Keys are kept in a vector in first-seen order alongside an index map from
//! key to position, so iteration order never depends on hashing.

use std::collections::HashMap;
use std::hash::Hash;

/// Groups values by key, remembering the order in which keys first appeared.
#[derive(Debug, Clone)]
pub struct OrderedGroups<K, V> {
    keys: Vec<K>,
    groups: Vec<V>,
    index: HashMap<K, usize>,
}

impl<K, V> OrderedGroups<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Get the group for `key`, creating it with `init` on first sight.
    pub fn entry_or_insert_with(&mut self, key: &K, init: impl FnOnce() -> V) -> &mut V {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                let position = self.keys.len();
                self.keys.push(key.clone());
                self.groups.push(init());
                self.index.insert(key.clone(), position);
                position
            }
        };
        &mut self.groups[position]
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&position| &self.groups[position])
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Consume into `(key, group)` pairs in first-seen order.
    pub fn into_ordered(self) -> impl Iterator<Item = (K, V)> {
        self.keys.into_iter().zip(self.groups)
    }
}

impl<K, V> Default for OrderedGroups<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_first_seen_order() {
        let mut groups: OrderedGroups<i64, Vec<&str>> = OrderedGroups::new();
        for (key, value) in [(30, "a"), (10, "b"), (30, "c"), (20, "d"), (10, "e")] {
            groups.entry_or_insert_with(&key, Vec::new).push(value);
        }

        assert_eq!(groups.keys(), &[30, 10, 20]);
        assert_eq!(groups.get(&10), Some(&vec!["b", "e"]));

        let ordered: Vec<_> = groups.into_ordered().collect();
        assert_eq!(
            ordered,
            vec![(30, vec!["a", "c"]), (10, vec!["b", "e"]), (20, vec!["d"])]
        );
    }

    #[test]
    fn empty_groups() {
        let groups: OrderedGroups<String, u32> = OrderedGroups::default();
        assert!(groups.is_empty());
        assert_eq!(groups.len(), 0);
        assert!(groups.get(&"missing".to_string()).is_none());
    }
}
