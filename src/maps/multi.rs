use std::{fmt, hash::Hash, ops::AddAssign};

use indexmap::{map::Entry, IndexMap};

/// A map in which a key can hold more than one value.
///
/// Inserting under an existing key appends to that key's values instead of
/// replacing them. Keys iterate in first-insertion order and each key's values
/// in insertion order.
#[derive(Debug, Clone)]
pub struct MultiMap<K, V> {
    inner: IndexMap<K, Vec<V>>,
}

impl<K, V> Default for MultiMap<K, V> {
    fn default() -> Self {
        Self {
            inner: IndexMap::default(),
        }
    }
}

impl<K: Hash + Eq, V> MultiMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the values stored at `key`
    pub fn insert(&mut self, key: K, value: V) {
        self.inner.entry(key).or_default().push(value);
    }

    /// All values stored at `key`
    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.inner.get(key).map(Vec::as_slice)
    }

    /// The first value stored at `key`
    pub fn get_first(&self, key: &K) -> Option<&V> {
        self.inner.get(key).and_then(|values| values.first())
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut Vec<V>> {
        self.inner.get_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Inserts every pair of `pairs`
    pub fn update<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) {
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }

    /// Appends every value of `other` under its key
    pub fn merge(&mut self, other: MultiMap<K, V>) {
        for (key, values) in other.inner {
            self.inner.entry(key).or_default().extend(values);
        }
    }

    /// Stores `value` at `key` only if `key` is absent, then returns the values at `key`
    pub fn set_default(&mut self, key: K, value: V) -> &[V] {
        match self.inner.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(vec![value]),
        }
    }

    /// Removes `key` and returns all of its values
    pub fn remove(&mut self, key: &K) -> Option<Vec<V>> {
        self.inner.shift_remove(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Number of values across all keys
    pub fn total_len(&self) -> usize {
        self.inner.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, K, Vec<V>> {
        self.inner.keys()
    }

    /// Every `(key, value)` pair, a key repeating once per value
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.inner
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key, value)))
    }

    /// Every key with all of its values
    pub fn iter_all(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.inner
            .iter()
            .map(|(key, values)| (key, values.as_slice()))
    }
}

impl<K: Hash + Eq, V> AddAssign for MultiMap<K, V> {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(rhs);
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for MultiMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.update(iter);
        map
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for MultiMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.update(iter);
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for MultiMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for MultiMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, values)) in self.inner.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: ", key)?;
            if let [single] = values.as_slice() {
                write!(f, "{}", single)?;
            } else {
                f.write_str("[")?;
                for (j, value) in values.iter().enumerate() {
                    if j > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")?;
            }
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> MultiMap<&'static str, i32> {
        [("a", 1), ("b", 2)].into_iter().collect()
    }

    #[test]
    fn test_overwrite() {
        let mut map = fixture();
        assert_eq!(map.get(&"a"), Some(&[1][..]));
        map.insert("a", 3);
        assert_eq!(map.get(&"a"), Some(&[1, 3][..]));
        assert_eq!(map.get_first(&"a"), Some(&1));
    }

    #[test]
    fn test_update() {
        let mut map = fixture();
        map.update([("b", 3), ("c", 4)]);
        assert_eq!(map.to_string(), "{a: 1, b: [2, 3], c: 4}");

        map.update(vec![("d", 5)]);
        assert_eq!(map.to_string(), "{a: 1, b: [2, 3], c: 4, d: 5}");
        assert_eq!(map.len(), 4);
        assert_eq!(map.total_len(), 5);
    }

    #[test]
    fn test_set_default() {
        let mut map = fixture();
        assert_eq!(map.set_default("d", 0), &[0]);
        assert_eq!(map.set_default("a", 9), &[1]);
        assert_eq!(map.get(&"d"), Some(&[0][..]));
    }

    #[test]
    fn test_add_assign() {
        let mut map = fixture();
        let other: MultiMap<_, _> = [("b", 12), ("c", 3), ("d", 4)].into_iter().collect();
        map += other;

        let mut expected = MultiMap::new();
        expected.update([("a", 1), ("b", 2), ("b", 12), ("c", 3), ("d", 4)]);
        assert_eq!(map, expected);
    }

    #[test]
    fn test_remove_and_iter() {
        let mut map = fixture();
        map.insert("a", 7);
        assert_eq!(
            map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            vec![("a", 1), ("a", 7), ("b", 2)]
        );
        assert_eq!(map.iter_all().count(), 2);
        assert_eq!(map.remove(&"a"), Some(vec![1, 7]));
        assert!(!map.contains_key(&"a"));
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["b"]);
    }
}
