use std::{collections::HashMap, fmt, hash::Hash};

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{Error, Result};

/// A bidirectional map: `(key, value)` pairs in one-to-one correspondence.
///
/// A value can be used to find its key just as a key finds its value. Inserting a
/// pair whose key or value is already bound replaces the old binding so the
/// correspondence stays one-to-one. Iteration follows insertion order.
///
/// When keys and values share a type the map is symmetric, see
/// [`BiDirectionalMap::get`] and [`BiDirectionalMap::set`].
#[derive(Debug, Clone)]
pub struct BiDirectionalMap<K, V> {
    forward: IndexMap<K, V>,
    backward: HashMap<V, K>,
}

impl<K, V> Default for BiDirectionalMap<K, V> {
    fn default() -> Self {
        Self {
            forward: IndexMap::default(),
            backward: HashMap::default(),
        }
    }
}

impl<K, V> BiDirectionalMap<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Hash + Eq + Clone + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `value`, returning the value `key` was previously bound to.
    ///
    /// If `value` was bound to a different key, that pair is removed first.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(other) = self.backward.get(&value) {
            if *other != key {
                trace!("Unbinding {:?} from {:?}", value, other);
                let other = other.clone();
                self.forward.shift_remove(&other);
            }
        }

        let previous = self.forward.insert(key.clone(), value.clone());
        if let Some(previous) = &previous {
            self.backward.remove(previous);
        }
        self.backward.insert(value, key);
        previous
    }

    pub fn get_by_key(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    pub fn get_by_value(&self, value: &V) -> Option<&K> {
        self.backward.get(value)
    }

    /// Like [`BiDirectionalMap::get_by_key`], failing with a key error
    pub fn try_get_by_key(&self, key: &K) -> Result<&V> {
        self.get_by_key(key).ok_or_else(|| Error::key_not_found(key))
    }

    /// Like [`BiDirectionalMap::get_by_value`], failing with a key error
    pub fn try_get_by_value(&self, value: &V) -> Result<&K> {
        self.get_by_value(value)
            .ok_or_else(|| Error::key_not_found(value))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.backward.contains_key(value)
    }

    pub fn remove_by_key(&mut self, key: &K) -> Option<V> {
        let value = self.forward.shift_remove(key)?;
        self.backward.remove(&value);
        Some(value)
    }

    pub fn remove_by_value(&mut self, value: &V) -> Option<K> {
        let key = self.backward.remove(value)?;
        self.forward.shift_remove(&key);
        Some(key)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.backward.clear();
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.forward.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, K, V> {
        self.forward.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, K, V> {
        self.forward.values()
    }
}

impl<T> BiDirectionalMap<T, T>
where
    T: Hash + Eq + Clone + fmt::Debug,
{
    /// Looks `item` up as a key, then as a value
    pub fn get(&self, item: &T) -> Option<&T> {
        self.get_by_key(item).or_else(|| self.get_by_value(item))
    }

    /// Like [`BiDirectionalMap::get`], failing with a key error
    pub fn try_get(&self, item: &T) -> Result<&T> {
        self.get(item).ok_or_else(|| Error::key_not_found(item))
    }

    /// True when `item` is stored as either a key or a value
    pub fn contains(&self, item: &T) -> bool {
        self.contains_key(item) || self.contains_value(item)
    }

    /// Symmetric assignment. If `a` is a key its value becomes `b`. Otherwise, if
    /// `a` is a value, the key of that pair becomes `b` and the pair keeps its
    /// position. Otherwise `(a, b)` is inserted.
    pub fn set(&mut self, a: T, b: T) {
        if self.contains_key(&a) {
            self.insert(a, b);
        } else if let Some(key) = self.backward.get(&a).cloned() {
            if key == b {
                return;
            }
            if let Some(stale) = self.forward.shift_remove(&b) {
                trace!("Unbinding {:?} from {:?}", stale, b);
                self.backward.remove(&stale);
            }
            if let Some((index, _, _)) = self.forward.shift_remove_full(&key) {
                self.forward.shift_insert(index, b.clone(), a.clone());
            }
            self.backward.insert(a, b);
        } else {
            self.insert(a, b);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for BiDirectionalMap<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Hash + Eq + Clone + fmt::Debug,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for BiDirectionalMap<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Hash + Eq + Clone + fmt::Debug,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for BiDirectionalMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for BiDirectionalMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_pairs(f, self.forward.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> BiDirectionalMap<&'static str, i32> {
        [("a", 1), ("b", 2)].into_iter().collect()
    }

    #[test]
    fn test_empty_init() {
        let mut map = BiDirectionalMap::new();
        map.insert("a", 1);
        assert!(map.contains_key(&"a"));
        assert!(map.contains_value(&1));
    }

    #[test]
    fn test_get() {
        let map = fixture();
        assert_eq!(map.get_by_key(&"a"), Some(&1));
        assert_eq!(map.get_by_value(&2), Some(&"b"));
        assert_eq!(map.get_by_key(&"c").copied().unwrap_or(3), 3);
        assert_eq!(
            map.try_get_by_key(&"c"),
            Err(Error::KeyNotFound("\"c\"".into()))
        );
        assert!(map.try_get_by_value(&9).is_err());
    }

    #[test]
    fn test_assignment_stays_one_to_one() {
        let mut map = fixture();
        assert_eq!(map.insert("a", 3), Some(1));
        assert_eq!(map.get_by_key(&"a"), Some(&3));
        assert!(!map.contains_value(&1));

        // Binding an existing value to a new key drops the old pair
        assert_eq!(map.insert("c", 2), None);
        assert!(!map.contains_key(&"b"));
        assert_eq!(map.get_by_value(&2), Some(&"c"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_symmetric_set() {
        let mut map: BiDirectionalMap<String, String> = [("a", "1"), ("b", "2")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let s = |v: &str| v.to_string();

        map.set(s("a"), s("5"));
        map.set(s("5"), s("A"));
        assert_eq!(map.get(&s("A")), Some(&s("5")));
        assert_eq!(map.get(&s("5")), Some(&s("A")));

        map.set(s("d"), s("20"));
        assert_eq!(map.get(&s("20")), Some(&s("d")));
        assert!(map.contains(&s("b")));
        assert!(map.try_get(&s("zz")).is_err());
    }

    #[test]
    fn test_set_by_value_keeps_position() {
        let s = |v: &str| v.to_string();
        let mut map: BiDirectionalMap<String, String> =
            [(s("a"), s("1")), (s("b"), s("2")), (s("c"), s("3"))]
                .into_iter()
                .collect();

        map.set(s("2"), s("x"));
        assert_eq!(map.to_string(), "{a: 1, x: 2, c: 3}");
        assert_eq!(map.get(&s("2")), Some(&s("x")));
        assert!(!map.contains_key(&s("b")));

        // Renaming onto an existing key drops that key's pair
        map.set(s("3"), s("a"));
        assert_eq!(map.to_string(), "{x: 2, a: 3}");
        assert!(!map.contains_value(&s("1")));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut map = fixture();
        assert_eq!(map.remove_by_key(&"a"), Some(1));
        assert!(!map.contains_value(&1));
        assert_eq!(map.remove_by_value(&2), Some("b"));
        assert!(map.is_empty());
        assert_eq!(map.remove_by_value(&2), None);
    }

    #[test]
    fn test_str_and_gens() {
        assert_eq!(BiDirectionalMap::<i32, i32>::new().to_string(), "{}");
        let map = fixture();
        assert_eq!(map.to_string(), "{a: 1, b: 2}");
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(
            map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            vec![("a", 1), ("b", 2)]
        );
    }
}
