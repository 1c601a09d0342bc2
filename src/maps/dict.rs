use std::{
    fmt,
    hash::Hash,
    ops::{AddAssign, Deref, DerefMut},
};

use indexmap::IndexMap;

/// An insertion-ordered dictionary that can be merged in place with `+=`.
///
/// ```
/// use structs::maps::Dict;
///
/// let mut d: Dict<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
/// d += [("c", 3), ("a", 10)];
/// assert_eq!(d.to_string(), "{a: 10, b: 2, c: 3}");
/// ```
#[derive(Debug, Clone)]
pub struct Dict<K, V> {
    inner: IndexMap<K, V>,
}

impl<K, V> Default for Dict<K, V> {
    fn default() -> Self {
        Self {
            inner: IndexMap::default(),
        }
    }
}

impl<K: Hash + Eq, V> Dict<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> IndexMap<K, V> {
        self.inner
    }
}

impl<K, V> Deref for Dict<K, V> {
    type Target = IndexMap<K, V>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<K, V> DerefMut for Dict<K, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

/// Merge: entries on the right overwrite entries with the same key
impl<K, V, I> AddAssign<I> for Dict<K, V>
where
    K: Hash + Eq,
    I: IntoIterator<Item = (K, V)>,
{
    fn add_assign(&mut self, rhs: I) {
        self.inner.extend(rhs);
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for Dict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for Dict<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K: Hash + Eq, V: Eq> Eq for Dict<K, V> {}

impl<K, V> IntoIterator for Dict<K, V> {
    type Item = (K, V);
    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Dict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_pairs(f, self.inner.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assign() {
        let mut dict: Dict<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
        dict += [("c", 3)];
        let expected: Dict<&str, i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(dict, expected);

        let other = expected.clone();
        dict += other;
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut dict: Dict<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
        dict += vec![("a", 5)];
        assert_eq!(dict.to_string(), "{a: 5, b: 2}");
        assert_eq!(Dict::<u8, u8>::new().to_string(), "{}");
    }
}
