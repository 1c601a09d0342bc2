use std::{cmp::Ordering, fmt, ops::AddAssign, rc::Rc};

type Compare<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// A list that keeps its elements sorted at all times.
///
/// Elements are ordered by a comparison derived from a key function, or by their
/// natural order. A reversed list keeps descending order. Insertions land after
/// elements that compare equal, so equal elements keep their insertion order.
///
/// The list dereferences to a slice for read access; every mutation goes through
/// methods that preserve the order.
pub struct SortedList<T> {
    items: Vec<T>,
    compare: Compare<T>,
    reverse: bool,
}

impl<T: Ord + 'static> SortedList<T> {
    pub fn new() -> Self {
        Self::with_compare(Rc::new(|a: &T, b: &T| a.cmp(b)))
    }
}

impl<T: Ord + 'static> Default for SortedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SortedList<T> {
    /// Creates a list ordered by the key extracted by `key`
    pub fn with_key<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        Self::with_compare(Rc::new(move |a: &T, b: &T| key(a).cmp(&key(b))))
    }

    fn with_compare(compare: Compare<T>) -> Self {
        Self {
            items: Vec::new(),
            compare,
            reverse: false,
        }
    }

    /// Switches the list to descending order, resorting any existing elements
    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        let items = std::mem::take(&mut self.items);
        self.extend(items);
        self
    }

    /// Builds the list from `iter` in one sort
    pub fn from_iter_with<I: IntoIterator<Item = T>>(mut self, iter: I) -> Self {
        self.items.extend(iter);
        let compare = self.compare.clone();
        let reverse = self.reverse;
        self.items.sort_by(|a, b| order(&compare, reverse, a, b));
        self
    }

    pub fn is_reversed(&self) -> bool {
        self.reverse
    }

    fn cmp(&self, a: &T, b: &T) -> Ordering {
        order(&self.compare, self.reverse, a, b)
    }

    /// Inserts `item` at its sorted position and returns that position
    pub fn insert(&mut self, item: T) -> usize {
        let index = self
            .items
            .partition_point(|probe| self.cmp(probe, &item) != Ordering::Greater);
        self.items.insert(index, item);
        index
    }

    /// Alias for [`SortedList::insert`]
    pub fn push(&mut self, item: T) -> usize {
        self.insert(item)
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn clear(&mut self) {
        self.items.clear()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: PartialEq> SortedList<T> {
    /// Position of the first element equal to `item`.
    ///
    /// Only the run of elements sharing `item`'s sort position is scanned.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        let start = self
            .items
            .partition_point(|other| self.cmp(other, item) == Ordering::Less);
        self.items[start..]
            .iter()
            .take_while(|other| self.cmp(other, item) == Ordering::Equal)
            .position(|other| other == item)
            .map(|offset| start + offset)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }
}

fn order<T>(compare: &Compare<T>, reverse: bool, a: &T, b: &T) -> Ordering {
    let ordering = compare(a, b);
    if reverse {
        ordering.reverse()
    } else {
        ordering
    }
}

impl<T> std::ops::Deref for SortedList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> Extend<T> for SortedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord + 'static> FromIterator<T> for SortedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        SortedList::new().from_iter_with(iter)
    }
}

impl<T> AddAssign<Vec<T>> for SortedList<T> {
    fn add_assign(&mut self, rhs: Vec<T>) {
        self.extend(rhs);
    }
}

impl<T: Clone> Clone for SortedList<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            compare: self.compare.clone(),
            reverse: self.reverse,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SortedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedList")
            .field("items", &self.items)
            .field("reverse", &self.reverse)
            .finish()
    }
}

impl<T: PartialEq> PartialEq<[T]> for SortedList<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.items == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for SortedList<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.items == other
    }
}

impl<'a, T> IntoIterator for &'a SortedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> SortedList<&'static str> {
        ["c", "b", "a"].into_iter().collect()
    }

    #[test]
    fn test_is_ordered() {
        assert_eq!(letters(), ["a", "b", "c"]);
    }

    #[test]
    fn test_insert() {
        let mut list = letters();
        assert_eq!(list.insert("d"), 3);
        assert_eq!(list, ["a", "b", "c", "d"]);
        list.push("aa");
        assert_eq!(list, ["a", "aa", "b", "c", "d"]);
    }

    #[test]
    fn test_insert_reversed() {
        let mut revd = SortedList::new().reversed(true).from_iter_with(["c", "a", "b"]);
        assert_eq!(revd, ["c", "b", "a"]);
        revd.insert("d");
        assert_eq!(revd, ["d", "c", "b", "a"]);
        revd.insert("bb");
        assert_eq!(revd, ["d", "c", "bb", "b", "a"]);
    }

    #[test]
    fn test_add_assign() {
        let mut list = letters();
        list += vec!["e", "d", "f"];
        assert_eq!(list, ["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_key_is_stable() {
        let mut list = SortedList::with_key(|s: &String| s.len());
        list.extend(["ccc", "a", "bb", "b"].map(String::from));
        assert_eq!(list, ["a", "b", "bb", "ccc"].map(String::from));
        assert_eq!(list.first().map(String::as_str), Some("a"));
    }

    #[test]
    fn test_contains_needs_equal_element() {
        let list = SortedList::with_key(|s: &String| s.len())
            .from_iter_with(["ccc", "a", "bb", "b"].map(String::from));
        assert!(!list.contains(&"zz".to_string()));
        assert!(list.contains(&"bb".to_string()));
        assert_eq!(list.index_of(&"b".to_string()), Some(1));
        assert_eq!(list.index_of(&"c".to_string()), None);
    }

    #[test]
    fn test_remove_and_reverse_existing() {
        let mut list: SortedList<i32> = [5, 1, 3].into_iter().collect();
        assert_eq!(list.remove(1), Some(3));
        assert_eq!(list.remove(7), None);
        assert_eq!(list.pop(), Some(5));

        let list = list.reversed(true);
        assert!(list.is_reversed());
        assert_eq!(list.index_of(&1), Some(0));
    }
}
