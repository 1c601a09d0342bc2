use std::fmt;

use tracing::trace;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
struct Counted<T> {
    data: T,
    count: usize,
}

/// A self-organizing list using the count heuristic.
///
/// Every element remembers how often it has been accessed and the list stays
/// ordered by descending access count, so frequently used elements migrate to
/// the front where linear searches find them first.
#[derive(Clone, PartialEq)]
pub struct OrganizedList<T> {
    items: Vec<Counted<T>>,
}

impl<T> Default for OrganizedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> OrganizedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends `item` with an access count of zero. Counts never drop below zero,
    /// so the back of the list is always its sorted position.
    pub fn push(&mut self, item: T) {
        self.items.push(Counted {
            data: item,
            count: 0,
        });
    }

    /// Reads the element at `index` without counting the access
    pub fn peek(&self, index: usize) -> Option<&T> {
        self.items.get(index).map(|c| &c.data)
    }

    /// Access count of the element at `index`
    pub fn count_at(&self, index: usize) -> Option<usize> {
        self.items.get(index).map(|c| c.count)
    }

    /// Reads the element at `index`, counting the access and moving it ahead of
    /// every element accessed less often.
    pub fn access(&mut self, index: usize) -> Option<&T> {
        let entry = self.items.get(index)?.count + 1;
        self.items[index].count = entry;

        let target = self.items[..index].partition_point(|c| c.count >= entry);
        if target < index {
            trace!("Promoting element from {} to {} (count {})", index, target, entry);
            self.items[target..=index].rotate_right(1);
        }
        Some(&self.items[target].data)
    }

    /// Replaces the element at `index`, resetting its access count
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        if index >= self.items.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        let old = self.items.remove(index);
        self.push(item);
        Ok(old.data)
    }

    /// Removes and returns the element at `index`
    pub fn pop(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index).data)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.items.iter().map(|c| &c.data)
    }
}

impl<T: PartialEq> OrganizedList<T> {
    /// Finds the first element equal to `item`, counting the access
    pub fn find(&mut self, item: &T) -> Option<&T> {
        let index = self.items.iter().position(|c| &c.data == item)?;
        self.access(index)
    }
}

impl<T> FromIterator<T> for OrganizedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|data| Counted { data, count: 0 })
                .collect(),
        }
    }
}

impl<T> Extend<T> for OrganizedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: fmt::Display> fmt::Debug for OrganizedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, c) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}:{}", c.data, c.count)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[traced_test]
    #[test]
    fn test_access_promotes() {
        let mut list: OrganizedList<&str> = ["a", "b", "c"].into_iter().collect();
        assert_eq!(list.access(2), Some(&"c"));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["c", "a", "b"]);
        assert_eq!(list.count_at(0), Some(1));

        // Ties keep the earlier element ahead
        assert_eq!(list.access(2), Some(&"b"));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["c", "b", "a"]);

        list.find(&"b");
        assert_eq!(list.peek(0), Some(&"b"));
        assert_eq!(list.count_at(0), Some(2));
        assert!(logs_contain("Promoting element"));
    }

    #[test]
    fn test_push_goes_to_back() {
        let mut list: OrganizedList<i32> = OrganizedList::new();
        list.extend([1, 2]);
        list.access(1);
        list.push(3);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![2, 1, 3]);
        assert_eq!(format!("{:?}", list), "[2:1, 1:0, 3:0]");
    }

    #[test]
    fn test_set_and_pop() {
        let mut list: OrganizedList<i32> = [1, 2, 3].into_iter().collect();
        list.access(2);
        assert_eq!(list.set(0, 9), Ok(3));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 9]);
        assert!(list.set(7, 0).is_err());
        assert_eq!(list.pop(1), Some(2));
        assert_eq!(list.pop(5), None);
        assert_eq!(list.len(), 2);
        assert_eq!(list.access(4), None);
    }
}
