use std::ops::{Deref, DerefMut};

use crate::cursor::Cursor;

/// A list whose cursor wraps around at both ends.
///
/// Stepping with [`Cursor::next_item`] or [`Cursor::prev_item`] never runs out on a
/// non-empty array, so loops over it need their own exit condition. An empty array
/// yields [`None`] instead of spinning.
#[derive(Debug, Clone, Default)]
pub struct CircularArray<T> {
    items: Vec<T>,
    cursor: usize,
}

impl<T> CircularArray<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
        }
    }

    /// Endless forward iterator over the elements, starting at the first.
    /// Independent of the cursor.
    pub fn cycle(&self) -> std::iter::Cycle<std::slice::Iter<'_, T>> {
        self.items.iter().cycle()
    }

    fn current(&mut self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        // Elements may have been removed since the last step
        self.cursor %= self.items.len();
        Some(self.cursor)
    }
}

impl<T> From<Vec<T>> for CircularArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items, cursor: 0 }
    }
}

impl<T> FromIterator<T> for CircularArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> Cursor for CircularArray<T> {
    type Item = T;

    fn next_item(&mut self) -> Option<&T> {
        let index = self.current()?;
        self.cursor = (index + 1) % self.items.len();
        self.items.get(index)
    }

    fn prev_item(&mut self) -> Option<&T> {
        let index = self.current()?;
        let len = self.items.len();
        self.cursor = (index + len - 1) % len;
        self.items.get(index)
    }

    fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl<T> Deref for CircularArray<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> DerefMut for CircularArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{next, prev};

    fn fixture() -> CircularArray<i32> {
        CircularArray::from(vec![0, 1, 2])
    }

    #[test]
    fn test_iteration() {
        let list = fixture();
        let mut count = 0;
        for item in list.cycle() {
            if *item == 2 {
                count += 1;
            }
            if count == 2 {
                break;
            }
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_next() {
        let mut list = fixture();
        assert_eq!(next(&mut list), Some(&0));
        assert_eq!(next(&mut CircularArray::<i32>::new()), None);
    }

    #[test]
    fn test_prev() {
        let mut list = fixture();
        assert_eq!(prev(&mut list), Some(&0));
        assert_eq!(prev(&mut list), Some(&2));
        assert_eq!(prev(&mut list), Some(&1));
        assert_eq!(prev(&mut list), Some(&0));
        assert_eq!(prev(&mut CircularArray::<i32>::new()), None);
    }

    #[test]
    fn test_next_cont() {
        let mut list = fixture();
        let seen: Vec<i32> = (0..7).filter_map(|_| list.next_item().copied()).collect();
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_shrink_under_cursor() {
        let mut list = fixture();
        list.next_item();
        list.next_item();
        list.truncate(1);
        assert_eq!(list.next_item(), Some(&0));
        assert_eq!(list.next_item(), Some(&0));
    }
}
