use std::ops::{Deref, DerefMut};

use crate::cursor::Cursor;

/// A growable list carrying a cursor for stepping through it in both directions.
///
/// `BaseList` dereferences to [`Vec`], so everything a vector does is available.
/// The cursor starts at the first element. Stepping off either end yields [`None`]
/// and leaves the cursor parked past that end.
#[derive(Debug, Clone, Default)]
pub struct BaseList<T> {
    items: Vec<T>,
    cursor: isize,
}

impl<T> BaseList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
        }
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    fn at_cursor(&self) -> Option<usize> {
        usize::try_from(self.cursor)
            .ok()
            .filter(|&index| index < self.items.len())
    }
}

impl<T> From<Vec<T>> for BaseList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items, cursor: 0 }
    }
}

impl<T> FromIterator<T> for BaseList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> Cursor for BaseList<T> {
    type Item = T;

    fn next_item(&mut self) -> Option<&T> {
        let index = self.at_cursor()?;
        self.cursor += 1;
        self.items.get(index)
    }

    fn prev_item(&mut self) -> Option<&T> {
        let index = self.at_cursor()?;
        self.cursor -= 1;
        self.items.get(index)
    }

    fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl<T> Deref for BaseList<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> DerefMut for BaseList<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl<T: PartialEq> PartialEq for BaseList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<'a, T> IntoIterator for &'a BaseList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
