use std::fmt;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// A record read from a [`ParallelArray`]: one reference per column
pub type Record<'a, V> = Vec<&'a V>;

/// A parallel array represents an array of records as one array per field.
///
/// Every column holds the same number of elements, so the elements at the same
/// index across all columns form a single record. Records are supplied as a `Vec`
/// with one value per column, in column declaration order.
#[derive(Debug, Clone)]
pub struct ParallelArray<V> {
    columns: IndexMap<String, Vec<V>>,
}

impl<V> ParallelArray<V> {
    /// Creates an empty array with the given column names
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns = IndexMap::new();
        for name in names {
            let name = name.into();
            if columns.contains_key(&name) {
                return Err(Error::DuplicateColumn(name));
            }
            columns.insert(name, Vec::new());
        }
        if columns.is_empty() {
            return Err(Error::NoColumns);
        }
        Ok(Self { columns })
    }

    /// Column names in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.columns.values().next().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_arity(&self, record: &[V]) -> Result<()> {
        if record.len() != self.width() {
            return Err(Error::ArityMismatch {
                expected: self.width(),
                got: record.len(),
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize, len: usize) -> Result<()> {
        if index >= len {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// Appends a record
    pub fn push(&mut self, record: Vec<V>) -> Result<()> {
        self.check_arity(&record)?;
        for (column, value) in self.columns.values_mut().zip(record) {
            column.push(value);
        }
        Ok(())
    }

    /// Appends every record of `records`. Stops at the first malformed record.
    pub fn extend_records<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<V>>,
    {
        for record in records {
            self.push(record)?;
        }
        Ok(())
    }

    /// Inserts a record at `index`, shifting later records back
    pub fn insert(&mut self, index: usize, record: Vec<V>) -> Result<()> {
        self.check_arity(&record)?;
        self.check_index(index, self.len() + 1)?;
        for (column, value) in self.columns.values_mut().zip(record) {
            column.insert(index, value);
        }
        Ok(())
    }

    /// Overwrites the record at `index`
    pub fn set(&mut self, index: usize, record: Vec<V>) -> Result<()> {
        self.check_arity(&record)?;
        self.check_index(index, self.len())?;
        for (column, value) in self.columns.values_mut().zip(record) {
            column[index] = value;
        }
        Ok(())
    }

    /// The record at `index`
    pub fn get(&self, index: usize) -> Option<Record<'_, V>> {
        self.columns
            .values()
            .map(|column| column.get(index))
            .collect()
    }

    /// Removes and returns the last record
    pub fn pop(&mut self) -> Option<Vec<V>> {
        if self.is_empty() {
            return None;
        }
        self.columns.values_mut().map(Vec::pop).collect()
    }

    /// Removes and returns the record at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<Vec<V>> {
        self.check_index(index, self.len())?;
        Ok(self
            .columns
            .values_mut()
            .map(|column| column.remove(index))
            .collect())
    }

    pub fn clear(&mut self) {
        self.columns.values_mut().for_each(Vec::clear);
    }

    /// Reverses the record order in place
    pub fn reverse(&mut self) {
        self.columns.values_mut().for_each(|column| column.reverse());
    }

    /// A single column by name
    pub fn column(&self, name: &str) -> Option<&[V]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Iterates over records front to back. Use `.rev()` for back to front.
    pub fn iter(&self) -> Records<'_, V> {
        Records {
            array: self,
            front: 0,
            back: self.len(),
        }
    }
}

impl<V: PartialEq> ParallelArray<V> {
    /// True when any field of any record equals `value`
    pub fn contains(&self, value: &V) -> bool {
        self.columns.values().any(|column| column.contains(value))
    }

    /// Number of fields across all records equal to `value`
    pub fn count(&self, value: &V) -> usize {
        self.columns
            .values()
            .map(|column| column.iter().filter(|v| *v == value).count())
            .sum()
    }

    /// Removes the first record with a field equal to `value`
    pub fn remove(&mut self, value: &V) -> Option<Vec<V>> {
        let index = self.iter().position(|record| record.contains(&value))?;
        self.remove_at(index).ok()
    }
}

impl<V: Clone> ParallelArray<V> {
    /// Appends clones of every record in `other`
    pub fn append(&mut self, other: &ParallelArray<V>) -> Result<()> {
        let records = other.to_records();
        self.extend_records(records)
    }

    /// The records as owned vectors
    pub fn to_records(&self) -> Vec<Vec<V>> {
        self.iter()
            .map(|record| record.into_iter().cloned().collect())
            .collect()
    }

    /// The columns keyed by name, in declaration order
    pub fn to_columns(&self) -> IndexMap<String, Vec<V>> {
        self.columns.clone()
    }
}

// Column maps compare without regard to order, so compare record by record
impl<V: PartialEq> PartialEq for ParallelArray<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: PartialEq> PartialEq<Vec<Vec<V>>> for ParallelArray<V> {
    fn eq(&self, other: &Vec<Vec<V>>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(record, expected)| record.into_iter().eq(expected.iter()))
    }
}

pub struct Records<'a, V> {
    array: &'a ParallelArray<V>,
    front: usize,
    back: usize,
}

impl<'a, V> Iterator for Records<'a, V> {
    type Item = Record<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let record = self.array.get(self.front);
        self.front += 1;
        record
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back.saturating_sub(self.front);
        (n, Some(n))
    }
}

impl<V> DoubleEndedIterator for Records<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.array.get(self.back)
    }
}

impl<'a, V> IntoIterator for &'a ParallelArray<V> {
    type Item = Record<'a, V>;
    type IntoIter = Records<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Display> fmt::Display for ParallelArray<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, record) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("(")?;
            for (j, value) in record.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", value)?;
            }
            f.write_str(")")?;
        }
        f.write_str("]")
    }
}
