//! Error types shared by every collection in the crate

use thiserror::Error;

/// Errors returned by fallible collection operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Lookup or deletion of a key that is not stored
    #[error("Key error: {0} not found")]
    KeyNotFound(String),

    /// Positional access past the end of a collection
    #[error("Index error: index {index} out of range for length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Length of the collection
        len: usize,
    },

    /// A record whose field count does not match the parallel array's columns
    #[error("Arity error: expected {expected} fields, got {got}")]
    ArityMismatch {
        /// Number of columns
        expected: usize,
        /// Number of fields supplied
        got: usize,
    },

    /// A parallel array was declared without any column
    #[error("A parallel array needs at least one column")]
    NoColumns,

    /// A column name was declared twice
    #[error("Duplicate column {0}")]
    DuplicateColumn(String),

    /// Numeric conversion of a bit array that does not fit the target type
    #[error("Overflow: {bits} significant bits do not fit in {target}")]
    Overflow {
        /// Significant bits in the bit array
        bits: usize,
        /// Name of the target type
        target: &'static str,
    },

    /// A node cannot be spliced out of its tree
    #[error("Cannot splice node: {0}")]
    InvalidSplice(&'static str),

    /// A builder tried to fill a child slot that is already taken
    #[error("Child slot already occupied: {0}")]
    SlotOccupied(&'static str),

    /// A builder received a key that already exists in the tree
    #[error("Duplicate key {0}")]
    DuplicateKey(String),
}

/// Result type alias for collection operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn key_not_found(key: &impl std::fmt::Debug) -> Self {
        Error::KeyNotFound(format!("{:?}", key))
    }
}
