//! # Structs
//!
//! Data structures that complement the standard collections.
//!
//! ## Overview
//!
//! - [`arrays`]: lists with a bidirectional cursor, packed bit arrays, sorted,
//!   circular, parallel and self-organizing lists.
//! - [`maps`]: an ordered dictionary with merging, a one-to-one bidirectional map
//!   and a multi-value map.
//! - [`trees`]: a level-filled binary tree and a binary search tree sharing the
//!   [`trees::Tree`] interface, with traversals, fingerprints and a builder.
//!
//! Fallible operations return [`Result`] with the crate-wide [`Error`]. Structural
//! changes are logged through `tracing`, the crate never installs a subscriber.

pub mod arrays;
pub mod cursor;
pub mod error;
pub mod maps;
pub mod trees;

pub use arrays::{
    BaseList, BitArray, CircularArray, OrganizedList, ParallelArray, SortedList,
};
pub use cursor::{next, prev, Cursor};
pub use error::{Error, Result};
pub use maps::{BiDirectionalMap, Dict, MultiMap};
pub use trees::{BinarySearchTree, BinaryTree, NodeRef, Tree, TreeBuilder};
