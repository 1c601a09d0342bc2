//! Trees of key/value nodes.
//!
//! Every tree implements [`Tree`], which provides lookups, deletion, the four
//! classic traversals and a content fingerprint on top of a handful of required
//! methods. The concrete trees live in [`binary`].

mod builder;
mod compare;
mod display;
mod id;
mod iterator;

pub mod binary;

use std::hash::Hash;

pub use binary::{BinarySearchTree, BinaryTree, NodeRef};
pub use builder::{NodeBuilder, TreeBuilder};
pub use display::TreeDisplay;
pub use id::{NodeId, SequentialIds, UniqueGenerator};
pub use iterator::{InOrder, IterNode, LevelOrder, Postorder, Preorder};

use crate::error::Result;

pub type IdGenerator = SequentialIds;

/// The common interface of trees mapping keys to values
pub trait Tree {
    type Key;
    type Value;

    /// Root node, `None` for an empty tree
    fn root(&self) -> Option<NodeRef<Self::Key, Self::Value>>;

    /// Number of nodes
    fn len(&self) -> usize;

    /// Stores `value` under `key`, returning the value it replaced
    fn put(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

    /// Node holding `key`
    fn find(&self, key: &Self::Key) -> Option<NodeRef<Self::Key, Self::Value>>;

    /// Removes `key` from the tree and returns the detached node carrying its
    /// key and value.
    ///
    /// Fails with [`crate::Error::KeyNotFound`] if `key` is not stored.
    fn delete(&mut self, key: &Self::Key) -> Result<NodeRef<Self::Key, Self::Value>>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, key: &Self::Key) -> bool {
        self.find(key).is_some()
    }

    /// Copy of the value stored under `key`
    fn get(&self, key: &Self::Key) -> Option<Self::Value>
    where
        Self::Value: Clone,
    {
        self.find(key).map(|node| node.value().clone())
    }

    fn get_or(&self, key: &Self::Key, default: Self::Value) -> Self::Value
    where
        Self::Value: Clone,
    {
        self.get(key).unwrap_or(default)
    }

    fn preorder(&self) -> Preorder<Self::Key, Self::Value> {
        Preorder::new(self.root())
    }

    fn in_order(&self) -> InOrder<Self::Key, Self::Value> {
        InOrder::new(self.root())
    }

    fn postorder(&self) -> Postorder<Self::Key, Self::Value> {
        Postorder::new(self.root())
    }

    fn level_order(&self) -> LevelOrder<Self::Key, Self::Value> {
        LevelOrder::new(self.root())
    }

    /// xxh64 digest of the tree's shape, keys and values
    fn fingerprint(&self) -> u64
    where
        Self::Key: Hash,
        Self::Value: Hash,
    {
        compare::fingerprint(self.root())
    }

    /// Puts every pair of `other`, in preorder
    fn merge<T>(&mut self, other: &T)
    where
        T: Tree<Key = Self::Key, Value = Self::Value>,
        Self::Key: Clone,
        Self::Value: Clone,
    {
        for node in other.preorder() {
            let key = node.key().clone();
            let value = node.value().clone();
            self.put(key, value);
        }
    }
}
