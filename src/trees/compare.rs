use std::{
    fmt::Debug,
    hash::{Hash, Hasher},
};

use xxhash_rust::xxh64::Xxh64;

use super::{BinarySearchTree, BinaryTree, NodeRef, Preorder, Tree};

/// Tree fingerprint
///
/// Preorder walk hashing every node's depth, child slots, key and value. The
/// child slots pin down the shape, so trees holding the same pairs in different
/// arrangements hash differently.
pub(crate) fn fingerprint<K: Hash, V: Hash>(root: Option<NodeRef<K, V>>) -> u64 {
    let mut hasher = Xxh64::new(0);

    for node in Preorder::new(root) {
        node.depth().hash(&mut hasher);
        node.has_left_child().hash(&mut hasher);
        node.has_right_child().hash(&mut hasher);
        node.key().hash(&mut hasher);
        node.value().hash(&mut hasher);
    }

    hasher.finish()
}

impl<K: Hash + PartialEq + Debug, V: Hash> PartialEq for BinaryTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.fingerprint() == other.fingerprint()
    }
}

impl<K: Hash + Ord + Debug, V: Hash> PartialEq for BinarySearchTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.fingerprint() == other.fingerprint()
    }
}
