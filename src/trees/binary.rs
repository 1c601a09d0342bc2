//! Binary trees built from linked [`BinaryNode`]s.

mod node;

use std::{cmp::Ordering, fmt, ops::AddAssign};

use colored::Colorize;
use tracing::{debug, debug_span};

pub use node::{BinaryNode, NodeRef};

use super::{IdGenerator, InOrder, IterNode, Tree, TreeDisplay, UniqueGenerator};
use crate::error::{Error, Result};

/// Node storage shared by the binary trees
pub(crate) struct Nodes<K, V> {
    pub(crate) root: Option<NodeRef<K, V>>,
    pub(crate) size: usize,
    idgen: IdGenerator,
}

impl<K, V> Default for Nodes<K, V> {
    fn default() -> Self {
        Self {
            root: None,
            size: 0,
            idgen: IdGenerator::default(),
        }
    }
}

impl<K, V> Nodes<K, V> {
    /// Creates a node and counts it. The caller links it into the tree.
    pub(crate) fn allocate(&mut self, key: K, value: V) -> NodeRef<K, V> {
        self.size += 1;
        NodeRef::new(self.idgen.generate(), key, value)
    }

    fn clear(&mut self) {
        self.dismantle();
        self.size = 0;
    }

    // Unlink nodes one at a time so that dropping a degenerate tree does not
    // recurse once per level. Nodes still referenced from outside keep their
    // subtrees.
    fn dismantle(&mut self) {
        let mut stack: Vec<_> = self.root.take().into_iter().collect();
        while let Some(node) = stack.pop() {
            if node.is_unique() {
                stack.extend(node.take_children().into_iter().flatten());
            }
        }
    }
}

impl<K, V> Drop for Nodes<K, V> {
    fn drop(&mut self) {
        self.dismantle();
    }
}

fn debug_nodes<K: fmt::Debug, V: fmt::Debug>(
    name: &str,
    root: Option<NodeRef<K, V>>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let nodes: Vec<_> = super::Preorder::new(root)
        .map(IterNode::into_node)
        .collect();
    f.debug_struct(name).field("nodes", &nodes).finish()
}

/// An unordered binary tree.
///
/// Keys only need equality. New keys take the first free child slot in level
/// order, so a tree grown by [`Tree::put`] is always complete. Deleting a key
/// moves the entry of the last node in level order into its place.
pub struct BinaryTree<K, V> {
    pub(crate) nodes: Nodes<K, V>,
}

impl<K, V> Default for BinaryTree<K, V> {
    fn default() -> Self {
        Self {
            nodes: Nodes::default(),
        }
    }
}

impl<K, V> BinaryTree<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// First node, in level order, with a free child slot
    fn first_open_slot(&self) -> Option<NodeRef<K, V>> {
        super::LevelOrder::new(self.nodes.root.clone())
            .find(|node| !node.has_both_children())
            .map(IterNode::into_node)
    }
}

impl<K: PartialEq + fmt::Debug, V> Tree for BinaryTree<K, V> {
    type Key = K;
    type Value = V;

    fn root(&self) -> Option<NodeRef<K, V>> {
        self.nodes.root.clone()
    }

    fn len(&self) -> usize {
        self.nodes.size
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        let _span = debug_span!("BinaryTree::put").entered();

        if let Some(node) = self.find(&key) {
            debug!("{} value of {:?}", "Replacing".yellow(), key);
            return Some(node.replace_value(value));
        }

        let parent = self.first_open_slot();
        let node = self.nodes.allocate(key, value);

        match parent {
            None => {
                debug!("{} root {}", "Inserting".green(), node.id());
                self.nodes.root = Some(node);
            }
            Some(parent) => {
                debug!(
                    "{} node {} under {}",
                    "Inserting".green(),
                    node.id(),
                    parent.id()
                );
                if parent.has_left_child() {
                    parent.set_right(Some(node));
                } else {
                    parent.set_left(Some(node));
                }
            }
        }
        None
    }

    fn find(&self, key: &K) -> Option<NodeRef<K, V>> {
        self.level_order()
            .find(|node| *node.key() == *key)
            .map(IterNode::into_node)
    }

    fn delete(&mut self, key: &K) -> Result<NodeRef<K, V>> {
        let _span = debug_span!("BinaryTree::delete").entered();

        let node = self.find(key).ok_or_else(|| Error::key_not_found(key))?;
        let last = self
            .level_order()
            .last()
            .map(IterNode::into_node)
            .ok_or_else(|| Error::key_not_found(key))?;

        debug!(
            "{} {:?}, moving node {} into node {}",
            "Deleting".red(),
            key,
            last.id(),
            node.id()
        );

        if last.is_root() {
            self.nodes.root = None;
        } else {
            // The last node in level order is always a leaf
            node.swap_entry(&last);
            last.splice_out()?;
        }

        self.nodes.size -= 1;
        Ok(last)
    }
}

/// A binary search tree.
///
/// Every key in a node's left subtree is smaller than the node's key and every
/// key in its right subtree is larger, so an in-order walk visits keys in
/// ascending order.
pub struct BinarySearchTree<K, V> {
    nodes: Nodes<K, V>,
}

impl<K, V> Default for BinarySearchTree<K, V> {
    fn default() -> Self {
        Self {
            nodes: Nodes::default(),
        }
    }
}

impl<K, V> BinarySearchTree<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Node with the smallest key
    pub fn min(&self) -> Option<NodeRef<K, V>> {
        self.nodes.root.as_ref().map(NodeRef::find_min)
    }

    /// Node with the largest key
    pub fn max(&self) -> Option<NodeRef<K, V>> {
        self.nodes.root.as_ref().map(NodeRef::find_max)
    }
}

impl<K: Ord + fmt::Debug, V> Tree for BinarySearchTree<K, V> {
    type Key = K;
    type Value = V;

    fn root(&self) -> Option<NodeRef<K, V>> {
        self.nodes.root.clone()
    }

    fn len(&self) -> usize {
        self.nodes.size
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        let _span = debug_span!("BinarySearchTree::put").entered();

        let Some(mut current) = self.nodes.root.clone() else {
            let node = self.nodes.allocate(key, value);
            debug!("{} root {}", "Inserting".green(), node.id());
            self.nodes.root = Some(node);
            return None;
        };

        loop {
            let ordering = key.cmp(&*current.key());
            let next = match ordering {
                Ordering::Equal => {
                    debug!("{} value of {:?}", "Replacing".yellow(), key);
                    return Some(current.replace_value(value));
                }
                Ordering::Less => current.left(),
                Ordering::Greater => current.right(),
            };

            match next {
                Some(next) => current = next,
                None => {
                    let node = self.nodes.allocate(key, value);
                    debug!(
                        "{} node {} under {}",
                        "Inserting".green(),
                        node.id(),
                        current.id()
                    );
                    if ordering == Ordering::Less {
                        current.set_left(Some(node));
                    } else {
                        current.set_right(Some(node));
                    }
                    return None;
                }
            }
        }
    }

    fn find(&self, key: &K) -> Option<NodeRef<K, V>> {
        let mut current = self.nodes.root.clone();
        while let Some(node) = current {
            let ordering = key.cmp(&*node.key());
            current = match ordering {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    fn delete(&mut self, key: &K) -> Result<NodeRef<K, V>> {
        let _span = debug_span!("BinarySearchTree::delete").entered();

        let node = self.find(key).ok_or_else(|| Error::key_not_found(key))?;
        debug!("{} {:?} from node {}", "Deleting".red(), key, node.id());

        let removed = match node.children() {
            [Some(_), Some(right)] => {
                // The successor has no left child, so it can always be spliced out
                let successor = right.find_min();
                debug!("Replacing with successor {}", successor.id());
                successor.splice_out()?;
                node.swap_entry(&successor);
                successor
            }
            [Some(child), None] | [None, Some(child)] if node.is_root() => {
                node.take_children();
                self.nodes.root = Some(child);
                node
            }
            [None, None] if node.is_root() => {
                self.nodes.root = None;
                node
            }
            _ => {
                node.splice_out()?;
                node
            }
        };

        self.nodes.size -= 1;
        Ok(removed)
    }
}

macro_rules! impl_common {
    ($tree:ident, $($bound:tt)+) => {
        impl<K: $($bound)+ + fmt::Debug + Clone, V: Clone> AddAssign<&$tree<K, V>> for $tree<K, V> {
            fn add_assign(&mut self, rhs: &$tree<K, V>) {
                self.merge(rhs);
            }
        }

        impl<K: $($bound)+ + fmt::Debug, V> Extend<(K, V)> for $tree<K, V> {
            fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
                for (key, value) in iter {
                    self.put(key, value);
                }
            }
        }

        impl<K: $($bound)+ + fmt::Debug, V> FromIterator<(K, V)> for $tree<K, V> {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                let mut tree = Self::new();
                tree.extend(iter);
                tree
            }
        }

        impl<'a, K, V> IntoIterator for &'a $tree<K, V> {
            type Item = IterNode<K, V>;
            type IntoIter = InOrder<K, V>;

            fn into_iter(self) -> Self::IntoIter {
                InOrder::new(self.nodes.root.clone())
            }
        }

        impl<K: fmt::Display, V: fmt::Display> fmt::Display for $tree<K, V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                TreeDisplay::format(self.nodes.root.clone(), f, |key, value, f| {
                    write!(f, "{}: {}", key, value)
                })
            }
        }

        impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for $tree<K, V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                debug_nodes(stringify!($tree), self.nodes.root.clone(), f)
            }
        }
    };
}

impl_common!(BinaryTree, PartialEq);
impl_common!(BinarySearchTree, Ord);
