use std::{
    cell::{Ref, RefCell, RefMut},
    rc::{Rc, Weak},
};

use tracing::trace;

use crate::{
    error::{Error, Result},
    trees::NodeId,
};

/// A node of a binary tree: a key/value pair plus links to at most two children
/// and its parent. Children are owned, the parent link is weak.
pub struct BinaryNode<K, V> {
    id: NodeId,
    key: K,
    value: V,
    left: Option<NodeRef<K, V>>,
    right: Option<NodeRef<K, V>>,
    parent: Weak<RefCell<BinaryNode<K, V>>>,
}

/// Shared handle to a [`BinaryNode`].
///
/// Handles are cheap to clone and compare by identity: two handles are equal when
/// they point at the same node.
pub struct NodeRef<K, V> {
    node_ref: Rc<RefCell<BinaryNode<K, V>>>,
}

impl<K, V> Clone for NodeRef<K, V> {
    fn clone(&self) -> Self {
        Self {
            node_ref: self.node_ref.clone(),
        }
    }
}

impl<K, V> PartialEq for NodeRef<K, V> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node_ref, &other.node_ref)
    }
}

impl<K, V> Eq for NodeRef<K, V> {}

impl<K, V> NodeRef<K, V> {
    pub(crate) fn new(id: NodeId, key: K, value: V) -> Self {
        trace!("Created node {}", id);
        Self {
            node_ref: Rc::new(RefCell::new(BinaryNode {
                id,
                key,
                value,
                left: None,
                right: None,
                parent: Weak::new(),
            })),
        }
    }

    fn node(&self) -> Ref<'_, BinaryNode<K, V>> {
        self.node_ref.borrow()
    }

    fn node_mut(&self) -> RefMut<'_, BinaryNode<K, V>> {
        self.node_ref.borrow_mut()
    }

    pub fn id(&self) -> NodeId {
        self.node().id
    }

    pub fn key(&self) -> Ref<'_, K> {
        Ref::map(self.node(), |node| &node.key)
    }

    pub fn value(&self) -> Ref<'_, V> {
        Ref::map(self.node(), |node| &node.value)
    }

    pub fn value_mut(&self) -> RefMut<'_, V> {
        RefMut::map(self.node_mut(), |node| &mut node.value)
    }

    /// Stores `value` in this node and returns the previous value
    pub fn replace_value(&self, value: V) -> V {
        std::mem::replace(&mut self.node_mut().value, value)
    }

    /// Takes the key and value out of a node no other handle refers to
    pub fn into_inner(self) -> Option<(K, V)> {
        Rc::try_unwrap(self.node_ref).ok().map(|cell| {
            let node = cell.into_inner();
            (node.key, node.value)
        })
    }

    pub fn parent(&self) -> Option<NodeRef<K, V>> {
        self.node()
            .parent
            .upgrade()
            .map(|node_ref| NodeRef { node_ref })
    }

    pub fn left(&self) -> Option<NodeRef<K, V>> {
        self.node().left.clone()
    }

    pub fn right(&self) -> Option<NodeRef<K, V>> {
        self.node().right.clone()
    }

    /// Both child slots, left then right
    pub fn children(&self) -> [Option<NodeRef<K, V>>; 2] {
        let node = self.node();
        [node.left.clone(), node.right.clone()]
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.upgrade().is_none()
    }

    pub fn is_leaf(&self) -> bool {
        !self.has_children()
    }

    pub fn has_children(&self) -> bool {
        let node = self.node();
        node.left.is_some() || node.right.is_some()
    }

    pub fn has_left_child(&self) -> bool {
        self.node().left.is_some()
    }

    pub fn has_right_child(&self) -> bool {
        self.node().right.is_some()
    }

    pub fn has_both_children(&self) -> bool {
        let node = self.node();
        node.left.is_some() && node.right.is_some()
    }

    pub fn is_left_child(&self) -> bool {
        self.parent()
            .and_then(|parent| parent.left())
            .map(|left| left == *self)
            .unwrap_or(false)
    }

    pub fn is_right_child(&self) -> bool {
        self.parent()
            .and_then(|parent| parent.right())
            .map(|right| right == *self)
            .unwrap_or(false)
    }

    /// Number of edges between this node and the root
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent();
        while let Some(node) = current {
            depth += 1;
            current = node.parent();
        }
        depth
    }

    /// Replaces the left child, adopting the new child and orphaning the old one
    pub(crate) fn set_left(&self, child: Option<NodeRef<K, V>>) -> Option<NodeRef<K, V>> {
        if let Some(child) = &child {
            child.node_mut().parent = Rc::downgrade(&self.node_ref);
        }
        let old = std::mem::replace(&mut self.node_mut().left, child);
        if let Some(old) = &old {
            old.orphan();
        }
        old
    }

    /// Replaces the right child, adopting the new child and orphaning the old one
    pub(crate) fn set_right(&self, child: Option<NodeRef<K, V>>) -> Option<NodeRef<K, V>> {
        if let Some(child) = &child {
            child.node_mut().parent = Rc::downgrade(&self.node_ref);
        }
        let old = std::mem::replace(&mut self.node_mut().right, child);
        if let Some(old) = &old {
            old.orphan();
        }
        old
    }

    fn orphan(&self) {
        self.node_mut().parent = Weak::new();
    }

    /// Take both children out of this node, leaving it a leaf
    pub(crate) fn take_children(&self) -> [Option<NodeRef<K, V>>; 2] {
        let children = {
            let mut node = self.node_mut();
            [node.left.take(), node.right.take()]
        };
        children.iter().flatten().for_each(NodeRef::orphan);
        children
    }

    pub(crate) fn is_unique(&self) -> bool {
        Rc::strong_count(&self.node_ref) == 1
    }

    /// Overwrites the key and value of this node. Children given as `Some` replace
    /// the current ones and are reparented to this node.
    ///
    /// Changing the key of a node inside a search tree can break its ordering.
    pub fn update(
        &self,
        key: K,
        value: V,
        left: Option<NodeRef<K, V>>,
        right: Option<NodeRef<K, V>>,
    ) {
        {
            let mut node = self.node_mut();
            node.key = key;
            node.value = value;
        }
        if left.is_some() {
            self.set_left(left);
        }
        if right.is_some() {
            self.set_right(right);
        }
    }

    /// Exchanges key and value with `other`, leaving both nodes in place
    pub(crate) fn swap_entry(&self, other: &NodeRef<K, V>) {
        if self == other {
            return;
        }
        let mut a = self.node_mut();
        let mut b = other.node_mut();
        std::mem::swap(&mut a.key, &mut b.key);
        std::mem::swap(&mut a.value, &mut b.value);
    }

    /// Removes this node from its tree, linking its only child (if any) to its
    /// parent in its place.
    ///
    /// Roots and nodes with two children cannot be spliced out. The owning tree's
    /// length is left untouched, use [`crate::trees::Tree::delete`] to keep it.
    pub fn splice_out(&self) -> Result<()> {
        let parent = self
            .parent()
            .ok_or(Error::InvalidSplice("node is the root"))?;
        if self.has_both_children() {
            return Err(Error::InvalidSplice("node has two children"));
        }

        let [left, right] = self.take_children();
        let child = left.or(right);

        trace!(
            "Splicing out node {} from parent {}",
            self.id(),
            parent.id()
        );

        if self.is_left_child() {
            parent.set_left(child);
        } else {
            parent.set_right(child);
        }
        Ok(())
    }

    /// The leftmost node of this subtree
    pub fn find_min(&self) -> NodeRef<K, V> {
        let mut current = self.clone();
        while let Some(left) = current.left() {
            current = left;
        }
        current
    }

    /// The rightmost node of this subtree
    pub fn find_max(&self) -> NodeRef<K, V> {
        let mut current = self.clone();
        while let Some(right) = current.right() {
            current = right;
        }
        current
    }

    /// The next node of an in-order walk over the whole tree
    pub fn find_successor(&self) -> Option<NodeRef<K, V>> {
        if let Some(right) = self.right() {
            return Some(right.find_min());
        }
        let mut current = self.clone();
        while current.is_right_child() {
            current = current.parent()?;
        }
        current.parent()
    }

    /// The previous node of an in-order walk over the whole tree
    pub fn find_predecessor(&self) -> Option<NodeRef<K, V>> {
        if let Some(left) = self.left() {
            return Some(left.find_max());
        }
        let mut current = self.clone();
        while current.is_left_child() {
            current = current.parent()?;
        }
        current.parent()
    }
}

impl<K, V: std::fmt::Display> std::fmt::Display for NodeRef<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for NodeRef<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Ok(node) = self.node_ref.try_borrow() else {
            return f.write_str("BinaryNode { <borrowed> }");
        };

        let parent_id = node
            .parent
            .upgrade()
            .map(|node_ref| NodeRef { node_ref }.id());
        let child_ids = [&node.left, &node.right].map(|child| child.as_ref().map(NodeRef::id));

        f.debug_struct("BinaryNode")
            .field("id", &node.id)
            .field("key", &node.key)
            .field("value", &node.value)
            .field("parent_id", &parent_id)
            .field("child_ids", &child_ids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: NodeId, key: i32) -> NodeRef<i32, String> {
        NodeRef::new(id, key, format!("n{}", key))
    }

    /// 5 -> (3 -> (1, 4), 7)
    fn fixture() -> NodeRef<i32, String> {
        let root = node(0, 5);
        let three = node(1, 3);
        three.set_left(Some(node(2, 1)));
        three.set_right(Some(node(3, 4)));
        root.set_left(Some(three));
        root.set_right(Some(node(4, 7)));
        root
    }

    #[test]
    fn test_relations() {
        let root = fixture();
        let three = root.left().unwrap();
        assert!(root.is_root());
        assert!(!three.is_root());
        assert!(three.is_left_child());
        assert!(!three.is_right_child());
        assert!(three.has_both_children());
        assert!(root.right().unwrap().is_right_child());
        assert!(root.right().unwrap().is_leaf());
        assert_eq!(three.parent(), Some(root.clone()));
        assert_eq!(three.left().unwrap().depth(), 2);
        assert_ne!(root, three);
    }

    #[test]
    fn test_str() {
        let root = fixture();
        assert_eq!(root.to_string(), "n5");
        assert_eq!(*root.key(), 5);
    }

    #[test]
    fn test_update_with_children() {
        let root = fixture();
        let replacement = node(9, 6);
        root.update(5, "new root".into(), None, Some(replacement.clone()));
        assert_eq!(*root.value(), "new root");
        assert_eq!(root.right(), Some(replacement.clone()));
        assert_eq!(replacement.parent(), Some(root.clone()));
        // The untouched left child survives
        assert_eq!(*root.left().unwrap().key(), 3);
    }

    #[test]
    fn test_find_min_max_successor() {
        let root = fixture();
        let three = root.left().unwrap();
        let four = three.right().unwrap();

        assert_eq!(*root.find_min().key(), 1);
        assert_eq!(*root.find_max().key(), 7);
        assert_eq!(*three.find_successor().unwrap().key(), 4);
        assert_eq!(*four.find_successor().unwrap().key(), 5);
        assert!(root.find_max().find_successor().is_none());
        assert_eq!(*four.find_predecessor().unwrap().key(), 3);
        assert!(root.find_min().find_predecessor().is_none());
    }

    #[test]
    fn test_splice_leaf() {
        let root = fixture();
        let seven = root.right().unwrap();
        seven.splice_out().unwrap();
        assert!(!root.has_right_child());
        assert!(seven.is_root());
    }

    #[test]
    fn test_splice_edges() {
        let root = fixture();
        let three = root.left().unwrap();
        three.set_right(None);
        three.splice_out().unwrap();
        assert_eq!(*root.left().unwrap().key(), 1);
        assert_eq!(root.left().unwrap().parent(), Some(root.clone()));

        assert_eq!(
            root.splice_out(),
            Err(Error::InvalidSplice("node is the root"))
        );
    }

    #[test]
    fn test_splice_two_children() {
        let root = fixture();
        assert_eq!(
            root.left().unwrap().splice_out(),
            Err(Error::InvalidSplice("node has two children"))
        );
    }

    #[test]
    fn test_into_inner() {
        let root = fixture();
        let seven = root.set_right(None).unwrap();
        assert_eq!(seven.into_inner(), Some((7, "n7".to_string())));
        assert!(root.into_inner().is_some());
    }
}
