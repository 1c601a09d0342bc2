use std::{collections::VecDeque, ops::Deref};

use super::NodeRef;

/// A node yielded by a traversal together with its depth below the root
pub struct IterNode<K, V> {
    depth: usize,
    node: NodeRef<K, V>,
}

impl<K, V> IterNode<K, V> {
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_node(self) -> NodeRef<K, V> {
        self.node
    }
}

impl<K, V> Deref for IterNode<K, V> {
    type Target = NodeRef<K, V>;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

/// Node, left subtree, right subtree
pub struct Preorder<K, V> {
    stack: VecDeque<(usize, NodeRef<K, V>)>,
}

impl<K, V> Preorder<K, V> {
    pub fn new(root: Option<NodeRef<K, V>>) -> Self {
        Self {
            stack: root.map(|node| (0, node)).into_iter().collect(),
        }
    }
}

impl<K, V> Iterator for Preorder<K, V> {
    type Item = IterNode<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop_front()?;

        node.children()
            .into_iter()
            .rev()
            .flatten()
            .for_each(|child| self.stack.push_front((depth + 1, child)));

        Some(IterNode { depth, node })
    }
}

/// Left subtree, node, right subtree
pub struct InOrder<K, V> {
    stack: VecDeque<(usize, NodeRef<K, V>)>,
    current: Option<(usize, NodeRef<K, V>)>,
}

impl<K, V> InOrder<K, V> {
    pub fn new(root: Option<NodeRef<K, V>>) -> Self {
        Self {
            stack: VecDeque::new(),
            current: root.map(|node| (0, node)),
        }
    }
}

impl<K, V> Iterator for InOrder<K, V> {
    type Item = IterNode<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        // Descend to the leftmost unvisited node
        while let Some((depth, node)) = self.current.take() {
            self.current = node.left().map(|left| (depth + 1, left));
            self.stack.push_front((depth, node));
        }

        let (depth, node) = self.stack.pop_front()?;
        self.current = node.right().map(|right| (depth + 1, right));
        Some(IterNode { depth, node })
    }
}

/// Left subtree, right subtree, node
pub struct Postorder<K, V> {
    // The flag is set once a node's children have been queued
    stack: VecDeque<(usize, NodeRef<K, V>, bool)>,
}

impl<K, V> Postorder<K, V> {
    pub fn new(root: Option<NodeRef<K, V>>) -> Self {
        Self {
            stack: root.map(|node| (0, node, false)).into_iter().collect(),
        }
    }
}

impl<K, V> Iterator for Postorder<K, V> {
    type Item = IterNode<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (depth, node, expanded) = self.stack.pop_front()?;
            if expanded || node.is_leaf() {
                return Some(IterNode { depth, node });
            }

            let children = node.children();
            self.stack.push_front((depth, node, true));
            children
                .into_iter()
                .rev()
                .flatten()
                .for_each(|child| self.stack.push_front((depth + 1, child, false)));
        }
    }
}

/// Breadth first, left to right within a depth
pub struct LevelOrder<K, V> {
    queue: VecDeque<(usize, NodeRef<K, V>)>,
}

impl<K, V> LevelOrder<K, V> {
    pub fn new(root: Option<NodeRef<K, V>>) -> Self {
        Self {
            queue: root.map(|node| (0, node)).into_iter().collect(),
        }
    }
}

impl<K, V> Iterator for LevelOrder<K, V> {
    type Item = IterNode<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.queue.pop_front()?;

        node.children()
            .into_iter()
            .flatten()
            .for_each(|child| self.queue.push_back((depth + 1, child)));

        Some(IterNode { depth, node })
    }
}
