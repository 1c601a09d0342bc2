//! Builders for constructing binary trees of any shape.
//!
//! [`Tree::put`] decides where a new key goes. The `TreeBuilder` and `NodeBuilder`
//! types instead place every node explicitly, by nesting closures that add the
//! left and right children of the node they are given.

use std::{fmt::Debug, marker::PhantomData};

use tracing::{debug, debug_span};

use super::{BinaryTree, NodeRef, Tree};
use crate::error::Error;

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// A builder for the children of one node.
///
/// It is handed to the closures given to [`TreeBuilder::root`],
/// [`NodeBuilder::left`] and [`NodeBuilder::right`].
pub struct NodeBuilder<'a, K, V, E = Error> {
    // NodeRef of this node
    node_ref: NodeRef<K, V>,
    // Tree under construction, used for key lookups and node allocation
    tree: &'a mut BinaryTree<K, V>,

    depth: usize,

    _phantom: PhantomData<E>,
}

impl<'a, K, V, E> NodeBuilder<'a, K, V, E>
where
    K: PartialEq + Debug,
    E: From<Error>,
{
    /// Adds a left child to the current node.
    ///
    /// # Arguments
    ///
    /// * `key`, `value`: The entry of the child node.
    /// * `f`: A closure that takes the child builder and adds its own children.
    pub fn left<F>(&mut self, key: K, value: V, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut NodeBuilder<'_, K, V, E>) -> Result<(), E>,
    {
        self.child(Side::Left, key, value, f)
    }

    /// Adds a right child to the current node. See [`NodeBuilder::left`].
    pub fn right<F>(&mut self, key: K, value: V, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut NodeBuilder<'_, K, V, E>) -> Result<(), E>,
    {
        self.child(Side::Right, key, value, f)
    }

    fn child<F>(&mut self, side: Side, key: K, value: V, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut NodeBuilder<'_, K, V, E>) -> Result<(), E>,
    {
        let occupied = match side {
            Side::Left => self.node_ref.has_left_child(),
            Side::Right => self.node_ref.has_right_child(),
        };
        if occupied {
            return Err(Error::SlotOccupied(side.name()).into());
        }
        if self.tree.contains(&key) {
            return Err(Error::DuplicateKey(format!("{:?}", key)).into());
        }

        let child = self.tree.nodes.allocate(key, value);
        debug!(
            "Added {} child {} of {} at depth {}",
            side.name(),
            child.id(),
            self.node_ref.id(),
            self.depth + 1
        );

        match side {
            Side::Left => self.node_ref.set_left(Some(child.clone())),
            Side::Right => self.node_ref.set_right(Some(child.clone())),
        };

        let mut node_builder = NodeBuilder {
            node_ref: child,
            tree: &mut *self.tree,
            depth: self.depth + 1,
            _phantom: PhantomData,
        };

        // Call the supplied closure with the NodeBuilder to add this node's children
        f(&mut node_builder)
    }

    pub fn node(&self) -> &NodeRef<K, V> {
        &self.node_ref
    }

    /// Depth of the node being built, the root is at 0
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// A builder for constructing binary trees.
///
/// The `root` method adds the root node and calls the provided closure with a
/// [`NodeBuilder`] that adds its children, recursively. The closures return
/// `Result<(), E>` where `E` is your error type, so errors inside them propagate.
/// Builder errors (a duplicate key or a child slot filled twice) are converted
/// into `E` with `From<Error>`.
///
/// # Examples
///
/// ```
/// use structs::trees::{Tree, TreeBuilder};
///
/// let tree = TreeBuilder::<i32, &str>::new()
///     .root(8, "root", |root| {
///         root.left(4, "left", |left| left.right(6, "left right", |_| Ok(())))?;
///         root.right(10, "right", |_| Ok(()))
///     })?
///     .done();
///
/// assert_eq!(tree.len(), 4);
/// # Ok::<(), structs::Error>(())
/// ```
pub struct TreeBuilder<K, V, E = Error> {
    tree: BinaryTree<K, V>,
    debug_span: tracing::Span,
    _phantom: PhantomData<E>,
}

impl<K, V, E> Default for TreeBuilder<K, V, E> {
    fn default() -> Self {
        let debug_span = debug_span!("TreeBuilder");
        debug_span.in_scope(|| debug!("Created new TreeBuilder"));

        Self {
            tree: BinaryTree::new(),
            debug_span,
            _phantom: PhantomData,
        }
    }
}

impl<K, V, E> TreeBuilder<K, V, E>
where
    K: PartialEq + Debug,
    E: From<Error>,
{
    /// Creates a new `TreeBuilder` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the constructed tree when finished building it. A builder without
    /// a root gives an empty tree.
    pub fn done(self) -> BinaryTree<K, V> {
        self.debug_span.in_scope(|| {
            debug!("Finished building tree of {} nodes", self.tree.len());
        });
        self.tree
    }

    /// Adds a root node to the tree and returns the updated builder.
    ///
    /// # Arguments
    ///
    /// * `key`, `value`: The entry of the root node.
    /// * `f`: A closure that takes the root builder and adds its own children.
    pub fn root<F>(mut self, key: K, value: V, f: F) -> Result<Self, E>
    where
        F: FnOnce(&mut NodeBuilder<'_, K, V, E>) -> Result<(), E>,
    {
        let debug_span = self.debug_span.clone();
        let _enter = debug_span.enter();

        if self.tree.root().is_some() {
            return Err(Error::SlotOccupied("root").into());
        }

        let node_ref = self.tree.nodes.allocate(key, value);
        debug!("Added root {}", node_ref.id());
        self.tree.nodes.root = Some(node_ref.clone());

        let mut node_builder = NodeBuilder {
            node_ref,
            tree: &mut self.tree,
            depth: 0,
            _phantom: PhantomData,
        };

        // Call the supplied closure with the NodeBuilder to add this node's children
        f(&mut node_builder)?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[derive(Debug, PartialEq)]
    enum MyError {
        Build(Error),
        Fail(String),
    }

    impl From<Error> for MyError {
        fn from(error: Error) -> Self {
            MyError::Build(error)
        }
    }

    #[traced_test]
    #[test]
    fn test_builder() {
        let tree = TreeBuilder::<&str, u32, MyError>::new()
            .root("foo", 0, |foo| {
                foo.left("bar", 1, |bar| {
                    assert_eq!(bar.depth(), 1);
                    bar.right("baz", 2, |baz| {
                        assert_eq!(baz.depth(), 2);
                        Ok(())
                    })
                })?;
                foo.right("hello", 3, |_| Ok(()))?;

                Ok(())
            })
            .unwrap()
            .done();

        assert_eq!(tree.len(), 4);
        let keys: Vec<_> = tree.preorder().map(|node| *node.key()).collect();
        assert_eq!(keys, vec!["foo", "bar", "baz", "hello"]);

        // Not level filled: bar has only a right child
        let bar = tree.find(&"bar").unwrap();
        assert!(!bar.has_left_child());
        assert!(bar.has_right_child());

        assert!(logs_contain("Added root"));
        assert!(logs_contain("Finished building tree of 4 nodes"));
    }

    #[test]
    fn test_duplicate_key() {
        let result = TreeBuilder::<i32, &str>::new().root(1, "root", |root| {
            root.left(2, "left", |left| left.left(1, "again", |_| Ok(())))
        });
        assert_eq!(result.err(), Some(Error::DuplicateKey("1".into())));
    }

    #[test]
    fn test_slot_occupied() {
        let result = TreeBuilder::<i32, &str>::new().root(1, "root", |root| {
            root.right(2, "right", |_| Ok(()))?;
            root.right(3, "right again", |_| Ok(()))
        });
        assert_eq!(result.err(), Some(Error::SlotOccupied("right")));

        let result = TreeBuilder::<i32, &str>::new()
            .root(1, "root", |_| Ok(()))
            .and_then(|builder| builder.root(2, "second root", |_| Ok(())));
        assert_eq!(result.err(), Some(Error::SlotOccupied("root")));
    }

    #[test]
    fn test_closure_error() {
        let result = TreeBuilder::<i32, &str, MyError>::new().root(1, "root", |root| {
            root.left(0, "left", |_| Err(MyError::Fail("stop".into())))
        });
        assert_eq!(result.err(), Some(MyError::Fail("stop".into())));
    }

    #[test]
    fn test_put_after_build() {
        let mut tree = TreeBuilder::<i32, &str>::new()
            .root(1, "root", |root| root.right(3, "right", |_| Ok(())))
            .unwrap()
            .done();

        // The first open slot in level order is the root's left
        tree.put(2, "left");
        assert_eq!(*tree.root().unwrap().left().unwrap().key(), 2);
    }

    #[test]
    fn test_empty() {
        let tree = TreeBuilder::<i32, i32>::new().done();
        assert!(tree.is_empty());
    }
}
