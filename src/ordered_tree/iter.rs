use crate::arena::Handle;
use crate::binary_tree::{BinaryTree, VertexRef};
use crate::ordered_tree::strategy::Strategy;
use crate::ordered_tree::tree::OrderedTree;

/// An iterator for `OrderedTree<T, S>`.
///
/// This iterator traverses the elements of the tree in-order and yields immutable references. It
/// keeps a stack of the ancestors still to be visited on the way down the current left spine, so
/// it holds `O(height)` handles at a time. The iterator borrows the tree, so the tree cannot be
/// mutated while it is alive; a fresh traversal starts from a fresh iterator.
pub struct Iter<'a, T> {
    tree: &'a BinaryTree<T>,
    stack: Vec<Handle>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a BinaryTree<T>) -> Self {
        let mut iter = Iter {
            tree,
            stack: Vec::new(),
        };
        iter.push_left_spine(tree.root_handle());
        iter
    }

    fn push_left_spine(&mut self, mut curr: Option<Handle>) {
        while let Some(handle) = curr {
            self.stack.push(handle);
            curr = self.tree.left_of(handle);
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        let tree = self.tree;
        self.push_left_spine(tree.right_of(handle));
        Some(tree.node(handle).element())
    }
}

fn pre_order<'a, T, F>(tree: &'a BinaryTree<T>, curr: Option<Handle>, action: &mut F)
where
    F: FnMut(VertexRef<'a, T>),
{
    if let Some(handle) = curr {
        action(VertexRef::new(tree, handle));
        pre_order(tree, tree.left_of(handle), action);
        pre_order(tree, tree.right_of(handle), action);
    }
}

fn in_order<'a, T, F>(tree: &'a BinaryTree<T>, curr: Option<Handle>, action: &mut F)
where
    F: FnMut(VertexRef<'a, T>),
{
    if let Some(handle) = curr {
        in_order(tree, tree.left_of(handle), action);
        action(VertexRef::new(tree, handle));
        in_order(tree, tree.right_of(handle), action);
    }
}

fn post_order<'a, T, F>(tree: &'a BinaryTree<T>, curr: Option<Handle>, action: &mut F)
where
    F: FnMut(VertexRef<'a, T>),
{
    if let Some(handle) = curr {
        post_order(tree, tree.left_of(handle), action);
        post_order(tree, tree.right_of(handle), action);
        action(VertexRef::new(tree, handle));
    }
}

impl<T, S> OrderedTree<T, S>
where
    S: Strategy,
{
    /// Applies `action` to every vertex, visiting a vertex before its left and right subtrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::ordered_tree::BstTree;
    ///
    /// let tree: BstTree<u32> = vec![2, 1, 3].into_iter().collect();
    /// let mut visited = Vec::new();
    /// tree.dfs_pre_order(|vertex| visited.push(*vertex.get()));
    /// assert_eq!(visited, vec![2, 1, 3]);
    /// ```
    pub fn dfs_pre_order<'a, F>(&'a self, mut action: F)
    where
        F: FnMut(VertexRef<'a, T>),
    {
        let tree = self.as_binary_tree();
        pre_order(tree, tree.root_handle(), &mut action);
    }

    /// Applies `action` to every vertex in ascending order of elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::ordered_tree::BstTree;
    ///
    /// let tree: BstTree<u32> = vec![2, 1, 3].into_iter().collect();
    /// let mut visited = Vec::new();
    /// tree.dfs_in_order(|vertex| visited.push(*vertex.get()));
    /// assert_eq!(visited, vec![1, 2, 3]);
    /// ```
    pub fn dfs_in_order<'a, F>(&'a self, mut action: F)
    where
        F: FnMut(VertexRef<'a, T>),
    {
        let tree = self.as_binary_tree();
        in_order(tree, tree.root_handle(), &mut action);
    }

    /// Applies `action` to every vertex, visiting both subtrees of a vertex before the vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::ordered_tree::BstTree;
    ///
    /// let tree: BstTree<u32> = vec![2, 1, 3].into_iter().collect();
    /// let mut visited = Vec::new();
    /// tree.dfs_post_order(|vertex| visited.push(*vertex.get()));
    /// assert_eq!(visited, vec![1, 3, 2]);
    /// ```
    pub fn dfs_post_order<'a, F>(&'a self, mut action: F)
    where
        F: FnMut(VertexRef<'a, T>),
    {
        let tree = self.as_binary_tree();
        post_order(tree, tree.root_handle(), &mut action);
    }
}
