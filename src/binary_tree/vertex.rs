use crate::arena::Handle;
use crate::binary_tree::node::{Color, Payload, Vertex};
use crate::binary_tree::tree::BinaryTree;
use crate::error::{Error, Result};
use std::cmp;
use std::fmt;

/// A read-only view of a vertex inside a tree, used to navigate the tree.
///
/// Navigating to a missing parent or child fails with `Error::NotFound`, so callers can either
/// test with `has_parent`, `has_left`, and `has_right` first or handle the error.
///
/// # Examples
///
/// ```
/// use ordered_trees::ordered_tree::BstTree;
///
/// let tree: BstTree<u32> = vec![2, 1, 3].into_iter().collect();
/// let root = tree.root().unwrap();
///
/// assert_eq!(*root.get(), 2);
/// assert_eq!(*root.left().unwrap().get(), 1);
/// assert_eq!(root.left().unwrap().depth(), 1);
/// assert!(root.parent().is_err());
/// ```
pub struct VertexRef<'a, T> {
    tree: &'a BinaryTree<T>,
    handle: Handle,
}

impl<'a, T> Clone for VertexRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for VertexRef<'a, T> {}

impl<'a, T> VertexRef<'a, T> {
    pub(crate) fn new(tree: &'a BinaryTree<T>, handle: Handle) -> Self {
        VertexRef { tree, handle }
    }

    fn vertex(&self) -> &'a Vertex<T> {
        self.tree.node(self.handle)
    }

    fn navigate(&self, link: Option<Handle>, what: &'static str) -> Result<VertexRef<'a, T>> {
        match link {
            Some(handle) => Ok(VertexRef::new(self.tree, handle)),
            None => Err(Error::NotFound(what)),
        }
    }

    /// Returns the stable handle of this vertex.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Returns the element stored in this vertex.
    pub fn get(&self) -> &'a T {
        self.vertex().element()
    }

    /// Returns the strategy-specific payload of this vertex.
    pub fn payload(&self) -> Payload {
        self.vertex().payload
    }

    /// Returns the color of this vertex, or `None` if the tree is not color-balanced.
    pub fn color(&self) -> Option<Color> {
        match self.vertex().payload {
            Payload::Color(color) => Some(color),
            _ => None,
        }
    }

    pub fn has_parent(&self) -> bool {
        self.vertex().parent.is_some()
    }

    pub fn has_left(&self) -> bool {
        self.vertex().left.is_some()
    }

    pub fn has_right(&self) -> bool {
        self.vertex().right.is_some()
    }

    pub fn parent(&self) -> Result<VertexRef<'a, T>> {
        self.navigate(self.vertex().parent, "parent")
    }

    pub fn left(&self) -> Result<VertexRef<'a, T>> {
        self.navigate(self.vertex().left, "left child")
    }

    pub fn right(&self) -> Result<VertexRef<'a, T>> {
        self.navigate(self.vertex().right, "right child")
    }

    /// Returns the height of the subtree rooted at this vertex. A leaf has height `0`.
    ///
    /// Height-balanced trees answer from the cached height; other trees compute it.
    pub fn height(&self) -> i32 {
        match self.vertex().payload {
            Payload::Height(height) => height,
            _ => self.computed_height(),
        }
    }

    fn computed_height(&self) -> i32 {
        let left = self.left().map(|v| v.computed_height()).unwrap_or(-1);
        let right = self.right().map(|v| v.computed_height()).unwrap_or(-1);
        1 + cmp::max(left, right)
    }

    /// Returns the number of edges between this vertex and the root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut curr = self.vertex();
        while let Some(parent) = curr.parent {
            depth += 1;
            curr = self.tree.node(parent);
        }
        depth
    }

    fn balance(&self) -> i32 {
        let left = self.left().map(|v| v.height()).unwrap_or(-1);
        let right = self.right().map(|v| v.height()).unwrap_or(-1);
        left - right
    }
}

pub(crate) fn subtree_eq<T>(lhs: Option<VertexRef<'_, T>>, rhs: Option<VertexRef<'_, T>>) -> bool
where
    T: PartialEq,
{
    match (lhs, rhs) {
        (None, None) => true,
        (Some(lhs), Some(rhs)) => {
            lhs.get() == rhs.get()
                && lhs.payload() == rhs.payload()
                && subtree_eq(lhs.left().ok(), rhs.left().ok())
                && subtree_eq(lhs.right().ok(), rhs.right().ok())
        },
        _ => false,
    }
}

/// Two vertices are equal when their elements and payloads are equal and their descendants are
/// recursively equal.
impl<'a, 'b, T> PartialEq<VertexRef<'b, T>> for VertexRef<'a, T>
where
    T: PartialEq,
{
    fn eq(&self, other: &VertexRef<'b, T>) -> bool {
        subtree_eq(Some(*self), Some(*other))
    }
}

impl<'a, T> fmt::Display for VertexRef<'a, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload() {
            Payload::Plain | Payload::Color(Color::None) => write!(f, "{}", self.get()),
            Payload::Height(height) => write!(f, "{} {}/{}", self.get(), height, self.balance()),
            Payload::Color(Color::Red) => write!(f, "R{{{}}}", self.get()),
            Payload::Color(Color::Black) => write!(f, "B{{{}}}", self.get()),
        }
    }
}

impl<'a, T> fmt::Debug for VertexRef<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexRef")
            .field("element", self.get())
            .field("payload", &self.payload())
            .finish()
    }
}
