use crate::arena::{Handle, TypedArena};
use crate::binary_tree::node::{Content, Payload, Vertex};
use crate::binary_tree::vertex::{subtree_eq, VertexRef};
use crate::error::{Error, Result};
use std::fmt;
use std::mem;

/// The number of vertices stored per arena chunk when no chunk size is given.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// The storage shared by every binary tree: the vertex arena, the root, and the element count.
///
/// A `BinaryTree<T>` knows nothing about ordering. It can navigate, search by equality, render
/// itself, and compare itself structurally with another tree. New vertices are produced through a
/// factory that stamps every vertex with the payload chosen when the tree was built.
pub struct BinaryTree<T> {
    vertices: TypedArena<Vertex<T>>,
    root: Option<Handle>,
    len: usize,
    factory: Payload,
}

impl<T> BinaryTree<T> {
    pub(crate) fn new(chunk_size: usize, factory: Payload) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidArgument(String::from(
                "chunk size must be positive",
            )));
        }
        Ok(BinaryTree {
            vertices: TypedArena::new(chunk_size),
            root: None,
            len: 0,
            factory,
        })
    }

    pub(crate) fn new_vertex(&mut self, element: T) -> Handle {
        self.vertices.allocate(Vertex::new(element, self.factory))
    }

    pub(crate) fn new_phantom(&mut self, payload: Payload) -> Handle {
        self.vertices.allocate(Vertex::phantom(payload))
    }

    pub(crate) fn release(&mut self, handle: Handle) -> Vertex<T> {
        self.vertices.free(&handle)
    }

    pub(crate) fn node(&self, handle: Handle) -> &Vertex<T> {
        &self.vertices[handle]
    }

    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Vertex<T> {
        &mut self.vertices[handle]
    }

    pub(crate) fn payload(&self, handle: Handle) -> Payload {
        self.node(handle).payload
    }

    pub(crate) fn set_payload(&mut self, handle: Handle, payload: Payload) {
        self.node_mut(handle).payload = payload;
    }

    // Exchanges the elements of two vertices; links and payloads stay where they are.
    pub(crate) fn swap_elements(&mut self, a: Handle, b: Handle) {
        if a == b {
            return;
        }
        let a_content = mem::replace(&mut self.node_mut(a).content, Content::Phantom);
        let b_content = mem::replace(&mut self.node_mut(b).content, a_content);
        self.node_mut(a).content = b_content;
    }

    pub(crate) fn root_handle(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: Option<Handle>) {
        self.root = root;
        if let Some(root) = root {
            self.node_mut(root).parent = None;
        }
    }

    pub(crate) fn parent_of(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).parent
    }

    pub(crate) fn left_of(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).left
    }

    pub(crate) fn right_of(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).right
    }

    pub(crate) fn is_left_child(&self, handle: Handle) -> bool {
        match self.parent_of(handle) {
            Some(parent) => self.left_of(parent) == Some(handle),
            None => false,
        }
    }

    // Points whatever referenced `old` (its parent's child slot or the root) at `new`. The parent
    // link of `new` is left to the caller.
    pub(crate) fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent_vertex = self.node_mut(parent);
                if parent_vertex.left == Some(old) {
                    parent_vertex.left = new;
                } else {
                    parent_vertex.right = new;
                }
            },
        }
    }

    pub(crate) fn increment_len(&mut self) {
        self.len += 1;
    }

    pub(crate) fn decrement_len(&mut self) {
        self.len -= 1;
    }

    /// Checks that `handle` names a live element vertex of this tree.
    pub(crate) fn check_handle(&self, handle: Handle) -> Result<()> {
        match self.vertices.get(&handle) {
            Some(vertex) if !vertex.is_phantom() => Ok(()),
            _ => Err(Error::ContractViolation(format!(
                "{:?} is not a vertex of this tree",
                handle,
            ))),
        }
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the payload variant every vertex of this tree is created with.
    pub fn factory(&self) -> Payload {
        self.factory
    }

    /// Returns the height of the tree, the height of its root, or `-1` if the tree is empty.
    pub fn height(&self) -> i32 {
        self.root().map(|root| root.height()).unwrap_or(-1)
    }

    /// Returns the root vertex, or `Error::NotFound` if the tree is empty.
    pub fn root(&self) -> Result<VertexRef<'_, T>> {
        match self.root {
            Some(root) => Ok(VertexRef::new(self, root)),
            None => Err(Error::NotFound("root")),
        }
    }

    /// Returns the vertex behind `handle`, or `Error::ContractViolation` if the handle does not
    /// belong to a live vertex of this tree.
    pub fn vertex(&self, handle: Handle) -> Result<VertexRef<'_, T>> {
        self.check_handle(handle)?;
        Ok(VertexRef::new(self, handle))
    }

    /// Searches the whole tree, pre-order, for a vertex whose element equals `element`. This
    /// search does not rely on any ordering.
    pub fn search(&self, element: &T) -> Option<VertexRef<'_, T>>
    where
        T: PartialEq,
    {
        fn search<'a, T>(tree: &'a BinaryTree<T>, curr: Option<Handle>, element: &T) -> Option<VertexRef<'a, T>>
        where
            T: PartialEq,
        {
            let handle = curr?;
            let vertex = tree.node(handle);
            if vertex.element() == element {
                return Some(VertexRef::new(tree, handle));
            }
            search(tree, vertex.left, element).or_else(|| search(tree, vertex.right, element))
        }

        search(self, self.root, element)
    }

    /// Returns `true` if some vertex of the tree holds `element`.
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.search(element).is_some()
    }

    pub(crate) fn clear(&mut self) {
        self.vertices.clear();
        self.root = None;
        self.len = 0;
        log::debug!("cleared tree");
    }
}

impl<T> PartialEq for BinaryTree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &BinaryTree<T>) -> bool {
        self.len == other.len && subtree_eq(self.root().ok(), other.root().ok())
    }
}

fn indent(f: &mut fmt::Formatter<'_>, open: &[bool]) -> fmt::Result {
    for &is_open in open {
        write!(f, "{}", if is_open { "│  " } else { "   " })?;
    }
    Ok(())
}

fn render<T>(f: &mut fmt::Formatter<'_>, vertex: VertexRef<'_, T>, open: &mut Vec<bool>) -> fmt::Result
where
    T: fmt::Display,
{
    writeln!(f, "{}", vertex)?;
    let left = vertex.left().ok();
    let right = vertex.right().ok();

    if let Some(left) = left {
        indent(f, open)?;
        if right.is_some() {
            write!(f, "├─›")?;
            open.push(true);
        } else {
            write!(f, "└─›")?;
            open.push(false);
        }
        render(f, left, open)?;
        open.pop();
    }
    if let Some(right) = right {
        indent(f, open)?;
        write!(f, "└─»")?;
        open.push(false);
        render(f, right, open)?;
        open.pop();
    }
    Ok(())
}

/// Draws the tree one vertex per line, left children marked `›` and right children `»`.
impl<T> fmt::Display for BinaryTree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Ok(root) => render(f, root, &mut Vec::new()),
            Err(_) => Ok(()),
        }
    }
}
