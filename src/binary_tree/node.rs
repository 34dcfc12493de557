use crate::arena::Handle;

/// The color of a vertex in a color-balanced tree.
///
/// Vertices are created with `Color::None` and receive a real color as soon as the insertion
/// fix-up looks at them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
    None,
}

/// Strategy-specific data carried by every vertex. The variant is chosen once, when the tree is
/// constructed, and every vertex of a tree carries the same variant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Payload {
    Plain,
    Height(i32),
    Color(Color),
}

pub(crate) enum Content<T> {
    Element(T),
    // Transient black leaf used while fixing colors after a removal.
    Phantom,
}

/// A struct representing a vertex of a binary tree stored in the tree's arena.
///
/// Children are owned through the arena; `parent` is a navigation link only.
pub struct Vertex<T> {
    pub(crate) content: Content<T>,
    pub(crate) payload: Payload,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
}

impl<T> Vertex<T> {
    pub(crate) fn new(element: T, payload: Payload) -> Self {
        Vertex {
            content: Content::Element(element),
            payload,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn phantom(payload: Payload) -> Self {
        Vertex {
            content: Content::Phantom,
            payload,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn is_phantom(&self) -> bool {
        match self.content {
            Content::Phantom => true,
            Content::Element(_) => false,
        }
    }

    pub(crate) fn element(&self) -> &T {
        match self.content {
            Content::Element(ref element) => element,
            Content::Phantom => panic!("Expected a vertex holding an element."),
        }
    }

    pub(crate) fn into_element(self) -> T {
        match self.content {
            Content::Element(element) => element,
            Content::Phantom => panic!("Expected a vertex holding an element."),
        }
    }
}
