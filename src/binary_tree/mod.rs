//! Arena-backed binary trees: vertices, vertex navigation, and the tree storage shared by every
//! ordered variant.

mod node;
mod tree;
mod vertex;

pub use self::node::{Color, Payload};
pub use self::tree::{BinaryTree, DEFAULT_CHUNK_SIZE};
pub use self::vertex::VertexRef;
