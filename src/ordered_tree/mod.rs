//! Binary search trees whose balancing is supplied by a pluggable strategy.
//!
//! `OrderedTree<T, S>` does the ordered part of every operation: descent by comparison on
//! insertion, predecessor swap and splicing on removal, rotations, and traversals. The strategy
//! `S` then restores its own invariants, walking from the point of change towards the root.

mod iter;
mod strategy;
mod tree;

pub use self::iter::Iter;
pub use self::strategy::{Strategy, Unbalanced};
pub(crate) use self::strategy::sealed;
pub use self::tree::{BstTree, OrderedTree};
