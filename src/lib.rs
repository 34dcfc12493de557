//! Ordered collections built on binary search trees.
//!
//! Every tree in this crate stores its vertices in a `TypedArena` and links them with
//! generation-checked `Handle`s. The ordered layer, `OrderedTree<T, S>`, does the searching,
//! splicing, and rotating, while the strategy `S` keeps the tree in shape:
//!
//! - `ordered_tree::BstTree` does no balancing and lets callers rotate it by hand.
//! - `avl_tree::AvlTree` keeps the heights of sibling subtrees within one of each other.
//! - `red_black_tree::RedBlackTree` keeps the tree balanced with a color on every vertex.
//!
//! # Examples
//!
//! ```
//! use ordered_trees::collection::Collection;
//! use ordered_trees::red_black_tree::RedBlackTree;
//!
//! let mut tree = RedBlackTree::new();
//! for i in (0..100).rev() {
//!     tree.insert(i);
//! }
//! assert_eq!(tree.len(), 100);
//! assert!(tree.height() < 14);
//! assert_eq!(tree.iter().next(), Some(&0));
//! ```

pub mod arena;
pub mod avl_tree;
pub mod binary_tree;
pub mod collection;
pub mod error;
pub mod ordered_tree;
pub mod red_black_tree;

pub use crate::error::{Error, Result};
