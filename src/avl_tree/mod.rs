//! Self-balancing binary search tree where the heights of the two child subtrees of any vertex
//! differ by at most one.

mod tree;

pub use self::tree::HeightBalance;
use crate::ordered_tree::OrderedTree;

/// An ordered tree kept height-balanced.
///
/// # Examples
///
/// ```
/// use ordered_trees::avl_tree::AvlTree;
///
/// let tree: AvlTree<u32> = (0..7).collect();
/// assert_eq!(tree.height(), 2);
/// assert_eq!(*tree.root().unwrap().get(), 3);
///
/// let root = tree.root().unwrap().handle();
/// let mut tree = tree;
/// assert!(tree.rotate_left(root).is_err());
/// ```
pub type AvlTree<T> = OrderedTree<T, HeightBalance>;
