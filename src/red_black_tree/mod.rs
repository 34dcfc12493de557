//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.

mod tree;

pub use self::tree::ColorBalance;
use crate::ordered_tree::OrderedTree;

/// An ordered tree kept color-balanced.
///
/// # Examples
///
/// ```
/// use ordered_trees::binary_tree::Color;
/// use ordered_trees::red_black_tree::RedBlackTree;
///
/// let mut tree: RedBlackTree<u32> = vec![10, 20, 30].into_iter().collect();
/// let root = tree.root().unwrap();
/// assert_eq!(*root.get(), 20);
/// assert_eq!(root.color(), Some(Color::Black));
/// assert_eq!(root.left().unwrap().color(), Some(Color::Red));
///
/// assert_eq!(tree.remove(&20), Some(20));
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&10, &30]);
/// ```
pub type RedBlackTree<T> = OrderedTree<T, ColorBalance>;
