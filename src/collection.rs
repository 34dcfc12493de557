//! The capabilities shared by every tree variant.

use crate::ordered_tree::{Iter, OrderedTree, Strategy};

/// A collection of ordered elements that allows duplicates.
///
/// # Examples
///
/// ```
/// use ordered_trees::avl_tree::AvlTree;
/// use ordered_trees::collection::Collection;
/// use ordered_trees::red_black_tree::RedBlackTree;
///
/// fn fill<C: Collection<u32>>(collection: &mut C) {
///     for i in 0..10 {
///         collection.insert(i);
///     }
/// }
///
/// let mut avl = AvlTree::new();
/// let mut red_black = RedBlackTree::new();
/// fill(&mut avl);
/// fill(&mut red_black);
/// assert_eq!(avl.len(), red_black.len());
/// assert!(avl.iter().eq(red_black.iter()));
/// ```
pub trait Collection<T> {
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Inserts an element into the collection.
    fn insert(&mut self, element: T);

    /// Removes one occurrence of an element and returns it, or `None` if it is absent.
    fn remove(&mut self, element: &T) -> Option<T>;

    fn contains(&self, element: &T) -> bool;

    /// Returns the number of elements in the collection.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    /// Returns an iterator over the elements in ascending order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns the height of the underlying tree, or `-1` if the collection is empty.
    fn height(&self) -> i32;
}

impl<T, S> Collection<T> for OrderedTree<T, S>
where
    T: Ord,
    S: Strategy,
{
    type Iter<'a> = Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn insert(&mut self, element: T) {
        OrderedTree::insert(self, element)
    }

    fn remove(&mut self, element: &T) -> Option<T> {
        OrderedTree::remove(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        OrderedTree::contains(self, element)
    }

    fn len(&self) -> usize {
        OrderedTree::len(self)
    }

    fn is_empty(&self) -> bool {
        OrderedTree::is_empty(self)
    }

    fn clear(&mut self) {
        OrderedTree::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        OrderedTree::iter(self)
    }

    fn height(&self) -> i32 {
        OrderedTree::height(self)
    }
}
