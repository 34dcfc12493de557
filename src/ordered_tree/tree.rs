use crate::arena::Handle;
use crate::binary_tree::{BinaryTree, VertexRef, DEFAULT_CHUNK_SIZE};
use crate::error::{Error, Result};
use crate::ordered_tree::iter::Iter;
use crate::ordered_tree::strategy::{Strategy, Unbalanced};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;

/// An ordered binary search tree whose balancing is delegated to a `Strategy`.
///
/// Every element in the left subtree of a vertex is less than or equal to the vertex's element,
/// and every element in its right subtree is greater than or equal to it. Equal elements are
/// allowed; a new element that ties with a vertex descends to its left.
///
/// Insertion and removal run in two phases: the structural change is made here, then the
/// strategy's fix-up runs from the point of change towards the root.
///
/// # Examples
///
/// ```
/// use ordered_trees::ordered_tree::BstTree;
///
/// let mut tree = BstTree::new();
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
///
/// assert_eq!(tree.len(), 3);
/// assert!(tree.contains(&1));
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
///
/// assert_eq!(tree.remove(&2), Some(2));
/// assert_eq!(tree.remove(&2), None);
/// ```
pub struct OrderedTree<T, S> {
    tree: BinaryTree<T>,
    last_inserted: Option<Handle>,
    strategy: PhantomData<S>,
}

/// A binary search tree without balancing.
pub type BstTree<T> = OrderedTree<T, Unbalanced>;

impl<T, S> OrderedTree<T, S>
where
    S: Strategy,
{
    /// Constructs a new, empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::ordered_tree::BstTree;
    ///
    /// let tree: BstTree<u32> = BstTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE).expect("Expected a positive default chunk size.")
    }

    /// Constructs a new, empty tree whose arena grows `chunk_size` vertices at a time. Fails with
    /// `Error::InvalidArgument` if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::ordered_tree::BstTree;
    ///
    /// assert!(BstTree::<u32>::with_chunk_size(64).is_ok());
    /// assert!(BstTree::<u32>::with_chunk_size(0).is_err());
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Result<Self> {
        let tree = BinaryTree::new(chunk_size, S::payload())?;
        log::debug!("new tree with chunk size {}", chunk_size);
        Ok(OrderedTree {
            tree,
            last_inserted: None,
            strategy: PhantomData,
        })
    }

    /// Inserts an element into the tree. Duplicates are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::ordered_tree::BstTree;
    ///
    /// let mut tree = BstTree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, element: T)
    where
        T: Ord,
    {
        let inserted = self.tree.new_vertex(element);
        self.last_inserted = Some(inserted);
        self.tree.increment_len();

        let mut curr = match self.tree.root_handle() {
            Some(root) => root,
            None => {
                self.tree.set_root(Some(inserted));
                S::after_insert(self, inserted);
                return;
            },
        };

        loop {
            let goes_left = self.tree.node(inserted).element() <= self.tree.node(curr).element();
            let next = if goes_left {
                self.tree.left_of(curr)
            } else {
                self.tree.right_of(curr)
            };
            match next {
                Some(next) => curr = next,
                None => {
                    let parent = self.tree.node_mut(curr);
                    if goes_left {
                        parent.left = Some(inserted);
                    } else {
                        parent.right = Some(inserted);
                    }
                    self.tree.node_mut(inserted).parent = Some(curr);
                    break;
                },
            }
        }

        S::after_insert(self, inserted);
    }

    /// Inserts an element that may be absent. Fails with `Error::InvalidArgument` and leaves the
    /// tree untouched if `element` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::ordered_tree::BstTree;
    ///
    /// let mut tree = BstTree::new();
    /// assert!(tree.try_insert(Some(1)).is_ok());
    /// assert!(tree.try_insert(None).is_err());
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn try_insert(&mut self, element: Option<T>) -> Result<()>
    where
        T: Ord,
    {
        match element {
            Some(element) => {
                self.insert(element);
                Ok(())
            },
            None => Err(Error::InvalidArgument(String::from("cannot insert an absent element"))),
        }
    }

    /// Removes one occurrence of an element from the tree and returns it. Returns `None` and
    /// leaves the tree untouched if the element is not in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::ordered_tree::BstTree;
    ///
    /// let mut tree = BstTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove(&mut self, element: &T) -> Option<T>
    where
        T: Ord,
    {
        let found = self.find(element)?;
        let target = if self.tree.left_of(found).is_some() && self.tree.right_of(found).is_some() {
            self.swap_with_predecessor(found)
        } else {
            found
        };

        S::detach(self, target);
        self.tree.decrement_len();
        Some(self.tree.release(target).into_element())
    }

    fn find(&self, element: &T) -> Option<Handle>
    where
        T: Ord,
    {
        let mut curr = self.tree.root_handle();
        while let Some(handle) = curr {
            curr = match element.cmp(self.tree.node(handle).element()) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => self.tree.left_of(handle),
                Ordering::Greater => self.tree.right_of(handle),
            };
        }
        None
    }

    /// Returns the vertex holding `element`, found by descending from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::ordered_tree::BstTree;
    ///
    /// let tree: BstTree<u32> = vec![2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.search(&3).unwrap().depth(), 1);
    /// assert!(tree.search(&4).is_none());
    /// ```
    pub fn search(&self, element: &T) -> Option<VertexRef<'_, T>>
    where
        T: Ord,
    {
        self.find(element).map(|handle| VertexRef::new(&self.tree, handle))
    }

    /// Checks if an element exists in the tree.
    pub fn contains(&self, element: &T) -> bool
    where
        T: Ord,
    {
        self.find(element).is_some()
    }

    /// Returns the minimum element of the tree, or `None` if the tree is empty.
    pub fn min(&self) -> Option<&T> {
        let mut curr = self.tree.root_handle()?;
        while let Some(left) = self.tree.left_of(curr) {
            curr = left;
        }
        Some(self.tree.node(curr).element())
    }

    /// Returns the maximum element of the tree, or `None` if the tree is empty.
    pub fn max(&self) -> Option<&T> {
        let mut curr = self.tree.root_handle()?;
        while let Some(right) = self.tree.right_of(curr) {
            curr = right;
        }
        Some(self.tree.node(curr).element())
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the tree, removing all elements. Handles issued before the call stop resolving.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::ordered_tree::BstTree;
    ///
    /// let mut tree = BstTree::new();
    /// tree.insert(1);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.height(), -1);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
        self.last_inserted = None;
    }

    /// Returns the height of the tree, or `-1` if the tree is empty.
    pub fn height(&self) -> i32 {
        self.tree.height()
    }

    /// Returns the root vertex, or `Error::NotFound` if the tree is empty.
    pub fn root(&self) -> Result<VertexRef<'_, T>> {
        self.tree.root()
    }

    /// Returns the vertex behind a handle issued by this tree.
    pub fn vertex(&self, handle: Handle) -> Result<VertexRef<'_, T>> {
        self.tree.vertex(handle)
    }

    /// Returns the vertex created by the most recent insertion. The answer is only meaningful
    /// immediately after `insert`; any other mutation in between leaves it unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::ordered_tree::BstTree;
    ///
    /// let mut tree = BstTree::new();
    /// tree.insert(4);
    /// assert_eq!(*tree.last_inserted().unwrap().get(), 4);
    /// ```
    pub fn last_inserted(&self) -> Option<VertexRef<'_, T>> {
        self.last_inserted
            .and_then(|handle| self.tree.vertex(handle).ok())
    }

    /// Returns the underlying binary tree.
    pub fn as_binary_tree(&self) -> &BinaryTree<T> {
        &self.tree
    }

    /// Rotates the tree to the left around the vertex behind `handle`. Does nothing if the vertex
    /// has no right child.
    ///
    /// Balanced trees refuse with `Error::UnsupportedOperation`, since an outside rotation would
    /// break their invariants. A handle that is not a live vertex of this tree is refused with
    /// `Error::ContractViolation`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::ordered_tree::BstTree;
    ///
    /// let mut tree: BstTree<u32> = vec![1, 2].into_iter().collect();
    /// let root = tree.root().unwrap().handle();
    /// tree.rotate_left(root).unwrap();
    /// assert_eq!(*tree.root().unwrap().get(), 2);
    /// ```
    pub fn rotate_left(&mut self, handle: Handle) -> Result<()> {
        self.check_rotation(handle)?;
        self.rotate_left_at(handle);
        Ok(())
    }

    /// Rotates the tree to the right around the vertex behind `handle`. Does nothing if the vertex
    /// has no left child. Refused on balanced trees like `rotate_left`.
    pub fn rotate_right(&mut self, handle: Handle) -> Result<()> {
        self.check_rotation(handle)?;
        self.rotate_right_at(handle);
        Ok(())
    }

    fn check_rotation(&self, handle: Handle) -> Result<()> {
        if !S::EXTERNAL_ROTATION {
            return Err(Error::UnsupportedOperation(
                "balanced trees cannot be rotated by callers",
            ));
        }
        self.tree.check_handle(handle)
    }

    /// Returns an iterator over the tree. The iterator will yield elements using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::ordered_tree::BstTree;
    ///
    /// let tree: BstTree<u32> = vec![3, 1, 2].into_iter().collect();
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.tree)
    }
}

// Structural primitives shared with the balancing strategies.
impl<T, S> OrderedTree<T, S> {
    pub(crate) fn binary_tree_mut(&mut self) -> &mut BinaryTree<T> {
        &mut self.tree
    }

    pub(crate) fn rotate_left_at(&mut self, handle: Handle) {
        let child = match self.tree.right_of(handle) {
            Some(child) => child,
            None => return,
        };
        let parent = self.tree.parent_of(handle);
        let inner = self.tree.left_of(child);

        self.tree.replace_child(parent, handle, Some(child));
        self.tree.node_mut(child).parent = parent;

        self.tree.node_mut(handle).right = inner;
        if let Some(inner) = inner {
            self.tree.node_mut(inner).parent = Some(handle);
        }

        self.tree.node_mut(child).left = Some(handle);
        self.tree.node_mut(handle).parent = Some(child);
        log::trace!("rotated left at {:?}", handle);
    }

    pub(crate) fn rotate_right_at(&mut self, handle: Handle) {
        let child = match self.tree.left_of(handle) {
            Some(child) => child,
            None => return,
        };
        let parent = self.tree.parent_of(handle);
        let inner = self.tree.right_of(child);

        self.tree.replace_child(parent, handle, Some(child));
        self.tree.node_mut(child).parent = parent;

        self.tree.node_mut(handle).left = inner;
        if let Some(inner) = inner {
            self.tree.node_mut(inner).parent = Some(handle);
        }

        self.tree.node_mut(child).right = Some(handle);
        self.tree.node_mut(handle).parent = Some(child);
        log::trace!("rotated right at {:?}", handle);
    }

    /// Removes a vertex with at most one child by promoting that child into its place and returns
    /// the promoted child. The removed vertex keeps its stale links.
    pub(crate) fn splice(&mut self, handle: Handle) -> Option<Handle> {
        let vertex = self.tree.node(handle);
        debug_assert!(vertex.left.is_none() || vertex.right.is_none());
        let child = vertex.right.or(vertex.left);
        let parent = vertex.parent;

        self.tree.replace_child(parent, handle, child);
        if let Some(child) = child {
            self.tree.node_mut(child).parent = parent;
        }
        log::trace!("spliced out {:?}", handle);
        child
    }

    // precondition: the vertex has two children
    fn swap_with_predecessor(&mut self, handle: Handle) -> Handle {
        let mut max = self
            .tree
            .left_of(handle)
            .expect("Expected left child to be `Some`.");
        while let Some(right) = self.tree.right_of(max) {
            max = right;
        }
        self.tree.swap_elements(handle, max);
        max
    }
}

impl<T, S> Default for OrderedTree<T, S>
where
    S: Strategy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> FromIterator<T> for OrderedTree<T, S>
where
    T: Ord,
    S: Strategy,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = OrderedTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T, S> Extend<T> for OrderedTree<T, S>
where
    T: Ord,
    S: Strategy,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, T, S> IntoIterator for &'a OrderedTree<T, S>
where
    T: 'a,
    S: Strategy,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Trees are equal when they have the same shape, the same elements in the same places, and the
/// same heights or colors.
impl<T, S> PartialEq for OrderedTree<T, S>
where
    T: PartialEq,
{
    fn eq(&self, other: &OrderedTree<T, S>) -> bool {
        self.tree == other.tree
    }
}

impl<T, S> fmt::Display for OrderedTree<T, S>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tree)
    }
}

impl<T, S> fmt::Debug for OrderedTree<T, S>
where
    T: fmt::Debug,
    S: Strategy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::BstTree;
    use crate::error::Error;

    #[test]
    fn test_len_empty() {
        let tree: BstTree<u32> = BstTree::new();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), -1);
        assert!(tree.root().is_err());
    }

    #[test]
    fn test_insert_shape() {
        let tree: BstTree<u32> = vec![5, 3, 8, 3, 9].into_iter().collect();
        let root = tree.root().unwrap();
        assert_eq!(*root.get(), 5);
        let three = root.left().unwrap();
        assert_eq!(*three.get(), 3);
        // ties descend left
        assert_eq!(*three.left().unwrap().get(), 3);
        assert_eq!(*root.right().unwrap().right().unwrap().get(), 9);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_insert_chain_height() {
        let tree: BstTree<u32> = (0..10).collect();
        assert_eq!(tree.height(), 9);
    }

    #[test]
    fn test_try_insert_absent() {
        let mut tree: BstTree<u32> = BstTree::new();
        match tree.try_insert(None) {
            Err(Error::InvalidArgument(_)) => {},
            _ => panic!("Expected an invalid argument error."),
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn test_with_chunk_size_zero() {
        match BstTree::<u32>::with_chunk_size(0) {
            Err(Error::InvalidArgument(_)) => {},
            _ => panic!("Expected an invalid argument error."),
        }
    }

    #[test]
    fn test_remove_leaf() {
        let mut tree: BstTree<u32> = vec![2, 1, 3].into_iter().collect();
        assert_eq!(tree.remove(&1), Some(1));
        assert!(!tree.root().unwrap().has_left());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_remove_one_child() {
        let mut tree: BstTree<u32> = vec![2, 1, 3, 4].into_iter().collect();
        assert_eq!(tree.remove(&3), Some(3));
        let four = tree.root().unwrap().right().unwrap();
        assert_eq!(*four.get(), 4);
        assert_eq!(*four.parent().unwrap().get(), 2);
    }

    #[test]
    fn test_remove_two_children_uses_predecessor() {
        let mut tree: BstTree<u32> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
        assert_eq!(tree.remove(&5), Some(5));
        let root = tree.root().unwrap();
        assert_eq!(*root.get(), 4);
        assert!(!root.left().unwrap().has_right());
        assert_eq!(
            tree.iter().cloned().collect::<Vec<u32>>(),
            vec![1, 3, 4, 7, 8, 9],
        );
    }

    #[test]
    fn test_remove_root_single() {
        let mut tree: BstTree<u32> = BstTree::new();
        tree.insert(1);
        assert_eq!(tree.remove(&1), Some(1));
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_remove_absent() {
        let mut tree: BstTree<u32> = vec![2, 1].into_iter().collect();
        assert_eq!(tree.remove(&7), None);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_rotate_right_and_left() {
        let mut tree: BstTree<u32> = vec![4, 2, 6, 1, 3].into_iter().collect();
        let root = tree.root().unwrap().handle();
        tree.rotate_right(root).unwrap();

        let new_root = tree.root().unwrap();
        assert_eq!(*new_root.get(), 2);
        assert!(!new_root.has_parent());
        let four = new_root.right().unwrap();
        assert_eq!(*four.get(), 4);
        assert_eq!(*four.left().unwrap().get(), 3);
        assert_eq!(*four.left().unwrap().parent().unwrap().get(), 4);
        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), vec![1, 2, 3, 4, 6]);

        let new_root = new_root.handle();
        tree.rotate_left(new_root).unwrap();
        assert_eq!(*tree.root().unwrap().get(), 4);
        assert_eq!(*tree.root().unwrap().left().unwrap().right().unwrap().get(), 3);
    }

    #[test]
    fn test_rotate_inner_vertex() {
        let mut tree: BstTree<u32> = vec![10, 5, 7].into_iter().collect();
        let five = tree.search(&5).unwrap().handle();
        tree.rotate_left(five).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(*root.left().unwrap().get(), 7);
        assert_eq!(*root.left().unwrap().left().unwrap().get(), 5);
    }

    #[test]
    fn test_rotate_without_child_is_noop() {
        let mut tree: BstTree<u32> = vec![1, 2].into_iter().collect();
        let root = tree.root().unwrap().handle();
        tree.rotate_right(root).unwrap();
        assert_eq!(*tree.root().unwrap().get(), 1);
    }

    #[test]
    fn test_rotate_foreign_handle() {
        let mut tree: BstTree<u32> = vec![1, 2].into_iter().collect();
        let other: BstTree<u32> = vec![1, 2].into_iter().collect();
        let foreign = other.root().unwrap().handle();
        match tree.rotate_left(foreign) {
            Err(Error::ContractViolation(_)) => {},
            _ => panic!("Expected a contract violation."),
        }
        assert_eq!(*tree.root().unwrap().get(), 1);
    }

    #[test]
    fn test_stale_handle_after_remove() {
        let mut tree: BstTree<u32> = vec![1, 2].into_iter().collect();
        let two = tree.search(&2).unwrap().handle();
        tree.remove(&2);
        tree.insert(3);
        assert!(tree.vertex(two).is_err());
    }

    #[test]
    fn test_min_max() {
        let tree: BstTree<u32> = vec![4, 2, 9, 7].into_iter().collect();
        assert_eq!(tree.min(), Some(&2));
        assert_eq!(tree.max(), Some(&9));
        assert_eq!(BstTree::<u32>::new().min(), None);
    }

    #[test]
    fn test_equality() {
        let lhs: BstTree<u32> = vec![2, 1, 3].into_iter().collect();
        let rhs: BstTree<u32> = vec![2, 3, 1].into_iter().collect();
        let other: BstTree<u32> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(lhs, rhs);
        assert_ne!(lhs, other);
    }

    #[test]
    fn test_last_inserted() {
        let mut tree = BstTree::new();
        tree.insert(3);
        tree.insert(1);
        let last = tree.last_inserted().unwrap();
        assert_eq!(*last.get(), 1);
        assert_eq!(*last.parent().unwrap().get(), 3);
    }
}
