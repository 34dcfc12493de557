use crate::arena::Handle;
use crate::binary_tree::{BinaryTree, Payload};
use crate::ordered_tree::{sealed, OrderedTree, Strategy};
use std::cmp;

/// Keeps the heights of the two subtrees of every vertex within one of each other.
///
/// Every vertex caches its own height. After a structural change the strategy walks from the
/// changed vertex to the root, refreshing heights and rotating wherever a vertex has become two
/// levels heavier on one side.
pub struct HeightBalance;

impl sealed::Sealed for HeightBalance {
    fn after_insert<T>(tree: &mut OrderedTree<T, Self>, inserted: Handle) {
        let parent = tree.as_binary_tree().parent_of(inserted);
        rebalance(tree, parent);
    }

    fn detach<T>(tree: &mut OrderedTree<T, Self>, vertex: Handle) {
        let parent = tree.as_binary_tree().parent_of(vertex);
        tree.splice(vertex);
        rebalance(tree, parent);
    }
}

impl Strategy for HeightBalance {
    const EXTERNAL_ROTATION: bool = false;

    fn payload() -> Payload {
        Payload::Height(0)
    }
}

fn height<T>(tree: &BinaryTree<T>, handle: Option<Handle>) -> i32 {
    match handle {
        None => -1,
        Some(handle) => match tree.payload(handle) {
            Payload::Height(height) => height,
            _ => unreachable!(),
        },
    }
}

fn set_height<T>(tree: &mut BinaryTree<T>, handle: Handle, height: i32) {
    tree.set_payload(handle, Payload::Height(height));
}

fn balance<T>(tree: &BinaryTree<T>, handle: Handle) -> i32 {
    height(tree, tree.left_of(handle)) - height(tree, tree.right_of(handle))
}

fn update<T>(tree: &mut BinaryTree<T>, handle: Handle) -> i32 {
    let new_height = 1 + cmp::max(
        height(tree, tree.left_of(handle)),
        height(tree, tree.right_of(handle)),
    );
    set_height(tree, handle, new_height);
    new_height
}

// Heights after rotating at a vertex of height `h` whose new inner child is `inner`: the rotated
// vertex drops to `h - 1` only if `inner` kept height `h - 2`, and the promoted child sits one
// above it.
fn settle<T>(tree: &mut BinaryTree<T>, vertex: Handle, promoted: Handle, inner: Option<Handle>, h: i32) {
    let vertex_height = match inner {
        Some(_) if height(tree, inner) == h - 2 => h - 1,
        _ => h - 2,
    };
    set_height(tree, vertex, vertex_height);
    set_height(tree, promoted, vertex_height + 1);
}

fn fix_right_heavy<T>(tree: &mut OrderedTree<T, HeightBalance>, vertex: Handle, h: i32) {
    let bt = tree.as_binary_tree();
    let mut child = bt.right_of(vertex).expect("Expected right child to be `Some`.");
    let mut inner = bt.left_of(child);

    if balance(bt, child) == 1 {
        log::debug!("height fix-up: rotating right at {:?} before rotating left", child);
        tree.rotate_right_at(child);
        let bt = tree.binary_tree_mut();
        let child_height = height(bt, Some(child));
        set_height(bt, child, child_height - 1);
        if let Some(inner) = inner {
            let inner_height = height(bt, Some(inner));
            set_height(bt, inner, inner_height + 1);
        }
        child = bt.right_of(vertex).expect("Expected right child to be `Some`.");
        inner = bt.left_of(child);
    }

    log::debug!("height fix-up: rotating left at {:?}", vertex);
    tree.rotate_left_at(vertex);
    settle(tree.binary_tree_mut(), vertex, child, inner, h);
}

fn fix_left_heavy<T>(tree: &mut OrderedTree<T, HeightBalance>, vertex: Handle, h: i32) {
    let bt = tree.as_binary_tree();
    let mut child = bt.left_of(vertex).expect("Expected left child to be `Some`.");
    let mut inner = bt.right_of(child);

    if balance(bt, child) == -1 {
        log::debug!("height fix-up: rotating left at {:?} before rotating right", child);
        tree.rotate_left_at(child);
        let bt = tree.binary_tree_mut();
        let child_height = height(bt, Some(child));
        set_height(bt, child, child_height - 1);
        if let Some(inner) = inner {
            let inner_height = height(bt, Some(inner));
            set_height(bt, inner, inner_height + 1);
        }
        child = bt.left_of(vertex).expect("Expected left child to be `Some`.");
        inner = bt.right_of(child);
    }

    log::debug!("height fix-up: rotating right at {:?}", vertex);
    tree.rotate_right_at(vertex);
    settle(tree.binary_tree_mut(), vertex, child, inner, h);
}

// Walks from `start` to the root. A rotation can change the height of every ancestor, so the walk
// never stops early.
fn rebalance<T>(tree: &mut OrderedTree<T, HeightBalance>, start: Option<Handle>) {
    let mut curr = start;
    while let Some(vertex) = curr {
        let h = update(tree.binary_tree_mut(), vertex);
        match balance(tree.as_binary_tree(), vertex) {
            -2 => fix_right_heavy(tree, vertex, h),
            2 => fix_left_heavy(tree, vertex, h),
            _ => {},
        }
        curr = tree.as_binary_tree().parent_of(vertex);
    }
}

#[cfg(test)]
mod tests {
    use crate::avl_tree::AvlTree;
    use crate::binary_tree::{Payload, VertexRef};
    use crate::error::Error;
    use std::cmp;

    // Returns the true height of the subtree while checking cached heights, balance, and parent
    // links along the way.
    fn check(vertex: Option<VertexRef<'_, u32>>) -> i32 {
        let vertex = match vertex {
            Some(vertex) => vertex,
            None => return -1,
        };
        let left = vertex.left().ok();
        let right = vertex.right().ok();
        for child in left.iter().chain(right.iter()) {
            assert_eq!(child.parent().unwrap().handle(), vertex.handle());
        }
        let left_height = check(left);
        let right_height = check(right);
        assert!((left_height - right_height).abs() <= 1);
        let actual = 1 + cmp::max(left_height, right_height);
        assert_eq!(vertex.payload(), Payload::Height(actual));
        actual
    }

    fn check_tree(tree: &AvlTree<u32>) {
        let height = check(tree.root().ok());
        assert_eq!(tree.height(), height);
    }

    #[test]
    fn test_complete_shape() {
        let tree: AvlTree<u32> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
        check_tree(&tree);
        assert_eq!(tree.height(), 2);
        let mut depths = Vec::new();
        tree.dfs_in_order(|vertex| depths.push(vertex.depth()));
        assert_eq!(depths, vec![2, 1, 2, 0, 2, 1, 2]);
    }

    #[test]
    fn test_single_rotations() {
        let ascending: AvlTree<u32> = vec![1, 2, 3].into_iter().collect();
        check_tree(&ascending);
        assert_eq!(*ascending.root().unwrap().get(), 2);

        let descending: AvlTree<u32> = vec![3, 2, 1].into_iter().collect();
        check_tree(&descending);
        assert_eq!(*descending.root().unwrap().get(), 2);
    }

    #[test]
    fn test_double_rotations() {
        let right_left: AvlTree<u32> = vec![1, 3, 2].into_iter().collect();
        check_tree(&right_left);
        assert_eq!(*right_left.root().unwrap().get(), 2);

        let left_right: AvlTree<u32> = vec![3, 1, 2].into_iter().collect();
        check_tree(&left_right);
        assert_eq!(*left_right.root().unwrap().get(), 2);
    }

    #[test]
    fn test_double_rotations_with_subtrees() {
        // right-left with the inner grandchild carrying children of its own
        let right_left: AvlTree<u32> = vec![20, 10, 40, 30, 50, 25, 35, 27].into_iter().collect();
        check_tree(&right_left);

        let left_right: AvlTree<u32> = vec![50, 30, 60, 20, 40, 35, 45, 43].into_iter().collect();
        check_tree(&left_right);
    }

    #[test]
    fn test_remove_rebalances() {
        let mut tree: AvlTree<u32> = vec![5, 3, 8, 1, 4, 7, 9, 10].into_iter().collect();
        assert_eq!(tree.remove(&1), Some(1));
        check_tree(&tree);
        assert_eq!(tree.remove(&3), Some(3));
        check_tree(&tree);
        assert_eq!(tree.remove(&4), Some(4));
        check_tree(&tree);
        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), vec![5, 7, 8, 9, 10]);
    }

    #[test]
    fn test_remove_root_single() {
        let mut tree = AvlTree::new();
        tree.insert(1);
        assert_eq!(tree.remove(&1), Some(1));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
    }

    #[test]
    fn test_ascending_run() {
        let mut tree = AvlTree::new();
        for i in 0..1000 {
            tree.insert(i);
            check_tree(&tree);
        }
        assert!(tree.height() <= 14);
        for i in 0..1000 {
            assert_eq!(tree.remove(&i), Some(i));
            check_tree(&tree);
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn test_rotation_unsupported() {
        let mut tree: AvlTree<u32> = vec![1, 2, 3].into_iter().collect();
        let before: AvlTree<u32> = vec![1, 2, 3].into_iter().collect();
        let root = tree.root().unwrap().handle();
        assert!(matches!(tree.rotate_left(root), Err(Error::UnsupportedOperation(_))));
        assert!(matches!(tree.rotate_right(root), Err(Error::UnsupportedOperation(_))));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_display() {
        let tree: AvlTree<u32> = vec![2, 1, 3].into_iter().collect();
        assert_eq!(tree.to_string(), "2 1/0\n├─›1 0/0\n└─»3 0/0\n");
    }
}
