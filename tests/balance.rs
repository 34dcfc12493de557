use ordered_trees::avl_tree::AvlTree;
use ordered_trees::binary_tree::{Color, Payload, VertexRef};
use ordered_trees::red_black_tree::RedBlackTree;
use ordered_trees::Error;
use rand::Rng;
use std::cmp;

const NUM_OF_OPERATIONS: usize = 2_000;

fn check_height_balanced(vertex: Option<VertexRef<'_, u32>>) -> i32 {
    let vertex = match vertex {
        Some(vertex) => vertex,
        None => return -1,
    };
    let left_height = check_height_balanced(vertex.left().ok());
    let right_height = check_height_balanced(vertex.right().ok());
    assert!((left_height - right_height).abs() <= 1);
    let height = 1 + cmp::max(left_height, right_height);
    assert_eq!(vertex.payload(), Payload::Height(height));
    height
}

fn check_color_balanced(vertex: Option<VertexRef<'_, u32>>) -> usize {
    let vertex = match vertex {
        Some(vertex) => vertex,
        None => return 0,
    };
    let is_red = vertex.color() == Some(Color::Red);
    for child in vertex.left().ok().iter().chain(vertex.right().ok().iter()) {
        if is_red {
            assert_eq!(child.color(), Some(Color::Black));
        }
    }
    let left_black_height = check_color_balanced(vertex.left().ok());
    let right_black_height = check_color_balanced(vertex.right().ok());
    assert_eq!(left_black_height, right_black_height);
    left_black_height + if is_red { 0 } else { 1 }
}

fn assert_sorted<'a, I: Iterator<Item = &'a u32>>(iter: I) {
    let values = iter.cloned().collect::<Vec<u32>>();
    assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn int_test_avl_random() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = AvlTree::new();
    let mut len = 0;

    for _ in 0..NUM_OF_OPERATIONS {
        let val = rng.gen_range(0, 500u32);
        if rng.gen::<bool>() {
            tree.insert(val);
            len += 1;
        } else if tree.remove(&val).is_some() {
            len -= 1;
        }

        assert_eq!(tree.len(), len);
        let height = check_height_balanced(tree.root().ok());
        assert_eq!(tree.height(), height);
        assert_sorted(tree.iter());
    }
}

#[test]
fn int_test_red_black_random() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = RedBlackTree::new();
    let mut len = 0;

    for _ in 0..NUM_OF_OPERATIONS {
        let val = rng.gen_range(0, 500u32);
        if rng.gen::<bool>() {
            tree.insert(val);
            len += 1;
        } else if tree.remove(&val).is_some() {
            len -= 1;
        }

        assert_eq!(tree.len(), len);
        if let Ok(root) = tree.root() {
            assert_eq!(root.color(), Some(Color::Black));
        }
        check_color_balanced(tree.root().ok());
        assert_sorted(tree.iter());
    }
}

#[test]
fn int_test_avl_complete_shape() {
    let tree: AvlTree<u32> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    assert_eq!(tree.height(), 2);
    let root = tree.root().unwrap();
    assert_eq!(*root.get(), 5);
    for child in &[root.left().unwrap(), root.right().unwrap()] {
        assert!(child.has_left() && child.has_right());
        assert_eq!(child.payload(), Payload::Height(1));
    }
}

#[test]
fn int_test_red_black_colors() {
    let tree: RedBlackTree<u32> = vec![10, 20, 30].into_iter().collect();
    let root = tree.root().unwrap();
    assert_eq!(*root.get(), 20);
    assert_eq!(tree.color(root.handle()), Ok(Color::Black));
    assert_eq!(tree.color(root.left().unwrap().handle()), Ok(Color::Red));
    assert_eq!(tree.color(root.right().unwrap().handle()), Ok(Color::Red));
}

#[test]
fn int_test_balanced_rotation_rejected() {
    let mut avl: AvlTree<u32> = (0..10).collect();
    let before = avl.to_string();
    let root = avl.root().unwrap().handle();
    match avl.rotate_left(root) {
        Err(Error::UnsupportedOperation(_)) => {},
        _ => panic!("Expected an unsupported operation error."),
    }
    assert_eq!(avl.to_string(), before);

    let mut red_black: RedBlackTree<u32> = (0..10).collect();
    let before = red_black.to_string();
    let root = red_black.root().unwrap().handle();
    match red_black.rotate_left(root) {
        Err(Error::UnsupportedOperation(_)) => {},
        _ => panic!("Expected an unsupported operation error."),
    }
    assert_eq!(red_black.to_string(), before);
}

#[test]
fn int_test_balanced_heights() {
    let avl: AvlTree<u32> = (0..(1 << 12)).collect();
    assert_eq!(avl.height(), 12);

    let red_black: RedBlackTree<u32> = (0..(1 << 12)).collect();
    assert!(red_black.height() <= 24);
}
