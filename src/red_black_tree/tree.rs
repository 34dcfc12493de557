use crate::arena::Handle;
use crate::binary_tree::{BinaryTree, Color, Payload};
use crate::error::{Error, Result};
use crate::ordered_tree::{sealed, OrderedTree, Strategy};
use std::mem;

/// Keeps the tree approximately balanced with a color on every vertex.
///
/// The root is black, a red vertex only has black children, and every path from a vertex down to
/// an absent child crosses the same number of black vertices. Absent children count as black.
pub struct ColorBalance;

impl sealed::Sealed for ColorBalance {
    fn after_insert<T>(tree: &mut OrderedTree<T, Self>, inserted: Handle) {
        set_color(tree.binary_tree_mut(), inserted, Color::Red);
        fix_insert(tree, inserted);
    }

    fn detach<T>(tree: &mut OrderedTree<T, Self>, vertex: Handle) {
        let bt = tree.binary_tree_mut();
        let phantom = if bt.left_of(vertex).is_none() && bt.right_of(vertex).is_none() {
            let phantom = bt.new_phantom(Payload::Color(Color::Black));
            bt.node_mut(vertex).left = Some(phantom);
            bt.node_mut(phantom).parent = Some(vertex);
            Some(phantom)
        } else {
            None
        };

        let replacement = tree
            .splice(vertex)
            .expect("Expected the spliced vertex to have a child.");

        let bt = tree.as_binary_tree();
        if is_red(bt, Some(replacement)) {
            log::debug!("color fix-up: recoloring replacement {:?} black", replacement);
            set_color(tree.binary_tree_mut(), replacement, Color::Black);
        } else if !is_red(bt, Some(vertex)) {
            fix_remove(tree, replacement);
        }

        if let Some(phantom) = phantom {
            let bt = tree.binary_tree_mut();
            let parent = bt.parent_of(phantom);
            bt.replace_child(parent, phantom, None);
            bt.release(phantom);
        }
    }
}

impl Strategy for ColorBalance {
    const EXTERNAL_ROTATION: bool = false;

    fn payload() -> Payload {
        Payload::Color(Color::None)
    }
}

fn color<T>(tree: &BinaryTree<T>, handle: Option<Handle>) -> Color {
    match handle {
        None => Color::Black,
        Some(handle) => match tree.payload(handle) {
            Payload::Color(color) => color,
            _ => unreachable!(),
        },
    }
}

fn is_red<T>(tree: &BinaryTree<T>, handle: Option<Handle>) -> bool {
    color(tree, handle) == Color::Red
}

fn set_color<T>(tree: &mut BinaryTree<T>, handle: Handle, color: Color) {
    tree.set_payload(handle, Payload::Color(color));
}

fn sibling<T>(tree: &BinaryTree<T>, parent: Handle, child: Handle) -> Option<Handle> {
    if tree.left_of(parent) == Some(child) {
        tree.right_of(parent)
    } else {
        tree.left_of(parent)
    }
}

fn fix_insert<T>(tree: &mut OrderedTree<T, ColorBalance>, inserted: Handle) {
    let mut vertex = inserted;
    loop {
        let bt = tree.as_binary_tree();
        let mut parent = match bt.parent_of(vertex) {
            Some(parent) => parent,
            None => {
                set_color(tree.binary_tree_mut(), vertex, Color::Black);
                return;
            },
        };
        if !is_red(bt, Some(parent)) {
            return;
        }

        let grandparent = bt
            .parent_of(parent)
            .expect("Expected a red vertex to have a parent.");
        let uncle = sibling(bt, grandparent, parent);
        if let Some(uncle) = uncle.filter(|&uncle| is_red(bt, Some(uncle))) {
            log::debug!("color fix-up: pushing red up to {:?}", grandparent);
            let bt = tree.binary_tree_mut();
            set_color(bt, uncle, Color::Black);
            set_color(bt, parent, Color::Black);
            set_color(bt, grandparent, Color::Red);
            vertex = grandparent;
            continue;
        }

        let parent_is_left = bt.is_left_child(parent);
        let vertex_is_left = bt.is_left_child(vertex);
        if parent_is_left && !vertex_is_left {
            log::debug!("color fix-up: aligning zig-zag at {:?}", parent);
            tree.rotate_left_at(parent);
            mem::swap(&mut parent, &mut vertex);
        } else if !parent_is_left && vertex_is_left {
            log::debug!("color fix-up: aligning zig-zag at {:?}", parent);
            tree.rotate_right_at(parent);
            mem::swap(&mut parent, &mut vertex);
        }

        log::debug!("color fix-up: rotating at grandparent {:?}", grandparent);
        let bt = tree.binary_tree_mut();
        set_color(bt, parent, Color::Black);
        set_color(bt, grandparent, Color::Red);
        if bt.left_of(parent) == Some(vertex) {
            tree.rotate_right_at(grandparent);
        } else {
            tree.rotate_left_at(grandparent);
        }
        return;
    }
}

// `vertex` sits one black short of its sibling's side.
fn fix_remove<T>(tree: &mut OrderedTree<T, ColorBalance>, start: Handle) {
    let mut vertex = start;
    loop {
        let bt = tree.as_binary_tree();
        let parent = match bt.parent_of(vertex) {
            Some(parent) => parent,
            None => return,
        };
        let mut brother = sibling(bt, parent, vertex).expect("Expected a sibling to be `Some`.");

        if is_red(bt, Some(brother)) {
            log::debug!("color fix-up: red sibling {:?}, rotating at {:?}", brother, parent);
            let bt = tree.binary_tree_mut();
            set_color(bt, parent, Color::Red);
            set_color(bt, brother, Color::Black);
            if bt.left_of(parent) == Some(vertex) {
                tree.rotate_left_at(parent);
            } else {
                tree.rotate_right_at(parent);
            }
            brother = sibling(tree.as_binary_tree(), parent, vertex)
                .expect("Expected a sibling to be `Some`.");
        }

        let bt = tree.as_binary_tree();
        let brother_left = bt.left_of(brother);
        let brother_right = bt.right_of(brother);
        let nephews_black = !is_red(bt, brother_left) && !is_red(bt, brother_right);

        if !is_red(bt, Some(parent)) && !is_red(bt, Some(brother)) && nephews_black {
            log::debug!("color fix-up: moving the missing black up to {:?}", parent);
            set_color(tree.binary_tree_mut(), brother, Color::Red);
            vertex = parent;
            continue;
        }

        if !is_red(bt, Some(brother)) && nephews_black && is_red(bt, Some(parent)) {
            log::debug!("color fix-up: trading colors of {:?} and {:?}", parent, brother);
            let bt = tree.binary_tree_mut();
            set_color(bt, brother, Color::Red);
            set_color(bt, parent, Color::Black);
            return;
        }

        let vertex_is_left = bt.is_left_child(vertex);
        let (near, far) = if vertex_is_left {
            (brother_left, brother_right)
        } else {
            (brother_right, brother_left)
        };
        if is_red(bt, near) && !is_red(bt, far) {
            log::debug!("color fix-up: turning near nephew outwards at {:?}", brother);
            let near = near.expect("Expected a red nephew to be `Some`.");
            let bt = tree.binary_tree_mut();
            set_color(bt, brother, Color::Red);
            set_color(bt, near, Color::Black);
            if vertex_is_left {
                tree.rotate_right_at(brother);
            } else {
                tree.rotate_left_at(brother);
            }
            brother = sibling(tree.as_binary_tree(), parent, vertex)
                .expect("Expected a sibling to be `Some`.");
        }

        log::debug!("color fix-up: rotating at {:?} to restore black height", parent);
        let bt = tree.binary_tree_mut();
        let parent_color = color(bt, Some(parent));
        set_color(bt, brother, parent_color);
        set_color(bt, parent, Color::Black);
        let far = if vertex_is_left {
            bt.right_of(brother)
        } else {
            bt.left_of(brother)
        };
        if let Some(far) = far {
            set_color(bt, far, Color::Black);
        }
        if vertex_is_left {
            tree.rotate_left_at(parent);
        } else {
            tree.rotate_right_at(parent);
        }
        return;
    }
}

impl<T> OrderedTree<T, ColorBalance> {
    /// Returns the color of the vertex behind `handle`, or `Error::ContractViolation` if the
    /// handle is not a live vertex of this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::binary_tree::Color;
    /// use ordered_trees::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = vec![1, 2].into_iter().collect();
    /// let root = tree.root().unwrap().handle();
    /// assert_eq!(tree.color(root), Ok(Color::Black));
    /// ```
    pub fn color(&self, handle: Handle) -> Result<Color> {
        let vertex = self.vertex(handle)?;
        match vertex.payload() {
            Payload::Color(color) => Ok(color),
            payload => Err(Error::ContractViolation(format!(
                "{:?} is not a color-balanced vertex",
                payload,
            ))),
        }
    }
}
