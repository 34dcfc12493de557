use crate::arena::Handle;
use crate::binary_tree::Payload;
use crate::ordered_tree::tree::OrderedTree;

pub(crate) mod sealed {
    use crate::arena::Handle;
    use crate::ordered_tree::tree::OrderedTree;

    // The fix-up hooks live here so that only this crate can invoke them.
    pub trait Sealed: Sized {
        /// Restores the strategy's invariants after `inserted` was attached as a leaf.
        fn after_insert<T>(tree: &mut OrderedTree<T, Self>, inserted: Handle);

        /// Unlinks `vertex`, which has at most one child, and restores the strategy's invariants.
        /// The vertex itself stays allocated; the engine frees it afterwards.
        fn detach<T>(tree: &mut OrderedTree<T, Self>, vertex: Handle);
    }
}

/// A balancing policy plugged into `OrderedTree<T, S>`.
///
/// The engine performs the structural part of every insertion and removal and then hands control
/// to the strategy, which may recolor vertices or rotate the tree through the engine's internal
/// rotation primitives. The set of strategies is closed: `Unbalanced`, `HeightBalance`, and
/// `ColorBalance`.
pub trait Strategy: sealed::Sealed {
    /// Whether callers may rotate the tree themselves.
    const EXTERNAL_ROTATION: bool;

    /// The payload every new vertex is created with.
    fn payload() -> Payload;
}

/// A plain binary search tree with no balancing. Rotations are open to callers.
pub struct Unbalanced;

impl sealed::Sealed for Unbalanced {
    fn after_insert<T>(_: &mut OrderedTree<T, Self>, _: Handle) {}

    fn detach<T>(tree: &mut OrderedTree<T, Self>, vertex: Handle) {
        tree.splice(vertex);
    }
}

impl Strategy for Unbalanced {
    const EXTERNAL_ROTATION: bool = true;

    fn payload() -> Payload {
        Payload::Plain
    }
}
