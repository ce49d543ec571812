//! Ordered search trees under three balancing disciplines.
//!
//! [`Tree`] is a binary search tree keyed by a total order fixed at
//! construction. The discipline parameter picks how the shape is repaired
//! after every edit:
//!
//! - [`Unbalanced`] ([`BinarySearchTree`]): plain positional insert/splice.
//! - [`Avl`] ([`AvlTree`]): height balanced, balance factor in `{-1, 0, 1}`.
//! - [`RedBlack`] ([`RedBlackTree`]): color balanced, uniform black height.
//!
//! Duplicate keys are kept and ordered to the right of their equals. Every
//! node tracks the size of its subtree, so rank queries ([`Tree::at`],
//! [`Tree::range`]) take `O(height)` under any [`TraversalOrder`].
//!
//! ```
//! use ordtree::{AvlTree, TraversalOrder};
//!
//! let mut tree = AvlTree::new();
//! tree.add_all([1, 2, 5, -3, -6, 12]);
//!
//! assert!(tree.is_valid());
//! assert_eq!(vec![&-6, &-3, &1, &2, &5, &12], tree.in_order().collect::<Vec<_>>());
//! assert_eq!(Ok(&5), tree.at(4));
//!
//! tree.set_traversal_order(TraversalOrder::PreOrder);
//! assert_eq!(Some(&2), tree.traverse().next());
//! ```
mod alloc;
mod avl;
mod config;
mod error;
mod iter;
mod node;
mod rank;
mod red_black;
mod root;
mod search;
mod tree;
mod validate;

use std::{cmp::Ordering, fmt::Debug, marker::PhantomData};

pub use avl::Avl;
pub use config::TreeBuilder;
pub use error::{Result, TreeError};
pub use iter::Iter;
pub use red_black::RedBlack;
pub use tree::Unbalanced;

use alloc::Handle;
use root::{Detached, Root};

/// A caller supplied total order over keys.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red = 0,
    Black = 1,
}

/// Visitation order used by [`Tree::traverse`], [`Tree::at`] and
/// [`Tree::range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree.
    #[default]
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

mod private {
    pub trait Sealed {}
}

/// A balancing discipline: the per-node augmentation it stores and the
/// repairs it runs after the shared positional edits.
///
/// Sealed; the crate provides [`Unbalanced`], [`Avl`] and [`RedBlack`].
#[allow(private_interfaces)]
pub trait Balance: private::Sealed + Sized {
    /// Per-node augmentation.
    type Meta: Copy + Debug + PartialEq;

    /// Augmentation of a freshly linked leaf.
    const LEAF: Self::Meta;

    /// Restores the invariant after `node` was linked in as a new leaf.
    fn after_insert<T>(root: &mut Root<T, Self::Meta>, node: Handle);

    /// Restores the invariant after a node was spliced out.
    fn after_erase<T>(root: &mut Root<T, Self::Meta>, detached: Detached<Self::Meta>);

    /// Checks the discipline specific invariant. Order, links and sizes are
    /// checked separately.
    fn is_balanced<T>(root: &Root<T, Self::Meta>) -> bool;
}

/// An ordered, mutable search tree.
///
/// `D` selects the balancing discipline, see the crate docs.
pub struct Tree<T, D: Balance = Unbalanced> {
    raw: Root<T, D::Meta>,
    order: TraversalOrder,
    _balance: PhantomData<D>,
}

/// A binary search tree that never rebalances.
pub type BinarySearchTree<T> = Tree<T, Unbalanced>;

/// A height balanced (AVL) search tree.
pub type AvlTree<T> = Tree<T, Avl>;

/// A color balanced (red-black) search tree.
pub type RedBlackTree<T> = Tree<T, RedBlack>;
