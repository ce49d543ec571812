use std::{fmt::Debug, marker::PhantomData};

use log::debug;

use crate::{
    Balance, Comparator, TraversalOrder, Tree, TreeBuilder,
    alloc::Handle,
    node::Link,
    private::Sealed,
    root::{Detached, Root},
    validate,
};

/// No balancing: the shape is whatever the insertion order produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unbalanced;

impl Sealed for Unbalanced {}

#[allow(private_interfaces)]
impl Balance for Unbalanced {
    type Meta = ();

    const LEAF: () = ();

    fn after_insert<T>(_: &mut Root<T, ()>, _: Handle) {}

    fn after_erase<T>(_: &mut Root<T, ()>, _: Detached<()>) {}

    // Without rotations, keys equal to a node only ever hang on its right.
    fn is_balanced<T>(root: &Root<T, ()>) -> bool {
        validate::ordered(root, true)
    }
}

impl<T: Ord, D: Balance> Tree<T, D> {
    /// An empty tree ordered by `T`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_comparator(T::cmp)
    }
}

impl<T, D: Balance> Tree<T, D> {
    /// An empty tree ordered by `cmp`.
    ///
    /// `cmp` is a plain function pointer, so it cannot capture state; a
    /// closure must not borrow or move anything from its environment.
    pub fn with_comparator(cmp: Comparator<T>) -> Self {
        Tree {
            raw: Root::new(cmp, 0),
            order: TraversalOrder::default(),
            _balance: PhantomData,
        }
    }

    pub fn builder() -> TreeBuilder<T> {
        TreeBuilder::new()
    }

    pub fn comparator(&self) -> Comparator<T> {
        self.raw.comparator()
    }

    /// Inserts `key`. Keys equal to ones already present are kept.
    pub fn add(&mut self, key: T) {
        let node = self.raw.insert_leaf(key, D::LEAF);
        D::after_insert(&mut self.raw, node);
    }

    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, keys: I) {
        for key in keys {
            self.add(key);
        }
    }

    /// Removes one key comparing equal to `key` and returns it, or `None`
    /// if there is none.
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let Some(node) = self.raw.locate(key) else {
            debug!("remove: no matching key among {} nodes", self.len());
            return None;
        };
        let (key, detached) = self.raw.erase(node);
        D::after_erase(&mut self.raw, detached);
        Some(key)
    }

    /// Removes one match per key yielded and returns how many were found.
    pub fn remove_all<'a, I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        keys.into_iter()
            .filter(|key| self.remove(key).is_some())
            .count()
    }

    pub fn clear(&mut self) {
        debug!("clear: dropping {} nodes", self.len());
        self.raw.clear();
    }

    pub fn contains(&self, key: &T) -> bool {
        self.raw.locate(key).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.root.is_none()
    }

    /// The key stored at the root.
    pub fn root(&self) -> Option<&T> {
        self.raw.root.map(|h| self.raw.key(h))
    }

    /// Number of nodes on the longest path from the root down to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: Vec<Handle> = self.raw.root.into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|&h| {
                    let node = self.raw.node(h);
                    [node.left, node.right]
                })
                .flatten()
                .collect();
        }
        height
    }

    /// Levels of the tree, counting the empty slots below the deepest node.
    /// An empty tree still has the one level holding its empty root slot.
    pub fn levels(&self) -> usize {
        self.height() + 1
    }

    pub fn leaf_count(&self) -> usize {
        let mut stack: Vec<Handle> = self.raw.root.into_iter().collect();
        let mut leaves = 0;
        while let Some(h) = stack.pop() {
            let node = self.raw.node(h);
            if node.is_leaf() {
                leaves += 1;
            }
            stack.extend([node.left, node.right].into_iter().flatten());
        }
        leaves
    }

    pub fn traversal_order(&self) -> TraversalOrder {
        self.order
    }

    /// Sets the order used by [`Tree::traverse`], [`Tree::at`] and
    /// [`Tree::range`].
    pub fn set_traversal_order(&mut self, order: TraversalOrder) {
        self.order = order;
    }

    #[inline(always)]
    pub(crate) fn key_of(&self, link: Link) -> Option<&T> {
        link.map(|h| self.raw.key(h))
    }
}

impl<T: Ord, D: Balance> Default for Tree<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, D: Balance> Clone for Tree<T, D> {
    fn clone(&self) -> Self {
        Tree {
            raw: self.raw.clone(),
            order: self.order,
            _balance: PhantomData,
        }
    }
}

impl<T: Debug, D: Balance> Debug for Tree<T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.traverse()).finish()
    }
}

impl<T, D: Balance> Extend<T> for Tree<T, D> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T: Ord, D: Balance> FromIterator<T> for Tree<T, D> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.add_all(iter);
        tree
    }
}
