use std::iter::FusedIterator;

use crate::{Balance, TraversalOrder, Tree, node::Link, root::Root};

/// Borrowing iterator over a tree's keys in one [`TraversalOrder`].
///
/// Walks parent links, so it holds no stack and iterates from both ends.
pub struct Iter<'a, T, D: Balance> {
    raw: &'a Root<T, D::Meta>,
    order: TraversalOrder,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, T, D: Balance> Iter<'a, T, D> {
    fn new(tree: &'a Tree<T, D>, order: TraversalOrder) -> Self {
        Iter {
            raw: &tree.raw,
            order,
            front: tree.raw.first(order),
            back: tree.raw.last(order),
            remaining: tree.len(),
        }
    }
}

impl<T, D: Balance> Clone for Iter<'_, T, D> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            order: self.order,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, D: Balance> Iterator for Iter<'a, T, D> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.front?;
        self.remaining -= 1;
        self.front = self.raw.step_forward(current, self.order);
        Some(self.raw.key(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, D: Balance> DoubleEndedIterator for Iter<'_, T, D> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.back?;
        self.remaining -= 1;
        self.back = self.raw.step_back(current, self.order);
        Some(self.raw.key(current))
    }
}

impl<T, D: Balance> ExactSizeIterator for Iter<'_, T, D> {}

impl<T, D: Balance> FusedIterator for Iter<'_, T, D> {}

impl<T, D: Balance> Tree<T, D> {
    /// Iterates in the tree's configured [`TraversalOrder`].
    pub fn traverse(&self) -> Iter<'_, T, D> {
        Iter::new(self, self.order)
    }

    /// Left subtree, node, right subtree: ascending under the comparator.
    pub fn in_order(&self) -> Iter<'_, T, D> {
        Iter::new(self, TraversalOrder::InOrder)
    }

    pub fn pre_order(&self) -> Iter<'_, T, D> {
        Iter::new(self, TraversalOrder::PreOrder)
    }

    pub fn post_order(&self) -> Iter<'_, T, D> {
        Iter::new(self, TraversalOrder::PostOrder)
    }
}

impl<'a, T, D: Balance> IntoIterator for &'a Tree<T, D> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.traverse()
    }
}
