//! Order statistics over subtree sizes.
use std::ops::Index;

use crate::{Balance, TraversalOrder, Tree, TreeError, alloc::Handle, root::Root};

impl<T, M> Root<T, M> {
    /// The node visited `index`-th (zero based) under `order`.
    ///
    /// Descends once from the root, so the cost is the tree's height.
    pub(crate) fn select(&self, order: TraversalOrder, mut index: usize) -> Option<Handle> {
        if index >= self.len() {
            return None;
        }
        let mut node = self.root?;
        loop {
            let n = self.node(node);
            let left = self.size(n.left);
            match order {
                TraversalOrder::InOrder => {
                    if index < left {
                        node = n.left?;
                    } else if index == left {
                        return Some(node);
                    } else {
                        index -= left + 1;
                        node = n.right?;
                    }
                }
                TraversalOrder::PreOrder => {
                    if index == 0 {
                        return Some(node);
                    }
                    index -= 1;
                    if index < left {
                        node = n.left?;
                    } else {
                        index -= left;
                        node = n.right?;
                    }
                }
                TraversalOrder::PostOrder => {
                    if index < left {
                        node = n.left?;
                        continue;
                    }
                    index -= left;
                    if index < self.size(n.right) {
                        node = n.right?;
                    } else {
                        return Some(node);
                    }
                }
            }
        }
    }
}

impl<T, D: Balance> Tree<T, D> {
    /// The key at position `index` of [`Tree::traverse`].
    ///
    /// # Errors
    ///
    /// [`TreeError::IndexOutOfRange`] unless `index < len()`.
    pub fn at(&self, index: usize) -> crate::Result<&T> {
        self.raw
            .select(self.order, index)
            .map(|h| self.raw.key(h))
            .ok_or(TreeError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// `count` consecutive keys of [`Tree::traverse`] starting at `index`.
    ///
    /// # Errors
    ///
    /// [`TreeError::RangeOutOfBounds`] unless both `index` and
    /// `index + count` are below `len()`, so the last key is never part of
    /// a non-empty range.
    pub fn range(&self, index: usize, count: usize) -> crate::Result<Vec<&T>> {
        let len = self.len();
        let in_bounds = index < len && index.checked_add(count).is_some_and(|end| end < len);
        if !in_bounds {
            return Err(TreeError::RangeOutOfBounds { index, count, len });
        }

        let mut keys = Vec::with_capacity(count);
        let mut cursor = self.raw.select(self.order, index);
        while let Some(h) = cursor {
            if keys.len() == count {
                break;
            }
            keys.push(self.raw.key(h));
            cursor = self.raw.step_forward(h, self.order);
        }
        Ok(keys)
    }
}

impl<T, D: Balance> Index<usize> for Tree<T, D> {
    type Output = T;

    /// Returns the key at `index` in traversal order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(key) => key,
            Err(e) => panic!("{e}"),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{AvlTree, BinarySearchTree, RedBlackTree, TraversalOrder, TreeError};
    use pretty_assertions::assert_eq;
    use quickcheck_macros::quickcheck;

    fn sample() -> BinarySearchTree<i32> {
        [5, 3, 8, 1, 4, 7, 9].into_iter().collect()
    }

    #[test]
    fn at_in_order() {
        let tree = sample();
        assert_eq!(Ok(&1), tree.at(0));
        assert_eq!(Ok(&5), tree.at(3));
        assert_eq!(Ok(&9), tree.at(6));
        assert_eq!(Err(TreeError::IndexOutOfRange { index: 7, len: 7 }), tree.at(7));
    }

    #[test]
    fn at_pre_and_post_order() {
        let mut tree = sample();
        tree.set_traversal_order(TraversalOrder::PreOrder);
        assert_eq!(Ok(&5), tree.at(0));
        assert_eq!(Ok(&4), tree.at(3));
        assert_eq!(Ok(&9), tree.at(6));
        tree.set_traversal_order(TraversalOrder::PostOrder);
        assert_eq!(Ok(&1), tree.at(0));
        assert_eq!(Ok(&7), tree.at(3));
        assert_eq!(Ok(&5), tree.at(6));
    }

    #[test]
    fn range_in_order() {
        let tree = sample();
        assert_eq!(Ok(vec![&4, &5, &7]), tree.range(2, 3));
        assert_eq!(Ok(vec![&7, &8]), tree.range(4, 2));
        assert_eq!(Ok(vec![]), tree.range(0, 0));
        assert_eq!(Ok(vec![]), tree.range(6, 0));
    }

    #[test]
    fn range_out_of_bounds() {
        let tree = sample();
        assert_eq!(
            Err(TreeError::RangeOutOfBounds {
                index: 5,
                count: 3,
                len: 7
            }),
            tree.range(5, 3)
        );
        assert!(tree.range(7, 0).is_err());
        assert!(tree.range(0, 7).is_err());
        assert!(tree.range(1, usize::MAX).is_err());
        assert!(BinarySearchTree::<u8>::new().range(0, 0).is_err());
    }

    #[test]
    fn range_reaching_the_end_is_out_of_bounds() {
        let tree = sample();
        assert_eq!(
            Err(TreeError::RangeOutOfBounds {
                index: 6,
                count: 1,
                len: 7
            }),
            tree.range(6, 1)
        );
        assert_eq!(
            Err(TreeError::RangeOutOfBounds {
                index: 4,
                count: 3,
                len: 7
            }),
            tree.range(4, 3)
        );
    }

    #[test]
    fn index_operator() {
        let tree: RedBlackTree<_> = ["b", "c", "a"].into_iter().collect();
        assert_eq!("a", tree[0]);
        assert_eq!("c", tree[2]);
    }

    #[test]
    #[should_panic(expected = "index 3 out of range for tree of 3 keys")]
    fn index_panics() {
        let tree: RedBlackTree<_> = [1, 2, 3].into_iter().collect();
        let _ = &tree[3];
    }

    #[test]
    fn ranks_track_removals() {
        let mut tree: AvlTree<_> = (0..100).collect();
        tree.remove_all(&(0..100).filter(|k| k % 3 == 0).collect::<Vec<_>>());
        let rest: Vec<_> = (0..100).filter(|k| k % 3 != 0).collect();
        for (i, k) in rest.iter().enumerate() {
            assert_eq!(Ok(k), tree.at(i));
        }
    }

    #[quickcheck]
    fn at_matches_traverse(keys: Vec<i16>, removes: Vec<i16>) -> bool {
        let mut trees = (
            keys.iter().copied().collect::<BinarySearchTree<_>>(),
            keys.iter().copied().collect::<RedBlackTree<_>>(),
        );
        trees.0.remove_all(&removes);
        trees.1.remove_all(&removes);
        [TraversalOrder::InOrder, TraversalOrder::PreOrder, TraversalOrder::PostOrder]
            .into_iter()
            .all(|order| {
                trees.0.set_traversal_order(order);
                trees.1.set_traversal_order(order);
                trees.0.traverse().enumerate().all(|(i, k)| trees.0.at(i) == Ok(k))
                    && trees.1.traverse().enumerate().all(|(i, k)| trees.1.at(i) == Ok(k))
            })
    }

    #[quickcheck]
    fn range_matches_traverse(keys: Vec<u8>, index: usize, count: usize) -> bool {
        let tree: AvlTree<_> = keys.into_iter().collect();
        match tree.range(index, count) {
            Ok(keys) => keys == tree.traverse().skip(index).take(count).collect::<Vec<_>>(),
            Err(_) => index >= tree.len() || index.saturating_add(count) >= tree.len(),
        }
    }
}
