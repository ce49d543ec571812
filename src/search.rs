use std::collections::HashSet;

use crate::{Balance, Tree, alloc::Handle};

impl<T, D: Balance> Tree<T, D> {
    /// Smallest key under the comparator.
    pub fn min(&self) -> Option<&T> {
        self.key_of(self.raw.root.map(|r| self.raw.leftmost(r)))
    }

    /// Largest key under the comparator.
    pub fn max(&self) -> Option<&T> {
        self.key_of(self.raw.root.map(|r| self.raw.rightmost(r)))
    }

    /// The key following the root in ascending order.
    pub fn successor(&self) -> Option<&T> {
        self.key_of(self.raw.root.and_then(|r| self.raw.next(r)))
    }

    /// The key preceding the root in ascending order.
    pub fn predecessor(&self) -> Option<&T> {
        self.key_of(self.raw.root.and_then(|r| self.raw.prev(r)))
    }

    /// Smallest key in the subtree of the node matching `key`.
    pub fn subtree_min(&self, key: &T) -> Option<&T> {
        self.key_of(self.raw.locate(key).map(|h| self.raw.leftmost(h)))
    }

    /// Largest key in the subtree of the node matching `key`.
    pub fn subtree_max(&self, key: &T) -> Option<&T> {
        self.key_of(self.raw.locate(key).map(|h| self.raw.rightmost(h)))
    }

    /// The in-order neighbour after the node matching `key`.
    ///
    /// With duplicates this may be another key equal to `key`.
    pub fn successor_of(&self, key: &T) -> Option<&T> {
        self.key_of(self.raw.locate(key).and_then(|h| self.raw.next(h)))
    }

    pub fn predecessor_of(&self, key: &T) -> Option<&T> {
        self.key_of(self.raw.locate(key).and_then(|h| self.raw.prev(h)))
    }

    /// First key in pre-order satisfying `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.pre_order().find(|&key| predicate(key))
    }

    /// Last key in pre-order satisfying `predicate`. Visits right subtrees
    /// before left ones.
    pub fn find_last<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.pre_order().rev().find(|&key| predicate(key))
    }

    /// Keys on the path from the root down to a node matching `target`, or
    /// an empty vector when there is none.
    ///
    /// Explores depth first rather than by comparison, and never expands a
    /// node twice.
    pub fn dfs_path_to(&self, target: &T) -> Vec<&T> {
        let Some(root) = self.raw.root else {
            return Vec::new();
        };

        let mut visited: HashSet<Handle> = HashSet::new();
        let mut path: Vec<Handle> = vec![root];
        while let Some(&top) = path.last() {
            if visited.insert(top) && self.raw.compare(target, self.raw.key(top)).is_eq() {
                return path.iter().map(|&h| self.raw.key(h)).collect();
            }
            let node = self.raw.node(top);
            let next = [node.left, node.right]
                .into_iter()
                .flatten()
                .find(|h| !visited.contains(h));
            match next {
                Some(child) => path.push(child),
                None => {
                    path.pop();
                }
            }
        }
        Vec::new()
    }
}
