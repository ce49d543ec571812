use std::cmp::Ordering;

use log::trace;

use crate::{
    Comparator,
    alloc::{Arena, Handle},
    node::{Link, Node, Side},
};

/// The node graph of a tree: arena, root link and comparator.
///
/// This is the ordered-position core shared by every discipline. It performs
/// the raw binary-search-tree edits and keeps parent links and subtree sizes
/// consistent; rebalancing is layered on top.
#[derive(Clone)]
pub struct Root<T, M> {
    nodes: Arena<Node<T, M>>,
    pub(crate) root: Link,
    cmp: Comparator<T>,
}

/// What a splice left behind, handed to the rebalancer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detached<M> {
    /// Deepest node whose subtree lost a node. `None` when the removed node
    /// was the root and had at most one child.
    pub(crate) parent: Link,
    /// The child slot of `parent` that got shorter.
    pub(crate) side: Side,
    /// What now occupies that slot.
    pub(crate) child: Link,
    /// Augmentation of the node that physically left its position: the
    /// removed node itself, or its successor when that was moved up.
    pub(crate) vacated: M,
}

impl<T, M> Root<T, M> {
    pub(crate) fn new(cmp: Comparator<T>, capacity: usize) -> Self {
        Root {
            nodes: Arena::with_capacity(capacity),
            root: None,
            cmp,
        }
    }

    #[inline(always)]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T, M> {
        self.nodes.get(handle)
    }

    #[inline(always)]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<T, M> {
        self.nodes.get_mut(handle)
    }

    #[inline(always)]
    pub(crate) fn key(&self, handle: Handle) -> &T {
        &self.nodes.get(handle).key
    }

    #[inline(always)]
    pub(crate) fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.cmp)(a, b)
    }

    pub(crate) fn comparator(&self) -> Comparator<T> {
        self.cmp
    }

    #[inline(always)]
    pub(crate) fn child(&self, handle: Handle, side: Side) -> Link {
        self.node(handle).child(side)
    }

    #[inline(always)]
    pub(crate) fn set_child(&mut self, handle: Handle, side: Side, child: Link) {
        let node = self.node_mut(handle);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    #[inline(always)]
    pub(crate) fn set_parent(&mut self, link: Link, parent: Link) {
        if let Some(h) = link {
            self.node_mut(h).parent = parent;
        }
    }

    #[inline(always)]
    pub(crate) fn meta(&self, handle: Handle) -> M
    where
        M: Copy,
    {
        self.node(handle).meta
    }

    #[inline(always)]
    pub(crate) fn set_meta(&mut self, handle: Handle, meta: M) {
        self.node_mut(handle).meta = meta;
    }

    /// The side of `parent` that `child` hangs from.
    #[inline(always)]
    pub(crate) fn side_of(&self, child: Handle, parent: Handle) -> Side {
        if self.node(parent).left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    #[inline(always)]
    pub(crate) fn size(&self, link: Link) -> usize {
        link.map_or(0, |h| self.node(h).size)
    }

    /// Live nodes in the arena.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Finds a node comparing equal to `key`, walking by the order invariant.
    pub(crate) fn locate(&self, key: &T) -> Link {
        let mut link = self.root;
        while let Some(h) = link {
            let node = self.node(h);
            match self.compare(key, &node.key) {
                Ordering::Less => link = node.left,
                Ordering::Equal => return Some(h),
                Ordering::Greater => link = node.right,
            }
        }
        None
    }

    /// Links `key` as a new leaf at its ordered position and returns it.
    ///
    /// Equal keys descend to the right. Subtree sizes along the path are
    /// bumped; nothing is rebalanced.
    pub(crate) fn insert_leaf(&mut self, key: T, meta: M) -> Handle {
        let mut parent = None;
        let mut side = Side::Left;
        let mut link = self.root;
        while let Some(h) = link {
            parent = Some(h);
            let node = self.node(h);
            if self.compare(&key, &node.key) == Ordering::Less {
                side = Side::Left;
                link = node.left;
            } else {
                side = Side::Right;
                link = node.right;
            }
        }

        let handle = self.nodes.alloc(Node::new(key, parent, meta));
        match parent {
            Some(p) => self.set_child(p, side, Some(handle)),
            None => self.root = Some(handle),
        }

        let mut up = parent;
        while let Some(h) = up {
            let node = self.node_mut(h);
            node.size += 1;
            up = node.parent;
        }
        handle
    }

    /// Points `parent`'s slot holding `old` (or the root) at `new`.
    pub(crate) fn change_child(&mut self, old: Handle, new: Link, parent: Link) {
        match parent {
            Some(p) => {
                let side = self.side_of(old, p);
                self.set_child(p, side, new);
            }
            None => self.root = new,
        }
    }

    /// Replaces `u`, which has at most one real child, by `v` in `u`'s
    /// parent slot.
    pub(crate) fn splice(&mut self, u: Handle, v: Link) {
        let parent = self.node(u).parent;
        self.change_child(u, v, parent);
        self.set_parent(v, parent);
    }

    /// Unlinks `z` from the tree and returns its key with a description of
    /// the vacated position.
    ///
    /// When `z` has two children its in-order successor takes its place and
    /// inherits its augmentation. Subtree sizes are already correct on
    /// return.
    pub(crate) fn erase(&mut self, z: Handle) -> (T, Detached<M>)
    where
        M: Copy,
    {
        let Node {
            parent: z_parent,
            left: z_left,
            right: z_right,
            meta: z_meta,
            ..
        } = *self.node(z);
        let z_side = z_parent.map_or(Side::Left, |p| self.side_of(z, p));

        let detached = match (z_left, z_right) {
            (None, _) => {
                self.splice(z, z_right);
                Detached {
                    parent: z_parent,
                    side: z_side,
                    child: z_right,
                    vacated: z_meta,
                }
            }
            (Some(_), None) => {
                self.splice(z, z_left);
                Detached {
                    parent: z_parent,
                    side: z_side,
                    child: z_left,
                    vacated: z_meta,
                }
            }
            (Some(left), Some(right)) => {
                let y = self.leftmost(right);
                let Node {
                    parent: y_parent,
                    right: y_right,
                    meta: y_meta,
                    ..
                } = *self.node(y);

                let (parent, side) = if y == right {
                    (Some(y), Side::Right)
                } else {
                    self.splice(y, y_right);
                    self.node_mut(y).right = Some(right);
                    self.node_mut(right).parent = Some(y);
                    (y_parent, Side::Left)
                };

                self.splice(z, Some(y));
                self.node_mut(y).left = Some(left);
                self.node_mut(left).parent = Some(y);
                self.set_meta(y, z_meta);

                Detached {
                    parent,
                    side,
                    child: y_right,
                    vacated: y_meta,
                }
            }
        };

        self.propagate(detached.parent);
        let node = self.nodes.take(z);
        (node.key, detached)
    }

    /// Recomputes subtree sizes from `link` up to the root.
    pub(crate) fn propagate(&mut self, mut link: Link) {
        while let Some(h) = link {
            self.update_size(h);
            link = self.node(h).parent;
        }
    }

    #[inline(always)]
    fn update_size(&mut self, h: Handle) {
        let node = self.node(h);
        let size = 1 + self.size(node.left) + self.size(node.right);
        self.node_mut(h).size = size;
    }

    /// Rotates `x` down to the left; its right child takes its place and is
    /// returned.
    ///
    /// ```text
    ///     x                y
    ///    / \              / \
    ///   a   y     -->    x   c
    ///      / \          / \
    ///     b   c        a   b
    /// ```
    ///
    /// # Panics
    ///
    /// Panics when `x` has no right child; that is a rebalancer bug.
    pub(crate) fn rotate_left(&mut self, x: Handle) -> Handle {
        let y = self
            .node(x)
            .right
            .expect("rotate_left: pivot has no right child");
        self.rotate(x, y, Side::Left)
    }

    /// Mirror of [`Root::rotate_left`].
    ///
    /// # Panics
    ///
    /// Panics when `x` has no left child; that is a rebalancer bug.
    pub(crate) fn rotate_right(&mut self, x: Handle) -> Handle {
        let y = self
            .node(x)
            .left
            .expect("rotate_right: pivot has no left child");
        self.rotate(x, y, Side::Right)
    }

    /// Rotates `x` down toward `side`.
    pub(crate) fn rotate_toward(&mut self, x: Handle, side: Side) -> Handle {
        match side {
            Side::Left => self.rotate_left(x),
            Side::Right => self.rotate_right(x),
        }
    }

    // `y` is `x`'s child opposite to `down`.
    fn rotate(&mut self, x: Handle, y: Handle, down: Side) -> Handle {
        let parent = self.node(x).parent;
        let inner = self.child(y, down);

        self.set_child(x, down.opposite(), inner);
        self.set_parent(inner, Some(x));

        self.set_child(y, down, Some(x));
        self.node_mut(y).parent = parent;
        self.change_child(x, Some(y), parent);
        self.node_mut(x).parent = Some(y);

        self.update_size(x);
        self.update_size(y);
        trace!("rotated {down:?} about {x:?}, {y:?} moved up");
        y
    }
}
