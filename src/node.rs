use std::fmt::Debug;

use crate::{TraversalOrder, alloc::Handle, root::Root};

pub(crate) type Link = Option<Handle>;

/// Which child slot of its parent a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline(always)]
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<T, M> {
    pub(crate) key: T,
    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
    // Number of nodes in the subtree rooted here, this one included.
    pub(crate) size: usize,
    pub(crate) meta: M,
}

impl<T, M> Node<T, M> {
    pub(crate) fn new(key: T, parent: Link, meta: M) -> Self {
        Node {
            key,
            parent,
            left: None,
            right: None,
            size: 1,
            meta,
        }
    }

    #[inline(always)]
    pub(crate) fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline(always)]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl<T, M> Debug for Node<T, M>
where
    T: Debug,
    M: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}::({:?})", self.meta, self.key))
    }
}

// Navigation. None of these allocate or recurse; they walk parent links.
impl<T, M> Root<T, M> {
    pub(crate) fn leftmost(&self, mut node: Handle) -> Handle {
        while let Some(left) = self.node(node).left {
            node = left;
        }
        node
    }

    pub(crate) fn rightmost(&self, mut node: Handle) -> Handle {
        while let Some(right) = self.node(node).right {
            node = right;
        }
        node
    }

    /// Descends preferring left children, then right ones, down to a leaf:
    /// the first node of `node`'s subtree in post-order.
    pub(crate) fn left_deepest(&self, mut node: Handle) -> Handle {
        loop {
            let n = self.node(node);
            match n.left.or(n.right) {
                Some(next) => node = next,
                None => return node,
            }
        }
    }

    /// Mirror of [`Root::left_deepest`]: the last node of `node`'s subtree in
    /// pre-order.
    pub(crate) fn right_deepest(&self, mut node: Handle) -> Handle {
        loop {
            let n = self.node(node);
            match n.right.or(n.left) {
                Some(next) => node = next,
                None => return node,
            }
        }
    }

    /// In-order successor.
    pub(crate) fn next(&self, node: Handle) -> Link {
        // If we have a right-hand child, go down and then left as far as we
        // can.
        if let Some(right) = self.node(node).right {
            return Some(self.leftmost(right));
        }
        // Otherwise climb while we are a right-hand child; the first parent
        // reached from its left side is the successor.
        let mut current = node;
        let mut parent = self.node(node).parent;
        while let Some(p) = parent {
            if self.node(p).right != Some(current) {
                break;
            }
            current = p;
            parent = self.node(p).parent;
        }
        parent
    }

    /// In-order predecessor.
    pub(crate) fn prev(&self, node: Handle) -> Link {
        if let Some(left) = self.node(node).left {
            return Some(self.rightmost(left));
        }
        let mut current = node;
        let mut parent = self.node(node).parent;
        while let Some(p) = parent {
            if self.node(p).left != Some(current) {
                break;
            }
            current = p;
            parent = self.node(p).parent;
        }
        parent
    }

    fn next_preorder(&self, node: Handle) -> Link {
        let n = self.node(node);
        if let Some(child) = n.left.or(n.right) {
            return Some(child);
        }
        // A leaf: climb until we leave a left subtree whose sibling exists.
        let mut current = node;
        let mut parent = n.parent;
        while let Some(p) = parent {
            let pn = self.node(p);
            if pn.left == Some(current) && pn.right.is_some() {
                return pn.right;
            }
            current = p;
            parent = pn.parent;
        }
        None
    }

    fn prev_preorder(&self, node: Handle) -> Link {
        let parent = self.node(node).parent?;
        let pn = self.node(parent);
        match pn.left {
            Some(left) if pn.right == Some(node) => Some(self.right_deepest(left)),
            _ => Some(parent),
        }
    }

    fn next_postorder(&self, node: Handle) -> Link {
        let parent = self.node(node).parent?;
        let pn = self.node(parent);
        match pn.right {
            // If we are the parent's left node, go to the parent's right
            // node then all the way down to the left.
            Some(right) if pn.left == Some(node) => Some(self.left_deepest(right)),
            _ => Some(parent),
        }
    }

    fn prev_postorder(&self, node: Handle) -> Link {
        let n = self.node(node);
        if let Some(child) = n.right.or(n.left) {
            return Some(child);
        }
        let mut current = node;
        let mut parent = n.parent;
        while let Some(p) = parent {
            let pn = self.node(p);
            if pn.right == Some(current) && pn.left.is_some() {
                return pn.left;
            }
            current = p;
            parent = pn.parent;
        }
        None
    }

    /// First node visited under `order`.
    pub(crate) fn first(&self, order: TraversalOrder) -> Link {
        let root = self.root?;
        Some(match order {
            TraversalOrder::InOrder => self.leftmost(root),
            TraversalOrder::PreOrder => root,
            TraversalOrder::PostOrder => self.left_deepest(root),
        })
    }

    /// Last node visited under `order`.
    pub(crate) fn last(&self, order: TraversalOrder) -> Link {
        let root = self.root?;
        Some(match order {
            TraversalOrder::InOrder => self.rightmost(root),
            TraversalOrder::PreOrder => self.right_deepest(root),
            TraversalOrder::PostOrder => root,
        })
    }

    pub(crate) fn step_forward(&self, node: Handle, order: TraversalOrder) -> Link {
        match order {
            TraversalOrder::InOrder => self.next(node),
            TraversalOrder::PreOrder => self.next_preorder(node),
            TraversalOrder::PostOrder => self.next_postorder(node),
        }
    }

    pub(crate) fn step_back(&self, node: Handle, order: TraversalOrder) -> Link {
        match order {
            TraversalOrder::InOrder => self.prev(node),
            TraversalOrder::PreOrder => self.prev_preorder(node),
            TraversalOrder::PostOrder => self.prev_postorder(node),
        }
    }
}
