//! Structural checks. All walks use an explicit stack, so degenerate trees
//! cannot overflow the call stack.
use std::cmp::Ordering;

use crate::{Balance, Tree, alloc::Handle, node::Link, root::Root};

impl<T, D: Balance> Tree<T, D> {
    /// Checks the order, parent links, subtree sizes and the discipline's
    /// balance invariant. Never mutates.
    pub fn is_valid(&self) -> bool {
        ordered(&self.raw, false) && linked(&self.raw) && D::is_balanced(&self.raw)
    }
}

/// Every key lies between the bounds its ancestors impose: at or above a
/// left-hand ancestor's key and at or below a right-hand one's.
///
/// Rotations may lift an equal key above its twin, so equal keys can sit on
/// either side. With `strict_left` they must sit on the right.
pub(crate) fn ordered<T, M>(root: &Root<T, M>, strict_left: bool) -> bool {
    let mut stack: Vec<(Handle, Option<&T>, Option<&T>)> =
        root.root.map(|r| (r, None, None)).into_iter().collect();
    while let Some((h, lower, upper)) = stack.pop() {
        let node = root.node(h);
        if lower.is_some_and(|low| root.compare(&node.key, low) == Ordering::Less) {
            return false;
        }
        if let Some(high) = upper {
            match root.compare(&node.key, high) {
                Ordering::Greater => return false,
                Ordering::Equal if strict_left => return false,
                _ => {}
            }
        }
        if let Some(left) = node.left {
            stack.push((left, lower, Some(&node.key)));
        }
        if let Some(right) = node.right {
            stack.push((right, Some(&node.key), upper));
        }
    }
    true
}

/// Parent links mirror child links, the root has no parent, every stored
/// size matches the subtree and no node is allocated outside the tree.
pub(crate) fn linked<T, M>(root: &Root<T, M>) -> bool {
    let Some(top) = root.root else {
        return true;
    };
    if root.node(top).parent.is_some() {
        return false;
    }

    // Post-order so children are counted before their parent.
    let mut counted: Vec<usize> = Vec::new();
    let mut stack: Vec<(Handle, bool)> = vec![(top, false)];
    while let Some((h, expanded)) = stack.pop() {
        let node = root.node(h);
        if expanded {
            // The right subtree was walked first, so its count lies deeper.
            let left = pop_count(&mut counted, node.left);
            let right = pop_count(&mut counted, node.right);
            let size = 1 + left + right;
            if size != node.size {
                return false;
            }
            counted.push(size);
            continue;
        }
        stack.push((h, true));
        for child in [node.left, node.right].into_iter().flatten() {
            if root.node(child).parent != Some(h) {
                return false;
            }
            stack.push((child, false));
        }
    }
    counted == [root.len()]
}

#[inline(always)]
fn pop_count(counted: &mut Vec<usize>, link: Link) -> usize {
    match link {
        Some(_) => counted.pop().unwrap_or(0),
        None => 0,
    }
}
