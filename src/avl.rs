//! Height balanced trees.
//!
//! Every node stores `height(right) - height(left)`. Insertion repair stops
//! at the first rotation; removal repair may rotate at every level up to the
//! root.
use log::trace;

use crate::{
    Balance,
    alloc::Handle,
    node::{Link, Side},
    private::Sealed,
    root::{Detached, Root},
};

/// The AVL discipline. See [`AvlTree`](crate::AvlTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Avl;

impl Sealed for Avl {}

#[allow(private_interfaces)]
impl Balance for Avl {
    type Meta = i8;

    const LEAF: i8 = 0;

    fn after_insert<T>(root: &mut Root<T, i8>, node: Handle) {
        insert_retrace(root, node);
    }

    fn after_erase<T>(root: &mut Root<T, i8>, detached: Detached<i8>) {
        erase_retrace(root, detached.parent, detached.side);
    }

    fn is_balanced<T>(root: &Root<T, i8>) -> bool {
        checked_height(root, root.root).is_some()
    }
}

/// +1 for a right lean, -1 for a left one.
#[inline(always)]
fn lean(side: Side) -> i8 {
    match side {
        Side::Left => -1,
        Side::Right => 1,
    }
}

fn insert_retrace<T>(root: &mut Root<T, i8>, node: Handle) {
    let mut z = node;
    while let Some(x) = root.node(z).parent {
        let side = root.side_of(z, x);
        let toward = lean(side);
        let bf = root.meta(x);

        if bf == toward {
            // x already leaned toward z: rotate. The rotated subtree is back
            // to its height before the insertion, so nothing above changes.
            if root.meta(z) == -toward {
                rotate_double(root, x, z, side);
            } else {
                rotate_single(root, x, z, side);
            }
            break;
        }
        if bf == -toward {
            // Leaned away: absorbed.
            root.set_meta(x, 0);
            break;
        }
        // Was balanced: x grew by one level, keep climbing.
        root.set_meta(x, toward);
        z = x;
    }
}

fn erase_retrace<T>(root: &mut Root<T, i8>, mut parent: Link, mut shortened: Side) {
    while let Some(x) = parent {
        let up = root.node(x).parent;
        let x_side = up.map(|g| root.side_of(x, g));
        let heavy = shortened.opposite();
        let toward = lean(heavy);
        let bf = root.meta(x);

        if bf == 0 {
            // Height unchanged, x now leans to its untouched side.
            root.set_meta(x, toward);
            break;
        }
        if bf == -toward {
            // The shortened side was the taller one: x lost a level.
            root.set_meta(x, 0);
        } else {
            let z = root
                .child(x, heavy)
                .expect("a node leaning one way has a child on that side");
            let b = root.meta(z);
            if b == -toward {
                rotate_double(root, x, z, heavy);
            } else {
                rotate_single(root, x, z, heavy);
            }
            if b == 0 {
                // A balanced sibling leaves the subtree as tall as before.
                break;
            }
        }

        parent = up;
        match x_side {
            Some(side) => shortened = side,
            None => break,
        }
    }
}

/// Single rotation lifting `z`, the child of `x` on `side`.
fn rotate_single<T>(root: &mut Root<T, i8>, x: Handle, z: Handle, side: Side) -> Handle {
    trace!("avl: single rotation at {x:?}, {side:?} child {z:?} moves up");
    root.rotate_toward(x, side.opposite());
    let toward = lean(side);
    if root.meta(z) == 0 {
        // Only reachable while erasing.
        root.set_meta(x, toward);
        root.set_meta(z, -toward);
    } else {
        root.set_meta(x, 0);
        root.set_meta(z, 0);
    }
    z
}

/// Double rotation lifting `y`, the inner grandchild of `x` through `z`.
fn rotate_double<T>(root: &mut Root<T, i8>, x: Handle, z: Handle, side: Side) -> Handle {
    let y = root
        .child(z, side.opposite())
        .expect("a zig-zag rotation needs an inner grandchild");
    trace!("avl: double rotation at {x:?} through {z:?}, {y:?} moves up");
    root.rotate_toward(z, side);
    root.rotate_toward(x, side.opposite());

    let toward = lean(side);
    let bf = root.meta(y);
    if bf == 0 {
        root.set_meta(x, 0);
        root.set_meta(z, 0);
    } else if bf == toward {
        root.set_meta(x, -toward);
        root.set_meta(z, 0);
    } else {
        root.set_meta(x, 0);
        root.set_meta(z, toward);
    }
    root.set_meta(y, 0);
    y
}

/// Height of the subtree at `link`, or `None` if some balance factor is out
/// of range or disagrees with the real heights.
fn checked_height<T>(root: &Root<T, i8>, link: Link) -> Option<i32> {
    let Some(h) = link else {
        return Some(0);
    };
    let node = root.node(h);
    let left = checked_height(root, node.left)?;
    let right = checked_height(root, node.right)?;
    let bf = right - left;
    (bf.abs() <= 1 && bf == i32::from(node.meta)).then_some(1 + left.max(right))
}
