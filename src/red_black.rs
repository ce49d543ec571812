//! Color balanced trees.
//!
//! Invariants, with empty slots counting as black leaves:
//!
//! 1. Every node is either red or black.
//! 2. The root is black.
//! 3. A red node has no red child.
//! 4. Every path from a node down to an empty slot crosses the same number of
//!    black nodes.
//!
//! Case names below follow lowercase = red, uppercase = black, `(x)` = either.
use log::trace;

use crate::{
    Balance, Color,
    alloc::Handle,
    node::{Link, Side},
    private::Sealed,
    root::{Detached, Root},
};

/// The red-black discipline. See [`RedBlackTree`](crate::RedBlackTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedBlack;

impl Sealed for RedBlack {}

#[allow(private_interfaces)]
impl Balance for RedBlack {
    type Meta = Color;

    const LEAF: Color = Color::Red;

    fn after_insert<T>(root: &mut Root<T, Color>, node: Handle) {
        insert_color(root, node);
    }

    fn after_erase<T>(root: &mut Root<T, Color>, detached: Detached<Color>) {
        // Removing a red node never changes a black count.
        if detached.vacated == Color::Black {
            erase_color(root, detached.child, detached.parent, detached.side);
        }
    }

    fn is_balanced<T>(root: &Root<T, Color>) -> bool {
        !is_red(root, root.root) && black_height(root, root.root).is_some()
    }
}

#[inline(always)]
fn is_red<T>(root: &Root<T, Color>, link: Link) -> bool {
    link.is_some_and(|h| root.meta(h) == Color::Red)
}

#[inline(always)]
fn is_black<T>(root: &Root<T, Color>, link: Link) -> bool {
    !is_red(root, link)
}

fn insert_color<T>(root: &mut Root<T, Color>, mut node: Handle) {
    // Loop invariant: node is red.
    while let Some(parent) = root.node(node).parent {
        if root.meta(parent) == Color::Black {
            break;
        }
        let Some(gparent) = root.node(parent).parent else {
            // A red root: recolor it and we are done.
            root.set_meta(parent, Color::Black);
            break;
        };

        let parent_side = root.side_of(parent, gparent);
        let uncle = root.child(gparent, parent_side.opposite());
        if let Some(uncle) = uncle.filter(|&u| root.meta(u) == Color::Red) {
            /*
             * Case 1 - color flips
             *
             *       G            g
             *      / \          / \
             *     p   u  -->   P   U
             *    /            /
             *   n            n
             *
             * However, since g's parent might be red, and 3) does not allow
             * this, we need to recurse at g.
             */
            trace!("rb insert: recolor at {gparent:?}");
            root.set_meta(parent, Color::Black);
            root.set_meta(uncle, Color::Black);
            root.set_meta(gparent, Color::Red);
            node = gparent;
            continue;
        }

        let mut parent = parent;
        if root.side_of(node, parent) != parent_side {
            /*
             * Case 2 - rotate at parent, shown for a left parent
             *
             *      G             G
             *     / \           / \
             *    p   U  -->    n   U
             *     \           /
             *      n         p
             *
             * This still leaves us in violation of 3), Case 3 fixes it.
             */
            trace!("rb insert: inner child {node:?}, rotating at {parent:?}");
            root.rotate_toward(parent, parent_side);
            parent = node;
        }

        /*
         * Case 3 - rotate at gparent, shown for a left parent
         *
         *        G           P
         *       / \         / \
         *      p   U  -->  n   g
         *     /                 \
         *    n                   U
         */
        trace!("rb insert: outer child, rotating at {gparent:?}");
        root.rotate_toward(gparent, parent_side.opposite());
        root.set_meta(parent, Color::Black);
        root.set_meta(gparent, Color::Red);
        break;
    }

    if let Some(top) = root.root {
        root.set_meta(top, Color::Black);
    }
}

/// Repairs a black deficit on the `side` slot of `parent`, currently holding
/// `node`.
fn erase_color<T>(root: &mut Root<T, Color>, mut node: Link, mut parent: Link, mut side: Side) {
    /*
     * Loop invariants:
     * - node is black or empty
     * - every path through node has one black node less than the paths
     *   through its sibling
     */
    while let Some(p) = parent {
        if is_red(root, node) {
            break;
        }

        let far = side.opposite();
        let mut sibling = root
            .child(p, far)
            .expect("a doubly black node always has a sibling");

        if root.meta(sibling) == Color::Red {
            /*
             * Case 1 - rotate at parent, shown for a left node
             *
             *     P               S
             *    / \             / \
             *   N   s    -->    p   Sr
             *      / \         / \
             *     Sl  Sr      N   Sl
             */
            trace!("rb erase: red sibling {sibling:?}, rotating at {p:?}");
            root.set_meta(sibling, Color::Black);
            root.set_meta(p, Color::Red);
            root.rotate_toward(p, side);
            sibling = root
                .child(p, far)
                .expect("the red sibling's child is black and present");
        }

        let near_nephew = root.child(sibling, side);
        let far_nephew = root.child(sibling, far);
        if is_black(root, near_nephew) && is_black(root, far_nephew) {
            /*
             * Case 2 - sibling color flip
             *
             *    (p)           (p)
             *    / \           / \
             *   N   S    -->  N   s
             *      / \           / \
             *     Sl  Sr        Sl  Sr
             *
             * The deficit moves up to p. A red p ends the loop and is
             * blackened below.
             */
            trace!("rb erase: recolor sibling {sibling:?}");
            root.set_meta(sibling, Color::Red);
            node = Some(p);
            parent = root.node(p).parent;
            if let Some(up) = parent {
                side = root.side_of(p, up);
            }
            continue;
        }

        if is_black(root, far_nephew) {
            /*
             * Case 3 - rotate at sibling, shown for a left node
             *
             *   (p)           (p)
             *   / \           / \
             *  N   S    -->  N   sl
             *     / \             \
             *    sl  Sr            S
             *                       \
             *                        Sr
             */
            let near = near_nephew.expect("a red nephew is present");
            trace!("rb erase: red inner nephew {near:?}, rotating at {sibling:?}");
            root.set_meta(near, Color::Black);
            root.set_meta(sibling, Color::Red);
            root.rotate_toward(sibling, far);
            sibling = near;
        }

        /*
         * Case 4 - rotate at parent + color flips, shown for a left node
         *
         *      (p)             (s)
         *      / \             / \
         *     N   S     -->   P   Sr
         *        / \         / \
         *      (sl) sr      N  (sl)
         */
        trace!("rb erase: red outer nephew, rotating at {p:?}");
        root.set_meta(sibling, root.meta(p));
        root.set_meta(p, Color::Black);
        if let Some(outer) = root.child(sibling, far) {
            root.set_meta(outer, Color::Black);
        }
        root.rotate_toward(p, side);
        node = root.root;
        break;
    }

    if let Some(n) = node {
        root.set_meta(n, Color::Black);
    }
}

/// Black height of the subtree at `link`, counting the empty slot, or `None`
/// on a red-red edge or unequal black counts.
fn black_height<T>(root: &Root<T, Color>, link: Link) -> Option<usize> {
    let Some(h) = link else {
        return Some(1);
    };
    let node = root.node(h);
    if node.meta == Color::Red && (is_red(root, node.left) || is_red(root, node.right)) {
        return None;
    }
    let left = black_height(root, node.left)?;
    let right = black_height(root, node.right)?;
    (left == right).then_some(left + usize::from(node.meta == Color::Black))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::RedBlackTree;
    use pretty_assertions::assert_eq;
    use quickcheck_macros::quickcheck;
    use rand::{Rng, SeedableRng, seq::SliceRandom};
    use rand_chacha::ChaCha8Rng;

    fn color_of(tree: &RedBlackTree<i32>, key: i32) -> Color {
        let h = tree.raw.locate(&key).unwrap();
        tree.raw.meta(h)
    }

    #[test]
    fn ascending_three() {
        let mut tree = RedBlackTree::new();
        tree.add_all([10, 20, 30]);
        assert_eq!(Some(&20), tree.root());
        assert_eq!(Color::Black, color_of(&tree, 20));
        assert_eq!(Color::Red, color_of(&tree, 10));
        assert_eq!(Color::Red, color_of(&tree, 30));
        assert!(tree.is_valid());
    }

    #[test]
    fn inner_child_rotates_twice() {
        let mut tree = RedBlackTree::new();
        tree.add_all([30, 10, 20]);
        assert_eq!(Some(&20), tree.root());
        assert_eq!(Color::Red, color_of(&tree, 10));
        assert_eq!(Color::Red, color_of(&tree, 30));
        assert!(tree.is_valid());
    }

    #[test]
    fn red_uncle_recolors() {
        let mut tree = RedBlackTree::new();
        tree.add_all([20, 10, 30, 5]);
        assert_eq!(Color::Black, color_of(&tree, 20));
        assert_eq!(Color::Black, color_of(&tree, 10));
        assert_eq!(Color::Black, color_of(&tree, 30));
        assert_eq!(Color::Red, color_of(&tree, 5));
        assert!(tree.is_valid());
    }

    #[test]
    fn first_key_is_black() {
        let mut tree = RedBlackTree::new();
        tree.add(1);
        assert_eq!(Color::Black, color_of(&tree, 1));
    }

    #[test]
    fn removing_a_black_leaf_with_red_sibling() {
        // 20(B) -> 10(B), 40(r) -> 30(B), 50(B)
        let mut tree = RedBlackTree::new();
        tree.add_all([20, 10, 40, 30, 50, 60]);
        tree.remove(&60);
        assert!(tree.is_valid());
        assert_eq!(Color::Red, color_of(&tree, 40));

        assert_eq!(Some(10), tree.remove(&10));
        assert!(tree.is_valid());
        assert_eq!(vec![&20, &30, &40, &50], tree.in_order().collect::<Vec<_>>());
    }

    #[test]
    fn removing_down_to_empty() {
        let mut tree = RedBlackTree::new();
        tree.add_all(0..32);
        for k in 0..32 {
            assert_eq!(Some(k), tree.remove(&k));
            assert!(tree.is_valid(), "invalid after removing {k}");
        }
        assert!(tree.is_empty());
        assert_eq!(None, tree.root());
    }

    #[test]
    fn validator_rejects_a_red_root() {
        let mut tree = RedBlackTree::new();
        tree.add(1);
        let top = tree.raw.root.unwrap();
        tree.raw.set_meta(top, Color::Red);
        assert!(!tree.is_valid());
    }

    #[test]
    fn validator_rejects_unequal_black_heights() {
        let mut tree = RedBlackTree::new();
        tree.add_all([2, 1, 3]);
        let left = tree.raw.locate(&1).unwrap();
        tree.raw.set_meta(left, Color::Black);
        assert!(!tree.is_valid());
    }

    #[test]
    fn validator_rejects_red_red() {
        let mut tree = RedBlackTree::new();
        tree.add_all([20, 10, 30, 5]);
        let ten = tree.raw.locate(&10).unwrap();
        let thirty = tree.raw.locate(&30).unwrap();
        tree.raw.set_meta(ten, Color::Red);
        tree.raw.set_meta(thirty, Color::Red);
        assert!(!tree.is_valid());
    }

    #[test]
    fn seeded_stress() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        let mut tree = RedBlackTree::new();
        let mut model: Vec<u32> = Vec::new();
        for _ in 0..4_000 {
            if model.is_empty() || rng.random_range(0..3) > 0 {
                let k = rng.random_range(0..500);
                tree.add(k);
                model.push(k);
            } else {
                let k = model.swap_remove(rng.random_range(0..model.len()));
                assert_eq!(Some(k), tree.remove(&k));
            }
            assert!(tree.is_valid());
            assert_eq!(model.len(), tree.len());
        }
        model.sort_unstable();
        assert_eq!(model.iter().collect::<Vec<_>>(), tree.in_order().collect::<Vec<_>>());

        model.shuffle(&mut rng);
        for k in &model {
            tree.remove(k);
            assert!(tree.is_valid());
        }
        assert!(tree.is_empty());
    }

    #[quickcheck]
    fn valid_after_every_edit(adds: Vec<i8>, removes: Vec<i8>) -> bool {
        let mut tree = RedBlackTree::new();
        for k in adds {
            tree.add(k);
            if !tree.is_valid() {
                return false;
            }
        }
        for k in removes {
            tree.remove(&k);
            if !tree.is_valid() {
                return false;
            }
        }
        true
    }

    #[quickcheck]
    fn height_is_logarithmic(keys: Vec<u16>) -> bool {
        let mut tree = RedBlackTree::new();
        tree.add_all(keys);
        let n = tree.len() as f64;
        tree.height() as f64 <= 2.0 * (n + 1.0).log2()
    }
}
