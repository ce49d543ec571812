extern crate ordtree;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use ordtree::{AvlTree, BinarySearchTree, RedBlackTree, TraversalOrder};
use rand::{SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;

const N: usize = 1_000;

fn shuffled() -> Vec<usize> {
    let mut keys: Vec<usize> = (0..N).collect();
    keys.shuffle(&mut ChaCha8Rng::seed_from_u64(42));
    keys
}

fn insert(c: &mut Criterion) {
    let keys = shuffled();
    c.bench_function("bst_insert", |b| {
        b.iter(|| keys.iter().copied().collect::<BinarySearchTree<_>>())
    });
    c.bench_function("avl_insert", |b| {
        b.iter(|| keys.iter().copied().collect::<AvlTree<_>>())
    });
    c.bench_function("red_black_insert", |b| {
        b.iter(|| keys.iter().copied().collect::<RedBlackTree<_>>())
    });
    c.bench_function("rbtree_insert", |b| {
        b.iter(|| {
            let mut tree = rbtree::RBTree::<usize, ()>::new();
            for &k in &keys {
                tree.insert(k, ());
            }
            tree
        })
    });
}

fn remove(c: &mut Criterion) {
    let keys = shuffled();
    c.bench_function("avl_remove", |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<AvlTree<_>>(),
            |mut tree| tree.remove_all(&keys),
            BatchSize::SmallInput,
        )
    });
    c.bench_function("red_black_remove", |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<RedBlackTree<_>>(),
            |mut tree| tree.remove_all(&keys),
            BatchSize::SmallInput,
        )
    });
    c.bench_function("rbtree_remove", |b| {
        b.iter_batched(
            || {
                let mut tree = rbtree::RBTree::<usize, ()>::new();
                for &k in &keys {
                    tree.insert(k, ());
                }
                tree
            },
            |mut tree| {
                for k in &keys {
                    tree.remove(k);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn rank(c: &mut Criterion) {
    let mut tree: RedBlackTree<_> = shuffled().into_iter().collect();
    for order in [TraversalOrder::InOrder, TraversalOrder::PreOrder, TraversalOrder::PostOrder] {
        tree.set_traversal_order(order);
        c.bench_function(&format!("red_black_at_{order:?}"), |b| {
            b.iter(|| (0..N).filter_map(|i| tree.at(i).ok()).count())
        });
    }
}

criterion_group!(benches, insert, remove, rank);
criterion_main!(benches);
