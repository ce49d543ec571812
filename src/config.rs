use std::marker::PhantomData;

use crate::{Balance, Comparator, TraversalOrder, Tree, TreeError, root::Root};

/// Configures and builds a [`Tree`].
///
/// ```
/// use ordtree::{RedBlack, TraversalOrder, TreeBuilder};
///
/// let mut tree = TreeBuilder::<i32>::new()
///     .comparator(|a: &i32, b: &i32| b.cmp(a))
///     .traversal_order(TraversalOrder::InOrder)
///     .capacity(16)
///     .build::<RedBlack>()
///     .unwrap();
/// tree.add_all([1, 3, 2]);
/// assert_eq!(vec![&3, &2, &1], tree.traverse().collect::<Vec<_>>());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<T> {
    cmp: Option<Comparator<T>>,
    order: TraversalOrder,
    capacity: usize,
}

impl<T> Default for TreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeBuilder<T> {
    /// A builder with no comparator yet.
    pub fn new() -> Self {
        TreeBuilder {
            cmp: None,
            order: TraversalOrder::default(),
            capacity: 0,
        }
    }

    /// A builder ordering keys by their [`Ord`] implementation.
    pub fn natural() -> Self
    where
        T: Ord,
    {
        Self::new().comparator(T::cmp)
    }

    /// Orders keys by `cmp`. Only non-capturing closures and plain
    /// functions coerce to [`Comparator`].
    pub fn comparator(mut self, cmp: Comparator<T>) -> Self {
        self.cmp = Some(cmp);
        self
    }

    pub fn traversal_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    /// Number of nodes to reserve room for up front.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// # Errors
    ///
    /// [`TreeError::MissingComparator`] when no comparator was configured.
    pub fn build<D: Balance>(self) -> crate::Result<Tree<T, D>> {
        let cmp = self.cmp.ok_or(TreeError::MissingComparator)?;
        Ok(Tree {
            raw: Root::new(cmp, self.capacity),
            order: self.order,
            _balance: PhantomData,
        })
    }
}
