use std::num::NonZero;

/// Index of a node slot in an [`Arena`].
///
/// Links between nodes are `Option<Handle>`; the niche keeps them the size of
/// a `u32`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Handle(NonZero<u32>);

impl Handle {
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // index + 1 is never zero and fits by the assert above.
        Self(NonZero::new((index + 1) as u32).unwrap())
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// Slot storage for tree nodes. Freed slots are recycled before the vector
/// grows.
#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            h
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()]
            .as_ref()
            .expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()]
            .as_mut()
            .expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()]
            .take()
            .expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    #[test]
    fn handle_round_trip() {
        for index in [0, 1, 41, 65_535, Handle::MAX] {
            assert_eq!(index, Handle::from_index(index).to_index());
        }
    }

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX`!")]
    fn invalid_handle() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    #[test]
    fn option_handle_is_niche_packed() {
        assert_eq!(size_of::<u32>(), size_of::<Option<Handle>>());
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        assert_eq!("a", arena.take(a));
        assert_eq!(1, arena.len());
        let c = arena.alloc("c");
        assert_eq!(a, c);
        assert_eq!("c", *arena.get(c));
        assert_eq!("b", *arena.get(b));
        assert_eq!(2, arena.len());
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is invalid!")]
    fn stale_handle_panics() {
        let mut arena = Arena::with_capacity(0);
        let a = arena.alloc(1u8);
        arena.take(a);
        arena.get(a);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Alloc(u32),
        Set(usize, u32),
        Take(usize),
        Clear,
    }

    impl Arbitrary for Op {
        fn arbitrary(g: &mut Gen) -> Self {
            match g.choose(&[0, 0, 0, 1, 2, 2, 3]).unwrap() {
                0 => Op::Alloc(u32::arbitrary(g)),
                1 => Op::Set(usize::arbitrary(g), u32::arbitrary(g)),
                2 => Op::Take(usize::arbitrary(g)),
                3 => Op::Clear,
                _ => unreachable!(),
            }
        }
    }

    #[quickcheck]
    fn arena_behaves_like_vec(ops: Vec<Op>) -> bool {
        let mut model: Vec<(Handle, u32)> = Vec::new();
        let mut arena = Arena::with_capacity(0);

        for op in ops {
            match op {
                Op::Alloc(value) => model.push((arena.alloc(value), value)),
                Op::Set(which, value) if !model.is_empty() => {
                    let index = which % model.len();
                    *arena.get_mut(model[index].0) = value;
                    model[index].1 = value;
                }
                Op::Take(which) if !model.is_empty() => {
                    let index = which % model.len();
                    let (handle, value) = model.swap_remove(index);
                    if arena.take(handle) != value {
                        return false;
                    }
                }
                Op::Clear => {
                    arena.clear();
                    model.clear();
                }
                _ => {}
            }
            if arena.len() != model.len() {
                return false;
            }
        }
        model.iter().all(|&(handle, value)| *arena.get(handle) == value)
    }
}
