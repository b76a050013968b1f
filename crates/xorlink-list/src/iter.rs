//! Iterators and standard collection trait impls for [`XorList`].

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use xorlink_arena::{Address, BlockSource};

use crate::list::XorList;
use crate::node::NodeRef;
use crate::traverse;

/// Two independent walks, one from each end, sharing a remaining count so
/// they never cross.
#[derive(Clone, Copy)]
struct Ends {
    front: Address,
    front_from: Address,
    back: Address,
    back_from: Address,
    remaining: usize,
}

impl Ends {
    fn new(head: Address, tail: Address, size: usize) -> Self {
        Self {
            front: head,
            front_from: Address::NULL,
            back: tail,
            back_from: Address::NULL,
            remaining: size,
        }
    }

    /// # Safety
    ///
    /// The walked list must be live and unmodified for the iterator's life.
    unsafe fn advance_front<T>(&mut self) -> Option<Address> {
        if self.remaining == 0 {
            return None;
        }
        let cur = self.front;
        // SAFETY: `remaining > 0`, so `cur` is a live node.
        self.front = unsafe { traverse::step::<T>(self.front_from, cur) };
        self.front_from = cur;
        self.remaining -= 1;
        Some(cur)
    }

    /// # Safety
    ///
    /// As for [`advance_front`](Self::advance_front).
    unsafe fn advance_back<T>(&mut self) -> Option<Address> {
        if self.remaining == 0 {
            return None;
        }
        let cur = self.back;
        // SAFETY: `remaining > 0`, so `cur` is a live node.
        self.back = unsafe { traverse::step::<T>(self.back_from, cur) };
        self.back_from = cur;
        self.remaining -= 1;
        Some(cur)
    }
}

/// Borrowing iterator over a list, head to tail.
pub struct Iter<'a, T> {
    ends: Ends,
    _list: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        // SAFETY: the list is shared-borrowed for `'a`.
        unsafe {
            self.ends
                .advance_front::<T>()
                .map(|node| NodeRef::<T>::payload(node))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ends.remaining, Some(self.ends.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        // SAFETY: the list is shared-borrowed for the iterator's life.
        unsafe {
            self.ends
                .advance_back::<T>()
                .map(|node| NodeRef::<T>::payload(node))
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            ends: self.ends,
            _list: PhantomData,
        }
    }
}

/// Mutably borrowing iterator over a list, head to tail.
pub struct IterMut<'a, T> {
    ends: Ends,
    _list: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        // SAFETY: the list is exclusively borrowed for `'a` and each node is
        // yielded at most once.
        unsafe {
            self.ends
                .advance_front::<T>()
                .map(|node| NodeRef::<T>::payload_mut(node))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ends.remaining, Some(self.ends.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        // SAFETY: as for `next`.
        unsafe {
            self.ends
                .advance_back::<T>()
                .map(|node| NodeRef::<T>::payload_mut(node))
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator; pops from the list as it goes.
pub struct IntoIter<T, S: BlockSource> {
    list: XorList<T, S>,
}

impl<T, S: BlockSource> Iterator for IntoIter<T, S> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_left()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.size(), Some(self.list.size()))
    }
}

impl<T, S: BlockSource> DoubleEndedIterator for IntoIter<T, S> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_right()
    }
}

impl<T, S: BlockSource> ExactSizeIterator for IntoIter<T, S> {}
impl<T, S: BlockSource> FusedIterator for IntoIter<T, S> {}

impl<T, S: BlockSource> XorList<T, S> {
    /// Iterate head to tail by reference.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ends: Ends::new(self.head, self.tail, self.size),
            _list: PhantomData,
        }
    }

    /// Iterate head to tail by mutable reference.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            ends: Ends::new(self.head, self.tail, self.size),
            _list: PhantomData,
        }
    }
}

impl<'a, T, S: BlockSource> IntoIterator for &'a XorList<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, S: BlockSource> IntoIterator for &'a mut XorList<T, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, S: BlockSource> IntoIterator for XorList<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    fn into_iter(self) -> IntoIter<T, S> {
        IntoIter { list: self }
    }
}

impl<T> FromIterator<T> for XorList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = XorList::new();
        list.push_all(iter);
        list
    }
}

impl<T, S: BlockSource> Extend<T> for XorList<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.push_all(iter);
    }
}

impl<'a, T: Copy + 'a, S: BlockSource> Extend<&'a T> for XorList<T, S> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.push_all(iter.into_iter().copied());
    }
}

impl<T: Clone, S: BlockSource + Clone> Clone for XorList<T, S> {
    fn clone(&self) -> Self {
        let mut list = self.sibling();
        list.push_all(self.iter().cloned());
        list
    }
}

impl<T: fmt::Debug, S: BlockSource> fmt::Debug for XorList<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, S: BlockSource, S2: BlockSource> PartialEq<XorList<T, S2>> for XorList<T, S> {
    fn eq(&self, other: &XorList<T, S2>) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Eq, S: BlockSource> Eq for XorList<T, S> {}
