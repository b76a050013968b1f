//! Read-mostly queries and list-producing transforms.
//!
//! Nothing here transfers node ownership between lists: transforms copy
//! payloads into freshly allocated nodes.

use xorlink_arena::BlockSource;

use crate::list::XorList;

impl<T, S: BlockSource> XorList<T, S> {
    /// Call `receiver(index, &value)` head to tail, stopping as soon as it
    /// returns `false`.
    pub fn for_each<F>(&self, mut receiver: F)
    where
        F: FnMut(usize, &T) -> bool,
    {
        for (index, value) in self.iter().enumerate() {
            if !receiver(index, value) {
                break;
            }
        }
    }

    /// Whether any element satisfies `predicate`. Short-circuits.
    pub fn some<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().any(|v| predicate(v))
    }

    /// First element satisfying `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|v| predicate(v))
    }

    /// Index of the first element satisfying `predicate`.
    pub fn position<F>(&self, predicate: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().position(predicate)
    }

    /// Whether the list holds an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Clone every element into a `Vec`, head to tail.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// A new list holding clones of the elements satisfying `predicate`.
    ///
    /// The result owns its own nodes in a fresh arena like this one.
    pub fn filter<F>(&self, mut predicate: F) -> XorList<T, S>
    where
        T: Clone,
        S: Clone,
        F: FnMut(&T) -> bool,
    {
        let mut out = self.sibling();
        out.push_all(self.iter().filter(|v| predicate(v)).cloned());
        out
    }

    /// Append clones of every element of `other`. `other` is not modified.
    pub fn join<S2: BlockSource>(&mut self, other: &XorList<T, S2>)
    where
        T: Clone,
    {
        self.push_all(other.iter().cloned());
    }

    /// A new list with this list's elements followed by `other`'s.
    ///
    /// Neither operand is modified.
    pub fn merge<S2: BlockSource>(&self, other: &XorList<T, S2>) -> XorList<T, S>
    where
        T: Clone,
        S: Clone,
    {
        let mut out = self.sibling();
        out.push_all(self.iter().cloned());
        out.join(other);
        out
    }
}
