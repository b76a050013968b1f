//! [`XorList`]: construction, insertion, indexed access, removal, teardown.

use std::alloc::handle_alloc_error;
use std::marker::PhantomData;
use std::mem;

use xorlink_arena::{Address, Arena, BlockSource, SystemSource};

use crate::error::ListError;
use crate::node::NodeRef;
use crate::traverse::{self, Position};

/// A doubly-linked list whose nodes store one XOR link word instead of two
/// neighbour pointers.
///
/// Nodes live in blocks drawn from the list's own [`Arena`], outside any
/// automatic ownership tracking. They are released by removal operations,
/// by [`free`](XorList::free), and by `Drop` (which calls `free`).
///
/// The list is not internally synchronised. It is `Send` when `T` and the
/// block source are, and never `Sync`.
///
/// # Invariants
///
/// - `size == 0` ⇔ `head` is null ⇔ `tail` is null.
/// - With one node, `head == tail` and its link is null.
/// - Walking from `head` with a null predecessor visits exactly `size`
///   nodes and ends at `tail`.
pub struct XorList<T, S: BlockSource = SystemSource> {
    pub(crate) head: Address,
    pub(crate) tail: Address,
    pub(crate) size: usize,
    pub(crate) arena: Arena<S>,
    pub(crate) _owns: PhantomData<T>,
}

impl<T> XorList<T> {
    /// An empty list over the system allocator. Allocates nothing.
    pub fn new() -> Self {
        Self::with_arena(Arena::new())
    }
}

impl<T> Default for XorList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: BlockSource> XorList<T, S> {
    /// An empty list that allocates its nodes from `arena`.
    pub fn with_arena(arena: Arena<S>) -> Self {
        Self {
            head: Address::NULL,
            tail: Address::NULL,
            size: 0,
            arena,
            _owns: PhantomData,
        }
    }

    /// An empty list over a fresh arena like this list's.
    pub(crate) fn sibling(&self) -> Self
    where
        S: Clone,
    {
        Self::with_arena(self.arena.sibling())
    }

    /// Bytes of one node block: the link word plus a `T`.
    pub const fn node_footprint() -> usize {
        NodeRef::<T>::FOOTPRINT
    }

    /// The arena nodes are drawn from.
    pub fn arena(&self) -> &Arena<S> {
        &self.arena
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of elements. Alias of [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    // ── Insertion ───────────────────────────────────────────────

    fn alloc_node(&self, value: T) -> Result<Address, ListError<T>> {
        let addr = NodeRef::<T>::allocate(&self.arena);
        if addr.is_null() {
            return Err(ListError::AllocationFailed {
                requested: NodeRef::<T>::FOOTPRINT,
                value,
            });
        }
        // SAFETY: fresh block sized and aligned for a node.
        unsafe { NodeRef::<T>::init(addr, Address::NULL, value) };
        Ok(addr)
    }

    /// Attach a detached node after the tail.
    ///
    /// # Safety
    ///
    /// `node` must be a live node owned by this list's arena and not linked.
    unsafe fn link_back(&mut self, node: Address) {
        // SAFETY: `node` and `self.tail` (when non-null) are live.
        unsafe {
            NodeRef::<T>::set_link(node, self.tail);
            if self.tail.is_null() {
                self.head = node;
            } else {
                NodeRef::<T>::relink(self.tail, Address::NULL, node);
            }
        }
        self.tail = node;
        self.size += 1;
    }

    /// Attach a detached node before the head.
    ///
    /// # Safety
    ///
    /// As for [`link_back`](Self::link_back).
    unsafe fn link_front(&mut self, node: Address) {
        // SAFETY: `node` and `self.head` (when non-null) are live.
        unsafe {
            NodeRef::<T>::set_link(node, self.head);
            if self.head.is_null() {
                self.tail = node;
            } else {
                NodeRef::<T>::relink(self.head, Address::NULL, node);
            }
        }
        self.head = node;
        self.size += 1;
    }

    /// Append `value`, returning its node handle, or give the value back if
    /// no node block is available. The list is unchanged on error.
    ///
    /// # Errors
    ///
    /// [`ListError::AllocationFailed`] when the arena returns null.
    pub fn try_insert(&mut self, value: T) -> Result<Address, ListError<T>> {
        let node = self.alloc_node(value)?;
        // SAFETY: `node` was just allocated and initialised unlinked.
        unsafe { self.link_back(node) };
        Ok(node)
    }

    /// Prepend `value`, returning its node handle.
    ///
    /// # Errors
    ///
    /// [`ListError::AllocationFailed`] when the arena returns null.
    pub fn try_insert_front(&mut self, value: T) -> Result<Address, ListError<T>> {
        let node = self.alloc_node(value)?;
        // SAFETY: `node` was just allocated and initialised unlinked.
        unsafe { self.link_front(node) };
        Ok(node)
    }

    /// Fallible [`push`](Self::push).
    ///
    /// # Errors
    ///
    /// [`ListError::AllocationFailed`] when the arena returns null.
    pub fn try_push(&mut self, value: T) -> Result<(), ListError<T>> {
        self.try_insert(value).map(|_| ())
    }

    /// Fallible [`push_front`](Self::push_front).
    ///
    /// # Errors
    ///
    /// [`ListError::AllocationFailed`] when the arena returns null.
    pub fn try_push_front(&mut self, value: T) -> Result<(), ListError<T>> {
        self.try_insert_front(value).map(|_| ())
    }

    /// Append `value` and return the new node's address.
    ///
    /// The handle can be passed to [`move_to_front`](Self::move_to_front)
    /// while the element is in the list. Once it is removed the arena may
    /// reuse the block, and the old handle then names the newer node.
    ///
    /// # Panics
    ///
    /// Aborts through [`handle_alloc_error`] if no node block is available.
    pub fn insert(&mut self, value: T) -> Address {
        match self.try_insert(value) {
            Ok(node) => node,
            Err(_) => handle_alloc_error(NodeRef::<T>::layout()),
        }
    }

    /// Prepend `value` and return the new node's address.
    ///
    /// # Panics
    ///
    /// Aborts through [`handle_alloc_error`] if no node block is available.
    pub fn insert_front(&mut self, value: T) -> Address {
        match self.try_insert_front(value) {
            Ok(node) => node,
            Err(_) => handle_alloc_error(NodeRef::<T>::layout()),
        }
    }

    /// Append `value` at the tail. O(1).
    pub fn push(&mut self, value: T) {
        self.insert(value);
    }

    /// Prepend `value` at the head. O(1).
    pub fn push_front(&mut self, value: T) {
        self.insert_front(value);
    }

    /// Append every value in order.
    pub fn push_all<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.push(value);
        }
    }

    /// Handle of the node at `index` (negative counts from the end).
    pub fn handle_of(&self, index: isize) -> Option<Address> {
        self.locate_index(index).map(|pos| pos.cur)
    }

    /// Move the node behind `handle` to the head.
    ///
    /// Returns `false`, changing nothing, if no node of this list lives at
    /// `handle`. Only addresses are compared: a handle kept past its
    /// element's removal may match a node inserted later into the reused
    /// block, and that node is moved. O(n): the node's neighbours are
    /// recovered by walking.
    pub fn move_to_front(&mut self, handle: Address) -> bool {
        match self.detach_handle(handle) {
            Some(node) => {
                // SAFETY: `node` was detached from this list just now.
                unsafe { self.link_front(node) };
                true
            }
            None => false,
        }
    }

    /// Move the node behind `handle` to the tail.
    ///
    /// Returns `false` if no node of this list lives at `handle`. Stale
    /// handles behave as for [`move_to_front`](Self::move_to_front).
    pub fn move_to_back(&mut self, handle: Address) -> bool {
        match self.detach_handle(handle) {
            Some(node) => {
                // SAFETY: `node` was detached from this list just now.
                unsafe { self.link_back(node) };
                true
            }
            None => false,
        }
    }

    fn detach_handle(&mut self, handle: Address) -> Option<Address> {
        if handle.is_null() {
            return None;
        }
        // SAFETY: `head` starts this list; `seek` only compares `handle`.
        let pos = unsafe { traverse::seek::<T>(self.head, handle) }?;
        // SAFETY: `pos` describes a live node of this list.
        unsafe { self.unlink(pos) };
        Some(pos.cur)
    }

    // ── Indexed access ──────────────────────────────────────────

    fn locate_index(&self, index: isize) -> Option<Position> {
        let index = traverse::resolve(index, self.size)?;
        // SAFETY: the list is well-formed and `index < size`.
        Some(unsafe { traverse::locate::<T>(self.head, self.tail, self.size, index) })
    }

    /// Element at `index`; negative indices count from the end.
    ///
    /// Walks from whichever end is nearer. `None` when out of range.
    pub fn at(&self, index: isize) -> Option<&T> {
        let pos = self.locate_index(index)?;
        // SAFETY: live node borrowed for the lifetime of `&self`.
        Some(unsafe { NodeRef::<T>::payload(pos.cur) })
    }

    /// Mutable element at `index`; negative indices count from the end.
    pub fn at_mut(&mut self, index: isize) -> Option<&mut T> {
        let pos = self.locate_index(index)?;
        // SAFETY: live node exclusively borrowed through `&mut self`.
        Some(unsafe { NodeRef::<T>::payload_mut(pos.cur) })
    }

    /// Clone of the element at `index`, or `T::default()` when out of range
    /// or empty.
    pub fn get(&self, index: isize) -> T
    where
        T: Clone + Default,
    {
        self.at(index).cloned().unwrap_or_default()
    }

    /// First element.
    pub fn first(&self) -> Option<&T> {
        self.at(0)
    }

    /// Last element.
    pub fn last(&self) -> Option<&T> {
        self.at(-1)
    }

    // ── Removal ─────────────────────────────────────────────────

    /// Splice `pos.cur` out, rewiring neighbours and endpoints.
    ///
    /// The node stays allocated with a stale link.
    ///
    /// # Safety
    ///
    /// `pos` must describe a live node of this list with its true neighbours.
    unsafe fn unlink(&mut self, pos: Position) {
        // SAFETY: neighbours are live nodes of this list when non-null.
        unsafe {
            if pos.prev.is_null() {
                self.head = pos.next;
            } else {
                NodeRef::<T>::relink(pos.prev, pos.cur, pos.next);
            }
            if pos.next.is_null() {
                self.tail = pos.prev;
            } else {
                NodeRef::<T>::relink(pos.next, pos.cur, pos.prev);
            }
        }
        self.size -= 1;
    }

    /// Move the payload out of a detached node and release its block.
    ///
    /// # Safety
    ///
    /// `node` must be a live, unlinked node of this list's arena.
    unsafe fn release(&self, node: Address) -> T {
        // SAFETY: forwarded caller contract; payload is read exactly once.
        unsafe {
            let value = NodeRef::<T>::take(node);
            self.arena.free(node);
            value
        }
    }

    /// Drop the payload of a detached node and release its block.
    ///
    /// # Safety
    ///
    /// As for [`release`](Self::release).
    unsafe fn destroy(&self, node: Address) {
        // SAFETY: forwarded caller contract.
        unsafe {
            NodeRef::<T>::drop_payload(node);
            self.arena.free(node);
        }
    }

    /// Remove and return the first element.
    pub fn pop_left(&mut self) -> Option<T> {
        if self.head.is_null() {
            return None;
        }
        let pos = Position {
            prev: Address::NULL,
            cur: self.head,
            // SAFETY: head is live; its only neighbour is towards the tail.
            next: unsafe { NodeRef::<T>::link(self.head) },
        };
        // SAFETY: `pos` is the head with its true neighbours.
        unsafe {
            self.unlink(pos);
            Some(self.release(pos.cur))
        }
    }

    /// Remove and return the last element.
    pub fn pop_right(&mut self) -> Option<T> {
        if self.tail.is_null() {
            return None;
        }
        let pos = Position {
            // SAFETY: tail is live; its only neighbour is towards the head.
            prev: unsafe { NodeRef::<T>::link(self.tail) },
            cur: self.tail,
            next: Address::NULL,
        };
        // SAFETY: `pos` is the tail with its true neighbours.
        unsafe {
            self.unlink(pos);
            Some(self.release(pos.cur))
        }
    }

    /// Remove and return the element at `index` (negative counts from the
    /// end). Relative order of the rest is preserved.
    pub fn delete(&mut self, index: isize) -> Option<T> {
        let pos = self.locate_index(index)?;
        // SAFETY: `pos` came from a walk of this list.
        unsafe {
            self.unlink(pos);
            Some(self.release(pos.cur))
        }
    }

    /// Remove every element matching `predicate` in one forward pass.
    ///
    /// Returns the number removed.
    pub fn delete_by<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        let (mut prev, mut cur) = (Address::NULL, self.head);
        while !cur.is_null() {
            // SAFETY: `cur` is live and `prev` is its head-side neighbour.
            let next = unsafe { traverse::step::<T>(prev, cur) };
            // SAFETY: live node; the borrow ends before any mutation.
            if predicate(unsafe { NodeRef::<T>::payload(cur) }) {
                // SAFETY: true neighbours; after the splice `prev` links
                // straight to `next`, so the walk resumes from `prev`.
                unsafe {
                    self.unlink(Position { prev, cur, next });
                    self.destroy(cur);
                }
                removed += 1;
            } else {
                prev = cur;
            }
            cur = next;
        }
        removed
    }

    /// Release every element and leave the list empty and reusable.
    pub fn delete_all(&mut self) {
        self.free();
    }

    /// Drop elements from the tail until at most `capacity` remain.
    ///
    /// `shrink(0)` is [`delete_all`](Self::delete_all).
    pub fn shrink(&mut self, capacity: usize) {
        if capacity == 0 {
            self.delete_all();
            return;
        }
        while self.size > capacity {
            drop(self.pop_right());
        }
    }

    /// Reverse the list in O(1).
    ///
    /// A link word reads the same in both directions, so swapping the ends
    /// is enough.
    pub fn reverse(&mut self) {
        mem::swap(&mut self.head, &mut self.tail);
    }

    // ── Teardown ────────────────────────────────────────────────

    /// Release every node, dropping its payload, and reset to empty.
    ///
    /// Idempotent; the list remains usable afterwards.
    pub fn free(&mut self) {
        let released = self.size;
        let (mut prev, mut cur) = (Address::NULL, self.head);
        // Detach first: a panicking payload drop leaks the rest, never
        // frees twice.
        self.head = Address::NULL;
        self.tail = Address::NULL;
        self.size = 0;
        while !cur.is_null() {
            // SAFETY: `cur` is live; `prev` is only used as an integer.
            let next = unsafe { traverse::step::<T>(prev, cur) };
            // SAFETY: every node is visited exactly once.
            unsafe { self.destroy(cur) };
            prev = cur;
            cur = next;
        }
        if released > 0 {
            tracing::debug!(released, "xor list storage released");
        }
    }
}

impl<T, S: BlockSource> Drop for XorList<T, S> {
    fn drop(&mut self) {
        self.free();
    }
}
