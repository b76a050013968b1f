//! Node block layout and raw accessors.
//!
//! A node is one arena block holding the XOR link word followed by the
//! payload. Every accessor here is `unsafe`: the caller guarantees that the
//! address names a live, initialised node of the right payload type.

use std::alloc::Layout;
use std::marker::PhantomData;
use std::mem;
use std::ptr;

use xorlink_arena::{Address, Arena, BlockSource};

#[repr(C)]
struct Node<T> {
    /// `address(prev) ^ address(next)`.
    link: Address,
    payload: T,
}

/// Typed view over node blocks of payload type `T`.
pub(crate) struct NodeRef<T>(PhantomData<T>);

impl<T> NodeRef<T> {
    /// Bytes needed for one node block: link word plus payload.
    pub(crate) const FOOTPRINT: usize = mem::size_of::<Node<T>>();

    /// Layout of one node block.
    pub(crate) fn layout() -> Layout {
        Layout::new::<Node<T>>()
    }

    /// Request an uninitialised node block; null if the arena is exhausted.
    pub(crate) fn allocate<S: BlockSource>(arena: &Arena<S>) -> Address {
        arena.allocate::<Node<T>>()
    }

    fn ptr(addr: Address) -> *mut Node<T> {
        addr.as_ptr::<Node<T>>()
    }

    /// Initialise a freshly allocated block.
    ///
    /// # Safety
    ///
    /// `addr` must be an uninitialised block sized and aligned for a node.
    pub(crate) unsafe fn init(addr: Address, link: Address, payload: T) {
        // SAFETY: block is valid for writes per caller contract.
        unsafe { Self::ptr(addr).write(Node { link, payload }) };
    }

    /// # Safety
    ///
    /// `addr` must be a live node.
    pub(crate) unsafe fn link(addr: Address) -> Address {
        // SAFETY: live node per caller contract.
        unsafe { ptr::addr_of!((*Self::ptr(addr)).link).read() }
    }

    /// # Safety
    ///
    /// `addr` must be a live node.
    pub(crate) unsafe fn set_link(addr: Address, link: Address) {
        // SAFETY: live node per caller contract.
        unsafe { ptr::addr_of_mut!((*Self::ptr(addr)).link).write(link) };
    }

    /// Replace neighbour `out` with neighbour `into` in the link word.
    ///
    /// # Safety
    ///
    /// `addr` must be a live node and `out` one of its current neighbours
    /// (or null at an end).
    pub(crate) unsafe fn relink(addr: Address, out: Address, into: Address) {
        // SAFETY: forwarded caller contract.
        unsafe { Self::set_link(addr, Self::link(addr) ^ out ^ into) };
    }

    /// # Safety
    ///
    /// `addr` must be a live node that outlives `'a`, with no live mutable
    /// borrow of its payload.
    pub(crate) unsafe fn payload<'a>(addr: Address) -> &'a T {
        // SAFETY: forwarded caller contract.
        unsafe { &(*Self::ptr(addr)).payload }
    }

    /// # Safety
    ///
    /// `addr` must be a live node that outlives `'a`, with no other live
    /// borrow of its payload.
    pub(crate) unsafe fn payload_mut<'a>(addr: Address) -> &'a mut T {
        // SAFETY: forwarded caller contract.
        unsafe { &mut (*Self::ptr(addr)).payload }
    }

    /// Move the payload out. The node must be released without dropping it.
    ///
    /// # Safety
    ///
    /// `addr` must be a live node whose payload has not been taken.
    pub(crate) unsafe fn take(addr: Address) -> T {
        // SAFETY: forwarded caller contract.
        unsafe { ptr::addr_of!((*Self::ptr(addr)).payload).read() }
    }

    /// Drop the payload in place.
    ///
    /// # Safety
    ///
    /// `addr` must be a live node whose payload has not been taken.
    pub(crate) unsafe fn drop_payload(addr: Address) {
        // SAFETY: forwarded caller contract.
        unsafe { ptr::drop_in_place(ptr::addr_of_mut!((*Self::ptr(addr)).payload)) };
    }
}
