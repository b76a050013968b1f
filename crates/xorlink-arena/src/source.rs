//! Block sources: the seam between the arena and a system allocator.
//!
//! The arena never calls `std::alloc` directly. It asks a [`BlockSource`]
//! for memory, which lets tests substitute sources that run out on demand.

use std::alloc::{self, Layout};

/// A provider of raw memory blocks.
///
/// Implementations report exhaustion by returning a null pointer; they must
/// never abort. The arena only ever requests layouts with a non-zero size.
pub trait BlockSource {
    /// Obtain a block for `layout`, or null if none is available.
    fn acquire(&self, layout: Layout) -> *mut u8;

    /// Obtain a zero-filled block for `layout`, or null.
    fn acquire_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = self.acquire(layout);
        if !ptr.is_null() {
            // SAFETY: `ptr` is a fresh block of at least `layout.size()` bytes.
            unsafe { ptr.write_bytes(0, layout.size()) };
        }
        ptr
    }

    /// Return a block to the source.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `acquire`/`acquire_zeroed` on this
    /// source with the same `layout`, and must not have been released yet.
    unsafe fn release(&self, ptr: *mut u8, layout: Layout);
}

/// The process-wide system allocator (`std::alloc`).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemSource;

impl BlockSource for SystemSource {
    fn acquire(&self, layout: Layout) -> *mut u8 {
        if layout.size() == 0 {
            return std::ptr::null_mut();
        }
        // SAFETY: layout has a non-zero size.
        unsafe { alloc::alloc(layout) }
    }

    fn acquire_zeroed(&self, layout: Layout) -> *mut u8 {
        if layout.size() == 0 {
            return std::ptr::null_mut();
        }
        // SAFETY: layout has a non-zero size.
        unsafe { alloc::alloc_zeroed(layout) }
    }

    unsafe fn release(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { alloc::dealloc(ptr, layout) }
    }
}
