//! Hidden block headers.
//!
//! Every block the arena issues is preceded by a [`BlockHeader`] recording
//! the user size and alignment, so an untyped `free(addr)` can rebuild the
//! exact [`Layout`] the block was acquired with.
//!
//! ```text
//! base                      addr = base + offset
//! │ padding … │ BlockHeader │ user bytes (size) │
//! ```
//!
//! `offset` is the header size rounded up to the block alignment, so `addr`
//! keeps the requested alignment and the header sits immediately before it.

use std::alloc::Layout;
use std::mem;

use crate::address::Address;
use crate::error::ArenaError;

#[repr(C)]
#[derive(Clone, Copy, Debug)]
struct BlockHeader {
    size: usize,
    align: usize,
}

pub(crate) const HEADER_SIZE: usize = mem::size_of::<BlockHeader>();

/// Geometry of one block: outer layout and where the user region starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BlockLayout {
    /// Layout handed to the block source.
    pub(crate) outer: Layout,
    /// Distance from the outer base to the user address.
    pub(crate) offset: usize,
    /// User-visible size in bytes.
    pub(crate) size: usize,
    /// Effective alignment of the user address.
    pub(crate) align: usize,
}

impl BlockLayout {
    /// Compute the layout for a user region of `size` bytes at `align`.
    ///
    /// `align` must be a power of two; it is raised to at least the header's
    /// own alignment.
    pub(crate) fn new(size: usize, align: usize) -> Result<Self, ArenaError> {
        let overflow = || ArenaError::LayoutOverflow {
            requested: size,
            align,
        };
        if !align.is_power_of_two() {
            return Err(overflow());
        }
        let align = align.max(mem::align_of::<BlockHeader>());
        let offset = HEADER_SIZE.next_multiple_of(align);
        let total = offset.checked_add(size).ok_or_else(overflow)?;
        let outer = Layout::from_size_align(total, align).map_err(|_| overflow())?;
        Ok(Self {
            outer,
            offset,
            size,
            align,
        })
    }
}

/// Record the block geometry in the header preceding `addr`.
///
/// # Safety
///
/// `addr` must be the user address of a block acquired with
/// `BlockLayout::new(size, align)`.
pub(crate) unsafe fn write_header(addr: Address, layout: &BlockLayout) {
    let header = addr.sub(HEADER_SIZE).as_ptr::<BlockHeader>();
    // SAFETY: `offset >= HEADER_SIZE`, so the header lies inside the block,
    // and both `offset` and `HEADER_SIZE` are multiples of the header's
    // alignment.
    unsafe {
        header.write(BlockHeader {
            size: layout.size,
            align: layout.align,
        })
    };
}

/// Rebuild the geometry of the live block at `addr` from its header.
///
/// # Safety
///
/// `addr` must be the user address of a live block written by
/// [`write_header`].
pub(crate) unsafe fn read_header(addr: Address) -> BlockLayout {
    // SAFETY: caller guarantees a header precedes `addr`.
    let header = unsafe { addr.sub(HEADER_SIZE).as_ptr::<BlockHeader>().read() };
    let offset = HEADER_SIZE.next_multiple_of(header.align);
    BlockLayout {
        // SAFETY: the same size/align pair passed `Layout::from_size_align`
        // when the block was created.
        outer: unsafe { Layout::from_size_align_unchecked(offset + header.size, header.align) },
        offset,
        size: header.size,
        align: header.align,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_at_least_header_and_aligned() {
        for align in [1, 2, 4, 8, 16, 32, 64, 4096] {
            let layout = BlockLayout::new(10, align).unwrap();
            assert!(layout.offset >= HEADER_SIZE);
            assert_eq!(layout.offset % layout.align, 0);
            assert_eq!(layout.outer.size(), layout.offset + 10);
        }
    }

    #[test]
    fn small_alignment_is_raised_to_header_alignment() {
        let layout = BlockLayout::new(3, 1).unwrap();
        assert_eq!(layout.align, mem::align_of::<usize>());
    }

    #[test]
    fn zero_size_block_still_has_room_for_header() {
        let layout = BlockLayout::new(0, 16).unwrap();
        assert!(layout.outer.size() >= HEADER_SIZE);
    }

    #[test]
    fn oversized_request_is_rejected() {
        let result = BlockLayout::new(usize::MAX, 16);
        assert!(matches!(result, Err(ArenaError::LayoutOverflow { .. })));
    }

    #[test]
    fn non_power_of_two_alignment_is_rejected() {
        assert!(BlockLayout::new(8, 12).is_err());
    }

    #[test]
    fn header_round_trip() {
        let layout = BlockLayout::new(40, 32).unwrap();
        let base = unsafe { std::alloc::alloc(layout.outer) };
        assert!(!base.is_null());
        let addr = Address::from_ptr(base).add(layout.offset);
        unsafe { write_header(addr, &layout) };
        let read = unsafe { read_header(addr) };
        assert_eq!(read, layout);
        unsafe { std::alloc::dealloc(base, layout.outer) };
    }
}
