//! Benchmark fixtures for the xorlink workspace.
//!
//! - [`filled_list`]: a list of `0..n` over a release-mode arena
//! - [`checked_list`]: the same with block tracking and poisoning on
//! - [`release_arena`] / [`checked_arena`]: arenas with the two debug-aid
//!   extremes, for comparing their overhead

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use xorlink_arena::{Arena, ArenaConfig, SystemSource};
use xorlink_list::XorList;

/// Element counts every list benchmark is run at.
pub const SIZES: [usize; 3] = [100, 1_000, 10_000];

/// Arena with tracking and poisoning off, whatever the build profile.
pub fn release_arena() -> Arena {
    Arena::with_source(SystemSource, ArenaConfig::unchecked()).unwrap()
}

/// Arena with tracking and poisoning on.
pub fn checked_arena() -> Arena {
    Arena::with_source(SystemSource, ArenaConfig::checked()).unwrap()
}

/// A list holding `0..n` in order, over [`release_arena`].
pub fn filled_list(n: usize) -> XorList<u64> {
    let mut list = XorList::with_arena(release_arena());
    list.push_all(0..n as u64);
    list
}

/// A list holding `0..n` in order, over [`checked_arena`].
pub fn checked_list(n: usize) -> XorList<u64> {
    let mut list = XorList::with_arena(checked_arena());
    list.push_all(0..n as u64);
    list
}
