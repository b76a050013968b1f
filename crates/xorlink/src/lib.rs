//! Xorlink: a doubly-linked list that stores one XOR link word per node.
//!
//! This is the facade crate re-exporting the arena and list sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use xorlink::prelude::*;
//!
//! let arena = Arena::with_config(ArenaConfig::checked()).unwrap();
//! let mut list = XorList::with_arena(arena);
//! list.push_front(1);
//! list.push_front(2);
//! list.push_front(3);
//!
//! assert_eq!(list.pop_right(), Some(1));
//! assert_eq!(list.pop_right(), Some(2));
//! assert_eq!(list.pop_right(), Some(3));
//! assert_eq!(list.pop_right(), None);
//!
//! list.push_all(10..15);
//! assert_eq!(list.at(-1), Some(&14));
//! assert_eq!(list.delete_by(|v| v % 2 == 0), 3);
//! list.free();
//! assert_eq!(list.arena().stats().live_blocks, 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `xorlink-arena` | `Arena`, `Address`, block sources, config, stats |
//! | [`list`] | `xorlink-list` | `XorList`, iterators, `ListError` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Raw block arena and opaque addresses (`xorlink-arena`).
pub use xorlink_arena as arena;

/// The XOR-linked list and its iterators (`xorlink-list`).
pub use xorlink_list as list;

/// Common imports for typical xorlink usage.
///
/// ```rust
/// use xorlink::prelude::*;
/// ```
pub mod prelude {
    pub use xorlink_arena::{Address, Arena, ArenaConfig, ArenaError, ArenaStats, BlockSource};
    pub use xorlink_list::{ListError, XorList};
}
