//! Raw block allocation for XOR-linked structures.
//!
//! Hands out untyped, explicitly released memory blocks named by opaque
//! integer [`Address`]es. Nothing in this crate is reclaimed automatically:
//! every block lives until it is passed back to [`Arena::free`].
//!
//! # Architecture
//!
//! ```text
//! Arena (sized / typed / zeroed allocation, stats, debug aids)
//! ├── BlockSource (seam to the system allocator; SystemSource by default)
//! ├── block header (size + align stored just before each address)
//! └── live-block index (IndexMap, only with ArenaConfig::track_blocks)
//! ```
//!
//! # Safety model
//!
//! Allocation is safe and reports exhaustion as [`Address::NULL`].
//! Releasing and zeroing are `unsafe`: the caller guarantees the address is
//! live and released at most once. Debug builds track live blocks and poison
//! released memory by default so that violations fail loudly in tests.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod address;
pub mod arena;
mod block;
pub mod config;
pub mod error;
pub mod source;
pub mod stats;

// Public re-exports for the primary API surface.
pub use address::Address;
pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use source::{BlockSource, SystemSource};
pub use stats::ArenaStats;
