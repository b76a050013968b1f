//! A doubly-linked list with one XOR link word per node.
//!
//! Each node stores `address(prev) ^ address(next)` instead of two
//! pointers. Walking in either direction carries the address of the node
//! just left and XORs it out of the current link to find the next one.
//! Nodes are raw blocks drawn from an [`Arena`](xorlink_arena::Arena) and
//! released explicitly.
//!
//! # Architecture
//!
//! ```text
//! XorList<T, S>
//! ├── head / tail: Address, size: usize
//! ├── Arena<S> (every node block comes from here and goes back here)
//! ├── node.rs     — #[repr(C)] { link, payload } block accessors
//! └── traverse.rs — step / locate / seek: the only link-word algebra
//! ```
//!
//! # Example
//!
//! ```rust
//! use xorlink_list::XorList;
//!
//! let mut list = XorList::new();
//! list.push_all([1, 2, 3, 4, 5]);
//! assert_eq!(list.delete(2), Some(3));
//! assert_eq!(list.pop_left(), Some(1));
//! assert_eq!(list.pop_right(), Some(5));
//! assert_eq!(list.to_vec(), vec![2, 4]);
//! list.free();
//! assert!(list.is_empty());
//! ```
//!
//! # Allocation failure
//!
//! `push`/`insert` and friends abort via `std::alloc::handle_alloc_error`
//! when the arena has no block, like `Vec`. The `try_*` variants return
//! [`ListError::AllocationFailed`] with the value and leave the list as it
//! was.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod iter;
pub mod list;
mod node;
mod query;
mod traverse;

// Public re-exports for the primary API surface.
pub use error::ListError;
pub use iter::{IntoIter, Iter, IterMut};
pub use list::XorList;
pub use xorlink_arena::{Address, Arena, ArenaConfig, BlockSource, SystemSource};
