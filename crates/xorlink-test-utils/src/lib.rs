//! Test utilities and mock block sources for xorlink development.
//!
//! Provides a [`FailingSource`] that runs out of memory on demand, a
//! [`DropTally`] for counting payload drops, arena constructors with every
//! debug aid enabled, and a tracing subscriber hook for test output.

#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::alloc::Layout;
use std::cell::Cell;
use std::rc::Rc;

use xorlink_arena::{Arena, ArenaConfig, BlockSource, SystemSource};

/// Block source that succeeds a fixed number of times, then returns null.
///
/// Clones share one budget, so a list and the arena it was cloned from
/// drain the same pool.
#[derive(Clone, Debug)]
pub struct FailingSource {
    remaining: Rc<Cell<usize>>,
    acquired: Rc<Cell<usize>>,
}

impl FailingSource {
    /// A source that will satisfy `budget` more acquisitions.
    pub fn new(budget: usize) -> Self {
        Self {
            remaining: Rc::new(Cell::new(budget)),
            acquired: Rc::new(Cell::new(0)),
        }
    }

    /// A source that never satisfies a request.
    pub fn exhausted() -> Self {
        Self::new(0)
    }

    /// Reset the remaining budget.
    pub fn refill(&self, budget: usize) {
        self.remaining.set(budget);
    }

    /// Acquisitions left before requests start failing.
    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }

    /// Total successful acquisitions so far.
    pub fn acquired(&self) -> usize {
        self.acquired.get()
    }
}

impl BlockSource for FailingSource {
    fn acquire(&self, layout: Layout) -> *mut u8 {
        let left = self.remaining.get();
        if left == 0 {
            return std::ptr::null_mut();
        }
        let ptr = SystemSource.acquire(layout);
        if !ptr.is_null() {
            self.remaining.set(left - 1);
            self.acquired.set(self.acquired.get() + 1);
        }
        ptr
    }

    unsafe fn release(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: every block came from `SystemSource::acquire`.
        unsafe { SystemSource.release(ptr, layout) }
    }
}

/// Shared counter of [`DropCounter`] drops.
#[derive(Clone, Debug, Default)]
pub struct DropTally(Rc<Cell<usize>>);

impl DropTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// A payload that bumps this tally when dropped.
    pub fn spawn(&self, id: u32) -> DropCounter {
        DropCounter {
            id,
            tally: self.clone(),
        }
    }

    /// How many payloads spawned from this tally have been dropped.
    pub fn dropped(&self) -> usize {
        self.0.get()
    }
}

/// Payload that records its own drop in a [`DropTally`].
///
/// Cloning produces a second payload with the same id and tally.
#[derive(Clone, Debug)]
pub struct DropCounter {
    pub id: u32,
    tally: DropTally,
}

impl PartialEq for DropCounter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.tally.0.set(self.tally.0.get() + 1);
    }
}

/// Arena over the system allocator with tracking and poisoning forced on.
pub fn checked_arena() -> Arena {
    Arena::with_source(SystemSource, ArenaConfig::checked())
        .expect("checked config is always valid")
}

/// Checked arena over a [`FailingSource`] with `budget` acquisitions.
///
/// Returns the source too so tests can inspect or refill it.
pub fn failing_arena(budget: usize) -> (Arena<FailingSource>, FailingSource) {
    let source = FailingSource::new(budget);
    let arena = Arena::with_source(source.clone(), ArenaConfig::checked())
        .expect("checked config is always valid");
    (arena, source)
}

/// Install a `tracing` subscriber writing through the test harness.
///
/// Honours `RUST_LOG`. Safe to call from every test; only the first call
/// installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_source_honours_budget() {
        let source = FailingSource::new(2);
        let layout = Layout::from_size_align(16, 8).unwrap();
        let a = source.acquire(layout);
        let b = source.acquire(layout);
        assert!(!a.is_null());
        assert!(!b.is_null());
        assert!(source.acquire(layout).is_null());
        assert_eq!(source.acquired(), 2);
        assert_eq!(source.remaining(), 0);
        unsafe {
            source.release(a, layout);
            source.release(b, layout);
        }
    }

    #[test]
    fn clones_share_budget() {
        let source = FailingSource::new(1);
        let twin = source.clone();
        let layout = Layout::from_size_align(8, 8).unwrap();
        let ptr = twin.acquire(layout);
        assert!(!ptr.is_null());
        assert!(source.acquire(layout).is_null());
        source.refill(1);
        assert_eq!(twin.remaining(), 1);
        unsafe { source.release(ptr, layout) };
    }

    #[test]
    fn drop_tally_counts() {
        let tally = DropTally::new();
        let a = tally.spawn(1);
        let b = a.clone();
        drop(a);
        assert_eq!(tally.dropped(), 1);
        drop(b);
        assert_eq!(tally.dropped(), 2);
    }

    #[test]
    fn failing_arena_returns_null_after_budget() {
        let (arena, source) = failing_arena(1);
        let addr = arena.malloc(8);
        assert!(!addr.is_null());
        assert!(arena.malloc(8).is_null());
        assert_eq!(source.remaining(), 0);
        unsafe { arena.free(addr) };
    }

    #[test]
    fn init_tracing_is_reentrant() {
        init_tracing();
        init_tracing();
    }
}
