//! The [`Arena`]: sized, typed and zeroed allocation over a block source.

use std::cell::{Cell, RefCell};
use std::mem;

use indexmap::IndexMap;

use crate::address::Address;
use crate::block::{self, BlockLayout};
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::source::{BlockSource, SystemSource};
use crate::stats::ArenaStats;

/// Raw block allocator handing out opaque [`Address`]es.
///
/// The arena is the only code that talks to the [`BlockSource`]. Blocks are
/// released individually; there is no bulk reset. Allocation failure is
/// reported as [`Address::NULL`], never by aborting.
///
/// `Arena` is `!Sync`: counters and the live-block index use interior
/// mutability without synchronisation.
pub struct Arena<S: BlockSource = SystemSource> {
    source: S,
    config: ArenaConfig,
    stats: Cell<ArenaStats>,
    /// Live user addresses → user size. Present only with `track_blocks`.
    live: Option<RefCell<IndexMap<Address, usize>>>,
}

impl Arena<SystemSource> {
    /// Arena over the system allocator with the default config.
    pub fn new() -> Self {
        Self::build(SystemSource, ArenaConfig::new())
    }

    /// Arena over the system allocator with a custom config.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if `config` fails validation.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        Self::with_source(SystemSource, config)
    }
}

impl Default for Arena<SystemSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BlockSource> Arena<S> {
    /// Arena over an arbitrary block source.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if `config` fails validation.
    pub fn with_source(source: S, config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self::build(source, config))
    }

    fn build(source: S, config: ArenaConfig) -> Self {
        let live = config.track_blocks.then(|| RefCell::new(IndexMap::new()));
        Self {
            source,
            config,
            stats: Cell::new(ArenaStats::default()),
            live,
        }
    }

    /// A fresh, empty arena drawing from a clone of this arena's source with
    /// the same configuration.
    pub fn sibling(&self) -> Self
    where
        S: Clone,
    {
        Self::build(self.source.clone(), self.config.clone())
    }

    /// The configuration this arena was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// The underlying block source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current allocation counters.
    pub fn stats(&self) -> ArenaStats {
        self.stats.get()
    }

    /// Footprint in bytes of a value of type `T`.
    ///
    /// This is the size of the value itself, padding included, with no
    /// per-object overhead; it is exactly what a node block must hold.
    pub const fn size_of<T>() -> usize {
        mem::size_of::<T>()
    }

    /// Request a raw block of at least `size` bytes.
    ///
    /// The block is aligned to [`ArenaConfig::min_align`] and its contents
    /// are unspecified. Returns [`Address::NULL`] if the source is exhausted
    /// or the request cannot be laid out.
    pub fn malloc(&self, size: usize) -> Address {
        self.acquire(size, self.config.min_align, false)
    }

    /// Allocate an uninitialised block sized and aligned for `T`.
    ///
    /// Equivalent to `malloc(size_of::<T>())` with `T`'s alignment honoured.
    pub fn allocate<T>(&self) -> Address {
        self.acquire(Self::size_of::<T>(), self.align_for::<T>(), false)
    }

    /// Like [`allocate`](Self::allocate), but the block is zero-filled.
    pub fn allocate_blank<T>(&self) -> Address {
        self.acquire(Self::size_of::<T>(), self.align_for::<T>(), true)
    }

    fn align_for<T>(&self) -> usize {
        mem::align_of::<T>().max(self.config.min_align)
    }

    fn acquire(&self, size: usize, align: usize, zeroed: bool) -> Address {
        let layout = match BlockLayout::new(size, align) {
            Ok(layout) => layout,
            Err(err) => {
                self.update(ArenaStats::record_failure);
                tracing::warn!(%err, "block request rejected");
                return Address::NULL;
            }
        };

        let base = if zeroed {
            self.source.acquire_zeroed(layout.outer)
        } else {
            self.source.acquire(layout.outer)
        };
        if base.is_null() {
            self.update(ArenaStats::record_failure);
            tracing::warn!(size, align, "block source exhausted");
            return Address::NULL;
        }

        let addr = Address::from_ptr(base).add(layout.offset);
        // SAFETY: `addr` is the user address of a block just acquired with
        // `layout`.
        unsafe { block::write_header(addr, &layout) };

        if let Some(live) = &self.live {
            live.borrow_mut().insert(addr, size);
        }
        self.update(|s| s.record_alloc(size));
        tracing::trace!(%addr, size, align, "block acquired");
        addr
    }

    /// Release a block previously returned by this arena.
    ///
    /// Releasing [`Address::NULL`] is a no-op.
    ///
    /// # Safety
    ///
    /// `addr` must be null or a live block issued by this arena, and no
    /// reference into the block may be used afterwards.
    ///
    /// # Panics
    ///
    /// With [`ArenaConfig::track_blocks`] enabled, panics with
    /// [`ArenaError::UnknownBlock`] instead of freeing an address that is not
    /// live.
    pub unsafe fn free(&self, addr: Address) {
        if addr.is_null() {
            return;
        }
        if let Err(err) = self.forget(addr) {
            panic!("{err}");
        }

        // SAFETY: `addr` is a live block per caller contract (or tracking).
        let layout = unsafe { block::read_header(addr) };
        let base = addr.sub(layout.offset);
        if self.config.poison_freed {
            // SAFETY: the whole outer block is still owned by us.
            unsafe {
                base.as_ptr::<u8>()
                    .write_bytes(ArenaConfig::POISON_BYTE, layout.outer.size())
            };
        }
        // SAFETY: `base` and `layout.outer` are exactly what the source gave us.
        unsafe { self.source.release(base.as_ptr(), layout.outer) };

        self.update(|s| s.record_free(layout.size));
        tracing::trace!(%addr, size = layout.size, "block released");
    }

    /// Typed counterpart of [`allocate`](Self::allocate); same as [`free`](Self::free).
    ///
    /// # Safety
    ///
    /// Same contract as [`free`](Self::free). Any value of type `T` stored
    /// in the block is not dropped.
    pub unsafe fn deallocate<T>(&self, addr: Address) {
        // SAFETY: forwarded caller contract.
        unsafe { self.free(addr) }
    }

    /// Zero-fill `size` bytes starting at `addr` without (de)allocating.
    ///
    /// # Safety
    ///
    /// `addr..addr + size` must lie inside a single live block.
    pub unsafe fn void(&self, addr: Address, size: usize) {
        if size == 0 {
            return;
        }
        // SAFETY: forwarded caller contract.
        unsafe { addr.as_ptr::<u8>().write_bytes(0, size) };
    }

    /// User size recorded for a live block.
    ///
    /// # Safety
    ///
    /// `addr` must be a live block issued by this arena.
    pub unsafe fn block_size(&self, addr: Address) -> usize {
        // SAFETY: forwarded caller contract.
        unsafe { block::read_header(addr).size }
    }

    /// Whether `addr` is a live block, if block tracking is enabled.
    ///
    /// Returns `None` when [`ArenaConfig::track_blocks`] is off.
    pub fn is_live(&self, addr: Address) -> Option<bool> {
        self.live
            .as_ref()
            .map(|live| live.borrow().contains_key(&addr))
    }

    /// Live block addresses in allocation order, if tracking is enabled.
    pub fn live_blocks(&self) -> Option<Vec<Address>> {
        self.live
            .as_ref()
            .map(|live| live.borrow().keys().copied().collect())
    }

    fn forget(&self, addr: Address) -> Result<(), ArenaError> {
        match &self.live {
            Some(live) => live
                .borrow_mut()
                .shift_remove(&addr)
                .map(|_| ())
                .ok_or(ArenaError::UnknownBlock { addr }),
            None => Ok(()),
        }
    }

    fn update(&self, f: impl FnOnce(&mut ArenaStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }
}

impl<S: BlockSource> Drop for Arena<S> {
    fn drop(&mut self) {
        let leaked = self.stats.get().live_blocks;
        if leaked > 0 {
            tracing::warn!(
                leaked,
                bytes = self.stats.get().live_bytes,
                "arena dropped with live blocks"
            );
        }
    }
}

impl<S: BlockSource + std::fmt::Debug> std::fmt::Debug for Arena<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("source", &self.source)
            .field("config", &self.config)
            .field("stats", &self.stats.get())
            .finish()
    }
}
