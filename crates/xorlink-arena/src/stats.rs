//! Allocation counters for an [`Arena`](crate::Arena).

/// Snapshot of an arena's allocation counters.
///
/// Byte counts cover the user-visible size of each block only; header and
/// alignment padding are not included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Blocks issued and not yet released.
    pub live_blocks: usize,
    /// Sum of the user sizes of all live blocks, in bytes.
    pub live_bytes: usize,
    /// Cumulative number of successful allocations.
    pub total_allocations: u64,
    /// Cumulative number of released blocks.
    pub total_frees: u64,
    /// Cumulative number of allocation requests that returned null.
    pub failed_allocations: u64,
}

impl ArenaStats {
    pub(crate) fn record_alloc(&mut self, size: usize) {
        self.live_blocks += 1;
        self.live_bytes += size;
        self.total_allocations += 1;
    }

    pub(crate) fn record_free(&mut self, size: usize) {
        self.live_blocks -= 1;
        self.live_bytes -= size;
        self.total_frees += 1;
    }

    pub(crate) fn record_failure(&mut self) {
        self.failed_allocations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let s = ArenaStats::default();
        assert_eq!(s.live_blocks, 0);
        assert_eq!(s.live_bytes, 0);
        assert_eq!(s.total_allocations, 0);
        assert_eq!(s.total_frees, 0);
        assert_eq!(s.failed_allocations, 0);
    }

    #[test]
    fn alloc_then_free_balances() {
        let mut s = ArenaStats::default();
        s.record_alloc(24);
        s.record_alloc(8);
        s.record_free(24);
        assert_eq!(s.live_blocks, 1);
        assert_eq!(s.live_bytes, 8);
        assert_eq!(s.total_allocations, 2);
        assert_eq!(s.total_frees, 1);
    }
}
