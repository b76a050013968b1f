//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for the arena allocator.
///
/// Controls block alignment and the debug aids used to catch misuse of
/// released blocks. Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Minimum alignment of every block in bytes.
    ///
    /// Default: 16, enough for any primitive on the supported targets.
    /// Must be a power of two. Typed allocations use the larger of this and
    /// the type's own alignment.
    pub min_align: usize,

    /// Overwrite every released block with [`ArenaConfig::POISON_BYTE`]
    /// before handing it back to the block source.
    ///
    /// Default: on in debug builds, off in release builds.
    pub poison_freed: bool,

    /// Keep an index of live blocks so that releasing an address twice, or
    /// releasing a foreign address, panics instead of corrupting the heap.
    ///
    /// Default: on in debug builds, off in release builds.
    pub track_blocks: bool,
}

impl ArenaConfig {
    /// Default minimum block alignment.
    pub const DEFAULT_MIN_ALIGN: usize = 16;

    /// Byte pattern written over released blocks when poisoning is enabled.
    pub const POISON_BYTE: u8 = 0xDD;

    /// Create a config with default alignment and build-dependent debug aids.
    pub fn new() -> Self {
        Self {
            min_align: Self::DEFAULT_MIN_ALIGN,
            poison_freed: cfg!(debug_assertions),
            track_blocks: cfg!(debug_assertions),
        }
    }

    /// A config with every debug aid switched on, regardless of build.
    pub fn checked() -> Self {
        Self {
            poison_freed: true,
            track_blocks: true,
            ..Self::new()
        }
    }

    /// A config with every debug aid switched off, regardless of build.
    pub fn unchecked() -> Self {
        Self {
            poison_freed: false,
            track_blocks: false,
            ..Self::new()
        }
    }

    /// Check that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if `min_align` is zero or not
    /// a power of two.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if !self.min_align.is_power_of_two() {
            return Err(ArenaError::InvalidConfig {
                reason: format!("min_align {} is not a power of two", self.min_align),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}
