//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use crate::address::Address;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The configured minimum alignment is zero or not a power of two.
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// A requested block size overflows the addressable range once the
    /// block header and alignment padding are added.
    LayoutOverflow {
        /// Number of bytes requested.
        requested: usize,
        /// Alignment requested.
        align: usize,
    },
    /// An address that is not a live block of this arena: never issued,
    /// or already released.
    UnknownBlock {
        /// The offending address.
        addr: Address,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena config: {reason}")
            }
            Self::LayoutOverflow { requested, align } => {
                write!(
                    f,
                    "block layout overflow: requested {requested} bytes at alignment {align}"
                )
            }
            Self::UnknownBlock { addr } => {
                write!(f, "address {addr} is not a live block (double free or foreign address)")
            }
        }
    }
}

impl Error for ArenaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_address() {
        let err = ArenaError::UnknownBlock {
            addr: Address::new(0x40),
        };
        assert!(err.to_string().contains("0x40"));
    }

    #[test]
    fn display_layout_overflow() {
        let err = ArenaError::LayoutOverflow {
            requested: usize::MAX,
            align: 16,
        };
        let msg = err.to_string();
        assert!(msg.contains("alignment 16"));
    }
}
