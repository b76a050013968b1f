//! List error types.

use std::error::Error;
use std::fmt;

/// Errors from fallible list insertions.
///
/// The rejected value is handed back so the caller can retry or drop it.
#[derive(Clone, PartialEq, Eq)]
pub enum ListError<T> {
    /// The arena could not provide a node block.
    AllocationFailed {
        /// Size of the node block that was requested, in bytes.
        requested: usize,
        /// The value that was not inserted.
        value: T,
    },
}

impl<T> ListError<T> {
    /// Recover the value that could not be inserted.
    pub fn into_value(self) -> T {
        match self {
            Self::AllocationFailed { value, .. } => value,
        }
    }
}

impl<T> fmt::Debug for ListError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested, .. } => f
                .debug_struct("AllocationFailed")
                .field("requested", requested)
                .finish_non_exhaustive(),
        }
    }
}

impl<T> fmt::Display for ListError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested, .. } => {
                write!(f, "node allocation failed: requested {requested} bytes")
            }
        }
    }
}

impl<T> Error for ListError<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_value_returns_payload() {
        let err = ListError::AllocationFailed {
            requested: 16,
            value: String::from("kept"),
        };
        assert_eq!(err.into_value(), "kept");
    }

    #[test]
    fn display_and_debug_omit_payload() {
        let err = ListError::AllocationFailed {
            requested: 24,
            value: 7u8,
        };
        assert_eq!(err.to_string(), "node allocation failed: requested 24 bytes");
        assert_eq!(format!("{err:?}"), "AllocationFailed { requested: 24, .. }");
    }
}
