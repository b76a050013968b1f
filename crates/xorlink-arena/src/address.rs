//! The opaque [`Address`] type.
//!
//! An address names a block handed out by an [`Arena`](crate::Arena). It is
//! a plain integer so that two addresses can be folded together with XOR and
//! recovered later; the value `0` is reserved for "no block".

use std::fmt;
use std::ops::{BitXor, BitXorAssign};

/// Opaque integer address of an arena block.
///
/// `Address` carries no provenance and no lifetime. Turning it back into a
/// pointer and dereferencing it is only sound while the block it names is
/// live, which the arena's callers must guarantee.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Address(usize);

impl Address {
    /// The null address. XOR identity and "no neighbour" marker.
    pub const NULL: Address = Address(0);

    /// Wrap a raw integer.
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Address of the memory a pointer points at.
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize)
    }

    /// The raw integer value.
    pub const fn get(self) -> usize {
        self.0
    }

    /// Whether this is [`Address::NULL`].
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Reinterpret the address as a typed pointer.
    ///
    /// Creating the pointer is safe; dereferencing it is not.
    pub fn as_ptr<T>(self) -> *mut T {
        self.0 as *mut T
    }

    /// Offset the address by `bytes`.
    pub(crate) fn add(self, bytes: usize) -> Self {
        Self(self.0 + bytes)
    }

    /// Offset the address backwards by `bytes`.
    pub(crate) fn sub(self, bytes: usize) -> Self {
        Self(self.0 - bytes)
    }
}

impl BitXor for Address {
    type Output = Address;

    fn bitxor(self, rhs: Address) -> Address {
        Address(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Address {
    fn bitxor_assign(&mut self, rhs: Address) {
        self.0 ^= rhs.0;
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Address(null)")
        } else {
            write!(f, "Address({:#x})", self.0)
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
