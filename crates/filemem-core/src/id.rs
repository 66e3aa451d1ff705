//! Strongly-typed buffer handles.

use std::fmt;

/// Opaque reference to a buffer held in a buffer arena.
///
/// Encoding: upper 32 bits = slot index, lower 32 bits = slot generation.
/// Any `u64` can be wrapped in a handle; whether it names a live buffer
/// is decided by the arena at lookup time, never by the handle itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(u64);

impl BufferHandle {
    /// Build a handle from its slot index and generation.
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self(((slot as u64) << 32) | generation as u64)
    }

    /// Wrap a raw handle value, e.g. one decoded from a locator.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw encoded value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Slot index within the arena's handle table.
    pub const fn slot(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Generation of the slot when this handle was issued.
    pub const fn generation(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl fmt::LowerHex for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl From<u64> for BufferHandle {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
