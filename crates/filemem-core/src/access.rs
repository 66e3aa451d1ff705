//! Access flags requested at open time and the session mode they select.

use std::fmt;
use std::ops::BitOr;

/// Access flags passed to `open`.
///
/// Mirrors the registry's flag word: bit 0 requests reading, bit 1
/// requests writing. Unknown bits are discarded by [`from_bits`](Self::from_bits).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AccessFlags(u8);

impl AccessFlags {
    /// Open for reading.
    pub const READ: Self = Self(1);
    /// Open for writing.
    pub const WRITE: Self = Self(2);
    /// Open for reading and writing. Selects a write session.
    pub const READ_WRITE: Self = Self(3);

    /// No access requested.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build flags from a raw bit word, keeping only the known bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::READ_WRITE.0)
    }

    /// The raw bit word.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no access bit is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The session mode these flags select.
    ///
    /// Any flag set that includes [`WRITE`](Self::WRITE) opens a write
    /// session. Returns `None` for empty flags.
    pub fn mode(self) -> Option<SessionMode> {
        if self.contains(Self::WRITE) {
            Some(SessionMode::Write)
        } else if self.contains(Self::READ) {
            Some(SessionMode::Read)
        } else {
            None
        }
    }
}

impl BitOr for AccessFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Mode of an open session, fixed for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionMode {
    /// Sequential reads from offset 0 up to the buffer's valid length.
    Read,
    /// Sequential appends; the buffer's valid length was reset on open.
    Write,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_flag_selects_write_mode() {
        assert_eq!(AccessFlags::WRITE.mode(), Some(SessionMode::Write));
        assert_eq!(AccessFlags::READ_WRITE.mode(), Some(SessionMode::Write));
    }

    #[test]
    fn read_flag_selects_read_mode() {
        assert_eq!(AccessFlags::READ.mode(), Some(SessionMode::Read));
    }

    #[test]
    fn empty_flags_select_nothing() {
        assert!(AccessFlags::empty().is_empty());
        assert_eq!(AccessFlags::empty().mode(), None);
    }

    #[test]
    fn unknown_bits_are_discarded() {
        let flags = AccessFlags::from_bits(0b1111_0101);
        assert_eq!(flags, AccessFlags::READ);
        assert_eq!(AccessFlags::from_bits(0b1000), AccessFlags::empty());
    }

    #[test]
    fn bitor_combines() {
        assert_eq!(
            AccessFlags::READ | AccessFlags::WRITE,
            AccessFlags::READ_WRITE
        );
        assert!(AccessFlags::READ_WRITE.contains(AccessFlags::READ));
    }
}
