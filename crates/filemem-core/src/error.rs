//! Error types for the filemem stream protocol.
//!
//! Organized by layer: arena (handle lookup, leasing, allocation),
//! locator parsing, and the stream session surface that wraps both.
//! End-of-stream is deliberately absent: it is a normal read outcome,
//! not an error.

use std::error::Error;
use std::fmt;
use std::io;

use crate::access::SessionMode;
use crate::id::BufferHandle;

/// Errors from buffer arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The handle does not name a live buffer: it was never issued,
    /// or the buffer it named has been released.
    InvalidHandle {
        /// The handle that failed to resolve.
        handle: BufferHandle,
    },
    /// The buffer is leased in a mode that conflicts with the request.
    /// One writer or any number of readers may hold a buffer at once.
    BufferBusy {
        /// The contended buffer.
        handle: BufferHandle,
        /// Mode of the lease currently held.
        held: SessionMode,
    },
    /// Growth would exceed the configured per-buffer byte limit.
    CapacityExceeded {
        /// Number of bytes the buffer needed to hold.
        requested: usize,
        /// Configured maximum buffer size in bytes.
        limit: usize,
    },
    /// Backing storage could not be allocated (OOM or size overflow).
    AllocationFailed {
        /// Capacity in bytes that could not be allocated.
        requested: usize,
    },
    /// Every handle slot is in use or retired; no new buffer can be named.
    HandlesExhausted,
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHandle { handle } => {
                write!(f, "invalid buffer handle {handle:x}")
            }
            Self::BufferBusy { handle, held } => {
                write!(f, "buffer {handle:x} is busy: held by a {held} session")
            }
            Self::CapacityExceeded { requested, limit } => {
                write!(
                    f,
                    "buffer capacity exceeded: requested {requested} bytes, limit {limit} bytes"
                )
            }
            Self::AllocationFailed { requested } => {
                write!(f, "failed to allocate {requested} bytes of buffer storage")
            }
            Self::HandlesExhausted => write!(f, "buffer handle space exhausted"),
        }
    }
}

impl Error for ArenaError {}

/// Errors from parsing a `filemem:` locator string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocatorError {
    /// No handle digits between the scheme prefix and the `.` delimiter.
    MissingHandle,
    /// The handle text contains characters that are not hex digits.
    InvalidHex {
        /// The offending handle text.
        text: String,
    },
    /// The handle text is valid hex but does not fit in 64 bits.
    HandleOverflow {
        /// The offending handle text.
        text: String,
    },
}

impl fmt::Display for LocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHandle => write!(f, "locator carries no buffer handle"),
            Self::InvalidHex { text } => {
                write!(f, "locator handle '{text}' is not hexadecimal")
            }
            Self::HandleOverflow { text } => {
                write!(f, "locator handle '{text}' does not fit in 64 bits")
            }
        }
    }
}

impl Error for LocatorError {}

/// Errors surfaced by stream sessions and the protocol entry points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamError {
    /// The locator string could not be parsed.
    Locator(LocatorError),
    /// The arena rejected the operation.
    Arena(ArenaError),
    /// The access flags requested neither reading nor writing.
    InvalidAccess,
    /// The operation requires a session of a different mode.
    WrongMode {
        /// Mode the operation requires.
        expected: SessionMode,
    },
    /// The scheme may not be chained behind this protocol.
    SchemeNotPermitted {
        /// The rejected scheme name.
        scheme: String,
    },
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locator(e) => write!(f, "bad locator: {e}"),
            Self::Arena(e) => write!(f, "arena error: {e}"),
            Self::InvalidAccess => write!(f, "access flags request neither read nor write"),
            Self::WrongMode { expected } => {
                write!(f, "operation requires a {expected} session")
            }
            Self::SchemeNotPermitted { scheme } => {
                write!(f, "scheme '{scheme}' is not on the protocol whitelist")
            }
        }
    }
}

impl Error for StreamError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Locator(e) => Some(e),
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LocatorError> for StreamError {
    fn from(e: LocatorError) -> Self {
        Self::Locator(e)
    }
}

impl From<ArenaError> for StreamError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

impl StreamError {
    /// The `std::io` error kind this error maps to.
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            Self::Locator(_) | Self::InvalidAccess => io::ErrorKind::InvalidInput,
            Self::Arena(ArenaError::InvalidHandle { .. }) => io::ErrorKind::InvalidInput,
            Self::Arena(ArenaError::BufferBusy { .. }) => io::ErrorKind::WouldBlock,
            Self::Arena(ArenaError::CapacityExceeded { .. })
            | Self::Arena(ArenaError::AllocationFailed { .. })
            | Self::Arena(ArenaError::HandlesExhausted) => io::ErrorKind::OutOfMemory,
            Self::WrongMode { .. } => io::ErrorKind::Unsupported,
            Self::SchemeNotPermitted { .. } => io::ErrorKind::PermissionDenied,
        }
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        io::Error::new(e.io_kind(), e)
    }
}
