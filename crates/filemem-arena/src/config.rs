//! Arena configuration parameters.

use std::error::Error;
use std::fmt;

/// Configuration for a [`BufferArena`](crate::BufferArena).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Capacity in bytes allocated on the first write to an empty buffer.
    ///
    /// Default: 65_536. A first write larger than this allocates
    /// `initial_capacity + write_len` instead. Must be non-zero.
    pub initial_capacity: usize,

    /// Upper bound on any single buffer's valid bytes.
    ///
    /// Default: `None` (bounded only by the allocator). When set, growth
    /// is clamped to the limit and fails with `CapacityExceeded` once the
    /// valid bytes themselves would not fit. `create_from` refuses longer
    /// input, and storage above the limit is never written into.
    pub max_buffer_bytes: Option<usize>,
}

impl ArenaConfig {
    /// Default first-write allocation: 64 KiB.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 65_536;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            max_buffer_bytes: None,
        }
    }

    /// Set the per-buffer byte limit.
    pub fn with_max_buffer_bytes(mut self, limit: usize) -> Self {
        self.max_buffer_bytes = Some(limit);
        self
    }

    /// Set the first-write allocation size.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroInitialCapacity);
        }
        if let Some(limit) = self.max_buffer_bytes {
            if limit < self.initial_capacity {
                return Err(ConfigError::LimitBelowInitialCapacity {
                    initial_capacity: self.initial_capacity,
                    limit,
                });
            }
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors detected by [`ArenaConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `initial_capacity` is zero.
    ZeroInitialCapacity,
    /// `max_buffer_bytes` is smaller than `initial_capacity`.
    LimitBelowInitialCapacity {
        /// Configured first-write allocation.
        initial_capacity: usize,
        /// Configured per-buffer limit.
        limit: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInitialCapacity => write!(f, "initial_capacity must be non-zero"),
            Self::LimitBelowInitialCapacity {
                initial_capacity,
                limit,
            } => write!(
                f,
                "max_buffer_bytes ({limit}) is below initial_capacity ({initial_capacity})"
            ),
        }
    }
}

impl Error for ConfigError {}
