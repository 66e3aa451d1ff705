//! Capacity growth policy for write sessions.
//!
//! The first write to an unallocated buffer gets the configured initial
//! capacity (or that plus the write length when the write alone is
//! larger). Later growth doubles the current capacity, adding the write
//! length on top when doubling still leaves too little room. Doubling
//! keeps appends amortised O(1) per byte with O(log n) reallocations.

use filemem_core::ArenaError;

use crate::config::ArenaConfig;

/// Pure capacity arithmetic; never allocates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPolicy {
    initial_capacity: usize,
    max_bytes: Option<usize>,
}

impl GrowthPolicy {
    /// Build a policy from explicit parameters.
    pub const fn new(initial_capacity: usize, max_bytes: Option<usize>) -> Self {
        Self {
            initial_capacity,
            max_bytes,
        }
    }

    /// Build the policy described by an arena config.
    pub fn from_config(config: &ArenaConfig) -> Self {
        Self::new(config.initial_capacity, config.max_buffer_bytes)
    }

    /// Capacity allocated by the first write of `input` bytes.
    pub fn initial(&self, input: usize) -> Result<usize, ArenaError> {
        let wanted = if input > self.initial_capacity {
            self.initial_capacity
                .checked_add(input)
                .ok_or(ArenaError::AllocationFailed {
                    requested: usize::MAX,
                })?
        } else {
            self.initial_capacity
        };
        self.clamp(wanted, input)
    }

    /// Capacity to grow to when `capacity - length < input`.
    pub fn next(&self, capacity: usize, length: usize, input: usize) -> Result<usize, ArenaError> {
        let needed = length
            .checked_add(input)
            .ok_or(ArenaError::AllocationFailed {
                requested: usize::MAX,
            })?;
        let wanted = match capacity.checked_mul(2) {
            Some(doubled) if doubled >= needed => doubled,
            // Doubling overflowed or is still short: add the input on top,
            // falling back to an exact fit if even that overflows.
            Some(doubled) => doubled.checked_add(input).unwrap_or(needed),
            None => needed,
        };
        self.clamp(wanted, needed)
    }

    /// Share of an existing allocation a write session may fill.
    ///
    /// Storage inherited from elsewhere can be larger than the limit;
    /// only the part below it counts, so growth past it is still checked.
    pub fn usable(&self, capacity: usize) -> usize {
        self.max_bytes.map_or(capacity, |limit| capacity.min(limit))
    }

    /// Configured first-write allocation.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Configured per-buffer limit, if any.
    pub fn max_bytes(&self) -> Option<usize> {
        self.max_bytes
    }

    fn clamp(&self, wanted: usize, needed: usize) -> Result<usize, ArenaError> {
        match self.max_bytes {
            Some(limit) if needed > limit => Err(ArenaError::CapacityExceeded {
                requested: needed,
                limit,
            }),
            Some(limit) => Ok(wanted.min(limit)),
            None => Ok(wanted),
        }
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::from_config(&ArenaConfig::default())
    }
}
