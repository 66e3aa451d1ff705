//! The buffer arena: owner of every buffer a locator can name.

use std::rc::Rc;

use filemem_core::{ArenaError, BufferHandle, SessionMode};
use tracing::debug;

use crate::buffer::Buffer;
use crate::config::{ArenaConfig, ConfigError};
use crate::growth::GrowthPolicy;
use crate::lease::{Entry, ReadLease, WriteLease};
use crate::table::HandleTable;

/// Owns buffers and hands out handles and leases for them.
///
/// The arena is the buffers' creator and sole owner: sessions only
/// borrow a buffer through a [`ReadLease`] or [`WriteLease`], and a
/// buffer is destroyed only by [`release`](Self::release). Handles are
/// validated on every lookup, so a stale or forged handle yields
/// [`ArenaError::InvalidHandle`] rather than touching foreign memory.
pub struct BufferArena {
    config: ArenaConfig,
    policy: GrowthPolicy,
    entries: HandleTable<Rc<Entry>>,
}

impl BufferArena {
    /// Create an arena after validating `config`.
    pub fn new(config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: ArenaConfig) -> Self {
        Self {
            policy: GrowthPolicy::from_config(&config),
            config,
            entries: HandleTable::new(),
        }
    }

    /// The arena's configuration.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Growth policy applied by write sessions on this arena's buffers.
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Create an empty, unallocated buffer.
    pub fn create(&mut self) -> Result<BufferHandle, ArenaError> {
        let handle = self.insert(Buffer::new())?;
        debug!(%handle, "buffer created");
        Ok(handle)
    }

    /// Create a buffer whose valid bytes are `bytes`, ready for readers.
    ///
    /// Fails with `CapacityExceeded` if `bytes` is longer than the
    /// configured `max_buffer_bytes`.
    pub fn create_from(&mut self, bytes: impl Into<Vec<u8>>) -> Result<BufferHandle, ArenaError> {
        let bytes = bytes.into();
        let len = bytes.len();
        if let Some(limit) = self.config.max_buffer_bytes {
            if len > limit {
                return Err(ArenaError::CapacityExceeded {
                    requested: len,
                    limit,
                });
            }
        }
        let handle = self.insert(Buffer::from_vec(bytes))?;
        debug!(%handle, len, "buffer created from bytes");
        Ok(handle)
    }

    fn insert(&mut self, buffer: Buffer) -> Result<BufferHandle, ArenaError> {
        self.entries
            .insert(Rc::new(Entry::new(buffer)))
            .ok_or(ArenaError::HandlesExhausted)
    }

    /// Whether `handle` names a live buffer.
    pub fn contains(&self, handle: BufferHandle) -> bool {
        self.entries.contains(handle)
    }

    /// Number of live buffers.
    pub fn buffer_count(&self) -> usize {
        self.entries.len()
    }

    /// Handles of all live buffers.
    pub fn handles(&self) -> impl Iterator<Item = BufferHandle> + '_ {
        self.entries.handles()
    }

    /// Valid length of a buffer in bytes.
    pub fn length(&self, handle: BufferHandle) -> Result<usize, ArenaError> {
        Ok(self.entry(handle)?.buffer.borrow().len())
    }

    /// Physical capacity of a buffer's storage in bytes.
    pub fn capacity(&self, handle: BufferHandle) -> Result<usize, ArenaError> {
        Ok(self.entry(handle)?.buffer.borrow().capacity())
    }

    /// Copy out a buffer's valid bytes.
    ///
    /// Fails with `BufferBusy` while a write session is open on it.
    pub fn contents(&self, handle: BufferHandle) -> Result<Vec<u8>, ArenaError> {
        let entry = self.entry(handle)?;
        if entry.held() == Some(SessionMode::Write) {
            return Err(ArenaError::BufferBusy {
                handle,
                held: SessionMode::Write,
            });
        }
        let bytes = entry.buffer.borrow().as_bytes().to_vec();
        Ok(bytes)
    }

    /// Destroy a buffer and return its valid bytes.
    ///
    /// Refused with `BufferBusy` while any session holds a lease. The
    /// handle is stale afterwards.
    pub fn release(&mut self, handle: BufferHandle) -> Result<Vec<u8>, ArenaError> {
        if let Some(held) = self.entry(handle)?.held() {
            return Err(ArenaError::BufferBusy { handle, held });
        }
        let entry = self
            .entries
            .remove(handle)
            .ok_or(ArenaError::InvalidHandle { handle })?;
        let bytes = match Rc::try_unwrap(entry) {
            Ok(entry) => entry.buffer.into_inner().into_vec(),
            Err(shared) => shared.buffer.borrow().as_bytes().to_vec(),
        };
        debug!(%handle, len = bytes.len(), "buffer released");
        Ok(bytes)
    }

    /// Lease a buffer for reading.
    pub fn lease_read(&self, handle: BufferHandle) -> Result<ReadLease, ArenaError> {
        ReadLease::acquire(handle, Rc::clone(self.entry(handle)?))
    }

    /// Lease a buffer for exclusive writing.
    pub fn lease_write(&self, handle: BufferHandle) -> Result<WriteLease, ArenaError> {
        WriteLease::acquire(handle, Rc::clone(self.entry(handle)?), self.policy)
    }

    fn entry(&self, handle: BufferHandle) -> Result<&Rc<Entry>, ArenaError> {
        self.entries
            .get(handle)
            .ok_or(ArenaError::InvalidHandle { handle })
    }
}

impl Default for BufferArena {
    fn default() -> Self {
        Self::with_valid_config(ArenaConfig::default())
    }
}
