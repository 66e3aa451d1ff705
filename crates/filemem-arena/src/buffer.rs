//! Growable byte storage shared between a producer and its readers.

use filemem_core::ArenaError;
use tracing::debug;

/// A raw byte container: valid bytes plus spare physical capacity.
///
/// Only `[0, len)` is ever observable. Spare capacity left over from a
/// write session is never exposed and is not carried across a
/// [`regrow`](Self::regrow). Storage only grows; nothing here shrinks it.
#[derive(Debug, Default)]
pub struct Buffer {
    bytes: Vec<u8>,
}

impl Buffer {
    /// An empty, unallocated buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer whose valid bytes are `bytes`.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Number of valid bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer holds no valid bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Physical capacity of the backing storage in bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// The valid bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Logically discard all valid bytes, keeping the storage.
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    /// Copy valid bytes starting at `offset` into `dst`.
    ///
    /// Returns the number of bytes copied, which is zero at or past the
    /// end of the valid region.
    pub fn read_at(&self, offset: usize, dst: &mut [u8]) -> usize {
        let Some(src) = self.bytes.get(offset..) else {
            return 0;
        };
        let n = src.len().min(dst.len());
        dst[..n].copy_from_slice(&src[..n]);
        n
    }

    /// Move the valid bytes into fresh storage of at least `new_capacity`
    /// bytes and release the old storage.
    ///
    /// Allocation failure is reported rather than aborting the process.
    /// A `new_capacity` below the current length is raised to the length.
    pub fn regrow(&mut self, new_capacity: usize) -> Result<(), ArenaError> {
        let new_capacity = new_capacity.max(self.bytes.len());
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(new_capacity)
            .map_err(|_| ArenaError::AllocationFailed {
                requested: new_capacity,
            })?;
        fresh.extend_from_slice(&self.bytes);
        debug!(
            from = self.bytes.capacity(),
            to = fresh.capacity(),
            carried = fresh.len(),
            "buffer storage reallocated"
        );
        self.bytes = fresh;
        Ok(())
    }

    /// Append `data` after the valid bytes.
    ///
    /// Callers must size the storage first with [`regrow`](Self::regrow).
    /// Appending past capacity is a caller bug, asserted in debug builds.
    pub fn append(&mut self, data: &[u8]) {
        debug_assert!(
            self.bytes.len() + data.len() <= self.bytes.capacity(),
            "append past reserved capacity"
        );
        self.bytes.extend_from_slice(data);
    }

    /// Consume the buffer, returning its valid bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}
