//! Access leases: the only way a session reaches a buffer.
//!
//! A buffer may be leased to one writer or to any number of readers.
//! Conflicting requests fail with `BufferBusy` instead of racing, and a
//! lease gives its claim back when dropped.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use filemem_core::{ArenaError, BufferHandle, SessionMode};
use tracing::trace;

use crate::buffer::Buffer;
use crate::growth::GrowthPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LeaseState {
    Free,
    Readers(u32),
    Writer,
}

/// One arena slot: the buffer plus its lease bookkeeping.
pub(crate) struct Entry {
    pub(crate) buffer: RefCell<Buffer>,
    lease: Cell<LeaseState>,
}

impl Entry {
    pub(crate) fn new(buffer: Buffer) -> Self {
        Self {
            buffer: RefCell::new(buffer),
            lease: Cell::new(LeaseState::Free),
        }
    }

    /// Mode of the lease currently held, if any.
    pub(crate) fn held(&self) -> Option<SessionMode> {
        match self.lease.get() {
            LeaseState::Free => None,
            LeaseState::Readers(_) => Some(SessionMode::Read),
            LeaseState::Writer => Some(SessionMode::Write),
        }
    }
}

/// Shared read access to one buffer.
pub struct ReadLease {
    handle: BufferHandle,
    entry: Rc<Entry>,
}

impl ReadLease {
    pub(crate) fn acquire(handle: BufferHandle, entry: Rc<Entry>) -> Result<Self, ArenaError> {
        match entry.lease.get() {
            LeaseState::Free => entry.lease.set(LeaseState::Readers(1)),
            LeaseState::Readers(n) => entry.lease.set(LeaseState::Readers(n + 1)),
            LeaseState::Writer => {
                return Err(ArenaError::BufferBusy {
                    handle,
                    held: SessionMode::Write,
                })
            }
        }
        trace!(%handle, state = ?entry.lease.get(), "read lease acquired");
        Ok(Self { handle, entry })
    }

    /// Handle of the leased buffer.
    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    /// Borrow the buffer.
    pub fn buffer(&self) -> Ref<'_, Buffer> {
        self.entry.buffer.borrow()
    }
}

impl Drop for ReadLease {
    fn drop(&mut self) {
        let next = match self.entry.lease.get() {
            LeaseState::Readers(n) if n > 1 => LeaseState::Readers(n - 1),
            _ => LeaseState::Free,
        };
        self.entry.lease.set(next);
        trace!(handle = %self.handle, state = ?next, "read lease released");
    }
}

impl fmt::Debug for ReadLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadLease")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

/// Exclusive write access to one buffer.
pub struct WriteLease {
    handle: BufferHandle,
    entry: Rc<Entry>,
    policy: GrowthPolicy,
}

impl WriteLease {
    pub(crate) fn acquire(
        handle: BufferHandle,
        entry: Rc<Entry>,
        policy: GrowthPolicy,
    ) -> Result<Self, ArenaError> {
        if let Some(held) = entry.held() {
            return Err(ArenaError::BufferBusy { handle, held });
        }
        entry.lease.set(LeaseState::Writer);
        trace!(%handle, "write lease acquired");
        Ok(Self {
            handle,
            entry,
            policy,
        })
    }

    /// Handle of the leased buffer.
    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    /// Growth policy of the arena that issued this lease.
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Borrow the buffer.
    pub fn buffer(&self) -> Ref<'_, Buffer> {
        self.entry.buffer.borrow()
    }

    /// Borrow the buffer mutably.
    pub fn buffer_mut(&mut self) -> RefMut<'_, Buffer> {
        self.entry.buffer.borrow_mut()
    }
}

impl Drop for WriteLease {
    fn drop(&mut self) {
        self.entry.lease.set(LeaseState::Free);
        trace!(handle = %self.handle, "write lease released");
    }
}

impl fmt::Debug for WriteLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteLease")
            .field("handle", &self.handle)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
