//! Open stream sessions over a leased buffer.
//!
//! A session's mode is fixed at open time and encoded in the type:
//! [`ReadSession`] tracks a `read_offset` into the valid bytes, while
//! [`WriteSession`] tracks the logical `capacity` that drives growth.
//! Dropping a session closes it and returns the lease to the arena.

use std::io;

use filemem_arena::{ReadLease, WriteLease};
use filemem_core::{ArenaError, BufferHandle, SessionMode, StreamError};
use tracing::{debug, trace};

/// Result of a sequential read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// This many bytes were copied into the destination.
    Data(usize),
    /// Every valid byte has been read. Not an error.
    EndOfStream,
}

impl ReadOutcome {
    /// Bytes copied; zero at end of stream.
    pub fn bytes(self) -> usize {
        match self {
            Self::Data(n) => n,
            Self::EndOfStream => 0,
        }
    }

    /// Whether this is the end-of-stream signal.
    pub fn is_end_of_stream(self) -> bool {
        self == Self::EndOfStream
    }
}

/// Sequential reader over a buffer's valid bytes.
///
/// Bytes past the buffer's valid length are never visible, even when
/// the storage behind them is allocated.
#[derive(Debug)]
pub struct ReadSession {
    lease: ReadLease,
    read_offset: usize,
}

impl ReadSession {
    /// Start reading at offset zero. The buffer's length is untouched.
    pub fn open(lease: ReadLease) -> Self {
        debug!(
            handle = %lease.handle(),
            len = lease.buffer().len(),
            "read session opened"
        );
        Self {
            lease,
            read_offset: 0,
        }
    }

    /// Copy up to `dst.len()` bytes from the cursor and advance it.
    pub fn read(&mut self, dst: &mut [u8]) -> ReadOutcome {
        let buffer = self.lease.buffer();
        if buffer.len() <= self.read_offset {
            trace!(handle = %self.lease.handle(), offset = self.read_offset, "end of stream");
            return ReadOutcome::EndOfStream;
        }
        let n = buffer.read_at(self.read_offset, dst);
        self.read_offset += n;
        trace!(handle = %self.lease.handle(), n, offset = self.read_offset, "read");
        ReadOutcome::Data(n)
    }

    /// Bytes read so far.
    pub fn read_offset(&self) -> usize {
        self.read_offset
    }

    /// Valid bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.lease.buffer().len().saturating_sub(self.read_offset)
    }

    /// Handle of the buffer being read.
    pub fn handle(&self) -> BufferHandle {
        self.lease.handle()
    }
}

impl io::Read for ReadSession {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(ReadSession::read(self, buf).bytes())
    }
}

/// Append-only writer that grows the buffer on demand.
///
/// An allocation failure is fatal for the session: the error is
/// remembered and every later write reports it again without touching
/// the buffer.
#[derive(Debug)]
pub struct WriteSession {
    lease: WriteLease,
    capacity: usize,
    failed: Option<ArenaError>,
}

impl WriteSession {
    /// Reset the buffer's valid length to zero and start appending.
    ///
    /// Existing storage is kept; its capacity, cut to the arena's
    /// per-buffer limit, seeds the growth check.
    pub fn open(mut lease: WriteLease) -> Self {
        let policy = lease.policy();
        let capacity = {
            let mut buffer = lease.buffer_mut();
            buffer.reset();
            policy.usable(buffer.capacity())
        };
        debug!(handle = %lease.handle(), capacity, "write session opened");
        Self {
            lease,
            capacity,
            failed: None,
        }
    }

    /// Append all of `data`, growing storage first if it does not fit.
    ///
    /// Returns `data.len()` on success. An empty write is a no-op and
    /// never allocates.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
        if let Some(err) = &self.failed {
            return Err(err.clone().into());
        }
        if data.is_empty() {
            return Ok(0);
        }
        if let Err(err) = self.reserve(data.len()) {
            self.failed = Some(err.clone());
            return Err(err.into());
        }
        self.lease.buffer_mut().append(data);
        trace!(handle = %self.lease.handle(), n = data.len(), "write");
        Ok(data.len())
    }

    fn reserve(&mut self, input: usize) -> Result<(), ArenaError> {
        let policy = self.lease.policy();
        let handle = self.lease.handle();
        let mut buffer = self.lease.buffer_mut();
        if self.capacity == 0 {
            let initial = policy.initial(input)?;
            buffer.regrow(initial)?;
            self.capacity = initial;
            debug!(%handle, capacity = initial, "initial buffer allocation");
            return Ok(());
        }
        let length = buffer.len();
        if self.capacity - length < input {
            let grown = policy.next(self.capacity, length, input)?;
            buffer.regrow(grown)?;
            debug!(%handle, from = self.capacity, to = grown, length, "buffer grown");
            self.capacity = grown;
        }
        Ok(())
    }

    /// Logical capacity tracked for growth decisions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Valid bytes written so far.
    pub fn len(&self) -> usize {
        self.lease.buffer().len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an earlier allocation failure has ended this session.
    pub fn is_failed(&self) -> bool {
        self.failed.is_some()
    }

    /// Handle of the buffer being written.
    pub fn handle(&self) -> BufferHandle {
        self.lease.handle()
    }
}

impl io::Write for WriteSession {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(WriteSession::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An open stream over one buffer, in the mode chosen at open time.
#[derive(Debug)]
pub enum MemoryStream {
    /// Opened for reading.
    Read(ReadSession),
    /// Opened for writing.
    Write(WriteSession),
}

impl MemoryStream {
    /// The session's mode.
    pub fn mode(&self) -> SessionMode {
        match self {
            Self::Read(_) => SessionMode::Read,
            Self::Write(_) => SessionMode::Write,
        }
    }

    /// Handle of the underlying buffer.
    pub fn handle(&self) -> BufferHandle {
        match self {
            Self::Read(s) => s.handle(),
            Self::Write(s) => s.handle(),
        }
    }

    /// Memory streams never seek.
    pub fn is_seekable(&self) -> bool {
        false
    }

    /// Bytes consumed (read mode) or produced (write mode) so far.
    pub fn position(&self) -> usize {
        match self {
            Self::Read(s) => s.read_offset(),
            Self::Write(s) => s.len(),
        }
    }

    /// Sequential read; fails with `WrongMode` on a write session.
    pub fn read(&mut self, dst: &mut [u8]) -> Result<ReadOutcome, StreamError> {
        match self {
            Self::Read(s) => Ok(s.read(dst)),
            Self::Write(_) => Err(StreamError::WrongMode {
                expected: SessionMode::Read,
            }),
        }
    }

    /// Sequential append; fails with `WrongMode` on a read session.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
        match self {
            Self::Write(s) => s.write(data),
            Self::Read(_) => Err(StreamError::WrongMode {
                expected: SessionMode::Write,
            }),
        }
    }

    /// The read session, if this stream was opened for reading.
    pub fn as_reader(&mut self) -> Option<&mut ReadSession> {
        match self {
            Self::Read(s) => Some(s),
            Self::Write(_) => None,
        }
    }

    /// The write session, if this stream was opened for writing.
    pub fn as_writer(&mut self) -> Option<&mut WriteSession> {
        match self {
            Self::Write(s) => Some(s),
            Self::Read(_) => None,
        }
    }

    /// Close the session, returning its lease to the arena.
    pub fn close(self) {
        debug!(handle = %self.handle(), mode = %self.mode(), position = self.position(), "session closed");
    }
}

impl io::Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(MemoryStream::read(self, buf)?.bytes())
    }
}

impl io::Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(MemoryStream::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
