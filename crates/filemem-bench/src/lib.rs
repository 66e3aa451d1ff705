//! Benchmark profiles for the filemem stream protocol.
//!
//! - [`WriteProfile::streaming`]: 1 MiB appended in 4 KiB chunks
//! - [`WriteProfile::burst`]: 1 MiB in a single write
//! - [`WriteProfile::trickle`]: 64 KiB + 1 appended a byte at a time,
//!   crossing the default initial capacity once

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use filemem_arena::BufferArena;
use filemem_core::{AccessFlags, BufferHandle, StreamError};
use filemem_stream::{FileMemProtocol, Locator, ReadOutcome};

/// Shape of a write workload.
#[derive(Clone, Copy, Debug)]
pub struct WriteProfile {
    /// Total bytes written per session.
    pub total: usize,
    /// Bytes per write call.
    pub chunk: usize,
}

impl WriteProfile {
    /// 1 MiB in 4 KiB appends.
    pub const fn streaming() -> Self {
        Self {
            total: 1 << 20,
            chunk: 4 << 10,
        }
    }

    /// 1 MiB in one append.
    pub const fn burst() -> Self {
        Self {
            total: 1 << 20,
            chunk: 1 << 20,
        }
    }

    /// 64 KiB + 1 bytes, one byte per append.
    pub const fn trickle() -> Self {
        Self {
            total: (64 << 10) + 1,
            chunk: 1,
        }
    }
}

/// Open a write session on `handle` and append up to `profile.total`
/// bytes of `payload` in `profile.chunk`-sized pieces. Returns bytes
/// written, which is short when `payload` is.
pub fn run_write(
    arena: &BufferArena,
    handle: BufferHandle,
    payload: &[u8],
    profile: WriteProfile,
) -> Result<usize, StreamError> {
    let locator = Locator::for_handle(handle).to_string();
    let mut stream = FileMemProtocol::new().open(arena, &locator, AccessFlags::WRITE)?;
    let mut written = 0;
    let total = profile.total.min(payload.len());
    for chunk in payload[..total].chunks(profile.chunk) {
        written += stream.write(chunk)?;
    }
    Ok(written)
}

/// Open a read session on `handle` and consume it in `chunk`-sized reads.
/// Returns bytes read.
pub fn run_read(
    arena: &BufferArena,
    handle: BufferHandle,
    chunk: usize,
) -> Result<usize, StreamError> {
    let locator = Locator::for_handle(handle).to_string();
    let mut stream = FileMemProtocol::new().open(arena, &locator, AccessFlags::READ)?;
    let mut buf = vec![0u8; chunk];
    let mut total = 0;
    while let ReadOutcome::Data(n) = stream.read(&mut buf)? {
        total += n;
    }
    Ok(total)
}
