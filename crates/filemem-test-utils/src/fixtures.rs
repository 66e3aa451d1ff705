//! Deterministic payloads and stream helpers for tests and benches.
//!
//! - [`seeded_payload`] / [`chunk_sizes`]: reproducible bytes and write plans.
//! - [`write_chunks`] / [`drain`]: drive a [`MemoryStream`] to completion.
//! - [`open`]: open a handle through the protocol, panicking on failure.

use filemem_arena::BufferArena;
use filemem_core::{AccessFlags, BufferHandle, StreamError};
use filemem_stream::{FileMemProtocol, Locator, MemoryStream, ReadOutcome};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `len` pseudo-random bytes, identical for identical seeds.
pub fn seeded_payload(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = vec![0u8; len];
    rng.fill_bytes(&mut out);
    out
}

/// Split `total` into chunk lengths in `1..=max_chunk`, summing to `total`.
pub fn chunk_sizes(seed: u64, total: usize, max_chunk: usize) -> Vec<usize> {
    assert!(max_chunk > 0, "max_chunk must be non-zero");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut sizes = Vec::new();
    let mut left = total;
    while left > 0 {
        let size = (1 + rng.next_u32() as usize % max_chunk).min(left);
        sizes.push(size);
        left -= size;
    }
    sizes
}

/// Write `data` in the given chunk lengths. Returns total bytes written.
pub fn write_chunks(
    stream: &mut MemoryStream,
    data: &[u8],
    sizes: &[usize],
) -> Result<usize, StreamError> {
    let mut offset = 0;
    for &size in sizes {
        offset += stream.write(&data[offset..offset + size])?;
    }
    Ok(offset)
}

/// Read until end of stream, `chunk` bytes at a time.
pub fn drain(stream: &mut MemoryStream, chunk: usize) -> Result<Vec<u8>, StreamError> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; chunk];
    loop {
        match stream.read(&mut buf)? {
            ReadOutcome::Data(n) => out.extend_from_slice(&buf[..n]),
            ReadOutcome::EndOfStream => return Ok(out),
        }
    }
}

/// Open `handle` with the default protocol. Panics on failure.
pub fn open(arena: &BufferArena, handle: BufferHandle, flags: AccessFlags) -> MemoryStream {
    let locator = Locator::for_handle(handle).to_string();
    FileMemProtocol::new()
        .open(arena, &locator, flags)
        .unwrap_or_else(|e| panic!("open {locator} failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_deterministic() {
        assert_eq!(seeded_payload(7, 64), seeded_payload(7, 64));
        assert_ne!(seeded_payload(7, 64), seeded_payload(8, 64));
    }

    #[test]
    fn chunk_sizes_sum_to_total() {
        let sizes = chunk_sizes(3, 10_000, 97);
        assert_eq!(sizes.iter().sum::<usize>(), 10_000);
        assert!(sizes.iter().all(|&s| (1..=97).contains(&s)));
        assert!(chunk_sizes(3, 0, 5).is_empty());
    }
}
