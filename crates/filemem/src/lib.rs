//! filemem: treat a block of process memory as a forward-only file.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the filemem sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use filemem::prelude::*;
//!
//! let mut arena = BufferArena::default();
//! let handle = arena.create().unwrap();
//! let locator = Locator::for_handle(handle).with_extension("bin").to_string();
//! let protocol = FileMemProtocol::new();
//!
//! // Producer: append into the buffer.
//! let mut out = protocol.open(&arena, &locator, AccessFlags::WRITE).unwrap();
//! out.write(b"hello").unwrap();
//! out.write(b"world").unwrap();
//! out.close();
//!
//! // Consumer: read it back through the same locator.
//! let mut input = protocol.open(&arena, &locator, AccessFlags::READ).unwrap();
//! let mut buf = [0u8; 20];
//! assert_eq!(input.read(&mut buf).unwrap(), ReadOutcome::Data(10));
//! assert_eq!(&buf[..10], b"helloworld");
//! assert_eq!(input.read(&mut buf).unwrap(), ReadOutcome::EndOfStream);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `filemem-core` | Handles, access flags, errors, protocol trait |
//! | [`arena`] | `filemem-arena` | Buffer arena, leases, growth policy, config |
//! | [`stream`] | `filemem-stream` | Locators, sessions, the `filemem` protocol |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Handles, access flags, error types, and the protocol trait (`filemem-core`).
pub use filemem_core as types;

/// Buffer arena, leases, and growth policy (`filemem-arena`).
pub use filemem_arena as arena;

/// Locators, read/write sessions, and the protocol entry point (`filemem-stream`).
pub use filemem_stream as stream;

/// Common imports for typical filemem usage.
pub mod prelude {
    pub use filemem_arena::{ArenaConfig, BufferArena};
    pub use filemem_core::{
        AccessFlags, ArenaError, BufferHandle, LocatorError, SessionMode, StreamError,
        StreamProtocol,
    };
    pub use filemem_stream::{FileMemProtocol, Locator, MemoryStream, ReadOutcome};
}
