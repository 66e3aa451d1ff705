//! Sequential streams over in-memory arena buffers.
//!
//! A producer creates a buffer in a [`BufferArena`](filemem_arena::BufferArena),
//! embeds its handle in a `filemem:<hex>` [`Locator`], and hands the
//! locator to whatever opens streams by name. [`FileMemProtocol::open`]
//! decodes the handle, leases the buffer, and returns a [`MemoryStream`]:
//!
//! - opened for **write**, the buffer's valid length resets to zero and
//!   every write appends, growing storage by the arena's growth policy;
//! - opened for **read**, the session walks the valid bytes from offset
//!   zero and reports [`ReadOutcome::EndOfStream`] once they are consumed.
//!
//! Streams are strictly sequential: no seeking, no random access.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod locator;
pub mod protocol;
pub mod session;

pub use locator::Locator;
pub use protocol::FileMemProtocol;
pub use session::{MemoryStream, ReadOutcome, ReadSession, WriteSession};
