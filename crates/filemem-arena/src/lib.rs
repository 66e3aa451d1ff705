//! Handle-addressed arena of growable byte buffers.
//!
//! A buffer is created by its owner, addressed everywhere else through
//! an opaque [`BufferHandle`](filemem_core::BufferHandle), and reached by
//! stream sessions only through a lease:
//!
//! ```text
//! BufferArena (owner)
//! ├── HandleTable<Rc<Entry>> (slot + generation, stale handles → InvalidHandle)
//! │   └── Entry
//! │       ├── RefCell<Buffer> (valid bytes, physical capacity)
//! │       └── Cell<LeaseState> (Free | Readers(n) | Writer)
//! └── GrowthPolicy (initial capacity, doubling, optional byte limit)
//! ```
//!
//! # Single-threaded by contract
//!
//! Entries are `Rc`-shared and the arena is `!Send`. Concurrent access
//! is unsupported; the lease protocol only sequences sessions within
//! one thread (one writer or any number of readers per buffer).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod buffer;
pub mod config;
pub mod growth;
pub mod lease;
pub mod table;

pub use arena::BufferArena;
pub use buffer::Buffer;
pub use config::{ArenaConfig, ConfigError};
pub use growth::GrowthPolicy;
pub use lease::{ReadLease, WriteLease};
