//! Core types and traits for the filemem in-memory stream protocol.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the arena and the stream layer: buffer
//! handles, access flags, error types, and the protocol capability
//! trait consumed by a stream registry.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod access;
pub mod error;
pub mod id;
pub mod traits;

pub use access::{AccessFlags, SessionMode};
pub use error::{ArenaError, LocatorError, StreamError};
pub use id::BufferHandle;
pub use traits::{ProtocolWhitelist, StreamProtocol};
