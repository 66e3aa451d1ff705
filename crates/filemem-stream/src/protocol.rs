//! The `filemem` protocol: capability declaration and `open`.

use filemem_arena::BufferArena;
use filemem_core::{AccessFlags, ProtocolWhitelist, SessionMode, StreamError, StreamProtocol};
use tracing::debug;

use crate::locator::{Locator, SCHEME};
use crate::session::{MemoryStream, ReadSession, WriteSession};

/// In-memory stream protocol addressed by `filemem:<hex handle>` locators.
///
/// Declares itself non-seekable and, by default, allows only the
/// `crypto` and `data` schemes to be chained behind it.
#[derive(Clone, Debug)]
pub struct FileMemProtocol {
    whitelist: ProtocolWhitelist,
}

impl FileMemProtocol {
    /// Default chaining whitelist, in registry list form.
    pub const DEFAULT_WHITELIST: &'static str = "crypto,data";

    /// Protocol with the default whitelist.
    pub fn new() -> Self {
        Self::with_whitelist(ProtocolWhitelist::parse(Self::DEFAULT_WHITELIST))
    }

    /// Protocol with a caller-chosen whitelist.
    pub fn with_whitelist(whitelist: ProtocolWhitelist) -> Self {
        Self { whitelist }
    }

    /// Open the buffer named by `locator` in the mode `flags` select.
    ///
    /// Write mode resets the buffer's valid length to zero; read mode
    /// starts at offset zero and leaves the length alone.
    pub fn open(
        &self,
        arena: &BufferArena,
        locator: &str,
        flags: AccessFlags,
    ) -> Result<MemoryStream, StreamError> {
        let locator = Locator::parse(locator)?;
        self.open_locator(arena, &locator, flags)
    }

    /// [`open`](Self::open) for an already-parsed locator.
    pub fn open_locator(
        &self,
        arena: &BufferArena,
        locator: &Locator,
        flags: AccessFlags,
    ) -> Result<MemoryStream, StreamError> {
        let mode = flags.mode().ok_or(StreamError::InvalidAccess)?;
        let handle = locator.handle();
        debug!(%locator, %mode, "opening memory stream");
        let stream = match mode {
            SessionMode::Read => MemoryStream::Read(ReadSession::open(arena.lease_read(handle)?)),
            SessionMode::Write => {
                MemoryStream::Write(WriteSession::open(arena.lease_write(handle)?))
            }
        };
        Ok(stream)
    }

    /// Fail with `SchemeNotPermitted` unless `scheme` may be chained.
    pub fn check_chain(&self, scheme: &str) -> Result<(), StreamError> {
        if self.permits_chain(scheme) {
            Ok(())
        } else {
            Err(StreamError::SchemeNotPermitted {
                scheme: scheme.to_owned(),
            })
        }
    }
}

impl Default for FileMemProtocol {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamProtocol for FileMemProtocol {
    fn name(&self) -> &str {
        SCHEME
    }

    fn is_seekable(&self) -> bool {
        false
    }

    fn default_whitelist(&self) -> &ProtocolWhitelist {
        &self.whitelist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filemem_core::{ArenaError, BufferHandle, LocatorError};

    #[test]
    fn declares_non_seekable_filemem() {
        let p = FileMemProtocol::new();
        assert_eq!(p.name(), "filemem");
        assert!(!p.is_seekable());
        assert_eq!(p.default_whitelist().to_string(), "crypto,data");
    }

    #[test]
    fn chain_check_uses_whitelist() {
        let p = FileMemProtocol::default();
        assert!(p.check_chain("crypto").is_ok());
        assert!(p.check_chain("data").is_ok());
        assert_eq!(
            p.check_chain("http"),
            Err(StreamError::SchemeNotPermitted {
                scheme: "http".into()
            })
        );

        let custom = FileMemProtocol::with_whitelist(ProtocolWhitelist::parse("http"));
        assert!(custom.check_chain("http").is_ok());
        assert!(custom.check_chain("crypto").is_err());
    }

    #[test]
    fn flags_pick_session_mode() {
        let mut arena = BufferArena::default();
        let h = arena.create().unwrap();
        let loc = Locator::for_handle(h).to_string();
        let p = FileMemProtocol::new();

        let s = p.open(&arena, &loc, AccessFlags::READ_WRITE).unwrap();
        assert_eq!(s.mode(), SessionMode::Write);
        drop(s);
        let s = p.open(&arena, &loc, AccessFlags::READ).unwrap();
        assert_eq!(s.mode(), SessionMode::Read);
        assert_eq!(s.handle(), h);
    }

    #[test]
    fn empty_flags_rejected() {
        let mut arena = BufferArena::default();
        let h = arena.create().unwrap();
        let err = FileMemProtocol::new()
            .open_locator(&arena, &Locator::for_handle(h), AccessFlags::empty())
            .unwrap_err();
        assert_eq!(err, StreamError::InvalidAccess);
    }

    #[test]
    fn unknown_handle_is_reported() {
        let arena = BufferArena::default();
        let err = FileMemProtocol::new()
            .open(&arena, "filemem:1a2b3c", AccessFlags::READ)
            .unwrap_err();
        assert_eq!(
            err,
            StreamError::Arena(ArenaError::InvalidHandle {
                handle: BufferHandle::from_raw(0x1a2b3c)
            })
        );
    }

    #[test]
    fn malformed_locator_is_reported() {
        let arena = BufferArena::default();
        let err = FileMemProtocol::new()
            .open(&arena, "filemem:xyz", AccessFlags::WRITE)
            .unwrap_err();
        assert_eq!(
            err,
            StreamError::Locator(LocatorError::InvalidHex { text: "xyz".into() })
        );
    }

    #[test]
    fn second_writer_is_busy() {
        let mut arena = BufferArena::default();
        let h = arena.create().unwrap();
        let loc = Locator::for_handle(h).with_extension("bin").to_string();
        let p = FileMemProtocol::new();
        let _w = p.open(&arena, &loc, AccessFlags::WRITE).unwrap();
        assert_eq!(
            p.open(&arena, &loc, AccessFlags::READ).unwrap_err(),
            StreamError::Arena(ArenaError::BufferBusy {
                handle: h,
                held: SessionMode::Write,
            })
        );
    }
}
