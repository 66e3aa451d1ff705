//! `filemem:` locator strings.
//!
//! Format: `filemem:` + hexadecimal handle, optionally followed by `.`
//! and free-form suffix text (a file extension hint for the consumer).
//! The suffix is kept but has no effect on which buffer is opened.

use std::fmt;
use std::str::FromStr;

use filemem_core::{BufferHandle, LocatorError};

/// Scheme name of the in-memory stream protocol.
pub const SCHEME: &str = "filemem";

const PREFIX: &str = "filemem:";

/// A parsed locator: the buffer handle plus optional suffix metadata.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Locator {
    handle: BufferHandle,
    extension: Option<String>,
}

impl Locator {
    /// Locator naming `handle` with no suffix.
    pub fn for_handle(handle: BufferHandle) -> Self {
        Self {
            handle,
            extension: None,
        }
    }

    /// Attach a suffix, rendered after a `.`.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Parse a locator string.
    ///
    /// The `filemem:` prefix is optional, so a bare hex handle parses too.
    /// Only the text before the first `.` is decoded; an optional `0x` is
    /// allowed, and the digits must be non-empty, all hex, and fit in 64
    /// bits.
    pub fn parse(text: &str) -> Result<Self, LocatorError> {
        let body = text.strip_prefix(PREFIX).unwrap_or(text);
        let (digits, extension) = match body.split_once('.') {
            Some((digits, ext)) => (digits, Some(ext.to_owned())),
            None => (body, None),
        };
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
        if digits.is_empty() {
            return Err(LocatorError::MissingHandle);
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LocatorError::InvalidHex {
                text: digits.to_owned(),
            });
        }
        let raw = u64::from_str_radix(digits, 16).map_err(|_| LocatorError::HandleOverflow {
            text: digits.to_owned(),
        })?;
        Ok(Self {
            handle: BufferHandle::from_raw(raw),
            extension,
        })
    }

    /// The decoded buffer handle.
    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    /// The suffix after the first `.`, if any.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{:x}", self.handle)?;
        if let Some(ext) = &self.extension {
            write!(f, ".{ext}")?;
        }
        Ok(())
    }
}

impl FromStr for Locator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<BufferHandle> for Locator {
    fn from(handle: BufferHandle) -> Self {
        Self::for_handle(handle)
    }
}
