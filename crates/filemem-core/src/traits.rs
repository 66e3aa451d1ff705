//! Capability declaration consumed by a stream registry.

use std::fmt;

use indexmap::IndexSet;

/// Ordered set of scheme names that may be chained behind a protocol.
///
/// Parsed from and displayed as the registry's comma-separated form,
/// e.g. `"crypto,data"`. Insertion order is preserved so the displayed
/// list round-trips.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProtocolWhitelist {
    schemes: IndexSet<String>,
}

impl ProtocolWhitelist {
    /// An empty whitelist (nothing may be chained).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated scheme list. Blank entries are skipped
    /// and surrounding whitespace is trimmed.
    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Add a scheme. Returns `false` if it was already present.
    pub fn insert(&mut self, scheme: impl Into<String>) -> bool {
        self.schemes.insert(scheme.into())
    }

    /// Whether `scheme` is on the list.
    pub fn contains(&self, scheme: &str) -> bool {
        self.schemes.contains(scheme)
    }

    /// Iterate schemes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.schemes.iter().map(String::as_str)
    }

    /// Number of schemes on the list.
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ProtocolWhitelist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            schemes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ProtocolWhitelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, scheme) in self.schemes.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(scheme)?;
        }
        Ok(())
    }
}

/// What a stream implementation declares to the registry that dispatches
/// locators to it.
///
/// The registry owns the chaining security boundary; implementations only
/// declare their defaults.
pub trait StreamProtocol {
    /// Scheme name without the trailing colon.
    fn name(&self) -> &str;

    /// Whether the stream supports seeking. Sequential-only streams
    /// return `false` and are treated as pure byte streams.
    fn is_seekable(&self) -> bool;

    /// Schemes that may be chained behind this protocol by default.
    fn default_whitelist(&self) -> &ProtocolWhitelist;

    /// Whether `scheme` may be chained behind this protocol.
    fn permits_chain(&self, scheme: &str) -> bool {
        self.default_whitelist().contains(scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(ProtocolWhitelist);

    impl StreamProtocol for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }
        fn is_seekable(&self) -> bool {
            true
        }
        fn default_whitelist(&self) -> &ProtocolWhitelist {
            &self.0
        }
    }

    #[test]
    fn parse_trims_and_skips_blanks() {
        let wl = ProtocolWhitelist::parse(" crypto, ,data,");
        assert_eq!(wl.len(), 2);
        assert!(wl.contains("crypto"));
        assert!(wl.contains("data"));
        assert!(!wl.contains(""));
    }

    #[test]
    fn display_preserves_insertion_order() {
        let wl = ProtocolWhitelist::parse("data,crypto,data");
        assert_eq!(wl.to_string(), "data,crypto");
        assert_eq!(wl.iter().collect::<Vec<_>>(), vec!["data", "crypto"]);
    }

    #[test]
    fn insert_reports_duplicates() {
        let mut wl = ProtocolWhitelist::new();
        assert!(wl.is_empty());
        assert!(wl.insert("file"));
        assert!(!wl.insert("file"));
    }

    #[test]
    fn permits_chain_consults_whitelist() {
        let p = Fixed(ProtocolWhitelist::parse("crypto"));
        assert!(p.permits_chain("crypto"));
        assert!(!p.permits_chain("http"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn display_then_parse_is_identity(
                schemes in proptest::collection::vec("[a-z][a-z0-9]{0,7}", 0..8),
            ) {
                let wl: ProtocolWhitelist = schemes.iter().cloned().collect();
                let reparsed = ProtocolWhitelist::parse(&wl.to_string());
                prop_assert_eq!(reparsed, wl);
            }
        }
    }
}
