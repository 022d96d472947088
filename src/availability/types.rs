use serde::Serialize;
use std::fmt;

/// A movie identifier from The Movie Database.
///
/// Always one or more ASCII digits. Once constructed it is never re-derived;
/// every downstream call carries the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TmdbId(String);

impl TmdbId {
    /// Parse from a raw string. Returns `None` unless the input is one or
    /// more ASCII digits.
    pub fn new(raw: &str) -> Option<Self> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TmdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
