//! Case-insensitive HTTP header map and raw header-block parsing.
//!
//! Header names are matched case-insensitively everywhere they are read or
//! written; the casing of the most recent write is what gets sent on the wire.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// An insertion-ordered header map with case-insensitive names.
///
/// Backed by a plain vector: header counts are small and insertion order is
/// meaningful for the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Headers::default()
    }

    /// Builds a header map from `(name, value)` pairs, applying the usual
    /// replace-on-collision rule.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut headers = Headers::new();
        for (name, value) in pairs {
            headers.set(name, value);
        }
        headers
    }

    /// Returns the first value stored under `name`, matched case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether a value is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets `name` to `value`, replacing any existing entry in place.
    ///
    /// The replaced entry keeps its position but takes the incoming casing.
    /// Duplicate entries beyond the first are dropped.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(index) => {
                self.entries
                    .retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
                self.entries.insert(index.min(self.entries.len()), (name, value));
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Sets `name` to `value` only when no entry exists under that name.
    pub fn set_if_unset(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if !self.contains(&name) {
            self.entries.push((name, value.into()));
        }
    }

    /// Appends an entry without collision handling. Used when parsing raw
    /// header blocks, where repeated names (e.g. `Set-Cookie`) are legitimate.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Removes every entry stored under `name`. Returns whether any was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.entries.len() != before
    }

    /// Overlays `other` onto this map, entry by entry, with the usual
    /// replace-on-collision rule.
    pub fn extend(&mut self, other: &Headers) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parses a raw header block (`"Name: value"` lines separated by CRLF or LF)
/// into a [`Headers`] map.
///
/// The first colon delimits name from value; lines without a name are skipped.
/// Repeated names are kept as separate entries.
pub fn parse_headers(raw: &str) -> Headers {
    let mut headers = Headers::new();
    for line in raw.split('\n') {
        let line = line.trim_end_matches('\r');
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        headers.append(name, value.trim());
    }
    headers
}

/// Encodes credentials into an `Authorization: Basic` header value.
///
/// Credentials are encoded as UTF-8; empty usernames and passwords are valid
/// and still encoded.
pub fn basic_auth_value(username: &str, password: &str) -> String {
    let raw = format!("{username}:{password}");
    format!("Basic {}", STANDARD.encode(raw.as_bytes()))
}
