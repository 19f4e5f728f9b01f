//! Strongly-typed table name wrapper.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Longest identifier Postgres keeps without truncation (NAMEDATALEN - 1).
pub const MAX_IDENT_LEN: usize = 63;

/// Unqualified name of a table declared in a schema manifest.
///
/// The schema namespace is never part of the name; it comes from
/// `DATABASE_SCHEMA` at reset time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    /// Create a new `TableName`, panicking in debug builds if the name is invalid.
    ///
    /// Prefer [`parse`](Self::parse) when handling untrusted input.
    pub fn new(name: impl Into<String>) -> Self {
        let s = name.into();
        debug_assert!(Self::check(&s).is_ok(), "invalid TableName: {s:?}");
        Self(s)
    }

    /// Validate and wrap a table name, returning the reason on failure.
    pub fn parse(name: impl Into<String>) -> Result<Self, &'static str> {
        let s = name.into();
        Self::check(&s)?;
        Ok(Self(s))
    }

    fn check(s: &str) -> Result<(), &'static str> {
        if s.trim().is_empty() {
            return Err("table name must not be empty");
        }
        if s.contains('\0') {
            return Err("table name must not contain NUL");
        }
        if s.len() > MAX_IDENT_LEN {
            return Err("table name exceeds 63 bytes");
        }
        Ok(())
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> serde::Deserialize<'de> for TableName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TableName::parse(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for TableName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TableName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TableName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TableName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
