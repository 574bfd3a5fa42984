//! Validated file-name newtype for manifest entries.
//!
//! An entry name is a bare file name within its package's directory: it
//! carries no separators and is never a dot component.

use crate::error::{ManifestError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated file name within a package.
///
/// # Examples
///
/// ```
/// use windlass_manifest::EntryName;
///
/// let name = EntryName::try_from("bloodgulch.map").expect("valid name");
/// assert_eq!(name.as_str(), "bloodgulch.map");
/// assert!(EntryName::try_from("maps/bloodgulch.map").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryName(String);

impl EntryName {
    /// Return the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether the name contains `needle` as an ordinal, case-sensitive
    /// substring.
    ///
    /// Verification whitelists match on this predicate, so `".map"` selects
    /// every map resource regardless of its base name.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }
}

impl TryFrom<&str> for EntryName {
    type Error = ManifestError;

    fn try_from(value: &str) -> Result<Self> {
        validate_entry_name(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for EntryName {
    type Error = ManifestError;

    fn try_from(value: String) -> Result<Self> {
        validate_entry_name(&value)?;
        Ok(Self(value))
    }
}

impl From<EntryName> for String {
    fn from(name: EntryName) -> Self {
        name.0
    }
}

impl AsRef<str> for EntryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is a bare, well-formed file name.
fn validate_entry_name(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(value, "name is empty"));
    }
    if value == "." || value == ".." {
        return Err(invalid(value, "dot components are not permitted"));
    }
    if value.contains(['/', '\\']) {
        return Err(invalid(value, "name contains a path separator"));
    }
    if value.contains(':') {
        return Err(invalid(value, "name contains a drive or stream separator"));
    }
    Ok(())
}

fn invalid(value: &str, reason: &str) -> ManifestError {
    ManifestError::InvalidEntryName {
        value: value.to_owned(),
        reason: reason.to_owned(),
    }
}
