//! A single catalogued file within a package.

use crate::entry_name::EntryName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One file carried by a package archive.
///
/// The size is the byte length measured when the package was compiled. After
/// installation the file on disk must match it exactly; any difference is an
/// integrity failure, not a tolerance.
///
/// # Examples
///
/// ```
/// use windlass_manifest::{Entry, EntryName};
///
/// let name = EntryName::try_from("bloodgulch.map").expect("valid name");
/// let entry = Entry::new(name, 9_437_184);
/// assert_eq!(entry.size(), 9_437_184);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    name: EntryName,
    size: u64,
}

impl Entry {
    /// Construct an entry from a validated name and its compiled byte size.
    #[must_use]
    pub const fn new(name: EntryName, size: u64) -> Self {
        Self { name, size }
    }

    /// Return the entry's file name.
    #[must_use]
    pub const fn name(&self) -> &EntryName {
        &self.name
    }

    /// Return the byte length recorded at compile time.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.name, self.size)
    }
}
