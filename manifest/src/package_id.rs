//! Numeric archive identifier and on-disk naming policy.
//!
//! Every file a distribution ships under the manifest scheme is named
//! `0x{id:02x}.bin`. Id `0x00` is reserved for the manifest itself; package
//! archives occupy `0x01` upward, assigned sequentially in compilation
//! order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// On-disk file name of the manifest, the reserved id `0x00`.
pub const MANIFEST_FILE_NAME: &str = "0x00.bin";

/// A numeric archive identifier within a distribution.
///
/// # Examples
///
/// ```
/// use windlass_manifest::PackageId;
///
/// let id = PackageId::new(0x1a);
/// assert_eq!(id.file_name(), "0x1a.bin");
/// assert!(!id.is_manifest());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(u16);

impl PackageId {
    /// The reserved manifest id, `0x00`.
    pub const MANIFEST: Self = Self(0x00);

    /// The id of the first package archive, `0x01`.
    pub const FIRST: Self = Self(0x01);

    /// Wrap a raw id value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Return the id for the package at `index` in compilation order.
    ///
    /// Index 0 maps to [`Self::FIRST`]. Returns `None` once the sequence
    /// would exceed `u16::MAX`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        let raw = index.checked_add(1)?;
        u16::try_from(raw).ok().map(Self)
    }

    /// Return the inner id value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Whether this id is the reserved manifest slot.
    #[must_use]
    pub const fn is_manifest(self) -> bool {
        self.0 == 0
    }

    /// Render the canonical on-disk file name for this id.
    ///
    /// Lowercase hexadecimal, zero-padded to at least two digits, `0x`
    /// prefix, `.bin` extension.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("0x{:02x}.bin", self.0)
    }
}

impl From<PackageId> for u16 {
    fn from(id: PackageId) -> Self {
        id.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn manifest_file_name_matches_reserved_id() {
        assert_eq!(PackageId::MANIFEST.file_name(), MANIFEST_FILE_NAME);
    }

    #[test]
    fn manifest_id_is_flagged_as_manifest() {
        assert!(PackageId::MANIFEST.is_manifest());
        assert!(!PackageId::FIRST.is_manifest());
    }

    #[rstest]
    #[case::first(0x01, "0x01.bin")]
    #[case::two_digit(0x1a, "0x1a.bin")]
    #[case::boundary(0xff, "0xff.bin")]
    #[case::three_digit(0x100, "0x100.bin")]
    fn file_name_renders_lowercase_hex(#[case] raw: u16, #[case] expected: &str) {
        assert_eq!(PackageId::new(raw).file_name(), expected);
    }

    #[rstest]
    #[case::zeroth(0, 0x01)]
    #[case::ninth(9, 0x0a)]
    fn from_index_is_one_based(#[case] index: usize, #[case] expected: u16) {
        let id = PackageId::from_index(index).expect("index in range");
        assert_eq!(id.as_u16(), expected);
    }

    #[test]
    fn from_index_rejects_overflow() {
        assert!(PackageId::from_index(usize::from(u16::MAX)).is_none());
    }

    #[test]
    fn display_shows_hex_id() {
        assert_eq!(format!("{}", PackageId::new(7)), "0x07");
    }

    #[test]
    fn serialises_as_bare_number() {
        let json = serde_json::to_string(&PackageId::new(3)).expect("serialise");
        assert_eq!(json, "3");
    }
}
