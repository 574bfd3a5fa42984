//! One archive's record within the manifest.

use crate::entry::Entry;
use crate::package_id::PackageId;
use crate::relative_path::RelativePath;
use serde::{Deserialize, Serialize};

/// A package: one archive on disk and the files it carries.
///
/// The archive stores its entries flat; `path` locates the directory the
/// entries belong to, relative to the distribution root. Joining the install
/// root, `path`, and an entry name yields the absolute location of that file
/// after installation.
///
/// # Examples
///
/// ```
/// use windlass_manifest::{Entry, EntryName, Package, PackageId, RelativePath};
///
/// let entries = vec![Entry::new(
///     EntryName::try_from("bloodgulch.map").expect("valid name"),
///     9_437_184,
/// )];
/// let package = Package::new(
///     PackageId::FIRST,
///     RelativePath::try_from("maps").expect("valid path"),
///     entries,
/// );
/// assert_eq!(package.archive_file_name(), "0x01.bin");
/// assert_eq!(package.entries().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    id: PackageId,
    path: RelativePath,
    entries: Vec<Entry>,
}

impl Package {
    /// Construct a package record.
    #[must_use]
    pub const fn new(id: PackageId, path: RelativePath, entries: Vec<Entry>) -> Self {
        Self { id, path, entries }
    }

    /// Return the package's archive id.
    #[must_use]
    pub const fn id(&self) -> PackageId {
        self.id
    }

    /// Return the directory this package populates, relative to the root.
    #[must_use]
    pub const fn path(&self) -> &RelativePath {
        &self.path
    }

    /// Return the files this package carries.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Render the on-disk file name of this package's archive.
    #[must_use]
    pub fn archive_file_name(&self) -> String {
        self.id.file_name()
    }
}
