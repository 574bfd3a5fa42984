//! Top-level manifest schema.
//!
//! The manifest catalogues every package archive a compilation produced.
//! Package order is compilation order, and ids run sequentially from
//! [`PackageId::FIRST`]; deserialisation enforces both so a hand-edited or
//! corrupted manifest fails at parse time rather than mid-install.

use crate::error::{ManifestError, Result};
use crate::package::Package;
use crate::package_id::PackageId;
use crate::schema_version::SchemaVersion;
use serde::{Deserialize, Serialize};

/// The catalogue of a compiled distribution.
///
/// # Examples
///
/// ```
/// use windlass_manifest::{Entry, EntryName, Manifest, Package, PackageId, RelativePath};
///
/// let package = Package::new(
///     PackageId::FIRST,
///     RelativePath::root(),
///     vec![Entry::new(
///         EntryName::try_from("haloce.exe").expect("valid name"),
///         4_096,
///     )],
/// );
/// let manifest = Manifest::new(vec![package]).expect("sequential ids");
/// assert_eq!(manifest.packages().len(), 1);
/// assert_eq!(manifest.entry_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ManifestWire")]
pub struct Manifest {
    schema_version: SchemaVersion,
    packages: Vec<Package>,
}

/// Raw wire shape, validated into [`Manifest`] after field deserialisation.
#[derive(Deserialize)]
struct ManifestWire {
    schema_version: SchemaVersion,
    packages: Vec<Package>,
}

impl Manifest {
    /// Construct a manifest at the current schema version.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::NonSequentialPackageId`] when package ids do
    /// not run `0x01, 0x02, ...` in declaration order, or
    /// [`ManifestError::TooManyPackages`] when the list exceeds the id
    /// space.
    pub fn new(packages: Vec<Package>) -> Result<Self> {
        validate_sequence(&packages)?;
        Ok(Self {
            schema_version: SchemaVersion::current(),
            packages,
        })
    }

    /// Return the manifest's schema version.
    #[must_use]
    pub const fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }

    /// Return the catalogued packages in compilation order.
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Total number of files across all packages.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.packages.iter().map(|p| p.entries().len()).sum()
    }
}

impl TryFrom<ManifestWire> for Manifest {
    type Error = ManifestError;

    fn try_from(wire: ManifestWire) -> Result<Self> {
        validate_sequence(&wire.packages)?;
        Ok(Self {
            schema_version: wire.schema_version,
            packages: wire.packages,
        })
    }
}

/// Check that package ids run sequentially from [`PackageId::FIRST`].
fn validate_sequence(packages: &[Package]) -> Result<()> {
    for (index, package) in packages.iter().enumerate() {
        let Some(expected) = PackageId::from_index(index) else {
            return Err(ManifestError::TooManyPackages {
                count: packages.len(),
            });
        };
        if package.id() != expected {
            return Err(ManifestError::NonSequentialPackageId {
                index,
                found: package.id().as_u16(),
                expected: expected.as_u16(),
            });
        }
    }
    Ok(())
}
