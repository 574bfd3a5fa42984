//! Installed asset verification.
//!
//! Compares the on-disk installation against the manifest's catalogue. Only
//! entries whose names match a whitelist substring are checked, and the check
//! is byte-length only: a size match is taken as intact, a mismatch or a
//! missing file fails the run immediately.

use crate::error::{Result, WindlassError};
use camino::Utf8Path;
use log::trace;
use std::io::ErrorKind;
use windlass_manifest::{EntryName, MANIFEST_FILE_NAME, read_manifest};

/// Substrings checked by default when no settings file overrides them.
pub const DEFAULT_WHITELIST: [&str; 2] = [".map", ".exe"];

/// Selects which catalogued entries are subject to verification.
///
/// An entry is selected when its name contains any of the whitelist
/// substrings. Matching is ordinal and case-sensitive, so `.map` does not
/// select `A10.MAP`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Whitelist {
    needles: Vec<String>,
}

impl Whitelist {
    /// Create a whitelist from the given substrings.
    #[must_use]
    pub const fn new(needles: Vec<String>) -> Self {
        Self { needles }
    }

    /// Return whether `name` is selected for verification.
    #[must_use]
    pub fn matches(&self, name: &EntryName) -> bool {
        self.needles.iter().any(|needle| name.contains(needle))
    }

    /// Return the configured substrings.
    #[must_use]
    pub fn needles(&self) -> &[String] {
        &self.needles
    }
}

impl Default for Whitelist {
    fn default() -> Self {
        Self::new(DEFAULT_WHITELIST.iter().map(|s| (*s).to_owned()).collect())
    }
}

/// Outcome of a verification run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerifyOutcome {
    /// Every whitelisted asset matched its catalogued size.
    Verified {
        /// Number of assets that were checked.
        checked: usize,
    },
    /// No manifest exists at the root, so nothing was verified.
    Skipped,
}

/// Verify the installation rooted at `root` against its manifest.
///
/// Missing manifests are not an error: a root that was never compiled simply
/// has nothing to verify, and the run reports [`VerifyOutcome::Skipped`]. The
/// first failing asset aborts the run.
///
/// # Errors
///
/// Returns [`WindlassError::AssetMismatch`] when a checked asset's size
/// differs from the catalogue, [`WindlassError::AssetMissing`] when a checked
/// asset does not exist, or an error if the manifest cannot be decoded.
pub fn verify(root: &Utf8Path, whitelist: &Whitelist) -> Result<VerifyOutcome> {
    let manifest_path = root.join(MANIFEST_FILE_NAME);
    if !manifest_path.as_std_path().exists() {
        trace!("verify: no manifest at {manifest_path}, skipping");
        return Ok(VerifyOutcome::Skipped);
    }

    let manifest = read_manifest(&manifest_path)?;
    let mut checked = 0_usize;

    for package in manifest.packages() {
        let package_dir = package.path().resolve_under(root);
        for entry in package.entries() {
            if !whitelist.matches(entry.name()) {
                continue;
            }

            let asset_path = package_dir.join(entry.name().as_str());
            let metadata = match std::fs::metadata(&asset_path) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(WindlassError::AssetMissing {
                        name: entry.name().clone(),
                        path: asset_path,
                    });
                }
                Err(e) => return Err(WindlassError::Io(e)),
            };

            if metadata.len() != entry.size() {
                return Err(WindlassError::AssetMismatch {
                    name: entry.name().clone(),
                    expected: entry.size(),
                    actual: metadata.len(),
                });
            }

            trace!("verify: {asset_path} intact ({} bytes)", entry.size());
            checked += 1;
        }
    }

    Ok(VerifyOutcome::Verified { checked })
}
