//! Package archive extraction.
//!
//! Extracts DEFLATE-compressed package archives into the installation
//! directory with path traversal protection to prevent zip-slip attacks.

use crate::error::{Result, WindlassError};
use camino::Utf8Path;
use std::fs::File;
use std::io;
use zip::ZipArchive;

/// Trait for extracting package archives, enabling test mocking.
#[cfg_attr(test, mockall::automock)]
pub trait PackageExtractor {
    /// Extract the archive at `archive` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`WindlassError::PathTraversal`] if any entry attempts to
    /// escape the destination directory.
    /// Returns [`WindlassError::Archive`] if the archive cannot be opened
    /// or read.
    /// Returns [`WindlassError::Io`] on filesystem failures.
    fn extract(&self, archive: &Utf8Path, dest: &Utf8Path) -> Result<()>;
}

/// Default extractor backed by the `zip` crate.
///
/// Validates each entry path before extraction to guard against path
/// traversal attacks (zip-slip).
pub struct ZipExtractor;

impl PackageExtractor for ZipExtractor {
    fn extract(&self, archive: &Utf8Path, dest: &Utf8Path) -> Result<()> {
        let label = archive_label(archive);
        let file = File::open(archive).map_err(|e| WindlassError::Archive {
            name: label.clone(),
            source: zip::result::ZipError::Io(e),
        })?;
        let mut reader = ZipArchive::new(file).map_err(|source| WindlassError::Archive {
            name: label.clone(),
            source,
        })?;

        for index in 0..reader.len() {
            let mut entry = reader
                .by_index(index)
                .map_err(|source| WindlassError::Archive {
                    name: label.clone(),
                    source,
                })?;

            let Some(relative) = entry.enclosed_name() else {
                return Err(WindlassError::PathTraversal {
                    name: label,
                    entry: entry.name().to_owned(),
                });
            };

            let dest_path = dest.as_std_path().join(relative);
            if entry.is_dir() {
                std::fs::create_dir_all(&dest_path)?;
                continue;
            }

            if let Some(parent) = dest_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&dest_path)?;
            io::copy(&mut entry, &mut out)?;
        }

        Ok(())
    }
}

/// Short archive name for error reports, falling back to the full path.
fn archive_label(path: &Utf8Path) -> String {
    path.file_name().unwrap_or(path.as_str()).to_owned()
}
