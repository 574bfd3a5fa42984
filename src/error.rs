//! Error types for the windlass CLI.
//!
//! This module defines semantic error variants spanning the compile, install,
//! and verification flows. Each variant carries enough context to name the
//! offending file or directory in user-facing reports.

use camino::Utf8PathBuf;
use thiserror::Error;
use windlass_manifest::{EntryName, ManifestError};

/// Errors that can occur while compiling, installing, or verifying a
/// distribution.
#[derive(Debug, Error)]
pub enum WindlassError {
    /// The compilation source tree does not exist.
    #[error("source directory {path} does not exist")]
    SourceMissing {
        /// Path that was expected to hold the source tree.
        path: Utf8PathBuf,
    },

    /// A filesystem path was not valid UTF-8.
    #[error("path is not valid UTF-8: {reason}")]
    NonUtf8Path {
        /// Description of the offending path.
        reason: String,
    },

    /// The target directory exists but is not writable.
    #[error("target directory {path} is not writable: {reason}")]
    TargetNotWritable {
        /// Path to the non-writable directory.
        path: Utf8PathBuf,
        /// Description of the underlying I/O error.
        reason: String,
    },

    /// No manifest exists where installation requires one.
    #[error("no manifest at {path}; compile the distribution before installing")]
    ManifestMissing {
        /// Path where the manifest was expected.
        path: Utf8PathBuf,
    },

    /// Manifest encoding, decoding, or validation failed.
    #[error(transparent)]
    Manifest {
        /// The underlying manifest error.
        #[from]
        source: ManifestError,
    },

    /// A package archive could not be created or read.
    #[error("package archive {name} error: {source}")]
    Archive {
        /// File name of the archive.
        name: String,
        /// The underlying archive error.
        #[source]
        source: zip::result::ZipError,
    },

    /// An archive entry would escape the extraction directory.
    #[error("package archive {name} entry {entry:?} escapes the target directory")]
    PathTraversal {
        /// File name of the archive.
        name: String,
        /// The raw entry name the archive declared.
        entry: String,
    },

    /// A catalogued asset's on-disk size differs from the manifest.
    #[error(
        "asset {name} failed verification: manifest records {expected} bytes, found {actual} bytes"
    )]
    AssetMismatch {
        /// Name of the failing asset.
        name: EntryName,
        /// Byte length the manifest records.
        expected: u64,
        /// Byte length found on disk.
        actual: u64,
    },

    /// A catalogued asset is missing from the installation.
    #[error("asset {name} is catalogued but missing at {path}")]
    AssetMissing {
        /// Name of the missing asset.
        name: EntryName,
        /// Path where the asset was expected.
        path: Utf8PathBuf,
    },

    /// The settings file exists but could not be parsed.
    #[error("invalid settings file at {path}: {reason}")]
    InvalidSettings {
        /// Path to the settings file.
        path: Utf8PathBuf,
        /// Description of the parse error.
        reason: String,
    },

    /// The installation marker store could not be resolved.
    #[error("installation marker unavailable: {reason}")]
    MarkerUnavailable {
        /// Description of why the marker store is unavailable.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`WindlassError`].
pub type Result<T> = std::result::Result<T, WindlassError>;
