//! Semantic error types for manifest validation and codec failures.
//!
//! Validation errors carry enough context to name the offending value in
//! user-facing reports without re-reading the manifest.

use camino::Utf8PathBuf;

/// Result alias for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Errors arising from manifest validation, encoding, or decoding.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The manifest declares a schema version this build cannot read.
    #[error("unsupported manifest schema version {value} (maximum supported: {max})")]
    UnsupportedSchemaVersion {
        /// The version found in the manifest.
        value: u32,
        /// The highest version this build understands.
        max: u32,
    },

    /// An entry name failed validation.
    #[error("invalid entry name {value:?}: {reason}")]
    InvalidEntryName {
        /// The rejected name.
        value: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// A package path failed validation.
    #[error("invalid package path {value:?}: {reason}")]
    InvalidRelativePath {
        /// The rejected path.
        value: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// Package ids must run sequentially from `0x01` in declaration order.
    #[error("package at position {index} has id {found:#04x}, expected {expected:#04x}")]
    NonSequentialPackageId {
        /// Zero-based position of the offending package.
        index: usize,
        /// The id the package declared.
        found: u16,
        /// The id the sequence requires at that position.
        expected: u16,
    },

    /// The distribution produced more packages than the id space can name.
    #[error("distribution produced {count} packages, exceeding the package id space")]
    TooManyPackages {
        /// Number of packages the distribution produced.
        count: usize,
    },

    /// JSON serialisation or deserialisation failed.
    #[error("manifest JSON error: {source}")]
    Json {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },

    /// The DEFLATE stream could not be compressed or decompressed.
    #[error("manifest DEFLATE stream error: {source}")]
    Deflate {
        /// The underlying stream error.
        source: std::io::Error,
    },

    /// No manifest exists at the given path.
    #[error("no manifest at {path}")]
    NotFound {
        /// The path that was probed.
        path: Utf8PathBuf,
    },

    /// Reading or writing the manifest file failed.
    #[error("manifest I/O error at {path}: {source}")]
    Io {
        /// The file being read or written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
