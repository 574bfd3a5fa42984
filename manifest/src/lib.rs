//! Manifest schema and wire codec for windlass package distributions.
//!
//! A manifest is the catalogue of a compiled distribution: one record per
//! package archive, each listing the files that archive carries and the byte
//! length every file must occupy on disk after installation. On the wire the
//! manifest is JSON compressed with raw DEFLATE, and on disk it occupies the
//! reserved slot `0x00.bin` alongside the numbered package archives it
//! describes.
//!
//! # Modules
//!
//! - [`codec`] - DEFLATE-compressed JSON encoding, decoding, and file I/O
//! - [`entry`] - A single catalogued file record
//! - [`entry_name`] - Validated file-name newtype
//! - [`error`] - Semantic error types for validation and codec failures
//! - [`manifest`] - Top-level manifest schema
//! - [`package`] - One archive's catalogue record
//! - [`package_id`] - Numeric archive identifier and file naming
//! - [`relative_path`] - Validated install-relative directory path
//! - [`schema_version`] - Manifest schema version newtype

pub mod codec;
pub mod entry;
pub mod entry_name;
pub mod error;
pub mod manifest;
pub mod package;
pub mod package_id;
pub mod relative_path;
pub mod schema_version;

pub use codec::{decode_manifest, encode_manifest, read_manifest, write_manifest};
pub use entry::Entry;
pub use entry_name::EntryName;
pub use error::{ManifestError, Result};
pub use manifest::Manifest;
pub use package::Package;
pub use package_id::{MANIFEST_FILE_NAME, PackageId};
pub use relative_path::RelativePath;
pub use schema_version::SchemaVersion;
