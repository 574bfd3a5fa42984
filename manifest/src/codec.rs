//! DEFLATE-compressed JSON encoding, decoding, and file I/O.
//!
//! On the wire a manifest is its JSON serialisation compressed with raw
//! DEFLATE (no gzip or zlib framing). File writes go through a temporary
//! file in the destination directory and a rename, so a crashed writer
//! never leaves a half-written manifest behind.

use crate::error::{ManifestError, Result};
use crate::manifest::Manifest;
use camino::Utf8Path;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use std::io::{ErrorKind, Read, Write};
use tempfile::NamedTempFile;

/// Encode a manifest to its compressed wire form.
///
/// # Errors
///
/// Returns [`ManifestError::Json`] when serialisation fails or
/// [`ManifestError::Deflate`] when compression fails.
pub fn encode_manifest(manifest: &Manifest) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(manifest)?;
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&json)
        .map_err(|source| ManifestError::Deflate { source })?;
    encoder
        .finish()
        .map_err(|source| ManifestError::Deflate { source })
}

/// Decode a manifest from its compressed wire form.
///
/// All newtype and sequence validation runs during deserialisation, so a
/// tampered manifest fails here rather than downstream.
///
/// # Errors
///
/// Returns [`ManifestError::Deflate`] when the stream is corrupt or
/// truncated, or [`ManifestError::Json`] when the decompressed payload is
/// not a valid manifest.
pub fn decode_manifest(bytes: &[u8]) -> Result<Manifest> {
    let mut decoder = DeflateDecoder::new(bytes);
    let mut json = Vec::new();
    decoder
        .read_to_end(&mut json)
        .map_err(|source| ManifestError::Deflate { source })?;
    Ok(serde_json::from_slice(&json)?)
}

/// Read and decode the manifest at `path`.
///
/// # Errors
///
/// Returns [`ManifestError::NotFound`] when no file exists at `path`,
/// [`ManifestError::Io`] for other read failures, and the
/// [`decode_manifest`] errors for corrupt content.
pub fn read_manifest(path: &Utf8Path) -> Result<Manifest> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ManifestError::NotFound {
                path: path.to_owned(),
            }
        } else {
            ManifestError::Io {
                path: path.to_owned(),
                source,
            }
        }
    })?;
    decode_manifest(&bytes)
}

/// Encode and write the manifest to `path`, replacing any existing file.
///
/// The write is staged in a temporary file beside the destination and
/// renamed into place.
///
/// # Errors
///
/// Returns the [`encode_manifest`] errors for serialisation failures and
/// [`ManifestError::Io`] when staging or renaming fails.
pub fn write_manifest(path: &Utf8Path, manifest: &Manifest) -> Result<()> {
    let bytes = encode_manifest(manifest)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };

    let io_error = |source| ManifestError::Io {
        path: path.to_owned(),
        source,
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(io_error)?;
    staged.write_all(&bytes).map_err(io_error)?;
    staged
        .persist(path)
        .map_err(|e| io_error(e.error))
        .map(|_| ())
}
