//! Installation location marker.
//!
//! After a successful install the target path is persisted to a small marker
//! file in the per-user data directory. Later runs read it back to locate the
//! installation without re-prompting.

use crate::dirs::BaseDirs;
use crate::error::{Result, WindlassError};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::ErrorKind;

/// File name of the marker inside the application data directory.
pub const MARKER_FILE_NAME: &str = "install.txt";

/// Persist `target` as the current installation location.
///
/// Creates the data directory if necessary and replaces any previous marker.
///
/// # Errors
///
/// Returns [`WindlassError::MarkerUnavailable`] if no data directory can be
/// resolved, or an I/O error if the marker cannot be written.
pub fn record_install_location(dirs: &dyn BaseDirs, target: &Utf8Path) -> Result<()> {
    let data_dir = resolve_data_dir(dirs)?;
    fs::create_dir_all(&data_dir)?;
    fs::write(data_dir.join(MARKER_FILE_NAME), format!("{target}\n"))?;
    Ok(())
}

/// Read back the recorded installation location, if any.
///
/// Returns `Ok(None)` when no marker has been written yet or the marker is
/// empty.
///
/// # Errors
///
/// Returns [`WindlassError::MarkerUnavailable`] if no data directory can be
/// resolved, or an I/O error if an existing marker cannot be read.
pub fn read_install_location(dirs: &dyn BaseDirs) -> Result<Option<Utf8PathBuf>> {
    let data_dir = resolve_data_dir(dirs)?;
    let recorded = match fs::read_to_string(data_dir.join(MARKER_FILE_NAME)) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(WindlassError::Io(e)),
    };

    let trimmed = recorded.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(Utf8PathBuf::from(trimmed)))
}

fn resolve_data_dir(dirs: &dyn BaseDirs) -> Result<Utf8PathBuf> {
    dirs.data_dir().ok_or_else(|| WindlassError::MarkerUnavailable {
        reason: "no per-user data directory on this platform".to_owned(),
    })
}
