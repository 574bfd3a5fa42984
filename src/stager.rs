//! Target directory staging.
//!
//! This module prepares installation and compilation targets: it creates the
//! directory tree, probes writability, and clears stale files so archives and
//! manifests are always written fresh.

use crate::error::{Result, WindlassError};
use camino::Utf8Path;
use std::fs;
use std::io::ErrorKind;

/// Ensure the target directory exists and is writable.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable.
pub fn prepare_target(target: &Utf8Path) -> Result<()> {
    fs::create_dir_all(target)?;

    // Verify writability by attempting to create a temp file
    let test_path = target.join(".windlass-write-test");
    match fs::write(&test_path, b"test") {
        Ok(()) => {
            let _ = fs::remove_file(&test_path);
            Ok(())
        }
        Err(e) => Err(WindlassError::TargetNotWritable {
            path: target.to_owned(),
            reason: e.to_string(),
        }),
    }
}

/// Remove a file if it exists.
///
/// A missing file is not an error; anything else is propagated.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn remove_existing(path: &Utf8Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(WindlassError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn utf8_temp_dir() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("create temp dir");
        let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .expect("temp dir path is valid UTF-8");
        (temp, path)
    }

    #[test]
    fn prepare_target_creates_missing_directories() {
        let (_temp, root) = utf8_temp_dir();
        let target = root.join("nested").join("dist");

        prepare_target(&target).expect("prepare should succeed");

        assert!(target.as_std_path().is_dir());
    }

    #[test]
    fn prepare_target_leaves_no_probe_file() {
        let (_temp, root) = utf8_temp_dir();

        prepare_target(&root).expect("prepare should succeed");

        assert!(!root.join(".windlass-write-test").as_std_path().exists());
    }

    #[test]
    fn remove_existing_deletes_file() {
        let (_temp, root) = utf8_temp_dir();
        let file = root.join("0x01.bin");
        std::fs::write(&file, b"stale").expect("write file");

        remove_existing(&file).expect("removal should succeed");

        assert!(!file.as_std_path().exists());
    }

    #[test]
    fn remove_existing_tolerates_missing_file() {
        let (_temp, root) = utf8_temp_dir();

        let result = remove_existing(&root.join("absent.bin"));

        assert!(result.is_ok(), "expected success, got: {result:?}");
    }
}
