//! Distribution installation.
//!
//! Loads the manifest from a compiled distribution, extracts every package
//! archive into the target directory, refreshes the manifest at the target,
//! and records where the installation landed. Catalogued files already
//! present in the target are deleted before their package is extracted, so
//! an install over a previous one never leaves mixed contents.

use crate::dirs::BaseDirs;
use crate::error::{Result, WindlassError};
use crate::extract::{PackageExtractor, ZipExtractor};
use crate::location::record_install_location;
use crate::stager::{prepare_target, remove_existing};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};
use windlass_manifest::{MANIFEST_FILE_NAME, read_manifest, write_manifest};

/// Summary of a completed installation run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstallSummary {
    /// Number of package archives extracted.
    pub package_count: usize,
    /// Total number of files the manifest catalogues.
    pub entry_count: usize,
    /// Canonical path of the installation target.
    pub target: Utf8PathBuf,
}

/// Install the compiled distribution at `source` into `target`.
///
/// # Errors
///
/// Returns [`WindlassError::ManifestMissing`] if the source holds no
/// manifest, or an error if the target cannot be prepared, any package
/// archive fails to extract, or the installation location cannot be
/// recorded.
pub fn install(
    source: &Utf8Path,
    target: &Utf8Path,
    dirs: &dyn BaseDirs,
) -> Result<InstallSummary> {
    install_with(source, target, dirs, &ZipExtractor)
}

/// Internal implementation with an injectable extractor for testability.
fn install_with(
    source: &Utf8Path,
    target: &Utf8Path,
    dirs: &dyn BaseDirs,
    extractor: &dyn PackageExtractor,
) -> Result<InstallSummary> {
    let manifest_path = source.join(MANIFEST_FILE_NAME);
    if !manifest_path.as_std_path().is_file() {
        return Err(WindlassError::ManifestMissing {
            path: manifest_path,
        });
    }

    let manifest = read_manifest(&manifest_path)?;
    prepare_target(target)?;
    debug!(
        "install: staging {} packages from {source} into {target}",
        manifest.packages().len()
    );

    for package in manifest.packages() {
        let archive = source.join(package.archive_file_name());
        let package_dir = package.path().resolve_under(target);
        std::fs::create_dir_all(package_dir.as_std_path())?;

        for entry in package.entries() {
            remove_existing(&package_dir.join(entry.name().as_str()))?;
        }

        extractor.extract(&archive, &package_dir)?;
        trace!(
            "install: extracted {archive} into {package_dir} ({} entries)",
            package.entries().len()
        );
    }

    // Re-encoding rather than copying keeps the refresh atomic and safe when
    // source and target are the same directory.
    write_manifest(&target.join(MANIFEST_FILE_NAME), &manifest)?;

    let canonical_target = target.canonicalize_utf8()?;
    record_install_location(dirs, &canonical_target)?;

    Ok(InstallSummary {
        package_count: manifest.packages().len(),
        entry_count: manifest.entry_count(),
        target: canonical_target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{CompileOptions, compile};
    use crate::dirs::MockBaseDirs;
    use crate::extract::MockPackageExtractor;
    use crate::location::read_install_location;
    use tempfile::TempDir;

    fn utf8_temp_dir() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .expect("temp dir path is valid UTF-8");
        (temp, path)
    }

    fn mock_dirs(data_dir: Utf8PathBuf) -> MockBaseDirs {
        let mut dirs = MockBaseDirs::new();
        dirs.expect_data_dir().return_const(Some(data_dir));
        dirs
    }

    fn write_file(path: &Utf8Path, contents: &[u8]) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent.as_std_path()).expect("create parent dirs");
        }
        std::fs::write(path.as_std_path(), contents).expect("write file");
    }

    fn compile_fixture(root: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
        let source = root.join("game");
        write_file(&source.join("haloce.exe"), b"exe bytes");
        write_file(&source.join("maps").join("a10.map"), b"canyon");
        let dist = root.join("dist");
        compile(
            &source,
            &dist,
            &CompileOptions {
                copy_executable: false,
            },
        )
        .expect("compile fixture");
        (source, dist)
    }

    #[test]
    fn missing_manifest_is_fatal() {
        let (_temp, root) = utf8_temp_dir();
        let source = root.join("empty");
        std::fs::create_dir_all(source.as_std_path()).expect("create source");
        let dirs = mock_dirs(root.join("data"));

        let result = install(&source, &root.join("install"), &dirs);

        assert!(
            matches!(result, Err(WindlassError::ManifestMissing { .. })),
            "expected ManifestMissing, got: {result:?}"
        );
    }

    #[test]
    fn installs_packages_into_their_directories() {
        let (_temp, root) = utf8_temp_dir();
        let (_source, dist) = compile_fixture(&root);
        let target = root.join("install");
        let dirs = mock_dirs(root.join("data"));

        let summary = install(&dist, &target, &dirs).expect("install should succeed");

        assert_eq!(summary.package_count, 2);
        assert_eq!(summary.entry_count, 2);
        assert_eq!(
            std::fs::read(target.join("haloce.exe").as_std_path()).expect("read exe"),
            b"exe bytes"
        );
        assert_eq!(
            std::fs::read(target.join("maps").join("a10.map").as_std_path()).expect("read map"),
            b"canyon"
        );
    }

    #[test]
    fn refreshes_the_manifest_at_the_target() {
        let (_temp, root) = utf8_temp_dir();
        let (_source, dist) = compile_fixture(&root);
        let target = root.join("install");
        let dirs = mock_dirs(root.join("data"));

        install(&dist, &target, &dirs).expect("install should succeed");

        let original = read_manifest(&dist.join(MANIFEST_FILE_NAME)).expect("read source manifest");
        let refreshed =
            read_manifest(&target.join(MANIFEST_FILE_NAME)).expect("read target manifest");
        assert_eq!(refreshed, original);
    }

    #[test]
    fn replaces_stale_files_in_the_target() {
        let (_temp, root) = utf8_temp_dir();
        let (_source, dist) = compile_fixture(&root);
        let target = root.join("install");
        write_file(
            &target.join("maps").join("a10.map"),
            b"stale contents from an older release",
        );
        let dirs = mock_dirs(root.join("data"));

        install(&dist, &target, &dirs).expect("install should succeed");

        assert_eq!(
            std::fs::read(target.join("maps").join("a10.map").as_std_path()).expect("read map"),
            b"canyon"
        );
    }

    #[test]
    fn records_the_canonical_install_location() {
        let (_temp, root) = utf8_temp_dir();
        let (_source, dist) = compile_fixture(&root);
        let target = root.join("install");
        let dirs = mock_dirs(root.join("data"));

        install(&dist, &target, &dirs).expect("install should succeed");

        let recorded = read_install_location(&dirs).expect("read marker");
        assert_eq!(
            recorded,
            Some(target.canonicalize_utf8().expect("canonicalize target"))
        );
    }

    #[test]
    fn missing_archive_is_reported() {
        let (_temp, root) = utf8_temp_dir();
        let (_source, dist) = compile_fixture(&root);
        std::fs::remove_file(dist.join("0x01.bin").as_std_path()).expect("drop an archive");
        let dirs = mock_dirs(root.join("data"));

        let result = install(&dist, &root.join("install"), &dirs);

        assert!(
            matches!(result, Err(WindlassError::Archive { ref name, .. }) if name == "0x01.bin"),
            "expected Archive error, got: {result:?}"
        );
    }

    #[test]
    fn extraction_failures_propagate() {
        let (_temp, root) = utf8_temp_dir();
        let (_source, dist) = compile_fixture(&root);
        let dirs = mock_dirs(root.join("data"));
        let mut extractor = MockPackageExtractor::new();
        extractor.expect_extract().returning(|archive, _| {
            Err(WindlassError::PathTraversal {
                name: archive.file_name().unwrap_or_default().to_owned(),
                entry: "../escape".to_owned(),
            })
        });

        let result = install_with(&dist, &root.join("install"), &dirs, &extractor);

        assert!(
            matches!(result, Err(WindlassError::PathTraversal { .. })),
            "expected PathTraversal, got: {result:?}"
        );
    }
}
