//! Distribution compilation.
//!
//! Walks a source tree, bins each directory's files into a numbered
//! DEFLATE-compressed package archive, and writes the manifest that
//! catalogues them. Archives are named `0x{id}.bin` starting at `0x01.bin`;
//! `0x00.bin` is the manifest itself. Binning is deterministic: directories
//! are visited parents-first in lexicographic order, and files within a
//! directory are archived in lexicographic order.

use crate::error::{Result, WindlassError};
use crate::stager::{prepare_target, remove_existing};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};
use std::fs::File;
use std::io;
use std::path::Path;
use windlass_manifest::{
    Entry, EntryName, MANIFEST_FILE_NAME, Manifest, ManifestError, Package, PackageId,
    RelativePath, write_manifest,
};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Options controlling a compilation run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompileOptions {
    /// Whether to copy the running executable into the target directory.
    pub copy_executable: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            copy_executable: true,
        }
    }
}

/// What happened to the running executable during compilation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExecutableCopy {
    /// The executable was copied into the target directory.
    Copied {
        /// File name the executable was copied as.
        name: String,
    },
    /// Copying was disabled by [`CompileOptions`].
    Skipped,
    /// Copying was attempted but failed. Compilation itself still succeeded.
    Failed {
        /// Description of the failure.
        reason: String,
    },
}

/// Summary of a completed compilation run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompileSummary {
    /// Number of package archives written.
    pub package_count: usize,
    /// Total number of files catalogued across all packages.
    pub entry_count: usize,
    /// Outcome of the executable copy step.
    pub executable_copy: ExecutableCopy,
}

/// A source file queued for binning.
struct BinFile {
    path: Utf8PathBuf,
    name: EntryName,
}

/// One directory's worth of files, destined for a single package archive.
struct Bin {
    path: RelativePath,
    files: Vec<BinFile>,
}

/// Compile the tree at `source` into a packaged distribution at `target`.
///
/// Stale catalogue artifacts in the target (`0x00.bin` and package archives
/// from a previous run) are removed first, so the target always reflects
/// exactly the packages of this run.
///
/// # Errors
///
/// Returns an error if the source tree does not exist, the target cannot be
/// prepared, a file name cannot be catalogued, the package id space is
/// exhausted, or any archive or manifest write fails.
pub fn compile(
    source: &Utf8Path,
    target: &Utf8Path,
    options: &CompileOptions,
) -> Result<CompileSummary> {
    if !source.as_std_path().is_dir() {
        return Err(WindlassError::SourceMissing {
            path: source.to_owned(),
        });
    }
    prepare_target(target)?;
    debug!("compile: binning {source} into {target}");

    let canonical_target = std::fs::canonicalize(target.as_std_path())?;
    remove_stale_artifacts(target)?;

    let bins = collect_bins(source, &canonical_target)?;
    let bin_count = bins.len();
    let mut packages = Vec::with_capacity(bin_count);
    let mut entry_count = 0_usize;

    for (index, bin) in bins.into_iter().enumerate() {
        let id = PackageId::from_index(index)
            .ok_or(ManifestError::TooManyPackages { count: bin_count })?;
        let archive_path = target.join(id.file_name());
        remove_existing(&archive_path)?;

        let entries = write_package_archive(&archive_path, &bin.files)?;
        trace!(
            "compile: wrote {archive_path} with {} entries for {:?}",
            entries.len(),
            bin.path.as_str()
        );

        entry_count += entries.len();
        packages.push(Package::new(id, bin.path, entries));
    }

    let package_count = packages.len();
    let manifest = Manifest::new(packages)?;
    write_manifest(&target.join(MANIFEST_FILE_NAME), &manifest)?;

    let executable_copy = if options.copy_executable {
        copy_running_executable(target)
    } else {
        ExecutableCopy::Skipped
    };

    Ok(CompileSummary {
        package_count,
        entry_count,
        executable_copy,
    })
}

/// Return whether `name` follows the catalogue's file naming scheme.
///
/// Catalogue artifacts are `0x` followed by lowercase hex digits and a
/// `.bin` suffix. They are outputs of compilation and are never binned as
/// distribution content.
fn is_catalogue_artifact(name: &str) -> bool {
    let Some(hex) = name
        .strip_prefix("0x")
        .and_then(|rest| rest.strip_suffix(".bin"))
    else {
        return false;
    };
    !hex.is_empty()
        && hex
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

/// Remove catalogue artifacts left in `target` by a previous compilation.
fn remove_stale_artifacts(target: &Utf8Path) -> Result<()> {
    for entry in target.read_dir_utf8()? {
        let entry = entry?;
        if entry.file_type()?.is_file() && is_catalogue_artifact(entry.file_name()) {
            remove_existing(entry.path())?;
        }
    }
    Ok(())
}

/// Walk `source` and group its files into per-directory bins.
///
/// Directories are visited parents-first in lexicographic order. A directory
/// with no direct files contributes no bin. The compilation target, when
/// nested inside the source, is not walked.
fn collect_bins(source: &Utf8Path, skip: &Path) -> Result<Vec<Bin>> {
    let mut bins = Vec::new();
    let mut components = Vec::new();
    walk_directory(source, skip, &mut components, &mut bins)?;
    Ok(bins)
}

fn walk_directory(
    dir: &Utf8Path,
    skip: &Path,
    components: &mut Vec<String>,
    bins: &mut Vec<Bin>,
) -> Result<()> {
    let mut files: Vec<BinFile> = Vec::new();
    let mut subdirs: Vec<(Utf8PathBuf, String)> = Vec::new();

    for entry in dir.read_dir_utf8()? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            subdirs.push((entry.path().to_owned(), entry.file_name().to_owned()));
        } else if file_type.is_file() && !is_catalogue_artifact(entry.file_name()) {
            files.push(BinFile {
                path: entry.path().to_owned(),
                name: EntryName::try_from(entry.file_name())?,
            });
        }
    }

    files.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
    subdirs.sort_by(|a, b| a.1.cmp(&b.1));

    if !files.is_empty() {
        bins.push(Bin {
            path: RelativePath::from_components(components.iter().map(String::as_str))?,
            files,
        });
    }

    for (path, name) in subdirs {
        if points_at(&path, skip)? {
            trace!("compile: not binning target directory {path}");
            continue;
        }
        components.push(name);
        walk_directory(&path, skip, components, bins)?;
        components.pop();
    }

    Ok(())
}

/// Return whether `path` resolves to the same directory as `canonical`.
fn points_at(path: &Utf8Path, canonical: &Path) -> Result<bool> {
    Ok(std::fs::canonicalize(path.as_std_path())?.as_path() == canonical)
}

/// Write one package archive and return the entries it catalogues.
///
/// Entry sizes are the uncompressed byte counts streamed into the archive.
fn write_package_archive(path: &Utf8Path, files: &[BinFile]) -> Result<Vec<Entry>> {
    let label = || path.file_name().unwrap_or(path.as_str()).to_owned();
    let file = File::create(path)?;
    let mut writer = ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let mut entries = Vec::with_capacity(files.len());

    for bin_file in files {
        writer
            .start_file(bin_file.name.as_str(), options)
            .map_err(|source| WindlassError::Archive {
                name: label(),
                source,
            })?;
        let mut source_file = File::open(&bin_file.path)?;
        let copied = io::copy(&mut source_file, &mut writer)?;
        entries.push(Entry::new(bin_file.name.clone(), copied));
    }

    writer.finish().map_err(|source| WindlassError::Archive {
        name: label(),
        source,
    })?;
    Ok(entries)
}

/// Copy the running executable into `target`, best effort.
///
/// The distribution ships its own installer, so compilation places a copy of
/// the current binary alongside the archives. Failure here never fails the
/// compilation.
fn copy_running_executable(target: &Utf8Path) -> ExecutableCopy {
    let exe = match std::env::current_exe() {
        Ok(path) => path,
        Err(e) => {
            return ExecutableCopy::Failed {
                reason: e.to_string(),
            };
        }
    };
    let Some(name) = exe.file_name().and_then(|n| n.to_str()) else {
        return ExecutableCopy::Failed {
            reason: "executable name is not valid UTF-8".to_owned(),
        };
    };

    let dest = target.join(name);
    if let (Ok(from), Ok(to)) = (
        std::fs::canonicalize(&exe),
        std::fs::canonicalize(dest.as_std_path()),
    ) {
        // Copying a file onto itself would truncate it.
        if from == to {
            return ExecutableCopy::Copied {
                name: name.to_owned(),
            };
        }
    }

    match std::fs::copy(&exe, dest.as_std_path()) {
        Ok(_) => ExecutableCopy::Copied {
            name: name.to_owned(),
        },
        Err(e) => ExecutableCopy::Failed {
            reason: e.to_string(),
        },
    }
}
