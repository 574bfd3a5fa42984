//! Platform data directory resolution.
//!
//! The installer records where a distribution was installed so later runs can
//! find it again. This module abstracts the per-user data directory behind a
//! trait so tests can substitute a temporary location.

use camino::Utf8PathBuf;
use directories_next::ProjectDirs;

/// Trait for resolving the per-user application data directory.
#[cfg_attr(test, mockall::automock)]
pub trait BaseDirs {
    /// Return the application data directory, if one can be determined.
    ///
    /// Returns `None` when the platform provides no home directory (for
    /// example, some CI containers) or the path is not valid UTF-8.
    fn data_dir(&self) -> Option<Utf8PathBuf>;
}

/// Default resolver backed by the operating system's conventions.
///
/// Resolves to a per-user, platform-specific data directory (for example,
/// `~/.local/share/windlass` on many Linux distributions, `~/Library/Application
/// Support/studio.df12.windlass` on macOS, and the Roaming AppData directory on
/// Windows).
pub struct SystemBaseDirs;

impl BaseDirs for SystemBaseDirs {
    fn data_dir(&self) -> Option<Utf8PathBuf> {
        ProjectDirs::from("studio", "df12", "windlass")
            .and_then(|dirs| Utf8PathBuf::from_path_buf(dirs.data_dir().to_path_buf()).ok())
    }
}
