//! CLI argument definitions for windlass.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::Parser;

/// Compile, install, and verify packaged game distributions.
#[derive(Parser, Debug, Clone)]
#[command(name = "windlass")]
#[command(version, about)]
#[command(long_about = concat!(
    "Compile, install, and verify packaged game distributions.\n\n",
    "Windlass bins a source tree into numbered DEFLATE-compressed package ",
    "archives and writes a manifest cataloguing every file. The same binary ",
    "installs a compiled distribution and, when run with no flags, verifies ",
    "the installed assets against the manifest.\n\n",
    "Archives are named 0x01.bin upwards; 0x00.bin is reserved for the ",
    "manifest itself.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Compile the current directory into a distribution:\n",
    "    $ windlass --compile /srv/dist\n\n",
    "  Install a compiled distribution:\n",
    "    $ windlass --source /srv/dist --install \"/opt/games/halo\"\n\n",
    "  Verify the installed assets (run from the installation root):\n",
    "    $ windlass\n\n",
    "  Print where the last install landed:\n",
    "    $ windlass --locate\n\n",
    "For more information, see: https://github.com/leynos/windlass",
))]
pub struct Cli {
    /// Compile the source root into a packaged distribution at DIR.
    #[arg(long, value_name = "DIR", conflicts_with_all = ["install", "locate"])]
    pub compile: Option<Utf8PathBuf>,

    /// Install the compiled distribution at the source root into DIR.
    #[arg(long, value_name = "DIR", conflicts_with = "locate")]
    pub install: Option<Utf8PathBuf>,

    /// Print the recorded installation location and exit.
    #[arg(long)]
    pub locate: bool,

    /// Source root to compile, install from, or verify [default: current directory].
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<Utf8PathBuf>,

    /// Increase diagnostic verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// The operation a windlass invocation performs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Mode {
    /// Compile the source root into a distribution at the given target.
    Compile {
        /// Directory the distribution is written to.
        target: Utf8PathBuf,
    },
    /// Install the distribution at the source root into the given target.
    Install {
        /// Directory the distribution is installed into.
        target: Utf8PathBuf,
    },
    /// Print the recorded installation location.
    Locate,
    /// Verify installed assets against the manifest.
    Verify,
}

impl Mode {
    /// Human-readable name of the mode.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Compile { .. } => "compile",
            Self::Install { .. } => "install",
            Self::Locate => "locate",
            Self::Verify => "verify",
        }
    }
}

impl Cli {
    /// Returns the operation these arguments select.
    ///
    /// The flags are mutually exclusive (enforced by clap); with none given,
    /// the implicit verification mode is selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use windlass::cli::{Cli, Mode};
    ///
    /// let cli = Cli::default();
    /// assert_eq!(cli.mode(), Mode::Verify);
    /// ```
    #[must_use]
    pub fn mode(&self) -> Mode {
        if let Some(target) = &self.compile {
            Mode::Compile {
                target: target.clone(),
            }
        } else if let Some(target) = &self.install {
            Mode::Install {
                target: target.clone(),
            }
        } else if self.locate {
            Mode::Locate
        } else {
            Mode::Verify
        }
    }
}

impl Default for Cli {
    /// Creates a `Cli` instance with no flags set, selecting verification.
    ///
    /// This is useful for testing or programmatic construction where only
    /// specific fields need to be set.
    ///
    /// # Examples
    ///
    /// ```
    /// use windlass::cli::Cli;
    ///
    /// let cli = Cli::default();
    /// assert!(cli.source.is_none());
    /// assert!(!cli.quiet);
    /// ```
    fn default() -> Self {
        Self {
            compile: None,
            install: None,
            locate: false,
            source: None,
            verbosity: 0,
            quiet: false,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
