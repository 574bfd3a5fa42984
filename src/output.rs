//! Output formatting for the windlass CLI.
//!
//! This module turns run summaries into the lines the binary prints, keeping
//! wording and pluralisation in one place.

use crate::compiler::{CompileSummary, ExecutableCopy};
use crate::installer::InstallSummary;
use crate::verifier::VerifyOutcome;
use camino::Utf8Path;

/// Format a success message after compilation.
#[must_use]
pub fn compile_success_message(summary: &CompileSummary, target: &Utf8Path) -> String {
    let packages = pluralise(summary.package_count, "package", "packages");
    let files = pluralise(summary.entry_count, "file", "files");
    format!(
        "Compiled {} {packages} cataloguing {} {files} to {target}",
        summary.package_count, summary.entry_count
    )
}

/// Format the executable copy outcome, when there is anything to say.
///
/// Returns `None` when copying was disabled.
#[must_use]
pub fn executable_copy_message(copy: &ExecutableCopy) -> Option<String> {
    match copy {
        ExecutableCopy::Copied { name } => Some(format!("Copied installer binary as {name}")),
        ExecutableCopy::Skipped => None,
        ExecutableCopy::Failed { reason } => Some(format!(
            "Warning: could not copy the installer binary: {reason}"
        )),
    }
}

/// Format a success message after installation.
#[must_use]
pub fn install_success_message(summary: &InstallSummary) -> String {
    let packages = pluralise(summary.package_count, "package", "packages");
    let files = pluralise(summary.entry_count, "file", "files");
    format!(
        "Installed {} {packages} ({} {files}) to {}",
        summary.package_count, summary.entry_count, summary.target
    )
}

/// Format the outcome of a verification run.
#[must_use]
pub fn verify_outcome_message(outcome: &VerifyOutcome) -> String {
    match outcome {
        VerifyOutcome::Verified { checked } => {
            let assets = pluralise(*checked, "asset", "assets");
            format!("Verified {checked} {assets}")
        }
        VerifyOutcome::Skipped => "No manifest found; nothing to verify".to_owned(),
    }
}

/// Message printed by `--locate` when no installation has been recorded.
#[must_use]
pub const fn no_install_recorded_message() -> &'static str {
    "No installation recorded"
}

const fn pluralise<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// Configuration information printed at higher verbosity levels.
#[derive(Debug)]
pub struct RunDetails<'a> {
    /// Human-readable name of the selected mode.
    pub mode: &'a str,
    /// Source root the run operates on.
    pub source: &'a Utf8Path,
    /// Verbosity level (0 = normal, 1+ = verbose).
    pub verbosity: u8,
    /// Whether quiet mode is enabled.
    pub quiet: bool,
}

impl RunDetails<'_> {
    /// Format the run details for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let lines = [
            format!("Mode: {}", self.mode),
            format!("Source root: {}", self.source),
            format!("Verbosity level: {}", self.verbosity),
            format!("Quiet: {}", self.quiet),
        ];
        lines.join("\n")
    }
}
