//! Fault recording.
//!
//! Failed runs leave a trace in a plain-text log next to the distribution, so
//! a user reporting a broken install can attach what actually went wrong. The
//! log is append-only and records the full error cause chain.

use crate::error::WindlassError;
use camino::Utf8Path;
use std::fmt::Write as _;
use std::io::Write as _;

/// File name of the fault log.
pub const FAULT_FILE_NAME: &str = "windlass.log";

/// Append `err` to the fault log in `dir`.
///
/// Recording is best-effort: a run that cannot write its fault log still
/// reports the error on stderr.
pub fn record_fault(dir: &Utf8Path, err: &WindlassError) {
    if record_fault_to(&dir.join(FAULT_FILE_NAME), err).is_err() {
        // Best-effort logging; ignore write failures.
    }
}

fn record_fault_to(path: &Utf8Path, err: &WindlassError) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(render_fault(err).as_bytes())
}

/// Render an error and its cause chain as one log block.
fn render_fault(err: &WindlassError) -> String {
    let mut text = format!("fault: {err}\n");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let _ = writeln!(text, "  caused by: {cause}");
        source = cause.source();
    }
    text.push('\n');
    text
}
