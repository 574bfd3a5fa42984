//! Windlass CLI entrypoint.
//!
//! This binary compiles a source tree into a packaged distribution, installs
//! a compiled distribution, and verifies installed assets against the
//! manifest. Run with no flags it performs the implicit verification pass.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;
use windlass::cli::{Cli, Mode};
use windlass::compiler::{CompileOptions, compile};
use windlass::config::Settings;
use windlass::dirs::{BaseDirs, SystemBaseDirs};
use windlass::error::{Result, WindlassError};
use windlass::fault::record_fault;
use windlass::installer::install;
use windlass::location::read_install_location;
use windlass::output::{
    RunDetails, compile_success_message, executable_copy_message, install_success_message,
    no_install_recorded_message, verify_outcome_message,
};
use windlass::verifier::verify;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &SystemBaseDirs, &mut stdout, &mut stderr);
    if let Err(err) = &run_result {
        record_fault_in_current_dir(err);
    }
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(
    cli: &Cli,
    dirs: &dyn BaseDirs,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let source = resolve_source_root(cli)?;
    let mode = cli.mode();

    if cli.verbosity > 0 {
        let details = RunDetails {
            mode: mode.label(),
            source: &source,
            verbosity: cli.verbosity,
            quiet: cli.quiet,
        };
        write_stderr_line(stderr, details.display_text());
        write_stderr_line(stderr, "");
    }

    match mode {
        Mode::Compile { target } => run_compile(cli, &source, &target, stderr),
        Mode::Install { target } => run_install(cli, &source, &target, dirs, stderr),
        Mode::Locate => run_locate(dirs, stdout),
        Mode::Verify => run_verify(cli, &source, stdout),
    }
}

/// Resolves the source root from the CLI, defaulting to the current directory.
fn resolve_source_root(cli: &Cli) -> Result<Utf8PathBuf> {
    if let Some(source) = &cli.source {
        return Ok(source.clone());
    }
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::try_from(cwd).map_err(|e| WindlassError::NonUtf8Path {
        reason: format!("current directory is not valid UTF-8: {e}"),
    })
}

/// Compiles the source root into a distribution at `target`.
fn run_compile(
    cli: &Cli,
    source: &Utf8Path,
    target: &Utf8Path,
    stderr: &mut dyn Write,
) -> Result<()> {
    if !cli.quiet {
        write_stderr_line(stderr, format!("Compiling {source} into {target}..."));
    }

    let summary = compile(source, target, &CompileOptions::default())?;

    if !cli.quiet {
        write_stderr_line(stderr, compile_success_message(&summary, target));
        if let Some(message) = executable_copy_message(&summary.executable_copy) {
            write_stderr_line(stderr, message);
        }
    }

    Ok(())
}

/// Installs the distribution at the source root into `target`.
fn run_install(
    cli: &Cli,
    source: &Utf8Path,
    target: &Utf8Path,
    dirs: &dyn BaseDirs,
    stderr: &mut dyn Write,
) -> Result<()> {
    if !cli.quiet {
        write_stderr_line(stderr, format!("Installing {source} into {target}..."));
    }

    let summary = install(source, target, dirs)?;

    if !cli.quiet {
        write_stderr_line(stderr, install_success_message(&summary));
    }

    Ok(())
}

/// Prints the recorded installation location.
fn run_locate(dirs: &dyn BaseDirs, stdout: &mut dyn Write) -> Result<()> {
    match read_install_location(dirs)? {
        Some(location) => write_stdout_line(stdout, location),
        None => write_stdout_line(stdout, no_install_recorded_message()),
    }
}

/// Verifies the installed assets at the source root against the manifest.
fn run_verify(cli: &Cli, source: &Utf8Path, stdout: &mut dyn Write) -> Result<()> {
    let settings = Settings::load_from(source)?;
    let outcome = verify(source, &settings.whitelist())?;

    if !cli.quiet {
        write_stdout_line(stdout, verify_outcome_message(&outcome))?;
    }

    Ok(())
}

/// Records a fault log entry in the current directory, best effort.
fn record_fault_in_current_dir(err: &WindlassError) {
    let Ok(cwd) = std::env::current_dir() else {
        return;
    };
    if let Ok(dir) = Utf8PathBuf::try_from(cwd) {
        record_fault(&dir, err);
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

fn write_stdout_line(stdout: &mut dyn Write, message: impl std::fmt::Display) -> Result<()> {
    writeln!(stdout, "{message}").map_err(|e| WindlassError::WriteFailed { source: e })
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
