//! Windlass distribution tooling library.
//!
//! This crate provides the core functionality for compiling a source tree
//! into a packaged distribution, installing it, and verifying installed
//! assets against the manifest. It is used by the `windlass` CLI binary and
//! can be consumed programmatically for testing or custom packaging
//! workflows.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`compiler`] - Source tree binning and archive creation
//! - [`config`] - Optional `windlass.toml` settings file handling
//! - [`dirs`] - Directory resolution abstraction for platform-specific paths
//! - [`error`] - Semantic error types for the compile, install, and verify flows
//! - [`extract`] - Package archive extraction with traversal protection
//! - [`fault`] - Append-only fault log for failed runs
//! - [`installer`] - Distribution installation and manifest refresh
//! - [`location`] - Installation location marker persistence
//! - [`output`] - Message formatting for run summaries
//! - [`stager`] - Target directory preparation and stale file removal
//! - [`verifier`] - Whitelist-driven asset size verification

pub mod cli;
pub mod compiler;
pub mod config;
pub mod dirs;
pub mod error;
pub mod extract;
pub mod fault;
pub mod installer;
pub mod location;
pub mod output;
pub mod stager;
pub mod verifier;
