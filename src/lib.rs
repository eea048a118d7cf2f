//! Stagehand - launcher and installer shim for prebuilt delegate binaries
//!
//! Stagehand packages two compiled CLI tools, `commit_message` and
//! `pull_requests`, for distribution. The tools themselves are opaque
//! delegate binaries published as release assets; Stagehand provides the
//! thin launcher shims that execute them and the installer that acquires
//! them on first setup.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer for the `stagehand` manager
//! - [`launcher`] - Spawns delegate binaries and mirrors their termination
//! - [`installer`] - Release download, bundled copy, and source build installs
//! - [`release`] - GitHub release metadata and asset download client
//! - [`core`] - Target naming, path routing, and configuration
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! Stagehand maintains the following invariants:
//!
//! 1. Launchers never reinterpret delegate arguments, output, or exit status
//! 2. Installed binaries appear atomically; a failed install never leaves a
//!    truncated executable at the final path
//! 3. Install failures are loud and name the next step to take

pub mod cli;
pub mod core;
pub mod installer;
pub mod launcher;
pub mod release;
pub mod ui;
