//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Treat that directory as the package root
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stagehand - installer and launcher for prebuilt delegate binaries
#[derive(Parser, Debug)]
#[command(name = "stagehand")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Treat this directory as the package root
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install delegate binaries from the latest release
    #[command(
        name = "install",
        long_about = "Install delegate binaries from the latest published release.\n\n\
            Fetches release metadata for the configured repository, downloads the \
            binary matching this machine's platform and architecture for each \
            delegate, and places it in the install directory. If any part of the \
            download fails, stagehand falls back to building the binaries from \
            source, provided the package root has a Cargo.toml.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Install all delegates from the latest release
    stagehand install

    # Install a single delegate
    stagehand install commit_message

    # Install from binaries bundled with the package
    stagehand install --bundled

    # Install from a different repository
    stagehand install --repo myorg/mytools

CONFIGURATION:
    The release repository comes from, in order: --repo, the
    STAGEHAND_RELEASE_REPO environment variable, [release] in
    config.toml, then the built-in default.

FALLBACK BEHAVIOR:
    When the download fails (offline, missing asset, no published
    release), stagehand runs 'cargo build --release' in the package
    root instead. This requires a Rust toolchain."
    )]
    Install {
        /// Delegates to install (defaults to all)
        #[arg(value_name = "NAME")]
        names: Vec<String>,

        /// Copy binaries bundled with the package instead of downloading
        #[arg(long)]
        bundled: bool,

        /// Release repository to download from
        #[arg(long, value_name = "OWNER/NAME")]
        repo: Option<String>,
    },

    /// Build delegate binaries from source and install them
    #[command(
        name = "build",
        long_about = "Build delegate binaries from source and install them.\n\n\
            Runs 'cargo build --release' in the package root and copies each \
            delegate's artifact into the install directory. Use this when \
            working from a source checkout or when no prebuilt release matches \
            your platform.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Build and install all delegates
    stagehand build

    # Build a single delegate
    stagehand build pull_requests

    # Build from a checkout elsewhere
    stagehand --cwd ~/src/pull_requests build"
    )]
    Build {
        /// Delegates to build (defaults to all)
        #[arg(value_name = "NAME")]
        names: Vec<String>,
    },

    /// Show the install directory and which delegates are present
    #[command(
        name = "status",
        long_about = "Show the install directory and which delegate binaries are present.\n\n\
            Lists every known delegate with its installed state. Useful for \
            checking what 'install' actually did, or which binary a launcher \
            will run.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Check what is installed
    stagehand status

    # Check an alternate install root
    STAGEHAND_HOME=/opt/stagehand stagehand status"
    )]
    Status,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for stagehand \
            commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    stagehand completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    stagehand completion zsh >> ~/.zshrc

    # Fish
    stagehand completion fish > ~/.config/fish/completions/stagehand.fish

    # PowerShell
    stagehand completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
