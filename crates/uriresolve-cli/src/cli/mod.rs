//! CLI for resolving content URIs to local file paths.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use uriresolve_core::config;

use commands::{run_classify, run_completions, run_resolve, run_share, ResolveArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "uriresolve")]
#[command(about = "Resolve content URIs to local file paths", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve a content:// or file:// URI to a local path, copying if needed.
    Resolve {
        /// URI to resolve.
        uri: String,
        /// Directory mirroring content providers (`<root>/<authority>/<path>`).
        #[arg(long, value_name = "DIR")]
        content_root: Option<PathBuf>,
        /// Directory copies are written to (overrides config).
        #[arg(long, value_name = "DIR")]
        files_dir: Option<PathBuf>,
        /// Use the provider's backing file when it exposes one instead of copying.
        #[arg(long)]
        data_column: bool,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
        /// Also print the SHA-256 of the resolved file.
        #[arg(long)]
        sha256: bool,
    },

    /// Print the share URI for a file in the app's pictures directory.
    Share {
        /// Path to the file.
        path: PathBuf,
    },

    /// Print which provider kind a URI belongs to.
    Classify {
        /// URI to classify.
        uri: String,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve {
                uri,
                content_root,
                files_dir,
                data_column,
                json,
                sha256,
            } => run_resolve(
                &cfg,
                &ResolveArgs {
                    uri,
                    content_root,
                    files_dir,
                    data_column,
                    json,
                    sha256,
                },
            )?,
            CliCommand::Share { path } => run_share(&cfg, &path)?,
            CliCommand::Classify { uri } => run_classify(&cfg, &uri)?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
