//! The pdpkg command line: one positional package kind plus staging flags.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::commands;
use crate::fpm::{DEFAULT_FPM_BIN, FpmCli};
use crate::layout::{DEFAULT_STAGING_DIR, PackageKind, SourceLayout};
use crate::output::OutputContext;

/// Builds deb and rpm packages for the PagerDuty agent
#[derive(Parser, Debug)]
#[command(name = "pdpkg", version, arg_required_else_help = true)]
pub struct Cli {
    /// Package kind to build
    #[arg(value_enum)]
    pub kind: PackageKind,

    /// Agent checkout to package
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// Staging root, destroyed and rebuilt on every run
    #[arg(long, value_name = "DIR", default_value = DEFAULT_STAGING_DIR)]
    pub staging_dir: PathBuf,

    /// fpm executable to invoke
    #[arg(long, value_name = "PATH", env = "PDPKG_FPM", default_value = DEFAULT_FPM_BIN)]
    pub fpm_bin: PathBuf,

    /// Show the staging plan and fpm invocation without doing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output (the NO_COLOR environment variable is
    /// honored regardless of its value)
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Execute the CLI command, returning the process exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if staging fails or fpm cannot be spawned. A
    /// non-zero fpm exit status is the returned code, not an error.
    pub async fn run(self) -> Result<i32> {
        // JSON output must stay parseable, so it implies quiet.
        let ctx = OutputContext::new(self.no_color, self.quiet || self.json);
        let sources = SourceLayout::from_source_dir(&self.source_dir);

        if self.dry_run {
            commands::plan::run(self.kind, &sources, &self.staging_dir, self.json, &ctx)?;
            return Ok(0);
        }

        let fpm = FpmCli::new(self.fpm_bin);
        commands::package::run(
            self.kind,
            &sources,
            &self.staging_dir,
            &fpm,
            self.json,
            &ctx,
        )
        .await
    }
}
