//! Typed errors for source checkout validation.
//!
//! `LayoutError` converts into `anyhow::Error` through `?`. It is raised
//! before the staging root is reset, so nothing on disk has changed when
//! one of these is reported.

use std::path::PathBuf;

use thiserror::Error;

/// A required input is missing from the agent checkout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Scripts directory '{}' not found. Point --source-dir at an agent checkout.", .0.display())]
    MissingScriptsDir(PathBuf),

    #[error("Module directory '{}' not found. Point --source-dir at an agent checkout.", .0.display())]
    MissingModuleDir(PathBuf),

    #[error("Agent config '{}' not found.", .0.display())]
    MissingConfigFile(PathBuf),

    #[error("Init script '{}' not found.", .0.display())]
    MissingInitScript(PathBuf),
}
