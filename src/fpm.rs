//! fpm CLI abstraction — enables test doubles for the packaging step.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::layout::{
    INCLUDE_DIRS, PACKAGE_ARCH, PACKAGE_NAME, PACKAGE_VERSION, PackageKind, RUNTIME_DEPENDENCY,
    SourceLayout,
};

/// fpm executable invoked by default; override with `--fpm-bin` or
/// the `PDPKG_FPM` environment variable.
pub const DEFAULT_FPM_BIN: &str = "fpm";

/// The full parameter set of one fpm invocation. Struct-based to avoid
/// breaking test doubles on future parameter additions.
#[derive(Debug, Clone, Serialize)]
pub struct PackageSpec {
    pub kind: PackageKind,
    pub name: &'static str,
    pub version: &'static str,
    pub architecture: &'static str,
    /// Runtime dependencies, in declaration order.
    pub depends: Vec<String>,
    /// Post-install hook, required for both kinds.
    pub post_install: PathBuf,
    /// Pre-uninstall hook. `None` for RPM builds.
    pub pre_uninstall: Option<PathBuf>,
    /// Staging root fpm changes into before collecting files.
    pub chdir: PathBuf,
    /// Staging-relative directories included in the package.
    pub include: Vec<String>,
}

impl PackageSpec {
    /// Assemble the invocation for `kind` against a staged tree at
    /// `staging_root`.
    #[must_use]
    pub fn assemble(kind: PackageKind, sources: &SourceLayout, staging_root: &Path) -> Self {
        let policy = kind.policy();
        let mut depends = vec![RUNTIME_DEPENDENCY.to_string()];
        depends.extend(policy.extra_depends.iter().map(|dep| (*dep).to_string()));
        Self {
            kind,
            name: PACKAGE_NAME,
            version: PACKAGE_VERSION,
            architecture: PACKAGE_ARCH,
            depends,
            post_install: sources.post_install_hook(kind),
            pre_uninstall: policy
                .pre_uninstall
                .then(|| sources.pre_uninstall_hook(kind)),
            chdir: staging_root.to_path_buf(),
            include: INCLUDE_DIRS.iter().map(|dir| (*dir).to_string()).collect(),
        }
    }

    /// Flatten into the argv handed to fpm.
    #[must_use]
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-s".into(),
            "dir".into(),
            "-t".into(),
            self.kind.as_str().into(),
            "-n".into(),
            self.name.into(),
            "-v".into(),
            self.version.into(),
            "-a".into(),
            self.architecture.into(),
        ];
        for dep in &self.depends {
            args.push("-d".into());
            args.push(dep.as_str().into());
        }
        args.push("--post-install".into());
        args.push(self.post_install.clone().into_os_string());
        if let Some(hook) = &self.pre_uninstall {
            args.push("--pre-uninstall".into());
            args.push(hook.clone().into_os_string());
        }
        args.push("-C".into());
        args.push(self.chdir.clone().into_os_string());
        for dir in &self.include {
            args.push(dir.as_str().into());
        }
        args
    }
}

/// Abstraction over the fpm CLI, enabling test doubles.
///
/// The production implementation delegates to the configured binary via
/// [`tokio::process::Command`].
#[allow(async_fn_in_trait)]
pub trait Fpm {
    /// Run fpm for `spec` and report its exit status.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned.
    async fn build(&self, spec: &PackageSpec) -> Result<ExitStatus>;
}

/// Production implementation — shells out to the fpm binary with
/// inherited stdio, so its progress and errors reach the terminal
/// unmodified.
pub struct FpmCli {
    program: PathBuf,
}

impl FpmCli {
    #[must_use]
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

impl Fpm for FpmCli {
    async fn build(&self, spec: &PackageSpec) -> Result<ExitStatus> {
        tokio::process::Command::new(&self.program)
            .args(spec.to_args())
            .stdin(std::process::Stdio::inherit())
            .stdout(std::process::Stdio::inherit())
            .stderr(std::process::Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("failed to run {}", self.program.display()))
    }
}
