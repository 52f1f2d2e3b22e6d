//! Package constants, kind policy, and the source checkout layout.
//!
//! Everything kind-dependent lives in [`KindPolicy`], behind a single
//! enumerated lookup. Everything read from the checkout lives in
//! [`SourceLayout`] as an explicit path, so staging can run against a
//! temporary checkout instead of the ambient working directory.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

use crate::error::LayoutError;

// ── Package constants ────────────────────────────────────────────────────────

/// Package name handed to fpm.
pub const PACKAGE_NAME: &str = "pdagent";
/// Package version handed to fpm.
pub const PACKAGE_VERSION: &str = "0.1";
/// Package architecture. The payload is pure python, so `all`.
pub const PACKAGE_ARCH: &str = "all";
/// Service identity: log dir, state dir, config dir, and the name the
/// init script is staged under in `etc/init.d`.
pub const SERVICE_NAME: &str = "pd-agent";
/// Runtime dependency declared for both package kinds.
pub const RUNTIME_DEPENDENCY: &str = "python";
/// Module files are discovered by this extension.
pub const MODULE_EXTENSION: &str = "py";
/// Top-level staging directories fpm is told to include.
pub const INCLUDE_DIRS: [&str; 3] = ["etc", "usr", "var"];
/// Default staging root, destroyed and rebuilt on every run.
pub const DEFAULT_STAGING_DIR: &str = "data";
/// Staging-relative path of the generated python-support manifest.
pub const PYSUPPORT_MANIFEST_PATH: &str = "usr/share/python-support/pdagent.public";
/// First line of the python-support manifest.
pub const PYSUPPORT_HEADER: &str = "pyversions=2.6-";

// ── Package kind ─────────────────────────────────────────────────────────────

/// Package kind selector. The single branch point of the whole tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// Debian package (.deb)
    Deb,
    /// RPM package (.rpm)
    Rpm,
}

impl PackageKind {
    /// The token fpm expects as its output type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PackageKind::Deb => "deb",
            PackageKind::Rpm => "rpm",
        }
    }

    /// Everything that varies between the two kinds, in one lookup.
    #[must_use]
    pub fn policy(self) -> KindPolicy {
        match self {
            PackageKind::Deb => KindPolicy {
                python_root: "usr/share/pyshared",
                extra_depends: &["python-support"],
                pre_uninstall: true,
                pysupport_manifest: true,
            },
            PackageKind::Rpm => KindPolicy {
                python_root: "usr/lib/python2.6/site-packages",
                extra_depends: &[],
                pre_uninstall: false,
                pysupport_manifest: false,
            },
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-dependent packaging policy.
#[derive(Debug, Clone, Copy)]
pub struct KindPolicy {
    /// Staging-relative root the python module tree is mirrored under.
    pub python_root: &'static str,
    /// Dependencies declared on top of [`RUNTIME_DEPENDENCY`].
    pub extra_depends: &'static [&'static str],
    /// Whether a pre-uninstall hook is passed to fpm.
    pub pre_uninstall: bool,
    /// Whether the python-support manifest is generated into the tree.
    pub pysupport_manifest: bool,
}

// ── Source layout ────────────────────────────────────────────────────────────

/// Filesystem inputs read from the agent checkout.
#[derive(Debug, Clone)]
pub struct SourceLayout {
    /// Directory whose top-level files become the staged executables.
    pub scripts_dir: PathBuf,
    /// Static agent configuration file.
    pub config_file: PathBuf,
    /// Init script, staged under [`SERVICE_NAME`] in `etc/init.d`.
    pub init_script: PathBuf,
    /// Python package directory mirrored into the kind-specific root.
    pub module_dir: PathBuf,
    /// Directory holding the per-kind hook subdirectories (`deb/`, `rpm/`).
    pub hooks_dir: PathBuf,
}

impl SourceLayout {
    /// Conventional layout of an agent checkout rooted at `source_dir`.
    #[must_use]
    pub fn from_source_dir(source_dir: &Path) -> Self {
        Self {
            scripts_dir: source_dir.join("bin"),
            config_file: source_dir.join("conf").join("config.cfg"),
            init_script: source_dir.join("pd-agent.init"),
            module_dir: source_dir.join("pdagent"),
            hooks_dir: source_dir.to_path_buf(),
        }
    }

    /// Post-install hook for `kind`. Handed to fpm as-is; fpm reports a
    /// missing hook itself.
    #[must_use]
    pub fn post_install_hook(&self, kind: PackageKind) -> PathBuf {
        self.hooks_dir.join(kind.as_str()).join("postinst.sh")
    }

    /// Pre-uninstall hook for `kind`.
    #[must_use]
    pub fn pre_uninstall_hook(&self, kind: PackageKind) -> PathBuf {
        self.hooks_dir.join(kind.as_str()).join("prerm.sh")
    }

    /// Check that every input the stager reads exists.
    ///
    /// Runs before the staging root is reset, so a mistyped `--source-dir`
    /// cannot wipe a previous staging tree.
    ///
    /// # Errors
    ///
    /// Returns the first missing input as a [`LayoutError`].
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.scripts_dir.is_dir() {
            return Err(LayoutError::MissingScriptsDir(self.scripts_dir.clone()));
        }
        if !self.module_dir.is_dir() {
            return Err(LayoutError::MissingModuleDir(self.module_dir.clone()));
        }
        if !self.config_file.is_file() {
            return Err(LayoutError::MissingConfigFile(self.config_file.clone()));
        }
        if !self.init_script.is_file() {
            return Err(LayoutError::MissingInitScript(self.init_script.clone()));
        }
        Ok(())
    }
}
