//! Staging tree construction.
//!
//! The [`Stager`] owns one staging root and executes a [`StagingPlan`]
//! against it. Every run starts from an empty root, so rerunning with
//! the same inputs always yields the same tree.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::plan::StagingPlan;

/// Executes staging plans against a staging root.
pub struct Stager {
    root: PathBuf,
}

impl Stager {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The staging root this stager owns.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reset the staging root, then execute `plan` into it.
    ///
    /// Stops at the first failed operation, leaving the partial tree in
    /// place for inspection.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be reset or any directory
    /// creation, copy, or write fails.
    pub fn stage(&self, plan: &StagingPlan) -> Result<()> {
        self.reset()?;
        for dir in &plan.dirs {
            let path = self.root.join(dir);
            std::fs::create_dir_all(&path)
                .with_context(|| format!("creating directory {}", path.display()))?;
        }
        for copy in &plan.copies {
            let dest = self.root.join(&copy.dest);
            std::fs::copy(&copy.source, &dest).with_context(|| {
                format!(
                    "copying {} to {}",
                    copy.source.display(),
                    dest.display()
                )
            })?;
            if copy.executable {
                set_executable(&dest)?;
            }
        }
        if let Some(manifest) = &plan.manifest {
            let dest = self.root.join(&manifest.dest);
            std::fs::write(&dest, &manifest.content)
                .with_context(|| format!("writing manifest {}", dest.display()))?;
        }
        Ok(())
    }

    /// Delete any previous staging root and recreate it empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the old root cannot be removed or the new one
    /// cannot be created.
    pub fn reset(&self) -> Result<()> {
        if self.root.exists() {
            std::fs::remove_dir_all(&self.root).with_context(|| {
                format!("removing stale staging root {}", self.root.display())
            })?;
        }
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("creating staging root {}", self.root.display()))?;
        Ok(())
    }
}

/// Force mode 755. Source checkouts often lose exec bits, and package
/// payloads must not depend on them.
fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .with_context(|| format!("setting permissions on {}", path.display()))?;
    }
    Ok(())
}
