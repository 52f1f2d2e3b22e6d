//! Staging plan computation.
//!
//! A [`StagingPlan`] is the complete set of filesystem effects for one
//! packaging run, computed read-only from the source checkout. Executing
//! it against disk is the stager's job; rendering it is the dry-run's.
//! Directory listings are sorted, so identical inputs always produce
//! identical plans.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::layout::{
    MODULE_EXTENSION, PYSUPPORT_HEADER, PYSUPPORT_MANIFEST_PATH, PackageKind, SERVICE_NAME,
    SourceLayout,
};

/// One file copy into the staging tree.
#[derive(Debug, Clone, Serialize)]
pub struct CopyOp {
    /// Source file in the checkout.
    pub source: PathBuf,
    /// Destination, relative to the staging root.
    pub dest: PathBuf,
    /// Force mode 755 after the copy (scripts and the init script).
    pub executable: bool,
}

/// A file generated into the staging tree with no source counterpart.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFile {
    /// Destination, relative to the staging root.
    pub dest: PathBuf,
    /// Full file content, newline-terminated.
    pub content: String,
}

/// Everything one packaging run does to the staging root.
#[derive(Debug, Clone, Serialize)]
pub struct StagingPlan {
    /// Kind the plan was computed for.
    pub kind: PackageKind,
    /// Directories created under the staging root, in creation order.
    pub dirs: Vec<PathBuf>,
    /// File copies, in execution order.
    pub copies: Vec<CopyOp>,
    /// Generated python-support manifest. `None` for RPM builds.
    pub manifest: Option<GeneratedFile>,
}

impl StagingPlan {
    /// Compute the plan for `kind` from the checkout described by `sources`.
    ///
    /// Discovers the top-level scripts and the python module tree but
    /// mutates nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a source directory cannot be read.
    pub fn compute(kind: PackageKind, sources: &SourceLayout) -> Result<Self> {
        let policy = kind.policy();

        let mut dirs = vec![
            PathBuf::from("usr/bin"),
            Path::new("var/log").join(SERVICE_NAME),
            Path::new("var/lib").join(SERVICE_NAME).join("outqueue"),
            Path::new("etc").join(SERVICE_NAME),
            PathBuf::from("etc/init.d"),
        ];
        let mut copies = Vec::new();

        // Top-level scripts land in usr/bin under their own names.
        for script in top_level_files(&sources.scripts_dir)? {
            let name = script
                .file_name()
                .with_context(|| format!("script {} has no file name", script.display()))?
                .to_os_string();
            copies.push(CopyOp {
                source: script,
                dest: Path::new("usr/bin").join(name),
                executable: true,
            });
        }

        // Static config, plus the init script renamed to the service name.
        copies.push(CopyOp {
            source: sources.config_file.clone(),
            dest: Path::new("etc").join(SERVICE_NAME).join("config.cfg"),
            executable: false,
        });
        copies.push(CopyOp {
            source: sources.init_script.clone(),
            dest: Path::new("etc/init.d").join(SERVICE_NAME),
            executable: true,
        });

        // The module tree is mirrored under the kind-specific root,
        // keeping the tree's own directory name as the first component.
        let python_root = PathBuf::from(policy.python_root);
        let root_rel = PathBuf::from(
            sources
                .module_dir
                .file_name()
                .with_context(|| {
                    format!(
                        "module directory {} has no final path component",
                        sources.module_dir.display()
                    )
                })?
                .to_os_string(),
        );
        let mut module_dirs = Vec::new();
        let mut module_files = Vec::new();
        walk_module_tree(
            &sources.module_dir,
            &root_rel,
            &mut module_dirs,
            &mut module_files,
        )?;
        for dir in &module_dirs {
            dirs.push(python_root.join(dir));
        }
        let mut module_dests = Vec::with_capacity(module_files.len());
        for (source, rel) in module_files {
            let dest = python_root.join(rel);
            module_dests.push(dest.clone());
            copies.push(CopyOp {
                source,
                dest,
                executable: false,
            });
        }

        let manifest = if policy.pysupport_manifest {
            dirs.push(
                Path::new(PYSUPPORT_MANIFEST_PATH)
                    .parent()
                    .context("manifest path has no parent directory")?
                    .to_path_buf(),
            );
            Some(pysupport_manifest(&module_dests))
        } else {
            None
        };

        Ok(Self {
            kind,
            dirs,
            copies,
            manifest,
        })
    }
}

/// Build the python-support manifest: a version header, a blank line,
/// then one staging-relative module path per line.
fn pysupport_manifest(module_dests: &[PathBuf]) -> GeneratedFile {
    let mut content = String::from(PYSUPPORT_HEADER);
    content.push('\n');
    content.push('\n');
    for dest in module_dests {
        content.push_str(&dest.display().to_string());
        content.push('\n');
    }
    GeneratedFile {
        dest: PathBuf::from(PYSUPPORT_MANIFEST_PATH),
        content,
    }
}

/// A directory entry with its name and type resolved up front.
struct SortedEntry {
    name: OsString,
    path: PathBuf,
    file_type: std::fs::FileType,
}

/// Regular files directly under `dir`, sorted by name. Subdirectories
/// and other entry types are skipped.
fn top_level_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = read_dir_sorted(dir)?;
    entries.retain(|entry| entry.file_type.is_file());
    Ok(entries.into_iter().map(|entry| entry.path).collect())
}

/// Recursively mirror `dir` into `dirs` and `files`.
///
/// `rel` is the staging-relative path of `dir` (the tree root's own name
/// for the first call). Every directory is recorded, including empty
/// ones; only files with the module extension are recorded, paired with
/// their source path.
fn walk_module_tree(
    dir: &Path,
    rel: &Path,
    dirs: &mut Vec<PathBuf>,
    files: &mut Vec<(PathBuf, PathBuf)>,
) -> Result<()> {
    dirs.push(rel.to_path_buf());
    for entry in read_dir_sorted(dir)? {
        let entry_rel = rel.join(&entry.name);
        if entry.file_type.is_dir() {
            walk_module_tree(&entry.path, &entry_rel, dirs, files)?;
        } else if entry.file_type.is_file()
            && entry
                .path
                .extension()
                .is_some_and(|ext| ext == MODULE_EXTENSION)
        {
            files.push((entry.path, entry_rel));
        }
    }
    Ok(())
}

/// Read a directory sorted by file name, so traversal order does not
/// depend on readdir order.
fn read_dir_sorted(dir: &Path) -> Result<Vec<SortedEntry>> {
    let mut entries = Vec::new();
    let iter = std::fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?;
    for entry in iter {
        let entry =
            entry.with_context(|| format!("reading directory {}", dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("inspecting {}", entry.path().display()))?;
        entries.push(SortedEntry {
            name: entry.file_name(),
            path: entry.path(),
            file_type,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
