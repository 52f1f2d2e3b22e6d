//! `pdpkg <kind> --dry-run` — show the staging plan and fpm invocation
//! without touching disk.

use std::path::Path;

use anyhow::Result;

use crate::fpm::PackageSpec;
use crate::layout::{PackageKind, SourceLayout};
use crate::output::OutputContext;
use crate::plan::StagingPlan;

/// Compute and render the plan for `kind`. Mutates nothing.
///
/// # Errors
///
/// Returns an error if a checkout input is missing or a source
/// directory cannot be read.
pub fn run(
    kind: PackageKind,
    sources: &SourceLayout,
    staging_root: &Path,
    json: bool,
    ctx: &OutputContext,
) -> Result<()> {
    sources.validate()?;
    let plan = StagingPlan::compute(kind, sources)?;
    let spec = PackageSpec::assemble(kind, sources, staging_root);

    if json {
        let rendered = serde_json::to_string_pretty(&serde_json::json!({
            "plan": plan,
            "fpm": spec,
        }))?;
        println!("{rendered}");
        return Ok(());
    }

    ctx.header(&format!("staging plan ({kind})"));
    for dir in &plan.dirs {
        ctx.kv("dir", &dir.display().to_string());
    }
    for copy in &plan.copies {
        ctx.kv(
            "copy",
            &format!("{} -> {}", copy.source.display(), copy.dest.display()),
        );
    }
    if let Some(manifest) = &plan.manifest {
        ctx.kv(
            "write",
            &format!(
                "{} ({} lines)",
                manifest.dest.display(),
                manifest.content.lines().count()
            ),
        );
    }
    if !plan.copies.iter().any(|copy| copy.dest.starts_with(kind.policy().python_root)) {
        ctx.warn("module tree contains no module files");
    }

    ctx.header("fpm invocation");
    let args: Vec<String> = spec
        .to_args()
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    ctx.kv("argv", &args.join(" "));
    Ok(())
}
