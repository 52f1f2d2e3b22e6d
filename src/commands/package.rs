//! `pdpkg <kind>` — stage the agent tree and hand it to fpm.

use std::path::Path;

use anyhow::{Result, bail};

use crate::fpm::{Fpm, PackageSpec};
use crate::layout::{PACKAGE_NAME, PACKAGE_VERSION, PackageKind, SourceLayout};
use crate::output::OutputContext;
use crate::plan::StagingPlan;
use crate::stager::Stager;

/// Run the packaging flow end to end. The returned code becomes the
/// process exit status; once staging has succeeded it is fpm's own.
///
/// # Errors
///
/// Returns an error if a checkout input is missing, a staging operation
/// fails, or fpm cannot be spawned. A non-zero fpm exit is a returned
/// code, not an error.
pub async fn run(
    kind: PackageKind,
    sources: &SourceLayout,
    staging_root: &Path,
    fpm: &impl Fpm,
    json: bool,
    ctx: &OutputContext,
) -> Result<i32> {
    sources.validate()?;
    let plan = StagingPlan::compute(kind, sources)?;

    ctx.info(&format!(
        "staging {kind} tree into {}",
        staging_root.display()
    ));
    Stager::new(staging_root.to_path_buf()).stage(&plan)?;
    ctx.success(&format!("staged {} files", plan.copies.len()));

    let spec = PackageSpec::assemble(kind, sources, staging_root);
    ctx.info(&format!("running fpm for {PACKAGE_NAME} {PACKAGE_VERSION} ({kind})"));
    let status = fpm.build(&spec).await?;

    let Some(code) = status.code() else {
        bail!("fpm terminated by signal");
    };
    if code == 0 {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "package": PACKAGE_NAME,
                    "version": PACKAGE_VERSION,
                    "kind": kind,
                    "staged_files": plan.copies.len(),
                })
            );
        } else {
            ctx.success(&format!("built {PACKAGE_NAME} {PACKAGE_VERSION} ({kind})"));
        }
    } else {
        ctx.error(&format!("fpm exited with status {code}"));
    }
    Ok(code)
}
