use crate::context::ExecutionContext;
use crate::presentation::Renderer;
use crate::presentation::presenters;
use anyhow::{Context, Result};

/// Render the consistency report; fails when any supplied total disagrees
/// so scripts can gate on the exit code.
pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let dashboard = ctx.load_dashboard()?;
    let report = dashboard.report().context("No feed data has been loaded")?;

    ctx.renderer()
        .render(presenters::present_check(&report, ctx.cloud(), ctx.currency()))?;

    if !report.is_consistent() {
        anyhow::bail!(
            "{} supplied total(s) disagree with their components",
            report.mismatches()
        );
    }
    Ok(())
}
