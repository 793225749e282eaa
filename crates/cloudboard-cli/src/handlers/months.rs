use crate::context::ExecutionContext;
use crate::presentation::Renderer;
use crate::presentation::presenters;
use anyhow::{Context, Result};

pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let dashboard = ctx.load_dashboard()?;
    let snapshot = dashboard.snapshot().context("No feed data has been loaded")?;

    let result = presenters::present_month_list(
        &snapshot.costs,
        dashboard.selector().months(),
        ctx.cloud(),
        ctx.currency(),
    );
    ctx.renderer().render(result)
}
