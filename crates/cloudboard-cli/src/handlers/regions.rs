use crate::context::ExecutionContext;
use crate::presentation::Renderer;
use crate::presentation::presenters;
use anyhow::{Context, Result};
use cloudboard_engine::region_rollups;

pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let dashboard = ctx.load_dashboard()?;
    let snapshot = dashboard.snapshot().context("No feed data has been loaded")?;

    let result = presenters::present_region_list(&region_rollups(&snapshot.status), ctx.cloud());
    ctx.renderer().render(result)
}
