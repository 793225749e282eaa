use crate::args::StatusArgs;
use crate::context::ExecutionContext;
use crate::presentation::Renderer;
use crate::presentation::presenters;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, args: &StatusArgs) -> Result<()> {
    let mut dashboard = ctx.load_dashboard()?;
    let view = super::filtered_view(&mut dashboard, args.region.as_deref(), None)?;

    let result = presenters::present_status_result(&view.status, ctx.cloud(), &view.regions);
    ctx.renderer().render(result)
}
