use crate::args::ViewArgs;
use crate::context::ExecutionContext;
use crate::presentation::Renderer;
use crate::presentation::presenters;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, args: &ViewArgs) -> Result<()> {
    let mut dashboard = ctx.load_dashboard()?;
    let view = super::filtered_view(&mut dashboard, args.region.as_deref(), args.month)?;

    let result = presenters::present_dashboard_result(&view, ctx.cloud(), ctx.currency());
    ctx.renderer().render(result)
}
