use crate::args::CostsArgs;
use crate::context::ExecutionContext;
use crate::presentation::Renderer;
use crate::presentation::presenters;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, args: &CostsArgs) -> Result<()> {
    let mut dashboard = ctx.load_dashboard()?;
    let view = super::filtered_view(&mut dashboard, None, args.month)?;

    let result =
        presenters::present_cost_result(&view.cost, ctx.cloud(), ctx.currency(), &view.months);
    ctx.renderer().render(result)
}
