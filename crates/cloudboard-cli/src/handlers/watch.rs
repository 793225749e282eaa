use crate::args::WatchArgs;
use crate::context::ExecutionContext;
use crate::presentation::Renderer;
use crate::presentation::presenters;
use anyhow::{Context, Result, anyhow};
use cloudboard_runtime::{
    Dashboard, Delivery, FeedSource, FeedWatcher, WatchSignal, run_watch_loop,
};
use cloudboard_types::RegionScope;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const FILE_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub fn handle(ctx: &ExecutionContext, args: &WatchArgs) -> Result<()> {
    let interval = args
        .interval
        .map(|secs| Duration::from_secs(secs.max(1)))
        .unwrap_or_else(|| ctx.config().refresh_interval());

    let stop = Arc::new(AtomicBool::new(false));
    let watcher = if args.once {
        None
    } else {
        let flag = stop.clone();
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
            .context("Failed to install Ctrl-C handler")?;

        match FeedWatcher::new(&ctx.feed().watch_paths(), FILE_POLL_INTERVAL) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                tracing::warn!(error = %err, "file watching unavailable, refreshing on interval only");
                None
            }
        }
    };

    tracing::info!(
        feeds = %ctx.feed().describe(),
        interval_secs = interval.as_secs(),
        "watching feeds"
    );

    let renderer = ctx.renderer().streaming();
    let mut filters_pending = true;
    let mut failure = None;

    let mut dashboard = Dashboard::new(ctx.cloud());
    run_watch_loop(
        &mut dashboard,
        ctx.feed(),
        watcher.as_ref(),
        interval,
        &stop,
        |dashboard, signal, result| {
            let outcome = match result {
                Ok(Delivery::Applied(outcome)) => outcome,
                Ok(Delivery::Stale { .. }) => return ControlFlow::Continue(()),
                Err(err) if args.once => {
                    failure = Some(anyhow!("{}", err));
                    return ControlFlow::Break(());
                }
                Err(_) => return ControlFlow::Continue(()),
            };

            if filters_pending {
                if let Some(region) = &args.region {
                    dashboard.set_region(RegionScope::parse(region));
                }
                if let Some(month) = args.month {
                    dashboard.set_month(month);
                }
                filters_pending = false;
            }

            if let Err(err) = render_frame(ctx, &renderer, dashboard, signal, &outcome.resets) {
                failure = Some(err);
                return ControlFlow::Break(());
            }

            if args.once {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        },
    );

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn render_frame(
    ctx: &ExecutionContext,
    renderer: &impl Renderer,
    dashboard: &Dashboard,
    signal: &WatchSignal,
    resets: &[cloudboard_engine::FilterReset],
) -> Result<()> {
    let view = dashboard.view().context("No feed data has been loaded")?;
    let snapshot = dashboard.snapshot().context("No feed data has been loaded")?;

    let frame = presenters::present_watch_frame(
        &view,
        signal,
        &snapshot.fetched_at,
        resets,
        ctx.cloud(),
        ctx.currency(),
    );
    renderer.render(frame)
}
