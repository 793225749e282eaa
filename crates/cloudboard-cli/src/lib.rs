// NOTE: cloudboard Architecture Rationale
//
// Why trust supplied totals but still recompute them?
// - Upstream collectors write TOTAL/ALL rows that may be computed over rows
//   the feed later drops (threshold filtering, partial scans)
// - Showing the supplied figure keeps the dashboard identical to the billing console
// - Recomputing alongside lets `check` surface drift instead of hiding it
//
// Why replace row sets wholesale on every refresh?
// - Each fetch is a consistent snapshot; merging rows across fetches can mix
//   zone rows from one scan with totals from another
// - Late responses are dropped by ticket order, so the newest fetch always wins
//
// Why keep the filter across refreshes?
// - A user looking at one region should not be bounced back to ALL every tick
// - Only a filter whose value vanished from the data is reset

mod args;
mod commands;
pub mod context;
mod handlers;
pub mod logging;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands, CostsArgs, StatusArgs, ViewArgs, WatchArgs};
pub use commands::run;
