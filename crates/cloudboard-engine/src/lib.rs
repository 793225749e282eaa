// Engine module - pure rollup and filtering logic
// This layer sits between typed feed rows (types) and any presentation layer.
// Nothing here performs I/O or returns errors: missing totals, unknown filters
// and empty feeds all degrade to well-formed (possibly empty) views.

pub mod cost;
pub mod diagnostics;
pub mod format;
pub mod reconcile;
pub mod selector;
pub mod status;

pub use cost::{CostSummary, compute_cost_summary};
pub use diagnostics::{FeedReport, MonthCheck, RegionCheck, check_feeds};
pub use format::{format_currency, format_currency_with, format_month_label, format_percent};
pub use reconcile::{COST_EPSILON, TotalCheck, TotalSource};
pub use selector::{
    DashboardView, FilterReset, FilterState, SelectorState, SyncOutcome, Transition, ViewSelector,
    available_months, available_regions,
};
pub use status::{RegionRollup, StatusSummary, compute_status_summary, region_rollups};
