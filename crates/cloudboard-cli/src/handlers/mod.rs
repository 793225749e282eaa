pub mod check;
pub mod costs;
pub mod months;
pub mod regions;
pub mod status;
pub mod view;
pub mod watch;

use anyhow::{Result, anyhow};
use cloudboard_engine::DashboardView;
use cloudboard_runtime::Dashboard;
use cloudboard_types::{MonthYear, RegionScope};

/// Apply optional filters to a loaded dashboard and derive its view
fn filtered_view(
    dashboard: &mut Dashboard,
    region: Option<&str>,
    month: Option<MonthYear>,
) -> Result<DashboardView> {
    if let Some(region) = region {
        dashboard.set_region(RegionScope::parse(region));
    }
    if let Some(month) = month {
        dashboard.set_month(month);
    }
    dashboard
        .view()
        .ok_or_else(|| anyhow!("No feed data has been loaded"))
}
