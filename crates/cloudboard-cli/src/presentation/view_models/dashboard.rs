use serde::Serialize;

use super::cost::CostViewModel;
use super::status::StatusViewModel;

/// Combined status + cost view for the current filters.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<String>,
    pub region: String,
    pub month: Option<String>,
    pub regions: Vec<String>,
    pub months: Vec<String>,
    pub status: StatusViewModel,
    pub cost: CostViewModel,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterResetEntry {
    pub filter: String,
    pub previous: String,
    pub replacement: String,
}

/// One `watch` refresh.
#[derive(Debug, Clone, Serialize)]
pub struct WatchFrameViewModel {
    /// `started`, `feed_changed` or `tick`
    pub trigger: String,
    pub fetched_at: String,
    pub resets: Vec<FilterResetEntry>,
    pub dashboard: DashboardViewModel,
}
