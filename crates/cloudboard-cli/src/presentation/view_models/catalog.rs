use serde::Serialize;

use super::status::RegionEntry;

#[derive(Debug, Clone, Serialize)]
pub struct RegionListViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<String>,
    pub regions: Vec<RegionEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthListViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<String>,
    pub currency: String,
    pub months: Vec<MonthEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthEntry {
    pub month: String,
    pub label: String,
    pub total: f64,
    pub service_count: usize,
    pub source: String,
}
