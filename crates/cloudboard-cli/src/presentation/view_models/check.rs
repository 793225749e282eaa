use serde::Serialize;

use super::status::{CountsViewModel, ReconciliationViewModel};

#[derive(Debug, Clone, Serialize)]
pub struct CheckViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<String>,
    pub consistent: bool,
    pub mismatches: usize,
    pub currency: String,
    pub regions: Vec<RegionCheckEntry>,
    pub months: Vec<MonthCheckEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionCheckEntry {
    /// `ALL` for the cross-region total
    pub region: String,
    pub counts: CountsViewModel,
    pub source: String,
    pub check: ReconciliationViewModel<CountsViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthCheckEntry {
    pub month: String,
    pub total: f64,
    pub source: String,
    pub check: ReconciliationViewModel<f64>,
    pub pct_sum: f64,
    pub pct_overflow: bool,
}
