use serde::Serialize;

use super::status::ReconciliationViewModel;

#[derive(Debug, Clone, Serialize)]
pub struct CostViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<String>,
    /// `YYYY-MM`; `None` when the cost feed has no months
    pub month: Option<String>,
    pub month_label: Option<String>,
    pub currency: String,
    pub total: f64,
    pub services: Vec<ServiceEntry>,
    /// Share of the total covered by the listed services
    pub covered_pct: f64,
    pub source: String,
    pub check: ReconciliationViewModel<f64>,
    pub retrieved_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceEntry {
    pub service: String,
    pub amount: f64,
    pub pct: f64,
    /// Whether the percentage came from the feed or was derived from the total
    pub pct_supplied: bool,
}
