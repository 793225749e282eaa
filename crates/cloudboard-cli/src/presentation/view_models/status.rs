use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountsViewModel {
    pub running: u64,
    pub stopped: u64,
    pub terminated: u64,
}

/// Supplied-vs-computed comparison; the values are present only when both
/// derivations existed and differed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationViewModel<T>
where
    T: Serialize,
{
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplied: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed: Option<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<String>,
    /// `ALL` or a region name
    pub region: String,
    pub running: u64,
    pub stopped: u64,
    pub terminated: u64,
    pub source: String,
    pub check: ReconciliationViewModel<CountsViewModel>,
    pub zones: Vec<ZoneEntry>,
    pub regions: Vec<RegionEntry>,
    pub retrieved_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneEntry {
    pub region: String,
    pub zone: String,
    pub running: u64,
    pub stopped: u64,
    pub terminated: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionEntry {
    pub region: String,
    pub running: u64,
    pub stopped: u64,
    pub terminated: u64,
    pub zone_count: usize,
    pub source: String,
    pub check: String,
}
