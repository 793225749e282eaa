use crate::reconcile::{TotalCheck, TotalSource, check_counts, resolve_total};
use chrono::{DateTime, Utc};
use cloudboard_types::{InstanceCounts, RegionName, RegionScope, ResourceStatusRow, StatusScope};
use serde::{Deserialize, Serialize};

/// Rolled-up instance counts for one region selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub scope: RegionScope,
    pub counts: InstanceCounts,
    /// Real-zone rows of the selected region, in feed order. Empty for `ALL`.
    pub zone_breakdown: Vec<ResourceStatusRow>,
    /// Per-region totals, in feed order. Only populated for `ALL`.
    pub region_breakdown: Vec<RegionRollup>,
    pub source: TotalSource,
    pub check: TotalCheck<InstanceCounts>,
    /// Most recent snapshot time among the rows that fed this summary.
    pub retrieved_at: Option<DateTime<Utc>>,
}

impl StatusSummary {
    pub fn empty(scope: RegionScope) -> Self {
        Self {
            scope,
            counts: InstanceCounts::ZERO,
            zone_breakdown: Vec::new(),
            region_breakdown: Vec::new(),
            source: TotalSource::Empty,
            check: TotalCheck::Unchecked,
            retrieved_at: None,
        }
    }

    pub fn running(&self) -> u64 {
        self.counts.running
    }

    pub fn stopped(&self) -> u64 {
        self.counts.stopped
    }

    pub fn terminated(&self) -> u64 {
        self.counts.terminated
    }
}

/// Effective total for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRollup {
    pub region: RegionName,
    pub counts: InstanceCounts,
    pub source: TotalSource,
    pub check: TotalCheck<InstanceCounts>,
    pub zone_count: usize,
}

/// Roll up status rows for a region selection.
///
/// A supplied aggregate row (`GrandTotal` for `ALL`, the region's
/// `RegionTotal` otherwise) is trusted; without one the counts are summed from
/// the rows beneath it. Whenever both derivations exist they are compared and
/// the outcome is reported in [`StatusSummary::check`]. An unknown region
/// yields zero counts.
pub fn compute_status_summary(rows: &[ResourceStatusRow], scope: &RegionScope) -> StatusSummary {
    match scope {
        RegionScope::All => summarize_all(rows),
        RegionScope::Specific(region) => summarize_region(rows, region),
    }
}

/// Per-region totals in order of first appearance.
///
/// Each region uses its supplied total row when present, else the sum of its
/// zone rows.
pub fn region_rollups(rows: &[ResourceStatusRow]) -> Vec<RegionRollup> {
    let mut regions: Vec<&RegionName> = Vec::new();
    for region in rows.iter().filter_map(ResourceStatusRow::region) {
        if !regions.contains(&region) {
            regions.push(region);
        }
    }

    regions
        .into_iter()
        .filter_map(|region| {
            let totals = region_totals(rows, region);
            let (counts, source) = resolve_total(totals.supplied, totals.computed)?;
            Some(RegionRollup {
                region: region.clone(),
                counts,
                source,
                check: check_counts(totals.supplied, totals.computed),
                zone_count: totals.zone_count,
            })
        })
        .collect()
}

struct RegionTotals {
    supplied: Option<InstanceCounts>,
    computed: Option<InstanceCounts>,
    zone_count: usize,
}

fn region_totals(rows: &[ResourceStatusRow], region: &RegionName) -> RegionTotals {
    let supplied = rows.iter().find_map(|row| match &row.scope {
        StatusScope::RegionTotal { region: r } if r == region => Some(row.counts),
        _ => None,
    });

    let zone_counts: Vec<InstanceCounts> = rows
        .iter()
        .filter(|row| matches!(&row.scope, StatusScope::Zone { region: r, .. } if r == region))
        .map(|row| row.counts)
        .collect();

    RegionTotals {
        supplied,
        computed: (!zone_counts.is_empty()).then(|| zone_counts.iter().sum()),
        zone_count: zone_counts.len(),
    }
}

fn summarize_region(rows: &[ResourceStatusRow], region: &RegionName) -> StatusSummary {
    let scope = RegionScope::Specific(region.clone());
    let totals = region_totals(rows, region);

    let Some((counts, source)) = resolve_total(totals.supplied, totals.computed) else {
        tracing::debug!(region = %region, "no status rows for region");
        return StatusSummary::empty(scope);
    };

    if source == TotalSource::Computed {
        tracing::debug!(region = %region, "region total row missing, summing zone rows");
    }

    let check = check_counts(totals.supplied, totals.computed);
    if let TotalCheck::Mismatch { supplied, computed } = &check {
        tracing::warn!(
            region = %region,
            ?supplied,
            ?computed,
            "supplied region total disagrees with its zone rows"
        );
    }

    let zone_breakdown: Vec<ResourceStatusRow> = rows
        .iter()
        .filter(|row| matches!(&row.scope, StatusScope::Zone { region: r, .. } if r == region))
        .cloned()
        .collect();

    StatusSummary {
        scope,
        counts,
        zone_breakdown,
        region_breakdown: Vec::new(),
        source,
        check,
        retrieved_at: latest(rows.iter().filter(|row| row.in_region(region))),
    }
}

fn summarize_all(rows: &[ResourceStatusRow]) -> StatusSummary {
    let supplied = rows
        .iter()
        .find(|row| row.scope == StatusScope::GrandTotal)
        .map(|row| row.counts);

    let region_breakdown = region_rollups(rows);
    let computed: Option<InstanceCounts> = (!region_breakdown.is_empty())
        .then(|| region_breakdown.iter().map(|rollup| rollup.counts).sum());

    let Some((counts, source)) = resolve_total(supplied, computed) else {
        return StatusSummary::empty(RegionScope::All);
    };

    if source == TotalSource::Computed {
        tracing::debug!("grand total row missing, summing region totals");
    }

    let check = check_counts(supplied, computed);
    if let TotalCheck::Mismatch { supplied, computed } = &check {
        tracing::warn!(
            ?supplied,
            ?computed,
            "supplied grand total disagrees with region totals"
        );
    }

    StatusSummary {
        scope: RegionScope::All,
        counts,
        zone_breakdown: Vec::new(),
        region_breakdown,
        source,
        check,
        retrieved_at: latest(rows.iter()),
    }
}

fn latest<'a>(rows: impl Iterator<Item = &'a ResourceStatusRow>) -> Option<DateTime<Utc>> {
    rows.map(|row| row.retrieved_at).max()
}
