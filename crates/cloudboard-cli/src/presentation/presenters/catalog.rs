use super::status::present_region;
use super::{cloud_label, source_label};
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, MonthEntry, MonthListViewModel, RegionListViewModel,
    StatusBadge,
};
use cloudboard_engine::{RegionRollup, compute_cost_summary, format_month_label};
use cloudboard_types::{CloudProvider, CostRow, MonthYear};

/// Regions sorted by name, each with its effective total
pub fn present_region_list(
    rollups: &[RegionRollup],
    cloud: Option<CloudProvider>,
) -> CommandResultViewModel<RegionListViewModel> {
    let mut regions: Vec<_> = rollups.iter().map(present_region).collect();
    regions.sort_by(|a, b| a.region.cmp(&b.region));

    let mut result = CommandResultViewModel::new(RegionListViewModel {
        cloud: cloud_label(cloud),
        regions,
    });

    if result.content.regions.is_empty() {
        result = result.with_badge(StatusBadge::notice("Status feed has no regions"));
    } else {
        result = result.with_suggestions(vec![
            Guidance::new("Show one region's zones", "cloudboard status --region <REGION>"),
        ]);
    }
    result
}

/// Billed months, most recent first, each with its headline total
pub fn present_month_list(
    rows: &[CostRow],
    months: &[MonthYear],
    cloud: Option<CloudProvider>,
    currency: &str,
) -> CommandResultViewModel<MonthListViewModel> {
    let entries: Vec<MonthEntry> = months
        .iter()
        .map(|month| {
            let summary = compute_cost_summary(rows, month);
            MonthEntry {
                month: month.to_string(),
                label: format_month_label(month),
                total: summary.total,
                service_count: summary.services.len(),
                source: source_label(summary.source),
            }
        })
        .collect();

    let mut result = CommandResultViewModel::new(MonthListViewModel {
        cloud: cloud_label(cloud),
        currency: currency.to_string(),
        months: entries,
    });

    if result.content.months.is_empty() {
        result = result.with_badge(StatusBadge::notice("Cost feed has no months"));
    } else {
        result = result.with_suggestions(vec![
            Guidance::new("Break one month down by service", "cloudboard costs --month <YYYY-MM>"),
        ]);
    }
    result
}
