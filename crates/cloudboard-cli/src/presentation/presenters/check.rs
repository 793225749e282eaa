use super::{cloud_label, present_counts, present_reconciliation, source_label};
use crate::presentation::view_models::{
    CheckViewModel, CommandResultViewModel, MonthCheckEntry, RegionCheckEntry, StatusBadge,
    StatusLevel,
};
use cloudboard_engine::{FeedReport, MonthCheck, RegionCheck};
use cloudboard_types::CloudProvider;

fn present_region_check(check: &RegionCheck) -> RegionCheckEntry {
    RegionCheckEntry {
        region: check.scope.to_string(),
        counts: present_counts(check.counts),
        source: source_label(check.source),
        check: present_reconciliation(&check.check, |c| present_counts(*c)),
    }
}

fn present_month_check(check: &MonthCheck) -> MonthCheckEntry {
    MonthCheckEntry {
        month: check.month.to_string(),
        total: check.total,
        source: source_label(check.source),
        check: present_reconciliation(&check.check, |v| *v),
        pct_sum: check.pct_sum,
        pct_overflow: check.pct_overflow,
    }
}

pub fn present_check(
    report: &FeedReport,
    cloud: Option<CloudProvider>,
    currency: &str,
) -> CommandResultViewModel<CheckViewModel> {
    let mismatches = report.mismatches();
    let regions = std::iter::once(&report.grand_total)
        .chain(&report.regions)
        .map(present_region_check)
        .collect();

    let badge = if mismatches == 0 {
        StatusBadge::consistent("All supplied totals agree with their components")
    } else {
        StatusBadge::new(
            StatusLevel::Mismatch,
            format!("{} total(s) disagree with their components", mismatches),
        )
    };

    CommandResultViewModel::new(CheckViewModel {
        cloud: cloud_label(cloud),
        consistent: mismatches == 0,
        mismatches,
        currency: currency.to_string(),
        regions,
        months: report.months.iter().map(present_month_check).collect(),
    })
    .with_badge(badge)
}
