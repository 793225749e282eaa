use crate::cost::compute_cost_summary;
use crate::reconcile::{TotalCheck, TotalSource};
use crate::selector::{available_months, available_regions};
use crate::status::compute_status_summary;
use cloudboard_types::{CostRow, InstanceCounts, MonthYear, RegionName, RegionScope, ResourceStatusRow};
use serde::{Deserialize, Serialize};

/// Slack for percentage columns rounded to two decimals upstream
const PCT_SUM_SLACK: f64 = 0.05;

/// Consistency report across every region and month in a pair of feeds.
///
/// Produced by [`check_feeds`]; used to spot upstream totals that drifted
/// from their component rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedReport {
    pub grand_total: RegionCheck,
    pub regions: Vec<RegionCheck>,
    pub months: Vec<MonthCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCheck {
    pub scope: RegionScope,
    pub counts: InstanceCounts,
    pub source: TotalSource,
    pub check: TotalCheck<InstanceCounts>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCheck {
    pub month: MonthYear,
    pub total: f64,
    pub source: TotalSource,
    pub check: TotalCheck<f64>,
    /// Sum of the percentages the feed supplied for service rows
    pub pct_sum: f64,
    /// `pct_sum` exceeds 100 beyond rounding
    pub pct_overflow: bool,
}

impl FeedReport {
    /// Number of totals that disagree with their components
    pub fn mismatches(&self) -> usize {
        let status = std::iter::once(&self.grand_total)
            .chain(&self.regions)
            .filter(|r| r.check.is_mismatch())
            .count();
        let cost = self
            .months
            .iter()
            .filter(|m| m.check.is_mismatch() || m.pct_overflow)
            .count();
        status + cost
    }

    pub fn is_consistent(&self) -> bool {
        self.mismatches() == 0
    }
}

/// Reconcile every supplied total in the feeds against its component rows
pub fn check_feeds(status_rows: &[ResourceStatusRow], cost_rows: &[CostRow]) -> FeedReport {
    let region_check = |scope: RegionScope| {
        let summary = compute_status_summary(status_rows, &scope);
        RegionCheck {
            scope,
            counts: summary.counts,
            source: summary.source,
            check: summary.check,
        }
    };

    let grand_total = region_check(RegionScope::All);
    let regions = available_regions(status_rows)
        .into_iter()
        .map(|region: RegionName| region_check(RegionScope::Specific(region)))
        .collect();

    let months = available_months(cost_rows)
        .into_iter()
        .map(|month| {
            let summary = compute_cost_summary(cost_rows, &month);
            let pct_sum: f64 = cost_rows
                .iter()
                .filter(|row| row.month == month && !row.is_total())
                .filter_map(|row| row.pct_of_total)
                .sum();
            MonthCheck {
                month,
                total: summary.total,
                source: summary.source,
                check: summary.check,
                pct_sum,
                pct_overflow: pct_sum > 100.0 + PCT_SUM_SLACK,
            }
        })
        .collect();

    FeedReport {
        grand_total,
        regions,
        months,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_report_flags_drifted_region_total() {
        let at = Utc.with_ymd_and_hms(2025, 8, 14, 9, 30, 0).unwrap();
        let status = vec![
            ResourceStatusRow::region_total("us-east-1", InstanceCounts::new(6, 1, 0), at),
            ResourceStatusRow::zone("us-east-1", "a", InstanceCounts::new(3, 1, 0), at),
            ResourceStatusRow::zone("us-east-1", "b", InstanceCounts::new(2, 0, 0), at),
            ResourceStatusRow::region_total("eu-west-1", InstanceCounts::new(1, 0, 0), at),
        ];
        let month = MonthYear::parse("2025-08").unwrap();
        let costs = vec![
            CostRow::month_total(month, 10.0, at),
            CostRow::service(month, "EC2", 6.0, Some(60.0), at),
            CostRow::service(month, "S3", 4.0, Some(60.0), at),
        ];

        let report = check_feeds(&status, &costs);

        assert_eq!(report.regions.len(), 2);
        assert!(report.regions[1].check.is_mismatch());
        assert_eq!(report.regions[0].check, TotalCheck::Unchecked);
        assert_eq!(report.months[0].check, TotalCheck::Agreed);
        assert!(report.months[0].pct_overflow);
        assert_eq!(report.mismatches(), 2);
        assert!(!report.is_consistent());
    }
}
