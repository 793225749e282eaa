use crate::reconcile::{TotalCheck, TotalSource, check_amounts, resolve_total};
use chrono::{DateTime, Utc};
use cloudboard_types::{CostRow, MonthYear};
use serde::{Deserialize, Serialize};

/// Cost rollup for a single billing month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// `None` only when no month could be selected (empty cost feed)
    pub month: Option<MonthYear>,
    pub total: f64,
    /// Services with a non-zero contribution, in feed order
    pub services: Vec<CostRow>,
    pub source: TotalSource,
    pub check: TotalCheck<f64>,
    pub retrieved_at: Option<DateTime<Utc>>,
}

impl CostSummary {
    pub fn empty(month: Option<MonthYear>) -> Self {
        Self {
            month,
            total: 0.0,
            services: Vec::new(),
            source: TotalSource::Empty,
            check: TotalCheck::Unchecked,
            retrieved_at: None,
        }
    }

    /// Percentage of the month total attributable to `row`
    ///
    /// Falls back to `amount / total` when the feed left the percentage out.
    pub fn share_of(&self, row: &CostRow) -> f64 {
        match row.pct_of_total {
            Some(pct) => pct,
            None if self.total > 0.0 => row.total_amount / self.total * 100.0,
            None => 0.0,
        }
    }

    /// Sum of the displayed services' shares; below 100 when small services
    /// were omitted upstream or filtered out here
    pub fn covered_share(&self) -> f64 {
        self.services.iter().map(|row| self.share_of(row)).sum()
    }
}

/// Roll up cost rows for `month`.
///
/// The month's `TOTAL` row is trusted when present; otherwise the total is
/// the sum of every service row for the month (zero-cost ones included).
/// When both exist they are compared within [`crate::COST_EPSILON`].
pub fn compute_cost_summary(rows: &[CostRow], month: &MonthYear) -> CostSummary {
    let month_rows: Vec<&CostRow> = rows.iter().filter(|row| &row.month == month).collect();
    if month_rows.is_empty() {
        tracing::debug!(month = %month, "no cost rows for month");
        return CostSummary::empty(Some(*month));
    }

    let supplied = month_rows
        .iter()
        .find(|row| row.is_total())
        .map(|row| row.total_amount);

    let service_rows: Vec<&CostRow> = month_rows
        .iter()
        .copied()
        .filter(|row| !row.is_total())
        .collect();
    let computed = (!service_rows.is_empty())
        .then(|| service_rows.iter().map(|row| row.total_amount).sum::<f64>());

    let Some((total, source)) = resolve_total(supplied, computed) else {
        return CostSummary::empty(Some(*month));
    };

    if source == TotalSource::Computed {
        tracing::debug!(month = %month, "month TOTAL row missing, summing service rows");
    }

    let check = check_amounts(supplied, computed);
    match &check {
        TotalCheck::Mismatch { supplied, computed } => tracing::warn!(
            month = %month,
            supplied,
            computed,
            "service costs exceed the supplied month total"
        ),
        TotalCheck::Partial { supplied, computed } => tracing::debug!(
            month = %month,
            supplied,
            computed,
            "service rows cover part of the month total"
        ),
        _ => {}
    }

    CostSummary {
        month: Some(*month),
        total,
        services: service_rows
            .into_iter()
            .filter(|row| row.contributes())
            .cloned()
            .collect(),
        source,
        check,
        retrieved_at: month_rows.iter().map(|row| row.retrieved_at).max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::COST_EPSILON;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 14, 9, 30, 0).unwrap()
    }

    fn aug() -> MonthYear {
        MonthYear::parse("2025-08").unwrap()
    }

    fn names(summary: &CostSummary) -> Vec<String> {
        summary
            .services
            .iter()
            .filter_map(|row| row.line.service().map(ToString::to_string))
            .collect()
    }

    #[test]
    fn test_total_row_is_trusted_and_zero_services_dropped() {
        let rows = vec![
            CostRow::month_total(aug(), 100.0, at()),
            CostRow::service(aug(), "EC2", 80.0, Some(80.0), at()),
            CostRow::service(aug(), "S3", 0.0, Some(0.0), at()),
        ];

        let summary = compute_cost_summary(&rows, &aug());
        assert_eq!(summary.total, 100.0);
        assert_eq!(summary.source, TotalSource::Supplied);
        assert_eq!(names(&summary), vec!["EC2"]);
        assert!(matches!(summary.check, TotalCheck::Partial { .. }));
    }

    #[test]
    fn test_supplied_and_computed_totals_agree_for_complete_feed() {
        let rows = vec![
            CostRow::month_total(aug(), 9.47, at()),
            CostRow::service(aug(), "EC2", 4.12, Some(43.51), at()),
            CostRow::service(aug(), "S3", 2.01, Some(21.22), at()),
            CostRow::service(aug(), "RDS", 3.34, Some(35.27), at()),
        ];

        let summary = compute_cost_summary(&rows, &aug());
        let summed: f64 = rows.iter().skip(1).map(|r| r.total_amount).sum();

        assert!((summary.total - summed).abs() <= COST_EPSILON);
        assert_eq!(summary.check, TotalCheck::Agreed);
        assert_eq!(names(&summary), vec!["EC2", "S3", "RDS"]);
    }

    #[test]
    fn test_missing_total_row_sums_services() {
        let rows = vec![
            CostRow::service(aug(), "Compute Engine", 120.5, None, at()),
            CostRow::service(aug(), "BigQuery", 30.25, None, at()),
            CostRow::service(aug(), "Pub/Sub", 0.0, None, at()),
        ];

        let summary = compute_cost_summary(&rows, &aug());
        assert_eq!(summary.total, 150.75);
        assert_eq!(summary.source, TotalSource::Computed);
        assert_eq!(names(&summary), vec!["Compute Engine", "BigQuery"]);

        let share = summary.share_of(&summary.services[0]);
        assert!((share - 79.933).abs() < 0.001);
    }

    #[test]
    fn test_other_months_are_ignored() {
        let july = MonthYear::parse("2025-07").unwrap();
        let rows = vec![
            CostRow::month_total(july, 50.0, at()),
            CostRow::service(july, "EC2", 50.0, Some(100.0), at()),
            CostRow::service(aug(), "EC2", 10.0, Some(100.0), at()),
        ];

        let summary = compute_cost_summary(&rows, &aug());
        assert_eq!(summary.total, 10.0);
        assert_eq!(summary.services.len(), 1);
    }

    #[test]
    fn test_empty_month() {
        let summary = compute_cost_summary(&[], &aug());
        assert_eq!(summary.total, 0.0);
        assert!(summary.services.is_empty());
        assert_eq!(summary.source, TotalSource::Empty);
    }

    #[test]
    fn test_excess_is_a_mismatch() {
        let rows = vec![
            CostRow::month_total(aug(), 10.0, at()),
            CostRow::service(aug(), "EC2", 12.0, None, at()),
        ];

        let summary = compute_cost_summary(&rows, &aug());
        assert_eq!(summary.total, 10.0);
        assert!(summary.check.is_mismatch());
    }
}
