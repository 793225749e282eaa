use crate::cost::{CostSummary, compute_cost_summary};
use crate::status::{StatusSummary, compute_status_summary};
use cloudboard_types::{CostRow, MonthYear, RegionName, RegionScope, ResourceStatusRow};
use serde::{Deserialize, Serialize};

/// User-chosen filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub region: RegionScope,
    /// `None` only while the cost feed has no months at all
    pub month: Option<MonthYear>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorState {
    /// No data delivered yet; filters are undefined
    Loading,
    /// Data present and filters valid
    Ready,
}

/// How a delivered fetch affected the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// First delivery: `Loading -> Ready` with default filters
    Initialized,
    /// Available regions or months changed; filters were re-validated
    SetsChanged,
    Unchanged,
}

/// A filter value that no longer exists in the latest data and was reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum FilterReset {
    Region {
        previous: RegionName,
    },
    Month {
        previous: MonthYear,
        replacement: Option<MonthYear>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub transition: Transition,
    pub resets: Vec<FilterReset>,
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub filter: FilterState,
    pub regions: Vec<RegionName>,
    pub months: Vec<MonthYear>,
    pub status: StatusSummary,
    pub cost: CostSummary,
}

/// Distinct real regions in the status feed, sorted ascending.
///
/// The cross-region total row contributes nothing; selection controls add
/// their own `ALL` entry.
pub fn available_regions(rows: &[ResourceStatusRow]) -> Vec<RegionName> {
    let mut regions: Vec<RegionName> = rows
        .iter()
        .filter_map(|row| row.region().cloned())
        .collect();
    regions.sort();
    regions.dedup();
    regions
}

/// Distinct months in the cost feed, most recent first.
pub fn available_months(rows: &[CostRow]) -> Vec<MonthYear> {
    let mut months: Vec<MonthYear> = rows.iter().map(|row| row.month).collect();
    months.sort_by(|a, b| b.cmp(a));
    months.dedup();
    months
}

/// Owns the filter state and derives views from the latest row sets.
///
/// Row sets are not stored here; the refresh handler passes the current ones
/// to [`ViewSelector::sync`] after every delivery and to
/// [`ViewSelector::current_view`] on every read.
#[derive(Debug, Clone)]
pub struct ViewSelector {
    state: SelectorState,
    filter: FilterState,
    regions: Vec<RegionName>,
    months: Vec<MonthYear>,
}

impl Default for ViewSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewSelector {
    pub fn new() -> Self {
        Self {
            state: SelectorState::Loading,
            filter: FilterState::default(),
            regions: Vec::new(),
            months: Vec::new(),
        }
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn filter(&self) -> Option<&FilterState> {
        match self.state {
            SelectorState::Loading => None,
            SelectorState::Ready => Some(&self.filter),
        }
    }

    /// Regions known from the last delivery
    pub fn regions(&self) -> &[RegionName] {
        &self.regions
    }

    /// Months known from the last delivery, most recent first
    pub fn months(&self) -> &[MonthYear] {
        &self.months
    }

    /// Select a region. Returns `false` (and ignores the request) while loading.
    pub fn set_region(&mut self, region: RegionScope) -> bool {
        if self.state == SelectorState::Loading {
            tracing::debug!(region = %region, "region selection ignored while loading");
            return false;
        }
        self.filter.region = region;
        true
    }

    /// Select a month. Returns `false` (and ignores the request) while loading.
    pub fn set_month(&mut self, month: MonthYear) -> bool {
        if self.state == SelectorState::Loading {
            tracing::debug!(month = %month, "month selection ignored while loading");
            return false;
        }
        self.filter.month = Some(month);
        true
    }

    /// Absorb a freshly delivered pair of row sets.
    ///
    /// The first call moves the selector to `Ready` with the default filters
    /// (`ALL` regions, most recent month). Later calls re-validate the filters
    /// whenever the available regions or months changed, resetting any value
    /// that disappeared.
    pub fn sync(&mut self, status_rows: &[ResourceStatusRow], cost_rows: &[CostRow]) -> SyncOutcome {
        let regions = available_regions(status_rows);
        let months = available_months(cost_rows);

        if self.state == SelectorState::Loading {
            self.filter = FilterState {
                region: RegionScope::All,
                month: months.first().copied(),
            };
            self.regions = regions;
            self.months = months;
            self.state = SelectorState::Ready;
            tracing::debug!(filter = ?self.filter, "selector ready");
            return SyncOutcome {
                transition: Transition::Initialized,
                resets: Vec::new(),
            };
        }

        if regions == self.regions && months == self.months {
            return SyncOutcome {
                transition: Transition::Unchanged,
                resets: Vec::new(),
            };
        }

        self.regions = regions;
        self.months = months;
        let resets = self.revalidate();
        for reset in &resets {
            tracing::info!(?reset, "filter no longer present in data, reset to default");
        }

        SyncOutcome {
            transition: Transition::SetsChanged,
            resets,
        }
    }

    fn revalidate(&mut self) -> Vec<FilterReset> {
        let mut resets = Vec::new();

        if let RegionScope::Specific(region) = &self.filter.region
            && !self.regions.contains(region)
        {
            resets.push(FilterReset::Region {
                previous: region.clone(),
            });
            self.filter.region = RegionScope::All;
        }

        let latest = self.months.first().copied();
        match self.filter.month {
            Some(month) if !self.months.contains(&month) => {
                resets.push(FilterReset::Month {
                    previous: month,
                    replacement: latest,
                });
                self.filter.month = latest;
            }
            None => self.filter.month = latest,
            Some(_) => {}
        }

        resets
    }

    /// Derive the view for the current filters; `None` while loading.
    pub fn current_view(
        &self,
        status_rows: &[ResourceStatusRow],
        cost_rows: &[CostRow],
    ) -> Option<DashboardView> {
        let filter = self.filter()?.clone();

        let status = compute_status_summary(status_rows, &filter.region);
        let cost = match &filter.month {
            Some(month) => compute_cost_summary(cost_rows, month),
            None => CostSummary::empty(None),
        };

        Some(DashboardView {
            regions: self.regions.clone(),
            months: self.months.clone(),
            filter,
            status,
            cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cloudboard_types::InstanceCounts;

    fn status(regions: &[&str]) -> Vec<ResourceStatusRow> {
        let at = Utc.with_ymd_and_hms(2025, 8, 14, 9, 30, 0).unwrap();
        regions
            .iter()
            .map(|r| ResourceStatusRow::zone(*r, "a", InstanceCounts::new(1, 0, 0), at))
            .collect()
    }

    fn costs(months: &[&str]) -> Vec<CostRow> {
        let at = Utc.with_ymd_and_hms(2025, 8, 14, 9, 30, 0).unwrap();
        months
            .iter()
            .map(|m| CostRow::service(MonthYear::parse(m).unwrap(), "EC2", 1.0, Some(100.0), at))
            .collect()
    }

    fn month(label: &str) -> MonthYear {
        MonthYear::parse(label).unwrap()
    }

    #[test]
    fn test_available_months_most_recent_first() {
        let months = available_months(&costs(&["2025-06", "2025-08", "2024-12", "2025-08"]));
        assert_eq!(months, vec![month("2025-08"), month("2025-06"), month("2024-12")]);
    }

    #[test]
    fn test_available_regions_sorted_and_distinct() {
        let regions = available_regions(&status(&["us-west-2", "eu-west-1", "us-west-2"]));
        let names: Vec<&str> = regions.iter().map(RegionName::as_str).collect();
        assert_eq!(names, vec!["eu-west-1", "us-west-2"]);
    }

    #[test]
    fn test_loading_until_first_sync() {
        let mut selector = ViewSelector::new();
        assert_eq!(selector.state(), SelectorState::Loading);
        assert!(selector.current_view(&[], &[]).is_none());
        assert!(!selector.set_region(RegionScope::parse("us-east-1")));

        let outcome = selector.sync(&status(&["us-east-1"]), &costs(&["2025-07", "2025-08"]));
        assert_eq!(outcome.transition, Transition::Initialized);
        assert_eq!(selector.state(), SelectorState::Ready);

        let filter = selector.filter().unwrap();
        assert_eq!(filter.region, RegionScope::All);
        assert_eq!(filter.month, Some(month("2025-08")));
    }

    #[test]
    fn test_unchanged_sets_keep_filters() {
        let rows = status(&["us-east-1"]);
        let cost = costs(&["2025-08"]);
        let mut selector = ViewSelector::new();
        selector.sync(&rows, &cost);
        selector.set_region(RegionScope::parse("us-east-1"));

        let outcome = selector.sync(&rows, &cost);
        assert_eq!(outcome.transition, Transition::Unchanged);
        assert_eq!(
            selector.filter().unwrap().region,
            RegionScope::parse("us-east-1")
        );
    }

    #[test]
    fn test_vanished_region_and_month_reset() {
        let mut selector = ViewSelector::new();
        selector.sync(&status(&["us-east-1", "eu-west-1"]), &costs(&["2025-07", "2025-08"]));
        selector.set_region(RegionScope::parse("eu-west-1"));
        selector.set_month(month("2025-07"));

        let outcome = selector.sync(&status(&["us-east-1"]), &costs(&["2025-08", "2025-09"]));
        assert_eq!(outcome.transition, Transition::SetsChanged);
        assert_eq!(
            outcome.resets,
            vec![
                FilterReset::Region {
                    previous: RegionName::from("eu-west-1")
                },
                FilterReset::Month {
                    previous: month("2025-07"),
                    replacement: Some(month("2025-09")),
                },
            ]
        );

        let filter = selector.filter().unwrap();
        assert_eq!(filter.region, RegionScope::All);
        assert_eq!(filter.month, Some(month("2025-09")));
    }

    #[test]
    fn test_surviving_selection_is_kept_when_sets_change() {
        let mut selector = ViewSelector::new();
        selector.sync(&status(&["us-east-1"]), &costs(&["2025-07", "2025-08"]));
        selector.set_month(month("2025-07"));

        let outcome = selector.sync(&status(&["us-east-1"]), &costs(&["2025-07", "2025-08", "2025-09"]));
        assert_eq!(outcome.transition, Transition::SetsChanged);
        assert!(outcome.resets.is_empty());
        assert_eq!(selector.filter().unwrap().month, Some(month("2025-07")));
    }

    #[test]
    fn test_month_defaults_once_costs_arrive() {
        let mut selector = ViewSelector::new();
        selector.sync(&status(&["us-east-1"]), &[]);
        assert_eq!(selector.filter().unwrap().month, None);

        let view = selector.current_view(&status(&["us-east-1"]), &[]).unwrap();
        assert_eq!(view.cost.total, 0.0);
        assert!(view.cost.services.is_empty());

        let outcome = selector.sync(&status(&["us-east-1"]), &costs(&["2025-08"]));
        assert!(outcome.resets.is_empty());
        assert_eq!(selector.filter().unwrap().month, Some(month("2025-08")));
    }

    #[test]
    fn test_current_view_follows_filters() {
        let rows = status(&["us-east-1", "eu-west-1"]);
        let cost = costs(&["2025-07", "2025-08"]);
        let mut selector = ViewSelector::new();
        selector.sync(&rows, &cost);

        let view = selector.current_view(&rows, &cost).unwrap();
        assert_eq!(view.status.counts.running, 2);
        assert_eq!(view.cost.month, Some(month("2025-08")));

        selector.set_region(RegionScope::parse("eu-west-1"));
        let view = selector.current_view(&rows, &cost).unwrap();
        assert_eq!(view.status.counts.running, 1);
        assert_eq!(view.status.zone_breakdown.len(), 1);
        assert_eq!(view.regions.len(), 2);
    }
}
