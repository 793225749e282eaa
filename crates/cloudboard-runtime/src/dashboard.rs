//! Refresh sequencing for one dashboard.
//!
//! Every fetch is stamped with a [`FetchTicket`] when it starts. A delivered
//! snapshot is applied only if its ticket is newer than the last applied one,
//! so a slow fetch that finishes after a faster, later one is discarded
//! instead of overwriting fresher data.

use crate::{FeedSnapshot, FeedSource, Result};
use cloudboard_engine::{
    DashboardView, FeedReport, SelectorState, SyncOutcome, ViewSelector, check_feeds,
};
use cloudboard_types::{CloudProvider, MonthYear, RegionScope};
use serde::Serialize;

/// Monotonic id of a fetch, ordered by start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct FetchSequencer {
    issued: u64,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    pub fn last_issued(&self) -> Option<FetchTicket> {
        (self.issued > 0).then_some(FetchTicket(self.issued))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Applied(SyncOutcome),
    /// A newer fetch was already applied; the snapshot was dropped
    Stale {
        ticket: FetchTicket,
        current: FetchTicket,
    },
}

impl Delivery {
    pub fn is_applied(&self) -> bool {
        matches!(self, Delivery::Applied(_))
    }
}

/// Latest snapshot plus the selector that filters it.
#[derive(Debug)]
pub struct Dashboard {
    cloud: Option<CloudProvider>,
    selector: ViewSelector,
    snapshot: Option<FeedSnapshot>,
    sequencer: FetchSequencer,
    applied: Option<FetchTicket>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Dashboard {
    pub fn new(cloud: Option<CloudProvider>) -> Self {
        Self {
            cloud,
            selector: ViewSelector::new(),
            snapshot: None,
            sequencer: FetchSequencer::new(),
            applied: None,
        }
    }

    pub fn cloud(&self) -> Option<CloudProvider> {
        self.cloud
    }

    pub fn state(&self) -> SelectorState {
        self.selector.state()
    }

    pub fn selector(&self) -> &ViewSelector {
        &self.selector
    }

    pub fn snapshot(&self) -> Option<&FeedSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn last_applied(&self) -> Option<FetchTicket> {
        self.applied
    }

    /// Stamp a fetch that is about to start
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.sequencer.issue()
    }

    /// Apply a finished fetch unless a newer one already landed.
    pub fn deliver(&mut self, ticket: FetchTicket, snapshot: FeedSnapshot) -> Delivery {
        if let Some(current) = self.applied
            && ticket <= current
        {
            tracing::debug!(
                ticket = ticket.sequence(),
                current = current.sequence(),
                "discarding stale fetch"
            );
            return Delivery::Stale { ticket, current };
        }

        let outcome = self.selector.sync(&snapshot.status, &snapshot.costs);
        tracing::debug!(
            ticket = ticket.sequence(),
            transition = ?outcome.transition,
            resets = outcome.resets.len(),
            "snapshot applied"
        );
        self.snapshot = Some(snapshot);
        self.applied = Some(ticket);
        Delivery::Applied(outcome)
    }

    /// Fetch from `source` and deliver in one step.
    ///
    /// A failed fetch leaves the current snapshot and filters untouched.
    pub fn refresh(&mut self, source: &dyn FeedSource) -> Result<Delivery> {
        let ticket = self.begin_fetch();
        match source.fetch() {
            Ok(snapshot) => Ok(self.deliver(ticket, snapshot)),
            Err(err) => {
                tracing::warn!(source = %source.describe(), error = %err, "refresh failed");
                Err(err)
            }
        }
    }

    pub fn set_region(&mut self, region: RegionScope) -> bool {
        self.selector.set_region(region)
    }

    pub fn set_month(&mut self, month: MonthYear) -> bool {
        self.selector.set_month(month)
    }

    /// View for the current filters; `None` until the first snapshot lands
    pub fn view(&self) -> Option<DashboardView> {
        let snapshot = self.snapshot.as_ref()?;
        self.selector
            .current_view(&snapshot.status, &snapshot.costs)
    }

    /// Consistency report over the current snapshot
    pub fn report(&self) -> Option<FeedReport> {
        let snapshot = self.snapshot.as_ref()?;
        Some(check_feeds(&snapshot.status, &snapshot.costs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, MemoryFeed};
    use cloudboard_engine::{FilterReset, Transition};
    use cloudboard_testing::{CostFeedBuilder, SampleFeeds, StatusFeedBuilder};

    fn aws_snapshot() -> FeedSnapshot {
        let sample = SampleFeeds::aws();
        FeedSnapshot::new(sample.status.build(), sample.costs.build())
    }

    fn gcp_snapshot() -> FeedSnapshot {
        let sample = SampleFeeds::gcp();
        FeedSnapshot::new(sample.status.build(), sample.costs.build())
    }

    struct FailingFeed;

    impl FeedSource for FailingFeed {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        fn fetch(&self) -> Result<FeedSnapshot> {
            Err(Error::Config("feed offline".to_string()))
        }
    }

    #[test]
    fn test_tickets_are_monotonic() {
        let mut sequencer = FetchSequencer::new();
        assert_eq!(sequencer.last_issued(), None);
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(first < second);
        assert_eq!(sequencer.last_issued(), Some(second));
    }

    #[test]
    fn test_view_is_none_until_first_delivery() {
        let mut dashboard = Dashboard::default();
        assert!(dashboard.view().is_none());
        assert!(!dashboard.set_region(RegionScope::parse("us-east-1")));

        let ticket = dashboard.begin_fetch();
        let delivery = dashboard.deliver(ticket, aws_snapshot());
        assert!(matches!(
            delivery,
            Delivery::Applied(SyncOutcome {
                transition: Transition::Initialized,
                ..
            })
        ));

        let view = dashboard.view().unwrap();
        assert!(view.filter.region.is_all());
        assert_eq!(view.filter.month, Some(MonthYear::parse("2025-08").unwrap()));
        assert_eq!(dashboard.state(), SelectorState::Ready);
    }

    #[test]
    fn test_late_response_from_older_fetch_is_discarded() {
        let mut dashboard = Dashboard::default();
        let slow = dashboard.begin_fetch();
        let fast = dashboard.begin_fetch();

        assert!(dashboard.deliver(fast, gcp_snapshot()).is_applied());
        let late = dashboard.deliver(slow, aws_snapshot());

        assert_eq!(
            late,
            Delivery::Stale {
                ticket: slow,
                current: fast
            }
        );
        assert_eq!(dashboard.last_applied(), Some(fast));
        assert_eq!(dashboard.snapshot().map(|s| s.status.len()), Some(3));
        let view = dashboard.view().unwrap();
        assert_eq!(view.regions.len(), 2);
        assert_eq!(view.regions[0].as_str(), "europe-west1");
    }

    #[test]
    fn test_snapshot_replaces_rows_wholesale() {
        let mut dashboard = Dashboard::default();
        let first = dashboard.begin_fetch();
        dashboard.deliver(first, aws_snapshot());
        assert!(dashboard.set_region(RegionScope::parse("us-east-1")));

        let status = StatusFeedBuilder::new()
            .zone("eu-west-1", "eu-west-1a", 1, 0, 0)
            .build();
        let costs = CostFeedBuilder::new()
            .month("2025-08")
            .service("EC2", 2.0, 100.0)
            .build();
        let second = dashboard.begin_fetch();
        let delivery = dashboard.deliver(second, FeedSnapshot::new(status, costs));

        let Delivery::Applied(outcome) = delivery else {
            panic!("expected applied delivery");
        };
        assert_eq!(outcome.transition, Transition::SetsChanged);
        assert!(outcome.resets.iter().any(|reset| matches!(
            reset,
            FilterReset::Region { previous } if previous.as_str() == "us-east-1"
        )));

        let view = dashboard.view().unwrap();
        assert!(view.filter.region.is_all());
        assert_eq!(view.status.counts.running, 1);
        assert_eq!(view.cost.services.len(), 1);
        assert_eq!(view.months.len(), 1);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_snapshot() {
        let mut dashboard = Dashboard::new(Some(CloudProvider::Aws));
        let sample = SampleFeeds::aws();
        let feed = MemoryFeed::new(sample.status.build(), sample.costs.build());

        assert!(dashboard.refresh(&feed).unwrap().is_applied());
        let before = dashboard.view();

        assert!(dashboard.refresh(&FailingFeed).is_err());
        assert_eq!(dashboard.view(), before);
        assert_eq!(dashboard.cloud(), Some(CloudProvider::Aws));
    }

    #[test]
    fn test_report_reflects_current_snapshot() {
        let mut dashboard = Dashboard::default();
        assert!(dashboard.report().is_none());

        let ticket = dashboard.begin_fetch();
        dashboard.deliver(ticket, aws_snapshot());
        let report = dashboard.report().unwrap();
        assert!(report.is_consistent());
        assert_eq!(report.months.len(), 3);
    }
}
