use super::cost::{cost_notes, present_cost};
use super::pick_badge;
use super::status::{present_status, status_notes};
use crate::presentation::view_models::{
    CommandResultViewModel, DashboardViewModel, FilterResetEntry, WatchFrameViewModel,
};
use cloudboard_engine::{DashboardView, FilterReset};
use cloudboard_runtime::WatchSignal;
use cloudboard_types::{CloudProvider, format_timestamp};
use chrono::{DateTime, Utc};

pub fn present_dashboard(
    view: &DashboardView,
    cloud: Option<CloudProvider>,
    currency: &str,
) -> DashboardViewModel {
    DashboardViewModel {
        cloud: cloud.map(|c| c.display_name().to_string()),
        region: view.filter.region.to_string(),
        month: view.filter.month.map(|m| m.to_string()),
        regions: view.regions.iter().map(|r| r.to_string()).collect(),
        months: view.months.iter().map(|m| m.to_string()).collect(),
        status: present_status(&view.status, cloud),
        cost: present_cost(&view.cost, cloud, currency),
    }
}

pub fn present_dashboard_result(
    view: &DashboardView,
    cloud: Option<CloudProvider>,
    currency: &str,
) -> CommandResultViewModel<DashboardViewModel> {
    let (mut badges, mut tips) = status_notes(&view.status, &view.regions);
    let (cost_badges, cost_tips) = cost_notes(&view.cost, &view.months);
    badges.extend(cost_badges);
    for tip in cost_tips {
        if !tips.iter().any(|t| t.command == tip.command) {
            tips.push(tip);
        }
    }

    CommandResultViewModel::new(present_dashboard(view, cloud, currency))
        .with_optional_badge(pick_badge(badges))
        .with_suggestions(tips)
}

fn present_reset(reset: &FilterReset) -> FilterResetEntry {
    match reset {
        FilterReset::Region { previous } => FilterResetEntry {
            filter: "region".to_string(),
            previous: previous.to_string(),
            replacement: cloudboard_types::ALL_REGIONS.to_string(),
        },
        FilterReset::Month {
            previous,
            replacement,
        } => FilterResetEntry {
            filter: "month".to_string(),
            previous: previous.to_string(),
            replacement: replacement
                .map(|m| m.to_string())
                .unwrap_or_else(|| "none".to_string()),
        },
    }
}

fn trigger_label(signal: &WatchSignal) -> &'static str {
    match signal {
        WatchSignal::Started => "started",
        WatchSignal::FeedChanged(_) => "feed_changed",
        WatchSignal::Tick => "tick",
    }
}

pub fn present_watch_frame(
    view: &DashboardView,
    signal: &WatchSignal,
    fetched_at: &DateTime<Utc>,
    resets: &[FilterReset],
    cloud: Option<CloudProvider>,
    currency: &str,
) -> CommandResultViewModel<WatchFrameViewModel> {
    let dashboard = present_dashboard_result(view, cloud, currency);
    let frame = WatchFrameViewModel {
        trigger: trigger_label(signal).to_string(),
        fetched_at: format_timestamp(fetched_at),
        resets: resets.iter().map(present_reset).collect(),
        dashboard: dashboard.content,
    };

    CommandResultViewModel::new(frame)
        .with_optional_badge(dashboard.badge)
        .with_suggestions(dashboard.suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudboard_engine::ViewSelector;
    use cloudboard_testing::{SampleFeeds, sample_time};
    use cloudboard_types::MonthYear;

    fn aws_view(region: &str) -> DashboardView {
        let sample = SampleFeeds::aws();
        let status = sample.status.build();
        let costs = sample.costs.build();
        let mut selector = ViewSelector::new();
        selector.sync(&status, &costs);
        selector.set_region(cloudboard_types::RegionScope::parse(region));
        selector.current_view(&status, &costs).unwrap()
    }

    #[test]
    fn test_dashboard_carries_filters_and_lists() {
        let view = aws_view("us-east-1");
        let vm = present_dashboard(&view, Some(CloudProvider::Aws), "$");

        assert_eq!(vm.region, "us-east-1");
        assert_eq!(vm.month.as_deref(), Some("2025-08"));
        assert_eq!(vm.regions, vec!["eu-west-1", "us-east-1"]);
        assert_eq!(vm.months, vec!["2025-08", "2025-07", "2025-06"]);
        assert_eq!(vm.status.zones.len(), 2);
        assert_eq!(vm.cost.services.len(), 3);
    }

    #[test]
    fn test_watch_frame_lists_resets() {
        let view = aws_view("ALL");
        let resets = vec![FilterReset::Month {
            previous: MonthYear::parse("2025-05").unwrap(),
            replacement: Some(MonthYear::parse("2025-08").unwrap()),
        }];

        let frame = present_watch_frame(
            &view,
            &WatchSignal::Tick,
            &sample_time(),
            &resets,
            None,
            "$",
        );

        assert_eq!(frame.content.trigger, "tick");
        assert_eq!(frame.content.fetched_at, "2025-08-14T09:30:00Z");
        assert_eq!(frame.content.resets[0].filter, "month");
        assert_eq!(frame.content.resets[0].replacement, "2025-08");
        assert!(frame.badge.is_none());
    }
}
