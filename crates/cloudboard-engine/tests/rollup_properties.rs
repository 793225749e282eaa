use cloudboard_engine::{
    COST_EPSILON, TotalCheck, TotalSource, ViewSelector, available_months, available_regions,
    compute_cost_summary, compute_status_summary,
};
use cloudboard_testing::{CostFeedBuilder, SampleFeeds, StatusFeedBuilder};
use cloudboard_types::{
    CostRow, InstanceCounts, MonthYear, RegionName, RegionScope, ResourceStatusRow, StatusScope,
};

fn month(label: &str) -> MonthYear {
    MonthYear::parse(label).unwrap()
}

fn zone_rows_of<'a>(
    rows: &'a [ResourceStatusRow],
    region: &'a RegionName,
) -> impl Iterator<Item = &'a ResourceStatusRow> {
    rows.iter()
        .filter(move |row| matches!(&row.scope, StatusScope::Zone { region: r, .. } if r == region))
}

#[test]
fn test_every_supplied_region_total_is_returned_verbatim() {
    let rows = SampleFeeds::aws().status.build();

    for row in &rows {
        if let StatusScope::RegionTotal { region } = &row.scope {
            let summary = compute_status_summary(&rows, &RegionScope::Specific(region.clone()));
            assert_eq!(summary.running(), row.counts.running);
            assert_eq!(summary.stopped(), row.counts.stopped);
            assert_eq!(summary.terminated(), row.counts.terminated);
            assert_eq!(summary.source, TotalSource::Supplied);
        }
    }
}

#[test]
fn test_regions_without_total_equal_sum_of_zones() {
    let rows = SampleFeeds::gcp().status.build();

    for region in available_regions(&rows) {
        let expected: InstanceCounts = zone_rows_of(&rows, &region).map(|r| r.counts).sum();
        let summary = compute_status_summary(&rows, &RegionScope::Specific(region.clone()));
        assert_eq!(summary.counts, expected, "region {}", region);
        assert_eq!(summary.source, TotalSource::Computed);
    }
}

#[test]
fn test_us_east_scenario() {
    let rows = StatusFeedBuilder::new()
        .region_total("us-east-1", 5, 1, 0)
        .zone("us-east-1", "a", 3, 1, 0)
        .zone("us-east-1", "b", 2, 0, 0)
        .build();

    let summary = compute_status_summary(&rows, &RegionScope::parse("us-east-1"));

    assert_eq!(summary.counts, InstanceCounts::new(5, 1, 0));
    assert_eq!(summary.zone_breakdown, rows[1..].to_vec());
    assert_eq!(summary.check, TotalCheck::Agreed);
}

#[test]
fn test_all_regions_view_has_no_zone_detail() {
    let rows = SampleFeeds::aws().status.build();
    let summary = compute_status_summary(&rows, &RegionScope::All);

    assert_eq!(summary.counts, InstanceCounts::new(10, 3, 1));
    assert_eq!(summary.source, TotalSource::Supplied);
    assert_eq!(summary.check, TotalCheck::Agreed);
    assert!(summary.zone_breakdown.is_empty());
}

#[test]
fn test_supplied_month_totals_and_computed_sums_agree() {
    let rows = SampleFeeds::aws().costs.build();

    for m in available_months(&rows) {
        let summary = compute_cost_summary(&rows, &m);
        let supplied = rows
            .iter()
            .find(|r| r.month == m && r.is_total())
            .map(|r| r.total_amount)
            .unwrap();
        let computed: f64 = rows
            .iter()
            .filter(|r| r.month == m && !r.is_total())
            .map(|r| r.total_amount)
            .sum();

        assert_eq!(summary.total, supplied);
        assert!(
            (supplied - computed).abs() <= COST_EPSILON,
            "{}: supplied {} vs computed {}",
            m,
            supplied,
            computed
        );
        assert_eq!(summary.check, TotalCheck::Agreed);
    }
}

#[test]
fn test_month_without_total_row_sums_services() {
    let rows = SampleFeeds::gcp().costs.build();
    let summary = compute_cost_summary(&rows, &month("2025-08"));

    assert!((summary.total - 150.75).abs() <= COST_EPSILON);
    assert_eq!(summary.source, TotalSource::Computed);
    assert_eq!(summary.services.len(), 2);
}

#[test]
fn test_feed_with_threshold_omissions_is_tolerated() {
    // Services under a display threshold were dropped upstream
    let rows = CostFeedBuilder::new()
        .month("2025-08")
        .total(50.0)
        .service("EC2", 40.0, 80.0)
        .service("S3", 9.5, 19.0)
        .build();

    let summary = compute_cost_summary(&rows, &month("2025-08"));
    let pct_sum: f64 = summary.services.iter().filter_map(|r| r.pct_of_total).sum();

    assert_eq!(summary.total, 50.0);
    assert!(pct_sum <= 100.0);
    assert!(matches!(summary.check, TotalCheck::Partial { .. }));
    assert!(!summary.check.is_mismatch());
}

#[test]
fn test_ec2_s3_scenario() {
    let rows = CostFeedBuilder::new()
        .month("2025-08")
        .total(100.0)
        .service("EC2", 80.0, 80.0)
        .service("S3", 0.0, 0.0)
        .build();

    let summary = compute_cost_summary(&rows, &month("2025-08"));

    assert_eq!(summary.total, 100.0);
    assert_eq!(summary.services, vec![rows[1].clone()]);
    insta::assert_json_snapshot!(summary, @r###"
    {
      "month": "2025-08",
      "total": 100.0,
      "services": [
        {
          "month": "2025-08",
          "line": {
            "kind": "service",
            "service": "EC2"
          },
          "total_amount": 80.0,
          "pct_of_total": 80.0,
          "retrieved_at": "2025-08-14T09:30:00Z"
        }
      ],
      "source": "supplied",
      "check": {
        "status": "partial",
        "supplied": 100.0,
        "computed": 80.0
      },
      "retrieved_at": "2025-08-14T09:30:00Z"
    }
    "###);
}

#[test]
fn test_empty_cost_feed_for_month() {
    let rows: Vec<CostRow> = Vec::new();
    let summary = compute_cost_summary(&rows, &month("2025-08"));

    assert_eq!(summary.total, 0.0);
    assert!(summary.services.is_empty());
}

#[test]
fn test_first_load_selects_most_recent_month() {
    let feeds = SampleFeeds::aws();
    let status = feeds.status.build();
    let costs = feeds.costs.build();

    let months = available_months(&costs);
    assert_eq!(months, vec![month("2025-08"), month("2025-07"), month("2025-06")]);

    let mut selector = ViewSelector::new();
    selector.sync(&status, &costs);
    assert_eq!(selector.filter().unwrap().month, Some(months[0]));
}

#[test]
fn test_region_disappearing_resets_to_all() {
    let feeds = SampleFeeds::aws();
    let status = feeds.status.build();
    let costs = feeds.costs.build();

    let mut selector = ViewSelector::new();
    selector.sync(&status, &costs);
    selector.set_region(RegionScope::parse("eu-west-1"));

    let without_eu: Vec<ResourceStatusRow> = status
        .into_iter()
        .filter(|row| row.region().map(RegionName::as_str) != Some("eu-west-1"))
        .collect();
    let outcome = selector.sync(&without_eu, &costs);

    assert_eq!(outcome.resets.len(), 1);
    assert_eq!(selector.filter().unwrap().region, RegionScope::All);

    let view = selector.current_view(&without_eu, &costs).unwrap();
    assert!(view.status.zone_breakdown.is_empty());
}

#[test]
fn test_huge_zone_counts_saturate() {
    let json = format!(
        r#"[
          {{"region": "us-east-1", "az": "us-east-1a", "running": {max}, "stopped": 0, "terminated": 0, "retrieved_at": "2025-08-14T09:30:00Z"}},
          {{"region": "us-east-1", "az": "us-east-1b", "running": 1, "stopped": 2, "terminated": 0, "retrieved_at": "2025-08-14T09:30:00Z"}}
        ]"#,
        max = u64::MAX
    );
    let rows = cloudboard_types::parse_status_feed(&json).unwrap();

    let region = compute_status_summary(&rows, &RegionScope::parse("us-east-1"));
    assert_eq!(region.counts, InstanceCounts::new(u64::MAX, 2, 0));
    assert_eq!(region.source, TotalSource::Computed);

    let all = compute_status_summary(&rows, &RegionScope::All);
    assert_eq!(all.running(), u64::MAX);
}
