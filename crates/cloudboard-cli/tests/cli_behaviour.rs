//! Output formats, help text and error reporting.

use anyhow::Result;
use assert_cmd::Command;
use cloudboard_testing::{SampleFeeds, TestWorld};
use predicates::prelude::*;

#[test]
#[allow(deprecated)]
fn test_help_lists_every_subcommand() {
    let mut cmd = Command::cargo_bin("cloudboard").unwrap();
    cmd.arg("--help").assert().success().stdout(
        predicate::str::contains("status")
            .and(predicate::str::contains("costs"))
            .and(predicate::str::contains("view"))
            .and(predicate::str::contains("regions"))
            .and(predicate::str::contains("months"))
            .and(predicate::str::contains("check"))
            .and(predicate::str::contains("watch")),
    );
}

#[test]
fn test_csv_status_writes_zone_rows() -> Result<()> {
    let world = TestWorld::new().with_feeds("aws", SampleFeeds::aws());

    let result = world.run(&["--format", "csv", "status", "--region", "us-east-1"])?;
    assert!(result.success());

    let mut lines = result.stdout().lines();
    assert_eq!(lines.next(), Some("region,zone,running,stopped,terminated"));
    assert!(result.stdout().contains("us-east-1,us-east-1a,3,1,0"));

    Ok(())
}

#[test]
fn test_csv_costs_lists_services() -> Result<()> {
    let world = TestWorld::new().with_feeds("aws", SampleFeeds::aws());

    let result = world.run(&["--format", "csv", "costs"])?;
    assert!(result.success());
    assert!(result.stdout().starts_with("month,service,amount,pct"));
    assert!(result.stdout().contains("EC2"));

    Ok(())
}

#[test]
fn test_invalid_feed_reports_error() -> Result<()> {
    let world = TestWorld::new().with_raw_feeds("aws", "{ not json", "[]");

    let result = world.run(&["status"])?;
    assert!(!result.success());
    assert!(result.stderr().contains("Error:"));
    assert!(result.stderr().contains("status.json"));

    Ok(())
}

#[test]
fn test_missing_cloud_configuration_reports_error() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["status"])?;
    assert!(!result.success());
    assert!(result.stderr().contains("no clouds configured"));

    Ok(())
}

#[test]
fn test_feed_flags_bypass_configuration() -> Result<()> {
    let source = TestWorld::new().with_feeds("gcp", SampleFeeds::gcp());
    let (status, cost) = source.feed_paths("gcp").unwrap();
    let status = status.display().to_string();
    let cost = cost.display().to_string();

    let world = TestWorld::new();
    let result = world.run(&[
        "--format",
        "json",
        "--status-feed",
        &status,
        "--cost-feed",
        &cost,
        "status",
    ])?;
    assert!(result.success(), "stderr: {}", result.stderr());
    assert_eq!(result.json()?["content"]["running"], 9);

    Ok(())
}
