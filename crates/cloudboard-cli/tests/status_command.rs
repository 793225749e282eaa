//! Status Command Tests
//!
//! `cloudboard status` rolls instance counts up for ALL or one region.

use anyhow::Result;
use cloudboard_testing::{SampleFeeds, StatusFeedBuilder, TestWorld, assertions};

#[test]
fn test_status_all_uses_supplied_grand_total() -> Result<()> {
    let world = TestWorld::new().with_feeds("aws", SampleFeeds::aws());

    let result = world.run(&["--format", "json", "status"])?;
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json()?;
    let content = &json["content"];
    assertions::assert_counts(content, 10, 3, 1)?;
    assert_eq!(content["cloud"], "AWS");
    assert_eq!(content["source"], "supplied");
    assert_eq!(content["check"]["status"], "agreed");

    let regions: Vec<&str> = content["regions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["region"].as_str())
        .collect();
    assert_eq!(regions, vec!["us-east-1", "eu-west-1"]);
    assert!(json.get("badge").is_none());

    Ok(())
}

#[test]
fn test_status_region_lists_zones() -> Result<()> {
    let world = TestWorld::new().with_feeds("aws", SampleFeeds::aws());

    let result = world.run(&["--format", "json", "status", "--region", "us-east-1"])?;
    assert!(result.success());

    let json = result.json()?;
    assertions::assert_counts(&json["content"], 5, 1, 0)?;
    assertions::assert_zone_names(&json["content"], &["us-east-1a", "us-east-1b"])?;

    Ok(())
}

#[test]
fn test_status_all_without_totals_sums_regions() -> Result<()> {
    let world = TestWorld::new().with_feeds("gcp", SampleFeeds::gcp());

    let result = world.run(&["--format", "json", "status"])?;
    assert!(result.success());

    let json = result.json()?;
    assertions::assert_counts(&json["content"], 9, 1, 1)?;
    assert_eq!(json["content"]["source"], "computed");
    assert_eq!(json["content"]["check"]["status"], "unchecked");

    Ok(())
}

#[test]
fn test_status_unknown_region_is_empty_with_tip() -> Result<()> {
    let world = TestWorld::new().with_feeds("aws", SampleFeeds::aws());

    let result = world.run(&["--format", "json", "status", "--region", "ap-south-1"])?;
    assert!(result.success());

    let json = result.json()?;
    assertions::assert_counts(&json["content"], 0, 0, 0)?;
    assertions::assert_zone_names(&json["content"], &[])?;
    assert_eq!(json["badge"]["level"], "notice");
    assert_eq!(json["suggestions"][0]["command"], "cloudboard regions");

    Ok(())
}

#[test]
fn test_status_region_total_mismatch_warns() -> Result<()> {
    let feeds = SampleFeeds {
        status: StatusFeedBuilder::new()
            .cloud("AWS")
            .zone("us-east-1", "us-east-1a", 3, 0, 0)
            .region_total("us-east-1", 5, 0, 0),
        costs: SampleFeeds::aws().costs,
    };
    let world = TestWorld::new().with_feeds("aws", feeds);

    let result = world.run(&["--format", "json", "status", "--region", "us-east-1"])?;
    assert!(result.success());

    let json = result.json()?;
    // the supplied row wins even when it disagrees
    assertions::assert_counts(&json["content"], 5, 0, 0)?;
    assert_eq!(json["content"]["check"]["status"], "mismatch");
    assert_eq!(json["content"]["check"]["computed"]["running"], 3);
    assert_eq!(json["badge"]["level"], "mismatch");
    assert_eq!(json["suggestions"][0]["command"], "cloudboard check");

    Ok(())
}

#[test]
fn test_status_selects_cloud_by_flag() -> Result<()> {
    let world = TestWorld::new()
        .with_feeds("aws", SampleFeeds::aws())
        .with_feeds("gcp", SampleFeeds::gcp());

    let default = world.run(&["--format", "json", "status"])?;
    assert_eq!(default.json()?["content"]["cloud"], "AWS");

    let gcp = world.run(&["--format", "json", "--cloud", "gcp", "status"])?;
    assert!(gcp.success());
    let json = gcp.json()?;
    assert_eq!(json["content"]["cloud"], "GCP");
    assertions::assert_counts(&json["content"], 9, 1, 1)?;

    Ok(())
}

#[test]
fn test_status_plain_output() -> Result<()> {
    let world = TestWorld::new().with_feeds("aws", SampleFeeds::aws());

    let result = world.run(&["status", "--region", "eu-west-1"])?;
    assert!(result.success());
    assert!(result.stdout().contains("AWS"));
    assert!(result.stdout().contains("eu-west-1c"));
    assert!(result.stdout().contains("Running"));

    Ok(())
}
