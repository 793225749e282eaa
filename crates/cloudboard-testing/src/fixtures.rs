//! Row builders and canned feeds.
//!
//! `SampleFeeds::aws()` carries every upstream aggregate row and is internally
//! consistent; `SampleFeeds::gcp()` has no aggregate rows and no percentages,
//! so every total must be computed.

use chrono::{DateTime, TimeZone, Utc};
use cloudboard_types::{
    CostRecord, CostRow, InstanceCounts, MonthYear, RegionName, ResourceStatusRow, StatusRecord,
    StatusScope,
};

/// Snapshot time shared by all fixture rows
pub fn sample_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 14, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[derive(Debug, Clone)]
pub struct StatusFeedBuilder {
    rows: Vec<ResourceStatusRow>,
    cloud: Option<String>,
    retrieved_at: DateTime<Utc>,
}

impl Default for StatusFeedBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusFeedBuilder {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            cloud: None,
            retrieved_at: sample_time(),
        }
    }

    /// Tag every serialized record with a `cloud` column
    pub fn cloud(mut self, label: &str) -> Self {
        self.cloud = Some(label.to_string());
        self
    }

    pub fn zone(mut self, region: &str, zone: &str, running: u64, stopped: u64, terminated: u64) -> Self {
        self.rows.push(ResourceStatusRow::zone(
            region,
            zone,
            InstanceCounts::new(running, stopped, terminated),
            self.retrieved_at,
        ));
        self
    }

    pub fn region_total(mut self, region: &str, running: u64, stopped: u64, terminated: u64) -> Self {
        self.rows.push(ResourceStatusRow::region_total(
            region,
            InstanceCounts::new(running, stopped, terminated),
            self.retrieved_at,
        ));
        self
    }

    pub fn grand_total(mut self, running: u64, stopped: u64, terminated: u64) -> Self {
        self.rows.push(ResourceStatusRow::grand_total(
            InstanceCounts::new(running, stopped, terminated),
            self.retrieved_at,
        ));
        self
    }

    /// Append a total row for every region plus a grand total, all summed
    /// from the zone rows added so far (the layout the upstream collector writes)
    pub fn with_derived_totals(mut self) -> Self {
        let mut regions: Vec<(RegionName, InstanceCounts)> = Vec::new();
        for row in &self.rows {
            if let StatusScope::Zone { region, .. } = &row.scope {
                match regions.iter_mut().find(|(r, _)| r == region) {
                    Some((_, counts)) => *counts += row.counts,
                    None => regions.push((region.clone(), row.counts)),
                }
            }
        }

        let grand: InstanceCounts = regions.iter().map(|(_, counts)| *counts).sum();
        for (region, counts) in regions {
            self.rows
                .push(ResourceStatusRow::region_total(region, counts, self.retrieved_at));
        }
        self.rows
            .push(ResourceStatusRow::grand_total(grand, self.retrieved_at));
        self
    }

    pub fn build(self) -> Vec<ResourceStatusRow> {
        self.rows
    }

    pub fn records(&self) -> Vec<StatusRecord> {
        self.rows
            .iter()
            .map(|row| StatusRecord {
                cloud: self.cloud.clone(),
                ..StatusRecord::from_row(row)
            })
            .collect()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.records()).expect("status records serialize")
    }
}

#[derive(Debug, Clone)]
pub struct CostFeedBuilder {
    rows: Vec<CostRow>,
    cloud: Option<String>,
    month: MonthYear,
    retrieved_at: DateTime<Utc>,
}

impl Default for CostFeedBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CostFeedBuilder {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            cloud: None,
            month: MonthYear::from_date(sample_time().date_naive()),
            retrieved_at: sample_time(),
        }
    }

    pub fn cloud(mut self, label: &str) -> Self {
        self.cloud = Some(label.to_string());
        self
    }

    /// Switch the month subsequent rows are added to
    pub fn month(mut self, label: &str) -> Self {
        self.month = MonthYear::parse(label).expect("fixture month is YYYY-MM");
        self
    }

    pub fn total(mut self, amount: f64) -> Self {
        self.rows
            .push(CostRow::month_total(self.month, amount, self.retrieved_at));
        self
    }

    pub fn service(mut self, name: &str, amount: f64, pct: f64) -> Self {
        self.rows.push(CostRow::service(
            self.month,
            name,
            amount,
            Some(pct),
            self.retrieved_at,
        ));
        self
    }

    pub fn service_without_pct(mut self, name: &str, amount: f64) -> Self {
        self.rows
            .push(CostRow::service(self.month, name, amount, None, self.retrieved_at));
        self
    }

    pub fn build(self) -> Vec<CostRow> {
        self.rows
    }

    pub fn records(&self) -> Vec<CostRecord> {
        self.rows
            .iter()
            .map(|row| CostRecord {
                cloud: self.cloud.clone(),
                ..CostRecord::from_row(row)
            })
            .collect()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.records()).expect("cost records serialize")
    }
}

/// Canned feed pairs.
pub struct SampleFeeds {
    pub status: StatusFeedBuilder,
    pub costs: CostFeedBuilder,
}

impl SampleFeeds {
    /// Two regions with upstream totals, three months of costs with TOTAL rows.
    ///
    /// Status: us-east-1 = 5/1/0, eu-west-1 = 5/2/1, ALL = 10/3/1.
    /// Costs: 2025-06 = 8.90, 2025-07 = 9.45, 2025-08 = 9.72.
    pub fn aws() -> Self {
        let status = StatusFeedBuilder::new()
            .cloud("AWS")
            .zone("us-east-1", "us-east-1a", 3, 1, 0)
            .zone("us-east-1", "us-east-1b", 2, 0, 0)
            .zone("eu-west-1", "eu-west-1a", 4, 0, 1)
            .zone("eu-west-1", "eu-west-1c", 1, 2, 0)
            .with_derived_totals();

        let costs = CostFeedBuilder::new()
            .cloud("AWS")
            .month("2025-06")
            .total(8.90)
            .service("EC2", 4.00, 44.94)
            .service("S3", 1.50, 16.85)
            .service("RDS", 2.40, 26.97)
            .service("Lambda", 1.00, 11.24)
            .month("2025-07")
            .total(9.45)
            .service("EC2", 5.10, 53.97)
            .service("S3", 1.25, 13.23)
            .service("RDS", 3.10, 32.80)
            .service("Lambda", 0.00, 0.00)
            .month("2025-08")
            .total(9.72)
            .service("EC2", 6.02, 61.93)
            .service("S3", 1.20, 12.35)
            .service("RDS", 2.50, 25.72)
            .service("DynamoDB", 0.00, 0.00);

        Self { status, costs }
    }

    /// Zone rows only and service rows without percentages.
    ///
    /// Status: us-central1 = 6/1/1, europe-west1 = 3/0/0.
    /// Costs: 2025-08 = 150.75.
    pub fn gcp() -> Self {
        let status = StatusFeedBuilder::new()
            .cloud("GCP")
            .zone("us-central1", "us-central1-a", 4, 1, 0)
            .zone("us-central1", "us-central1-b", 2, 0, 1)
            .zone("europe-west1", "europe-west1-a", 3, 0, 0);

        let costs = CostFeedBuilder::new()
            .cloud("GCP")
            .month("2025-08")
            .service_without_pct("Compute Engine", 120.50)
            .service_without_pct("BigQuery", 30.25)
            .service_without_pct("Pub/Sub", 0.00);

        Self { status, costs }
    }
}
