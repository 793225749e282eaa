use crate::{Error, Result};
use chrono::{DateTime, Utc};
use cloudboard_types::{
    CloudProvider, CostRecord, CostRow, ResourceStatusRow, StatusRecord, cost_rows_from_records,
    parse_cost_records, parse_status_records, status_rows_from_records,
};
use std::path::{Path, PathBuf};

/// One complete, consistent pair of row sets from a single fetch.
///
/// Snapshots replace each other wholesale; rows from different fetches are
/// never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub status: Vec<ResourceStatusRow>,
    pub costs: Vec<CostRow>,
    pub fetched_at: DateTime<Utc>,
}

impl FeedSnapshot {
    pub fn new(status: Vec<ResourceStatusRow>, costs: Vec<CostRow>) -> Self {
        Self {
            status,
            costs,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.costs.is_empty()
    }
}

/// Anything that can produce a fresh snapshot of both feeds.
pub trait FeedSource {
    /// Short human-readable origin, used in logs
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<FeedSnapshot>;

    /// Files whose modification should trigger a refresh
    fn watch_paths(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// Reads the status and cost feeds from JSON files on disk.
///
/// When a cloud is set, records whose `cloud` column names a different
/// provider are dropped; records without the column are kept.
#[derive(Debug, Clone)]
pub struct FileFeed {
    status_path: PathBuf,
    cost_path: PathBuf,
    cloud: Option<CloudProvider>,
}

impl FileFeed {
    pub fn new(status_path: impl Into<PathBuf>, cost_path: impl Into<PathBuf>) -> Self {
        Self {
            status_path: status_path.into(),
            cost_path: cost_path.into(),
            cloud: None,
        }
    }

    pub fn for_cloud(mut self, cloud: CloudProvider) -> Self {
        self.cloud = Some(cloud);
        self
    }

    pub fn status_path(&self) -> &Path {
        &self.status_path
    }

    pub fn cost_path(&self) -> &Path {
        &self.cost_path
    }

    fn read(path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|source| Error::FeedRead {
            path: path.to_path_buf(),
            source,
        })
    }

    fn keeps(&self, record_cloud: Option<&str>) -> bool {
        match (self.cloud, record_cloud) {
            (Some(cloud), Some(label)) => cloud.matches(label),
            _ => true,
        }
    }

    fn load_status(&self) -> Result<Vec<ResourceStatusRow>> {
        let path = &self.status_path;
        let parse_err = |source| Error::FeedParse {
            path: path.clone(),
            source,
        };

        let records: Vec<StatusRecord> = parse_status_records(&Self::read(path)?)
            .map_err(parse_err)?
            .into_iter()
            .filter(|record| self.keeps(record.cloud.as_deref()))
            .collect();
        status_rows_from_records(records).map_err(parse_err)
    }

    fn load_costs(&self) -> Result<Vec<CostRow>> {
        let path = &self.cost_path;
        let parse_err = |source| Error::FeedParse {
            path: path.clone(),
            source,
        };

        let records: Vec<CostRecord> = parse_cost_records(&Self::read(path)?)
            .map_err(parse_err)?
            .into_iter()
            .filter(|record| self.keeps(record.cloud.as_deref()))
            .collect();
        cost_rows_from_records(records).map_err(parse_err)
    }
}

impl FeedSource for FileFeed {
    fn describe(&self) -> String {
        format!(
            "{} + {}",
            self.status_path.display(),
            self.cost_path.display()
        )
    }

    fn fetch(&self) -> Result<FeedSnapshot> {
        let status = self.load_status()?;
        let costs = self.load_costs()?;
        tracing::info!(
            cloud = self.cloud.map(|c| c.key()),
            status_rows = status.len(),
            cost_rows = costs.len(),
            "feeds loaded"
        );
        Ok(FeedSnapshot::new(status, costs))
    }

    fn watch_paths(&self) -> Vec<PathBuf> {
        vec![self.status_path.clone(), self.cost_path.clone()]
    }
}

/// In-memory feed, for embedding callers that already hold rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeed {
    status: Vec<ResourceStatusRow>,
    costs: Vec<CostRow>,
}

impl MemoryFeed {
    pub fn new(status: Vec<ResourceStatusRow>, costs: Vec<CostRow>) -> Self {
        Self { status, costs }
    }
}

impl FeedSource for MemoryFeed {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn fetch(&self) -> Result<FeedSnapshot> {
        Ok(FeedSnapshot::new(self.status.clone(), self.costs.clone()))
    }
}
