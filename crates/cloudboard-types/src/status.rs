use crate::{RegionName, ZoneName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Instance/VM counts by lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceCounts {
    pub running: u64,
    pub stopped: u64,
    pub terminated: u64,
}

impl InstanceCounts {
    pub const ZERO: InstanceCounts = InstanceCounts {
        running: 0,
        stopped: 0,
        terminated: 0,
    };

    pub fn new(running: u64, stopped: u64, terminated: u64) -> Self {
        Self {
            running,
            stopped,
            terminated,
        }
    }

    /// Sum of all three states, saturating at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.running
            .saturating_add(self.stopped)
            .saturating_add(self.terminated)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Feeds carry arbitrary `u64` counts, so sums saturate instead of overflowing
impl Add for InstanceCounts {
    type Output = InstanceCounts;

    fn add(self, rhs: Self) -> Self::Output {
        InstanceCounts {
            running: self.running.saturating_add(rhs.running),
            stopped: self.stopped.saturating_add(rhs.stopped),
            terminated: self.terminated.saturating_add(rhs.terminated),
        }
    }
}

impl AddAssign for InstanceCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for InstanceCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(InstanceCounts::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a InstanceCounts> for InstanceCounts {
    fn sum<I: Iterator<Item = &'a InstanceCounts>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// What a status row describes
///
/// Upstream feeds encode aggregates with `"TOTAL"`/`"ALL"` strings in the
/// region and zone columns; those are resolved into this enum once, at the
/// wire boundary (see [`crate::wire`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusScope {
    /// A real availability zone
    Zone { region: RegionName, zone: ZoneName },
    /// Upstream rollup of every zone in one region
    RegionTotal { region: RegionName },
    /// Upstream rollup across all regions
    GrandTotal,
}

impl StatusScope {
    pub fn region(&self) -> Option<&RegionName> {
        match self {
            StatusScope::Zone { region, .. } | StatusScope::RegionTotal { region } => Some(region),
            StatusScope::GrandTotal => None,
        }
    }

    pub fn zone(&self) -> Option<&ZoneName> {
        match self {
            StatusScope::Zone { zone, .. } => Some(zone),
            _ => None,
        }
    }
}

/// One snapshot row of the resource-status feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceStatusRow {
    pub scope: StatusScope,
    pub counts: InstanceCounts,
    pub retrieved_at: DateTime<Utc>,
}

impl ResourceStatusRow {
    pub fn zone(
        region: impl Into<RegionName>,
        zone: &str,
        counts: InstanceCounts,
        retrieved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            scope: StatusScope::Zone {
                region: region.into(),
                zone: ZoneName::from(zone),
            },
            counts,
            retrieved_at,
        }
    }

    pub fn region_total(
        region: impl Into<RegionName>,
        counts: InstanceCounts,
        retrieved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            scope: StatusScope::RegionTotal {
                region: region.into(),
            },
            counts,
            retrieved_at,
        }
    }

    pub fn grand_total(counts: InstanceCounts, retrieved_at: DateTime<Utc>) -> Self {
        Self {
            scope: StatusScope::GrandTotal,
            counts,
            retrieved_at,
        }
    }

    pub fn region(&self) -> Option<&RegionName> {
        self.scope.region()
    }

    /// True when this row belongs to `region` (zone rows and its total row)
    pub fn in_region(&self, region: &RegionName) -> bool {
        self.region() == Some(region)
    }
}
