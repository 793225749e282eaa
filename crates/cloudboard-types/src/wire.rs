//! Feed records as the upstream backend serves them.
//!
//! The backend marks aggregate rows with sentinel strings: a status row whose
//! `region` is `"ALL"` is the grand total, one whose `az` is `"TOTAL"` (or
//! `"ALL"`) is its region's total, and a cost row whose `service` is
//! `"TOTAL"` is the month total. This module is the only place those strings
//! are interpreted; everything past it works with [`StatusScope`] and
//! [`CostLine`].

use crate::{
    CostLine, CostRow, Error, InstanceCounts, MonthYear, RegionName, ResourceStatusRow, Result,
    ServiceName, StatusScope, ZoneName, ALL_REGIONS,
};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const ZONE_TOTAL: &str = "TOTAL";
pub const ZONE_ALL: &str = "ALL";
pub const SERVICE_TOTAL: &str = "TOTAL";

/// Tolerance for percentages that were rounded upstream (e.g. `100.004`)
const PCT_ROUNDING_SLACK: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud: Option<String>,
    pub region: String,
    #[serde(alias = "zone")]
    pub az: String,
    pub running: u64,
    pub stopped: u64,
    pub terminated: u64,
    pub retrieved_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud: Option<String>,
    pub month_year: String,
    pub service: String,
    pub total_amount: f64,
    #[serde(default)]
    pub pct_of_total: Option<f64>,
    pub retrieved_at: String,
}

/// Resolve the region/zone columns into a tagged scope
pub fn classify_status_scope(region: &str, az: &str) -> StatusScope {
    if region == ALL_REGIONS {
        StatusScope::GrandTotal
    } else if az == ZONE_TOTAL || az == ZONE_ALL {
        StatusScope::RegionTotal {
            region: RegionName::from(region),
        }
    } else {
        StatusScope::Zone {
            region: RegionName::from(region),
            zone: ZoneName::from(az),
        }
    }
}

/// Resolve the service column into a tagged cost line
pub fn classify_cost_line(service: &str) -> CostLine {
    if service == SERVICE_TOTAL {
        CostLine::MonthTotal
    } else {
        CostLine::Service(ServiceName::from(service))
    }
}

/// Parse a feed timestamp
///
/// Accepts RFC 3339 and the naive ISO form (`2025-08-01T12:00:00[.ffffff]`,
/// `T` or space separated) that the backend emits; naive values are UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl StatusRecord {
    pub fn into_row(self, index: usize) -> Result<ResourceStatusRow> {
        let invalid = |reason: String| Error::InvalidRecord { index, reason };

        if self.region.trim().is_empty() {
            return Err(invalid("empty region".to_string()));
        }
        if self.az.trim().is_empty() {
            return Err(invalid(format!("empty zone in region '{}'", self.region)));
        }
        let retrieved_at = parse_timestamp(&self.retrieved_at)
            .ok_or_else(|| invalid(format!("unparseable retrieved_at '{}'", self.retrieved_at)))?;

        Ok(ResourceStatusRow {
            scope: classify_status_scope(&self.region, &self.az),
            counts: InstanceCounts::new(self.running, self.stopped, self.terminated),
            retrieved_at,
        })
    }

    pub fn from_row(row: &ResourceStatusRow) -> Self {
        let (region, az) = match &row.scope {
            StatusScope::Zone { region, zone } => (region.to_string(), zone.to_string()),
            StatusScope::RegionTotal { region } => (region.to_string(), ZONE_TOTAL.to_string()),
            StatusScope::GrandTotal => (ALL_REGIONS.to_string(), ZONE_ALL.to_string()),
        };
        Self {
            cloud: None,
            region,
            az,
            running: row.counts.running,
            stopped: row.counts.stopped,
            terminated: row.counts.terminated,
            retrieved_at: format_timestamp(&row.retrieved_at),
        }
    }
}

impl CostRecord {
    pub fn into_row(self, index: usize) -> Result<CostRow> {
        let invalid = |reason: String| Error::InvalidRecord { index, reason };

        let month = MonthYear::parse(&self.month_year)
            .map_err(|_| invalid(format!("month_year '{}' is not YYYY-MM", self.month_year)))?;
        if self.service.trim().is_empty() {
            return Err(invalid("empty service".to_string()));
        }
        if !self.total_amount.is_finite() || self.total_amount < 0.0 {
            return Err(invalid(format!(
                "total_amount {} for '{}' must be a non-negative number",
                self.total_amount, self.service
            )));
        }
        if let Some(pct) = self.pct_of_total
            && !(0.0..=100.0 + PCT_ROUNDING_SLACK).contains(&pct)
        {
            return Err(invalid(format!(
                "pct_of_total {} for '{}' is outside [0, 100]",
                pct, self.service
            )));
        }
        let retrieved_at = parse_timestamp(&self.retrieved_at)
            .ok_or_else(|| invalid(format!("unparseable retrieved_at '{}'", self.retrieved_at)))?;

        Ok(CostRow {
            month,
            line: classify_cost_line(&self.service),
            total_amount: self.total_amount,
            pct_of_total: self.pct_of_total.map(|pct| pct.min(100.0)),
            retrieved_at,
        })
    }

    pub fn from_row(row: &CostRow) -> Self {
        let service = match &row.line {
            CostLine::Service(name) => name.to_string(),
            CostLine::MonthTotal => SERVICE_TOTAL.to_string(),
        };
        Self {
            cloud: None,
            month_year: row.month.to_string(),
            service,
            total_amount: row.total_amount,
            pct_of_total: row.pct_of_total,
            retrieved_at: format_timestamp(&row.retrieved_at),
        }
    }
}

pub fn parse_status_records(json: &str) -> Result<Vec<StatusRecord>> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_cost_records(json: &str) -> Result<Vec<CostRecord>> {
    Ok(serde_json::from_str(json)?)
}

pub fn status_rows_from_records(records: Vec<StatusRecord>) -> Result<Vec<ResourceStatusRow>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_row(index))
        .collect()
}

pub fn cost_rows_from_records(records: Vec<CostRecord>) -> Result<Vec<CostRow>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_row(index))
        .collect()
}

/// Parse a status feed document straight into typed rows
pub fn parse_status_feed(json: &str) -> Result<Vec<ResourceStatusRow>> {
    status_rows_from_records(parse_status_records(json)?)
}

/// Parse a cost feed document straight into typed rows
pub fn parse_cost_feed(json: &str) -> Result<Vec<CostRow>> {
    cost_rows_from_records(parse_cost_records(json)?)
}
