use crate::MonthYear;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Billed service name (e.g. `EC2`, `Cloud Storage`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ServiceName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What a cost row describes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "service", rename_all = "snake_case")]
pub enum CostLine {
    /// A billed service
    Service(ServiceName),
    /// Upstream total for the whole month
    MonthTotal,
}

impl CostLine {
    pub fn service(&self) -> Option<&ServiceName> {
        match self {
            CostLine::Service(name) => Some(name),
            CostLine::MonthTotal => None,
        }
    }
}

/// One row of the monthly cost feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRow {
    pub month: MonthYear,
    pub line: CostLine,
    pub total_amount: f64,
    /// Share of the month's total in `[0, 100]`; `None` when the feed omits it
    pub pct_of_total: Option<f64>,
    pub retrieved_at: DateTime<Utc>,
}

impl CostRow {
    pub fn service(
        month: MonthYear,
        service: &str,
        total_amount: f64,
        pct_of_total: Option<f64>,
        retrieved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            month,
            line: CostLine::Service(ServiceName::from(service)),
            total_amount,
            pct_of_total,
            retrieved_at,
        }
    }

    pub fn month_total(month: MonthYear, total_amount: f64, retrieved_at: DateTime<Utc>) -> Self {
        Self {
            month,
            line: CostLine::MonthTotal,
            total_amount,
            pct_of_total: Some(100.0),
            retrieved_at,
        }
    }

    pub fn is_total(&self) -> bool {
        matches!(self.line, CostLine::MonthTotal)
    }

    /// Whether the service made a non-zero contribution to its month
    ///
    /// Uses the percentage when the feed supplies one, the amount otherwise.
    pub fn contributes(&self) -> bool {
        match self.pct_of_total {
            Some(pct) => pct > 0.0,
            None => self.total_amount > 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month() -> MonthYear {
        MonthYear::parse("2025-08").unwrap()
    }

    #[test]
    fn test_contributes_prefers_percentage() {
        let now = Utc::now();
        let rounded_away = CostRow::service(month(), "KMS", 0.001, Some(0.0), now);
        assert!(!rounded_away.contributes());

        let no_pct = CostRow::service(month(), "S3", 1.5, None, now);
        assert!(no_pct.contributes());

        let free = CostRow::service(month(), "IAM", 0.0, None, now);
        assert!(!free.contributes());
    }
}
