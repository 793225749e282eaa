use cloudboard_types::InstanceCounts;
use serde::{Deserialize, Serialize};

/// Largest difference, in currency units, at which two cost totals still agree
pub const COST_EPSILON: f64 = 0.01;

/// Where a rollup's headline total came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalSource {
    /// Upstream supplied an aggregate row and it was used as-is
    Supplied,
    /// No aggregate row; the total was summed from component rows
    Computed,
    /// Nothing matched the requested grouping
    Empty,
}

/// Outcome of comparing a supplied total against the sum of its components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TotalCheck<T> {
    /// Only one derivation was available
    Unchecked,
    Agreed,
    /// Components cover less than the supplied total; expected when small
    /// items are omitted from the feed
    Partial { supplied: T, computed: T },
    Mismatch { supplied: T, computed: T },
}

impl<T> TotalCheck<T> {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, TotalCheck::Mismatch { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            TotalCheck::Unchecked => "unchecked",
            TotalCheck::Agreed => "agreed",
            TotalCheck::Partial { .. } => "partial",
            TotalCheck::Mismatch { .. } => "mismatch",
        }
    }
}

/// Pick the headline value: a supplied total wins over a computed one
pub fn resolve_total<T: Copy>(supplied: Option<T>, computed: Option<T>) -> Option<(T, TotalSource)> {
    match (supplied, computed) {
        (Some(value), _) => Some((value, TotalSource::Supplied)),
        (None, Some(value)) => Some((value, TotalSource::Computed)),
        (None, None) => None,
    }
}

pub fn check_counts(
    supplied: Option<InstanceCounts>,
    computed: Option<InstanceCounts>,
) -> TotalCheck<InstanceCounts> {
    match (supplied, computed) {
        (Some(supplied), Some(computed)) if supplied == computed => TotalCheck::Agreed,
        (Some(supplied), Some(computed)) => TotalCheck::Mismatch { supplied, computed },
        _ => TotalCheck::Unchecked,
    }
}

pub fn amounts_agree(a: f64, b: f64) -> bool {
    // float sums of two-decimal amounts land a hair either side of the epsilon
    (a - b).abs() <= COST_EPSILON + 1e-9
}

pub fn check_amounts(supplied: Option<f64>, computed: Option<f64>) -> TotalCheck<f64> {
    match (supplied, computed) {
        (Some(supplied), Some(computed)) if amounts_agree(supplied, computed) => {
            TotalCheck::Agreed
        }
        (Some(supplied), Some(computed)) if computed < supplied => {
            TotalCheck::Partial { supplied, computed }
        }
        (Some(supplied), Some(computed)) => TotalCheck::Mismatch { supplied, computed },
        _ => TotalCheck::Unchecked,
    }
}
