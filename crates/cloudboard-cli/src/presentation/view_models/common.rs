use cloudboard_engine::TotalCheck;
use serde::Serialize;

/// Headline of a command result.
///
/// Levels are ordered by severity so the most serious note about a view wins
/// when several apply.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    /// Every supplied total agrees with its components
    Consistent,
    /// Filter or feed points at data that is not there
    Notice,
    /// Components cover only part of a supplied total
    Partial,
    /// A supplied total disagrees with its components
    Mismatch,
}

impl StatusLevel {
    /// Level a reconciliation outcome deserves; `None` when there is nothing to flag
    pub fn for_check<T>(check: &TotalCheck<T>) -> Option<Self> {
        match check {
            TotalCheck::Mismatch { .. } => Some(StatusLevel::Mismatch),
            TotalCheck::Partial { .. } => Some(StatusLevel::Partial),
            TotalCheck::Unchecked | TotalCheck::Agreed => None,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            StatusLevel::Consistent => "✅",
            StatusLevel::Notice => "ℹ️",
            StatusLevel::Partial => "◐",
            StatusLevel::Mismatch => "❌",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusBadge {
    pub level: StatusLevel,
    pub label: String,
}

impl StatusBadge {
    pub fn new(level: StatusLevel, label: impl Into<String>) -> Self {
        Self {
            level,
            label: label.into(),
        }
    }

    pub fn consistent(label: impl Into<String>) -> Self {
        Self::new(StatusLevel::Consistent, label)
    }

    pub fn notice(label: impl Into<String>) -> Self {
        Self::new(StatusLevel::Notice, label)
    }

    pub fn icon(&self) -> &'static str {
        self.level.icon()
    }
}

/// A follow-up command shown under a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guidance {
    pub description: String,
    pub command: String,
}

impl Guidance {
    pub fn new(description: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: command.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_order_by_severity() {
        assert!(StatusLevel::Mismatch > StatusLevel::Partial);
        assert!(StatusLevel::Partial > StatusLevel::Notice);
        assert!(StatusLevel::Notice > StatusLevel::Consistent);
    }

    #[test]
    fn test_level_for_check() {
        let mismatch = TotalCheck::Mismatch {
            supplied: 5u64,
            computed: 3,
        };
        assert_eq!(StatusLevel::for_check(&mismatch), Some(StatusLevel::Mismatch));
        assert_eq!(StatusLevel::for_check::<f64>(&TotalCheck::Agreed), None);
        assert_eq!(StatusLevel::for_check::<f64>(&TotalCheck::Unchecked), None);
    }
}
