use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire sentinel for "every region" in feeds and filter selections
pub const ALL_REGIONS: &str = "ALL";

/// Cloud region identifier (e.g. `us-east-1`, `europe-west1`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionName(String);

impl RegionName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RegionName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RegionName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for RegionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Availability zone identifier, always a real zone (never a rollup sentinel)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneName(String);

impl ZoneName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ZoneName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Region selection for status views
///
/// Serialized as the plain selection string, with `"ALL"` for [`RegionScope::All`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegionScope {
    /// Cross-region totals, no zone detail
    #[default]
    All,
    /// A single region with its zone breakdown
    Specific(RegionName),
}

impl RegionScope {
    /// Parse a user selection; `"ALL"` (any case) selects every region
    pub fn parse(selection: &str) -> Self {
        let trimmed = selection.trim();
        if trimmed.eq_ignore_ascii_case(ALL_REGIONS) {
            RegionScope::All
        } else {
            RegionScope::Specific(RegionName::from(trimmed))
        }
    }

    /// Get the selected region, if any
    pub fn region(&self) -> Option<&RegionName> {
        match self {
            RegionScope::All => None,
            RegionScope::Specific(region) => Some(region),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, RegionScope::All)
    }
}

impl fmt::Display for RegionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionScope::All => write!(f, "{}", ALL_REGIONS),
            RegionScope::Specific(region) => write!(f, "{}", region),
        }
    }
}

impl From<String> for RegionScope {
    fn from(s: String) -> Self {
        RegionScope::parse(&s)
    }
}

impl From<RegionScope> for String {
    fn from(scope: RegionScope) -> Self {
        scope.to_string()
    }
}

impl From<RegionName> for RegionScope {
    fn from(region: RegionName) -> Self {
        RegionScope::Specific(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_is_case_insensitive() {
        assert_eq!(RegionScope::parse("ALL"), RegionScope::All);
        assert_eq!(RegionScope::parse(" all "), RegionScope::All);
    }

    #[test]
    fn test_parse_specific_region() {
        let scope = RegionScope::parse("us-east-1");
        assert_eq!(scope.region().map(RegionName::as_str), Some("us-east-1"));
        assert!(!scope.is_all());
    }

    #[test]
    fn test_scope_serializes_as_plain_string() {
        let json = serde_json::to_string(&RegionScope::All).unwrap();
        assert_eq!(json, "\"ALL\"");

        let scope: RegionScope = serde_json::from_str("\"eu-west-1\"").unwrap();
        assert_eq!(scope, RegionScope::Specific(RegionName::from("eu-west-1")));
    }
}
