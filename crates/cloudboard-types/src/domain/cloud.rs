use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cloud provider whose feeds a dashboard renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Gcp,
    Azure,
}

impl CloudProvider {
    pub const ALL: [CloudProvider; 3] = [CloudProvider::Aws, CloudProvider::Gcp, CloudProvider::Azure];

    /// Config/CLI key (`aws`, `gcp`, `azure`)
    pub fn key(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Gcp => "gcp",
            CloudProvider::Azure => "azure",
        }
    }

    /// Human-facing name, also the value upstream feeds put in their `cloud` column
    pub fn display_name(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "AWS",
            CloudProvider::Gcp => "GCP",
            CloudProvider::Azure => "Azure",
        }
    }

    /// Whether a feed's `cloud` column refers to this provider
    pub fn matches(&self, label: &str) -> bool {
        label.trim().eq_ignore_ascii_case(self.key())
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for CloudProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CloudProvider::ALL
            .into_iter()
            .find(|cloud| cloud.matches(s))
            .ok_or_else(|| format!("unknown cloud provider '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_feed_labels() {
        assert_eq!("AWS".parse::<CloudProvider>(), Ok(CloudProvider::Aws));
        assert_eq!("Azure".parse::<CloudProvider>(), Ok(CloudProvider::Azure));
        assert_eq!("gcp".parse::<CloudProvider>(), Ok(CloudProvider::Gcp));
        assert!("oracle".parse::<CloudProvider>().is_err());
    }
}
