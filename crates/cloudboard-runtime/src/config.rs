use crate::{Error, Result};
use cloudboard_types::CloudProvider;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const CONFIG_ENV_VAR: &str = "CLOUDBOARD_CONFIG";

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;
const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. CLOUDBOARD_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory
/// 4. ~/.cloudboard/config.toml
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR)
        && !env_path.is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("cloudboard").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".cloudboard").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Where one cloud's status and cost feeds live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CloudFeedConfig {
    pub status_feed: PathBuf,
    pub cost_feed: PathBuf,
}

impl CloudFeedConfig {
    /// Copy with relative feed paths anchored at `base` (the config file's directory)
    pub fn resolved_against(&self, base: &Path) -> Self {
        let anchor = |path: &Path| {
            let expanded = expand_tilde(&path.to_string_lossy());
            if expanded.is_absolute() {
                expanded
            } else {
                base.join(expanded)
            }
        };
        Self {
            status_feed: anchor(&self.status_feed),
            cost_feed: anchor(&self.cost_feed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub default_cloud: Option<CloudProvider>,
    /// Keyed by cloud key (`aws`, `gcp`, `azure`)
    #[serde(default)]
    pub clouds: BTreeMap<String, CloudFeedConfig>,
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            default_cloud: None,
            clouds: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load from `path`; a missing file yields the defaults.
    ///
    /// Relative feed paths are resolved against the config file's directory.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        for key in config.clouds.keys() {
            CloudProvider::from_str(key).map_err(Error::Config)?;
        }

        if let Some(base) = path.parent() {
            for feeds in config.clouds.values_mut() {
                *feeds = feeds.resolved_against(base);
            }
        }

        tracing::debug!(path = %path.display(), clouds = config.clouds.len(), "config loaded");
        Ok(config)
    }

    pub fn feeds_for(&self, cloud: CloudProvider) -> Option<&CloudFeedConfig> {
        self.clouds.get(cloud.key())
    }

    /// Configured clouds in key order
    pub fn configured_clouds(&self) -> Vec<CloudProvider> {
        self.clouds
            .keys()
            .filter_map(|key| CloudProvider::from_str(key).ok())
            .collect()
    }

    /// Pick the cloud to render: explicit choice, then `default_cloud`, then
    /// the only configured cloud.
    pub fn select_cloud(&self, explicit: Option<CloudProvider>) -> Result<CloudProvider> {
        if let Some(cloud) = explicit.or(self.default_cloud) {
            return Ok(cloud);
        }

        match self.configured_clouds().as_slice() {
            [only] => Ok(*only),
            [] => Err(Error::Config(
                "no clouds configured; add a [clouds.<name>] table or pass --status-feed/--cost-feed"
                    .to_string(),
            )),
            _ => Err(Error::Config(
                "several clouds configured; choose one with --cloud or set default_cloud"
                    .to_string(),
            )),
        }
    }

    /// Interval between scheduled refreshes, never shorter than one second
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn feeds(dir: &str) -> CloudFeedConfig {
        CloudFeedConfig {
            status_feed: PathBuf::from(format!("/{}/status.json", dir)),
            cost_feed: PathBuf::from(format!("/{}/costs.json", dir)),
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.clouds.len(), 0);
        assert_eq!(config.refresh_interval_secs, 10);
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_config_load_from_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"refresh_interval_secs = 30
currency_symbol = "€"
default_cloud = "aws"

[clouds.aws]
status_feed = "/aws/status.json"
cost_feed = "/aws/costs.json"
"#,
        )?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.refresh_interval_secs, 30);
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.default_cloud, Some(CloudProvider::Aws));
        assert_eq!(loaded.feeds_for(CloudProvider::Aws), Some(&feeds("aws")));
        assert_eq!(loaded.feeds_for(CloudProvider::Gcp), None);

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config, Config::default());

        Ok(())
    }

    #[test]
    fn test_relative_feed_paths_resolve_against_config_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[clouds.gcp]\nstatus_feed = \"feeds/status.json\"\ncost_feed = \"feeds/costs.json\"\n",
        )?;

        let config = Config::load_from(&config_path)?;
        let gcp = config.feeds_for(CloudProvider::Gcp).cloned();
        assert_eq!(
            gcp.map(|f| f.status_feed),
            Some(temp_dir.path().join("feeds/status.json"))
        );
        assert_eq!(config.refresh_interval_secs, 10);

        Ok(())
    }

    #[test]
    fn test_unknown_cloud_key_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[clouds.oracle]\nstatus_feed = \"s.json\"\ncost_feed = \"c.json\"\n",
        )?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("oracle")));

        Ok(())
    }

    #[test]
    fn test_select_cloud_priority() {
        let mut config = Config::default();
        assert!(config.select_cloud(None).is_err());

        config.clouds.insert("gcp".into(), feeds("gcp"));
        assert_eq!(config.select_cloud(None).unwrap(), CloudProvider::Gcp);

        config.clouds.insert("aws".into(), feeds("aws"));
        assert!(config.select_cloud(None).is_err());
        assert_eq!(
            config.select_cloud(Some(CloudProvider::Azure)).unwrap(),
            CloudProvider::Azure
        );

        config.default_cloud = Some(CloudProvider::Aws);
        assert_eq!(config.select_cloud(None).unwrap(), CloudProvider::Aws);
    }

    #[test]
    fn test_refresh_interval_floor() {
        let config = Config {
            refresh_interval_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }
}
