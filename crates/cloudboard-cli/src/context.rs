use anyhow::{Context, Result, anyhow};
use cloudboard_runtime::{Config, Dashboard, FeedSource, FileFeed, resolve_config_path};
use cloudboard_types::CloudProvider;
use is_terminal::IsTerminal;

use crate::args::Cli;
use crate::presentation::{ConsoleRenderer, ViewOptions};
use crate::types::OutputFormat;

/// Resolved settings shared by every handler.
pub struct ExecutionContext {
    config: Config,
    cloud: Option<CloudProvider>,
    feed: FileFeed,
    pub format: OutputFormat,
    pub color: bool,
}

impl ExecutionContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = resolve_config_path(cli.config.as_deref())?;
        let config = Config::load_from(&config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?;

        let (cloud, feed) = Self::resolve_feed(&config, cli)?;
        let color =
            !cli.no_color && cli.format == OutputFormat::Plain && std::io::stdout().is_terminal();

        tracing::debug!(
            config = %config_path.display(),
            cloud = cloud.map(|c| c.key()),
            feeds = %feed.describe(),
            "execution context ready"
        );

        Ok(Self {
            config,
            cloud,
            feed,
            format: cli.format,
            color,
        })
    }

    /// Feed paths from flags, falling back to the selected cloud's config.
    ///
    /// With both paths given on the command line no config cloud is implied;
    /// records are filtered only when `--cloud` is passed.
    fn resolve_feed(config: &Config, cli: &Cli) -> Result<(Option<CloudProvider>, FileFeed)> {
        if let (Some(status), Some(cost)) = (&cli.status_feed, &cli.cost_feed) {
            let cloud = cli.cloud;
            let feed = FileFeed::new(status, cost);
            return Ok((cloud, Self::scoped(feed, cloud)));
        }

        let cloud = config.select_cloud(cli.cloud)?;
        let feeds = config.feeds_for(cloud).ok_or_else(|| {
            anyhow!(
                "No feeds configured for {}; add a [clouds.{}] table or pass --status-feed and --cost-feed",
                cloud,
                cloud.key()
            )
        })?;

        let status = cli
            .status_feed
            .clone()
            .unwrap_or_else(|| feeds.status_feed.clone());
        let cost = cli
            .cost_feed
            .clone()
            .unwrap_or_else(|| feeds.cost_feed.clone());
        Ok((Some(cloud), Self::scoped(FileFeed::new(status, cost), Some(cloud))))
    }

    fn scoped(feed: FileFeed, cloud: Option<CloudProvider>) -> FileFeed {
        match cloud {
            Some(cloud) => feed.for_cloud(cloud),
            None => feed,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cloud(&self) -> Option<CloudProvider> {
        self.cloud
    }

    pub fn feed(&self) -> &FileFeed {
        &self.feed
    }

    pub fn currency(&self) -> &str {
        &self.config.currency_symbol
    }

    pub fn renderer(&self) -> ConsoleRenderer {
        ConsoleRenderer::new(self.format, ViewOptions { color: self.color })
    }

    /// A dashboard with one snapshot already applied
    pub fn load_dashboard(&self) -> Result<Dashboard> {
        let mut dashboard = Dashboard::new(self.cloud);
        dashboard.refresh(&self.feed)?;
        Ok(dashboard)
    }
}
