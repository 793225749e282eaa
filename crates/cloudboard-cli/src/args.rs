use clap::{Args, Parser, Subcommand};
use cloudboard_types::{CloudProvider, MonthYear};
use std::path::PathBuf;

use crate::types::{LogLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "cloudboard")]
#[command(about = "Instance status and billing rollups for multi-cloud dashboards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: $CLOUDBOARD_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Cloud whose feeds to read (aws, gcp, azure)
    #[arg(long, global = true)]
    pub cloud: Option<CloudProvider>,

    /// Status feed JSON file, overriding the configured one
    #[arg(long, global = true)]
    pub status_feed: Option<PathBuf>,

    /// Cost feed JSON file, overriding the configured one
    #[arg(long, global = true)]
    pub cost_feed: Option<PathBuf>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Instance counts for all regions or one region's zones
    Status(StatusArgs),

    /// Cost breakdown by service for one month
    Costs(CostsArgs),

    /// Status and costs together, as the dashboard shows them
    View(ViewArgs),

    /// Regions in the status feed with their totals
    Regions,

    /// Billed months in the cost feed, most recent first
    Months,

    /// Compare every supplied total with the sum of its components
    Check,

    /// Re-render the dashboard whenever the feeds change
    Watch(WatchArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct StatusArgs {
    /// Region to show; ALL (default) shows cross-region totals
    #[arg(long)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CostsArgs {
    /// Billing month as YYYY-MM (default: most recent)
    #[arg(long, value_parser = parse_month)]
    pub month: Option<MonthYear>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    #[arg(long)]
    pub region: Option<String>,

    #[arg(long, value_parser = parse_month)]
    pub month: Option<MonthYear>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct WatchArgs {
    /// Seconds between scheduled refreshes (default: refresh_interval_secs)
    #[arg(long)]
    pub interval: Option<u64>,

    #[arg(long)]
    pub region: Option<String>,

    #[arg(long, value_parser = parse_month)]
    pub month: Option<MonthYear>,

    /// Render once and exit
    #[arg(long)]
    pub once: bool,
}

fn parse_month(value: &str) -> Result<MonthYear, String> {
    MonthYear::parse(value).map_err(|e| e.to_string())
}
