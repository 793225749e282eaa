pub mod config;
pub mod dashboard;
pub mod error;
pub mod feed;
pub mod watch;

pub use config::{CloudFeedConfig, Config, resolve_config_path};
pub use dashboard::{Dashboard, Delivery, FetchSequencer, FetchTicket};
pub use error::{Error, Result};
pub use feed::{FeedSnapshot, FeedSource, FileFeed, MemoryFeed};
pub use watch::{FeedWatcher, WatchSignal, run_watch_loop};
