//! Testing infrastructure for cloudboard tests.
//!
//! - `fixtures`: fluent builders for status/cost rows and sample feeds
//! - `assertions`: checks against the CLI's JSON output
//! - `world`: `TestWorld`, an isolated feed/config directory for CLI runs

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::{CostFeedBuilder, SampleFeeds, StatusFeedBuilder, sample_time};
pub use world::{CliResult, TestWorld};
