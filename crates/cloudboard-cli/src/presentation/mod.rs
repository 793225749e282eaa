//! # Presentation Layer
//!
//! MVVM-style split between the rollup engine and terminal output.
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ Renderer ] ==(JSON)==> serde_json
//!                                                                  ==(CSV)===> csv::Writer
//!                                                                  ==(Text)==> [ View ]
//! ```
//!
//! ## Where does code go?
//!
//! * `view_models/`: `Serialize` data contracts. Raw numbers, not formatted
//!   strings; JSON output is an API.
//! * `presenters/`: pure functions from engine summaries to view models.
//!   Decides which badge or guidance applies.
//! * `views/`: `fmt::Display` layouts, colors and currency formatting.
//! * `renderers/`: picks JSON, CSV or text and writes to stdout.
//! * `formatters/`: small string helpers shared by views.

pub mod formatters;
pub mod presenters;
pub mod renderers;
pub mod view_models;
pub mod views;

pub use renderers::{ConsoleRenderer, Renderer};
pub use view_models::{
    CommandResultViewModel, CreateView, CsvTable, Guidance, StatusBadge, StatusLevel, ViewOptions,
};
