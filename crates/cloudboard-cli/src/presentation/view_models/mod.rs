pub mod catalog;
pub mod check;
pub mod common;
pub mod cost;
pub mod dashboard;
pub mod result;
pub mod status;

pub use catalog::{MonthEntry, MonthListViewModel, RegionListViewModel};
pub use check::{CheckViewModel, MonthCheckEntry, RegionCheckEntry};
pub use common::{Guidance, StatusBadge, StatusLevel};
pub use cost::{CostViewModel, ServiceEntry};
pub use dashboard::{DashboardViewModel, FilterResetEntry, WatchFrameViewModel};
pub use result::CommandResultViewModel;
pub use status::{CountsViewModel, ReconciliationViewModel, RegionEntry, StatusViewModel, ZoneEntry};

use std::fmt;

/// Text rendering options; JSON and CSV ignore them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub color: bool,
}

/// Bridge from a view model to its text view.
pub trait CreateView {
    fn create_view<'a>(&'a self, options: ViewOptions) -> Box<dyn fmt::Display + 'a>;
}

/// Flat tabular form of a view model for `--format csv`.
pub trait CsvTable {
    fn csv_headers(&self) -> Vec<&'static str>;
    fn csv_rows(&self) -> Vec<Vec<String>>;
}
