pub mod catalog;
pub mod check;
pub mod cost;
pub mod dashboard;
pub mod status;

pub use catalog::{MonthListView, RegionListView};
pub use check::CheckView;
pub use cost::CostView;
pub use dashboard::{DashboardScreen, WatchFrameView};
pub use status::StatusView;

/// Two-decimal amount for CSV cells
fn csv_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}
