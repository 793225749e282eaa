use std::fmt;

use owo_colors::Style;

use super::cost::CostView;
use super::status::StatusView;
use crate::presentation::formatters::{format_retrieved_at, paint};
use crate::presentation::view_models::{
    CreateView, CsvTable, DashboardViewModel, ViewOptions, WatchFrameViewModel,
};

// --------------------------------------------------------
// Dashboard Screen
// --------------------------------------------------------

pub struct DashboardScreen<'a> {
    data: &'a DashboardViewModel,
    options: ViewOptions,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(data: &'a DashboardViewModel, options: ViewOptions) -> Self {
        Self { data, options }
    }
}

impl<'a> fmt::Display for DashboardScreen<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let dim = Style::new().dimmed();
        let mut regions = vec![cloudboard_types::ALL_REGIONS.to_string()];
        regions.extend(self.data.regions.iter().cloned());
        let months = if self.data.months.is_empty() {
            "(none)".to_string()
        } else {
            self.data.months.join(", ")
        };

        writeln!(
            f,
            "{}",
            paint(format!("Regions: {}", regions.join(", ")), dim, self.options.color)
        )?;
        writeln!(
            f,
            "{}",
            paint(format!("Months:  {}", months), dim, self.options.color)
        )?;
        writeln!(f)?;
        write!(f, "{}", StatusView::new(&self.data.status, self.options))?;
        writeln!(f)?;
        write!(f, "{}", CostView::new(&self.data.cost, self.options))
    }
}

impl CreateView for DashboardViewModel {
    fn create_view<'a>(&'a self, options: ViewOptions) -> Box<dyn fmt::Display + 'a> {
        Box::new(DashboardScreen::new(self, options))
    }
}

impl CsvTable for DashboardViewModel {
    fn csv_headers(&self) -> Vec<&'static str> {
        vec![
            "section",
            "name",
            "running",
            "stopped",
            "terminated",
            "amount",
            "pct",
        ]
    }

    /// Status rows then cost rows, each leaving the other section's columns blank
    fn csv_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        for status in self.status.csv_rows() {
            let name = if status[1].is_empty() || status[1] == "TOTAL" {
                status[0].clone()
            } else {
                status[1].clone()
            };
            let mut row = vec!["status".to_string(), name];
            row.extend(status[2..].iter().cloned());
            row.extend([String::new(), String::new()]);
            rows.push(row);
        }
        for cost in self.cost.csv_rows() {
            let mut row = vec!["cost".to_string(), cost[1].clone()];
            row.extend([String::new(), String::new(), String::new()]);
            row.extend(cost[2..].iter().cloned());
            rows.push(row);
        }
        rows
    }
}

// --------------------------------------------------------
// Watch Frame View
// --------------------------------------------------------

pub struct WatchFrameView<'a> {
    data: &'a WatchFrameViewModel,
    options: ViewOptions,
}

impl<'a> WatchFrameView<'a> {
    pub fn new(data: &'a WatchFrameViewModel, options: ViewOptions) -> Self {
        Self { data, options }
    }

    fn trigger_text(&self) -> &str {
        match self.data.trigger.as_str() {
            "started" => "initial load",
            "feed_changed" => "feed changed",
            _ => "scheduled refresh",
        }
    }
}

impl<'a> fmt::Display for WatchFrameView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let color = self.options.color;
        writeln!(
            f,
            "{}",
            paint(
                format!(
                    "── {} · {} ──",
                    format_retrieved_at(&self.data.fetched_at),
                    self.trigger_text()
                ),
                Style::new().cyan(),
                color
            )
        )?;
        for reset in &self.data.resets {
            writeln!(
                f,
                "{}",
                paint(
                    format!(
                        "{} '{}' no longer in feed, showing {}",
                        reset.filter, reset.previous, reset.replacement
                    ),
                    Style::new().yellow(),
                    color
                )
            )?;
        }
        write!(f, "{}", DashboardScreen::new(&self.data.dashboard, self.options))
    }
}

impl CreateView for WatchFrameViewModel {
    fn create_view<'a>(&'a self, options: ViewOptions) -> Box<dyn fmt::Display + 'a> {
        Box::new(WatchFrameView::new(self, options))
    }
}

impl CsvTable for WatchFrameViewModel {
    fn csv_headers(&self) -> Vec<&'static str> {
        let mut headers = vec!["fetched_at"];
        headers.extend(self.dashboard.csv_headers());
        headers
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        self.dashboard
            .csv_rows()
            .into_iter()
            .map(|row| {
                let mut stamped = vec![self.fetched_at.clone()];
                stamped.extend(row);
                stamped
            })
            .collect()
    }
}
