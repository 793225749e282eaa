use std::fmt;

use cloudboard_engine::format_currency_with;
use owo_colors::Style;

use super::csv_amount;
use crate::presentation::formatters::paint;
use crate::presentation::view_models::{
    CreateView, CsvTable, MonthListViewModel, RegionListViewModel, ViewOptions,
};

// --------------------------------------------------------
// Region List View
// --------------------------------------------------------

pub struct RegionListView<'a> {
    data: &'a RegionListViewModel,
    options: ViewOptions,
}

impl<'a> RegionListView<'a> {
    pub fn new(data: &'a RegionListViewModel, options: ViewOptions) -> Self {
        Self { data, options }
    }
}

impl<'a> fmt::Display for RegionListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.regions.is_empty() {
            return writeln!(f, "No regions in the status feed.");
        }

        writeln!(
            f,
            "{:<20} {:>8} {:>8} {:>10} {:>6}  SOURCE",
            "REGION", "RUNNING", "STOPPED", "TERMINATED", "ZONES"
        )?;
        writeln!(f, "{}", "-".repeat(70))?;
        for region in &self.data.regions {
            writeln!(
                f,
                "{:<20} {:>8} {:>8} {:>10} {:>6}  {}",
                paint(&region.region, Style::new().bold(), self.options.color),
                region.running,
                region.stopped,
                region.terminated,
                region.zone_count,
                region.source
            )?;
        }
        Ok(())
    }
}

impl CreateView for RegionListViewModel {
    fn create_view<'a>(&'a self, options: ViewOptions) -> Box<dyn fmt::Display + 'a> {
        Box::new(RegionListView::new(self, options))
    }
}

impl CsvTable for RegionListViewModel {
    fn csv_headers(&self) -> Vec<&'static str> {
        vec!["region", "running", "stopped", "terminated", "zones", "source"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        self.regions
            .iter()
            .map(|r| {
                vec![
                    r.region.clone(),
                    r.running.to_string(),
                    r.stopped.to_string(),
                    r.terminated.to_string(),
                    r.zone_count.to_string(),
                    r.source.clone(),
                ]
            })
            .collect()
    }
}

// --------------------------------------------------------
// Month List View
// --------------------------------------------------------

pub struct MonthListView<'a> {
    data: &'a MonthListViewModel,
}

impl<'a> MonthListView<'a> {
    pub fn new(data: &'a MonthListViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for MonthListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.months.is_empty() {
            return writeln!(f, "No months in the cost feed.");
        }

        writeln!(
            f,
            "{:<9} {:<16} {:>14} {:>9}  SOURCE",
            "MONTH", "LABEL", "TOTAL", "SERVICES"
        )?;
        writeln!(f, "{}", "-".repeat(64))?;
        for month in &self.data.months {
            writeln!(
                f,
                "{:<9} {:<16} {:>14} {:>9}  {}",
                month.month,
                month.label,
                format_currency_with(&self.data.currency, month.total),
                month.service_count,
                month.source
            )?;
        }
        Ok(())
    }
}

impl CreateView for MonthListViewModel {
    fn create_view<'a>(&'a self, _options: ViewOptions) -> Box<dyn fmt::Display + 'a> {
        Box::new(MonthListView::new(self))
    }
}

impl CsvTable for MonthListViewModel {
    fn csv_headers(&self) -> Vec<&'static str> {
        vec!["month", "label", "total", "services", "source"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        self.months
            .iter()
            .map(|m| {
                vec![
                    m.month.clone(),
                    m.label.clone(),
                    csv_amount(m.total),
                    m.service_count.to_string(),
                    m.source.clone(),
                ]
            })
            .collect()
    }
}
