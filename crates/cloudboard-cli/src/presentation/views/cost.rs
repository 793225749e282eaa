use std::fmt;

use cloudboard_engine::{format_currency_with, format_percent};
use owo_colors::Style;

use super::csv_amount;
use crate::presentation::formatters::style::check_style;
use crate::presentation::formatters::{format_retrieved_at, paint, truncate};
use crate::presentation::view_models::{CostViewModel, CreateView, CsvTable, ViewOptions};

const SERVICE_COLUMN: usize = 28;

pub struct CostView<'a> {
    data: &'a CostViewModel,
    options: ViewOptions,
}

impl<'a> CostView<'a> {
    pub fn new(data: &'a CostViewModel, options: ViewOptions) -> Self {
        Self { data, options }
    }

    fn money(&self, amount: f64) -> String {
        format_currency_with(&self.data.currency, amount)
    }
}

impl<'a> fmt::Display for CostView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let color = self.options.color;
        let period = self
            .data
            .month_label
            .clone()
            .unwrap_or_else(|| "No billing data".to_string());
        let heading = match &self.data.cloud {
            Some(cloud) => format!("{} · {}", cloud, period),
            None => period,
        };
        writeln!(f, "{}", paint(heading, Style::new().bold(), color))?;

        writeln!(
            f,
            "  {:<12}{}",
            "Total",
            paint(self.money(self.data.total), Style::new().bold(), color)
        )?;
        writeln!(
            f,
            "  {:<12}{} ({})",
            "Source",
            self.data.source,
            paint(
                &self.data.check.status,
                check_style(&self.data.check.status),
                color
            )
        )?;
        if let (Some(supplied), Some(computed)) = (self.data.check.supplied, self.data.check.computed) {
            writeln!(
                f,
                "  {:<12}supplied {}, services sum to {}",
                "",
                self.money(supplied),
                self.money(computed)
            )?;
        }

        if !self.data.services.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "{:<width$} {:>14} {:>9}",
                "SERVICE",
                "AMOUNT",
                "SHARE",
                width = SERVICE_COLUMN
            )?;
            writeln!(f, "{}", "-".repeat(SERVICE_COLUMN + 25))?;
            for service in &self.data.services {
                let share = format_percent(service.pct);
                let share = if service.pct_supplied {
                    share
                } else {
                    paint(share, Style::new().dimmed(), color)
                };
                writeln!(
                    f,
                    "{:<width$} {:>14} {:>9}",
                    truncate(&service.service, SERVICE_COLUMN),
                    self.money(service.amount),
                    share,
                    width = SERVICE_COLUMN
                )?;
            }
        }

        if let Some(ts) = &self.data.retrieved_at {
            writeln!(f)?;
            writeln!(
                f,
                "{}",
                paint(
                    format!("Retrieved {}", format_retrieved_at(ts)),
                    Style::new().dimmed(),
                    color
                )
            )?;
        }
        Ok(())
    }
}

impl CreateView for CostViewModel {
    fn create_view<'a>(&'a self, options: ViewOptions) -> Box<dyn fmt::Display + 'a> {
        Box::new(CostView::new(self, options))
    }
}

impl CsvTable for CostViewModel {
    fn csv_headers(&self) -> Vec<&'static str> {
        vec!["month", "service", "amount", "pct"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        let month = self.month.clone().unwrap_or_default();
        let mut rows: Vec<Vec<String>> = self
            .services
            .iter()
            .map(|s| {
                vec![
                    month.clone(),
                    s.service.clone(),
                    csv_amount(s.amount),
                    csv_amount(s.pct),
                ]
            })
            .collect();
        rows.push(vec![
            month,
            "TOTAL".to_string(),
            csv_amount(self.total),
            csv_amount(100.0),
        ]);
        rows
    }
}
