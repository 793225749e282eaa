use std::fmt;

use cloudboard_engine::format_currency_with;

use super::csv_amount;
use crate::presentation::formatters::paint;
use crate::presentation::formatters::style::check_style;
use crate::presentation::view_models::{CheckViewModel, CreateView, CsvTable, ViewOptions};

pub struct CheckView<'a> {
    data: &'a CheckViewModel,
    options: ViewOptions,
}

impl<'a> CheckView<'a> {
    pub fn new(data: &'a CheckViewModel, options: ViewOptions) -> Self {
        Self { data, options }
    }

    fn status(&self, label: &str) -> String {
        paint(label, check_style(label), self.options.color)
    }
}

impl<'a> fmt::Display for CheckView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:<20} {:<10} {:<10} DETAIL", "REGION", "SOURCE", "CHECK")?;
        writeln!(f, "{}", "-".repeat(70))?;
        for region in &self.data.regions {
            let detail = match (&region.check.supplied, &region.check.computed) {
                (Some(s), Some(c)) => format!(
                    "supplied {}/{}/{} vs computed {}/{}/{}",
                    s.running, s.stopped, s.terminated, c.running, c.stopped, c.terminated
                ),
                _ => format!(
                    "{}/{}/{}",
                    region.counts.running, region.counts.stopped, region.counts.terminated
                ),
            };
            writeln!(
                f,
                "{:<20} {:<10} {:<10} {}",
                region.region,
                region.source,
                self.status(&region.check.status),
                detail
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{:<20} {:<10} {:<10} DETAIL", "MONTH", "SOURCE", "CHECK")?;
        writeln!(f, "{}", "-".repeat(70))?;
        for month in &self.data.months {
            let money = |amount: f64| format_currency_with(&self.data.currency, amount);
            let mut detail = match (month.check.supplied, month.check.computed) {
                (Some(s), Some(c)) => format!("supplied {} vs services {}", money(s), money(c)),
                _ => money(month.total),
            };
            if month.pct_overflow {
                detail.push_str(&format!(", shares sum to {:.2}%", month.pct_sum));
            }
            writeln!(
                f,
                "{:<20} {:<10} {:<10} {}",
                month.month,
                month.source,
                self.status(&month.check.status),
                detail
            )?;
        }
        Ok(())
    }
}

impl CreateView for CheckViewModel {
    fn create_view<'a>(&'a self, options: ViewOptions) -> Box<dyn fmt::Display + 'a> {
        Box::new(CheckView::new(self, options))
    }
}

impl CsvTable for CheckViewModel {
    fn csv_headers(&self) -> Vec<&'static str> {
        vec!["kind", "name", "source", "check", "supplied", "computed"]
    }

    fn csv_rows(&self) -> Vec<Vec<String>> {
        let counts = |c: &crate::presentation::view_models::CountsViewModel| {
            format!("{}/{}/{}", c.running, c.stopped, c.terminated)
        };

        let regions = self.regions.iter().map(|r| {
            vec![
                "region".to_string(),
                r.region.clone(),
                r.source.clone(),
                r.check.status.clone(),
                r.check.supplied.as_ref().map(counts).unwrap_or_default(),
                r.check.computed.as_ref().map(counts).unwrap_or_default(),
            ]
        });
        let months = self.months.iter().map(|m| {
            vec![
                "month".to_string(),
                m.month.clone(),
                m.source.clone(),
                m.check.status.clone(),
                m.check.supplied.map(csv_amount).unwrap_or_default(),
                m.check.computed.map(csv_amount).unwrap_or_default(),
            ]
        });
        regions.chain(months).collect()
    }
}
