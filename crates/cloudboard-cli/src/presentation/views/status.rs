use std::fmt;

use owo_colors::Style;

use crate::presentation::formatters::style::check_style;
use crate::presentation::formatters::{format_retrieved_at, paint};
use crate::presentation::view_models::{
    CreateView, CsvTable, RegionEntry, StatusViewModel, ViewOptions,
};

// --------------------------------------------------------
// Status View
// --------------------------------------------------------

pub struct StatusView<'a> {
    data: &'a StatusViewModel,
    options: ViewOptions,
}

impl<'a> StatusView<'a> {
    pub fn new(data: &'a StatusViewModel, options: ViewOptions) -> Self {
        Self { data, options }
    }

    fn heading(&self) -> String {
        match &self.data.cloud {
            Some(cloud) => format!("{} · {}", cloud, self.data.region),
            None => self.data.region.clone(),
        }
    }

    fn render_regions(&self, f: &mut fmt::Formatter, regions: &[RegionEntry]) -> fmt::Result {
        writeln!(
            f,
            "{:<20} {:>8} {:>8} {:>10} {:>6}  SOURCE",
            "REGION", "RUNNING", "STOPPED", "TERMINATED", "ZONES"
        )?;
        writeln!(f, "{}", "-".repeat(70))?;
        for region in regions {
            writeln!(
                f,
                "{:<20} {:>8} {:>8} {:>10} {:>6}  {}",
                region.region,
                region.running,
                region.stopped,
                region.terminated,
                region.zone_count,
                paint(&region.source, Style::new().dimmed(), self.options.color)
            )?;
        }
        Ok(())
    }

    fn render_zones(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{:<20} {:>8} {:>8} {:>10}",
            "ZONE", "RUNNING", "STOPPED", "TERMINATED"
        )?;
        writeln!(f, "{}", "-".repeat(50))?;
        for zone in &self.data.zones {
            writeln!(
                f,
                "{:<20} {:>8} {:>8} {:>10}",
                zone.zone, zone.running, zone.stopped, zone.terminated
            )?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for StatusView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let color = self.options.color;
        writeln!(f, "{}", paint(self.heading(), Style::new().bold(), color))?;
        writeln!(
            f,
            "  {:<12}{}",
            "Running",
            paint(self.data.running, Style::new().green(), color)
        )?;
        writeln!(
            f,
            "  {:<12}{}",
            "Stopped",
            paint(self.data.stopped, Style::new().yellow(), color)
        )?;
        writeln!(
            f,
            "  {:<12}{}",
            "Terminated",
            paint(self.data.terminated, Style::new().red(), color)
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
        if let (Some(supplied), Some(computed)) = (&self.data.check.supplied, &self.data.check.computed) {
            writeln!(
                f,
                "  {:<12}supplied {}/{}/{}, zones sum to {}/{}/{}",
                "",
                supplied.running,
                supplied.stopped,
                supplied.terminated,
                computed.running,
                computed.stopped,
                computed.terminated
            )?;
        }

        if !self.data.regions.is_empty() {
            writeln!(f)?;
            self.render_regions(f, &self.data.regions)?;
        }
        if !self.data.zones.is_empty() {
            writeln!(f)?;
            self.render_zones(f)?;
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

impl CreateView for StatusViewModel {
    fn create_view<'a>(&'a self, options: ViewOptions) -> Box<dyn fmt::Display + 'a> {
        Box::new(StatusView::new(self, options))
    }
}

impl CsvTable for StatusViewModel {
    fn csv_headers(&self) -> Vec<&'static str> {
        vec!["region", "zone", "running", "stopped", "terminated"]
    }

    /// Zone or region rows followed by the selection's total
    fn csv_rows(&self) -> Vec<Vec<String>> {
        let counts = |r: u64, s: u64, t: u64| vec![r.to_string(), s.to_string(), t.to_string()];

        let mut rows: Vec<Vec<String>> = Vec::new();
        for zone in &self.zones {
            let mut row = vec![zone.region.clone(), zone.zone.clone()];
            row.extend(counts(zone.running, zone.stopped, zone.terminated));
            rows.push(row);
        }
        for region in &self.regions {
            let mut row = vec![region.region.clone(), String::new()];
            row.extend(counts(region.running, region.stopped, region.terminated));
            rows.push(row);
        }

        let mut total = vec![self.region.clone(), "TOTAL".to_string()];
        total.extend(counts(self.running, self.stopped, self.terminated));
        rows.push(total);
        rows
    }
}
