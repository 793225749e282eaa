use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;
use std::io::Write;

use super::traits::Renderer;
use crate::presentation::formatters::paint;
use crate::presentation::formatters::style::level_style;
use crate::presentation::view_models::{CommandResultViewModel, CreateView, CsvTable, ViewOptions};
use crate::types::OutputFormat;

pub struct ConsoleRenderer {
    format: OutputFormat,
    options: ViewOptions,
    /// One JSON document per line, for `watch`
    streaming: bool,
}

impl ConsoleRenderer {
    pub fn new(format: OutputFormat, options: ViewOptions) -> Self {
        Self {
            format,
            options,
            streaming: false,
        }
    }

    pub fn streaming(mut self) -> Self {
        self.streaming = true;
        self
    }

    fn render_json<T: Serialize>(&self, result: &CommandResultViewModel<T>) -> Result<()> {
        let json = if self.streaming {
            serde_json::to_string(result)?
        } else {
            serde_json::to_string_pretty(result)?
        };
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", json)?;
        stdout.flush()?;
        Ok(())
    }

    fn render_csv<T: CsvTable>(&self, content: &T) -> Result<()> {
        let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
        writer.write_record(content.csv_headers())?;
        for row in content.csv_rows() {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn render_text<T>(&self, result: &CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView,
    {
        let color = self.options.color;
        let mut stdout = std::io::stdout().lock();

        if let Some(badge) = &result.badge {
            writeln!(
                stdout,
                "{} {}",
                badge.icon(),
                paint(&badge.label, level_style(badge.level), color)
            )?;
            writeln!(stdout)?;
        }

        write!(stdout, "{}", result.content.create_view(self.options))?;

        if !result.suggestions.is_empty() {
            let heading = if color {
                "💡 Tips:".yellow().bold().to_string()
            } else {
                "💡 Tips:".to_string()
            };
            writeln!(stdout, "\n{}", heading)?;
            for tip in &result.suggestions {
                writeln!(
                    stdout,
                    "  • {}: {}",
                    tip.description,
                    paint(&tip.command, Style::new().cyan(), color)
                )?;
            }
        }

        stdout.flush()?;
        Ok(())
    }
}

impl Renderer for ConsoleRenderer {
    fn render<T>(&self, result: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView + CsvTable,
    {
        match self.format {
            OutputFormat::Json => self.render_json(&result),
            OutputFormat::Csv => self.render_csv(&result.content),
            OutputFormat::Plain => self.render_text(&result),
        }
    }
}
