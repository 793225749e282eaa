use owo_colors::{OwoColorize, Style};
use std::fmt::Display;

use crate::presentation::view_models::StatusLevel;

/// Apply `style` when color output is enabled
pub fn paint(value: impl Display, style: Style, color: bool) -> String {
    if color {
        value.style(style).to_string()
    } else {
        value.to_string()
    }
}

pub fn level_style(level: StatusLevel) -> Style {
    match level {
        StatusLevel::Consistent => Style::new().green().bold(),
        StatusLevel::Notice => Style::new().bold(),
        StatusLevel::Partial => Style::new().yellow().bold(),
        StatusLevel::Mismatch => Style::new().red().bold(),
    }
}

/// Style for a reconciliation status label
pub fn check_style(status: &str) -> Style {
    match status {
        "agreed" => Style::new().green(),
        "partial" => Style::new().yellow(),
        "mismatch" => level_style(StatusLevel::Mismatch),
        _ => Style::new().dimmed(),
    }
}
