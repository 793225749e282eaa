use chrono::{DateTime, Utc};

/// `"2025-08-14T09:30:00Z" -> "2025-08-14 09:30:00 UTC"`; unparseable input is returned as-is
pub fn format_retrieved_at(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(ts) => ts
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        Err(_) => value.to_string(),
    }
}
