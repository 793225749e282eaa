//! Assertions over the CLI's JSON output.
//!
//! Commands print `{"badge": ..., "content": ..., "suggestions": ...}`; the
//! helpers here take the object holding the fields (usually `json["content"]`,
//! or `json["content"]["status"]` for the combined view).

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert running/stopped/terminated counts of a status object.
pub fn assert_counts(status: &Value, running: u64, stopped: u64, terminated: u64) -> Result<()> {
    let field = |name: &str| {
        status[name]
            .as_u64()
            .with_context(|| format!("Expected numeric '{}' in status object", name))
    };

    let actual = (field("running")?, field("stopped")?, field("terminated")?);
    if actual != (running, stopped, terminated) {
        anyhow::bail!(
            "Expected counts {:?}, got {:?}",
            (running, stopped, terminated),
            actual
        );
    }

    Ok(())
}

/// Assert the zone names of a status object, in order.
pub fn assert_zone_names(status: &Value, expected: &[&str]) -> Result<()> {
    let zones = status["zones"]
        .as_array()
        .context("Expected 'zones' array in status object")?;

    let names: Vec<&str> = zones.iter().filter_map(|z| z["zone"].as_str()).collect();
    if names != expected {
        anyhow::bail!("Expected zones {:?}, got {:?}", expected, names);
    }

    Ok(())
}

/// Assert the service names of a cost object, in order.
pub fn assert_service_names(cost: &Value, expected: &[&str]) -> Result<()> {
    let services = cost["services"]
        .as_array()
        .context("Expected 'services' array in cost object")?;

    let names: Vec<&str> = services
        .iter()
        .filter_map(|s| s["service"].as_str())
        .collect();
    if names != expected {
        anyhow::bail!("Expected services {:?}, got {:?}", expected, names);
    }

    Ok(())
}

/// Assert the total of a cost object within a cent.
pub fn assert_cost_total(cost: &Value, expected: f64) -> Result<()> {
    let total = cost["total"]
        .as_f64()
        .context("Expected numeric 'total' in cost object")?;

    if (total - expected).abs() > 0.01 {
        anyhow::bail!("Expected cost total {}, got {}", expected, total);
    }

    Ok(())
}
