use super::{cloud_label, pick_badge, present_counts, present_reconciliation, source_label};
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, RegionEntry, StatusBadge, StatusLevel, StatusViewModel,
    ZoneEntry,
};
use cloudboard_engine::{RegionRollup, StatusSummary, TotalSource};
use cloudboard_types::{CloudProvider, RegionName, RegionScope, format_timestamp};

pub fn present_status(summary: &StatusSummary, cloud: Option<CloudProvider>) -> StatusViewModel {
    let zones = summary
        .zone_breakdown
        .iter()
        .filter_map(|row| {
            let region = row.scope.region()?;
            let zone = row.scope.zone()?;
            Some(ZoneEntry {
                region: region.to_string(),
                zone: zone.to_string(),
                running: row.counts.running,
                stopped: row.counts.stopped,
                terminated: row.counts.terminated,
            })
        })
        .collect();

    StatusViewModel {
        cloud: cloud_label(cloud),
        region: summary.scope.to_string(),
        running: summary.running(),
        stopped: summary.stopped(),
        terminated: summary.terminated(),
        source: source_label(summary.source),
        check: present_reconciliation(&summary.check, |c| present_counts(*c)),
        zones,
        regions: summary.region_breakdown.iter().map(present_region).collect(),
        retrieved_at: summary.retrieved_at.as_ref().map(format_timestamp),
    }
}

pub(super) fn present_region(rollup: &RegionRollup) -> RegionEntry {
    RegionEntry {
        region: rollup.region.to_string(),
        running: rollup.counts.running,
        stopped: rollup.counts.stopped,
        terminated: rollup.counts.terminated,
        zone_count: rollup.zone_count,
        source: source_label(rollup.source),
        check: rollup.check.label().to_string(),
    }
}

/// Badges and tips for a status summary
pub(super) fn status_notes(
    summary: &StatusSummary,
    known_regions: &[RegionName],
) -> (Vec<StatusBadge>, Vec<Guidance>) {
    let mut badges = Vec::new();
    let mut tips = Vec::new();

    // counts either agree exactly or mismatch; there is no partial coverage
    if let Some(level) = StatusLevel::for_check(&summary.check) {
        badges.push(StatusBadge::new(
            level,
            format!("Supplied {} total disagrees with its components", summary.scope),
        ));
        tips.push(Guidance::new("Compare every supplied total", "cloudboard check"));
    }

    match &summary.scope {
        RegionScope::Specific(region) if !known_regions.contains(region) => {
            badges.push(StatusBadge::notice(format!(
                "Region '{}' is not in the status feed",
                region
            )));
            tips.push(Guidance::new("List available regions", "cloudboard regions"));
        }
        RegionScope::All if summary.source == TotalSource::Empty => {
            badges.push(StatusBadge::notice("Status feed is empty"));
        }
        _ => {}
    }

    (badges, tips)
}

pub fn present_status_result(
    summary: &StatusSummary,
    cloud: Option<CloudProvider>,
    known_regions: &[RegionName],
) -> CommandResultViewModel<StatusViewModel> {
    let (badges, tips) = status_notes(summary, known_regions);
    CommandResultViewModel::new(present_status(summary, cloud))
        .with_optional_badge(pick_badge(badges))
        .with_suggestions(tips)
}
