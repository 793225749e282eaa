use super::{cloud_label, pick_badge, present_reconciliation, source_label};
use crate::presentation::view_models::{
    CommandResultViewModel, CostViewModel, Guidance, ServiceEntry, StatusBadge, StatusLevel,
};
use cloudboard_engine::{CostSummary, TotalCheck, format_month_label};
use cloudboard_types::{CloudProvider, MonthYear, format_timestamp};

pub fn present_cost(
    summary: &CostSummary,
    cloud: Option<CloudProvider>,
    currency: &str,
) -> CostViewModel {
    let services = summary
        .services
        .iter()
        .filter_map(|row| {
            let service = row.line.service()?;
            Some(ServiceEntry {
                service: service.to_string(),
                amount: row.total_amount,
                pct: summary.share_of(row),
                pct_supplied: row.pct_of_total.is_some(),
            })
        })
        .collect();

    CostViewModel {
        cloud: cloud_label(cloud),
        month: summary.month.map(|m| m.to_string()),
        month_label: summary.month.as_ref().map(format_month_label),
        currency: currency.to_string(),
        total: summary.total,
        services,
        covered_pct: summary.covered_share(),
        source: source_label(summary.source),
        check: present_reconciliation(&summary.check, |v| *v),
        retrieved_at: summary.retrieved_at.as_ref().map(format_timestamp),
    }
}

pub(super) fn cost_notes(
    summary: &CostSummary,
    known_months: &[MonthYear],
) -> (Vec<StatusBadge>, Vec<Guidance>) {
    let mut badges = Vec::new();
    let mut tips = Vec::new();

    match summary.month {
        None => badges.push(StatusBadge::notice("Cost feed is empty")),
        Some(month) if !known_months.contains(&month) => {
            badges.push(StatusBadge::notice(format!(
                "No costs recorded for {}",
                format_month_label(&month)
            )));
            tips.push(Guidance::new("List billed months", "cloudboard months"));
        }
        Some(_) => {}
    }

    match summary.check {
        TotalCheck::Mismatch { .. } => {
            badges.push(StatusBadge::new(
                StatusLevel::Mismatch,
                "Services add up to more than the supplied month total",
            ));
            tips.push(Guidance::new("Compare every supplied total", "cloudboard check"));
        }
        TotalCheck::Partial { .. } => {
            badges.push(StatusBadge::new(
                StatusLevel::Partial,
                "Some services are below the feed's reporting threshold",
            ));
        }
        TotalCheck::Unchecked | TotalCheck::Agreed => {}
    }

    (badges, tips)
}

pub fn present_cost_result(
    summary: &CostSummary,
    cloud: Option<CloudProvider>,
    currency: &str,
    known_months: &[MonthYear],
) -> CommandResultViewModel<CostViewModel> {
    let (badges, tips) = cost_notes(summary, known_months);
    CommandResultViewModel::new(present_cost(summary, cloud, currency))
        .with_optional_badge(pick_badge(badges))
        .with_suggestions(tips)
}
