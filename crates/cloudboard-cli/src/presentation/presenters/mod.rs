pub mod catalog;
pub mod check;
pub mod cost;
pub mod dashboard;
pub mod status;

pub use catalog::{present_month_list, present_region_list};
pub use check::present_check;
pub use cost::{present_cost, present_cost_result};
pub use dashboard::{present_dashboard, present_dashboard_result, present_watch_frame};
pub use status::{present_status, present_status_result};

use crate::presentation::view_models::{CountsViewModel, ReconciliationViewModel, StatusBadge};
use cloudboard_engine::{TotalCheck, TotalSource};
use cloudboard_types::{CloudProvider, InstanceCounts};

fn source_label(source: TotalSource) -> String {
    match source {
        TotalSource::Supplied => "supplied",
        TotalSource::Computed => "computed",
        TotalSource::Empty => "empty",
    }
    .to_string()
}

fn cloud_label(cloud: Option<CloudProvider>) -> Option<String> {
    cloud.map(|c| c.display_name().to_string())
}

fn present_counts(counts: InstanceCounts) -> CountsViewModel {
    CountsViewModel {
        running: counts.running,
        stopped: counts.stopped,
        terminated: counts.terminated,
    }
}

fn present_reconciliation<T, V>(check: &TotalCheck<T>, map: impl Fn(&T) -> V) -> ReconciliationViewModel<V>
where
    V: serde::Serialize,
{
    let (supplied, computed) = match check {
        TotalCheck::Partial { supplied, computed } | TotalCheck::Mismatch { supplied, computed } => {
            (Some(map(supplied)), Some(map(computed)))
        }
        TotalCheck::Unchecked | TotalCheck::Agreed => (None, None),
    };

    ReconciliationViewModel {
        status: check.label().to_string(),
        supplied,
        computed,
    }
}

/// Most severe badge among the candidates; the first one wins a tie.
fn pick_badge(candidates: Vec<StatusBadge>) -> Option<StatusBadge> {
    candidates
        .into_iter()
        .reduce(|best, badge| if badge.level > best.level { badge } else { best })
}
