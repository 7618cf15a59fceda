use chrono::{DateTime, Utc};
use log::debug;

use crate::error::{ReliabilityError, Result};
use crate::reliability::{ComputedActivity, TimeUnit};

use super::types::{SentryActivity, SentryIssue, FIRST_SEEN, SET_RESOLVED, UNRESOLVED};

pub(super) struct MttrMetrics {
    /// Mean over every repair pair, in the report unit
    pub mttr: f64,
    pub pairs: usize,
    pub activities: Vec<ComputedActivity>,
}

#[allow(clippy::cast_precision_loss)]
pub(super) fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}

/// Durations, in seconds, of every `first_seen` directly followed by `set_resolved`.
///
/// Activities arrive newest first, so the list is walked from the back. The
/// record right after a `first_seen` is consumed whether or not it resolves it.
pub(super) fn repair_durations(activities: &[SentryActivity]) -> Vec<f64> {
    debug!("Looking at {} activities", activities.len());

    let mut durations = Vec::new();
    let mut index = activities.len();

    while index > 0 {
        index -= 1;
        let seen = &activities[index];
        debug!("Activity #{} is '{}'", seen.id, seen.kind);

        if seen.kind != FIRST_SEEN {
            continue;
        }

        let Some(next) = index.checked_sub(1) else {
            debug!("Activity #{} has nothing after it", seen.id);
            break;
        };
        index = next;

        let candidate = &activities[index];
        if candidate.kind == SET_RESOLVED {
            let duration = seconds_between(seen.date_created, candidate.date_created);
            debug!(
                "Activity #{} resolved in sequence, took {duration:.0} seconds",
                candidate.id
            );
            durations.push(duration);
        } else {
            debug!(
                "Activity #{} is '{}', first_seen #{} discarded",
                candidate.id, candidate.kind, seen.id
            );
        }
    }

    durations
}

/// Mean time to repair across every issue that isn't unresolved.
///
/// The mean is weighted by pair: the sum of all pair durations over the pair count.
///
/// # Errors
///
/// Returns [`ReliabilityError::NoRepairPairs`] when no issue has a pair.
pub(super) fn calculate_mttr(issues: &[SentryIssue], unit: TimeUnit) -> Result<MttrMetrics> {
    debug!("Found {} issues", issues.len());

    let mut activities = Vec::new();
    let mut total_seconds = 0.0;
    let mut pairs = 0;

    for issue in issues {
        if issue.status == UNRESOLVED {
            debug!("Issue #{} dropped, unresolved", issue.id);
            continue;
        }

        let durations = repair_durations(&issue.activities);
        if durations.is_empty() {
            debug!("Issue #{} has no repair pairs", issue.id);
            continue;
        }

        let issue_seconds: f64 = durations.iter().sum();
        total_seconds += issue_seconds;
        pairs += durations.len();

        activities.push(ComputedActivity {
            issue_id: issue.id.clone(),
            issue_status: issue.status.clone(),
            project_name: issue.project.name.clone(),
            duration: unit.convert_seconds(issue_seconds),
            pairs: durations.len(),
        });
    }

    if pairs == 0 {
        return Err(ReliabilityError::NoRepairPairs);
    }

    #[allow(clippy::cast_precision_loss)]
    let mean_seconds = total_seconds / pairs as f64;

    Ok(MttrMetrics {
        mttr: unit.convert_seconds(mean_seconds),
        pairs,
        activities,
    })
}
