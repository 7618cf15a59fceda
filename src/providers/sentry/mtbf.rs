use log::debug;

use crate::error::{ReliabilityError, Result};
use crate::reliability::{ComputedEvent, TimeUnit};

use super::mttr::seconds_between;
use super::types::SentryEvent;

pub(super) struct MtbfMetrics {
    /// Mean gap between consecutive events, in the report unit
    pub mtbf: f64,
    pub gaps: Vec<ComputedEvent>,
}

/// Orders events oldest first. The sort is stable, so events sharing a
/// timestamp keep their fetch order.
pub(super) fn sort_events_by_time(events: &mut [SentryEvent]) {
    events.sort_by_key(|event| event.date_created);
}

/// Mean time between failures over every event of every issue.
///
/// Events are sorted by time before gaps are taken, so input order doesn't matter.
///
/// # Errors
///
/// Returns [`ReliabilityError::NotEnoughEvents`] with fewer than two events.
pub(super) fn calculate_mtbf(events: &[SentryEvent], unit: TimeUnit) -> Result<MtbfMetrics> {
    if events.len() < 2 {
        return Err(ReliabilityError::NotEnoughEvents(events.len()));
    }

    let mut sorted = events.to_vec();
    sort_events_by_time(&mut sorted);

    debug!("Event #{} is new, not computed", sorted[0].id);

    let gaps: Vec<ComputedEvent> = sorted
        .windows(2)
        .map(|pair| {
            let seconds = seconds_between(pair[0].date_created, pair[1].date_created);
            debug!("Event #{} took {seconds:.0} seconds to appear", pair[1].id);
            ComputedEvent {
                event_id: pair[1].id.clone(),
                occurred_at: pair[1].date_created,
                duration: unit.convert_seconds(seconds),
            }
        })
        .collect();

    let total: f64 = gaps.iter().map(|gap| gap.duration).sum();

    #[allow(clippy::cast_precision_loss)]
    let mtbf = total / gaps.len() as f64;

    Ok(MtbfMetrics { mtbf, gaps })
}
