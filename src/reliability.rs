use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Unit used for every duration the tool reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
}

impl TimeUnit {
    #[must_use]
    pub fn convert_seconds(self, seconds: f64) -> f64 {
        match self {
            Self::Seconds => seconds,
            Self::Minutes => seconds / 60.0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Repair time for one issue that produced at least one `first_seen`/`set_resolved` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedActivity {
    pub issue_id: String,
    pub issue_status: String,
    pub project_name: String,
    /// Sum of the issue's pair durations, in the report unit
    pub duration: f64,
    pub pairs: usize,
}

/// Gap between an event and the event right before it in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedEvent {
    pub event_id: String,
    pub occurred_at: DateTime<Utc>,
    pub duration: f64,
}

/// Everything one run collected and computed.
#[derive(Debug, Serialize)]
pub struct ReliabilityReport {
    pub collected_at: DateTime<Utc>,
    pub unit: TimeUnit,
    pub total_projects: usize,
    pub total_issues: usize,
    /// `None` when the events phase was skipped
    pub total_events: Option<usize>,
    pub repair_pairs: usize,
    pub mttr: f64,
    pub mtbf: Option<f64>,
    pub activities: Vec<ComputedActivity>,
    pub event_gaps: Vec<ComputedEvent>,
}
