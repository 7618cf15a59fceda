use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Activity type marking the first occurrence of an issue.
pub const FIRST_SEEN: &str = "first_seen";
/// Activity type marking an issue as resolved.
pub const SET_RESOLVED: &str = "set_resolved";
/// Issue status excluded from repair time calculation.
pub const UNRESOLVED: &str = "unresolved";

/// Sentry organization, as embedded in a project record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentryOrganization {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// URL slug used in project-scoped endpoints
    pub slug: String,
}

/// Sentry project, the scope issues live under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentryProject {
    pub name: String,
    pub slug: String,
    pub organization: SentryOrganization,
}

/// Project reference embedded in an issue record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueProject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Entry of the paginated issue listing. Only the id is needed, the
/// full record comes from the issue detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRef {
    pub id: String,
}

/// Sentry issue with its lifecycle activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentryIssue {
    pub id: String,
    /// Open set of values, e.g. "resolved", "unresolved", "ignored"
    pub status: String,
    #[serde(default)]
    pub project: IssueProject,
    /// Newest first, as delivered by Sentry
    #[serde(default, rename = "activity")]
    pub activities: Vec<SentryActivity>,
}

/// Lifecycle marker recorded against an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentryActivity {
    pub id: String,
    #[serde(rename = "dateCreated")]
    pub date_created: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One occurrence of an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentryEvent {
    #[serde(rename = "eventID")]
    pub id: String,
    #[serde(rename = "dateCreated")]
    pub date_created: DateTime<Utc>,
}
