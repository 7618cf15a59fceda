use chrono::Utc;
use log::{debug, info, warn};

use crate::auth::Token;
use crate::error::Result;
use crate::output::PhaseProgress;
use crate::reliability::{ReliabilityReport, TimeUnit};

use super::client::SentryClient;
use super::mtbf::calculate_mtbf;
use super::mttr::calculate_mttr;
use super::types::{SentryEvent, SentryIssue, SentryProject};

/// Sentry reliability provider.
///
/// Walks projects, their issues and the issues' events in that order, then
/// computes MTTR from issue activity and MTBF from event timestamps.
pub struct SentryProvider {
    client: SentryClient,
    project_filter: Vec<String>,
}

impl SentryProvider {
    /// Creates a provider for the Sentry API at `base_url`.
    ///
    /// An empty `project_filter` keeps every project; otherwise only projects
    /// whose slug is listed are scanned.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client can't be built.
    pub fn new(base_url: &str, token: Token, project_filter: Vec<String>) -> Result<Self> {
        let client = SentryClient::new(base_url, token)?;

        Ok(Self {
            client,
            project_filter,
        })
    }

    async fn fetch_projects(&self) -> Result<Vec<SentryProject>> {
        let projects = self.client.fetch_projects().await?;
        info!("Fetched {} projects", projects.len());

        if self.project_filter.is_empty() {
            return Ok(projects);
        }

        for slug in &self.project_filter {
            if !projects.iter().any(|p| &p.slug == slug) {
                warn!("Project '{slug}' not found or not visible to this token");
            }
        }

        Ok(projects
            .into_iter()
            .filter(|p| self.project_filter.contains(&p.slug))
            .collect())
    }

    async fn fetch_issues(&self, projects: &[SentryProject]) -> Result<Vec<SentryIssue>> {
        let mut issues = Vec::new();

        for project in projects {
            let refs = self.client.fetch_issue_refs(project).await?;
            debug!("Project '{}' has {} issues", project.slug, refs.len());

            for issue_ref in refs {
                issues.push(self.client.fetch_issue(&issue_ref.id).await?);
            }
        }

        info!("Fetched {} issues", issues.len());
        Ok(issues)
    }

    async fn fetch_events(&self, issues: &[SentryIssue]) -> Result<Vec<SentryEvent>> {
        let mut events = Vec::new();

        for issue in issues {
            events.extend(self.client.fetch_events(issue).await?);
        }

        info!("Fetched {} events", events.len());
        Ok(events)
    }

    /// Collects MTTR and, unless `skip_events` is set, MTBF for every visible project.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any Sentry request fails or returns an undecodable body
    /// - A paginated response carries a missing or malformed `Link` header
    /// - No issue has a `first_seen`/`set_resolved` pair
    /// - Fewer than two events were fetched (when events are collected)
    pub async fn collect_reliability(
        &self,
        unit: TimeUnit,
        skip_events: bool,
    ) -> Result<ReliabilityReport> {
        info!(
            "Starting reliability collection against {}",
            self.client.api_url()
        );

        let progress = PhaseProgress::start_phase_1();
        let projects = self.fetch_projects().await?;

        if projects.is_empty() {
            warn!("No projects to scan");
        }

        let progress = progress.finish_phase_1_start_phase_2(projects.len());
        let issues = self.fetch_issues(&projects).await?;

        let progress = progress.finish_phase_2_start_phase_3(issues.len(), skip_events);
        let events = if skip_events {
            None
        } else {
            Some(self.fetch_events(&issues).await?)
        };

        debug!(
            "Dataset: {} projects, {} issues, {} events",
            projects.len(),
            issues.len(),
            events.as_ref().map_or(0, Vec::len)
        );

        let mttr = calculate_mttr(&issues, unit)?;
        info!("MTTR: {:.0} {unit}", mttr.mttr);

        let mtbf = events
            .as_deref()
            .map(|events| calculate_mtbf(events, unit))
            .transpose()?;
        if let Some(mtbf) = &mtbf {
            info!("MTBF: {:.0} {unit}", mtbf.mtbf);
        }

        progress.finish_phase_3();

        let (mtbf, event_gaps) = match mtbf {
            Some(metrics) => (Some(metrics.mtbf), metrics.gaps),
            None => (None, Vec::new()),
        };

        Ok(ReliabilityReport {
            collected_at: Utc::now(),
            unit,
            total_projects: projects.len(),
            total_issues: issues.len(),
            total_events: events.as_ref().map(Vec::len),
            repair_pairs: mttr.pairs,
            mttr: mttr.mttr,
            mtbf,
            activities: mttr.activities,
            event_gaps,
        })
    }
}
