use log::debug;
use reqwest::header::LINK;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::Token;
use crate::error::{ReliabilityError, Result};

use super::links::next_cursor;
use super::types::{IssueRef, SentryEvent, SentryIssue, SentryProject};

/// Cursor Sentry treats as "first page".
pub(super) const INITIAL_CURSOR: &str = "0:0:0";

/// Sentry REST API client.
///
/// Requests are issued one at a time; paginated endpoints are drained by
/// following the `Link` header until Sentry reports no further results.
pub struct SentryClient {
    client: Client,
    api_url: Url,
    token: Token,
}

impl SentryClient {
    /// Creates a client for the API rooted at `base_url` (e.g. <https://sentry.io/api/>).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client can't be built or `base_url` isn't a valid URL.
    pub fn new(base_url: &str, token: Token) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sentry-reliability/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReliabilityError::Config(format!("Failed to create HTTP client: {e}")))?;

        // Url::join drops the last path segment unless the base ends with '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let api_url = Url::parse(&normalized)
            .map_err(|e| ReliabilityError::Config(format!("Invalid base URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(self.token.as_str())
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path)
            .map_err(|e| ReliabilityError::Config(format!("Invalid endpoint '{path}': {e}")))
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        debug!("GET {url}");

        let response = self.auth_request(self.client.get(url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(ReliabilityError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    /// Drains a paginated endpoint, one request per page, starting at [`INITIAL_CURSOR`].
    async fn fetch_all<T>(&self, path: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut records = Vec::new();
        let mut cursor = INITIAL_CURSOR.to_string();

        loop {
            let mut url = self.endpoint(path)?;
            url.query_pairs_mut()
                .append_pair("query", "")
                .append_pair("cursor", &cursor);

            let response = self.get(url).await?;

            let link = response
                .headers()
                .get(LINK)
                .ok_or_else(|| {
                    ReliabilityError::Pagination(format!("missing Link header on {path}"))
                })?
                .to_str()
                .map_err(|e| ReliabilityError::Pagination(format!("unreadable Link header: {e}")))?
                .to_string();

            let body = response.text().await?;
            let page: Vec<T> = serde_json::from_str(&body)?;
            debug!("{path} cursor {cursor}: {} records", page.len());
            records.extend(page);

            match next_cursor(&link)? {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Ok(records)
    }

    /// Fetches every project the token can see.
    pub async fn fetch_projects(&self) -> Result<Vec<SentryProject>> {
        self.fetch_all("0/projects/").await
    }

    /// Lists the ids of every issue in a project.
    pub async fn fetch_issue_refs(&self, project: &SentryProject) -> Result<Vec<IssueRef>> {
        let path = format!(
            "0/projects/{}/{}/issues/",
            project.organization.slug, project.slug
        );
        self.fetch_all(&path).await
    }

    /// Fetches the detail record of one issue, activity included.
    pub async fn fetch_issue(&self, id: &str) -> Result<SentryIssue> {
        let url = self.endpoint(&format!("0/issues/{id}/"))?;
        let body = self.get(url).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetches every event of an issue.
    pub async fn fetch_events(&self, issue: &SentryIssue) -> Result<Vec<SentryEvent>> {
        self.fetch_all(&format!("0/issues/{}/events/", issue.id))
            .await
    }
}
