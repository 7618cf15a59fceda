#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use mockito::{Matcher, Mock, ServerGuard};

    use crate::auth::Token;
    use crate::error::ReliabilityError;
    use crate::providers::SentryProvider;
    use crate::reliability::TimeUnit;

    fn last_page(base: &str) -> String {
        format!(
            r#"<{base}/>; rel="previous"; results="false"; cursor="0:0:1", <{base}/>; rel="next"; results="false"; cursor="0:100:0""#
        )
    }

    async fn mock_page(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
        let link = last_page(&server.url());
        server
            .mock("GET", path)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("link", &link)
            .with_body(body)
            .create_async()
            .await
    }

    async fn mock_detail(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
        server
            .mock("GET", path)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await
    }

    async fn mock_projects_and_issues(server: &mut ServerGuard) -> Vec<Mock> {
        let mut mocks = Vec::new();
        mocks.push(mock_page(
            server,
            "/0/projects/",
            r#"[
                {"name": "API", "slug": "api", "organization": {"slug": "acme"}},
                {"name": "Web", "slug": "web", "organization": {"slug": "acme"}}
            ]"#,
        )
        .await);
        mocks.push(mock_page(
            server,
            "/0/projects/acme/api/issues/",
            r#"[{"id": "1"}, {"id": "2"}]"#,
        )
        .await);
        mocks.push(mock_page(server, "/0/projects/acme/web/issues/", r#"[{"id": "3"}]"#).await);

        mocks.push(mock_detail(
            server,
            "/0/issues/1/",
            r#"{"id": "1", "status": "resolved", "project": {"name": "API", "slug": "api"},
                "activity": [
                    {"id": "12", "type": "set_resolved", "dateCreated": "2018-03-01T10:04:00Z"},
                    {"id": "11", "type": "first_seen", "dateCreated": "2018-03-01T10:00:00Z"}
                ]}"#,
        )
        .await);
        mocks.push(mock_detail(
            server,
            "/0/issues/2/",
            r#"{"id": "2", "status": "unresolved", "project": {"name": "API", "slug": "api"},
                "activity": [
                    {"id": "22", "type": "set_resolved", "dateCreated": "2018-03-02T10:00:00Z"},
                    {"id": "21", "type": "first_seen", "dateCreated": "2018-03-01T10:00:00Z"}
                ]}"#,
        )
        .await);
        mocks.push(mock_detail(
            server,
            "/0/issues/3/",
            r#"{"id": "3", "status": "resolved", "project": {"name": "Web", "slug": "web"},
                "activity": [
                    {"id": "32", "type": "set_resolved", "dateCreated": "2018-03-01T10:02:00Z"},
                    {"id": "31", "type": "first_seen", "dateCreated": "2018-03-01T10:00:00Z"}
                ]}"#,
        )
        .await);

        mocks
    }

    #[tokio::test]
    async fn collects_mttr_and_mtbf_across_projects() {
        let mut server = mockito::Server::new_async().await;
        let _mocks = mock_projects_and_issues(&mut server).await;

        let _first = mock_page(
            &mut server,
            "/0/issues/1/events/",
            r#"[{"eventID": "a", "dateCreated": "2018-03-01T10:00:30Z"},
                {"eventID": "b", "dateCreated": "2018-03-01T10:00:00Z"}]"#,
        )
        .await;
        let _second = mock_page(&mut server, "/0/issues/2/events/", "[]").await;
        let _third = mock_page(
            &mut server,
            "/0/issues/3/events/",
            r#"[{"eventID": "c", "dateCreated": "2018-03-01T10:00:10Z"}]"#,
        )
        .await;

        let provider = SentryProvider::new(&server.url(), Token::from("secret"), vec![]).unwrap();
        let report = provider
            .collect_reliability(TimeUnit::Seconds, false)
            .await
            .unwrap();

        assert_eq!(report.total_projects, 2);
        assert_eq!(report.total_issues, 3);
        assert_eq!(report.total_events, Some(3));

        // Issue 2 is unresolved: (240 + 120) / 2
        assert_eq!(report.repair_pairs, 2);
        assert_eq!(report.mttr, 180.0);
        let ids: Vec<_> = report.activities.iter().map(|a| a.issue_id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(report.activities[1].project_name, "Web");

        // Sorted: b(0) c(10) a(30) -> gaps 10, 20
        assert_eq!(report.mtbf, Some(15.0));
        assert_eq!(report.event_gaps.len(), 2);
        assert_eq!(report.event_gaps[0].event_id, "c");
    }

    #[tokio::test]
    async fn skipping_events_never_calls_events_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let _mocks = mock_projects_and_issues(&mut server).await;

        let events = server
            .mock("GET", Matcher::Regex(r"^/0/issues/\d+/events/$".to_string()))
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let provider = SentryProvider::new(&server.url(), Token::from("secret"), vec![]).unwrap();
        let report = provider
            .collect_reliability(TimeUnit::Minutes, true)
            .await
            .unwrap();

        assert_eq!(report.mttr, 3.0);
        assert_eq!(report.mtbf, None);
        assert_eq!(report.total_events, None);
        assert!(report.event_gaps.is_empty());
        events.assert_async().await;
    }

    #[tokio::test]
    async fn project_filter_limits_scanned_projects() {
        let mut server = mockito::Server::new_async().await;
        let _mocks = mock_projects_and_issues(&mut server).await;

        let provider = SentryProvider::new(
            &server.url(),
            Token::from("secret"),
            vec!["web".to_string()],
        )
        .unwrap();
        let report = provider
            .collect_reliability(TimeUnit::Seconds, true)
            .await
            .unwrap();

        assert_eq!(report.total_projects, 1);
        assert_eq!(report.total_issues, 1);
        assert_eq!(report.mttr, 120.0);
    }

    #[tokio::test]
    async fn too_few_events_aborts_the_run() {
        let mut server = mockito::Server::new_async().await;
        let _mocks = mock_projects_and_issues(&mut server).await;
        let mut _events = Vec::new();
        for path in ["/0/issues/1/events/", "/0/issues/2/events/", "/0/issues/3/events/"] {
            _events.push(mock_page(&mut server, path, "[]").await);
        }

        let provider = SentryProvider::new(&server.url(), Token::from("secret"), vec![]).unwrap();
        let err = provider
            .collect_reliability(TimeUnit::Seconds, false)
            .await
            .unwrap_err();

        assert!(matches!(err, ReliabilityError::NotEnoughEvents(0)));
    }

    #[tokio::test]
    async fn no_resolved_issues_aborts_the_run() {
        let mut server = mockito::Server::new_async().await;
        let _projects = mock_page(
            &mut server,
            "/0/projects/",
            r#"[{"name": "API", "slug": "api", "organization": {"slug": "acme"}}]"#,
        )
        .await;
        let _issues = mock_page(&mut server, "/0/projects/acme/api/issues/", "[]").await;

        let provider = SentryProvider::new(&server.url(), Token::from("secret"), vec![]).unwrap();
        let err = provider
            .collect_reliability(TimeUnit::Seconds, true)
            .await
            .unwrap_err();

        assert!(matches!(err, ReliabilityError::NoRepairPairs));
    }
}
