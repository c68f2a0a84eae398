//! Saved search endpoint tests.
//!
//! This module tests the Splunk saved searches API:
//! - Listing saved searches through a wildcard namespace
//! - Dispatching a saved search
//! - Reading its job history
//!
//! # Invariants
//! - An entity read through a wildcard namespace lives in the ACL's owner/app

mod common;

use common::*;
use splunk_sdk::ResourceName;
use splunk_sdk::models::DispatchArgs;
use wiremock::matchers::{body_string_contains, method, path};

#[tokio::test]
async fn test_wildcard_listing_resolves_namespace_from_acl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servicesNS/-/-/saved/searches"))
        .respond_with(xml(200, "saved_searches/list.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await.with_namespace(Namespace::any());
    let searches = service
        .saved_searches()
        .get_all(&CancellationToken::new())
        .await
        .unwrap();

    let search = searches.find("Errors in the last hour").unwrap();
    assert_eq!(search.namespace(), &Namespace::new("admin", "search"));
    assert_eq!(
        search.address().unwrap().path(),
        "/servicesNS/admin/search/saved/searches/Errors%20in%20the%20last%20hour"
    );

    let content = search.content();
    assert_eq!(content.search, "index=_internal log_level=ERROR");
    assert_eq!(content.is_scheduled, Some(true));
    assert_eq!(content.cron_schedule.as_deref(), Some("*/30 * * * *"));
    assert_eq!(content.dispatch_earliest_time.as_deref(), Some("-1h"));
    assert_eq!(content.email_to.as_deref(), Some("ops@example.com"));
    // An empty `perms` value reads as no permissions block.
    assert_eq!(search.acl().unwrap().perms, None);
}

#[tokio::test]
async fn test_dispatch_returns_sid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/servicesNS/admin/search/saved/searches/Errors%20in%20the%20last%20hour/dispatch",
        ))
        .and(body_string_contains("dispatch.earliest_time=-24h"))
        .and(body_string_contains("trigger_actions=1"))
        .and(body_string_contains("args.host=web01"))
        .respond_with(xml(201, "saved_searches/dispatch.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server)
        .await
        .with_namespace(Namespace::new("admin", "search"));
    let args = DispatchArgs {
        earliest_time: Some("-24h".to_string()),
        trigger_actions: Some(true),
        template_args: vec![("host".to_string(), "web01".to_string())],
        ..Default::default()
    };
    let sid = service
        .saved_searches()
        .entity("Errors in the last hour")
        .dispatch(&args, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(sid, "admin__admin__search__Errors_at_1709590400_7");
}

#[tokio::test]
async fn test_history_addresses_jobs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/servicesNS/admin/search/saved/searches/Errors%20in%20the%20last%20hour/history",
        ))
        .respond_with(xml(200, "saved_searches/history.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server)
        .await
        .with_namespace(Namespace::new("admin", "search"));
    let history = service
        .saved_searches()
        .entity("Errors in the last hour")
        .history(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(
        history[0].name(),
        &ResourceName::new([
            "search",
            "jobs",
            "scheduler__admin__search__RMD5a1_at_1709590800_11"
        ])
    );
    assert_eq!(history[0].content().is_done, Some(true));
}

#[tokio::test]
async fn test_create_saved_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/servicesNS/admin/search/saved/searches"))
        .and(body_string_contains("name=Errors+in+the+last+hour"))
        .and(body_string_contains("search=index%3D_internal+log_level%3DERROR"))
        .respond_with(xml(201, "saved_searches/list.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server)
        .await
        .with_namespace(Namespace::new("admin", "search"));
    let search = service
        .saved_searches()
        .create_saved_search(
            "Errors in the last hour",
            "index=_internal log_level=ERROR",
            &[],
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(search.title(), "Errors in the last hour");
}
