//! App endpoint tests.
//!
//! This module tests the Splunk apps API:
//! - Listing installed apps and walking pages by offset
//! - Reading one app with its ACL
//! - Enabling/disabling apps
//! - Creating and installing apps
//!
//! # Invariants
//! - Mutations never change an entity read earlier; a later read does
//! - Entities are named `apps/local/{title}`

mod common;

use common::*;
use splunk_sdk::models::{Application, ApplicationAttributes};
use splunk_sdk::{Entity, ResourceName};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};

#[tokio::test]
async fn test_list_apps() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/apps/local"))
        .and(query_param("count", "0"))
        .and(header("Authorization", "Splunk test-token"))
        .respond_with(xml(200, "apps/list_page_0.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    let apps = service
        .applications()
        .get_all(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(apps.len(), 2);
    let search = apps.find("search").unwrap();
    assert_eq!(
        search.name(),
        &ResourceName::new(["apps", "local", "search"])
    );
    assert_eq!(
        search.content().label.as_deref(),
        Some("Search & Reporting")
    );
    assert_eq!(search.content().version.as_deref(), Some("9.1.2"));
    assert!(!search.content().disabled);
    assert_eq!(search.content().visible, Some(true));
    assert_eq!(
        search.link("disable"),
        Some("/servicesNS/nobody/system/apps/local/search/disable")
    );

    let acl = search.acl().unwrap();
    assert_eq!(acl.app, "system");
    assert_eq!(acl.owner, "nobody");
    assert_eq!(acl.sharing, "app");
    assert_eq!(acl.removable, Some(false));
    let perms = acl.perms.as_ref().unwrap();
    assert_eq!(perms.read, vec!["*"]);
    assert_eq!(perms.write, vec!["admin", "power"]);

    assert_eq!(apps[1].title(), "launcher");
}

#[tokio::test]
async fn test_pagination_walk() {
    let mock_server = MockServer::start().await;

    for (offset, fixture) in [
        ("0", "apps/list_page_0.xml"),
        ("2", "apps/list_page_2.xml"),
        ("4", "apps/list_page_4.xml"),
    ] {
        Mock::given(method("GET"))
            .and(path("/services/apps/local"))
            .and(query_param("offset", offset))
            .and(query_param("count", "2"))
            .respond_with(xml(200, fixture))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let service = service(&mock_server).await;
    let apps = service.applications();
    let cancel = CancellationToken::new();

    let mut offset = 0;
    let mut titles = Vec::new();
    loop {
        let page = apps.get_slice(offset, 2, &[], &cancel).await.unwrap();
        assert_eq!(page.pagination().offset, offset);
        assert_eq!(page.pagination().total_results, 5);
        titles.extend(page.iter().map(|app| app.title().to_string()));
        match page.pagination().next_offset() {
            Some(next) => offset = next,
            None => break,
        }
    }

    assert_eq!(
        titles,
        vec!["search", "launcher", "learned", "splunk_httpinput", "legacy"]
    );
}

#[tokio::test]
async fn test_get_app() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/apps/local/search"))
        .respond_with(xml(200, "apps/search.xml"))
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    let app = service
        .applications()
        .entity("search")
        .get(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(app.title(), "search");
    assert_eq!(app.namespace(), &Namespace::Default);
    assert_eq!(app.content().author.as_deref(), Some("Splunk"));
    assert_eq!(
        app.field("label").and_then(|v| v.as_str()),
        Some("Search & Reporting")
    );
}

#[tokio::test]
async fn test_disable_does_not_touch_local_state() {
    let mock_server = MockServer::start().await;

    // First read sees the app enabled, every later read sees it disabled.
    Mock::given(method("GET"))
        .and(path("/services/apps/local/search"))
        .respond_with(xml(200, "apps/search.xml"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/apps/local/search"))
        .respond_with(xml(200, "apps/search_disabled.xml"))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services/apps/local/search/disable"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    let cancel = CancellationToken::new();
    let mut app: Entity<Application> = service
        .applications()
        .entity("search")
        .get(&cancel)
        .await
        .unwrap();
    assert!(!app.content().disabled);

    app.endpoint().disable(&cancel).await.unwrap();
    assert!(!app.content().disabled);

    app.refresh(&cancel).await.unwrap();
    assert!(app.content().disabled);
}

#[tokio::test]
async fn test_enable_app() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/apps/local/legacy/enable"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    service
        .applications()
        .entity("legacy")
        .enable(&CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_from_template() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/apps/local"))
        .and(body_string_contains("name=search"))
        .and(body_string_contains("template=barebones"))
        .and(body_string_contains("label=Search+%26+Reporting"))
        .respond_with(xml(201, "apps/search.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    let attributes = ApplicationAttributes {
        label: Some("Search & Reporting".to_string()),
        ..Default::default()
    };
    let app = service
        .applications()
        .create_from_template("search", "barebones", &attributes, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(app.name(), &ResourceName::new(["apps", "local", "search"]));
}

#[tokio::test]
async fn test_install_names_app_from_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/apps/local"))
        .and(body_string_contains("filename=true"))
        .and(body_string_contains("name=%2Ftmp%2Fsearch.tgz"))
        .and(body_string_contains("update=false"))
        .respond_with(xml(201, "apps/search.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    let app = service
        .applications()
        .install("/tmp/search.tgz", None, false, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(app.title(), "search");
    assert_eq!(app.name(), &ResourceName::new(["apps", "local", "search"]));
}

#[tokio::test]
async fn test_create_rejects_empty_name_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    let err = service
        .applications()
        .create("", &[], &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_remove_app() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/services/apps/local/legacy"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    service
        .applications()
        .entity("legacy")
        .remove(&CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_app_setup_info() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/apps/local/search/setup"))
        .respond_with(xml(200, "apps/setup.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    let setup = service
        .applications()
        .entity("search")
        .setup_info(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        setup.name(),
        &ResourceName::new(["apps", "local", "search", "setup"])
    );
    assert_eq!(
        setup.content().setup.as_deref(),
        Some("<setup><block title=\"Search\"/></setup>")
    );
    assert_eq!(setup.content().refresh, Some(false));
}

#[tokio::test]
async fn test_app_update_info() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/apps/local/legacy/update"))
        .respond_with(xml(200, "apps/update.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    let update = service
        .applications()
        .entity("legacy")
        .update_info(&CancellationToken::new())
        .await
        .unwrap();

    let content = update.content();
    assert_eq!(content.version.as_deref(), Some("2.0.1"));
    assert_eq!(content.checksum_type.as_deref(), Some("md5"));
    assert_eq!(content.size, Some(104857));
    assert_eq!(content.implicit_id_required, Some(false));
    assert_eq!(content.app_url, None);
}

#[tokio::test]
async fn test_app_package() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/apps/local/legacy/package"))
        .respond_with(xml(200, "apps/package.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    let archive = service
        .applications()
        .entity("legacy")
        .package(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        archive.content().path.as_deref(),
        Some("/opt/splunk/share/splunk/app_packages/legacy.spl")
    );
    assert_eq!(
        archive.content().url.as_deref(),
        Some("https://localhost:8089/static/app-packages/legacy.spl")
    );
}

#[tokio::test]
async fn test_update_attributes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/apps/local/legacy"))
        .and(body_string_contains("label=Legacy+App"))
        .and(body_string_contains("visible=false"))
        .and(body_string_contains("check_for_updates=true"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    let attributes = ApplicationAttributes {
        label: Some("Legacy App".to_string()),
        visible: Some(false),
        ..Default::default()
    };
    service
        .applications()
        .entity("legacy")
        .update_attributes(&attributes, Some(true), &CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reload_apps() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/apps/local/_reload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    service
        .applications()
        .reload(&CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dot_segment_app_name_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    let err = service
        .applications()
        .entity("..")
        .remove(&CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}
