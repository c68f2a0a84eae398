//! Authentication tests.
//!
//! This module tests logging on and off and the Authorization header:
//! - `log_on` exchanges credentials for a session key
//! - Session keys travel as `Splunk <key>`, API tokens as `Bearer <token>`
//! - `log_off` deletes the token on the server and always forgets it locally
//!
//! # What this does NOT handle
//! - Session renewal (not performed by the SDK)

mod common;

use common::*;
use secrecy::SecretString;
use splunk_sdk_config::Config;
use wiremock::matchers::{body_string_contains, header, method, path};

#[tokio::test]
async fn test_log_on_sets_session_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .and(body_string_contains("username=admin"))
        .and(body_string_contains("password=changeme"))
        .respond_with(xml(200, "auth/login.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/apps/local"))
        .and(header(
            "Authorization",
            "Splunk 192fd3e46a31246da7ea7f109e7f95fd",
        ))
        .respond_with(xml(200, "apps/list_page_0.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = anonymous_service(&mock_server);
    let cancel = CancellationToken::new();
    assert!(!service.context().is_authenticated().await);

    service.log_on("admin", "changeme", &cancel).await.unwrap();
    assert!(service.context().is_authenticated().await);

    let apps = service.applications().get_all(&cancel).await.unwrap();
    assert_eq!(apps.len(), 2);
}

#[tokio::test]
async fn test_log_on_shares_token_with_scoped_services() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .respond_with(xml(200, "auth/login.xml"))
        .mount(&mock_server)
        .await;

    let service = anonymous_service(&mock_server);
    let scoped = service.with_namespace(Namespace::new("nobody", "search"));
    service
        .log_on("admin", "changeme", &CancellationToken::new())
        .await
        .unwrap();

    let token = scoped.context().token().await.unwrap();
    assert_eq!(token.expose(), "192fd3e46a31246da7ea7f109e7f95fd");
}

#[tokio::test]
async fn test_log_on_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .respond_with(xml(401, "errors/login_failed.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = anonymous_service(&mock_server);
    let err = service
        .log_on("admin", "wrong", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
    assert_eq!(err.messages()[0].text, "Login failed");
    assert!(!service.context().is_authenticated().await);
}

#[tokio::test]
async fn test_log_on_without_session_key_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<response/>"))
        .mount(&mock_server)
        .await;

    let service = anonymous_service(&mock_server);
    let err = service
        .log_on("admin", "changeme", &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_from_config_with_api_token_sends_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/servicesNS/nobody/search/saved/searches"))
        .and(header("Authorization", "Bearer api-token-value"))
        .respond_with(xml(200, "saved_searches/list.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = Config::with_api_token(
        mock_server.uri(),
        SecretString::new("api-token-value".to_string().into()),
    );
    config.namespace.owner = Some("nobody".to_string());
    config.namespace.app = Some("search".to_string());

    let cancel = CancellationToken::new();
    let service = Service::from_config(&config, &cancel).await.unwrap();
    assert_eq!(service.namespace(), &Namespace::new("nobody", "search"));

    let searches = service.saved_searches().get_all(&cancel).await.unwrap();
    assert_eq!(searches.len(), 1);
}

#[tokio::test]
async fn test_from_config_with_credentials_logs_on() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .and(body_string_contains("username=admin"))
        .respond_with(xml(200, "auth/login.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Config::with_session_token(
        mock_server.uri(),
        "admin".to_string(),
        SecretString::new("changeme".to_string().into()),
    );
    let service = Service::from_config(&config, &CancellationToken::new())
        .await
        .unwrap();

    let token = service.context().token().await.unwrap();
    assert!(matches!(token, AuthToken::Session(_)));
}

#[tokio::test]
async fn test_log_off_deletes_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/services/authentication/httpauth-tokens/test-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    service.log_off(&CancellationToken::new()).await.unwrap();
    assert!(!service.context().is_authenticated().await);
}

#[tokio::test]
async fn test_log_off_clears_token_on_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/services/authentication/httpauth-tokens/test-token"))
        .respond_with(xml(500, "errors/server_error.xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service(&mock_server).await;
    let err = service.log_off(&CancellationToken::new()).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(!service.context().is_authenticated().await);
}

#[tokio::test]
async fn test_log_off_keeps_api_token_on_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = anonymous_service(&mock_server);
    service
        .context()
        .set_token(AuthToken::bearer("long-lived"))
        .await;
    service.log_off(&CancellationToken::new()).await.unwrap();
    assert!(!service.context().is_authenticated().await);
}
