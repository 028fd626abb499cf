//! End-to-end tests for the Axum login router

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use common::{MockCredentialStore, MockSessionStore};
use http_body_util::BodyExt;
use login_gate::middleware::{CookieKey, LoginConfig, login_routes};
use login_gate::{OAuthProviderConfig, ProviderKey, ProviderRegistry};
use serde_json::Value;
use tower::ServiceExt;

fn providers() -> ProviderRegistry {
    ProviderRegistry::new()
        .with_provider(
            OAuthProviderConfig::new(ProviderKey::GitHub)
                .with_client_id("X")
                .with_redirect_uri("https://app/cb".parse().unwrap())
                .with_authorization_uri("https://github.com/authorize".parse().unwrap())
                .with_enabled(true),
        )
        .with_provider(OAuthProviderConfig::new(ProviderKey::Facebook).with_client_id("fb"))
}

fn app(sessions: MockSessionStore) -> Router {
    let config = LoginConfig::new(providers()).with_cookie_key(CookieKey::generate());
    login_routes(config, MockCredentialStore::alice(), sessions)
}

fn get_login(cookies: &[String]) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/login");
    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookies.join("; "));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_login(form: &str, cookies: &[String]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookies.join("; "));
    }
    builder.body(Body::from(form.to_owned())).unwrap()
}

/// Raw `Set-Cookie` header values.
fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

/// `name=value` pairs from `Set-Cookie`, ready for a `Cookie` header.
fn cookie_pairs(response: &Response) -> Vec<String> {
    set_cookies(response)
        .iter()
        .map(|c| c.split(';').next().unwrap().to_owned())
        .collect()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login_as_alice(app: &Router) -> Response {
    app.clone()
        .oneshot(post_login("username=alice&password=hunter2", &[]))
        .await
        .unwrap()
}

#[tokio::test]
async fn initial_view_lists_enabled_providers() {
    let app = app(MockSessionStore::new());

    let response = app.oneshot(get_login(&[])).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());

    let body = json_body(response).await;
    assert_eq!(body["username"], "");
    assert!(body["error"].is_null());

    let providers = body["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0]["target_uri"], "https://github.com/authorize");
    assert_eq!(providers[0]["form_method"], "GET");
    assert_eq!(
        providers[0]["hidden_params"],
        serde_json::json!([["client_id", "X"], ["redirect_uri", "https://app/cb"]])
    );
}

#[tokio::test]
async fn successful_login_sets_both_cookies_and_redirects_to_root() {
    let sessions = MockSessionStore::new();
    let app = app(sessions.clone());

    let response = login_as_alice(&app).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(sessions.len(), 1);

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    let user = cookies.iter().find(|c| c.starts_with("login_user=")).unwrap();
    let session = cookies.iter().find(|c| c.starts_with("login_session=")).unwrap();
    assert!(session.contains("HttpOnly"));
    assert!(session.contains("Secure"));
    assert!(!user.contains("Max-Age=0"));
    assert!(!session.contains("Max-Age=0"));
}

#[tokio::test]
async fn authenticated_caller_is_redirected_away() {
    let sessions = MockSessionStore::new();
    let app = app(sessions.clone());
    let cookies = cookie_pairs(&login_as_alice(&app).await);

    for request in [
        get_login(&cookies),
        post_login("username=alice&password=hunter2", &cookies),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert!(set_cookies(&response).is_empty());
    }
    assert_eq!(sessions.len(), 1, "no extra session while already logged in");
}

#[tokio::test]
async fn wrong_password_clears_both_cookies() {
    let app = app(MockSessionStore::new());

    let response = app
        .oneshot(post_login("username=alice&password=wrong", &[]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    for name in ["login_user=", "login_session="] {
        let cookie = cookies.iter().find(|c| c.starts_with(name)).unwrap();
        assert!(cookie.contains("Max-Age=0"), "{name} should be cleared: {cookie}");
    }

    let body = json_body(response).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["error"], "Bad username/password.");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn unknown_user_looks_like_wrong_password() {
    let app = app(MockSessionStore::new());

    let unknown = app
        .clone()
        .oneshot(post_login("username=mallory&password=wrong", &[]))
        .await
        .unwrap();
    let wrong = app
        .oneshot(post_login("username=alice&password=wrong", &[]))
        .await
        .unwrap();

    assert_eq!(unknown.status(), wrong.status());
    assert_eq!(set_cookies(&unknown).len(), set_cookies(&wrong).len());
    let (unknown, wrong) = (json_body(unknown).await, json_body(wrong).await);
    assert_eq!(unknown["error"], wrong["error"]);
}

#[tokio::test]
async fn username_cookie_alone_only_prefills() {
    let sessions = MockSessionStore::new();
    let app = app(sessions.clone());
    let user_cookie: Vec<String> = cookie_pairs(&login_as_alice(&app).await)
        .into_iter()
        .filter(|c| c.starts_with("login_user="))
        .collect();

    let response = app.oneshot(get_login(&user_cookie)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["username"], "alice");
}

#[tokio::test]
async fn session_write_failure_is_internal_error() {
    let app = app(MockSessionStore::failing());

    let response = login_as_alice(&app).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(set_cookies(&response).is_empty());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Internal error");
}

#[tokio::test]
async fn dev_cookies_are_not_secure() {
    let config = LoginConfig::new(ProviderRegistry::new()).with_secure_cookies(false);
    let app = login_routes(config, MockCredentialStore::alice(), MockSessionStore::new());

    let response = login_as_alice(&app).await;

    assert!(set_cookies(&response).iter().all(|c| !c.contains("Secure")));
}
